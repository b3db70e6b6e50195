//! Run a single task and report what it produced.

use anyhow::Result;
use jig_lib::dispatch;

use crate::cmd::Invocation;
use crate::output::{format_duration, print_artifact, print_json, print_success};

pub fn cmd_task(invocation: &Invocation, task: &str) -> Result<()> {
  let definition = invocation.definition()?;
  let report = dispatch(task, &definition)?;

  if invocation.format.is_json() {
    print_json(&serde_json::json!({
      "task": report.task,
      "duration_ms": report.duration.as_millis(),
      "artifacts": report.artifacts,
    }))?;
    return Ok(());
  }

  print_success(&format!("{} finished in {}", report.task, format_duration(report.duration)));
  for artifact in &report.artifacts {
    print_artifact(artifact);
  }
  Ok(())
}
