//! `jig --list`: show the tasks a project defines.

use anyhow::Result;

use crate::cmd::Invocation;
use crate::output::{print_json, print_stat, print_task};

pub fn cmd_list(invocation: &Invocation) -> Result<()> {
  let definition = invocation.definition()?;

  if invocation.format.is_json() {
    let tasks: Vec<_> = definition
      .tasks()
      .iter()
      .map(|task| serde_json::json!({ "name": task.name, "description": task.description }))
      .collect();
    let stages: Vec<_> = definition
      .pipeline()
      .stage_names()
      .into_iter()
      .filter_map(|stage| definition.pipeline().describe(stage).ok())
      .collect();
    print_json(&serde_json::json!({ "project": definition.name(), "tasks": tasks, "stages": stages }))?;
    return Ok(());
  }

  println!("Tasks for {}:", definition.name());
  let width = definition.tasks().names().iter().map(|n| n.len()).max().unwrap_or(0);
  for task in definition.tasks().iter() {
    print_task(&task.name, &task.description, width);
  }
  println!();
  print_stat("Stages", &definition.pipeline().stage_names().join(" "));
  Ok(())
}
