//! Task dispatch: mapping an external command name to an operation.
//!
//! [`dispatch`] is the single entry point external invocation uses. It
//! refuses to start while another task is executing or before setup
//! completed, runs the task's operation with a fresh [`ExecCtx`], and
//! reports the artifacts that operation produced.

mod types;

pub use types::*;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{error, info};

use crate::context::ExecCtx;
use crate::definition::BuildDefinition;
use crate::error::BuildError;

/// Exit status for a task name with no operation bound to it.
pub const EXIT_UNKNOWN_TASK: i32 = 2;

/// Outcome of a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReport {
  pub task: String,
  pub duration: Duration,
  /// Artifacts produced by this dispatch, in production order.
  pub artifacts: Vec<PathBuf>,
}

/// A failed dispatch.
#[derive(Debug, Error)]
#[error("task '{task}' failed: {source}")]
pub struct TaskError {
  pub task: String,
  #[source]
  pub source: BuildError,
}

impl TaskError {
  /// Process exit status for this failure. Never zero.
  ///
  /// Unknown tasks exit with [`EXIT_UNKNOWN_TASK`]; a failed external process
  /// propagates its own non-zero status; everything else exits with 1.
  pub fn exit_code(&self) -> i32 {
    match &self.source {
      BuildError::UnknownTask(_) => EXIT_UNKNOWN_TASK,
      BuildError::ExternalProcessFailure { code: Some(code), .. } if *code != 0 => *code,
      _ => 1,
    }
  }
}

/// Run the operation bound to `task` on `definition`.
pub fn dispatch(task: &str, definition: &BuildDefinition) -> Result<TaskReport, TaskError> {
  let fail = |source: BuildError| TaskError {
    task: task.to_string(),
    source,
  };

  definition.ensure_dispatchable(task).map_err(fail)?;
  let entry = definition
    .tasks()
    .get(task)
    .ok_or_else(|| BuildError::UnknownTask(task.to_string()))
    .map_err(fail)?;

  info!(task = %task, definition = %definition.name(), "dispatching task");
  let start = Instant::now();
  let _execution = definition.begin_execution(task);

  let mut ctx = ExecCtx::new(definition, task);
  if let Err(source) = (entry.operation)(&mut ctx) {
    error!(task = %task, error = %source, "task failed");
    return Err(fail(source));
  }

  let report = TaskReport {
    task: task.to_string(),
    duration: start.elapsed(),
    artifacts: ctx.into_artifacts(),
  };
  info!(task = %task, artifacts = report.artifacts.len(), "task completed");
  Ok(report)
}
