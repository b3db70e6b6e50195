//! Execution context handed to stage actions, hooks and task operations.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::capability::Capability;
use crate::definition::BuildDefinition;
use crate::error::BuildError;
use crate::exec::{self, Invocation};

/// State of one task dispatch.
///
/// Holds the stage and task stacks used to detect re-entrant invocation and
/// the artifacts produced so far by this dispatch.
pub struct ExecCtx<'a> {
  definition: &'a BuildDefinition,
  task: String,
  stages: Vec<String>,
  tasks: Vec<String>,
  artifacts: Vec<PathBuf>,
}

impl<'a> ExecCtx<'a> {
  pub(crate) fn new(definition: &'a BuildDefinition, task: impl Into<String>) -> Self {
    let task = task.into();
    Self {
      definition,
      tasks: vec![task.clone()],
      task,
      stages: Vec::new(),
      artifacts: Vec::new(),
    }
  }

  pub fn definition(&self) -> &'a BuildDefinition {
    self.definition
  }

  /// The dispatched (top-level) task.
  pub fn task(&self) -> &str {
    &self.task
  }

  /// Innermost stage in progress.
  pub fn current_stage(&self) -> Option<&str> {
    self.stages.last().map(String::as_str)
  }

  /// Stages in progress, outermost first.
  pub fn stage_chain(&self) -> &[String] {
    &self.stages
  }

  /// Run a pipeline stage, including its hooks.
  pub fn run_stage(&mut self, stage: &str) -> Result<(), BuildError> {
    let pipeline = self.definition.pipeline();
    pipeline.run(stage, self)
  }

  /// Run another task's operation within this dispatch.
  ///
  /// A task that (transitively) invokes itself is rejected as already running.
  pub fn invoke_task(&mut self, name: &str) -> Result<(), BuildError> {
    if let Some(running) = self.tasks.iter().find(|t| t.as_str() == name) {
      return Err(BuildError::TaskAlreadyRunning {
        running: running.clone(),
        requested: name.to_string(),
      });
    }

    let task = self
      .definition
      .tasks()
      .get(name)
      .ok_or_else(|| BuildError::UnknownTask(name.to_string()))?;

    debug!(task = %name, parent = %self.task, "invoking task");
    self.tasks.push(name.to_string());
    let result = (task.operation)(self);
    self.tasks.pop();
    result
  }

  /// Current configuration of capability `T`.
  ///
  /// Modules never instantiated during setup report their defaults.
  pub fn module<T: Capability>(&self) -> T {
    self.definition.registry().read::<T, _>(T::clone).unwrap_or_default()
  }

  /// Run an external command, attributing failure to the current stage.
  pub fn exec(&self, invocation: &Invocation) -> Result<(), BuildError> {
    let stage = self.current_stage().unwrap_or(&self.task);
    exec::execute(invocation, stage)
  }

  /// Record a produced artifact for this dispatch and the definition's run log.
  pub fn record_artifact(&mut self, path: impl AsRef<Path>) {
    let path = path.as_ref().to_path_buf();
    debug!(path = %path.display(), "recorded artifact");
    self.definition.record_artifact(path.clone());
    self.artifacts.push(path);
  }

  /// Artifacts produced by this dispatch, in production order.
  pub fn artifacts(&self) -> &[PathBuf] {
    &self.artifacts
  }

  pub(crate) fn into_artifacts(self) -> Vec<PathBuf> {
    self.artifacts
  }

  pub(crate) fn enter_stage(&mut self, stage: &str) -> Result<(), BuildError> {
    if self.stages.iter().any(|s| s == stage) {
      let mut chain = self.stages.clone();
      chain.push(stage.to_string());
      return Err(BuildError::CyclicStageInvocation {
        stage: stage.to_string(),
        chain,
      });
    }
    self.stages.push(stage.to_string());
    Ok(())
  }

  pub(crate) fn exit_stage(&mut self) {
    self.stages.pop();
  }
}
