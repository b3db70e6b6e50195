//! Error taxonomy for build definitions, pipelines and task dispatch.
//!
//! Every failure that can reach the dispatcher is a [`BuildError`] variant.
//! None of them are retried: re-running a compiler or packager without
//! changing its inputs produces the same failure.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while setting up or executing a build definition.
#[derive(Debug, Error)]
pub enum BuildError {
  /// No constructor is registered for the requested capability kind.
  #[error("unknown capability kind: {0}")]
  UnknownCapabilityKind(String),

  /// A hook or run request named a stage that is not defined.
  #[error("unknown stage: {0}")]
  UnknownStage(String),

  /// A stage already has a `replace-default` hook.
  #[error("stage '{stage}' is already replaced by '{existing}', cannot register '{rejected}'")]
  ConflictingReplacement {
    stage: String,
    existing: String,
    rejected: String,
  },

  /// A stage invoked itself, directly or through other stages.
  #[error("cyclic stage invocation of '{stage}': {}", chain.join(" -> "))]
  CyclicStageInvocation { stage: String, chain: Vec<String> },

  /// The one-time setup routine was invoked a second time.
  #[error("setup has already run for this build definition")]
  SetupAlreadyRun,

  /// A task was dispatched while another one is executing.
  #[error("task '{running}' is executing, cannot dispatch '{requested}'")]
  TaskAlreadyRunning { running: String, requested: String },

  /// No operation is bound to the task name.
  #[error("unknown task: {0}")]
  UnknownTask(String),

  /// An external compiler, packager or program exited unsuccessfully.
  #[error("external process failed in stage '{stage}' with exit code {code:?}: {command}")]
  ExternalProcessFailure {
    stage: String,
    command: String,
    code: Option<i32>,
  },

  /// A configuration mutation was attempted outside the setup phase.
  #[error("configuration is frozen outside setup, cannot {operation}")]
  ConfigurationFrozen { operation: &'static str },

  /// A task was dispatched before setup completed successfully.
  #[error("build definition setup has not completed")]
  SetupIncomplete,

  /// A stage with the same name is already defined.
  #[error("stage already defined: {0}")]
  DuplicateStage(String),

  /// A task with the same name is already registered.
  #[error("task already defined: {0}")]
  DuplicateTask(String),

  /// A dependency coordinate is not of the form `group:artifact:version`.
  #[error("invalid dependency coordinate '{0}': expected group:artifact:version[:classifier]")]
  InvalidCoordinate(String),

  /// The output directory would not be a strict descendant of the base directory.
  #[error("invalid output directory '{}': {reason}", path.display())]
  InvalidOutputDir { path: PathBuf, reason: &'static str },

  /// `run` was requested but no `Main-Class` attribute is configured.
  #[error("no Main-Class manifest attribute configured")]
  MissingMainClass,

  /// I/O error with the path that caused it.
  #[error("io error at {}: {source}", path.display())]
  Io { path: PathBuf, source: std::io::Error },

  /// Writing the jar archive failed.
  #[error("archive error: {0}")]
  Archive(#[from] zip::result::ZipError),

  /// Loading `jig.toml` failed.
  #[error(transparent)]
  Config(#[from] ConfigError),
}

impl BuildError {
  /// Create an I/O error with path context.
  pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io {
      path: path.into(),
      source,
    }
  }
}
