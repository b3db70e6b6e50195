//! External process invocation.
//!
//! Compilers, the packaged program and any other external tool are run as
//! blocking child processes: the calling stage waits for the process to exit
//! and only inspects its exit status.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::error::BuildError;

/// Separator between classpath entries on the current platform.
#[cfg(unix)]
pub const CLASSPATH_SEPARATOR: &str = ":";

#[cfg(windows)]
pub const CLASSPATH_SEPARATOR: &str = ";";

/// Join classpath entries with the platform separator.
pub fn join_classpath<P: AsRef<Path>>(entries: &[P]) -> String {
  entries
    .iter()
    .map(|p| p.as_ref().to_string_lossy().into_owned())
    .collect::<Vec<_>>()
    .join(CLASSPATH_SEPARATOR)
}

/// A fully described external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub program: String,
  pub args: Vec<String>,
  pub env: BTreeMap<String, String>,
  pub cwd: Option<PathBuf>,
}

impl Invocation {
  pub fn new(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
      env: BTreeMap::new(),
      cwd: None,
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.env.insert(key.into(), value.into());
    self
  }

  pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.cwd = Some(dir.into());
    self
  }
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.program)?;
    for arg in &self.args {
      if arg.contains(' ') {
        write!(f, " \"{}\"", arg)?;
      } else {
        write!(f, " {}", arg)?;
      }
    }
    Ok(())
  }
}

/// Run `invocation` to completion on behalf of `stage`.
///
/// Output streams are inherited from jig. A process that cannot be spawned is
/// an I/O error on the program path; a process that exits unsuccessfully is an
/// [`BuildError::ExternalProcessFailure`].
pub fn execute(invocation: &Invocation, stage: &str) -> Result<(), BuildError> {
  info!(stage = %stage, cmd = %invocation, "executing command");

  let mut command = Command::new(&invocation.program);
  command.args(&invocation.args).envs(&invocation.env).stdin(Stdio::null());

  if let Some(cwd) = &invocation.cwd {
    command.current_dir(cwd);
  }
  if !invocation.env.is_empty() {
    debug!(vars = ?invocation.env.keys().collect::<Vec<_>>(), "extra environment");
  }

  let status = command.status().map_err(|e| BuildError::io(&invocation.program, e))?;
  if !status.success() {
    return Err(BuildError::ExternalProcessFailure {
      stage: stage.to_string(),
      command: invocation.to_string(),
      code: status.code(),
    });
  }

  Ok(())
}
