//! Test utilities for jig-lib.
//!
//! This module provides cross-platform helpers for tests that need to execute
//! shell commands or replace compilers with scripted stand-ins.

use std::path::{Path, PathBuf};

/// Returns the shell command and args to execute a shell script.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), script.to_string()])
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("cmd.exe", vec!["/C".to_string(), script.to_string()])
}

/// Write an executable shell script standing in for a compiler or launcher.
///
/// The script appends its arguments, one per line, to `<dir>/<name>.args`
/// and then runs `body`.
#[cfg(unix)]
pub fn fake_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
  use std::os::unix::fs::PermissionsExt;

  let path = dir.join(name);
  let log = dir.join(format!("{}.args", name));
  let script = format!(
    "#!/bin/sh\nfor arg in \"$@\"; do echo \"$arg\" >> \"{}\"; done\n{}\n",
    log.display(),
    body
  );
  std::fs::write(&path, script).unwrap();
  std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
  path
}

/// Arguments recorded by a [`fake_tool`] script, in call order.
#[cfg(unix)]
pub fn recorded_args(dir: &Path, name: &str) -> Vec<String> {
  std::fs::read_to_string(dir.join(format!("{}.args", name)))
    .map(|s| s.lines().map(str::to_string).collect())
    .unwrap_or_default()
}
