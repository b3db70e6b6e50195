//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Get path to a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// Read fixture content.
pub fn fixture_content(name: &str) -> String {
  std::fs::read_to_string(fixture_path(name)).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// Isolated project directory.
pub struct TestEnv {
  pub temp: TempDir,
  pub config_path: PathBuf,
}

impl TestEnv {
  /// Create a project whose `jig.toml` is the given fixture.
  pub fn from_fixture(name: &str) -> Self {
    let env = Self::empty();
    std::fs::write(&env.config_path, fixture_content(name)).unwrap();
    env
  }

  /// Create a project directory without a configuration file.
  pub fn empty() -> Self {
    let temp = TempDir::new().unwrap();
    let root = dunce::canonicalize(temp.path()).unwrap();
    let config_path = root.join("jig.toml");
    Self { temp, config_path }
  }

  /// Project root.
  pub fn root(&self) -> PathBuf {
    self.config_path.parent().unwrap().to_path_buf()
  }

  /// Write a file relative to the project root.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.root().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// A jig command running from the project root.
  pub fn jig_cmd(&self) -> Command {
    let mut cmd = cargo_bin_cmd!("jig");
    cmd
      .current_dir(self.root())
      .env_remove("JIG_JAVA_TARGET")
      .env_remove("JIG_KOTLIN_VERSION")
      .env_remove("JIG_OUTPUT_DIR")
      .env_remove("RUST_LOG");
    cmd
  }
}
