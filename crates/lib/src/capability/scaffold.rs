use std::path::PathBuf;

use serde::Serialize;

/// Configuration of the `scaffold` capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scaffold {
  /// Directories created under the project base directory.
  pub directories: Vec<PathBuf>,
  /// Write a `jig.toml` when none exists.
  pub write_config: bool,
  /// Write a sample `Main.java` when the main source root is empty.
  pub sample_main: bool,
}

impl Default for Scaffold {
  fn default() -> Self {
    Self {
      directories: vec![
        PathBuf::from("src/main/java"),
        PathBuf::from("src/main/resources"),
        PathBuf::from("src/test/java"),
      ],
      write_config: true,
      sample_main: true,
    }
  }
}
