use std::path::PathBuf;

use serde::Serialize;

/// Configuration of the `java-compile` capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JavaCompile {
  /// Source roots, relative to the project base directory.
  pub source_roots: Vec<PathBuf>,
  /// Resource roots copied into the jar as-is.
  pub resource_roots: Vec<PathBuf>,
  /// Value passed to `javac --release`.
  pub target_version: String,
  /// Compiler executable.
  pub compiler: String,
  /// Compiler plugin identifiers, passed as `-Xplugin:<id>`.
  pub plugins: Vec<String>,
  /// Extra compiler options, appended after the generated ones.
  pub options: Vec<String>,
  /// Launcher the run stage starts the packaged program with.
  pub launcher: String,
}

impl Default for JavaCompile {
  fn default() -> Self {
    Self {
      source_roots: vec![PathBuf::from("src/main/java")],
      resource_roots: vec![PathBuf::from("src/main/resources")],
      target_version: "17".to_string(),
      compiler: "javac".to_string(),
      plugins: Vec::new(),
      options: Vec::new(),
      launcher: "java".to_string(),
    }
  }
}
