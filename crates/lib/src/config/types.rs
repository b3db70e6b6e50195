use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::capability::JUNIT_CONSOLE_LAUNCHER;
use crate::definition::DEFAULT_OUTPUT_DIR;
use crate::deps::Coordinate;

/// Contents of a `jig.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct JigConfig {
  pub project: ProjectSection,
  pub toolchain: ToolchainSection,
  pub dependencies: DependenciesSection,
  pub layout: LayoutSection,
  pub pack: PackSection,
  pub test: TestSection,
  /// Extra manifest attributes, sorted by key.
  pub manifest: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ProjectSection {
  /// Artifact base name; the project directory name when unset.
  pub name: Option<String>,
  pub group: Option<String>,
  pub version: Option<String>,
  pub main_class: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ToolchainSection {
  pub java_target: String,
  /// Enables Kotlin compilation when set.
  pub kotlin_version: Option<String>,
  pub javac: String,
  pub kotlinc: String,
  pub java: String,
  pub javac_plugins: Vec<String>,
  pub javac_options: Vec<String>,
  pub kotlin_plugins: Vec<String>,
}

impl Default for ToolchainSection {
  fn default() -> Self {
    Self {
      java_target: "17".to_string(),
      kotlin_version: None,
      javac: "javac".to_string(),
      kotlinc: "kotlinc".to_string(),
      java: "java".to_string(),
      javac_plugins: Vec::new(),
      javac_options: Vec::new(),
      kotlin_plugins: Vec::new(),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DependenciesSection {
  pub compile: Vec<Coordinate>,
  pub test: Vec<Coordinate>,
  pub runtime: Vec<Coordinate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct LayoutSection {
  pub sources: Vec<PathBuf>,
  pub kotlin_sources: Vec<PathBuf>,
  pub resources: Vec<PathBuf>,
  pub tests: Vec<PathBuf>,
  pub output: PathBuf,
}

impl Default for LayoutSection {
  fn default() -> Self {
    Self {
      sources: vec![PathBuf::from("src/main/java")],
      kotlin_sources: vec![PathBuf::from("src/main/kotlin")],
      resources: vec![PathBuf::from("src/main/resources")],
      tests: vec![PathBuf::from("src/test/java")],
      output: PathBuf::from(DEFAULT_OUTPUT_DIR),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct PackSection {
  pub classifier: Option<String>,
  pub deflate: bool,
  pub include_resources: bool,
}

impl Default for PackSection {
  fn default() -> Self {
    Self {
      classifier: None,
      deflate: true,
      include_resources: true,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct TestSection {
  /// Leave tests out of `pack`.
  pub skip: bool,
  pub launcher_main: String,
  /// Extra launcher arguments.
  pub options: Vec<String>,
  /// Environment variables for the test JVM.
  pub env: BTreeMap<String, String>,
}

impl Default for TestSection {
  fn default() -> Self {
    Self {
      skip: false,
      launcher_main: JUNIT_CONSOLE_LAUNCHER.to_string(),
      options: Vec::new(),
      env: BTreeMap::new(),
    }
  }
}
