//! Project skeleton generation.
//!
//! Creates the directory layout a build definition expects, a `jig.toml`
//! describing it, and a sample entry point. Existing files are never
//! overwritten.

mod templates;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

pub use templates::{JIG_TOML_TEMPLATE, MAIN_JAVA_PATH, MAIN_JAVA_TEMPLATE};

use crate::capability::{JavaCompile, Scaffold};
use crate::config::CONFIG_FILE;
use crate::error::BuildError;

/// What a scaffold run created.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScaffoldResult {
  /// Directories that did not exist before.
  pub created_dirs: Vec<PathBuf>,
  /// The `jig.toml` written, if any.
  pub config: Option<PathBuf>,
  /// The sample source written, if any.
  pub sample: Option<PathBuf>,
}

/// Scaffold a project named `name` under `base_dir`.
pub fn scaffold(
  base_dir: &Path,
  name: &str,
  options: &Scaffold,
  java: &JavaCompile,
) -> Result<ScaffoldResult, BuildError> {
  let mut result = ScaffoldResult::default();

  for dir in &options.directories {
    let path = base_dir.join(dir);
    if path.is_dir() {
      continue;
    }
    fs::create_dir_all(&path).map_err(|e| BuildError::io(&path, e))?;
    result.created_dirs.push(path);
  }

  if options.write_config {
    let config = base_dir.join(CONFIG_FILE);
    if config.exists() {
      warn!(path = %config.display(), "config already exists, leaving it untouched");
    } else {
      write_file(&config, &JIG_TOML_TEMPLATE.replace("{name}", name))?;
      result.config = Some(config);
    }
  }

  if options.sample_main
    && let Some(root) = java.source_roots.first()
  {
    let root = base_dir.join(root);
    if has_java_sources(&root) {
      info!(root = %root.display(), "sources present, skipping sample");
    } else {
      let sample = root.join(MAIN_JAVA_PATH);
      write_file(&sample, &MAIN_JAVA_TEMPLATE.replace("{name}", name))?;
      result.sample = Some(sample);
    }
  }

  info!(
    base = %base_dir.display(),
    dirs = result.created_dirs.len(),
    config = result.config.is_some(),
    sample = result.sample.is_some(),
    "scaffolded project"
  );
  Ok(result)
}

fn write_file(path: &Path, contents: &str) -> Result<(), BuildError> {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
  }
  fs::write(path, contents).map_err(|e| BuildError::io(path, e))
}

fn has_java_sources(root: &Path) -> bool {
  walkdir::WalkDir::new(root)
    .into_iter()
    .filter_map(Result::ok)
    .any(|entry| entry.path().extension().is_some_and(|ext| ext == "java"))
}
