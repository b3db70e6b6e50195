mod list;
mod task;

pub use list::cmd_list;
pub use task::cmd_task;

use std::path::PathBuf;

use anyhow::{Context, Result};
use jig_lib::BuildDefinition;
use jig_lib::config::{ConfigLoader, parse_override};
use jig_lib::project::ProjectBuild;
use tracing::debug;

use crate::output::OutputFormat;

/// Options shared by every command.
pub struct Invocation {
  pub directory: PathBuf,
  pub file: Option<PathBuf>,
  pub defines: Vec<String>,
  pub format: OutputFormat,
}

impl Invocation {
  /// Load the configuration and run the project's setup.
  pub fn definition(&self) -> Result<BuildDefinition> {
    let mut loader = ConfigLoader::new();
    for raw in &self.defines {
      let (key, value) = parse_override(raw)?;
      loader = loader.with_override(key, value);
    }

    let loaded = match &self.file {
      Some(file) => loader.load_from_file(file)?,
      None => {
        let start = dunce::canonicalize(&self.directory)
          .with_context(|| format!("Project directory not found: {}", self.directory.display()))?;
        loader.load_from_directory(&start)?
      }
    };
    debug!(root = %loaded.root.display(), file = ?loaded.file, "configuration loaded");

    ProjectBuild::from_loaded(loaded)
      .into_definition()
      .context("Failed to set up build definition")
  }
}
