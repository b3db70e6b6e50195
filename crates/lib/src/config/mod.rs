//! `jig.toml` configuration.
//!
//! Values are layered, later sources overriding earlier ones:
//!
//! 1. built-in defaults
//! 2. `jig.toml`, found by walking up from the start directory
//! 3. environment variables (`JIG_JAVA_TARGET`, `JIG_KOTLIN_VERSION`, `JIG_OUTPUT_DIR`,
//!    `JIG_SKIP_TESTS`)
//! 4. explicit `key=value` overrides from the command line

mod loader;
mod types;

pub use loader::*;
pub use types::*;

use std::path::PathBuf;

use thiserror::Error;

/// Name of the configuration file.
pub const CONFIG_FILE: &str = "jig.toml";

/// Errors loading or overriding configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("invalid configuration in {}: {source}", path.display())]
  Parse { path: PathBuf, source: toml::de::Error },

  #[error("unknown override key '{0}' (expected one of: {keys})", keys = OVERRIDE_KEYS.join(", "))]
  UnknownOverride(String),

  #[error("invalid override '{0}': expected key=value")]
  InvalidOverride(String),

  #[error("override '{0}' needs a non-empty value")]
  EmptyOverride(String),

  #[error("invalid value '{value}' for '{key}': {reason}")]
  InvalidValue {
    key: String,
    value: String,
    reason: &'static str,
  },
}
