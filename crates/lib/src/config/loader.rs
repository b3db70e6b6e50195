use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{CONFIG_FILE, ConfigError, JigConfig};
use crate::util::paths::output_dir_problem;

pub const ENV_JAVA_TARGET: &str = "JIG_JAVA_TARGET";
pub const ENV_KOTLIN_VERSION: &str = "JIG_KOTLIN_VERSION";
pub const ENV_OUTPUT_DIR: &str = "JIG_OUTPUT_DIR";
pub const ENV_SKIP_TESTS: &str = "JIG_SKIP_TESTS";

/// Keys accepted by [`apply_override`].
pub const OVERRIDE_KEYS: [&str; 6] = [
  "java.target",
  "kotlin.version",
  "output.dir",
  "project.version",
  "pack.classifier",
  "test.skip",
];

/// Configuration together with where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
  pub config: JigConfig,
  /// Project root: the directory holding the config file, or the start
  /// directory when none was found.
  pub root: PathBuf,
  pub file: Option<PathBuf>,
}

impl LoadedConfig {
  /// Project name, falling back to the root directory name.
  pub fn project_name(&self) -> String {
    self
      .config
      .project
      .name
      .clone()
      .or_else(|| self.root.file_name().map(|n| n.to_string_lossy().into_owned()))
      .unwrap_or_else(|| "project".to_string())
  }
}

/// Loads configuration with environment and explicit overrides applied.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
  overrides: Vec<(String, String)>,
  read_env: bool,
}

impl Default for ConfigLoader {
  fn default() -> Self {
    Self {
      overrides: Vec::new(),
      read_env: true,
    }
  }
}

impl ConfigLoader {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add an explicit override applied after the environment.
  pub fn with_override(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.overrides.push((key.into(), value.into()));
    self
  }

  /// Ignore `JIG_*` environment variables.
  pub fn without_env(mut self) -> Self {
    self.read_env = false;
    self
  }

  /// Find `jig.toml` in `start_dir` or its ancestors and load it.
  ///
  /// When no file is found the defaults are used and `start_dir` is the root.
  pub fn load_from_directory(&self, start_dir: &Path) -> Result<LoadedConfig, ConfigError> {
    match find_config(start_dir) {
      Some(file) => self.load_from_file(&file),
      None => {
        debug!(start = %start_dir.display(), "no {} found, using defaults", CONFIG_FILE);
        self.finish(JigConfig::default(), start_dir.to_path_buf(), None)
      }
    }
  }

  /// Load a specific configuration file.
  pub fn load_from_file(&self, file: &Path) -> Result<LoadedConfig, ConfigError> {
    let contents = fs::read_to_string(file).map_err(|source| ConfigError::Read {
      path: file.to_path_buf(),
      source,
    })?;
    let config: JigConfig = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
      path: file.to_path_buf(),
      source,
    })?;
    debug!(path = %file.display(), "loaded configuration");

    let root = file
      .parent()
      .filter(|p| !p.as_os_str().is_empty())
      .map(Path::to_path_buf)
      .unwrap_or_else(|| PathBuf::from("."));
    self.finish(config, root, Some(file.to_path_buf()))
  }

  fn finish(&self, mut config: JigConfig, root: PathBuf, file: Option<PathBuf>) -> Result<LoadedConfig, ConfigError> {
    if self.read_env {
      apply_env_overrides(&mut config)?;
    }
    for (key, value) in &self.overrides {
      apply_override(&mut config, key, value)?;
    }
    Ok(LoadedConfig { config, root, file })
  }
}

/// Walk up from `start_dir` looking for the configuration file.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
  start_dir
    .ancestors()
    .map(|dir| dir.join(CONFIG_FILE))
    .find(|candidate| candidate.is_file())
}

/// Apply `JIG_*` environment variables to `config`.
///
/// Unset and empty variables are ignored; set values are validated like
/// explicit overrides.
pub fn apply_env_overrides(config: &mut JigConfig) -> Result<(), ConfigError> {
  let vars = [
    (ENV_JAVA_TARGET, "java.target"),
    (ENV_KOTLIN_VERSION, "kotlin.version"),
    (ENV_OUTPUT_DIR, "output.dir"),
    (ENV_SKIP_TESTS, "test.skip"),
  ];
  for (var, key) in vars {
    if let Ok(value) = env::var(var)
      && !value.is_empty()
    {
      debug!(var = %var, value = %value, "applying environment override");
      apply_override(config, key, &value)?;
    }
  }
  Ok(())
}

/// Set one configuration value by its override key.
///
/// Every key requires a non-empty value. `output.dir` must be a relative
/// path below the project directory and `test.skip` a boolean.
pub fn apply_override(config: &mut JigConfig, key: &str, value: &str) -> Result<(), ConfigError> {
  if !OVERRIDE_KEYS.contains(&key) {
    return Err(ConfigError::UnknownOverride(key.to_string()));
  }
  if value.trim().is_empty() {
    return Err(ConfigError::EmptyOverride(key.to_string()));
  }

  let invalid = |reason| ConfigError::InvalidValue {
    key: key.to_string(),
    value: value.to_string(),
    reason,
  };
  match key {
    "java.target" => config.toolchain.java_target = value.to_string(),
    "kotlin.version" => config.toolchain.kotlin_version = Some(value.to_string()),
    "output.dir" => {
      let dir = PathBuf::from(value);
      if let Some(reason) = output_dir_problem(&dir) {
        return Err(invalid(reason));
      }
      config.layout.output = dir;
    }
    "project.version" => config.project.version = Some(value.to_string()),
    "pack.classifier" => config.pack.classifier = Some(value.to_string()),
    "test.skip" => config.test.skip = value.parse().map_err(|_| invalid("expected true or false"))?,
    other => return Err(ConfigError::UnknownOverride(other.to_string())),
  }
  Ok(())
}

/// Split a `key=value` override.
pub fn parse_override(raw: &str) -> Result<(String, String), ConfigError> {
  match raw.split_once('=') {
    Some((key, value)) if !key.trim().is_empty() => Ok((key.trim().to_string(), value.to_string())),
    _ => Err(ConfigError::InvalidOverride(raw.to_string())),
  }
}
