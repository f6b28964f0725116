//! # Configuration Module
//!
//! This module provides configuration support for headersync, so a project can
//! pin its company, licence and exclusion file instead of repeating them on
//! every invocation.
//!
//! Configuration can be specified in a `.headersync.toml` file or via the
//! `HEADERSYNC_CONFIG` environment variable:
//!
//! ```toml
//! company = "Example Corp"
//! licence = "AGPL-3.0-or-later"
//! exclude-file = ".headersync-ignore"
//! template-dir = "header-templates"
//! ```
//!
//! Relative paths are resolved against the directory holding the config file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::licence::Licence;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".headersync.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "HEADERSYNC_CONFIG";

/// Main configuration struct for headersync.
///
/// Every key is optional; command-line flags take precedence over the file.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
  /// Company matched in existing headers and written into new ones
  pub company: Option<String>,

  /// Licence of inserted headers
  pub licence: Option<Licence>,

  /// Exclusion file used instead of `.headersync-ignore`
  pub exclude_file: Option<PathBuf>,

  /// Directory of `<licence>/template<suffix>` files replacing the builtin
  /// templates
  pub template_dir: Option<PathBuf>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML or unknown keys.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A value is syntactically valid but unusable.
  #[error("Invalid value for '{key}': {message}")]
  InvalidValue { key: &'static str, message: String },
}

impl Config {
  /// Load configuration from a file.
  ///
  /// # Arguments
  ///
  /// * `path` - Path to the configuration file
  ///
  /// # Returns
  ///
  /// The loaded configuration with relative paths resolved, or an error if
  /// the file cannot be read, parsed or validated.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    debug!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(config.resolve_paths(base))
  }

  /// Validate the configuration.
  ///
  /// Checks that:
  /// - `company` is not blank
  /// - Paths are not empty
  fn validate(&self) -> Result<(), ConfigError> {
    if let Some(company) = &self.company
      && company.trim().is_empty()
    {
      return Err(ConfigError::InvalidValue {
        key: "company",
        message: "company cannot be empty".to_string(),
      });
    }

    let paths = [("exclude-file", &self.exclude_file), ("template-dir", &self.template_dir)];
    for (key, path) in paths {
      if path.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
        return Err(ConfigError::InvalidValue {
          key,
          message: "path cannot be empty".to_string(),
        });
      }
    }

    Ok(())
  }

  fn resolve_paths(self, base: &Path) -> Self {
    let resolve = |p: PathBuf| if p.is_absolute() { p } else { base.join(p) };
    Self {
      exclude_file: self.exclude_file.map(resolve),
      template_dir: self.template_dir.map(resolve),
      ..self
    }
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `HEADERSYNC_CONFIG` environment variable
/// 3. `.headersync.toml` in `search_dir`
///
/// An explicit path is returned even if it does not exist, so that loading
/// it reports the problem instead of silently running with defaults.
pub fn discover_config_path(explicit_path: Option<&Path>, search_dir: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    debug!("Using explicit config path: {}", path.display());
    return Some(path.to_path_buf());
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      debug!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    debug!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let local_config = search_dir.join(DEFAULT_CONFIG_FILENAME);
  if local_config.exists() {
    debug!("Using config: {}", local_config.display());
    return Some(local_config);
  }

  debug!("No config file found");
  None
}

/// Load configuration from the discovered path.
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path from CLI flag
/// * `search_dir` - Directory searched for `.headersync.toml`
/// * `no_config` - If true, skip config file discovery
///
/// # Returns
///
/// The loaded configuration, or `None` if discovery is disabled or no config
/// file is found.
pub fn load_config(explicit_path: Option<&Path>, search_dir: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    debug!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  match discover_config_path(explicit_path, search_dir) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}
