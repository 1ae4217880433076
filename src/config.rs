//! # Configuration Module
//!
//! This module provides configuration support for headerfix, allowing users
//! to override or extend the built-in extension→prefix table.
//!
//! Configuration can be specified in a `.headerfix.toml` file or via the
//! `HEADERFIX_CONFIG` environment variable.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".headerfix.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "HEADERFIX_CONFIG";

/// Main configuration struct for headerfix.
///
/// Loaded from a `.headerfix.toml` file. Prefixes are stored as bare tokens
/// without the trailing space (e.g. `"#"`, `"//"`, `"%%"`).
///
/// ```toml
/// [comment-prefixes]
/// xyz = "%%"
///
/// [filenames]
/// "Brewfile" = "#"
/// "*.envrc" = "#"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct Config {
  /// Comment prefix overrides keyed by file extension, without the leading
  /// dot (e.g. "java", "xyz").
  #[serde(default, rename = "comment-prefixes")]
  pub comment_prefixes: HashMap<String, String>,

  /// Comment prefix overrides keyed by exact filename or glob pattern
  /// (e.g. "Brewfile", "*.envrc").
  #[serde(default)]
  pub filenames: HashMap<String, String>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  Read { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  Parse { path: PathBuf, source: toml::de::Error },

  /// A prefix override is empty, which would classify every line of every
  /// file as header content.
  #[error("Empty comment prefix for '{key}' in config file '{path}'")]
  EmptyPrefix { path: PathBuf, key: String },
}

impl Config {
  /// Validates the loaded configuration.
  fn validate(&self, path: &Path) -> Result<(), ConfigError> {
    let keys = self.comment_prefixes.iter().chain(self.filenames.iter());
    for (key, prefix) in keys {
      if prefix.trim().is_empty() {
        return Err(ConfigError::EmptyPrefix {
          path: path.to_path_buf(),
          key: key.clone(),
        });
      }
    }
    Ok(())
  }
}

/// Loads the configuration file, if one applies.
///
/// Resolution order:
/// 1. The explicit `--config PATH` argument (an error if unreadable)
/// 2. The `HEADERFIX_CONFIG` environment variable (an error if unreadable)
/// 3. `.headerfix.toml` in the current directory, when present
///
/// With `no_config` set, nothing is loaded and `Ok(None)` is returned.
pub fn load_config(explicit: Option<&Path>, no_config: bool) -> Result<Option<Config>, ConfigError> {
  if no_config {
    verbose_log!("Config loading disabled via --no-config");
    return Ok(None);
  }

  if let Some(path) = explicit {
    return load_config_file(path).map(Some);
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(env_path);
    return load_config_file(&path).map(Some);
  }

  let default_path = Path::new(DEFAULT_CONFIG_FILENAME);
  if default_path.exists() {
    return load_config_file(default_path).map(Some);
  }

  Ok(None)
}

/// Loads and validates a single config file.
fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
  verbose_log!("Loading config from: {}", path.display());

  let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
    path: path.to_path_buf(),
    source,
  })?;

  let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
    path: path.to_path_buf(),
    source,
  })?;

  config.validate(path)?;

  Ok(config)
}

#[cfg(test)]
mod tests {
  use std::io::Write as _;

  use super::*;

  fn write_config(dir: &tempfile::TempDir, content: &str) -> PathBuf {
    let path = dir.path().join(DEFAULT_CONFIG_FILENAME);
    let mut file = std::fs::File::create(&path).expect("create config");
    file.write_all(content.as_bytes()).expect("write config");
    path
  }

  #[test]
  fn parses_prefix_overrides() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(
      &dir,
      r##"
[comment-prefixes]
xyz = "%%"
java = "//"

[filenames]
"Brewfile" = "#"
"##,
    );

    let config = load_config_file(&path).expect("load");
    assert_eq!(config.comment_prefixes.get("xyz"), Some(&"%%".to_string()));
    assert_eq!(config.comment_prefixes.get("java"), Some(&"//".to_string()));
    assert_eq!(config.filenames.get("Brewfile"), Some(&"#".to_string()));
  }

  #[test]
  fn rejects_invalid_toml() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(&dir, "[comment-prefixes\nbroken");

    let err = load_config_file(&path).expect_err("should fail");
    assert!(matches!(err, ConfigError::Parse { .. }));
  }

  #[test]
  fn rejects_empty_prefix() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(&dir, "[comment-prefixes]\nxyz = \"\"\n");

    let err = load_config_file(&path).expect_err("should fail");
    assert!(matches!(err, ConfigError::EmptyPrefix { .. }));
  }

  #[test]
  fn missing_explicit_config_is_an_error() {
    let err = load_config(Some(Path::new("/nonexistent/headerfix.toml")), false).expect_err("should fail");
    assert!(matches!(err, ConfigError::Read { .. }));
  }

  #[test]
  fn no_config_flag_skips_loading() {
    let loaded = load_config(Some(Path::new("/nonexistent/headerfix.toml")), true).expect("ok");
    assert!(loaded.is_none());
  }
}
