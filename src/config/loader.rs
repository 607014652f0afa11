//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read an existing config file.
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/tailpane/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// At-bottom tolerance in rows for the pause/resume decision.
    #[serde(default)]
    pub threshold: Option<f64>,

    /// Start in follow mode.
    #[serde(default)]
    pub follow: Option<bool>,

    /// Line wrapping enabled.
    #[serde(default)]
    pub line_wrap: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// At-bottom tolerance in rows.
    pub threshold: f64,
    /// Start in follow mode.
    pub follow: bool,
    /// Line wrapping.
    pub line_wrap: bool,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            threshold: 150.0,
            follow: true,
            line_wrap: true,
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve the default log file path.
///
/// `~/.local/state/tailpane/tailpane.log` on Unix-like systems, the
/// platform equivalent elsewhere, falling back to the current directory
/// when no state directory can be determined.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("tailpane").join("tailpane.log")
    } else {
        PathBuf::from("tailpane.log")
    }
}

/// Resolve the default config file path.
///
/// `~/.config/tailpane/config.toml` on Unix, the platform equivalent
/// elsewhere; `None` if no config directory can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tailpane").join("config.toml"))
}

/// Load a config file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist (not an error - defaults
/// apply).
///
/// # Errors
///
/// Returns an error only if the file exists but cannot be read or parsed.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Load configuration with path precedence.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `TAILPANE_CONFIG` environment variable
/// 3. Default path `~/.config/tailpane/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("TAILPANE_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge a loaded config file into defaults.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        threshold: config.threshold.unwrap_or(defaults.threshold),
        follow: config.follow.unwrap_or(defaults.follow),
        line_wrap: config.line_wrap.unwrap_or(defaults.line_wrap),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides.
///
/// - `TAILPANE_THRESHOLD`: at-bottom tolerance (ignored if unparsable)
/// - `TAILPANE_LOG`: log file path
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var("TAILPANE_THRESHOLD") {
        if let Ok(threshold) = raw.parse::<f64>() {
            config.threshold = threshold;
        }
    }

    if let Ok(path) = std::env::var("TAILPANE_LOG") {
        config.log_file_path = PathBuf::from(path);
    }

    config
}

/// Apply CLI argument overrides. Highest precedence; only flags the user
/// actually passed are applied.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    threshold: Option<f64>,
    no_follow: bool,
    no_wrap: bool,
) -> ResolvedConfig {
    if let Some(threshold) = threshold {
        config.threshold = threshold;
    }
    if no_follow {
        config.follow = false;
    }
    if no_wrap {
        config.line_wrap = false;
    }
    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
