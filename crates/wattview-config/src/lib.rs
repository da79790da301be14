//! Shared configuration for the wattview CLI and TUI.
//!
//! One TOML file at the platform config dir, layered with `WATTVIEW_*`
//! environment variables. Both binaries load the same [`Config`] and
//! apply their own flag overrides on top — this crate never parses CLI
//! arguments.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use wattview_api::TransportConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config ─────────────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Backend base URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// TUI log file (logging to the terminal would corrupt the UI).
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout(),
            log_file: default_log_file(),
        }
    }
}

fn default_endpoint() -> String {
    "http://127.0.0.1:5000".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_log_file() -> PathBuf {
    PathBuf::from("/tmp/wattview-tui.log")
}

impl Config {
    /// Parse and validate the endpoint URL.
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        self.endpoint
            .parse()
            .map_err(|e| ConfigError::Validation {
                field: "endpoint".into(),
                reason: format!("{e}"),
            })
    }

    /// Transport settings for [`wattview_api::ApiClient`].
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "wattview", "wattview").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("wattview");
    p
}

// ── Config loading / saving ─────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit path (tests point this at a temp dir).
pub fn load_config_from(path: &std::path::Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("WATTVIEW_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist or fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_are_usable() {
        let cfg = Config::default();
        assert_eq!(cfg.endpoint, "http://127.0.0.1:5000");
        assert!(cfg.endpoint_url().is_ok());
        assert_eq!(cfg.transport().timeout, Duration::from_secs(30));
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "endpoint = \"http://10.1.1.1:5000\"\ntimeout_secs = 5\n")
            .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.endpoint, "http://10.1.1.1:5000");
        assert_eq!(cfg.timeout_secs, 5);
        assert_eq!(cfg.log_file, default_log_file());
    }

    #[test]
    fn invalid_endpoint_is_a_validation_error() {
        let cfg = Config {
            endpoint: "not a url".into(),
            ..Config::default()
        };
        assert!(matches!(
            cfg.endpoint_url(),
            Err(ConfigError::Validation { .. })
        ));
    }
}
