//! Client configuration.
//!
//! Settings come from an optional TOML file, then `.env` / process
//! environment variables override individual keys:
//!
//! | Variable           | Key            |
//! |--------------------|----------------|
//! | `CRS_API_URL`      | `base_url`     |
//! | `CRS_TIMEOUT_SECS` | `timeout_secs` |
//! | `CRS_LOG_LEVEL`    | `log_level`    |
//! | `CRS_LOG_FILE`     | `log_file`     |

use serde::Deserialize;
use std::path::Path;

use crate::logging::LogLevel;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_HEALTH_POLL_SECS: u64 = 30;
/// Longest accepted health poll interval (one day).
pub const MAX_HEALTH_POLL_SECS: u64 = 86_400;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Service root, without the `/api` prefix.
    pub base_url: String,
    /// Request timeout. `None` leaves the transport default in place.
    pub timeout_secs: Option<u64>,
    pub health_poll_secs: u64,
    pub log_level: String,
    pub log_file: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            health_poll_secs: DEFAULT_HEALTH_POLL_SECS,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl ClientConfig {
    /// Defaults plus `.env` / environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = ClientConfig::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Applies `CRS_*` overrides, loading `.env` first if present.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        dotenv::dotenv().ok();

        if let Ok(url) = std::env::var("CRS_API_URL") {
            self.base_url = url;
        }
        if let Ok(raw) = std::env::var("CRS_TIMEOUT_SECS") {
            let secs = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "CRS_TIMEOUT_SECS",
                value: raw.clone(),
            })?;
            self.timeout_secs = Some(secs);
        }
        if let Ok(level) = std::env::var("CRS_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Ok(path) = std::env::var("CRS_LOG_FILE") {
            self.log_file = Some(path);
        }

        self.normalize()
    }

    pub fn log_level(&self) -> LogLevel {
        LogLevel::parse(&self.log_level).unwrap_or(LogLevel::Info)
    }

    fn normalize(&mut self) -> Result<(), ConfigError> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "base_url",
                value: self.base_url.clone(),
            });
        }
        self.base_url = trimmed.to_string();

        if !(1..=MAX_HEALTH_POLL_SECS).contains(&self.health_poll_secs) {
            return Err(ConfigError::InvalidValue {
                key: "health_poll_secs",
                value: self.health_poll_secs.to_string(),
            });
        }

        if LogLevel::parse(&self.log_level).is_none() {
            return Err(ConfigError::InvalidValue {
                key: "log_level",
                value: self.log_level.clone(),
            });
        }
        Ok(())
    }
}

/// Parses a config document. Missing keys take their defaults.
pub fn parse_config(text: &str, origin: &str) -> Result<ClientConfig, ConfigError> {
    let mut config: ClientConfig = toml::from_str(text).map_err(|source| ConfigError::Toml {
        path: origin.to_string(),
        source,
    })?;
    config.normalize()?;
    Ok(config)
}

/// Loads a TOML config file, then applies environment overrides.
pub fn load_config(path: impl AsRef<Path>) -> Result<ClientConfig, ConfigError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: display.clone(),
        source,
    })?;
    let mut config = parse_config(&text, &display)?;
    config.apply_env()?;
    Ok(config)
}
