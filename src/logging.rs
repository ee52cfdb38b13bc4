//! Structured logging for the crop recommendation client.
//!
//! Every line is tagged with the service endpoint it concerns and, where
//! there is one, the farm or crop identifier. Output goes through the `log`
//! facade; `init_logger` installs an `env_logger` backend writing either to
//! stderr or to an append-only file.

use chrono::Utc;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;

use crate::model::CrsError;

const LOG_TARGET: &str = "crs_client";

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// Parses the level names accepted in config files and `CRS_LOG_LEVEL`.
    pub fn parse(name: &str) -> Option<LogLevel> {
        match name.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warning),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    fn as_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

// ---------------------------------------------------------------------------
// Endpoint tags
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Predict,
    Feedback,
    Health,
    Farms,
    Auxiliary,
    Chat,
    System,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Predict => write!(f, "PREDICT"),
            Endpoint::Feedback => write!(f, "FEEDBACK"),
            Endpoint::Health => write!(f, "HEALTH"),
            Endpoint::Farms => write!(f, "FARMS"),
            Endpoint::Auxiliary => write!(f, "AUX"),
            Endpoint::Chat => write!(f, "CHAT"),
            Endpoint::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Failure Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureType {
    /// Expected failure - the user or the service rejected the input
    Expected,
    /// Unexpected failure - service outage, transport problem or contract drift
    Unexpected,
    /// Unknown - cannot determine if this is expected or not
    Unknown,
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureType::Expected => write!(f, "EXPECTED"),
            FailureType::Unexpected => write!(f, "UNEXPECTED"),
            FailureType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Classify a client error by who is likely at fault.
pub fn classify_failure(err: &CrsError) -> FailureType {
    match err {
        CrsError::Validation { .. } => FailureType::Expected,
        CrsError::Network(_) | CrsError::Parse(_) => FailureType::Unexpected,
        CrsError::Service { status, .. } if *status >= 500 => FailureType::Unexpected,
        CrsError::Service { status, .. } if (400..500).contains(status) => FailureType::Expected,
        CrsError::Service { .. } => FailureType::Unknown,
    }
}

// ---------------------------------------------------------------------------
// Logger setup
// ---------------------------------------------------------------------------

/// Install the global logger.
///
/// `RUST_LOG` still applies on top of `min_level`. Calling this more than
/// once keeps the first logger.
pub fn init_logger(
    min_level: LogLevel,
    log_file: Option<&str>,
    console_timestamps: bool,
) -> std::io::Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(min_level.as_filter());
    builder.parse_default_env();

    let to_file = log_file.is_some();
    builder.format(move |buf, record| {
        if console_timestamps || to_file {
            writeln!(
                buf,
                "{} {} {}",
                Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
                record.level(),
                record.args()
            )
        } else {
            match record.level() {
                log::Level::Error => writeln!(buf, "   ✗ {}", record.args()),
                log::Level::Warn => writeln!(buf, "   ⚠ {}", record.args()),
                _ => writeln!(buf, "   {}", record.args()),
            }
        }
    });

    if let Some(path) = log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    // Already initialised: keep the existing logger.
    let _ = builder.try_init();
    Ok(())
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

fn format_entry(endpoint: Endpoint, id: Option<&str>, message: &str) -> String {
    let id_part = id.map(|s| format!(" [{}]", s)).unwrap_or_default();
    format!("{}{}: {}", endpoint, id_part, message)
}

/// Log a general informational message
pub fn info(endpoint: Endpoint, id: Option<&str>, message: &str) {
    log::info!(target: LOG_TARGET, "{}", format_entry(endpoint, id, message));
}

/// Log a warning message
pub fn warn(endpoint: Endpoint, id: Option<&str>, message: &str) {
    log::warn!(target: LOG_TARGET, "{}", format_entry(endpoint, id, message));
}

/// Log an error message
pub fn error(endpoint: Endpoint, id: Option<&str>, message: &str) {
    log::error!(target: LOG_TARGET, "{}", format_entry(endpoint, id, message));
}

/// Log a debug message
pub fn debug(endpoint: Endpoint, id: Option<&str>, message: &str) {
    log::debug!(target: LOG_TARGET, "{}", format_entry(endpoint, id, message));
}

// ---------------------------------------------------------------------------
// Structured Failure Logging
// ---------------------------------------------------------------------------

/// Log a request failure at a level matching its classification.
pub fn log_request_failure(endpoint: Endpoint, id: Option<&str>, operation: &str, err: &CrsError) {
    let failure_type = classify_failure(err);
    let message = format!("{} failed [{}]: {}", operation, failure_type, err);

    match failure_type {
        FailureType::Expected => debug(endpoint, id, &message),
        FailureType::Unexpected => error(endpoint, id, &message),
        FailureType::Unknown => warn(endpoint, id, &message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
    }

    #[test]
    fn test_log_level_parse_accepts_config_spellings() {
        assert_eq!(LogLevel::parse("INFO"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("warn"), Some(LogLevel::Warning));
        assert_eq!(LogLevel::parse(" warning "), Some(LogLevel::Warning));
        assert_eq!(LogLevel::parse("trace"), None);
    }

    #[test]
    fn test_failure_classification() {
        let validation = CrsError::Validation {
            field: "ph",
            reason: "is required".to_string(),
        };
        assert_eq!(classify_failure(&validation), FailureType::Expected);

        let rejected = CrsError::Service {
            status: 422,
            message: "ph out of range".to_string(),
        };
        assert_eq!(classify_failure(&rejected), FailureType::Expected);

        let outage = CrsError::Service {
            status: 503,
            message: "model not loaded".to_string(),
        };
        assert_eq!(classify_failure(&outage), FailureType::Unexpected);

        let redirect = CrsError::Service {
            status: 304,
            message: "HTTP error: 304".to_string(),
        };
        assert_eq!(classify_failure(&redirect), FailureType::Unknown);

        let refused = CrsError::Network("connection refused".to_string());
        assert_eq!(classify_failure(&refused), FailureType::Unexpected);
    }

    #[test]
    fn test_entry_format_includes_endpoint_and_id() {
        assert_eq!(
            format_entry(Endpoint::Feedback, Some("farm_1"), "sent"),
            "FEEDBACK [farm_1]: sent"
        );
        assert_eq!(format_entry(Endpoint::Health, None, "up"), "HEALTH: up");
    }
}
