//! Logger configuration
//!
//! Settings that can live in a config file. Destinations are runtime objects
//! and are supplied separately when the logger is built.

use super::error::{LoggerError, Result};
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};

/// Serializable logger settings
///
/// # Examples
///
/// ```
/// use lwlog::LoggerConfig;
///
/// let config = LoggerConfig::from_json(r#"{ "debug": true }"#).unwrap();
/// assert!(config.debug);
/// assert!(config.timestamp_format.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    /// Emit debug lines
    pub debug: bool,

    /// Custom strftime format; the ISO 8601 microsecond default when absent
    pub timestamp_format: Option<String>,
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The timestamp format this configuration asks for, validated.
    pub fn timestamp_format(&self) -> Result<TimestampFormat> {
        match self.timestamp_format.as_deref() {
            None => Ok(TimestampFormat::default()),
            Some("") => Err(LoggerError::config(
                "LoggerConfig",
                "timestamp_format must not be empty",
            )),
            Some(format) => TimestampFormat::custom(format),
        }
    }
}
