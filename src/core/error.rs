//! Error types for logger construction and destinations
//!
//! Logging calls themselves never fail; these errors surface only while a
//! logger or one of its destinations is being set up.

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON configuration error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Timestamp format string chrono cannot render
    #[error("Invalid timestamp format '{format}': {message}")]
    InvalidTimestampFormat { format: String, message: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// File destination error with path
    #[error("File appender error for '{path}': {message}")]
    FileAppenderError { path: String, message: String },
}

impl LoggerError {
    /// Create an invalid timestamp format error
    pub fn timestamp_format(format: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidTimestampFormat {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a file appender error
    pub fn file_appender(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileAppenderError {
            path: path.into(),
            message: message.into(),
        }
    }
}
