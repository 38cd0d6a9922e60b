//! Timestamp formatting
//!
//! Every line starts with the local time of the call. The default is ISO 8601
//! extended form with microseconds and a numeric UTC offset, for example
//! `2025-01-08T10:30:45.123456+02:00`.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

/// strftime form of the default timestamp.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f%:z";

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use lwlog::TimestampFormat;
/// use chrono::{FixedOffset, TimeZone};
///
/// let offset = FixedOffset::east_opt(2 * 3600).unwrap();
/// let at = offset.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(
///     TimestampFormat::default().format(&at),
///     "2025-01-08T10:30:45.000000+02:00"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with microseconds and numeric offset: `2025-01-08T10:30:45.123456+00:00`
    #[default]
    Iso8601Micros,

    /// RFC 3339 format: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Custom strftime format, validated by [`TimestampFormat::custom`]
    Custom(String),
}

impl TimestampFormat {
    /// Build a custom format, rejecting strings chrono cannot render.
    ///
    /// # Examples
    ///
    /// ```
    /// use lwlog::TimestampFormat;
    ///
    /// assert!(TimestampFormat::custom("%d/%b/%Y:%H:%M:%S %z").is_ok());
    /// assert!(TimestampFormat::custom("%Q").is_err());
    /// ```
    pub fn custom(format: impl Into<String>) -> Result<Self> {
        let format = format.into();
        if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
            return Err(LoggerError::timestamp_format(
                format,
                "unsupported strftime specifier",
            ));
        }
        Ok(TimestampFormat::Custom(format))
    }

    /// Format a point in time according to this format
    #[must_use]
    pub fn format<Tz>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        match self {
            TimestampFormat::Iso8601Micros => datetime.format(DEFAULT_TIME_FORMAT).to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Custom(format_str) => {
                // Unvalidated `Custom` values render as nothing rather than panic.
                let mut rendered = String::new();
                let _ = fmt::write(&mut rendered, format_args!("{}", datetime.format(format_str)));
                rendered
            }
        }
    }

    /// Format the current local time
    #[must_use]
    pub fn now(&self) -> String {
        self.format(&Local::now())
    }

    /// Get a description of this format
    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            TimestampFormat::Iso8601Micros => {
                "ISO 8601 with microseconds and offset (2025-01-08T10:30:45.123456+00:00)"
            }
            TimestampFormat::Rfc3339 => "RFC 3339 with timezone (2025-01-08T10:30:45+00:00)",
            TimestampFormat::Custom(_) => "Custom strftime format",
        }
    }
}
