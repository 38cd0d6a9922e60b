//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod error;
pub mod line;
pub mod logger;
pub mod metrics;
pub mod severity;
pub mod std_logger;
pub mod timestamp;

pub use appender::{Appender, Destination};
pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use line::render_line;
pub use logger::Logger;
pub use metrics::LoggerMetrics;
pub use severity::Severity;
pub use std_logger::{StdLogger, StdLoggerBuilder};
pub use timestamp::{TimestampFormat, DEFAULT_TIME_FORMAT};
