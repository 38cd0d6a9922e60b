//! # lwlog
//!
//! Lightweight logging that attributes every line to its real call site.
//!
//! ## Features
//!
//! - **Small interface**: the [`Logger`] trait has three formatted writes,
//!   `debug`, `info` and `error`
//! - **Call-site attribution**: lines name the calling function, file and
//!   line, found by walking the stack past the logger's own frames
//! - **Cached symbol processing**: display strings are computed once per
//!   function and shared across threads
//! - **Whole-line writes**: each line reaches its destination in one write,
//!   so concurrent lines never interleave
//!
//! Lines look like this:
//!
//! ```text
//! 2025-01-08T10:30:45.123456+00:00 [info ] net/Server::run:(server.rs:87): listening on 8080
//! ```

pub mod appenders;
pub mod callsite;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, MemoryAppender, WriterAppender};
    #[cfg(feature = "file")]
    pub use crate::appenders::FileAppender;
    pub use crate::callsite::{CallSite, CallSiteResolver, FunctionClassifier};
    pub use crate::core::{
        Appender, Destination, Logger, LoggerConfig, LoggerError, LoggerMetrics, Result, Severity,
        StdLogger, StdLoggerBuilder, TimestampFormat, DEFAULT_TIME_FORMAT,
    };
}

#[cfg(feature = "file")]
pub use crate::appenders::FileAppender;
pub use crate::appenders::{ConsoleAppender, MemoryAppender, WriterAppender};
pub use crate::callsite::{
    is_logging_function, is_logging_function_name, CallSite, CallSiteResolver, FunctionClassifier,
    FunctionId,
};
pub use crate::core::{
    Appender, Destination, Logger, LoggerConfig, LoggerError, LoggerMetrics, Result, Severity,
    StdLogger, StdLoggerBuilder, TimestampFormat, DEFAULT_TIME_FORMAT,
};
