//! Logging macros for ergonomic log message formatting.
//!
//! Each macro takes a logger followed by `format!`-style arguments and calls
//! the matching [`Logger`](crate::Logger) method. The macros expand in place,
//! so the line is attributed to the function that invoked the macro. The call
//! is never left in tail position, so the invoking function keeps its stack
//! frame even in optimized builds.
//!
//! # Examples
//!
//! ```
//! use lwlog::prelude::*;
//! use lwlog::info;
//!
//! let out = MemoryAppender::new();
//! let logger = StdLogger::builder().output(Destination::new(out.clone())).build();
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! assert!(out.contents().contains("Server listening on port 8080"));
//! ```

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use lwlog::prelude::*;
/// # let logger = StdLogger::builder().output(Destination::new(MemoryAppender::new())).build();
/// use lwlog::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {{
        use $crate::Logger as _;
        let logged = $logger.debug(::std::format_args!($($arg)+));
        ::std::hint::black_box(logged)
    }};
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use lwlog::prelude::*;
/// # let logger = StdLogger::builder().output(Destination::new(MemoryAppender::new())).build();
/// use lwlog::info;
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {{
        use $crate::Logger as _;
        let logged = $logger.info(::std::format_args!($($arg)+));
        ::std::hint::black_box(logged)
    }};
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use lwlog::prelude::*;
/// # let logger = StdLogger::builder().error_output(Destination::new(MemoryAppender::new())).build();
/// use lwlog::error;
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {{
        use $crate::Logger as _;
        let logged = $logger.error(::std::format_args!($($arg)+));
        ::std::hint::black_box(logged)
    }};
}
