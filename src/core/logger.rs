//! The logging capability handed to application code

use std::fmt;

/// Anything that accepts formatted debug, info and error messages.
///
/// Implementations must never panic or report failure to the caller. The
/// method names double as the markers the call-site resolver uses to skip
/// logging frames: a wrapper that implements this trait, or any function
/// whose name ends in `debug`, `info` or `error`, is treated as part of the
/// logging facility and never reported as the caller.
///
/// # Examples
///
/// ```
/// use lwlog::{Logger, MemoryAppender, Destination, StdLogger, TimestampFormat};
///
/// let buffer = MemoryAppender::new();
/// let out = Destination::new(buffer.clone());
/// let logger = StdLogger::with_destinations(TimestampFormat::default(), out.clone(), out);
///
/// logger.info(format_args!("listening on port {}", 8080));
/// assert!(buffer.contents().contains("listening on port 8080"));
/// ```
pub trait Logger: Send + Sync {
    /// Write a debug message, if debug output is switched on.
    fn debug(&self, args: fmt::Arguments<'_>);

    /// Write an informational message.
    fn info(&self, args: fmt::Arguments<'_>);

    /// Write an error message.
    fn error(&self, args: fmt::Arguments<'_>);
}
