//! Standard logger implementation
//!
//! Writes one line per call to a destination: debug and info lines to the
//! output destination, error lines to the error destination. Every line is
//! attributed to the function that called the logger.

use super::{
    appender::Destination,
    config::LoggerConfig,
    error::Result,
    line::render_line,
    logger::Logger,
    metrics::LoggerMetrics,
    severity::Severity,
    timestamp::TimestampFormat,
};
use crate::callsite::{CallSiteResolver, FunctionClassifier};
use std::fmt;
use std::panic::Location;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// `resolve_at` itself and `write_line`.
const LOG_LINE_SKIP: usize = 2;

/// Demangled-name prefix of this logger's `Logger` methods and their shims.
/// Frames carrying it are dropped before the caller window is counted.
const ENTRY_PREFIX: &str = concat!("<", module_path!(), "::StdLogger as ");

/// The standard [`Logger`].
///
/// Debug lines are off by default and can be switched at runtime with
/// [`StdLogger::set_debug`]. Write errors are counted in
/// [`StdLogger::metrics`] and otherwise discarded; logging never fails.
///
/// File and line come from the caller's `#[track_caller]` location. In an
/// optimized build, a direct method call that is the last statement of a
/// function may be compiled as a tail call that removes the function's frame;
/// such lines keep their file and line but carry no function name. The
/// [`debug!`](crate::debug), [`info!`](crate::info) and
/// [`error!`](crate::error) macros never produce that tail call.
///
/// # Examples
///
/// ```
/// use lwlog::prelude::*;
///
/// let out = MemoryAppender::new();
/// let err = MemoryAppender::new();
/// let logger = StdLogger::builder()
///     .output(Destination::new(out.clone()))
///     .error_output(Destination::new(err.clone()))
///     .debug(true)
///     .build();
///
/// lwlog::debug!(logger, "cache warmed with {} entries", 12);
/// lwlog::error!(logger, "upstream timed out");
///
/// assert!(out.contents().contains("[debug]"));
/// assert!(err.contents().contains("[error]"));
/// ```
pub struct StdLogger {
    debug: AtomicBool,
    timestamp_format: TimestampFormat,
    out: Destination,
    err: Destination,
    resolver: CallSiteResolver,
    metrics: Arc<LoggerMetrics>,
}

impl StdLogger {
    /// Logger writing debug and info lines to stdout and errors to stderr,
    /// with the default timestamp format and debug output off.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Logger with a custom timestamp format and destinations. `out` and
    /// `err` may be clones of the same destination.
    #[must_use]
    pub fn with_destinations(
        timestamp_format: TimestampFormat,
        out: Destination,
        err: Destination,
    ) -> Self {
        Self::builder()
            .timestamp_format(timestamp_format)
            .output(out)
            .error_output(err)
            .build()
    }

    /// Logger configured from [`LoggerConfig`].
    pub fn from_config(config: &LoggerConfig, out: Destination, err: Destination) -> Result<Self> {
        Ok(Self::builder()
            .timestamp_format(config.timestamp_format()?)
            .debug(config.debug)
            .output(out)
            .error_output(err)
            .build())
    }

    #[must_use]
    pub fn builder() -> StdLoggerBuilder {
        StdLoggerBuilder::new()
    }

    pub fn set_debug(&self, enabled: bool) {
        self.debug.store(enabled, Ordering::Relaxed);
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug.load(Ordering::Relaxed)
    }

    pub fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }

    pub fn resolver(&self) -> &CallSiteResolver {
        &self.resolver
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Flush both destinations.
    pub fn flush(&self) -> Result<()> {
        self.out.flush()?;
        if !self.err.same_as(&self.out) {
            self.err.flush()?;
        }
        Ok(())
    }

    #[inline(never)]
    fn write_line(
        &self,
        destination: &Destination,
        severity: Severity,
        caller: Option<&'static Location<'static>>,
        args: fmt::Arguments<'_>,
    ) {
        let site = self.resolver.resolve_at(LOG_LINE_SKIP, caller);
        let line = render_line(&self.timestamp_format.now(), severity, &site, args);

        // Write errors are observed and dropped: logging must not fail the caller.
        match destination.write_line(&line) {
            Ok(()) => {
                self.metrics.record_written();
            }
            Err(_) => {
                self.metrics.record_write_failure();
            }
        }
    }
}

impl Default for StdLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StdLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdLogger")
            .field("debug", &self.debug_enabled())
            .field("timestamp_format", &self.timestamp_format)
            .field("out", &self.out)
            .field("err", &self.err)
            .finish_non_exhaustive()
    }
}

/// Where the entry point was called from.
///
/// Calls through `dyn Logger` report the method's own definition instead of
/// the caller; those are discarded.
#[track_caller]
fn direct_caller() -> Option<&'static Location<'static>> {
    let location = Location::caller();
    (location.file() != file!()).then_some(location)
}

impl Logger for StdLogger {
    #[track_caller]
    #[inline(never)]
    fn debug(&self, args: fmt::Arguments<'_>) {
        if !self.debug_enabled() {
            self.metrics.record_debug_suppressed();
            return;
        }
        self.write_line(&self.out, Severity::Debug, direct_caller(), args);
    }

    #[track_caller]
    #[inline(never)]
    fn info(&self, args: fmt::Arguments<'_>) {
        self.write_line(&self.out, Severity::Info, direct_caller(), args);
    }

    #[track_caller]
    #[inline(never)]
    fn error(&self, args: fmt::Arguments<'_>) {
        self.write_line(&self.err, Severity::Error, direct_caller(), args);
    }
}

/// Builder for [`StdLogger`]
///
/// Unset destinations default to stdout and stderr; an unset classifier
/// defaults to the process-wide one.
#[derive(Default)]
pub struct StdLoggerBuilder {
    debug: bool,
    timestamp_format: TimestampFormat,
    out: Option<Destination>,
    err: Option<Destination>,
    classifier: Option<Arc<FunctionClassifier>>,
    metrics: Option<Arc<LoggerMetrics>>,
}

impl StdLoggerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    #[must_use]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Destination for debug and info lines
    #[must_use]
    pub fn output(mut self, destination: Destination) -> Self {
        self.out = Some(destination);
        self
    }

    /// Destination for error lines
    #[must_use]
    pub fn error_output(mut self, destination: Destination) -> Self {
        self.err = Some(destination);
        self
    }

    /// Use a specific classifier instead of the process-wide one
    #[must_use]
    pub fn classifier(mut self, classifier: Arc<FunctionClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Share a metrics instance with other components
    #[must_use]
    pub fn metrics(mut self, metrics: Arc<LoggerMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    #[must_use]
    pub fn build(self) -> StdLogger {
        let resolver = match self.classifier {
            Some(classifier) => CallSiteResolver::with_classifier(classifier),
            None => CallSiteResolver::new(),
        }
        .with_entry_prefix(ENTRY_PREFIX);

        StdLogger {
            debug: AtomicBool::new(self.debug),
            timestamp_format: self.timestamp_format,
            out: self.out.unwrap_or_else(Destination::stdout),
            err: self.err.unwrap_or_else(Destination::stderr),
            resolver,
            metrics: self.metrics.unwrap_or_default(),
        }
    }
}
