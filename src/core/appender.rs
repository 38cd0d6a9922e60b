//! Appender trait for log output destinations

use super::error::Result;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// A sink for complete, newline-terminated log lines.
pub trait Appender: Send {
    /// Write one complete line. Implementations issue a single write.
    fn append(&mut self, line: &[u8]) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

/// Shared handle to an appender.
///
/// Clones refer to the same appender, so one destination can serve both the
/// output and error streams of a logger. Every line is written while holding
/// the destination's lock, so concurrent lines never interleave.
#[derive(Clone)]
pub struct Destination {
    appender: Arc<Mutex<Box<dyn Appender>>>,
}

impl Destination {
    pub fn new(appender: impl Appender + 'static) -> Self {
        Self::from_boxed(Box::new(appender))
    }

    pub fn from_boxed(appender: Box<dyn Appender>) -> Self {
        Self {
            appender: Arc::new(Mutex::new(appender)),
        }
    }

    pub fn stdout() -> Self {
        Self::new(crate::appenders::ConsoleAppender::stdout())
    }

    pub fn stderr() -> Self {
        Self::new(crate::appenders::ConsoleAppender::stderr())
    }

    pub fn write_line(&self, line: &[u8]) -> Result<()> {
        self.appender.lock().append(line)
    }

    pub fn flush(&self) -> Result<()> {
        self.appender.lock().flush()
    }

    pub fn name(&self) -> String {
        self.appender.lock().name().to_string()
    }

    /// Whether two handles refer to the same appender.
    pub fn same_as(&self, other: &Destination) -> bool {
        Arc::ptr_eq(&self.appender, &other.appender)
    }
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Destination")
            .field("appender", &self.name())
            .finish()
    }
}
