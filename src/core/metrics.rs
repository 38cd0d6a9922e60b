//! Logger metrics
//!
//! Write failures are never reported to the code that logged; they are
//! counted here instead so an operator can still notice a broken destination.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters describing what a logger has done with its lines
///
/// # Example
///
/// ```
/// use lwlog::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_written();
/// metrics.record_write_failure();
///
/// assert_eq!(metrics.lines_written(), 1);
/// assert_eq!(metrics.write_failures(), 1);
/// ```
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Lines handed to a destination successfully
    lines_written: AtomicU64,

    /// Lines whose write returned an error and were discarded
    write_failures: AtomicU64,

    /// Debug calls dropped because debug output was off
    debug_suppressed: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            lines_written: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            debug_suppressed: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn lines_written(&self) -> u64 {
        self.lines_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn debug_suppressed(&self) -> u64 {
        self.debug_suppressed.load(Ordering::Relaxed)
    }

    /// Record a line written; returns the previous count
    #[inline]
    pub fn record_written(&self) -> u64 {
        self.lines_written.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a discarded write error; returns the previous count
    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_debug_suppressed(&self) -> u64 {
        self.debug_suppressed.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of attempted writes that failed, as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been written yet.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.write_failures() as f64;
        let total = failed + self.lines_written() as f64;
        if total == 0.0 {
            0.0
        } else {
            failed / total * 100.0
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.lines_written.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
        self.debug_suppressed.store(0, Ordering::Relaxed);
    }
}
