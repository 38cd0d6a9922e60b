//! Call-site attribution tests
//!
//! These tests verify:
//! - Lines name the function, file and line that called the logger
//! - Wrappers named like logging entry points are skipped
//! - Helpers with ordinary names are reported as the caller
//! - A logging call whose caller's frame was optimized away keeps the
//!   caller's file and line and never names the wrong function
//! - Wrapping deeper than the capture window degrades without panicking
//! - Cached and uncached resolutions agree

use lwlog::prelude::*;
use std::fmt;
use std::sync::Arc;

struct Harness {
    logger: StdLogger,
    out: MemoryAppender,
    err: MemoryAppender,
    classifier: Arc<FunctionClassifier>,
}

fn harness() -> Harness {
    let out = MemoryAppender::new();
    let err = MemoryAppender::new();
    let classifier = Arc::new(FunctionClassifier::new());
    let logger = StdLogger::builder()
        .output(Destination::new(out.clone()))
        .error_output(Destination::new(err.clone()))
        .classifier(Arc::clone(&classifier))
        .debug(true)
        .build();
    Harness {
        logger,
        out,
        err,
        classifier,
    }
}

/// The `function:(file:line)` part of a rendered line.
fn call_site_of(line: &str) -> &str {
    let start = line.find("] ").map(|pos| pos + 2).unwrap_or(0);
    let end = line.find("): ").map(|pos| pos + 1).unwrap_or(line.len());
    &line[start..end]
}

fn expected(function: &str, line: u32) -> String {
    format!("call_site_tests/{}:(call_site_tests.rs:{})", function, line)
}

/// A user logger that prefixes messages and forwards to another logger.
struct Tagged<'a> {
    tag: &'static str,
    inner: &'a dyn Logger,
}

impl Logger for Tagged<'_> {
    fn debug(&self, args: fmt::Arguments<'_>) {
        self.inner.debug(format_args!("[{}] {}", self.tag, args));
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        self.inner.info(format_args!("[{}] {}", self.tag, args));
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        self.inner.error(format_args!("[{}] {}", self.tag, args));
    }
}

mod wrap_a {
    #[inline(never)]
    pub fn info(logger: &dyn lwlog::Logger, message: &str) {
        lwlog::info!(logger, "{}", message);
    }
}

// Each wrapper does a little work after the call so its frame is not replaced
// by a tail call.
mod wrap_b {
    #[inline(never)]
    pub fn info(logger: &dyn lwlog::Logger, message: &str) {
        super::wrap_a::info(logger, message);
        std::hint::black_box(message);
    }
}

mod wrap_c {
    #[inline(never)]
    pub fn info(logger: &dyn lwlog::Logger, message: &str) {
        super::wrap_b::info(logger, message);
        std::hint::black_box(message);
    }
}

mod wrap_d {
    #[inline(never)]
    pub fn info(logger: &dyn lwlog::Logger, message: &str) {
        super::wrap_c::info(logger, message);
        std::hint::black_box(message);
    }
}

#[inline(never)]
fn plain_helper(logger: &StdLogger) -> u32 {
    let line = line!() + 1;
    lwlog::info!(logger, "from helper");
    line
}

/// Direct method call as the last statement: optimized builds may turn it
/// into a tail call that removes this function's frame.
#[inline(never)]
fn tail_helper(logger: &StdLogger) -> u32 {
    let line = line!() + 1;
    logger.info(format_args!("from tail helper"));
    line
}

#[inline(never)]
fn log_twice(logger: &StdLogger) -> (u32, u32) {
    let first = line!() + 1;
    lwlog::info!(logger, "first");
    let second = line!() + 1;
    lwlog::info!(logger, "second");
    (first, second)
}

#[test]
fn test_direct_call_is_attributed_to_caller() {
    let h = harness();
    let line = line!() + 1;
    h.logger.info(format_args!("direct"));

    let lines = h.out.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(
        call_site_of(&lines[0]),
        expected("test_direct_call_is_attributed_to_caller", line)
    );
}

#[test]
fn test_every_severity_is_attributed_to_caller() {
    let h = harness();
    let debug_line = line!() + 1;
    lwlog::debug!(h.logger, "d");
    let info_line = line!() + 1;
    lwlog::info!(h.logger, "i");
    let error_line = line!() + 1;
    lwlog::error!(h.logger, "e");

    let out = h.out.lines();
    let err = h.err.lines();
    let name = "test_every_severity_is_attributed_to_caller";
    assert_eq!(call_site_of(&out[0]), expected(name, debug_line));
    assert_eq!(call_site_of(&out[1]), expected(name, info_line));
    assert_eq!(call_site_of(&err[0]), expected(name, error_line));
}

#[test]
fn test_trait_wrapper_is_skipped() {
    let h = harness();
    let tagged = Tagged {
        tag: "db",
        inner: &h.logger,
    };
    let line = line!() + 1;
    tagged.error(format_args!("pool exhausted"));

    let err = h.err.lines();
    assert_eq!(err.len(), 1);
    assert_eq!(call_site_of(&err[0]), expected("test_trait_wrapper_is_skipped", line));
    assert!(err[0].ends_with("[db] pool exhausted"));
}

#[test]
fn test_trait_object_call_is_attributed_to_caller() {
    let h = harness();
    let logger: &dyn Logger = &h.logger;
    let line = line!() + 1;
    logger.info(format_args!("through dyn"));

    let out = h.out.lines();
    assert_eq!(
        call_site_of(&out[0]),
        expected("test_trait_object_call_is_attributed_to_caller", line)
    );
}

#[test]
fn test_named_wrappers_are_skipped() {
    let h = harness();
    let line = line!() + 1;
    wrap_b::info(&h.logger, "two deep");

    let out = h.out.lines();
    assert_eq!(call_site_of(&out[0]), expected("test_named_wrappers_are_skipped", line));
}

#[test]
fn test_three_wrappers_fit_the_window() {
    let h = harness();
    let line = line!() + 1;
    wrap_c::info(&h.logger, "three deep");

    let out = h.out.lines();
    assert_eq!(call_site_of(&out[0]), expected("test_three_wrappers_fit_the_window", line));
}

#[test]
fn test_wrapping_past_capture_depth_degrades() {
    let h = harness();
    wrap_d::info(&h.logger, "four deep");

    // Four wrappers fill the window above the entry point, so the outermost
    // captured wrapper is reported.
    let out = h.out.lines();
    assert_eq!(out.len(), 1);
    let site = call_site_of(&out[0]);
    assert!(site.starts_with("wrap_d/info:(call_site_tests.rs:"), "got {}", site);
    assert!(out[0].ends_with("four deep"));
}

#[test]
fn test_plain_helper_is_reported() {
    let h = harness();
    let line = plain_helper(&h.logger);

    let out = h.out.lines();
    assert_eq!(call_site_of(&out[0]), expected("plain_helper", line));
}

#[test]
fn test_tail_call_keeps_helper_location() {
    let h = harness();
    let line = tail_helper(&h.logger);

    // The helper's frame may be gone; its caller must never be named.
    let out = h.out.lines();
    let site = call_site_of(&out[0]);
    let location = format!(":(call_site_tests.rs:{})", line);
    assert!(
        site == expected("tail_helper", line) || site == location,
        "got {}",
        site
    );
}

#[cfg(debug_assertions)]
#[test]
fn test_unoptimized_tail_helper_is_named() {
    let h = harness();
    let line = tail_helper(&h.logger);

    let out = h.out.lines();
    assert_eq!(call_site_of(&out[0]), expected("tail_helper", line));
}

#[test]
fn test_repeated_calls_reuse_cache() {
    let h = harness();
    let (first, second) = log_twice(&h.logger);
    let (again, _) = log_twice(&h.logger);

    let out = h.out.lines();
    assert_eq!(out.len(), 4);
    assert_eq!(call_site_of(&out[0]), expected("log_twice", first));
    assert_eq!(call_site_of(&out[1]), expected("log_twice", second));
    assert_eq!(call_site_of(&out[2]), expected("log_twice", again));
    assert_eq!(h.logger.resolver().cached_sites(), 1);
}

#[test]
fn test_cold_and_warm_resolution_agree() {
    let h = harness();
    plain_helper(&h.logger);
    assert_eq!(h.logger.resolver().cached_sites(), 1);
    plain_helper(&h.logger);

    let out = h.out.lines();
    assert_eq!(call_site_of(&out[0]), call_site_of(&out[1]));
    assert_eq!(h.logger.resolver().cached_sites(), 1);
}

#[test]
fn test_wrappers_are_not_described() {
    let h = harness();
    wrap_c::info(&h.logger, "three deep");
    wrap_c::info(&h.logger, "again");

    // Only the function the lines are attributed to gets display strings.
    assert_eq!(h.logger.resolver().cached_sites(), 1);
    assert!(!h.classifier.is_empty());
}

#[test]
fn test_resolver_reports_its_direct_caller() {
    let resolver = CallSiteResolver::with_classifier(Arc::new(FunctionClassifier::new()));
    let line = line!() + 1;
    let site = resolver.resolve(1);

    assert_eq!(
        site.to_string(),
        expected("test_resolver_reports_its_direct_caller", line)
    );
}
