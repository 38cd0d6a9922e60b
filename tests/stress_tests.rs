//! Stress tests for concurrent logging
//!
//! These tests verify:
//! - Many threads logging at once produce whole, uncorrupted lines
//! - Shared caches end up with one entry per observed function
//! - Debug toggling from another thread never tears a line

use lwlog::prelude::*;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

const THREADS: usize = 8;
const CALLS_PER_THREAD: usize = 200;

#[inline(never)]
fn emit(logger: &StdLogger, thread_index: usize, call: usize) {
    lwlog::info!(logger, "thread={} call={} payload={}", thread_index, call, "x".repeat(64));
}

#[inline(never)]
fn emit_error(logger: &StdLogger, thread_index: usize, call: usize) {
    lwlog::error!(logger, "thread={} call={} failed", thread_index, call);
}

fn assert_well_formed(line: &str) {
    assert!(line.contains(" [info ] ") || line.contains(" [error] "), "bad severity: {}", line);
    assert!(line.contains("stress_tests/emit"), "bad call site: {}", line);
    assert_eq!(line.matches("thread=").count(), 1, "interleaved line: {}", line);
}

#[test]
fn test_concurrent_lines_are_whole() {
    let out = MemoryAppender::new();
    let classifier = Arc::new(FunctionClassifier::new());
    let logger = Arc::new(
        StdLogger::builder()
            .output(Destination::new(out.clone()))
            .classifier(Arc::clone(&classifier))
            .build(),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|thread_index| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for call in 0..CALLS_PER_THREAD {
                    emit(&logger, thread_index, call);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    let lines = out.lines();
    assert_eq!(lines.len(), THREADS * CALLS_PER_THREAD);
    for line in &lines {
        assert_well_formed(line);
    }

    // Every (thread, call) pair appears exactly once.
    let seen: HashSet<&str> = lines
        .iter()
        .map(|line| line.split(": thread=").nth(1).expect("message"))
        .collect();
    assert_eq!(seen.len(), THREADS * CALLS_PER_THREAD);

    // Every line came from `emit`, so only `emit` was ever described.
    assert_eq!(logger.resolver().cached_sites(), 1);
    assert!(!classifier.is_empty());
    assert_eq!(logger.metrics().lines_written(), (THREADS * CALLS_PER_THREAD) as u64);
}

#[test]
fn test_concurrent_mixed_severities_share_destination() {
    let buffer = MemoryAppender::new();
    let destination = Destination::new(buffer.clone());
    let classifier = Arc::new(FunctionClassifier::new());
    let logger = Arc::new(
        StdLogger::builder()
            .output(destination.clone())
            .error_output(destination)
            .classifier(Arc::clone(&classifier))
            .build(),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|thread_index| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for call in 0..CALLS_PER_THREAD {
                    if call % 2 == 0 {
                        emit(&logger, thread_index, call);
                    } else {
                        emit_error(&logger, thread_index, call);
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    let lines = buffer.lines();
    assert_eq!(lines.len(), THREADS * CALLS_PER_THREAD);
    for line in &lines {
        assert_well_formed(line);
    }
    assert_eq!(
        lines.iter().filter(|line| line.contains(" [error] ")).count(),
        THREADS * CALLS_PER_THREAD / 2
    );

    // `emit` and `emit_error` are the only described functions.
    assert_eq!(logger.resolver().cached_sites(), 2);
    assert!(!classifier.is_empty());
}

#[test]
fn test_debug_toggle_under_load() {
    let out = MemoryAppender::new();
    let logger = Arc::new(StdLogger::builder().output(Destination::new(out.clone())).build());
    let stop = Arc::new(AtomicBool::new(false));

    let toggler = {
        let logger = Arc::clone(&logger);
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            let mut enabled = false;
            while !stop.load(Ordering::Relaxed) {
                enabled = !enabled;
                logger.set_debug(enabled);
                thread::yield_now();
            }
        })
    };

    let writers: Vec<_> = (0..4)
        .map(|thread_index| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for call in 0..CALLS_PER_THREAD {
                    lwlog::debug!(logger, "thread={} call={}", thread_index, call);
                }
            })
        })
        .collect();
    for writer in writers {
        writer.join().expect("logging thread panicked");
    }
    stop.store(true, Ordering::Relaxed);
    toggler.join().expect("toggler panicked");

    let written = out.lines();
    let suppressed = logger.metrics().debug_suppressed() as usize;
    assert_eq!(written.len() + suppressed, 4 * CALLS_PER_THREAD);
    for line in &written {
        assert!(line.contains(" [debug] "));
        assert_eq!(line.matches("thread=").count(), 1);
    }
}
