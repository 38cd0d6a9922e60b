//! Basic logger usage example
//!
//! Demonstrates the default stdout/stderr logger, the debug toggle, and how a
//! wrapper named like a logging entry point is skipped when attributing lines.
//!
//! Run with: cargo run --example basic_usage

use lwlog::prelude::*;
use lwlog::{debug, error, info};

mod audit {
    use lwlog::Logger;

    /// Application-level helper. Its name ends in `info`, so its lines are
    /// attributed to whoever called it.
    pub fn info(logger: &dyn Logger, action: &str) {
        lwlog::info!(logger, "audit: {}", action);
    }
}

fn handle_request(logger: &StdLogger, id: u32) {
    debug!(logger, "request {} received", id);
    audit::info(logger, "login");
    if id % 2 == 1 {
        error!(logger, "request {} rejected", id);
    }
}

fn main() {
    println!("=== lwlog - Basic Usage Example ===\n");

    let logger = StdLogger::new();

    println!("1. Debug output off (the default):");
    handle_request(&logger, 1);

    println!("\n2. Debug output switched on at runtime:");
    logger.set_debug(true);
    handle_request(&logger, 2);

    info!(logger, "{} distinct call sites cached", logger.resolver().cached_sites());

    println!("\n=== Example completed successfully! ===");
}
