//! File logging example
//!
//! Demonstrates a logger built from JSON configuration that writes every
//! severity to one file.
//!
//! Run with: cargo run --example file_logging

use lwlog::prelude::*;
use lwlog::{error, info};

fn main() -> Result<()> {
    println!("=== lwlog - File Logging Example ===\n");

    let config = LoggerConfig::from_json(r#"{ "debug": false, "timestamp_format": "%Y-%m-%d %H:%M:%S%.3f" }"#)?;
    let path = std::env::temp_dir().join("lwlog_example.log");
    let destination = Destination::new(FileAppender::new(&path)?);
    let logger = StdLogger::from_config(&config, destination.clone(), destination)?;

    for i in 0..5 {
        info!(logger, "Processing item {}", i);
    }
    error!(logger, "Item {} could not be processed", 3);
    logger.flush()?;

    println!("Wrote {} lines to {}", logger.metrics().lines_written(), path.display());
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
