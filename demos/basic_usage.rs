//! Basic logger usage example
//!
//! Demonstrates console logging at every level, default meta and errors.
//!
//! Run with: cargo run --example basic_usage

use structured_log_facade::prelude::*;
use structured_log_facade::{info, warning};

fn main() -> Result<()> {
    println!("=== Structured Log Facade - Basic Usage Example ===\n");

    let config = LogConfig::new()
        .with_transport(TransportDescriptor::new(
            "Console",
            Meta::new()
                .with_field("level", "debug")
                .with_field("colorize", true),
        ))
        .with_meta(Meta::new().with_field("service", "demo"));
    let log = Log::new(config)?;

    println!("1. Logging at every level:");
    log.emerg("This is an emergency message", ())?;
    log.alert("This is an alert message", ())?;
    log.crit("This is a critical message", ())?;
    log.error("This is an error message", ())?;
    log.warning("This is a warning message", ())?;
    log.notice("This is a notice message", ())?;
    log.info("This is an info message", ())?;
    log.debug("This is a debug message", ())?;

    println!("\n2. Logging with metadata:");
    log.info("User signed in", Meta::new().with_field("user", "alice"))?;

    println!("\n3. Logging an error:");
    let error = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml missing");
    log.error("Falling back to defaults", &error)?;
    log.error(
        "Falling back to defaults",
        (Meta::new().with_field("path", "config.toml"), &error),
    )?;

    println!("\n4. Formatting macros:");
    let port = 8080;
    info!(log, "Listening on port {}", port)?;
    warning!(log, "{} connections pending", 3)?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
