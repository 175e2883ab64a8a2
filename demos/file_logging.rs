//! File logging example
//!
//! Demonstrates a JSON configuration document with console and file transports,
//! and factory defaults shared by several loggers.
//!
//! Run with: cargo run --example file_logging

use structured_log_facade::prelude::*;

const CONFIG: &str = r#"{
    "transports": [
        { "Console": { "level": "info" } },
        { "File": { "filename": "application.log", "json": true, "level": "debug" } }
    ],
    "meta": { "service": "file-demo" },
    "level": "debug"
}"#;

fn main() -> Result<()> {
    println!("=== Structured Log Facade - File Logging Example ===\n");

    let log = Log::new(LogConfig::from_json(CONFIG)?)?;

    println!("1. Logging to both console and file:");
    log.info("Application started", ())?;
    log.debug("Loading configuration...", ())?;
    log.notice("Configuration loaded", Meta::new().with_field("sources", 2))?;
    log.warning("Using default settings for some options", ())?;

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        log.info(format!("Processing item {}/5", i), Meta::new().with_field("item", i))?;
    }

    println!("\n3. Factory defaults:");
    let mut defaults = Defaults::new()
        .with_transport(TransportDescriptor::new("Console", Meta::new()))
        .with_meta(Meta::new().with_field("team", "platform"));

    let worker = Log::with_defaults(LogConfig::new(), &mut defaults)?;
    worker.info("Worker uses the default console transport", ())?;

    // The default transports were handed to the first logger
    match Log::with_defaults(LogConfig::new(), &mut defaults) {
        Ok(_) => println!("   unexpected: defaults reused"),
        Err(e) => println!("   second logger rejected: {}", e),
    }

    log.flush()?;
    println!("\nCheck 'application.log' for the JSON output");
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
