//! Transport implementations

#[cfg(feature = "console")]
pub mod console;
#[cfg(feature = "file")]
pub mod file;
pub mod memory;

#[cfg(feature = "console")]
pub use console::ConsoleTransport;
#[cfg(feature = "file")]
pub use file::FileTransport;
pub use memory::MemoryTransport;

pub use crate::core::Transport;

use crate::core::{LogLevel, LoggerError, Meta, Result, TimestampFormat};

/// Read the optional `level` option of a transport.
pub(crate) fn level_option(transport: &str, options: &Meta) -> Result<Option<LogLevel>> {
    match options.get("level") {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(level)) => level
            .parse::<LogLevel>()
            .map(Some)
            .map_err(|e| LoggerError::config(transport, e)),
        Some(other) => Err(LoggerError::config(
            transport,
            format!("level must be a string, got {}", other),
        )),
    }
}

/// Read the optional `timestampFormat` option of a transport.
pub(crate) fn timestamp_option(options: &Meta) -> TimestampFormat {
    options
        .get_str("timestampFormat")
        .map(TimestampFormat::parse)
        .unwrap_or_default()
}
