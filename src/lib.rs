//! # Structured Log Facade
//!
//! A structured logging facade over pluggable transports with syslog severity
//! levels, per-call metadata and error reporting to an error tracker.
//!
//! ## Features
//!
//! - **Syslog Levels**: `emerg` through `debug`, one method per level
//! - **Structured Metadata**: default meta merged with per-call meta
//! - **Error Reporting**: errors are forwarded to Sentry with tags, extra and fingerprint
//! - **Pluggable Transports**: console, file and in-memory, resolved by kind name
//! - **Request Logging**: middleware over `http` requests and responses
//!
//! ## Example
//!
//! ```
//! use structured_log_facade::prelude::*;
//!
//! let memory = MemoryTransport::new();
//! let log = Log::builder()
//!     .transport_instance(memory.clone())
//!     .meta(Meta::new().with_field("service", "billing"))
//!     .build()
//!     .unwrap();
//!
//! log.info("invoice sent", Meta::new().with_field("invoice", 42)).unwrap();
//!
//! let io_error = std::io::Error::new(std::io::ErrorKind::Other, "smtp down");
//! log.error("invoice failed", (Meta::new().with_field("invoice", 43), &io_error))
//!     .unwrap();
//!
//! assert_eq!(memory.len(), 2);
//! ```

pub mod core;
pub mod macros;
pub mod middleware;
pub mod transports;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::transports::ConsoleTransport;
    #[cfg(feature = "file")]
    pub use crate::transports::FileTransport;
    pub use crate::core::{
        Defaults, ErrorDetails, ErrorLike, ErrorReport, ErrorReporter, Log, LogBuilder,
        LogConfig, LogEntry, LogLevel, LogPayload, LogRecord, LoggerError, Meta, OutputFormat,
        RecordOptions, Result, SentryConfig, TimestampFormat, Transport, TransportDescriptor,
        TransportRegistry,
    };
    pub use crate::middleware::{MiddlewareConfig, RequestLogger};
    pub use crate::transports::MemoryTransport;
}

#[cfg(feature = "sentry")]
pub use crate::core::SentryReporter;
pub use crate::core::{
    Defaults, DisabledReporter, ErrorDetails, ErrorLike, ErrorReport, ErrorReporter, Log,
    LogBuilder, LogConfig, LogEntry, LogLevel, LogPayload, LogRecord, LoggerError, Meta,
    OutputFormat, Partitioner, RecordOptions, Result, SentryConfig, SentryOptions,
    TimestampFormat, Transport, TransportDescriptor, TransportRegistry, TransportSet,
};
pub use middleware::{MiddlewareConfig, RequestLogger};
#[cfg(feature = "console")]
pub use transports::ConsoleTransport;
#[cfg(feature = "file")]
pub use transports::FileTransport;
pub use transports::MemoryTransport;
