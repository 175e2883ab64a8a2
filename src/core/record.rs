//! Per-call log record builder
//!
//! A `LogRecord` accumulates metadata and error fields for exactly one logging
//! call. Emission consumes the record, so a record cannot be emitted twice.
//!
//! # Example
//!
//! ```
//! use structured_log_facade::prelude::*;
//!
//! let memory = MemoryTransport::new().with_level(LogLevel::Debug);
//! let log = Log::builder()
//!     .transport_instance(memory.clone())
//!     .build()
//!     .unwrap();
//!
//! let mut record = log.record();
//! record.add_meta(&Meta::new().with_field("user_id", 12345));
//! record.add_meta(&Meta::new().with_field("latency_ms", 42.5));
//! record.info("Request processed").unwrap();
//!
//! assert_eq!(memory.records()[0].meta.get("user_id"), Some(&serde_json::json!(12345)));
//! ```

use super::config::RecordOptions;
use super::error::Result;
use super::log_entry::LogEntry;
use super::log_level::LogLevel;
use super::metadata::Meta;
use super::payload::{ErrorDetails, ErrorLike};
use super::transport::TransportSet;

/// Entry meta key carrying the error message
pub const ERR_MSG_KEY: &str = "errMsg";
/// Entry meta key carrying the error stack
pub const ERR_STACK_KEY: &str = "errStack";

pub struct LogRecord<'a> {
    transports: &'a TransportSet,
    options: &'a RecordOptions,
    meta: Meta,
    error: Option<ErrorDetails>,
}

impl<'a> LogRecord<'a> {
    /// Start a record seeded with the logger's default metadata
    pub fn new(transports: &'a TransportSet, default_meta: &Meta, options: &'a RecordOptions) -> Self {
        Self {
            transports,
            options,
            meta: default_meta.clone(),
            error: None,
        }
    }

    /// Merge fields into the record; later keys override earlier ones.
    pub fn add_meta(&mut self, meta: &Meta) -> &mut Self {
        self.meta.merge(meta);
        self
    }

    /// Attach an error. A value without a stack simply leaves `errStack` out.
    pub fn add_error<E: ErrorLike + ?Sized>(&mut self, error: &E) -> &mut Self {
        self.error = Some(ErrorDetails::capture(error));
        self
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    pub fn error_details(&self) -> Option<&ErrorDetails> {
        self.error.as_ref()
    }

    /// Freeze the record into an entry without writing it
    pub fn into_entry(self, level: LogLevel, message: impl Into<String>) -> LogEntry {
        let mut meta = self.meta;
        if let Some(error) = self.error {
            meta.add_field(ERR_MSG_KEY, error.message);
            if let Some(stack) = error.stack.filter(|_| !self.options.err_no_stack()) {
                meta.add_field(ERR_STACK_KEY, stack);
            }
        }
        LogEntry::new(level, message).with_meta(meta)
    }

    /// Write the record to every transport at `level`
    pub fn emit(self, level: LogLevel, message: impl Into<String>) -> Result<()> {
        let transports = self.transports;
        let entry = self.into_entry(level, message);
        transports.write(&entry)
    }

    #[inline]
    pub fn emerg(self, message: impl Into<String>) -> Result<()> {
        self.emit(LogLevel::Emerg, message)
    }

    #[inline]
    pub fn alert(self, message: impl Into<String>) -> Result<()> {
        self.emit(LogLevel::Alert, message)
    }

    #[inline]
    pub fn crit(self, message: impl Into<String>) -> Result<()> {
        self.emit(LogLevel::Crit, message)
    }

    #[inline]
    pub fn error(self, message: impl Into<String>) -> Result<()> {
        self.emit(LogLevel::Error, message)
    }

    #[inline]
    pub fn warning(self, message: impl Into<String>) -> Result<()> {
        self.emit(LogLevel::Warning, message)
    }

    #[inline]
    pub fn notice(self, message: impl Into<String>) -> Result<()> {
        self.emit(LogLevel::Notice, message)
    }

    #[inline]
    pub fn info(self, message: impl Into<String>) -> Result<()> {
        self.emit(LogLevel::Info, message)
    }

    #[inline]
    pub fn debug(self, message: impl Into<String>) -> Result<()> {
        self.emit(LogLevel::Debug, message)
    }
}
