//! Per-call orchestration shared by every `Log` handle

use super::config::RecordOptions;
use super::error::Result;
use super::log_level::LogLevel;
use super::metadata::Meta;
use super::partition::Partitioner;
use super::payload::LogPayload;
use super::record::LogRecord;
use super::reporter::ErrorReporter;
use super::transport::TransportSet;
use std::time::Duration;

/// How long a dropped logger waits for the reporter to drain
const REPORTER_FLUSH_TIMEOUT: Duration = Duration::from_secs(2);

pub struct Dispatcher {
    transports: TransportSet,
    reporter: Box<dyn ErrorReporter>,
    partitioner: Partitioner,
    default_meta: Meta,
    options: RecordOptions,
}

impl Dispatcher {
    pub fn new(
        transports: TransportSet,
        reporter: Box<dyn ErrorReporter>,
        partitioner: Partitioner,
        default_meta: Meta,
        options: RecordOptions,
    ) -> Self {
        Self {
            transports,
            reporter,
            partitioner,
            default_meta,
            options,
        }
    }

    pub fn record(&self) -> LogRecord<'_> {
        LogRecord::new(&self.transports, &self.default_meta, &self.options)
    }

    /// Run one logging call.
    ///
    /// The error report only sees the meta passed to this call, never the
    /// logger's default meta. Reporting happens before the entry is written and
    /// regardless of level thresholds. Reporter and transport failures are
    /// returned unchanged.
    pub fn dispatch(&self, level: LogLevel, message: impl Into<String>, payload: LogPayload) -> Result<()> {
        let (meta, error) = payload.into_parts();

        let mut record = self.record();
        if let Some(meta) = &meta {
            record.add_meta(meta);
        }

        if let Some(error) = error {
            let report = self.partitioner.partition(meta.as_ref());
            self.reporter.capture_exception(&error, &report)?;
            record.add_error(&error);
        }

        record.emit(level, message)
    }

    pub fn transports(&self) -> &TransportSet {
        &self.transports
    }

    pub fn reporter(&self) -> &dyn ErrorReporter {
        self.reporter.as_ref()
    }

    pub fn partitioner(&self) -> &Partitioner {
        &self.partitioner
    }

    pub fn default_meta(&self) -> &Meta {
        &self.default_meta
    }

    pub fn options(&self) -> &RecordOptions {
        &self.options
    }

    pub fn flush(&self, timeout: Duration) -> Result<()> {
        self.transports.flush()?;
        if !self.reporter.flush(timeout) {
            eprintln!(
                "[LOGGER WARNING] Error reporter did not drain within {:?}",
                timeout
            );
        }
        Ok(())
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        if let Err(e) = self.flush(REPORTER_FLUSH_TIMEOUT) {
            eprintln!("[LOGGER ERROR] Flush on drop failed: {}", e);
        }
    }
}
