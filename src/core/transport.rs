//! Transport trait for log output destinations

use super::{error::Result, log_entry::LogEntry, log_level::LogLevel};
use parking_lot::Mutex;

pub trait Transport: Send + Sync {
    fn log(&mut self, entry: &LogEntry) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;

    /// Per-transport threshold; `None` inherits the logger-wide level.
    fn level(&self) -> Option<LogLevel> {
        None
    }
}

/// The ordered transports of one logger
///
/// Writes are synchronous and happen on the caller's thread. The first failing
/// transport aborts the write and its error is returned as-is; later transports
/// do not see the entry. A transport must not log through the logger that owns
/// it, since the set is locked for the duration of a write.
pub struct TransportSet {
    transports: Mutex<Vec<Box<dyn Transport>>>,
    level: LogLevel,
}

impl TransportSet {
    pub fn new(transports: Vec<Box<dyn Transport>>, level: LogLevel) -> Self {
        Self {
            transports: Mutex::new(transports),
            level,
        }
    }

    /// Logger-wide threshold
    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn len(&self) -> usize {
        self.transports.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.transports.lock().is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.transports
            .lock()
            .iter()
            .map(|t| t.name().to_string())
            .collect()
    }

    pub fn write(&self, entry: &LogEntry) -> Result<()> {
        let mut transports = self.transports.lock();
        for transport in transports.iter_mut() {
            let threshold = transport.level().unwrap_or(self.level);
            if entry.level.is_enabled_for(threshold) {
                transport.log(entry)?;
            }
        }
        Ok(())
    }

    pub fn flush(&self) -> Result<()> {
        let mut transports = self.transports.lock();
        for transport in transports.iter_mut() {
            transport.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LoggerError;
    use std::sync::Arc;

    struct Counting {
        level: Option<LogLevel>,
        seen: Arc<Mutex<Vec<LogLevel>>>,
    }

    impl Transport for Counting {
        fn log(&mut self, entry: &LogEntry) -> Result<()> {
            self.seen.lock().push(entry.level);
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "counting"
        }

        fn level(&self) -> Option<LogLevel> {
            self.level
        }
    }

    struct Failing;

    impl Transport for Failing {
        fn log(&mut self, _entry: &LogEntry) -> Result<()> {
            Err(LoggerError::transport("failing", "Simulated failure"))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[test]
    fn test_logger_level_filters() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let set = TransportSet::new(
            vec![Box::new(Counting { level: None, seen: Arc::clone(&seen) })],
            LogLevel::Info,
        );

        set.write(&LogEntry::new(LogLevel::Debug, "hidden")).unwrap();
        set.write(&LogEntry::new(LogLevel::Error, "shown")).unwrap();

        assert_eq!(*seen.lock(), vec![LogLevel::Error]);
    }

    #[test]
    fn test_transport_level_overrides_logger_level() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let set = TransportSet::new(
            vec![Box::new(Counting {
                level: Some(LogLevel::Debug),
                seen: Arc::clone(&seen),
            })],
            LogLevel::Warning,
        );

        set.write(&LogEntry::new(LogLevel::Debug, "shown")).unwrap();
        assert_eq!(seen.lock().len(), 1);
    }

    #[test]
    fn test_failure_propagates() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let set = TransportSet::new(
            vec![
                Box::new(Failing),
                Box::new(Counting { level: None, seen: Arc::clone(&seen) }),
            ],
            LogLevel::Debug,
        );

        let result = set.write(&LogEntry::new(LogLevel::Info, "boom"));
        assert!(matches!(result, Err(LoggerError::TransportError { .. })));
        assert!(seen.lock().is_empty());
    }
}
