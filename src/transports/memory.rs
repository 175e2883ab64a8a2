//! In-memory transport
//!
//! Records every entry it receives. Clones share the same buffer, so a test can
//! keep one handle and give another to the logger.

use super::level_option;
use crate::core::{LogEntry, LogLevel, Meta, Result, Transport};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    entries: Arc<Mutex<Vec<LogEntry>>>,
    level: Option<LogLevel>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from descriptor options (`level`)
    pub fn from_options(options: &Meta) -> Result<Self> {
        Ok(Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            level: level_option("Memory", options)?,
        })
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// Registry factory producing transports that share this buffer
    pub fn factory(&self) -> impl Fn(&Meta) -> Result<Box<dyn Transport>> + Send + Sync + 'static {
        let entries = Arc::clone(&self.entries);
        move |options: &Meta| {
            let transport = MemoryTransport {
                entries: Arc::clone(&entries),
                level: level_option("Memory", options)?,
            };
            Ok(Box::new(transport) as Box<dyn Transport>)
        }
    }

    /// Snapshot of recorded entries
    pub fn records(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    /// Recorded `(level, message, meta)` tuples
    pub fn tuples(&self) -> Vec<(String, String, Meta)> {
        self.entries
            .lock()
            .iter()
            .map(|entry| {
                (
                    entry.level.to_str().to_string(),
                    entry.message.clone(),
                    entry.meta.clone(),
                )
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Transport for MemoryTransport {
    fn log(&mut self, entry: &LogEntry) -> Result<()> {
        self.entries.lock().push(entry.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }

    fn level(&self) -> Option<LogLevel> {
        self.level
    }
}
