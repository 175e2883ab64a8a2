//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. They log without
//! metadata and evaluate to the `Result` of the call.
//!
//! # Examples
//!
//! ```
//! use structured_log_facade::prelude::*;
//! use structured_log_facade::info;
//!
//! let log = Log::builder()
//!     .transport_instance(MemoryTransport::new())
//!     .build()
//!     .unwrap();
//!
//! // Basic logging
//! info!(log, "Server started").unwrap();
//!
//! // With format arguments
//! let port = 8080;
//! info!(log, "Server listening on port {}", port).unwrap();
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use structured_log_facade::prelude::*;
/// # let log = Log::builder().transport_instance(MemoryTransport::new()).build().unwrap();
/// use structured_log_facade::log;
/// log!(log, LogLevel::Info, "Simple message").unwrap();
/// log!(log, LogLevel::Error, "Error code: {}", 500).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+), $crate::LogPayload::Empty)
    };
}

/// Log an emergency-level message.
///
/// # Examples
///
/// ```
/// # use structured_log_facade::prelude::*;
/// # let log = Log::builder().transport_instance(MemoryTransport::new()).build().unwrap();
/// use structured_log_facade::emerg;
/// emerg!(log, "System is unusable").unwrap();
/// emerg!(log, "Power lost on rack {}", 7).unwrap();
/// ```
#[macro_export]
macro_rules! emerg {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Emerg, $($arg)+)
    };
}

/// Log an alert-level message.
///
/// # Examples
///
/// ```
/// # use structured_log_facade::prelude::*;
/// # let log = Log::builder().transport_instance(MemoryTransport::new()).build().unwrap();
/// use structured_log_facade::alert;
/// alert!(log, "Replica lag too high").unwrap();
/// alert!(log, "Lag is {}s", 90).unwrap();
/// ```
#[macro_export]
macro_rules! alert {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Alert, $($arg)+)
    };
}

/// Log a critical-level message.
///
/// # Examples
///
/// ```
/// # use structured_log_facade::prelude::*;
/// # let log = Log::builder().transport_instance(MemoryTransport::new()).build().unwrap();
/// use structured_log_facade::crit;
/// crit!(log, "Payment provider unreachable").unwrap();
/// crit!(log, "Provider {} down", "acme").unwrap();
/// ```
#[macro_export]
macro_rules! crit {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Crit, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use structured_log_facade::prelude::*;
/// # let log = Log::builder().transport_instance(MemoryTransport::new()).build().unwrap();
/// use structured_log_facade::error;
/// error!(log, "Failed to connect to database").unwrap();
/// error!(log, "Error code: {}", 500).unwrap();
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use structured_log_facade::prelude::*;
/// # let log = Log::builder().transport_instance(MemoryTransport::new()).build().unwrap();
/// use structured_log_facade::warning;
/// warning!(log, "Low disk space").unwrap();
/// warning!(log, "Retry attempt {} of 5", 3).unwrap();
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log a notice-level message.
///
/// # Examples
///
/// ```
/// # use structured_log_facade::prelude::*;
/// # let log = Log::builder().transport_instance(MemoryTransport::new()).build().unwrap();
/// use structured_log_facade::notice;
/// notice!(log, "Configuration reloaded").unwrap();
/// notice!(log, "Loaded {} routes", 12).unwrap();
/// ```
#[macro_export]
macro_rules! notice {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Notice, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use structured_log_facade::prelude::*;
/// # let log = Log::builder().transport_instance(MemoryTransport::new()).build().unwrap();
/// use structured_log_facade::info;
/// info!(log, "Application started").unwrap();
/// info!(log, "Processing {} items", 100).unwrap();
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use structured_log_facade::prelude::*;
/// # let log = Log::builder().transport_instance(MemoryTransport::new()).build().unwrap();
/// use structured_log_facade::debug;
/// debug!(log, "Cache miss").unwrap();
/// debug!(log, "Key: {}", "user:7").unwrap();
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Log, LogLevel};
    use crate::transports::MemoryTransport;

    fn memory_log() -> (MemoryTransport, Log) {
        let memory = MemoryTransport::new().with_level(LogLevel::Debug);
        let log = Log::builder()
            .transport_instance(memory.clone())
            .build()
            .unwrap();
        (memory, log)
    }

    #[test]
    fn test_log_macro() {
        let (memory, log) = memory_log();
        log!(log, LogLevel::Info, "Test message").unwrap();
        log!(log, LogLevel::Info, "Formatted: {}", 42).unwrap();

        let messages: Vec<String> = memory.records().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["Test message", "Formatted: 42"]);
    }

    #[test]
    fn test_level_macros() {
        let (memory, log) = memory_log();
        emerg!(log, "emerg {}", 0).unwrap();
        alert!(log, "alert {}", 1).unwrap();
        crit!(log, "crit {}", 2).unwrap();
        error!(log, "error {}", 3).unwrap();
        warning!(log, "warning {}", 4).unwrap();
        notice!(log, "notice {}", 5).unwrap();
        info!(log, "info {}", 6).unwrap();
        debug!(log, "debug {}", 7).unwrap();

        let records = memory.records();
        assert_eq!(records.len(), 8);
        for (entry, level) in records.iter().zip(LogLevel::ALL) {
            assert_eq!(entry.level, level);
            assert_eq!(entry.message, format!("{} {}", level, level.rank()));
        }
    }
}
