//! Timestamp formatting utilities
//!
//! Provides standardized, configurable timestamp formats for log output.
//! Supports ISO 8601, RFC 3339, Unix timestamps, and custom formats.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standardized timestamp format options
///
/// Transports accept the format through their `timestampFormat` option, either as
/// one of the names below or as a strftime pattern (any value containing `%`).
///
/// # Examples
///
/// ```
/// use structured_log_facade::core::TimestampFormat;
///
/// let format = TimestampFormat::parse("rfc3339");
/// assert_eq!(format, TimestampFormat::Rfc3339);
///
/// let custom = TimestampFormat::parse("%d/%b/%Y:%H:%M:%S %z");
/// assert!(matches!(custom, TimestampFormat::Custom(_)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// RFC 3339 format: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    /// Parse an option value; unknown names fall back to the default.
    pub fn parse(value: &str) -> Self {
        if value.contains('%') {
            return TimestampFormat::Custom(value.to_string());
        }
        match value.to_lowercase().as_str() {
            "iso8601micros" | "iso8601-micros" => TimestampFormat::Iso8601Micros,
            "rfc3339" => TimestampFormat::Rfc3339,
            "unix" => TimestampFormat::Unix,
            "unixmillis" | "unix-millis" => TimestampFormat::UnixMillis,
            _ => TimestampFormat::Iso8601,
        }
    }

    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Iso8601Micros => datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }

    /// Check if this is a Unix-based numeric format
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, TimestampFormat::Unix | TimestampFormat::UnixMillis)
    }
}
