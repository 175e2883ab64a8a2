//! Output format configuration for log entries
//!
//! Provides different output formats for log entries:
//! - Text: Human-readable format (default)
//! - Json / PrettyJson: Machine-readable JSON format
//! - Logfmt: Key-value format compatible with log aggregation tools

use super::log_entry::LogEntry;
use super::metadata::{escape_control, Meta};
use super::timestamp::TimestampFormat;
use serde_json::Value;

/// Output format for log entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    ///
    /// Example: `[2025-01-08T10:30:45.123Z] [INFO   ] main - Request processed user=alice`
    #[default]
    Text,

    /// Single-line JSON with meta fields flattened next to `level` and `message`
    ///
    /// Example: `{"level":"info","message":"Request processed","timestamp":"2025-01-08T10:30:45.123Z","user":"alice"}`
    Json,

    /// Indented JSON, one entry spanning several lines
    PrettyJson,

    /// Logfmt format (key=value pairs)
    ///
    /// Example: `timestamp=2025-01-08T10:30:45.123Z level=info message="Request processed"`
    Logfmt,
}

impl OutputFormat {
    /// Select a format from transport options (`json`, `prettyPrint`, `format`).
    pub fn from_options(options: &Meta) -> Self {
        if options.get_str("format") == Some("logfmt") {
            return OutputFormat::Logfmt;
        }
        let json = options.get_bool("json").unwrap_or(false)
            || options.get_str("format") == Some("json");
        match (json, options.get_bool("prettyPrint").unwrap_or(false)) {
            (true, true) => OutputFormat::PrettyJson,
            (true, false) => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }

    /// Format a log entry according to this output format
    pub fn format(&self, entry: &LogEntry, timestamp_format: &TimestampFormat) -> String {
        match self {
            OutputFormat::Text => self.format_text(entry, timestamp_format),
            OutputFormat::Json => self.json_value(entry, timestamp_format).to_string(),
            OutputFormat::PrettyJson => {
                serde_json::to_string_pretty(&self.json_value(entry, timestamp_format))
                    .unwrap_or_default()
            }
            OutputFormat::Logfmt => self.format_logfmt(entry, timestamp_format),
        }
    }

    /// Format as human-readable text
    fn format_text(&self, entry: &LogEntry, timestamp_format: &TimestampFormat) -> String {
        let timestamp_str = timestamp_format.format(&entry.timestamp);
        let thread_name = entry.thread_name.as_ref().unwrap_or(&entry.thread_id);

        let base = format!(
            "[{}] [{:7}] {} - {}",
            timestamp_str,
            entry.level.to_str().to_uppercase(),
            thread_name,
            escape_control(&entry.message)
        );

        if entry.meta.is_empty() {
            base
        } else {
            format!("{} {}", base, entry.meta.format_fields())
        }
    }

    fn json_value(&self, entry: &LogEntry, timestamp_format: &TimestampFormat) -> Value {
        let mut json_obj = serde_json::Map::new();

        // Meta first so the fixed keys below cannot be shadowed by caller fields
        for (key, value) in entry.meta.iter() {
            json_obj.insert(key.clone(), value.clone());
        }

        json_obj.insert(
            "timestamp".to_string(),
            self.format_timestamp_json(entry, timestamp_format),
        );
        json_obj.insert(
            "level".to_string(),
            Value::String(entry.level.to_str().to_string()),
        );
        json_obj.insert("message".to_string(), Value::String(entry.message.clone()));

        Value::Object(json_obj)
    }

    /// Format timestamp for JSON output
    fn format_timestamp_json(&self, entry: &LogEntry, timestamp_format: &TimestampFormat) -> Value {
        if !timestamp_format.is_numeric() {
            return Value::String(timestamp_format.format(&entry.timestamp));
        }
        match timestamp_format {
            TimestampFormat::Unix => Value::Number(entry.timestamp.timestamp().into()),
            _ => Value::Number(entry.timestamp.timestamp_millis().into()),
        }
    }

    /// Format as logfmt (key=value pairs)
    fn format_logfmt(&self, entry: &LogEntry, timestamp_format: &TimestampFormat) -> String {
        let mut parts = Vec::new();

        parts.push(format!(
            "timestamp={}",
            self.escape_logfmt_value(&timestamp_format.format(&entry.timestamp))
        ));
        parts.push(format!("level={}", entry.level.to_str()));

        // Message is always quoted for safety
        parts.push(format!("message={}", self.quote_logfmt_value(&entry.message)));

        for (key, value) in entry.meta.iter() {
            let formatted_value = match value {
                Value::String(s) => self.quote_logfmt_value(s),
                Value::Object(_) | Value::Array(_) => self.quote_logfmt_value(&value.to_string()),
                other => other.to_string(),
            };
            parts.push(format!("{}={}", self.escape_logfmt_key(key), formatted_value));
        }

        parts.join(" ")
    }

    /// Escape a logfmt key (remove spaces and special chars)
    fn escape_logfmt_key(&self, key: &str) -> String {
        key.chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
            .collect()
    }

    /// Escape a logfmt value (quote if contains spaces)
    fn escape_logfmt_value(&self, value: &str) -> String {
        if value.contains(' ') || value.contains('"') || value.contains('=') {
            self.quote_logfmt_value(value)
        } else {
            value.to_string()
        }
    }

    fn quote_logfmt_value(&self, value: &str) -> String {
        let quoted = value.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{}\"", escape_control(&quoted))
    }
}
