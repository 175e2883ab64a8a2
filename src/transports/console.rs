//! Console transport implementation

use super::{level_option, timestamp_option};
use crate::core::metadata::escape_control;
use crate::core::{LogEntry, LogLevel, Meta, OutputFormat, Result, TimestampFormat, Transport};
use colored::Colorize;

/// Writes entries to stdout, or stderr for `error` and more severe levels.
///
/// Descriptor options: `level`, `json`, `prettyPrint`, `format`, `colorize`,
/// `timestampFormat`.
pub struct ConsoleTransport {
    use_colors: bool,
    level: Option<LogLevel>,
    timestamp_format: TimestampFormat,
    output_format: OutputFormat,
}

impl ConsoleTransport {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            level: None,
            timestamp_format: TimestampFormat::default(),
            output_format: OutputFormat::default(),
        }
    }

    pub fn from_options(options: &Meta) -> Result<Self> {
        Ok(Self {
            use_colors: options.get_bool("colorize").unwrap_or(false),
            level: level_option("Console", options)?,
            timestamp_format: timestamp_option(options),
            output_format: OutputFormat::from_options(options),
        })
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// Set the output format for this transport
    ///
    /// # Example
    ///
    /// ```
    /// use structured_log_facade::transports::ConsoleTransport;
    /// use structured_log_facade::OutputFormat;
    ///
    /// let transport = ConsoleTransport::new()
    ///     .with_output_format(OutputFormat::Json);
    /// ```
    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Format as text with optional colors
    fn format_text(&self, entry: &LogEntry) -> String {
        let level_str = format!("{:7}", entry.level.to_str().to_uppercase());
        let level_str = if self.use_colors {
            level_str.color(entry.level.color_code()).to_string()
        } else {
            level_str
        };

        let base = format!(
            "[{}] [{}] {} - {}",
            self.timestamp_format.format(&entry.timestamp),
            level_str,
            entry.thread_name.as_ref().unwrap_or(&entry.thread_id),
            escape_control(&entry.message)
        );

        if entry.meta.is_empty() {
            base
        } else {
            format!("{} {}", base, entry.meta.format_fields())
        }
    }
}

impl Default for ConsoleTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for ConsoleTransport {
    fn log(&mut self, entry: &LogEntry) -> Result<()> {
        let output = match self.output_format {
            OutputFormat::Text => self.format_text(entry),
            _ => self.output_format.format(entry, &self.timestamp_format),
        };

        // Error and more severe go to stderr
        if entry.level.is_enabled_for(LogLevel::Error) {
            eprintln!("{}", output);
        } else {
            println!("{}", output);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        use std::io::Write;
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }

    fn level(&self) -> Option<LogLevel> {
        self.level
    }
}
