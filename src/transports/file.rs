//! File transport implementation

use super::{level_option, timestamp_option};
use crate::core::{
    LogEntry, LogLevel, LoggerError, Meta, OutputFormat, Result, TimestampFormat, Transport,
};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends one line per entry to a file.
///
/// Descriptor options: `filename` (required), `level`, `json`, `format`,
/// `timestampFormat`. Pretty-printed JSON is not offered here since it would
/// break the one-entry-per-line layout.
pub struct FileTransport {
    writer: Option<BufWriter<File>>,
    path: PathBuf,
    level: Option<LogLevel>,
    timestamp_format: TimestampFormat,
    output_format: OutputFormat,
}

impl FileTransport {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation("opening log file", path.display().to_string(), e)
            })?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            path,
            level: None,
            timestamp_format: TimestampFormat::default(),
            output_format: OutputFormat::Text,
        })
    }

    pub fn from_options(options: &Meta) -> Result<Self> {
        let filename = options
            .get_str("filename")
            .ok_or_else(|| LoggerError::config("File", "option 'filename' is required"))?;

        let output_format = match OutputFormat::from_options(options) {
            OutputFormat::PrettyJson => OutputFormat::Json,
            other => other,
        };

        let mut transport = Self::new(filename)?;
        transport.level = level_option("File", options)?;
        transport.timestamp_format = timestamp_option(options);
        transport.output_format = output_format;
        Ok(transport)
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = match format {
            OutputFormat::PrettyJson => OutputFormat::Json,
            other => other,
        };
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Transport for FileTransport {
    fn log(&mut self, entry: &LogEntry) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::transport("file", "writer not initialized"))?;

        let mut output = self.output_format.format(entry, &self.timestamp_format);
        output.push('\n');

        writer.write_all(output.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }

    fn level(&self) -> Option<LogLevel> {
        self.level
    }
}

impl Drop for FileTransport {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}
