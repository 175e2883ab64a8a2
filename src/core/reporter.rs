//! Error-reporting clients
//!
//! An [`ErrorReporter`] receives each error logged through the facade together
//! with the [`ErrorReport`] partitioned from the call's metadata. Without a DSN
//! the facade uses [`DisabledReporter`], which accepts and discards everything.

use super::config::SentryConfig;
use super::error::Result;
use super::partition::ErrorReport;
use super::payload::ErrorDetails;
use std::time::Duration;

#[cfg(feature = "sentry")]
use super::{error::LoggerError, log_level::LogLevel};
#[cfg(feature = "sentry")]
use sentry::protocol::{Event, Exception, Level};
#[cfg(feature = "sentry")]
use serde_json::Value;
#[cfg(feature = "sentry")]
use std::borrow::Cow;

pub trait ErrorReporter: Send + Sync {
    /// Hand an error to the tracker. Delivery happens off the caller's thread;
    /// only failures to accept the error are returned.
    fn capture_exception(&self, error: &ErrorDetails, report: &ErrorReport) -> Result<()>;

    fn is_enabled(&self) -> bool;

    /// Wait up to `timeout` for queued reports; `true` when drained.
    fn flush(&self, _timeout: Duration) -> bool {
        true
    }
}

/// Reporter used when no DSN is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledReporter;

impl ErrorReporter for DisabledReporter {
    fn capture_exception(&self, _error: &ErrorDetails, _report: &ErrorReport) -> Result<()> {
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Build the reporter described by `config`
///
/// No config, or a config without a DSN, yields a [`DisabledReporter`]. A DSN
/// that does not parse is a configuration error.
pub fn reporter_from_config(config: Option<&SentryConfig>) -> Result<Box<dyn ErrorReporter>> {
    match config {
        Some(config) if config.is_enabled() => enabled_reporter(config),
        _ => Ok(Box::new(DisabledReporter)),
    }
}

#[cfg(feature = "sentry")]
fn enabled_reporter(config: &SentryConfig) -> Result<Box<dyn ErrorReporter>> {
    Ok(Box::new(SentryReporter::new(config)?))
}

#[cfg(not(feature = "sentry"))]
fn enabled_reporter(_config: &SentryConfig) -> Result<Box<dyn ErrorReporter>> {
    eprintln!(
        "[LOGGER WARNING] Sentry DSN configured but the `sentry` feature is disabled; \
         error reporting is off."
    );
    Ok(Box::new(DisabledReporter))
}

/// Reporter backed by a dedicated `sentry::Client`
///
/// The client is owned by this reporter rather than bound to the global hub, so
/// several loggers can report to different projects.
#[cfg(feature = "sentry")]
pub struct SentryReporter {
    client: sentry::Client,
}

#[cfg(feature = "sentry")]
impl SentryReporter {
    pub fn new(config: &SentryConfig) -> Result<Self> {
        let dsn = config
            .dsn
            .as_deref()
            .filter(|dsn| !dsn.is_empty())
            .ok_or_else(|| LoggerError::config("sentry", "a DSN is required"))?;
        let dsn = dsn
            .parse::<sentry::types::Dsn>()
            .map_err(|e| LoggerError::config("sentry.dsn", e.to_string()))?;

        let options = sentry::ClientOptions {
            dsn: Some(dsn),
            release: config.options.release.clone().map(Into::into),
            environment: config.options.environment.clone().map(Into::into),
            server_name: config.options.server_name.clone().map(Into::into),
            sample_rate: config.options.sample_rate.unwrap_or(1.0),
            debug: config.options.debug,
            ..Default::default()
        };

        Ok(Self {
            client: sentry::Client::from_config(sentry::apply_defaults(options)),
        })
    }

    /// Translate an error and its report into a Sentry event.
    pub fn build_event(error: &ErrorDetails, report: &ErrorReport) -> Event<'static> {
        let tags = report
            .tags
            .iter()
            .map(|(key, value)| (key.clone(), tag_value(value)))
            .collect();
        let mut extra: std::collections::BTreeMap<String, Value> = report
            .extra
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        if let Some(stack) = &error.stack {
            extra
                .entry("stack".to_string())
                .or_insert_with(|| Value::String(stack.clone()));
        }

        let mut event = Event {
            level: report
                .level
                .as_ref()
                .and_then(sentry_level)
                .unwrap_or(Level::Error),
            message: Some(error.message.clone()),
            exception: vec![Exception {
                ty: error.kind.clone(),
                value: Some(error.message.clone()),
                ..Default::default()
            }]
            .into(),
            tags,
            extra,
            ..Default::default()
        };

        if let Some(parts) = report.fingerprint.as_ref().and_then(fingerprint_parts) {
            event.fingerprint = Cow::Owned(parts);
        }

        event
    }
}

#[cfg(feature = "sentry")]
impl ErrorReporter for SentryReporter {
    fn capture_exception(&self, error: &ErrorDetails, report: &ErrorReport) -> Result<()> {
        self.client
            .capture_event(Self::build_event(error, report), None);
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        self.client.is_enabled()
    }

    fn flush(&self, timeout: Duration) -> bool {
        self.client.flush(Some(timeout))
    }
}

#[cfg(feature = "sentry")]
fn tag_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Sentry level for an override hint; accepts syslog names as well.
#[cfg(feature = "sentry")]
fn sentry_level(value: &Value) -> Option<Level> {
    let name = value.as_str()?;
    if let Ok(level) = name.parse::<LogLevel>() {
        return Some(match level {
            LogLevel::Emerg | LogLevel::Alert | LogLevel::Crit => Level::Fatal,
            LogLevel::Error => Level::Error,
            LogLevel::Warning => Level::Warning,
            LogLevel::Notice | LogLevel::Info => Level::Info,
            LogLevel::Debug => Level::Debug,
        });
    }
    name.parse::<Level>().ok()
}

#[cfg(feature = "sentry")]
fn fingerprint_parts(value: &Value) -> Option<Vec<Cow<'static, str>>> {
    match value {
        Value::String(s) => Some(vec![Cow::Owned(s.clone())]),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| Cow::Owned(tag_value(item)))
                .collect(),
        ),
        _ => None,
    }
}
