//! Logger configuration
//!
//! `LogConfig` is the per-instance configuration; `Defaults` holds factory-wide
//! defaults that a [`LogBuilder`](super::logger::LogBuilder) reads once. Both
//! deserialize from the JSON layout used by existing deployments:
//!
//! ```json
//! {
//!   "transports": [{ "Console": { "level": "info", "json": true } }],
//!   "sentry": { "dsn": "https://key@sentry.example.com/1", "options": { "release": "1.2.0" } },
//!   "meta": { "service": "billing" },
//!   "opts": { "errNoStack": false }
//! }
//! ```

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::metadata::Meta;
use serde::{Deserialize, Deserializer, Serialize};

/// One transport entry: a kind name and the options it is built with
///
/// Serialized as a single-key object, `{ "File": { "filename": "app.log" } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Meta", into = "Meta")]
pub struct TransportDescriptor {
    pub kind: String,
    pub options: Meta,
}

impl TransportDescriptor {
    pub fn new(kind: impl Into<String>, options: Meta) -> Self {
        Self {
            kind: kind.into(),
            options,
        }
    }
}

impl TryFrom<Meta> for TransportDescriptor {
    type Error = String;

    fn try_from(entry: Meta) -> std::result::Result<Self, Self::Error> {
        if entry.len() != 1 {
            return Err(format!(
                "transport entry must have exactly one kind, found {}",
                entry.len()
            ));
        }
        let (kind, options) = entry
            .iter()
            .next()
            .map(|(kind, options)| (kind.clone(), options.clone()))
            .ok_or_else(|| "transport entry is empty".to_string())?;
        let options = match options {
            serde_json::Value::Null => Meta::new(),
            other => Meta::try_from(other)
                .map_err(|_| format!("options for transport '{}' must be an object", kind))?,
        };
        Ok(Self { kind, options })
    }
}

impl From<TransportDescriptor> for Meta {
    fn from(descriptor: TransportDescriptor) -> Self {
        Meta::new().with_field(descriptor.kind, descriptor.options)
    }
}

/// Options applied to every record a logger builds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordOptions {
    /// Leave `errStack` out of emitted entries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub err_no_stack: Option<bool>,
}

impl RecordOptions {
    /// `self` layered over `defaults`; values set on `self` win.
    #[must_use]
    pub fn merged_over(&self, defaults: &RecordOptions) -> RecordOptions {
        RecordOptions {
            err_no_stack: self.err_no_stack.or(defaults.err_no_stack),
        }
    }

    pub fn err_no_stack(&self) -> bool {
        self.err_no_stack.unwrap_or(false)
    }
}

/// Logger-wide options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggerOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<LogLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transports: Option<Vec<TransportDescriptor>>,
}

/// Factory defaults consulted when building a logger
///
/// The builder borrows a `Defaults` mutably and *takes* its transports, so one
/// defaults object supplies transports to at most one logger. Meta and options
/// are copied and keep applying to later builds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Defaults {
    #[serde(rename = "loggerOpts", alias = "winstonOpts")]
    pub logger: LoggerOptions,
    pub meta: Meta,
    pub opts: RecordOptions,
}

impl Defaults {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_transport(mut self, descriptor: TransportDescriptor) -> Self {
        self.logger
            .transports
            .get_or_insert_with(Vec::new)
            .push(descriptor);
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.logger.level = Some(level);
        self
    }

    #[must_use]
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    #[must_use]
    pub fn with_opts(mut self, opts: RecordOptions) -> Self {
        self.opts = opts;
        self
    }

    /// Remove and return the default transports.
    pub fn take_transports(&mut self) -> Option<Vec<TransportDescriptor>> {
        self.logger.transports.take()
    }

    pub fn has_transports(&self) -> bool {
        self.logger
            .transports
            .as_ref()
            .is_some_and(|transports| !transports.is_empty())
    }
}

/// Error-tracking configuration
///
/// A missing or empty `dsn` (or `false`) leaves error reporting disabled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentryConfig {
    #[serde(deserialize_with = "deserialize_dsn", skip_serializing_if = "Option::is_none")]
    pub dsn: Option<String>,
    pub options: SentryOptions,
}

impl SentryConfig {
    pub fn new(dsn: impl Into<String>) -> Self {
        Self {
            dsn: Some(dsn.into()),
            options: SentryOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: SentryOptions) -> Self {
        self.options = options;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.dsn.as_deref().is_some_and(|dsn| !dsn.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SentryOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<f32>,
    pub debug: bool,
}

fn deserialize_dsn<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    #[allow(dead_code)]
    enum RawDsn {
        Url(String),
        Flag(bool),
    }

    Ok(match Option::<RawDsn>::deserialize(deserializer)? {
        Some(RawDsn::Url(dsn)) if !dsn.is_empty() => Some(dsn),
        _ => None,
    })
}

/// Per-instance logger configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogConfig {
    pub transports: Vec<TransportDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentry: Option<SentryConfig>,
    pub meta: Meta,
    pub opts: RecordOptions,
    /// Logger-wide threshold; defaults to `info`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<LogLevel>,
    /// Default `env` tag for error reports; falls back to `APP_ENV`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration document
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| LoggerError::config("LogConfig", e.to_string()))
    }

    #[must_use]
    pub fn with_transport(mut self, descriptor: TransportDescriptor) -> Self {
        self.transports.push(descriptor);
        self
    }

    #[must_use]
    pub fn with_sentry(mut self, sentry: SentryConfig) -> Self {
        self.sentry = Some(sentry);
        self
    }

    #[must_use]
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    #[must_use]
    pub fn with_opts(mut self, opts: RecordOptions) -> Self {
        self.opts = opts;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_descriptor_from_single_key_object() {
        let descriptor: TransportDescriptor =
            serde_json::from_value(json!({"Console": {"level": "info", "json": true}})).unwrap();

        assert_eq!(descriptor.kind, "Console");
        assert_eq!(descriptor.options.get_str("level"), Some("info"));
    }

    #[test]
    fn test_descriptor_rejects_multiple_kinds() {
        let result: std::result::Result<TransportDescriptor, _> =
            serde_json::from_value(json!({"Console": {}, "File": {}}));
        assert!(result.is_err());
    }

    #[test]
    fn test_descriptor_null_options() {
        let descriptor: TransportDescriptor = serde_json::from_value(json!({"Console": null})).unwrap();
        assert!(descriptor.options.is_empty());
    }

    #[test]
    fn test_config_from_json() {
        let config = LogConfig::from_json(
            r#"{
                "transports": [{"Console": {"level": "debug"}}],
                "sentry": {"dsn": "https://key@sentry.example.com/1", "options": {"release": "1.0"}},
                "meta": {"service": "billing"},
                "opts": {"errNoStack": true}
            }"#,
        )
        .unwrap();

        assert_eq!(config.transports.len(), 1);
        assert!(config.sentry.as_ref().unwrap().is_enabled());
        assert_eq!(config.meta.get_str("service"), Some("billing"));
        assert!(config.opts.err_no_stack());
    }

    #[test]
    fn test_dsn_false_disables_reporting() {
        let sentry: SentryConfig = serde_json::from_value(json!({"dsn": false})).unwrap();
        assert!(!sentry.is_enabled());

        let sentry: SentryConfig = serde_json::from_value(json!({})).unwrap();
        assert!(!sentry.is_enabled());
    }

    #[test]
    fn test_defaults_accept_winston_opts_alias() {
        let mut defaults: Defaults = serde_json::from_value(json!({
            "winstonOpts": {"level": "debug", "transports": [{"Memory": {}}]},
            "meta": {"app": "x"}
        }))
        .unwrap();

        assert_eq!(defaults.logger.level, Some(LogLevel::Debug));
        assert!(defaults.has_transports());
        assert_eq!(defaults.take_transports().map(|t| t.len()), Some(1));
        assert!(!defaults.has_transports());
    }

    #[test]
    fn test_record_options_merge() {
        let instance = RecordOptions { err_no_stack: None };
        let defaults = RecordOptions { err_no_stack: Some(true) };
        assert!(instance.merged_over(&defaults).err_no_stack());

        let instance = RecordOptions { err_no_stack: Some(false) };
        assert!(!instance.merged_over(&defaults).err_no_stack());
    }
}
