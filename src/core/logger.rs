//! The `Log` facade and its builder

use super::{
    config::{Defaults, LogConfig, RecordOptions, SentryConfig, TransportDescriptor},
    dispatcher::Dispatcher,
    error::{LoggerError, Result},
    log_level::LogLevel,
    metadata::Meta,
    partition::{resolve_env, Partitioner},
    payload::LogPayload,
    record::LogRecord,
    registry::TransportRegistry,
    reporter::{reporter_from_config, ErrorReporter},
    transport::{Transport, TransportSet},
};
use crate::middleware::{MiddlewareConfig, RequestLogger};
use std::sync::Arc;
use std::time::Duration;

/// Default time `flush` waits for the error reporter to drain
pub const DEFAULT_FLUSH_TIMEOUT: Duration = Duration::from_secs(2);

/// Cheaply cloneable logging handle
///
/// Every clone shares the same transports and error reporter. Transports are
/// flushed when the last clone is dropped.
///
/// # Example
///
/// ```
/// use structured_log_facade::prelude::*;
///
/// let memory = MemoryTransport::new();
/// let log = Log::builder()
///     .registry(TransportRegistry::empty().with("Memory", memory.factory()))
///     .transport(TransportDescriptor::new("Memory", Meta::new().with_field("level", "debug")))
///     .build()
///     .unwrap();
///
/// log.debug("hi", Meta::new().with_field("name", "Dan")).unwrap();
///
/// let (level, message, meta) = memory.tuples().remove(0);
/// assert_eq!((level.as_str(), message.as_str()), ("debug", "hi"));
/// assert_eq!(meta.get_str("name"), Some("Dan"));
/// ```
#[derive(Clone)]
pub struct Log {
    dispatcher: Arc<Dispatcher>,
}

impl Log {
    /// Build a logger from a configuration, using the built-in transport kinds.
    pub fn new(config: LogConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Build a logger that falls back to `defaults`, taking its transports.
    pub fn with_defaults(config: LogConfig, defaults: &mut Defaults) -> Result<Self> {
        Self::builder().config(config).defaults(defaults).build()
    }

    #[must_use]
    pub fn builder<'a>() -> LogBuilder<'a> {
        LogBuilder::new()
    }

    /// Log `message` at `level` with optional meta and error.
    pub fn log(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        payload: impl Into<LogPayload>,
    ) -> Result<()> {
        self.dispatcher.dispatch(level, message, payload.into())
    }

    #[inline]
    pub fn emerg(&self, message: impl Into<String>, payload: impl Into<LogPayload>) -> Result<()> {
        self.log(LogLevel::Emerg, message, payload)
    }

    #[inline]
    pub fn alert(&self, message: impl Into<String>, payload: impl Into<LogPayload>) -> Result<()> {
        self.log(LogLevel::Alert, message, payload)
    }

    #[inline]
    pub fn crit(&self, message: impl Into<String>, payload: impl Into<LogPayload>) -> Result<()> {
        self.log(LogLevel::Crit, message, payload)
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>, payload: impl Into<LogPayload>) -> Result<()> {
        self.log(LogLevel::Error, message, payload)
    }

    #[inline]
    pub fn warning(&self, message: impl Into<String>, payload: impl Into<LogPayload>) -> Result<()> {
        self.log(LogLevel::Warning, message, payload)
    }

    #[inline]
    pub fn notice(&self, message: impl Into<String>, payload: impl Into<LogPayload>) -> Result<()> {
        self.log(LogLevel::Notice, message, payload)
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>, payload: impl Into<LogPayload>) -> Result<()> {
        self.log(LogLevel::Info, message, payload)
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>, payload: impl Into<LogPayload>) -> Result<()> {
        self.log(LogLevel::Debug, message, payload)
    }

    /// Start a record for incremental construction. Records skip error reporting.
    pub fn record(&self) -> LogRecord<'_> {
        self.dispatcher.record()
    }

    /// Request-logging middleware writing through this logger
    pub fn middleware(&self, config: MiddlewareConfig) -> RequestLogger {
        RequestLogger::new(self.clone(), config)
    }

    /// Every level, most severe first
    pub fn levels(&self) -> &'static [LogLevel] {
        &LogLevel::ALL
    }

    pub fn level(&self) -> LogLevel {
        self.dispatcher.transports().level()
    }

    pub fn transport_names(&self) -> Vec<String> {
        self.dispatcher.transports().names()
    }

    pub fn reporting_enabled(&self) -> bool {
        self.dispatcher.reporter().is_enabled()
    }

    /// Default `env` tag of error reports
    pub fn environment(&self) -> &str {
        self.dispatcher.partitioner().env()
    }

    pub fn default_meta(&self) -> &Meta {
        self.dispatcher.default_meta()
    }

    pub fn options(&self) -> &RecordOptions {
        self.dispatcher.options()
    }

    pub fn flush(&self) -> Result<()> {
        self.dispatcher.flush(DEFAULT_FLUSH_TIMEOUT)
    }
}

impl std::fmt::Debug for Log {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Log")
            .field("level", &self.level())
            .field("transports", &self.transport_names())
            .field("environment", &self.environment())
            .finish()
    }
}

/// Builder for [`Log`]
///
/// Instance settings always win over [`Defaults`]. Handing a `Defaults` to the
/// builder moves its transports out, whether or not they end up being used.
pub struct LogBuilder<'a> {
    config: LogConfig,
    instances: Vec<Box<dyn Transport>>,
    registry: TransportRegistry,
    defaults: Option<&'a mut Defaults>,
    reporter: Option<Box<dyn ErrorReporter>>,
}

impl<'a> LogBuilder<'a> {
    pub fn new() -> Self {
        Self {
            config: LogConfig::default(),
            instances: Vec::new(),
            registry: TransportRegistry::with_builtins(),
            defaults: None,
            reporter: None,
        }
    }

    /// Replace the whole instance configuration
    #[must_use]
    pub fn config(mut self, config: LogConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn transport(mut self, descriptor: TransportDescriptor) -> Self {
        self.config.transports.push(descriptor);
        self
    }

    /// Add an already constructed transport, bypassing the registry.
    #[must_use]
    pub fn transport_instance(mut self, transport: impl Transport + 'static) -> Self {
        self.instances.push(Box::new(transport));
        self
    }

    #[must_use]
    pub fn registry(mut self, registry: TransportRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Register an extra transport kind on the current registry
    #[must_use]
    pub fn register<F>(mut self, kind: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&Meta) -> Result<Box<dyn Transport>> + Send + Sync + 'static,
    {
        self.registry.register(kind, factory);
        self
    }

    #[must_use]
    pub fn defaults(mut self, defaults: &'a mut Defaults) -> Self {
        self.defaults = Some(defaults);
        self
    }

    #[must_use]
    pub fn meta(mut self, meta: Meta) -> Self {
        self.config.meta = meta;
        self
    }

    #[must_use]
    pub fn opts(mut self, opts: RecordOptions) -> Self {
        self.config.opts = opts;
        self
    }

    #[must_use]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = Some(level);
        self
    }

    #[must_use]
    pub fn sentry(mut self, sentry: SentryConfig) -> Self {
        self.config.sentry = Some(sentry);
        self
    }

    #[must_use]
    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.config.environment = Some(environment.into());
        self
    }

    /// Use a custom reporter instead of the one described by the sentry config
    #[must_use]
    pub fn error_reporter(mut self, reporter: Box<dyn ErrorReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn build(self) -> Result<Log> {
        let LogBuilder {
            config,
            instances,
            registry,
            defaults,
            reporter,
        } = self;

        let (default_transports, default_level, default_meta, default_opts) = match defaults {
            Some(defaults) => (
                defaults.take_transports(),
                defaults.logger.level,
                defaults.meta.clone(),
                defaults.opts.clone(),
            ),
            None => (None, None, Meta::new(), RecordOptions::default()),
        };

        let descriptors = if config.transports.is_empty() && instances.is_empty() {
            default_transports.unwrap_or_default()
        } else {
            config.transports
        };

        let mut transports = registry.resolve_all(&descriptors)?;
        transports.extend(instances);
        if transports.is_empty() {
            return Err(LoggerError::config("transports", "No transports found"));
        }

        let level = config.level.or(default_level).unwrap_or_default();
        let meta = default_meta.merged_with(&config.meta);
        let opts = config.opts.merged_over(&default_opts);

        let reporter = match reporter {
            Some(reporter) => reporter,
            None => reporter_from_config(config.sentry.as_ref())?,
        };
        let partitioner = Partitioner::new(resolve_env(config.environment.as_deref()));

        Ok(Log {
            dispatcher: Arc::new(Dispatcher::new(
                TransportSet::new(transports, level),
                reporter,
                partitioner,
                meta,
                opts,
            )),
        })
    }
}

impl Default for LogBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}
