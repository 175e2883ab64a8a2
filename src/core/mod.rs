//! Core logger types and traits

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metadata;
pub mod output_format;
pub mod partition;
pub mod payload;
pub mod record;
pub mod registry;
pub mod reporter;
pub mod timestamp;
pub mod transport;

pub use config::{
    Defaults, LogConfig, LoggerOptions, RecordOptions, SentryConfig, SentryOptions,
    TransportDescriptor,
};
pub use dispatcher::Dispatcher;
pub use error::{LoggerError, Result};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::{Log, LogBuilder, DEFAULT_FLUSH_TIMEOUT};
pub use metadata::Meta;
pub use output_format::OutputFormat;
pub use partition::{resolve_env, ErrorReport, Partitioner, ENV_VAR, FALLBACK_ENV, RESERVED_KEYS};
pub use payload::{ErrorDetails, ErrorLike, LogPayload};
pub use record::{LogRecord, ERR_MSG_KEY, ERR_STACK_KEY};
pub use registry::{TransportFactory, TransportRegistry};
#[cfg(feature = "sentry")]
pub use reporter::SentryReporter;
pub use reporter::{reporter_from_config, DisabledReporter, ErrorReporter};
pub use timestamp::TimestampFormat;
pub use transport::{Transport, TransportSet};
