//! Error types for the logging facade

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Transport kind not present in the registry
    #[error("Unknown transport kind '{kind}'")]
    UnknownTransport { kind: String },

    /// Transport write or flush failure
    #[error("Transport '{transport}' failed: {message}")]
    TransportError { transport: String, message: String },

    /// Error-reporting client failure
    #[error("Error reporter failed: {0}")]
    ReporterError(String),

    /// Formatter error with format type
    #[error("Formatter error ({format_type}): {message}")]
    FormatterError {
        format_type: String,
        message: String,
    },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn unknown_transport(kind: impl Into<String>) -> Self {
        LoggerError::UnknownTransport { kind: kind.into() }
    }

    /// Create a transport error
    pub fn transport(transport: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::TransportError {
            transport: transport.into(),
            message: message.into(),
        }
    }

    pub fn reporter<S: Into<String>>(msg: S) -> Self {
        LoggerError::ReporterError(msg.into())
    }

    /// Create a formatter error
    pub fn formatter(format_type: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FormatterError {
            format_type: format_type.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }

    /// Whether this error was raised while building a logger.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LoggerError::InvalidConfiguration { .. } | LoggerError::UnknownTransport { .. }
        )
    }
}
