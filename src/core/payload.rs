//! Per-call payload: metadata, an error, or both
//!
//! Logging methods take a message plus anything convertible into [`LogPayload`].
//! An error handed over where metadata would go is recognised through the
//! [`ErrorLike`] capability and treated as the error, with metadata absent:
//!
//! ```
//! use structured_log_facade::{LogPayload, Meta};
//!
//! let err = std::io::Error::new(std::io::ErrorKind::Other, "dangit");
//!
//! let only_error = LogPayload::from(&err);
//! assert!(only_error.meta().is_none());
//! assert!(only_error.error().is_some());
//!
//! let both = LogPayload::from((Meta::new().with_field("user", 7), &err));
//! assert!(both.meta().is_some() && both.error().is_some());
//! ```

use super::metadata::Meta;
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;

/// Anything exposing an error shape: a message and, optionally, a stack.
pub trait ErrorLike {
    /// Short type name, e.g. `Error` or `ParseIntError`
    fn error_kind(&self) -> String;

    fn error_message(&self) -> String;

    /// Multi-line trace; `None` when the value carries none
    fn error_stack(&self) -> Option<String>;
}

impl<E: StdError + ?Sized> ErrorLike for E {
    fn error_kind(&self) -> String {
        short_type_name(std::any::type_name::<E>())
    }

    fn error_message(&self) -> String {
        self.to_string()
    }

    /// The error followed by its `source()` chain, one cause per line.
    fn error_stack(&self) -> Option<String> {
        let mut stack = format!("{}: {}", self.error_kind(), self);
        let mut source = self.source();
        while let Some(cause) = source {
            stack.push_str("\n    caused by: ");
            stack.push_str(&cause.to_string());
            source = cause.source();
        }
        Some(stack)
    }
}

fn short_type_name(full: &str) -> String {
    // trait objects carry no concrete name
    if full.starts_with("dyn ") {
        return "Error".to_string();
    }
    let base = full.split('<').next().unwrap_or(full);
    match base.rsplit("::").next() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => "Error".to_string(),
    }
}

/// Error fields captured from an error-like value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorDetails {
    /// Error with a message and no stack
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            kind: "Error".to_string(),
            message: message.into(),
            stack: None,
        }
    }

    pub fn capture<E: ErrorLike + ?Sized>(error: &E) -> Self {
        Self {
            kind: error.error_kind(),
            message: error.error_message(),
            stack: error.error_stack(),
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    #[must_use]
    pub fn without_stack(mut self) -> Self {
        self.stack = None;
        self
    }
}

impl ErrorLike for ErrorDetails {
    fn error_kind(&self) -> String {
        self.kind.clone()
    }

    fn error_message(&self) -> String {
        self.message.clone()
    }

    fn error_stack(&self) -> Option<String> {
        self.stack.clone()
    }
}

impl<E: StdError + ?Sized> From<&E> for ErrorDetails {
    fn from(error: &E) -> Self {
        ErrorDetails::capture(error)
    }
}

/// What accompanies the message of one logging call
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LogPayload {
    #[default]
    Empty,
    Meta(Meta),
    Error(ErrorDetails),
    Both { meta: Meta, error: ErrorDetails },
}

impl LogPayload {
    pub fn meta(&self) -> Option<&Meta> {
        match self {
            LogPayload::Meta(meta) | LogPayload::Both { meta, .. } => Some(meta),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorDetails> {
        match self {
            LogPayload::Error(error) | LogPayload::Both { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Split into the optional metadata and the optional error.
    pub fn into_parts(self) -> (Option<Meta>, Option<ErrorDetails>) {
        match self {
            LogPayload::Empty => (None, None),
            LogPayload::Meta(meta) => (Some(meta), None),
            LogPayload::Error(error) => (None, Some(error)),
            LogPayload::Both { meta, error } => (Some(meta), Some(error)),
        }
    }
}

impl From<()> for LogPayload {
    fn from(_: ()) -> Self {
        LogPayload::Empty
    }
}

impl From<Meta> for LogPayload {
    fn from(meta: Meta) -> Self {
        LogPayload::Meta(meta)
    }
}

impl From<Option<Meta>> for LogPayload {
    fn from(meta: Option<Meta>) -> Self {
        meta.map_or(LogPayload::Empty, LogPayload::Meta)
    }
}

impl From<ErrorDetails> for LogPayload {
    fn from(error: ErrorDetails) -> Self {
        LogPayload::Error(error)
    }
}

impl<E: StdError + ?Sized> From<&E> for LogPayload {
    fn from(error: &E) -> Self {
        LogPayload::Error(ErrorDetails::capture(error))
    }
}

impl From<(Meta, ErrorDetails)> for LogPayload {
    fn from((meta, error): (Meta, ErrorDetails)) -> Self {
        LogPayload::Both { meta, error }
    }
}

impl<E: StdError + ?Sized> From<(Meta, &E)> for LogPayload {
    fn from((meta, error): (Meta, &E)) -> Self {
        LogPayload::Both {
            meta,
            error: ErrorDetails::capture(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Outer {
        inner: std::io::Error,
    }

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "outer failure")
        }
    }

    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.inner)
        }
    }

    #[test]
    fn test_capture_std_error() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "dangit");
        let details = ErrorDetails::capture(&err);

        assert_eq!(details.kind, "Error");
        assert_eq!(details.message, "dangit");
        assert_eq!(details.stack.as_deref(), Some("Error: dangit"));
    }

    #[test]
    fn test_stack_includes_source_chain() {
        let err = Outer {
            inner: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        let details = ErrorDetails::capture(&err);

        assert_eq!(details.kind, "Outer");
        let stack = details.stack.unwrap();
        assert!(stack.starts_with("Outer: outer failure"));
        assert!(stack.contains("caused by: missing"));
    }

    #[test]
    fn test_details_without_stack() {
        let details = ErrorDetails::new("plain");
        assert!(details.stack.is_none());
        assert!(ErrorDetails::capture(&details).stack.is_none());
    }

    #[test]
    fn test_error_in_meta_slot_is_the_error() {
        let err: Box<dyn StdError> = "boxed".into();
        let payload = LogPayload::from(&*err);

        let (meta, error) = payload.into_parts();
        assert!(meta.is_none());
        assert_eq!(error.unwrap().message, "boxed");
    }

    #[test]
    fn test_meta_and_error() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "dangit");
        let payload = LogPayload::from((Meta::new().with_field("k", "v"), &err));

        assert_eq!(payload.meta().unwrap().get_str("k"), Some("v"));
        assert_eq!(payload.error().unwrap().message, "dangit");
    }

    #[test]
    fn test_unit_is_empty() {
        assert_eq!(LogPayload::from(()), LogPayload::Empty);
        assert_eq!(LogPayload::from(None::<Meta>), LogPayload::Empty);
    }
}
