//! Request-logging middleware
//!
//! Wraps a synchronous handler over `http::Request` / `http::Response` and writes
//! one entry per request through a [`Log`].

use crate::core::{ErrorDetails, Log, LogLevel, LogPayload, Meta};
use http::{Request, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Instant;

pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Header copied into the entry when present
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Settings applied to every entry the middleware writes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MiddlewareConfig {
    /// Free-form tag such as `"server"` or `"client"`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub meta: Meta,
    /// Leave `errStack` out of entries for failed requests
    pub err_no_stack: bool,
    /// Log 404 responses at `info` instead of `warning`
    pub info404: bool,
}

impl MiddlewareConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    #[must_use]
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    #[must_use]
    pub fn with_err_no_stack(mut self, err_no_stack: bool) -> Self {
        self.err_no_stack = err_no_stack;
        self
    }

    #[must_use]
    pub fn with_info404(mut self, info404: bool) -> Self {
        self.info404 = info404;
        self
    }
}

#[derive(Debug, Clone)]
pub struct RequestLogger {
    log: Log,
    config: MiddlewareConfig,
}

impl RequestLogger {
    pub fn new(log: Log, config: MiddlewareConfig) -> Self {
        Self { log, config }
    }

    pub fn config(&self) -> &MiddlewareConfig {
        &self.config
    }

    /// Level for a completed response
    pub fn level_for(&self, status: StatusCode) -> LogLevel {
        if status.is_server_error() {
            LogLevel::Error
        } else if status == StatusCode::NOT_FOUND {
            if self.config.info404 {
                LogLevel::Info
            } else {
                LogLevel::Warning
            }
        } else if status.is_client_error() {
            LogLevel::Warning
        } else {
            LogLevel::Info
        }
    }

    /// Run `next` and log the outcome.
    ///
    /// A handler error is logged at `error` with the error attached, then
    /// returned to the caller. If writing that entry fails, the failure goes
    /// to stderr and the handler error is still the result. Logging failures
    /// after a successful handler are returned.
    pub fn call<B, R, F>(
        &self,
        request: &Request<B>,
        response: &mut Response<R>,
        next: F,
    ) -> Result<(), HandlerError>
    where
        F: FnOnce(&Request<B>, &mut Response<R>) -> Result<(), HandlerError>,
    {
        let started = Instant::now();
        let outcome = next(request, response);
        let mut meta = self.request_meta(request);
        meta.add_field("durationMs", started.elapsed().as_secs_f64() * 1000.0);

        match outcome {
            Ok(()) => {
                let status = response.status();
                meta.add_field("status", status.as_u16());
                let message = format!("{} {} {}", request.method(), request.uri(), status.as_u16());
                self.log.log(self.level_for(status), message, meta)?;
                Ok(())
            }
            Err(error) => {
                let mut details = ErrorDetails::capture(error.as_ref());
                if self.config.err_no_stack {
                    details = details.without_stack();
                }
                let message = format!("{} {} failed", request.method(), request.uri());
                if let Err(e) = self
                    .log
                    .log(LogLevel::Error, message, LogPayload::Both { meta, error: details })
                {
                    eprintln!("[LOGGER ERROR] Failed to log request failure: {}", e);
                }
                Err(error)
            }
        }
    }

    fn request_meta<B>(&self, request: &Request<B>) -> Meta {
        let mut meta = self.config.meta.clone();
        if let Some(kind) = &self.config.kind {
            meta.add_field("type", kind.as_str());
        }
        meta.add_field("method", request.method().as_str());
        meta.add_field("url", request.uri().to_string());
        if let Some(id) = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
        {
            meta.add_field("requestId", id);
        }
        meta
    }
}
