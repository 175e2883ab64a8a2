//! Request logging example
//!
//! Demonstrates the request-logging middleware around a plain handler, and
//! Sentry reporting when `SENTRY_DSN` is set.
//!
//! Run with: cargo run --example request_logging

use http::{Request, Response, StatusCode};
use structured_log_facade::middleware::HandlerError;
use structured_log_facade::prelude::*;

fn handler(request: &Request<()>, response: &mut Response<()>) -> std::result::Result<(), HandlerError> {
    match request.uri().path() {
        "/" => Ok(()),
        "/missing" => {
            *response.status_mut() = StatusCode::NOT_FOUND;
            Ok(())
        }
        _ => Err("handler exploded".into()),
    }
}

fn main() -> std::result::Result<(), HandlerError> {
    println!("=== Structured Log Facade - Request Logging Example ===\n");

    let mut builder = Log::builder()
        .transport(TransportDescriptor::new("Console", Meta::new()))
        .environment("example");
    if let Ok(dsn) = std::env::var("SENTRY_DSN") {
        builder = builder.sentry(SentryConfig::new(dsn));
    }
    let log = builder.build()?;
    println!("Error reporting enabled: {}\n", log.reporting_enabled());

    let middleware = log.middleware(
        MiddlewareConfig::new()
            .with_kind("server")
            .with_meta(Meta::new().with_field("app", "request-demo"))
            .with_info404(true),
    );

    for path in ["/", "/missing", "/boom"] {
        let request = Request::builder()
            .uri(path)
            .header("x-request-id", format!("req-{}", path.len()))
            .body(())?;
        let mut response = Response::new(());

        if let Err(e) = middleware.call(&request, &mut response, handler) {
            println!("   handler failed: {}", e);
        }
    }

    log.flush()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
