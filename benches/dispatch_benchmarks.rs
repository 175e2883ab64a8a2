//! Criterion benchmarks for structured_log_facade

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use structured_log_facade::core::Partitioner;
use structured_log_facade::prelude::*;

/// Transport that discards everything, so only dispatch cost is measured
struct NullTransport;

impl Transport for NullTransport {
    fn log(&mut self, entry: &LogEntry) -> Result<()> {
        black_box(entry);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

fn null_log(level: LogLevel) -> Log {
    Log::builder()
        .transport_instance(NullTransport)
        .meta(Meta::new().with_field("service", "bench"))
        .level(level)
        .build()
        .expect("Failed to build logger")
}

// ============================================================================
// Dispatch Benchmarks
// ============================================================================

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(1));

    let log = null_log(LogLevel::Debug);

    group.bench_function("message_only", |b| {
        b.iter(|| log.info(black_box("request handled"), ()).unwrap());
    });

    group.bench_function("with_meta", |b| {
        b.iter(|| {
            let meta = Meta::new().with_field("user_id", 42).with_field("path", "/orders");
            log.info(black_box("request handled"), meta).unwrap()
        });
    });

    group.bench_function("with_error", |b| {
        let error = ErrorDetails::new("connection reset").with_stack("io: connection reset");
        b.iter(|| {
            let meta = Meta::new().with_field("attempt", 3);
            log.error(black_box("upstream failed"), (meta, error.clone())).unwrap()
        });
    });

    group.finish();
}

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");

    let log = null_log(LogLevel::Warning);

    group.bench_function("filtered", |b| {
        b.iter(|| log.debug(black_box("never written"), ()).unwrap());
    });

    group.bench_function("passed", |b| {
        b.iter(|| log.crit(black_box("always written"), ()).unwrap());
    });

    group.finish();
}

// ============================================================================
// Partition Benchmarks
// ============================================================================

fn bench_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition");

    let partitioner = Partitioner::new("bench");
    let meta = Meta::new()
        .with_field("tags", serde_json::json!({"team": "core"}))
        .with_field("fingerprint", serde_json::json!(["a", "b"]))
        .with_field("order", 7)
        .with_field("customer", "acme");

    group.bench_function("absent_meta", |b| {
        b.iter(|| black_box(partitioner.partition(None)));
    });

    group.bench_function("full_meta", |b| {
        b.iter(|| black_box(partitioner.partition(Some(black_box(&meta)))));
    });

    group.finish();
}

// ============================================================================
// Formatting Benchmarks
// ============================================================================

fn bench_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatting");

    let entry = LogEntry::new(LogLevel::Info, "formatted entry").with_meta(
        Meta::new()
            .with_field("user_id", 42)
            .with_field("query", "SELECT 1"),
    );
    let timestamp = TimestampFormat::Iso8601;

    for (name, format) in [
        ("text", OutputFormat::Text),
        ("json", OutputFormat::Json),
        ("logfmt", OutputFormat::Logfmt),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| black_box(format.format(&entry, &timestamp)));
        });
    }

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_dispatch,
    bench_level_filtering,
    bench_partition,
    bench_formatting
);

criterion_main!(benches);
