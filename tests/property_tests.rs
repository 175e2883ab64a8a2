//! Property-based tests for structured_log_facade using proptest

use proptest::prelude::*;
use serde_json::Value;
use structured_log_facade::core::{Partitioner, RESERVED_KEYS};
use structured_log_facade::prelude::*;

fn any_level() -> impl Strategy<Value = LogLevel> {
    (0u8..8).prop_map(|rank| LogLevel::from_rank(rank).unwrap())
}

fn json_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z0-9 ]{0,12}".prop_map(Value::from),
    ]
}

fn any_meta() -> impl Strategy<Value = Meta> {
    prop::collection::btree_map(
        prop_oneof![
            Just("tags".to_string()),
            Just("fingerprint".to_string()),
            Just("level".to_string()),
            "[a-z]{1,8}",
        ],
        json_leaf(),
        0..8,
    )
    .prop_map(|fields| fields.into_iter().collect())
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Test that LogLevel string conversions roundtrip correctly
    #[test]
    fn test_log_level_str_roundtrip(level in any_level()) {
        let parsed: LogLevel = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
        prop_assert_eq!(LogLevel::from_rank(level.rank()), Some(level));
    }

    /// Test that LogLevel ordering follows the numeric rank
    #[test]
    fn test_log_level_ordering(level1 in any_level(), level2 in any_level()) {
        prop_assert_eq!(level1 <= level2, level1.rank() <= level2.rank());
        prop_assert_eq!(level1.is_enabled_for(level2), level1.rank() <= level2.rank());
    }

    /// Test that parsing is case-insensitive
    #[test]
    fn test_log_level_case_insensitive(level in any_level()) {
        let upper: LogLevel = level.to_str().to_uppercase().parse().unwrap();
        prop_assert_eq!(level, upper);
    }
}

// ============================================================================
// Partitioner Tests
// ============================================================================

proptest! {
    /// Partitioning never changes the caller's meta
    #[test]
    fn test_partition_leaves_input_untouched(meta in any_meta()) {
        let before = meta.clone();
        let _ = Partitioner::new("test").partition(Some(&meta));
        prop_assert_eq!(before, meta);
    }

    /// Reserved keys never leak into `extra`, everything else does
    #[test]
    fn test_extra_excludes_reserved(meta in any_meta()) {
        let report = Partitioner::new("test").partition(Some(&meta));

        for key in RESERVED_KEYS {
            prop_assert!(!report.extra.contains_key(key));
        }
        for (key, value) in meta.iter() {
            if !RESERVED_KEYS.contains(&key.as_str()) {
                prop_assert_eq!(report.extra.get(key), Some(value));
            }
        }
        prop_assert_eq!(report.fingerprint.as_ref(), meta.get("fingerprint"));
        prop_assert_eq!(report.level.as_ref(), meta.get("level"));
    }

    /// The default env tag is always present unless the caller sets one
    #[test]
    fn test_env_tag(env in "[a-z]{1,10}", caller_env in proptest::option::of("[a-z]{1,10}")) {
        let mut meta = Meta::new();
        if let Some(caller_env) = &caller_env {
            meta.add_field("tags", serde_json::json!({ "env": caller_env }));
        }

        let report = Partitioner::new(env.clone()).partition(Some(&meta));
        let expected = caller_env.unwrap_or(env);
        prop_assert_eq!(report.tags.get_str("env"), Some(expected.as_str()));
    }
}

// ============================================================================
// Meta Tests
// ============================================================================

proptest! {
    /// Later merges win on key collisions
    #[test]
    fn test_merge_later_wins(base in any_meta(), overrides in any_meta()) {
        let merged = base.merged_with(&overrides);

        for (key, value) in overrides.iter() {
            prop_assert_eq!(merged.get(key), Some(value));
        }
        for (key, value) in base.iter() {
            if !overrides.contains_key(key) {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }
    }
}

// ============================================================================
// Dispatch Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A record reaches a transport exactly when its level passes the threshold
    #[test]
    fn test_threshold_filtering(threshold in any_level(), level in any_level()) {
        let memory = MemoryTransport::new();
        let log = Log::builder()
            .transport_instance(memory.clone())
            .level(threshold)
            .build()
            .unwrap();

        log.log(level, "threshold check", ()).unwrap();

        prop_assert_eq!(memory.len(), usize::from(level.rank() <= threshold.rank()));
    }

    /// Messages reach transports unchanged, and text rendering stays on one line
    #[test]
    fn test_messages_verbatim_and_text_single_line(message in "[a-z\n\r\t ]{0,40}") {
        let memory = MemoryTransport::new();
        let log = Log::builder().transport_instance(memory.clone()).build().unwrap();

        log.info(message.clone(), ()).unwrap();

        let entry = &memory.records()[0];
        prop_assert_eq!(&entry.message, &message);

        for format in [OutputFormat::Text, OutputFormat::Logfmt, OutputFormat::Json] {
            let rendered = format.format(entry, &TimestampFormat::Iso8601);
            prop_assert!(!rendered.contains('\n'));
            prop_assert!(!rendered.contains('\r'));
        }
    }
}
