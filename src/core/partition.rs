//! Metadata partitioning for error reports
//!
//! Splits caller metadata into the shape an error tracker expects:
//!
//! - `tags`: `{env: <resolved>}` overlaid with the caller's `meta.tags`
//! - `extra`: the caller's metadata minus the reserved keys
//! - `fingerprint`, `level`: passed through when the caller set them
//!
//! The input is only ever borrowed; the report is a fresh structure.
//!
//! # Example
//!
//! ```
//! use structured_log_facade::core::partition::Partitioner;
//! use structured_log_facade::Meta;
//! use serde_json::json;
//!
//! let partitioner = Partitioner::new("test");
//! let meta = Meta::new()
//!     .with_field("tags", json!({"k": "v"}))
//!     .with_field("fingerprint", "fp")
//!     .with_field("user", 7);
//!
//! let report = partitioner.partition(Some(&meta));
//! assert_eq!(report.tags.get_str("env"), Some("test"));
//! assert_eq!(report.tags.get_str("k"), Some("v"));
//! assert_eq!(report.fingerprint, Some(json!("fp")));
//! assert!(report.extra.contains_key("user"));
//! assert!(!report.extra.contains_key("tags"));
//! ```

use super::metadata::Meta;
use serde::Serialize;
use serde_json::Value;

/// Environment tag used when neither the caller nor the process supplies one
pub const FALLBACK_ENV: &str = "development";

/// Process environment variable consulted for the default `env` tag
pub const ENV_VAR: &str = "APP_ENV";

/// Keys lifted out of `extra` into dedicated report fields
pub const RESERVED_KEYS: [&str; 3] = ["tags", "fingerprint", "level"];

/// Error-report payload derived from one call's metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    pub tags: Meta,
    pub extra: Meta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<Value>,
    /// Severity hint for the error tracker, distinct from the record's own level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<Value>,
}

/// Resolve the default environment: explicit value, then `APP_ENV`, then
/// [`FALLBACK_ENV`].
pub fn resolve_env(explicit: Option<&str>) -> String {
    explicit
        .filter(|env| !env.is_empty())
        .map(str::to_string)
        .or_else(|| std::env::var(ENV_VAR).ok().filter(|env| !env.is_empty()))
        .unwrap_or_else(|| FALLBACK_ENV.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partitioner {
    env: String,
}

impl Partitioner {
    pub fn new(env: impl Into<String>) -> Self {
        Self { env: env.into() }
    }

    /// Partitioner whose default `env` comes from the process environment
    pub fn from_env() -> Self {
        Self::new(resolve_env(None))
    }

    pub fn env(&self) -> &str {
        &self.env
    }

    pub fn partition(&self, meta: Option<&Meta>) -> ErrorReport {
        let empty = Meta::new();
        let meta = meta.unwrap_or(&empty);

        let mut tags = Meta::new().with_field("env", self.env.as_str());
        // non-object tags carry nothing mergeable
        if let Some(caller_tags) = meta.get_object("tags") {
            tags.merge(&caller_tags);
        }

        ErrorReport {
            tags,
            extra: meta.without_keys(&RESERVED_KEYS),
            fingerprint: meta.get("fingerprint").cloned(),
            level: meta.get("level").cloned(),
        }
    }
}

impl Default for Partitioner {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn partitioner() -> Partitioner {
        Partitioner::new("test")
    }

    #[test]
    fn test_absent_meta() {
        let report = partitioner().partition(None);

        assert!(report.extra.is_empty());
        assert_eq!(report.tags, Meta::new().with_field("env", "test"));
        assert!(report.fingerprint.is_none());
        assert!(report.level.is_none());
    }

    #[test]
    fn test_tags_merged_with_env() {
        let input = Meta::new().with_field("tags", json!({"key1": "value1", "key2": "value2"}));
        let before = input.clone();

        let report = partitioner().partition(Some(&input));

        assert_eq!(report.tags.get_str("key1"), Some("value1"));
        assert_eq!(report.tags.get_str("key2"), Some("value2"));
        assert_eq!(report.tags.get_str("env"), Some("test"));
        assert_eq!(input, before);
    }

    #[test]
    fn test_explicit_env_wins() {
        let input = Meta::new().with_field("tags", json!({"env": "production"}));
        let report = partitioner().partition(Some(&input));
        assert_eq!(report.tags.get_str("env"), Some("production"));
    }

    #[test]
    fn test_reserved_keys_excluded_from_extra() {
        let input = Meta::new()
            .with_field("level", "error")
            .with_field("tags", "tagsValue")
            .with_field("fingerprint", "fingerprintValue")
            .with_field("key1", "value1")
            .with_field("key2", "value2");

        let report = partitioner().partition(Some(&input));

        assert!(!report.extra.contains_key("level"));
        assert!(!report.extra.contains_key("tags"));
        assert!(!report.extra.contains_key("fingerprint"));
        assert_eq!(report.extra.get_str("key1"), Some("value1"));
        assert_eq!(report.extra.get_str("key2"), Some("value2"));
        assert_eq!(report.fingerprint, Some(json!("fingerprintValue")));
        assert_eq!(report.level, Some(json!("error")));
        // scalar tags are dropped, env stays
        assert_eq!(report.tags, Meta::new().with_field("env", "test"));
    }

    #[test]
    fn test_empty_meta_gets_env_tag() {
        let report = partitioner().partition(Some(&Meta::new()));
        assert!(report.extra.is_empty());
        assert_eq!(report.tags.get_str("env"), Some("test"));
    }

    #[test]
    fn test_resolve_env_prefers_explicit() {
        assert_eq!(resolve_env(Some("staging")), "staging");
    }

    #[test]
    fn test_resolve_env_skips_empty_explicit() {
        assert!(!resolve_env(Some("")).is_empty());
        assert_eq!(resolve_env(Some("")), resolve_env(None));
    }

    #[test]
    fn test_report_serialization_omits_absent_fields() {
        let report = partitioner().partition(None);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json, json!({"tags": {"env": "test"}, "extra": {}}));
    }
}
