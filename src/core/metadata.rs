//! Structured metadata attached to log records
//!
//! `Meta` is an ordered string-keyed mapping of arbitrary JSON values. It is the
//! currency of the whole pipeline: default metadata, per-call metadata, transport
//! options and the error report all use it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meta {
    fields: Map<String, Value>,
}

impl Meta {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self { fields: Map::new() }
    }

    /// Add a field (builder form)
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a field (mutable version)
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.fields.get(key).and_then(Value::as_bool)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    /// Shallow merge: keys from `other` overwrite keys already present.
    pub fn merge(&mut self, other: &Meta) {
        for (key, value) in other.fields.iter() {
            self.fields.insert(key.clone(), value.clone());
        }
    }

    /// Copy of `self` overlaid with `overrides`.
    #[must_use]
    pub fn merged_with(&self, overrides: &Meta) -> Meta {
        let mut merged = self.clone();
        merged.merge(overrides);
        merged
    }

    /// Copy of `self` without the given keys. `self` is left untouched.
    #[must_use]
    pub fn without_keys(&self, keys: &[&str]) -> Meta {
        let fields = self
            .fields
            .iter()
            .filter(|(key, _)| !keys.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Meta { fields }
    }

    /// Nested mapping stored under `key`, if the value is an object
    pub fn get_object(&self, key: &str) -> Option<Meta> {
        match self.fields.get(key) {
            Some(Value::Object(map)) => Some(Meta { fields: map.clone() }),
            _ => None,
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Format fields as key=value pairs on a single line
    pub fn format_fields(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| match v {
                Value::String(s) => format!("{}={}", escape_control(k), escape_control(s)),
                other => format!("{}={}", escape_control(k), other),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

/// Replace line breaks, tabs and other control characters with escape
/// sequences so that text output keeps one entry per line.
pub(crate) fn escape_control(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c.is_control() => escaped.push_str(&format!("\\u{{{:04x}}}", c as u32)),
            c => escaped.push(c),
        }
    }
    escaped
}

impl fmt::Display for Meta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}

impl From<Map<String, Value>> for Meta {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl From<Meta> for Value {
    fn from(meta: Meta) -> Self {
        meta.into_value()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Meta {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let fields = iter
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self { fields }
    }
}

impl TryFrom<Value> for Meta {
    type Error = Value;

    /// Succeeds only for JSON objects; any other value is handed back.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_meta_creation() {
        let meta = Meta::new();
        assert!(meta.is_empty());
    }

    #[test]
    fn test_meta_with_fields() {
        let meta = Meta::new()
            .with_field("user_id", 123)
            .with_field("username", "john_doe")
            .with_field("active", true);

        assert_eq!(meta.len(), 3);
        assert_eq!(meta.get_str("username"), Some("john_doe"));
        assert_eq!(meta.get_bool("active"), Some(true));
    }

    #[test]
    fn test_merge_later_keys_win() {
        let mut meta = Meta::new().with_field("a", 1).with_field("b", 1);
        meta.merge(&Meta::new().with_field("b", 2).with_field("c", 2));

        assert_eq!(meta.get("a"), Some(&json!(1)));
        assert_eq!(meta.get("b"), Some(&json!(2)));
        assert_eq!(meta.get("c"), Some(&json!(2)));
    }

    #[test]
    fn test_without_keys_leaves_source_intact() {
        let meta = Meta::new()
            .with_field("tags", json!({"k": "v"}))
            .with_field("keep", "yes");

        let stripped = meta.without_keys(&["tags"]);

        assert!(!stripped.contains_key("tags"));
        assert!(stripped.contains_key("keep"));
        assert!(meta.contains_key("tags"));
    }

    #[test]
    fn test_format_fields() {
        let meta = Meta::new().with_field("key1", "value1").with_field("key2", 42);

        let formatted = meta.format_fields();
        assert!(formatted.contains("key1=value1"));
        assert!(formatted.contains("key2=42"));
    }

    #[test]
    fn test_format_fields_stays_on_one_line() {
        let meta = Meta::new()
            .with_field("errStack", "Outer: outer\n    caused by: inner")
            .with_field("raw", "a\tb\rc\u{7}");

        let formatted = meta.format_fields();
        assert_eq!(formatted.lines().count(), 1);
        assert!(formatted.contains("errStack=Outer: outer\\n    caused by: inner"));
        assert!(formatted.contains("raw=a\\tb\\rc\\u{0007}"));
    }

    #[test]
    fn test_escape_control_leaves_plain_text() {
        assert_eq!(escape_control("plain text"), "plain text");
    }

    #[test]
    fn test_try_from_value() {
        assert!(Meta::try_from(json!({"a": 1})).is_ok());
        assert_eq!(Meta::try_from(json!("x")), Err(json!("x")));
    }
}
