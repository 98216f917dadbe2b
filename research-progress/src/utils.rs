//! Tolerant readers over opaque JSON payloads
//!
//! Every reader returns `None` (or an empty collection) for missing or
//! mistyped fields. Empty strings count as missing so callers can chain
//! fallbacks with `or_else`.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Non-empty string field
pub fn get_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key)?.as_str().filter(|s| !s.is_empty())
}

pub fn get_bool(value: &Value, key: &str) -> Option<bool> {
    value.get(key)?.as_bool()
}

pub fn get_array<'a>(value: &'a Value, key: &str) -> Option<&'a [Value]> {
    value.get(key)?.as_array().map(Vec::as_slice)
}

/// First of `keys` present on `value` with a non-null value
pub fn first_present<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| value.get(*key))
        .find(|v| !v.is_null())
}

/// Render a scalar as text: strings verbatim, numbers in decimal
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn get_text(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(scalar_text)
}

/// Text of a query entry: either a bare string or an object with a `query` field
pub fn query_text(item: &Value) -> Option<String> {
    match item {
        Value::Object(_) => get_str(item, "query").map(str::to_string),
        other => scalar_text(other),
    }
}

/// Queries from a field holding either a list or a single string
pub fn get_query_list(value: &Value, key: &str) -> Vec<String> {
    match value.get(key) {
        Some(Value::Array(items)) => items.iter().filter_map(query_text).collect(),
        Some(other) => query_text(other).into_iter().collect(),
        None => Vec::new(),
    }
}

/// Zero-based index; negative, fractional or mistyped values read as `None`
pub fn as_index(raw: &Value) -> Option<usize> {
    raw.as_u64()
        .or_else(|| {
            raw.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        })
        .and_then(|n| usize::try_from(n).ok())
}

/// RFC 3339 `timestamp` field
pub fn get_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let raw = get_str(value, "timestamp")?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}
