//! Encoding of persisted values.
//!
//! Counters are decimal strings; sets are JSON objects mapping each member to
//! `true`. Malformed values never fail a read: they decode as zero or empty
//! and a warning is logged.

use serde_json::{Map, Value};
use std::collections::BTreeSet;
use tracing::warn;

use crate::error::Result;

/// Decode a stored counter. Any finite non-negative number is accepted
/// (fractions truncate); anything else is 0.
pub fn parse_counter(key: &str, raw: Option<&str>) -> u64 {
    let Some(raw) = raw else { return 0 };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0;
    }
    if let Ok(n) = trimmed.parse::<u64>() {
        return n;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => n.trunc() as u64,
        _ => {
            warn!("Ignoring non-numeric value for {}: {:?}", key, raw);
            0
        }
    }
}

pub fn encode_counter(value: u64) -> String {
    value.to_string()
}

/// Decode a `{"member": true}` object. Members mapped to `false` or `null`
/// are not in the set.
pub fn decode_flag_set(key: &str, raw: Option<&str>) -> BTreeSet<String> {
    let Some(raw) = raw else {
        return BTreeSet::new();
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map
            .into_iter()
            .filter(|(_, v)| is_truthy(v))
            .map(|(k, _)| k)
            .collect(),
        Ok(_) | Err(_) => {
            warn!("Ignoring malformed set for {}", key);
            BTreeSet::new()
        }
    }
}

pub fn encode_flag_set<'a, I>(members: I) -> Result<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let map: Map<String, Value> = members
        .into_iter()
        .map(|m| (m.clone(), Value::Bool(true)))
        .collect();
    Ok(serde_json::to_string(&Value::Object(map))?)
}

/// Decode a stored JSON boolean; anything else is `None`
pub fn decode_bool(raw: Option<&str>) -> Option<bool> {
    match serde_json::from_str::<Value>(raw?) {
        Ok(Value::Bool(b)) => Some(b),
        _ => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_counter() {
        assert_eq!(parse_counter("k", None), 0);
        assert_eq!(parse_counter("k", Some("12")), 12);
        assert_eq!(parse_counter("k", Some(" 7 ")), 7);
        assert_eq!(parse_counter("k", Some("4.9")), 4);
        assert_eq!(parse_counter("k", Some("")), 0);
        assert_eq!(parse_counter("k", Some("abc")), 0);
        assert_eq!(parse_counter("k", Some("-3")), 0);
        assert_eq!(parse_counter("k", Some("NaN")), 0);
        assert_eq!(parse_counter("k", Some("inf")), 0);
    }

    #[test]
    fn test_flag_set_skips_false_members() {
        let set = decode_flag_set("k", Some(r#"{"a":true,"b":false,"c":null,"d":1}"#));
        let members: Vec<_> = set.iter().map(String::as_str).collect();
        assert_eq!(members, vec!["a", "d"]);
    }

    #[test]
    fn test_flag_set_malformed_is_empty() {
        assert!(decode_flag_set("k", Some("[1,2]")).is_empty());
        assert!(decode_flag_set("k", Some("{oops")).is_empty());
    }

    #[test]
    fn test_encode_flag_set() {
        let set: BTreeSet<String> = ["x".to_string(), "y".to_string()].into_iter().collect();
        assert_eq!(encode_flag_set(&set).unwrap(), r#"{"x":true,"y":true}"#);
    }

    #[test]
    fn test_decode_bool() {
        assert_eq!(decode_bool(Some("true")), Some(true));
        assert_eq!(decode_bool(Some("false")), Some(false));
        assert_eq!(decode_bool(Some("\"true\"")), None);
        assert_eq!(decode_bool(None), None);
    }
}
