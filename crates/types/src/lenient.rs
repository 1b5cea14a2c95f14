//! Forgiving readers for persisted values.
//!
//! Persisted widget data may be missing keys or carry values of the wrong
//! type. Nothing here fails: a value that cannot be read is treated as absent
//! and the caller's default is used instead.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// `deserialize_with` helper: a value of the wrong type becomes `None`
pub fn option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// `deserialize_with` helper for integer fields; integral floats are accepted
pub fn option_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_i64(&value))
}

/// `skip_serializing_if` helper for text fields that are dropped when empty
pub fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

/// Integer view of a JSON number. Integral floats are accepted.
pub fn as_i64(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.is_finite())
            .map(|f| f as i64)
    })
}

pub fn bool_or(map: &Map<String, Value>, key: &str, default: bool) -> bool {
    map.get(key).and_then(Value::as_bool).unwrap_or(default)
}

pub fn f64_or(map: &Map<String, Value>, key: &str, default: f64) -> f64 {
    map.get(key).and_then(Value::as_f64).unwrap_or(default)
}

pub fn i64_or(map: &Map<String, Value>, key: &str, default: i64) -> i64 {
    map.get(key).and_then(as_i64).unwrap_or(default)
}

pub fn string_or(map: &Map<String, Value>, key: &str, default: &str) -> String {
    map.get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_readers_fall_back_on_missing_or_mistyped() {
        let value = json!({"flag": "yes", "ratio": 2, "count": 3.0, "name": 7});
        let map = value.as_object().unwrap();

        assert!(bool_or(map, "flag", true));
        assert!(!bool_or(map, "absent", false));
        assert_eq!(f64_or(map, "ratio", 0.5), 2.0);
        assert_eq!(i64_or(map, "count", 0), 3);
        assert_eq!(string_or(map, "name", "fallback"), "fallback");
    }

    #[test]
    fn test_as_i64_rejects_fractional() {
        assert_eq!(as_i64(&json!(4)), Some(4));
        assert_eq!(as_i64(&json!(4.0)), Some(4));
        assert_eq!(as_i64(&json!(4.5)), None);
        assert_eq!(as_i64(&json!("4")), None);
    }

    #[test]
    fn test_option_i64_accepts_integral_floats() {
        #[derive(Deserialize)]
        struct Reading {
            #[serde(default, deserialize_with = "option_i64")]
            n: Option<i64>,
        }
        let read = |v: Value| serde_json::from_value::<Reading>(v).unwrap().n;
        assert_eq!(read(json!({"n": 2})), Some(2));
        assert_eq!(read(json!({"n": 2.0})), Some(2));
        assert_eq!(read(json!({"n": 2.5})), None);
        assert_eq!(read(json!({})), None);
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(&None));
        assert!(is_blank(&Some(String::new())));
        assert!(!is_blank(&Some("x".to_string())));
    }
}
