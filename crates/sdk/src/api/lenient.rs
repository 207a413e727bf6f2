//! Tolerant field decoders for API responses.
//!
//! A known field whose value does not fit its declared type decodes to a
//! fallback instead of failing the whole response.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode as `T`, or `T::default()` when the value has another shape.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Numbers and numeric strings; anything else is `0`.
pub(crate) fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0.0,
    })
}

/// Strings, with numbers and booleans rendered as text; anything else is `None`.
pub(crate) fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "number")]
        credits: f64,
        #[serde(default, deserialize_with = "opt_string")]
        id: Option<String>,
        #[serde(default, deserialize_with = "or_default")]
        items: Vec<String>,
        #[serde(default, deserialize_with = "or_default")]
        total: u64,
    }

    #[test]
    fn test_accepts_expected_shapes() {
        let sample: Sample = serde_json::from_value(json!({
            "credits": 1.5,
            "id": "ad-1",
            "items": ["a"],
            "total": 3
        }))
        .unwrap();
        assert_eq!(sample.credits, 1.5);
        assert_eq!(sample.id.as_deref(), Some("ad-1"));
        assert_eq!(sample.items, vec!["a"]);
        assert_eq!(sample.total, 3);
    }

    #[test]
    fn test_falls_back_on_mismatched_shapes() {
        let sample: Sample = serde_json::from_value(json!({
            "credits": null,
            "id": 12345,
            "items": "not a list",
            "total": -1
        }))
        .unwrap();
        assert_eq!(sample.credits, 0.0);
        assert_eq!(sample.id.as_deref(), Some("12345"));
        assert!(sample.items.is_empty());
        assert_eq!(sample.total, 0);

        let sample: Sample = serde_json::from_value(json!({"credits": "0.25"})).unwrap();
        assert_eq!(sample.credits, 0.25);
        assert_eq!(sample.id, None);
    }
}
