//! Tolerant field decoders for records written by hand-made forms.
//!
//! Stored JSON may carry prices as strings ("₹1,200"), quantities as numbers or
//! strings and `null` in place of text. A bad field degrades to its default
//! instead of rejecting the whole record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Extract a number from a JSON value, stripping currency symbols and separators from strings.
pub fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
        }
        _ => None,
    }
}

fn text_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Number or 0 when missing/unparseable.
pub fn de_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de_opt_number(deserializer)?.unwrap_or(0.0))
}

/// Number, `None` when missing/unparseable.
pub fn de_opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

/// Text or "" when missing/null.
pub fn de_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(text_from_value).unwrap_or_default())
}

/// Non-empty text; missing, null or blank is an error that rejects the record.
pub fn de_required_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    text_from_value(&value)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| serde::de::Error::custom("expected a non-empty string or number"))
}

/// Text, `None` when missing, null or empty.
pub fn de_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(text_from_value)
        .filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Record {
        #[serde(default, deserialize_with = "de_number")]
        price: f64,
        #[serde(default, deserialize_with = "de_opt_number")]
        cost: Option<f64>,
        #[serde(default, deserialize_with = "de_string")]
        name: String,
        #[serde(default, deserialize_with = "de_opt_string")]
        note: Option<String>,
    }

    #[test]
    fn test_number_from_value() {
        assert_eq!(number_from_value(&json!(120)), Some(120.0));
        assert_eq!(number_from_value(&json!("₹1,200.50")), Some(1200.5));
        assert_eq!(number_from_value(&json!("abc")), None);
        assert_eq!(number_from_value(&json!(null)), None);
    }

    #[test]
    fn test_record_defaults() {
        let record: Record =
            serde_json::from_value(json!({ "price": "99", "name": null, "note": "" })).unwrap();
        assert_eq!(record.price, 99.0);
        assert_eq!(record.cost, None);
        assert_eq!(record.name, "");
        assert_eq!(record.note, None);
    }

    #[derive(Debug, Deserialize)]
    struct Keyed {
        #[serde(deserialize_with = "de_required_string")]
        id: String,
    }

    #[test]
    fn test_required_string() {
        let keyed: Keyed = serde_json::from_value(json!({ "id": 1710496946000u64 })).unwrap();
        assert_eq!(keyed.id, "1710496946000");
        assert!(serde_json::from_value::<Keyed>(json!({})).is_err());
        assert!(serde_json::from_value::<Keyed>(json!({ "id": null })).is_err());
        assert!(serde_json::from_value::<Keyed>(json!({ "id": "  " })).is_err());
    }
}
