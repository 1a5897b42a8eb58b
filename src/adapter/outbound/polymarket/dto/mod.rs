//! Polymarket data transfer objects.
//!
//! - [`gamma`]: metadata API responses (events, markets, tags, search)
//! - [`clob`]: public CLOB responses (price, midpoint, history, book)
//!
//! Upstream numeric fields arrive as numbers, numeric strings, null, or not
//! at all. The deserializers below accept every shape and fall back to
//! `None` rather than failing the whole payload.

pub mod clob;
pub mod gamma;

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

/// Parse a decimal from a JSON value.
pub(crate) fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|e| debug!(error = %e, raw = %raw, "Failed to parse decimal"))
        .ok()
}

/// `Option<Decimal>` from a number, numeric string, null or absent field.
pub(crate) fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(decimal_from_value))
}

/// `Decimal` that must be present but may be a number or a string.
pub(crate) fn decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    decimal_from_value(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("expected a decimal, got {value}")))
}

/// `Option<bool>` from a bool, `"true"`/`"false"`, null or absent field.
pub(crate) fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// `String` from a string or a number (IDs arrive as either).
pub(crate) fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

/// `Option<String>` that treats empty strings as absent.
pub(crate) fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// List of strings from a JSON array, a JSON-encoded array string, or a
/// comma-separated string.
pub(crate) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_string).collect(),
        Some(Value::String(s)) => split_encoded_list(&s),
        _ => Vec::new(),
    })
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn split_encoded_list(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<Value>>(trimmed) {
        Ok(items) => items.iter().filter_map(scalar_string).collect(),
        Err(e) => {
            debug!(error = %e, raw = %trimmed, "List is not JSON, splitting on commas");
            trimmed
                .split(',')
                .map(|part| part.trim().trim_matches('"').to_string())
                .filter(|part| !part.is_empty())
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "lenient_decimal")]
        value: Option<Decimal>,
        #[serde(default, deserialize_with = "lenient_bool")]
        flag: Option<bool>,
        #[serde(default, deserialize_with = "string_list")]
        list: Vec<String>,
    }

    fn probe(json: &str) -> Probe {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn decimals_accept_numbers_strings_and_null() {
        assert_eq!(probe(r#"{"value": 0.01}"#).value, Some(dec!(0.01)));
        assert_eq!(probe(r#"{"value": "0.65"}"#).value, Some(dec!(0.65)));
        assert_eq!(probe(r#"{"value": null}"#).value, None);
        assert_eq!(probe(r#"{"value": ""}"#).value, None);
        assert_eq!(probe(r#"{"value": "n/a"}"#).value, None);
        assert_eq!(probe("{}").value, None);
    }

    #[test]
    fn bools_accept_strings() {
        assert_eq!(probe(r#"{"flag": true}"#).flag, Some(true));
        assert_eq!(probe(r#"{"flag": "false"}"#).flag, Some(false));
        assert_eq!(probe(r#"{"flag": null}"#).flag, None);
    }

    #[test]
    fn lists_accept_encoded_and_comma_forms() {
        assert_eq!(probe(r#"{"list": "[\"1\", \"2\"]"}"#).list, ["1", "2"]);
        assert_eq!(probe(r#"{"list": ["Yes", "No"]}"#).list, ["Yes", "No"]);
        assert_eq!(probe(r#"{"list": "111,222"}"#).list, ["111", "222"]);
        assert!(probe(r#"{"list": null}"#).list.is_empty());
    }
}
