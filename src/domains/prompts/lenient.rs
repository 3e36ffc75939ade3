//! Lenient field deserializers.
//!
//! Params come from web clients, database rows and MCP string arguments, so
//! ids show up as numbers and numbers show up as strings. These helpers accept
//! either form and are wired in with `#[serde(deserialize_with = "...")]`.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A number, or a string holding one. Blank strings and null read as `None`.
fn number<E: serde::de::Error>(value: Value) -> Result<Option<f64>, E> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(Some)
            .ok_or_else(|| E::custom(format!("expected a number, got \"{}\"", s))),
        other => Err(E::custom(format!(
            "expected a number, got {}",
            describe(&other)
        ))),
    }
}

/// `"c1"`, `7` and `7.5` all read as an identifier string.
pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(D::Error::custom(format!(
            "expected a string or number, got {}",
            describe(&other)
        ))),
    }
}

pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    number(Value::deserialize(deserializer)?)
}

/// Non-negative count of whole units; fractional input is rounded.
pub fn opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match number::<D::Error>(Value::deserialize(deserializer)?)? {
        None => Ok(None),
        Some(n) if n < 0.0 => Err(D::Error::custom(format!(
            "expected a non-negative number, got {}",
            n
        ))),
        Some(n) => Ok(Some(n.round() as u64)),
    }
}

/// Any integer, saturating at the `i64` range; fractional input is rounded.
pub fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number::<D::Error>(Value::deserialize(deserializer)?)?.map(|n| n.round() as i64))
}
