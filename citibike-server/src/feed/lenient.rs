//! Forgiving deserializers for loosely-typed GBFS fields.
//!
//! Feeds in the wild mix strings and numbers, omit fields, and switch
//! between `0/1` and `true/false`. Every helper here maps anything it
//! cannot interpret to `None` instead of failing the whole document.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::types::{BikeTypeCounts, StationId};

fn raw<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Value>, D::Error> {
    Option::<Value>::deserialize(d)
}

/// Interpret a JSON value as an integer, accepting whole floats.
pub(crate) fn as_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    value
        .as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64)
        .map(|f| f as i64)
}

/// Integer counts and timestamps.
pub fn integer<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    Ok(raw(d)?.as_ref().and_then(as_integer))
}

/// Degrees, given either as a JSON number or a numeric string.
pub fn degrees<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(raw(d)?.and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }))
}

/// Station identifiers, string or numeric.
pub fn station_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<StationId>, D::Error> {
    Ok(raw(d)?.and_then(|v| StationId::from_json(&v)))
}

/// Operational flags: `0/1` in GBFS 1.x, booleans in 2.x.
pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u8>, D::Error> {
    Ok(raw(d)?.and_then(|v| match v {
        Value::Bool(b) => Some(u8::from(b)),
        Value::Number(n) => n.as_f64().map(|f| u8::from(f != 0.0)),
        _ => None,
    }))
}

pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(raw(d)?.and_then(|v| match v {
        Value::String(s) => Some(s),
        _ => None,
    }))
}

/// The `num_bikes_available_types` object, ignored if it has an unexpected shape.
pub fn bike_types<'de, D: Deserializer<'de>>(d: D) -> Result<Option<BikeTypeCounts>, D::Error> {
    Ok(raw(d)?
        .filter(Value::is_object)
        .and_then(|v| serde_json::from_value(v).ok()))
}
