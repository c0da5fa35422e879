//! Tolerant readers for loosely-typed device JSON.
//!
//! Firmware revisions disagree on field names and on whether numbers arrive
//! as numbers or strings. These helpers accept either and turn anything else
//! into `None`.

use serde_json::Value;

/// Text form of a scalar: strings verbatim, numbers and booleans printed
pub(crate) fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Unsigned number from a number or a numeric string
pub(crate) fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// First non-empty text value stored under any of `keys`
pub(crate) fn first_text(object: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .filter_map(as_text)
        .find(|text| !text.trim().is_empty())
}

/// First numeric value stored under any of `keys`
pub(crate) fn first_u64(object: &Value, keys: &[&str]) -> Option<u64> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find_map(as_u64)
}

/// Whether any of `keys` holds a non-null value
pub(crate) fn has_any(object: &Value, keys: &[&str]) -> bool {
    keys.iter()
        .any(|key| object.get(*key).is_some_and(|v| !v.is_null()))
}

/// Record list of a listing response
///
/// Accepts a bare array, or an array under one of `keys` at the top level or
/// under `result`.
pub(crate) fn find_array<'a>(root: &'a Value, keys: &[&str]) -> Option<&'a Vec<Value>> {
    if let Value::Array(items) = root {
        return Some(items);
    }
    let scopes = [Some(root), root.get("result")];
    scopes
        .into_iter()
        .flatten()
        .flat_map(|scope| keys.iter().filter_map(move |key| scope.get(*key)))
        .find_map(Value::as_array)
}
