//! Interpretation of raw host cell values.

use serde_json::Value;

const DIFF_PREFIX: &str = "V(";

/// Cell values placed by the host while a formula is still being computed.
pub const PENDING: &str = "...";

/// JavaScript-like truthiness of a cell value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_none_or(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Unwraps cell values that are annotated with a diff.
///
/// Diffs are encoded as `{"value": "V(<json payload>)"}` and the effective
/// value is the first truthy of `remote`, `local` and `parent`, or the whole
/// payload if none of them is set.
pub fn parse_value(value: &Value) -> Value {
    let Some(wrapped) = value
        .get("value")
        .and_then(Value::as_str)
        .filter(|v| v.starts_with(DIFF_PREFIX))
    else {
        return value.clone();
    };
    let payload = wrapped
        .get(DIFF_PREFIX.len()..wrapped.len() - 1)
        .unwrap_or_default();
    match serde_json::from_str::<Value>(payload) {
        Ok(payload) => ["remote", "local", "parent"]
            .iter()
            .filter_map(|key| payload.get(key))
            .find(|v| is_truthy(v))
            .cloned()
            .unwrap_or(payload),
        Err(_) => value.clone(),
    }
}

/// Non-empty text of a cell, numbers are formatted.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Numeric degrees of a cell, also accepting numeric text.
pub fn as_degrees(value: &Value) -> Option<f64> {
    let deg = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    deg.filter(|deg| deg.is_finite())
}

pub fn is_pending(value: &Value) -> bool {
    value.as_str() == Some(PENDING)
}
