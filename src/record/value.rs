//! Loose conversions of JSON values
//!
//! fio reports job options as strings ("16") and results as numbers, so the
//! selectors compare through these helpers rather than by JSON type.

use serde_json::Value;

/// Convert a value to an integer the way a lenient `int()` would
///
/// Integers pass through, floats truncate toward zero, numeric strings parse
/// after trimming whitespace, booleans become 0/1. Anything else is `None`.
pub fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i)
            } else if let Some(u) = n.as_u64() {
                i64::try_from(u).ok()
            } else {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                    .map(|f| f.trunc() as i64)
            }
        }
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

/// Convert a value to a float
pub fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Plain string form of a value: strings unquoted, everything else as JSON
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Legacy normalization: a leading '0' keeps only the second character
///
/// `"016"` becomes `"1"`, `"08"` becomes `"8"`. Strings that do not start
/// with '0', and the lone string `"0"`, are returned unchanged.
pub fn strip_leading_zero(s: &str) -> String {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some('0'), Some(second)) => second.to_string(),
        _ => s.to_string(),
    }
}

/// Round half to even, matching the rounding used for chart values
pub fn round_half_even(value: f64) -> f64 {
    value.round_ties_even()
}
