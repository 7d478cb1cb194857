//! Lenient number coercion for values that arrive from templates and JSON.

use serde_json::Value;

/// A non-negative whole count. Anything that is not a usable number is 0.
pub(crate) fn count(value: &Value) -> u64 {
    float(value).map(|v| v as u64).unwrap_or(0)
}

/// A finite, non-negative number, or `None`.
///
/// Numeric strings coerce (`"7"`, `" 12 "`); an empty string is 0.
/// Booleans, arrays and objects are not numbers.
pub(crate) fn float(value: &Value) -> Option<f64> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().ok()?
            }
        }
        _ => return None,
    };

    if raw.is_finite() && raw >= 0.0 {
        Some(raw)
    } else {
        None
    }
}

/// Integer-prefix parsing for `data-*` attributes: `"12abc"` is 12.
pub(crate) fn attribute_count(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else {
        return 0;
    };
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    if negative || end == 0 {
        return 0;
    }
    digits[..end].parse::<u64>().unwrap_or(u64::MAX)
}
