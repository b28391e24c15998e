//! Count normalization.
//!
//! Interaction and comment counts arrive as JSON integers, floats, or display
//! strings such as `"1.2万"` or `"1,234"`. Everything is coerced to an `i64`;
//! nothing here fails.

use serde_json::Value;

use crate::patterns::TEN_THOUSAND_COUNT;

/// Normalize a JSON count value.
///
/// - integers are returned unchanged
/// - floats are truncated toward zero
/// - strings go through [`normalize_count_text`]
/// - anything else is `0`
#[must_use]
pub fn normalize_count(value: &Value) -> i64 {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i
            } else if let Some(u) = n.as_u64() {
                i64::try_from(u).unwrap_or(i64::MAX)
            } else {
                #[allow(clippy::cast_possible_truncation)]
                n.as_f64().map_or(0, |f| f.trunc() as i64)
            }
        }
        Value::String(s) => normalize_count_text(s),
        _ => 0,
    }
}

/// Normalize a displayed count string.
///
/// `"1.2万"` becomes `12000`; otherwise every non-digit is dropped and the
/// rest parsed, so `"1,234"` becomes `1234`. Empty or unparsable input is `0`.
///
/// # Example
///
/// ```rust
/// use post_extractor::numeric::normalize_count_text;
///
/// assert_eq!(normalize_count_text("3万"), 30000);
/// assert_eq!(normalize_count_text(" 12345 "), 12345);
/// assert_eq!(normalize_count_text("abc"), 0);
/// ```
#[must_use]
pub fn normalize_count_text(text: &str) -> i64 {
    let text = text.trim();
    if text.is_empty() {
        return 0;
    }

    if let Some(count) = ten_thousand_count(text) {
        return count;
    }

    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// `round(decimal * 10000)` for strings like `1.2万`.
///
/// A malformed decimal (`1.2.3万`) yields `None` so the caller falls back to
/// digit stripping.
fn ten_thousand_count(text: &str) -> Option<i64> {
    let caps = TEN_THOUSAND_COUNT.captures(text)?;
    let decimal: f64 = caps[1].parse().ok()?;
    let scaled = (decimal * 10_000.0).round();
    if !scaled.is_finite() {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    Some(scaled as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_int_passthrough() {
        assert_eq!(normalize_count(&json!(42)), 42);
        assert_eq!(normalize_count(&json!(0)), 0);
        assert_eq!(normalize_count(&json!(-5)), -5);
    }

    #[test]
    fn test_float_truncation() {
        assert_eq!(normalize_count(&json!(3.7)), 3);
        assert_eq!(normalize_count(&json!(-3.7)), -3);
    }

    #[test]
    fn test_ten_thousand_suffix() {
        assert_eq!(normalize_count_text("1.2万"), 12000);
        assert_eq!(normalize_count_text("3万"), 30000);
        assert_eq!(normalize_count_text("0.5万"), 5000);
        assert_eq!(normalize_count_text("1.5 万+"), 15000);
        assert_eq!(normalize_count(&json!("2.3万")), 23000);
    }

    #[test]
    fn test_malformed_ten_thousand_falls_back_to_digits() {
        assert_eq!(normalize_count_text("1.2.3万"), 123);
    }

    #[test]
    fn test_plain_number_string() {
        assert_eq!(normalize_count_text("12345"), 12345);
        assert_eq!(normalize_count_text("0"), 0);
        assert_eq!(normalize_count_text("1,234"), 1234);
    }

    #[test]
    fn test_empty_and_junk() {
        assert_eq!(normalize_count_text(""), 0);
        assert_eq!(normalize_count_text("   "), 0);
        assert_eq!(normalize_count_text("abc"), 0);
        assert_eq!(normalize_count_text("99999999999999999999999"), 0);
    }

    #[test]
    fn test_other_types() {
        assert_eq!(normalize_count(&Value::Null), 0);
        assert_eq!(normalize_count(&json!(true)), 0);
        assert_eq!(normalize_count(&json!([1, 2])), 0);
        assert_eq!(normalize_count(&json!({"n": 1})), 0);
    }
}
