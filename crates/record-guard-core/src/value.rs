//! Helpers for inspecting record values
//!
//! Records are JSON values. Length and pattern checks run against the text
//! form of a value, and placeholders render option values the same way.

use serde_json::{Number, Value};

/// True when a record slot counts as "no value supplied"
///
/// A missing key and an explicit `null` are both absent. An empty string is
/// a present value.
pub fn is_absent(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// The text form of a value
///
/// Strings are taken verbatim; everything else uses its compact JSON
/// rendering (`10`, `true`, `[1,2]`).
pub fn text_form(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Length of the text form, counted in characters
pub fn text_length(value: &Value) -> usize {
    match value {
        Value::String(s) => s.chars().count(),
        other => other.to_string().chars().count(),
    }
}

/// Equality used by the `equal` / `not_equal` constraints
///
/// Numbers compare by numeric value so that `1` equals `1.0`. Two integers
/// are compared exactly; only a float on either side goes through `f64`.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
        _ => left == right,
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if a.is_f64() || b.is_f64() {
        return match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        };
    }
    match (a.as_i64(), b.as_i64()) {
        (Some(x), Some(y)) => x == y,
        // At least one side is above i64::MAX, so both must be u64 to match.
        _ => matches!((a.as_u64(), b.as_u64()), (Some(x), Some(y)) if x == y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_values() {
        assert!(is_absent(None));
        assert!(is_absent(Some(&Value::Null)));
        assert!(!is_absent(Some(&json!(""))));
        assert!(!is_absent(Some(&json!(0))));
    }

    #[test]
    fn test_text_form() {
        assert_eq!(text_form(&json!("test001")), "test001");
        assert_eq!(text_form(&json!(20.2)), "20.2");
        assert_eq!(text_form(&json!(true)), "true");
        assert_eq!(text_form(&json!([1, 2])), "[1,2]");
    }

    #[test]
    fn test_text_length_counts_characters() {
        assert_eq!(text_length(&json!("用户名")), 3);
        assert_eq!(text_length(&json!(12345)), 5);
    }

    #[test]
    fn test_numeric_equality() {
        assert!(values_equal(&json!(1), &json!(1.0)));
        assert!(!values_equal(&json!(1), &json!(2)));
        assert!(!values_equal(&json!(1), &json!("1")));
        assert!(values_equal(&json!("abc"), &json!("abc")));
    }

    #[test]
    fn test_large_integers_compare_exactly() {
        assert!(!values_equal(&json!(i64::MAX), &json!(i64::MAX - 1)));
        assert!(values_equal(&json!(i64::MAX), &json!(i64::MAX)));
        assert!(!values_equal(&json!(9007199254740993u64), &json!(9007199254740992u64)));
        assert!(!values_equal(&json!(u64::MAX), &json!(u64::MAX - 1)));
        assert!(values_equal(&json!(u64::MAX), &json!(u64::MAX)));
        assert!(!values_equal(&json!(-1), &json!(u64::MAX)));
        assert!(values_equal(&json!(9007199254740992u64), &json!(9007199254740992.0)));
    }
}
