//! Validation verdicts

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::message::SUCCESS_MESSAGE;

/// Outcome of evaluating one field rule or a whole schema
///
/// `error_message` is never empty on success: it carries
/// [`SUCCESS_MESSAGE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the value (or record) passed
    pub is_valid: bool,
    /// Success phrase, or `"{label}: {detail}"` for the first failure
    pub error_message: String,
}

impl ValidationResult {
    /// A passing result
    pub fn success() -> Self {
        Self {
            is_valid: true,
            error_message: SUCCESS_MESSAGE.to_string(),
        }
    }

    /// A failing result scoped to a field label
    pub fn failure(label: &str, detail: &str) -> Self {
        Self {
            is_valid: false,
            error_message: format!("{}: {}", label, detail),
        }
    }

    /// Check whether this result passed
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.error_message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_message() {
        let result = ValidationResult::success();
        assert!(result.is_valid());
        assert_eq!(result.error_message, "校验成功");
    }

    #[test]
    fn test_failure_format() {
        let result = ValidationResult::failure("用户名", "不可为空");
        assert!(!result.is_valid());
        assert_eq!(result.to_string(), "用户名: 不可为空");
    }

    #[test]
    fn test_serializes_both_keys() {
        let json = serde_json::to_value(ValidationResult::failure("年龄", "数据类型错误")).unwrap();
        assert_eq!(json["is_valid"], false);
        assert_eq!(json["error_message"], "年龄: 数据类型错误");
    }
}
