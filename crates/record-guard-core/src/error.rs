//! Error types for schema declaration and evaluation
//!
//! Only malformed schema configuration is an error. A record that fails a
//! rule is an ordinary [`ValidationResult`](crate::ValidationResult).

use thiserror::Error;

/// Configuration errors raised while building or evaluating a schema
#[derive(Error, Debug, Clone)]
pub enum SchemaError {
    /// An option key with no constraint handler behind it
    #[error("Unknown constraint '{key}' on field '{field}'")]
    UnknownConstraint { field: String, key: String },

    /// A known option carrying a value of the wrong shape
    #[error("Invalid value for option '{key}': {reason}")]
    InvalidOption { key: String, reason: String },

    /// A `regex` option that does not compile
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The same field name registered twice on one schema
    #[error("Duplicate field '{field}' in schema '{schema}'")]
    DuplicateField { schema: String, field: String },

    /// Engine configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SchemaError {
    /// Create an invalid option error
    pub fn invalid_option(key: impl Into<String>, reason: impl Into<String>) -> Self {
        SchemaError::InvalidOption {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        SchemaError::Config(msg.into())
    }
}

impl From<toml::de::Error> for SchemaError {
    fn from(err: toml::de::Error) -> Self {
        SchemaError::Config(format!("TOML error: {}", err))
    }
}

impl From<std::io::Error> for SchemaError {
    fn from(err: std::io::Error) -> Self {
        SchemaError::Config(err.to_string())
    }
}

/// Result type alias for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SchemaError::UnknownConstraint {
            field: "用户名".to_string(),
            key: "max_len".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown constraint 'max_len' on field '用户名'");
    }

    #[test]
    fn test_error_constructors() {
        let err = SchemaError::invalid_option("max_length", "expected a non-negative integer");
        assert!(matches!(err, SchemaError::InvalidOption { .. }));

        let err = SchemaError::config("missing file");
        assert_eq!(err.to_string(), "Configuration error: missing file");
    }

    #[test]
    fn test_pattern_error_keeps_source() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = SchemaError::InvalidPattern {
            pattern: "(".to_string(),
            source,
        };
        assert!(std::error::Error::source(&err).is_some());
    }
}
