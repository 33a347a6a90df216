//! Engine configuration
//!
//! Settings are read from a TOML file or the environment:
//!
//! ```toml
//! default_label = "字段"
//!
//! [messages]
//! required = "必填"
//! max_length = "最多{max_length}个字符"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::constraint::ConstraintKind;
use crate::error::{Result, SchemaError};

/// Label used in messages when a field rule has none
pub const DEFAULT_LABEL: &str = "参数";

/// Environment variable overriding the default label
pub const ENV_DEFAULT_LABEL: &str = "RECORD_GUARD_DEFAULT_LABEL";

/// Environment variable pointing at a TOML configuration file
pub const ENV_CONFIG_PATH: &str = "RECORD_GUARD_CONFIG";

/// Engine-wide settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Label for rules built without one
    pub default_label: String,

    /// Message template overrides keyed by constraint option key
    pub messages: BTreeMap<String, String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_label: DEFAULT_LABEL.to_string(),
            messages: BTreeMap::new(),
        }
    }
}

impl EngineConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SchemaError::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Create config from environment variables
    ///
    /// Loads the file named by `RECORD_GUARD_CONFIG` if set, then applies
    /// `RECORD_GUARD_DEFAULT_LABEL` on top.
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var(ENV_CONFIG_PATH) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        if let Ok(label) = std::env::var(ENV_DEFAULT_LABEL) {
            config.default_label = label;
        }
        Ok(config)
    }

    /// Set the default label
    pub fn with_default_label(mut self, label: impl Into<String>) -> Self {
        self.default_label = label.into();
        self
    }

    /// Override the message template for one constraint kind
    pub fn with_message(mut self, kind: ConstraintKind, template: impl Into<String>) -> Self {
        self.messages.insert(kind.key().to_string(), template.into());
        self
    }

    /// Reject message overrides for keys that are not constraint kinds
    pub fn validate(&self) -> Result<()> {
        if let Some(key) = self
            .messages
            .keys()
            .find(|key| ConstraintKind::from_key(key).is_none())
        {
            return Err(SchemaError::config(format!(
                "no constraint named '{}' for message override",
                key
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.default_label, "参数");
        assert!(config.messages.is_empty());
    }

    #[test]
    fn test_from_toml_str() {
        let config = EngineConfig::from_toml_str(
            r#"
            default_label = "字段"

            [messages]
            required = "必填"
            max_length = "最多{max_length}个字符"
            "#,
        )
        .unwrap();
        assert_eq!(config.default_label, "字段");
        assert_eq!(config.messages["required"], "必填");
        assert_eq!(config.messages.len(), 2);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str("[messages]\nregex = \"格式错误\"").unwrap();
        assert_eq!(config.default_label, DEFAULT_LABEL);
    }

    #[test]
    fn test_unknown_message_key_rejected() {
        let err = EngineConfig::from_toml_str("[messages]\nmax_len = \"x\"").unwrap_err();
        assert!(matches!(err, SchemaError::Config(_)));
    }

    #[test]
    fn test_unknown_top_level_key_rejected() {
        assert!(EngineConfig::from_toml_str("success = \"ok\"").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_label = \"字段\"").unwrap();
        let config = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.default_label, "字段");
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::from_file("/nonexistent/record-guard.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_builder_methods() {
        let config = EngineConfig::default()
            .with_default_label("字段")
            .with_message(ConstraintKind::Equal, "应为{equal}");
        assert_eq!(config.messages["equal"], "应为{equal}");
        assert!(config.validate().is_ok());
    }
}
