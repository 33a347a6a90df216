//! Message catalog
//!
//! Holds the resolved default template for every constraint kind plus the
//! label used for unnamed fields. Defaults come from each kind's
//! documentation block; configured overrides replace them verbatim.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::config::{EngineConfig, DEFAULT_LABEL};
use crate::constraint::ConstraintKind;
use crate::template::ErrorTemplate;

/// Message shown for a record that passed every rule
pub const SUCCESS_MESSAGE: &str = "校验成功";

/// Resolved templates per constraint kind
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    default_label: String,
    templates: HashMap<ConstraintKind, ErrorTemplate>,
}

impl MessageCatalog {
    /// Catalog built from the documentation table alone
    pub fn new() -> Self {
        let templates = ConstraintKind::ALL
            .into_iter()
            .map(|kind| (kind, ErrorTemplate::resolve(kind.documentation(), false)))
            .collect();
        Self {
            default_label: DEFAULT_LABEL.to_string(),
            templates,
        }
    }

    /// Shared catalog with no overrides
    pub fn builtin() -> &'static MessageCatalog {
        static BUILTIN: OnceLock<MessageCatalog> = OnceLock::new();
        BUILTIN.get_or_init(MessageCatalog::new)
    }

    /// Catalog with configured label and message overrides applied
    ///
    /// Override keys that name no constraint kind are skipped;
    /// [`EngineConfig::validate`] reports them.
    pub fn from_config(config: &EngineConfig) -> Self {
        let mut catalog = Self::new();
        catalog.default_label = config.default_label.clone();
        for (key, template) in &config.messages {
            match ConstraintKind::from_key(key) {
                Some(kind) => {
                    catalog
                        .templates
                        .insert(kind, ErrorTemplate::resolve(template, true));
                }
                None => tracing::warn!(key = %key, "Ignoring message override for unknown constraint"),
            }
        }
        catalog
    }

    /// Template for a constraint kind
    pub fn template(&self, kind: ConstraintKind) -> &ErrorTemplate {
        // Every kind is inserted by `new`.
        &self.templates[&kind]
    }

    /// Label for rules built without one
    pub fn default_label(&self) -> &str {
        &self.default_label
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_templates() {
        let catalog = MessageCatalog::builtin();
        assert_eq!(catalog.template(ConstraintKind::Required).skeleton(), "不可为空");
        assert_eq!(
            catalog.template(ConstraintKind::MinLength).skeleton(),
            "长度不可小于{}"
        );
        assert_eq!(catalog.default_label(), "参数");
    }

    #[test]
    fn test_config_overrides() {
        let config = EngineConfig::default()
            .with_default_label("字段")
            .with_message(ConstraintKind::Required, "cannot be empty");
        let catalog = MessageCatalog::from_config(&config);
        assert_eq!(catalog.default_label(), "字段");
        assert_eq!(
            catalog.template(ConstraintKind::Required).skeleton(),
            "cannot be empty"
        );
        assert_eq!(catalog.template(ConstraintKind::Regex).skeleton(), "正则匹配失败");
    }

    #[test]
    fn test_override_is_not_scanned_for_marker() {
        let config = EngineConfig::default().with_message(ConstraintKind::Equal, "应为{equal}");
        let catalog = MessageCatalog::from_config(&config);
        assert_eq!(catalog.template(ConstraintKind::Equal).placeholders(), ["equal"]);
    }
}
