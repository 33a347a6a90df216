//! Error message templates
//!
//! A template is parsed from either a rule's documentation block (the line
//! starting with [`ERROR_MESSAGE_MARKER`]) or a literal override string.
//! Named placeholders such as `{max_length}` are pulled out in order, and the
//! remaining literal text is kept so the message can be rendered later.
//!
//! ```
//! use record_guard_core::ErrorTemplate;
//!
//! let template = ErrorTemplate::resolve("长度不可大于{max_length}", true);
//! assert_eq!(template.skeleton(), "长度不可大于{}");
//! assert_eq!(template.placeholders(), ["max_length"]);
//! assert_eq!(template.render(&["10"]), "长度不可大于10");
//! ```

use std::fmt;

/// Marker introducing the message line inside a documentation block
pub const ERROR_MESSAGE_MARKER: &str = ":error_message:";

/// A resolved message skeleton with its ordered placeholder names
///
/// `literals` always holds exactly one more entry than `placeholders`, so the
/// skeleton has one `{}` slot per placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErrorTemplate {
    literals: Vec<String>,
    placeholders: Vec<String>,
}

impl ErrorTemplate {
    /// The template produced when no message could be found
    pub fn empty() -> Self {
        Self {
            literals: vec![String::new()],
            placeholders: Vec::new(),
        }
    }

    /// Resolve a template from documentation text or a literal override
    ///
    /// With `is_override` set, `source` is the raw message. Otherwise the
    /// message is the remainder of the first line beginning with
    /// [`ERROR_MESSAGE_MARKER`]; without such a line the template is empty.
    pub fn resolve(source: &str, is_override: bool) -> Self {
        if is_override {
            return Self::parse(source);
        }

        source
            .lines()
            .find_map(|line| line.trim_start().strip_prefix(ERROR_MESSAGE_MARKER))
            .map(|message| Self::parse(message.trim()))
            .unwrap_or_else(Self::empty)
    }

    /// Parse a raw message into literal segments and placeholder names
    ///
    /// An opening brace without a closing one is kept as literal text.
    pub fn parse(raw: &str) -> Self {
        let mut literals = Vec::new();
        let mut placeholders = Vec::new();
        let mut current = String::new();
        let mut rest = raw;

        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                break;
            };
            current.push_str(&rest[..open]);
            literals.push(std::mem::take(&mut current));
            placeholders.push(after[..close].to_string());
            rest = &after[close + 1..];
        }

        current.push_str(rest);
        literals.push(current);

        Self {
            literals,
            placeholders,
        }
    }

    /// The message with every placeholder replaced by an anonymous `{}` slot
    pub fn skeleton(&self) -> String {
        self.literals.join("{}")
    }

    /// Placeholder names in the order they appear
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// True when the template renders to an empty string
    pub fn is_empty(&self) -> bool {
        self.placeholders.is_empty() && self.literals.iter().all(|l| l.is_empty())
    }

    /// Render the template, filling slots positionally
    ///
    /// Missing values leave their slot empty; surplus values are ignored.
    pub fn render<S: AsRef<str>>(&self, values: &[S]) -> String {
        let mut index = 0;
        self.render_with(|_| {
            let value = values.get(index).map(|v| v.as_ref().to_string());
            index += 1;
            value.unwrap_or_default()
        })
    }

    /// Render the template, looking each placeholder up by name
    pub fn render_with<F>(&self, mut lookup: F) -> String
    where
        F: FnMut(&str) -> String,
    {
        let mut out = String::new();
        for (literal, name) in self.literals.iter().zip(self.placeholders.iter()) {
            out.push_str(literal);
            out.push_str(&lookup(name));
        }
        if let Some(last) = self.literals.last() {
            out.push_str(last);
        }
        out
    }
}

impl Default for ErrorTemplate {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for ErrorTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.skeleton())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const MAX_LENGTH_DOC: &str = "
        Rejects values whose text form is longer than the bound.

        :error_message: 长度不可大于{max_length}
        :param value: the value under test
    ";

    #[test]
    fn test_resolve_from_documentation() {
        let template = ErrorTemplate::resolve(MAX_LENGTH_DOC, false);
        assert_eq!(template.skeleton(), "长度不可大于{}");
        assert_eq!(template.placeholders(), ["max_length"]);
    }

    #[test]
    fn test_resolve_without_marker_is_empty() {
        let template = ErrorTemplate::resolve("Checks something.\n:param value:", false);
        assert!(template.is_empty());
        assert_eq!(template.skeleton(), "");
        assert!(template.placeholders().is_empty());
    }

    #[test]
    fn test_override_used_verbatim() {
        let template = ErrorTemplate::resolve(":error_message: 不会被扫描", true);
        assert_eq!(template.skeleton(), ":error_message: 不会被扫描");
    }

    #[test]
    fn test_multiple_placeholders_keep_order() {
        let template = ErrorTemplate::parse("长度需在{min_length}到{max_length}之间");
        assert_eq!(template.skeleton(), "长度需在{}到{}之间");
        assert_eq!(template.placeholders(), ["min_length", "max_length"]);
        assert_eq!(template.render(&["4", "10"]), "长度需在4到10之间");
    }

    #[test]
    fn test_unterminated_brace_is_literal() {
        let template = ErrorTemplate::parse("必须等于{equal");
        assert!(template.placeholders().is_empty());
        assert_eq!(template.skeleton(), "必须等于{equal");
    }

    #[test]
    fn test_render_with_lookup() {
        let template = ErrorTemplate::parse("必须等于{equal}");
        let rendered = template.render_with(|name| {
            assert_eq!(name, "equal");
            "1".to_string()
        });
        assert_eq!(rendered, "必须等于1");
    }

    #[test]
    fn test_render_with_missing_values() {
        let template = ErrorTemplate::parse("{a}-{b}");
        assert_eq!(template.render(&["x"]), "x-");
    }

    proptest! {
        #[test]
        fn prop_resolution_is_deterministic(source in ".*", is_override in any::<bool>()) {
            prop_assert_eq!(
                ErrorTemplate::resolve(&source, is_override),
                ErrorTemplate::resolve(&source, is_override)
            );
        }

        #[test]
        fn prop_slots_match_placeholders(raw in "[a-z{}长度 ]{0,40}") {
            let template = ErrorTemplate::parse(&raw);
            prop_assert_eq!(
                template.skeleton().matches("{}").count(),
                template.placeholders().len()
            );
        }

        #[test]
        fn prop_plain_text_round_trips(raw in "[^{}]{0,40}") {
            let template = ErrorTemplate::parse(&raw);
            prop_assert!(template.placeholders().is_empty());
            prop_assert_eq!(template.render::<&str>(&[]), raw);
        }
    }
}
