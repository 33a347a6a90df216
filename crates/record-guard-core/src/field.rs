//! Field rules
//!
//! A [`FieldRule`] validates one attribute of a record. It is configured
//! with an ordered list of `(key, value)` options; at evaluation time the
//! known constraint keys are parsed and run in priority order, stopping at
//! the first violation.
//!
//! ```
//! use record_guard_core::FieldRule;
//! use serde_json::json;
//!
//! let rule = FieldRule::builder("用户名").max_length(10).build();
//! let result = rule.evaluate(Some(&json!("test_user_0001"))).unwrap();
//! assert!(!result.is_valid);
//! assert_eq!(result.error_message, "用户名: 长度不可大于10");
//! ```

use serde_json::Value;
use std::sync::OnceLock;
use tracing::{debug, trace, warn};

use crate::constraint::{Constraint, ConstraintKind, DataType, CUSTOM_ERROR_MESSAGE_KEY};
use crate::error::{Result, SchemaError};
use crate::message::MessageCatalog;
use crate::result::ValidationResult;
use crate::template::ErrorTemplate;
use crate::value::{is_absent, text_form};

/// Ordered option list with mapping semantics
///
/// Setting an existing key replaces its value without moving it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldOptions {
    entries: Vec<(String, Value)>,
}

impl FieldOptions {
    /// Create an empty option list
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, replacing any existing value in place
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder form of [`set`](Self::set)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Get an option value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Check whether a key is set
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate options in configuration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Option keys in configuration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge preset defaults into these (caller) options
    ///
    /// Defaults are placed right after the `required` entry, or at the front
    /// when there is none. A caller key colliding with a default keeps the
    /// caller's value; it sits at the default's position unless the caller
    /// placed it before `required`.
    pub fn inject_defaults(self, defaults: FieldOptions) -> FieldOptions {
        let required = ConstraintKind::Required.key();
        let split = self
            .entries
            .iter()
            .position(|(k, _)| k == required)
            .map_or(0, |i| i + 1);

        let mut head = self.entries;
        let tail = head.split_off(split);
        let mut merged = FieldOptions { entries: head };

        for (key, default) in defaults.entries {
            if merged.contains_key(&key) {
                continue;
            }
            let value = tail
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.clone())
                .unwrap_or(default);
            merged.entries.push((key, value));
        }

        for (key, value) in tail {
            if !merged.contains_key(&key) {
                merged.entries.push((key, value));
            }
        }

        merged
    }
}

/// Builder for [`FieldRule`]
///
/// Field subtypes push presets; caller options set through the builder
/// always win over preset values at [`build`](Self::build) time.
#[derive(Debug, Clone, Default)]
pub struct FieldBuilder {
    label: Option<String>,
    options: FieldOptions,
    presets: Vec<FieldOptions>,
}

impl FieldBuilder {
    /// Create a builder with no label
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label shown in error messages
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Add a layer of preset defaults
    ///
    /// Later layers belong to more derived subtypes and are merged first.
    pub fn preset(mut self, defaults: FieldOptions) -> Self {
        self.presets.push(defaults);
        self
    }

    /// Set an arbitrary option by key
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.set(key, value);
        self
    }

    pub fn required(self, required: bool) -> Self {
        self.option(ConstraintKind::Required.key(), required)
    }

    /// Accept a single data type
    pub fn data_type(self, data_type: DataType) -> Self {
        self.option(ConstraintKind::DataType.key(), data_type.name())
    }

    /// Accept any of several data types
    pub fn data_types(self, data_types: &[DataType]) -> Self {
        let names: Vec<Value> = data_types.iter().map(|t| Value::from(t.name())).collect();
        self.option(ConstraintKind::DataType.key(), names)
    }

    pub fn max_length(self, max_length: usize) -> Self {
        self.option(ConstraintKind::MaxLength.key(), max_length)
    }

    pub fn min_length(self, min_length: usize) -> Self {
        self.option(ConstraintKind::MinLength.key(), min_length)
    }

    pub fn equal(self, value: impl Into<Value>) -> Self {
        self.option(ConstraintKind::Equal.key(), value)
    }

    pub fn not_equal(self, value: impl Into<Value>) -> Self {
        self.option(ConstraintKind::NotEqual.key(), value)
    }

    pub fn regex(self, pattern: impl Into<String>) -> Self {
        self.option(ConstraintKind::Regex.key(), pattern.into())
    }

    /// Replace every constraint message with one template
    pub fn custom_error_message(self, template: impl Into<String>) -> Self {
        self.option(CUSTOM_ERROR_MESSAGE_KEY, template.into())
    }

    /// Merge presets and produce the rule
    pub fn build(self) -> FieldRule {
        let options = self
            .presets
            .into_iter()
            .rev()
            .fold(self.options, FieldOptions::inject_defaults);
        FieldRule {
            label: self.label,
            options,
            parsed: OnceLock::new(),
        }
    }
}

/// One validatable attribute
///
/// Constraints are parsed on first use and kept for the life of the rule,
/// configuration errors included.
#[derive(Debug, Clone)]
pub struct FieldRule {
    label: Option<String>,
    options: FieldOptions,
    parsed: OnceLock<Result<Vec<Constraint>>>,
}

impl PartialEq for FieldRule {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && self.options == other.options
    }
}

impl FieldRule {
    /// Start building a labelled rule
    pub fn builder(label: impl Into<String>) -> FieldBuilder {
        FieldBuilder::new().label(label)
    }

    /// Label shown in error messages, if one was given
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Options in configuration order
    pub fn options(&self) -> &FieldOptions {
        &self.options
    }

    /// Whether an absent value fails (defaults to true)
    pub fn required(&self) -> Result<bool> {
        match self.options.get(ConstraintKind::Required.key()) {
            None => Ok(true),
            Some(Value::Bool(required)) => Ok(*required),
            Some(other) => Err(SchemaError::invalid_option(
                ConstraintKind::Required.key(),
                format!("expected a boolean, got {}", other),
            )),
        }
    }

    /// The caller-supplied message template, if configured
    pub fn custom_error_message(&self) -> Result<Option<&str>> {
        match self.options.get(CUSTOM_ERROR_MESSAGE_KEY) {
            None => Ok(None),
            Some(Value::String(template)) => Ok(Some(template.as_str())),
            Some(other) => Err(SchemaError::invalid_option(
                CUSTOM_ERROR_MESSAGE_KEY,
                format!("expected a template string, got {}", other),
            )),
        }
    }

    /// The configured constraints, in execution order
    ///
    /// Options are read in configuration order, so the first key that is
    /// neither a constraint nor reserved is the one reported.
    pub fn constraints(&self) -> Result<&[Constraint]> {
        self.constraints_with(MessageCatalog::builtin())
    }

    fn constraints_with(&self, catalog: &MessageCatalog) -> Result<&[Constraint]> {
        match self.parsed.get_or_init(|| self.parse_constraints()) {
            Ok(constraints) => Ok(constraints.as_slice()),
            Err(SchemaError::UnknownConstraint { key, .. }) => {
                Err(SchemaError::UnknownConstraint {
                    field: self.display_label(catalog).to_string(),
                    key: key.clone(),
                })
            }
            Err(err) => Err(err.clone()),
        }
    }

    fn parse_constraints(&self) -> Result<Vec<Constraint>> {
        let mut constraints = Vec::new();
        for (key, value) in self.options.iter() {
            if key == CUSTOM_ERROR_MESSAGE_KEY {
                continue;
            }
            match ConstraintKind::from_key(key) {
                Some(ConstraintKind::Required) => {}
                Some(kind) => constraints.push(Constraint::parse(kind, value)?),
                None => {
                    // Relabelled per catalog in `constraints_with`.
                    return Err(SchemaError::UnknownConstraint {
                        field: String::new(),
                        key: key.to_string(),
                    });
                }
            }
        }
        constraints.sort_by_key(Constraint::kind);
        Ok(constraints)
    }

    /// Evaluate a value with the built-in messages
    ///
    /// `None` means the record had no such key.
    pub fn evaluate(&self, value: Option<&Value>) -> Result<ValidationResult> {
        self.evaluate_with(value, MessageCatalog::builtin())
    }

    /// Evaluate a value against this rule
    ///
    /// Validation failures come back as a failing [`ValidationResult`]; only
    /// a misconfigured rule returns `Err`.
    pub fn evaluate_with(
        &self,
        value: Option<&Value>,
        catalog: &MessageCatalog,
    ) -> Result<ValidationResult> {
        let label = self.display_label(catalog);

        let value = match value {
            Some(value) if !is_absent(Some(value)) => value,
            _ => {
                if self.required()? {
                    debug!(field = %label, "Required value missing");
                    let detail = self.render(catalog.template(ConstraintKind::Required));
                    return Ok(ValidationResult::failure(label, &detail));
                }
                trace!(field = %label, "Optional value absent, skipping constraints");
                return Ok(ValidationResult::success());
            }
        };

        for constraint in self.constraints_with(catalog)? {
            let kind = constraint.kind();
            debug!(field = %label, constraint = %kind, "Running constraint");
            if !constraint.check(value) {
                return self.failure(kind, label, catalog);
            }
        }

        trace!(field = %label, "All constraints passed");
        Ok(ValidationResult::success())
    }

    fn display_label<'a>(&'a self, catalog: &'a MessageCatalog) -> &'a str {
        self.label.as_deref().unwrap_or_else(|| catalog.default_label())
    }

    fn failure(
        &self,
        kind: ConstraintKind,
        label: &str,
        catalog: &MessageCatalog,
    ) -> Result<ValidationResult> {
        let detail = match self.custom_error_message()? {
            Some(custom) => self.render(&ErrorTemplate::resolve(custom, true)),
            None => self.render(catalog.template(kind)),
        };
        debug!(field = %label, constraint = %kind, detail = %detail, "Constraint failed");
        Ok(ValidationResult::failure(label, &detail))
    }

    fn render(&self, template: &ErrorTemplate) -> String {
        if template.is_empty() {
            warn!(field = ?self.label, "Error template resolved to an empty message");
        }
        template.render_with(|name| match self.options.get(name) {
            Some(value) => text_form(value),
            None => {
                warn!(placeholder = %name, "Placeholder names no configured option");
                format!("{{{}}}", name)
            }
        })
    }
}
