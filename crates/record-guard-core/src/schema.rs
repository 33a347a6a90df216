//! Schemas: ordered groups of field rules
//!
//! Fields are registered explicitly and evaluated in registration order.
//! Evaluation stops at the first failing field.
//!
//! ```
//! use record_guard_core::{CharField, FieldPreset, Schema};
//! use serde_json::json;
//!
//! let login = Schema::builder("login")
//!     .field("username", CharField::builder("用户名").max_length(10).build())
//!     .build()
//!     .unwrap();
//!
//! let result = login.evaluate(&json!({})).unwrap();
//! assert_eq!(result.error_message, "用户名: 不可为空");
//! ```

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Result, SchemaError};
use crate::field::FieldRule;
use crate::message::MessageCatalog;
use crate::result::ValidationResult;

/// A schema type that knows how to declare itself
///
/// Used by the integration wrapper, which declares a fresh schema for
/// every record it validates.
pub trait DeclareSchema {
    fn declare() -> Result<Schema>;
}

/// Ordered, uniquely named field rules
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    name: String,
    fields: Vec<(String, FieldRule)>,
}

impl Schema {
    /// Start declaring a schema
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
            duplicate: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in evaluation order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.fields.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    /// Look a field rule up by name
    pub fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, rule)| rule)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Check every rule's configuration without evaluating a record
    pub fn verify(&self) -> Result<()> {
        for (_, rule) in &self.fields {
            rule.required()?;
            rule.custom_error_message()?;
            rule.constraints()?;
        }
        Ok(())
    }

    /// Evaluate a record with the built-in messages
    pub fn evaluate(&self, record: &Value) -> Result<ValidationResult> {
        self.evaluate_with(record, MessageCatalog::builtin())
    }

    /// Evaluate a record
    ///
    /// A record that is not a JSON object is treated as having no keys.
    pub fn evaluate_with(
        &self,
        record: &Value,
        catalog: &MessageCatalog,
    ) -> Result<ValidationResult> {
        match record.as_object() {
            Some(map) => self.evaluate_map(map, catalog),
            None => self.evaluate_map(&Map::new(), catalog),
        }
    }

    /// Evaluate a record given as a JSON object map
    pub fn evaluate_map(
        &self,
        record: &Map<String, Value>,
        catalog: &MessageCatalog,
    ) -> Result<ValidationResult> {
        let mut last = ValidationResult::success();

        for (name, rule) in &self.fields {
            debug!(schema = %self.name, field = %name, "Evaluating field");
            let result = rule.evaluate_with(record.get(name), catalog)?;
            if !result.is_valid {
                debug!(
                    schema = %self.name,
                    field = %name,
                    error_message = %result.error_message,
                    "Record rejected"
                );
                return Ok(result);
            }
            last = result;
        }

        Ok(last)
    }
}

/// Registers fields in declaration order
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<(String, FieldRule)>,
    duplicate: Option<String>,
}

impl SchemaBuilder {
    /// Register a field; the first registration order is the evaluation order
    pub fn field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        let name = name.into();
        if self.fields.iter().any(|(field, _)| *field == name) {
            self.duplicate.get_or_insert(name);
        } else {
            self.fields.push((name, rule));
        }
        self
    }

    /// Finish the schema, rejecting duplicate field names
    pub fn build(self) -> Result<Schema> {
        if let Some(field) = self.duplicate {
            return Err(SchemaError::DuplicateField {
                schema: self.name,
                field,
            });
        }
        Ok(Schema {
            name: self.name,
            fields: self.fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{CharField, FieldPreset, NumberField};
    use serde_json::json;

    fn login() -> Schema {
        Schema::builder("login")
            .field("username", CharField::builder("用户名").max_length(10).build())
            .field("password", CharField::builder("密码").min_length(6).build())
            .build()
            .unwrap()
    }

    #[test]
    fn test_declaration_order_is_kept() {
        let schema = Schema::builder("s")
            .field("zeta", FieldRule::builder("z").build())
            .field("alpha", FieldRule::builder("a").build())
            .field("mid", FieldRule::builder("m").build())
            .build()
            .unwrap();
        let names: Vec<_> = schema.fields().map(|(name, _)| name).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_first_failure_wins() {
        let result = login().evaluate(&json!({})).unwrap();
        assert!(!result.is_valid);
        assert_eq!(result.error_message, "用户名: 不可为空");

        let result = login().evaluate(&json!({"username": "test001"})).unwrap();
        assert_eq!(result.error_message, "密码: 不可为空");
    }

    #[test]
    fn test_all_fields_pass() {
        let result = login()
            .evaluate(&json!({"username": "test001", "password": "secret99"}))
            .unwrap();
        assert!(result.is_valid);
        assert_eq!(result.error_message, "校验成功");
    }

    #[test]
    fn test_empty_schema_succeeds() {
        let schema = Schema::builder("empty").build().unwrap();
        assert!(schema.is_empty());
        assert!(schema.evaluate(&json!({"anything": 1})).unwrap().is_valid);
    }

    #[test]
    fn test_non_object_record_has_no_keys() {
        let result = login().evaluate(&json!("username")).unwrap();
        assert_eq!(result.error_message, "用户名: 不可为空");
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let err = Schema::builder("dup")
            .field("a", FieldRule::builder("a").build())
            .field("a", FieldRule::builder("b").build())
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateField { .. }));
    }

    #[test]
    fn test_configuration_error_surfaces() {
        let schema = Schema::builder("broken")
            .field("a", FieldRule::builder("a").option("maxlength", 3).build())
            .build()
            .unwrap();
        assert!(schema.verify().is_err());
        assert!(schema.evaluate(&json!({"a": "x"})).is_err());
    }

    #[test]
    fn test_optional_numeric_field() {
        let schema = Schema::builder("profile")
            .field(
                "height",
                NumberField::builder("身高").required(false).equal(1).build(),
            )
            .build()
            .unwrap();
        assert!(schema.verify().is_ok());
        assert!(schema.evaluate(&json!({})).unwrap().is_valid);
        assert_eq!(
            schema.evaluate(&json!({"height": 2})).unwrap().error_message,
            "身高: 必须等于1"
        );
    }

    #[test]
    fn test_field_lookup() {
        let schema = login();
        assert_eq!(schema.field("password").and_then(FieldRule::label), Some("密码"));
        assert!(schema.field("email").is_none());
        assert_eq!(schema.len(), 2);
    }
}
