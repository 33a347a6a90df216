//! Handler integration
//!
//! Wraps a handler so that a schema runs against the incoming record first.
//! The verdict is written onto the record under `is_valid` and
//! `error_message`, then the handler is called with the annotated record.
//! By default the handler always runs and is expected to branch on
//! `is_valid`; [`ValidatedHandler::reject_with`] installs an early return
//! instead.

use serde_json::{Map, Value};
use std::marker::PhantomData;
use tracing::debug;

use crate::error::Result;
use crate::message::MessageCatalog;
use crate::result::ValidationResult;
use crate::schema::DeclareSchema;

/// Record key receiving the verdict
pub const IS_VALID_KEY: &str = "is_valid";

/// Record key receiving the message
pub const ERROR_MESSAGE_KEY: &str = "error_message";

/// Something carrying a record that can be validated and annotated
pub trait ValidationTarget {
    /// The record's fields, or `None` when it has none
    fn record(&self) -> Option<&Map<String, Value>>;

    /// Store the verdict on the target
    fn annotate(&mut self, result: &ValidationResult);
}

impl ValidationTarget for Map<String, Value> {
    fn record(&self) -> Option<&Map<String, Value>> {
        Some(self)
    }

    fn annotate(&mut self, result: &ValidationResult) {
        self.insert(IS_VALID_KEY.to_string(), Value::Bool(result.is_valid));
        self.insert(
            ERROR_MESSAGE_KEY.to_string(),
            Value::String(result.error_message.clone()),
        );
    }
}

/// Fallback invoked instead of the handler for rejected records
pub type Rejection<T, R> = Box<dyn Fn(&mut T, &ValidationResult) -> R + Send + Sync>;

/// A handler guarded by the schema `S`
pub struct ValidatedHandler<S, T, R, F> {
    handler: F,
    rejection: Option<Rejection<T, R>>,
    catalog: MessageCatalog,
    _schema: PhantomData<fn() -> S>,
}

impl<S, T, R, F> ValidatedHandler<S, T, R, F>
where
    S: DeclareSchema,
    T: ValidationTarget,
    F: Fn(&mut T) -> R,
{
    /// Wrap a handler; it runs for every record, valid or not
    pub fn new(handler: F) -> Self {
        Self {
            handler,
            rejection: None,
            catalog: MessageCatalog::builtin().clone(),
            _schema: PhantomData,
        }
    }

    /// Use a configured message catalog
    pub fn with_catalog(mut self, catalog: MessageCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Return early through `fallback` when a record is rejected
    pub fn reject_with<G>(mut self, fallback: G) -> Self
    where
        G: Fn(&mut T, &ValidationResult) -> R + Send + Sync + 'static,
    {
        self.rejection = Some(Box::new(fallback));
        self
    }

    /// Validate and annotate the target, then dispatch
    ///
    /// Errors only when the schema itself is misconfigured.
    pub fn call(&self, target: &mut T) -> Result<R> {
        let schema = S::declare()?;
        let result = match target.record() {
            Some(record) => schema.evaluate_map(record, &self.catalog)?,
            None => schema.evaluate_map(&Map::new(), &self.catalog)?,
        };

        debug!(
            schema = %schema.name(),
            is_valid = result.is_valid,
            "Annotating record"
        );
        target.annotate(&result);

        if !result.is_valid {
            if let Some(reject) = &self.rejection {
                return Ok(reject(target, &result));
            }
        }
        Ok((self.handler)(target))
    }
}

/// Wrap `handler` so every call validates against `S` first
///
/// ```
/// use record_guard_core::{validated, CharField, DeclareSchema, FieldPreset, Schema};
/// use serde_json::{json, Map, Value};
///
/// struct Login;
///
/// impl DeclareSchema for Login {
///     fn declare() -> record_guard_core::Result<Schema> {
///         Schema::builder("login")
///             .field("username", CharField::builder("用户名").max_length(10).build())
///             .build()
///     }
/// }
///
/// let api_login = validated::<Login, _, _, _>(|body: &mut Map<String, Value>| {
///     body["error_message"].as_str().map(str::to_string)
/// });
///
/// let mut body = Map::new();
/// let message = api_login(&mut body).unwrap();
/// assert_eq!(message.as_deref(), Some("用户名: 不可为空"));
/// assert_eq!(body["is_valid"], json!(false));
/// ```
pub fn validated<S, T, R, F>(handler: F) -> impl Fn(&mut T) -> Result<R>
where
    S: DeclareSchema,
    T: ValidationTarget,
    F: Fn(&mut T) -> R,
{
    let wrapped = ValidatedHandler::<S, T, R, F>::new(handler);
    move |target: &mut T| wrapped.call(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{CharField, FieldPreset};
    use crate::schema::Schema;
    use serde_json::json;
    use std::cell::Cell;

    struct Login;

    impl DeclareSchema for Login {
        fn declare() -> Result<Schema> {
            Schema::builder("login")
                .field("username", CharField::builder("用户名").max_length(10).build())
                .build()
        }
    }

    struct Broken;

    impl DeclareSchema for Broken {
        fn declare() -> Result<Schema> {
            Schema::builder("broken")
                .field("a", CharField::builder("a").option("nope", 1).build())
                .build()
        }
    }

    fn body(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_handler_sees_annotation_on_failure() {
        let calls = Cell::new(0);
        let handler = validated::<Login, _, _, _>(|body: &mut Map<String, Value>| {
            calls.set(calls.get() + 1);
            body[IS_VALID_KEY].as_bool()
        });

        let mut record = Map::new();
        assert_eq!(handler(&mut record).unwrap(), Some(false));
        assert_eq!(calls.get(), 1);
        assert_eq!(record[ERROR_MESSAGE_KEY], json!("用户名: 不可为空"));
    }

    #[test]
    fn test_handler_sees_annotation_on_success() {
        let handler = validated::<Login, _, _, _>(|body: &mut Map<String, Value>| body.clone());
        let mut record = body(json!({"username": "test001", "age": 20.2}));
        let seen = handler(&mut record).unwrap();
        assert_eq!(seen[IS_VALID_KEY], json!(true));
        assert_eq!(seen[ERROR_MESSAGE_KEY], json!("校验成功"));
        assert_eq!(seen["age"], json!(20.2));
    }

    #[test]
    fn test_rejection_policy_short_circuits() {
        let wrapped = ValidatedHandler::<Login, Map<String, Value>, String, _>::new(
            |_: &mut Map<String, Value>| "handled".to_string(),
        )
        .reject_with(|_, result| format!("rejected: {}", result));

        let mut bad = Map::new();
        assert_eq!(wrapped.call(&mut bad).unwrap(), "rejected: 用户名: 不可为空");
        assert_eq!(bad[IS_VALID_KEY], json!(false));

        let mut good = body(json!({"username": "ok"}));
        assert_eq!(wrapped.call(&mut good).unwrap(), "handled");
    }

    #[test]
    fn test_configuration_error_is_returned() {
        let handler = validated::<Broken, _, _, _>(|_: &mut Map<String, Value>| ());
        let mut record = body(json!({"a": "x"}));
        assert!(handler(&mut record).is_err());
        assert!(!record.contains_key(IS_VALID_KEY));
    }
}
