//! Field subtypes
//!
//! A subtype is a set of preset options merged into the caller's options
//! when the rule is built. Presets sit right after `required`, and anything
//! the caller sets explicitly wins.
//!
//! ```
//! use record_guard_core::{EmailField, FieldPreset};
//! use serde_json::json;
//!
//! let email = EmailField::builder("邮箱").max_length(30).build();
//! let result = email.evaluate(Some(&json!("bad-email"))).unwrap();
//! assert_eq!(result.error_message, "邮箱: 邮箱格式错误");
//! ```

use crate::constraint::{ConstraintKind, DataType, CUSTOM_ERROR_MESSAGE_KEY};
use crate::field::{FieldBuilder, FieldOptions, FieldRule};

/// Pattern applied by [`EmailField`]
pub const EMAIL_PATTERN: &str = r"^\w+([-+.]\w+)*@\w+([-.]\w+)*\.\w+([-.]\w+)*$";

/// Message used by [`EmailField`] for any failing constraint
pub const EMAIL_ERROR_MESSAGE: &str = "邮箱格式错误";

/// A field subtype: preset options plus a builder that carries them
pub trait FieldPreset {
    /// Options injected into every rule of this subtype
    fn defaults() -> FieldOptions;

    /// Start building a rule of this subtype
    fn builder(label: impl Into<String>) -> FieldBuilder {
        FieldRule::builder(label).preset(Self::defaults())
    }
}

fn data_type(data_type: DataType) -> FieldOptions {
    FieldOptions::new().with(ConstraintKind::DataType.key(), data_type.name())
}

/// Text values
#[derive(Debug, Clone, Copy, Default)]
pub struct CharField;

impl FieldPreset for CharField {
    fn defaults() -> FieldOptions {
        data_type(DataType::Text)
    }
}

/// Integer values
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerField;

impl FieldPreset for IntegerField {
    fn defaults() -> FieldOptions {
        data_type(DataType::Integer)
    }
}

/// Floating-point values
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatField;

impl FieldPreset for FloatField {
    fn defaults() -> FieldOptions {
        data_type(DataType::Float)
    }
}

/// Integer or floating-point values
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberField;

impl FieldPreset for NumberField {
    fn defaults() -> FieldOptions {
        FieldOptions::new().with(
            ConstraintKind::DataType.key(),
            vec![DataType::Integer.name(), DataType::Float.name()],
        )
    }
}

/// Email addresses: a text field with an address pattern and its own message
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailField;

impl FieldPreset for EmailField {
    fn defaults() -> FieldOptions {
        FieldOptions::new()
            .with(ConstraintKind::Regex.key(), EMAIL_PATTERN)
            .with(CUSTOM_ERROR_MESSAGE_KEY, EMAIL_ERROR_MESSAGE)
    }

    fn builder(label: impl Into<String>) -> FieldBuilder {
        CharField::builder(label).preset(Self::defaults())
    }
}
