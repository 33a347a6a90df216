//! Record Guard core
//!
//! A declarative record-validation engine. A schema is an ordered set of
//! named field rules; evaluating a record runs the rules in declaration
//! order and reports the first failure as a field-scoped message.
//!
//! ## Architecture
//!
//! 1. **Templates** (`template`): parse documentation text or an override
//!    into a message skeleton and its ordered placeholder names.
//!
//! 2. **Constraints** (`constraint`): the closed set of constraint kinds,
//!    their priority, documentation and handlers.
//!
//! 3. **Field rules** (`field`): ordered options, the required gate, and
//!    first-violation evaluation with message formatting.
//!
//! 4. **Subtypes** (`fields`): presets for text, integer, float, number
//!    and email fields.
//!
//! 5. **Schemas** (`schema`): explicit field registration and first-failure
//!    record evaluation.
//!
//! 6. **Wrapper** (`wrapper`): run a schema before a handler and annotate
//!    the record with the verdict.
//!
//! ## Example
//!
//! ```rust
//! use record_guard_core::{CharField, EmailField, FieldPreset, NumberField, Schema};
//! use serde_json::json;
//!
//! let register = Schema::builder("register")
//!     .field("username", CharField::builder("用户名").max_length(10).build())
//!     .field("email", EmailField::builder("邮箱").build())
//!     .field("height", NumberField::builder("身高").required(false).build())
//!     .build()
//!     .unwrap();
//!
//! let result = register
//!     .evaluate(&json!({"username": "test001", "email": "bad-email"}))
//!     .unwrap();
//! assert!(!result.is_valid);
//! assert_eq!(result.error_message, "邮箱: 邮箱格式错误");
//! ```

pub mod config;
pub mod constraint;
pub mod error;
pub mod field;
pub mod fields;
pub mod message;
pub mod result;
pub mod schema;
pub mod template;
pub mod value;
pub mod wrapper;

pub use config::EngineConfig;
pub use constraint::{Constraint, ConstraintKind, DataType, TypeSpec};
pub use error::{Result, SchemaError};
pub use field::{FieldBuilder, FieldOptions, FieldRule};
pub use fields::{CharField, EmailField, FieldPreset, FloatField, IntegerField, NumberField};
pub use message::{MessageCatalog, SUCCESS_MESSAGE};
pub use result::ValidationResult;
pub use schema::{DeclareSchema, Schema, SchemaBuilder};
pub use template::ErrorTemplate;
pub use wrapper::{validated, ValidatedHandler, ValidationTarget};

/// Crate version (from Cargo.toml)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
