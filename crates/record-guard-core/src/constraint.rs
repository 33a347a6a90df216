//! Constraint kinds and their handlers
//!
//! Every option a field rule understands maps to one [`ConstraintKind`]. The
//! kind fixes the execution priority (its declaration order below), the
//! documentation block the default error message is resolved from, and the
//! typed [`Constraint`] its option value is parsed into.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::{Result, SchemaError};
use crate::value::{text_form, text_length, values_equal};

/// Option key holding a caller-supplied message template
pub const CUSTOM_ERROR_MESSAGE_KEY: &str = "custom_error_message";

/// Closed set of constraint kinds
///
/// Variants are declared in execution priority: when a value violates
/// several constraints, the earliest one is reported. `Required` is the
/// presence gate and runs before any of the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    Required,
    DataType,
    MaxLength,
    MinLength,
    Equal,
    NotEqual,
    Regex,
}

impl ConstraintKind {
    /// All kinds in priority order
    pub const ALL: [ConstraintKind; 7] = [
        ConstraintKind::Required,
        ConstraintKind::DataType,
        ConstraintKind::MaxLength,
        ConstraintKind::MinLength,
        ConstraintKind::Equal,
        ConstraintKind::NotEqual,
        ConstraintKind::Regex,
    ];

    /// The option key for this kind
    pub fn key(self) -> &'static str {
        match self {
            ConstraintKind::Required => "required",
            ConstraintKind::DataType => "data_type",
            ConstraintKind::MaxLength => "max_length",
            ConstraintKind::MinLength => "min_length",
            ConstraintKind::Equal => "equal",
            ConstraintKind::NotEqual => "not_equal",
            ConstraintKind::Regex => "regex",
        }
    }

    /// Look a kind up by option key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    /// Documentation block for this kind
    ///
    /// The `:error_message:` line is the default message template.
    pub fn documentation(self) -> &'static str {
        match self {
            ConstraintKind::Required => {
                "Fails when a required field has no value.\n\
                 :error_message: 不可为空"
            }
            ConstraintKind::DataType => {
                "Checks the value's type against one type name or a list of them.\n\
                 :error_message: 数据类型错误"
            }
            ConstraintKind::MaxLength => {
                "Compares the character length of the value's text form with the bound.\n\
                 :error_message: 长度不可大于{max_length}"
            }
            ConstraintKind::MinLength => {
                "Compares the character length of the value's text form with the bound.\n\
                 :error_message: 长度不可小于{min_length}"
            }
            ConstraintKind::Equal => {
                "Requires the value to equal the configured value.\n\
                 :error_message: 必须等于{equal}"
            }
            ConstraintKind::NotEqual => {
                "Requires the value to differ from the configured value.\n\
                 :error_message: 不可等于{not_equal}"
            }
            ConstraintKind::Regex => {
                "Requires the pattern to match at the start of the value's text form.\n\
                 :error_message: 正则匹配失败"
            }
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Value types a `data_type` option can name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Text,
    Integer,
    Float,
    Boolean,
    List,
    Object,
}

impl DataType {
    /// Type name as written in options
    pub fn name(self) -> &'static str {
        match self {
            DataType::Text => "text",
            DataType::Integer => "integer",
            DataType::Float => "float",
            DataType::Boolean => "boolean",
            DataType::List => "list",
            DataType::Object => "object",
        }
    }

    /// Parse a type name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "text" => Some(DataType::Text),
            "integer" => Some(DataType::Integer),
            "float" => Some(DataType::Float),
            "boolean" => Some(DataType::Boolean),
            "list" => Some(DataType::List),
            "object" => Some(DataType::Object),
            _ => None,
        }
    }

    /// Check whether a value is of this type
    ///
    /// Integers and floats are distinct: `1` is an integer, `1.0` a float.
    pub fn matches(self, value: &Value) -> bool {
        match (self, value) {
            (DataType::Text, Value::String(_)) => true,
            (DataType::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (DataType::Float, Value::Number(n)) => n.is_f64(),
            (DataType::Boolean, Value::Bool(_)) => true,
            (DataType::List, Value::Array(_)) => true,
            (DataType::Object, Value::Object(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single type or a union of acceptable types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSpec {
    Single(DataType),
    Union(Vec<DataType>),
}

impl TypeSpec {
    /// Parse a `data_type` option: a type name or a non-empty list of names
    pub fn from_value(value: &Value) -> Result<Self> {
        let parse_name = |name: &Value| -> Result<DataType> {
            name.as_str()
                .and_then(DataType::from_name)
                .ok_or_else(|| {
                    SchemaError::invalid_option(
                        ConstraintKind::DataType.key(),
                        format!("unknown type name {}", name),
                    )
                })
        };

        match value {
            Value::String(_) => parse_name(value).map(TypeSpec::Single),
            Value::Array(names) if !names.is_empty() => names
                .iter()
                .map(parse_name)
                .collect::<Result<Vec<_>>>()
                .map(TypeSpec::Union),
            other => Err(SchemaError::invalid_option(
                ConstraintKind::DataType.key(),
                format!("expected a type name or a non-empty list of names, got {}", other),
            )),
        }
    }

    /// Check membership
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            TypeSpec::Single(data_type) => data_type.matches(value),
            TypeSpec::Union(types) => types.iter().any(|t| t.matches(value)),
        }
    }
}

/// A parsed constraint, ready to run
#[derive(Debug, Clone)]
pub enum Constraint {
    DataType(TypeSpec),
    MaxLength(usize),
    MinLength(usize),
    Equal(Value),
    NotEqual(Value),
    Regex { pattern: String, compiled: Regex },
}

impl Constraint {
    /// Parse the option value configured for `kind`
    pub fn parse(kind: ConstraintKind, value: &Value) -> Result<Self> {
        let length = |value: &Value| -> Result<usize> {
            value
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| {
                    SchemaError::invalid_option(
                        kind.key(),
                        format!("expected a non-negative integer, got {}", value),
                    )
                })
        };

        match kind {
            ConstraintKind::Required => Err(SchemaError::invalid_option(
                kind.key(),
                "required is a presence gate, not a value constraint",
            )),
            ConstraintKind::DataType => TypeSpec::from_value(value).map(Constraint::DataType),
            ConstraintKind::MaxLength => length(value).map(Constraint::MaxLength),
            ConstraintKind::MinLength => length(value).map(Constraint::MinLength),
            ConstraintKind::Equal => Ok(Constraint::Equal(value.clone())),
            ConstraintKind::NotEqual => Ok(Constraint::NotEqual(value.clone())),
            ConstraintKind::Regex => {
                let pattern = value.as_str().ok_or_else(|| {
                    SchemaError::invalid_option(
                        kind.key(),
                        format!("expected a pattern string, got {}", value),
                    )
                })?;
                let compiled = Regex::new(pattern).map_err(|source| SchemaError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })?;
                Ok(Constraint::Regex {
                    pattern: pattern.to_string(),
                    compiled,
                })
            }
        }
    }

    /// The kind this constraint was parsed from
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Constraint::DataType(_) => ConstraintKind::DataType,
            Constraint::MaxLength(_) => ConstraintKind::MaxLength,
            Constraint::MinLength(_) => ConstraintKind::MinLength,
            Constraint::Equal(_) => ConstraintKind::Equal,
            Constraint::NotEqual(_) => ConstraintKind::NotEqual,
            Constraint::Regex { .. } => ConstraintKind::Regex,
        }
    }

    /// Run the constraint against a present value
    pub fn check(&self, value: &Value) -> bool {
        match self {
            Constraint::DataType(spec) => spec.matches(value),
            Constraint::MaxLength(max) => text_length(value) <= *max,
            Constraint::MinLength(min) => text_length(value) >= *min,
            Constraint::Equal(expected) => values_equal(value, expected),
            Constraint::NotEqual(unexpected) => !values_equal(value, unexpected),
            // Leftmost match, so any match at offset 0 is the one found.
            Constraint::Regex { compiled, .. } => compiled
                .find(&text_form(value))
                .map_or(false, |m| m.start() == 0),
        }
    }
}
