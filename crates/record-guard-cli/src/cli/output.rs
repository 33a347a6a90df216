//! Output formatting for the Record Guard CLI
//!
//! Renders check verdicts and schema listings as JSON, YAML, or a colored
//! human-readable table.

use clap::ValueEnum;
use colored::Colorize;
use record_guard_core::{FieldRule, Schema, ValidationResult};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

use crate::error::{CliError, Result};

/// Output format options for CLI results
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum OutputFormat {
    /// Human-readable table format with colors
    #[default]
    Table,
    /// JSON format for machine processing
    Json,
    /// YAML format
    Yaml,
}

fn render_serialized<T: Serialize>(value: &T, format: OutputFormat) -> Result<Option<String>> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map(Some)
            .map_err(|e| CliError::SerializationError(e.to_string())),
        OutputFormat::Yaml => serde_yaml::to_string(value)
            .map(Some)
            .map_err(|e| CliError::SerializationError(e.to_string())),
        OutputFormat::Table => Ok(None),
    }
}

/// Verdict for one record file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckOutput {
    /// Schema the record was checked against
    pub schema: String,
    /// Record file that was checked
    pub record: String,
    /// Overall verdict
    pub is_valid: bool,
    /// Success phrase or first failure
    pub error_message: String,
}

impl CheckOutput {
    /// Create output from a validation result
    pub fn new(schema: &str, record: impl Into<String>, result: &ValidationResult) -> Self {
        Self {
            schema: schema.to_string(),
            record: record.into(),
            is_valid: result.is_valid,
            error_message: result.error_message.clone(),
        }
    }

    /// Render output in the specified format
    pub fn render(&self, format: OutputFormat) -> Result<()> {
        match render_serialized(self, format)? {
            Some(text) => println!("{}", text),
            None => self.render_table(),
        }
        Ok(())
    }

    fn render_table(&self) {
        let mut stdout = io::stdout();

        writeln!(stdout).ok();
        writeln!(stdout, "{}", "Validation Result".cyan().bold()).ok();
        writeln!(stdout, "{}", "=".repeat(60)).ok();
        writeln!(stdout, "  {} {}", "Schema:".dimmed(), self.schema.cyan()).ok();
        writeln!(stdout, "  {} {}", "Record:".dimmed(), self.record).ok();
        writeln!(stdout).ok();

        if self.is_valid {
            writeln!(stdout, "{} {}", "+".green(), self.error_message.green()).ok();
        } else {
            writeln!(stdout, "{} {}", "x".red(), self.error_message.red().bold()).ok();
        }

        stdout.flush().ok();
    }
}

/// One option of a field, in configuration order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionOutput {
    pub key: String,
    pub value: serde_json::Value,
}

/// One field of a schema listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldOutput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub options: Vec<OptionOutput>,
}

impl FieldOutput {
    fn from_rule(name: &str, rule: &FieldRule) -> Self {
        Self {
            name: name.to_string(),
            label: rule.label().map(str::to_string),
            options: rule
                .options()
                .iter()
                .map(|(key, value)| OptionOutput {
                    key: key.to_string(),
                    value: value.clone(),
                })
                .collect(),
        }
    }
}

/// A schema and its fields in evaluation order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaOutput {
    pub name: String,
    pub fields: Vec<FieldOutput>,
}

impl SchemaOutput {
    /// Describe a schema
    pub fn from_schema(schema: &Schema) -> Self {
        Self {
            name: schema.name().to_string(),
            fields: schema
                .fields()
                .map(|(name, rule)| FieldOutput::from_rule(name, rule))
                .collect(),
        }
    }
}

/// Render a list of schemas
pub fn render_schemas(schemas: &[SchemaOutput], format: OutputFormat) -> Result<()> {
    if let Some(text) = render_serialized(&schemas, format)? {
        println!("{}", text);
        return Ok(());
    }

    let mut stdout = io::stdout();
    for schema in schemas {
        writeln!(stdout).ok();
        writeln!(stdout, "{}", schema.name.cyan().bold()).ok();
        writeln!(stdout, "{}", "-".repeat(60)).ok();
        for field in &schema.fields {
            let label = field.label.as_deref().unwrap_or("-");
            writeln!(stdout, "  {} ({})", field.name.green(), label.dimmed()).ok();
            for option in &field.options {
                writeln!(stdout, "    {} = {}", option.key, option.value).ok();
            }
        }
    }
    stdout.flush().ok();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use record_guard_core::{CharField, FieldPreset};

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn test_check_output_from_result() {
        let result = ValidationResult::failure("用户名", "不可为空");
        let output = CheckOutput::new("login", "body.json", &result);
        assert!(!output.is_valid);
        assert_eq!(output.error_message, "用户名: 不可为空");

        let json = render_serialized(&output, OutputFormat::Json).unwrap().unwrap();
        assert!(json.contains("\"is_valid\": false"));
        assert!(render_serialized(&output, OutputFormat::Table).unwrap().is_none());
    }

    #[test]
    fn test_schema_output_keeps_option_order() {
        let schema = Schema::builder("login")
            .field(
                "username",
                CharField::builder("用户名").required(true).max_length(10).build(),
            )
            .build()
            .unwrap();
        let output = SchemaOutput::from_schema(&schema);
        let keys: Vec<_> = output.fields[0].options.iter().map(|o| o.key.as_str()).collect();
        assert_eq!(keys, ["required", "data_type", "max_length"]);
        assert_eq!(output.fields[0].label.as_deref(), Some("用户名"));
    }

    #[test]
    fn test_yaml_rendering() {
        let output = CheckOutput::new("profile", "p.yaml", &ValidationResult::success());
        let yaml = render_serialized(&output, OutputFormat::Yaml).unwrap().unwrap();
        assert!(yaml.contains("is_valid: true"));
    }
}
