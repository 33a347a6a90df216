//! CLI command definitions for Record Guard
//!
//! Provides Clap-based commands for checking record files against the
//! built-in schemas and listing those schemas.

use clap::{Parser, Subcommand};
use record_guard_core::{EngineConfig, MessageCatalog};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::output::{render_schemas, CheckOutput, OutputFormat, SchemaOutput};
use super::ExitCode;
use crate::error::{CliError, Result};
use crate::schemas::{builtin_schema, BUILTIN_SCHEMAS};

/// Record Guard CLI
///
/// Check JSON, YAML or TOML records against declarative schemas.
#[derive(Parser, Debug)]
#[command(name = "record-guard")]
#[command(about = "Record Guard - Declarative record validation", long_about = None)]
#[command(version)]
pub struct GuardCli {
    /// Output verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: GuardCommands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum GuardCommands {
    /// Check a record file against a built-in schema
    ///
    /// Fields are evaluated in declaration order and the first failure is
    /// reported.
    Check {
        /// Name of the built-in schema (login, register, profile)
        #[arg(short, long)]
        schema: String,

        /// Path to the record file (json, yaml, yml, toml)
        #[arg(short, long)]
        record: PathBuf,

        /// Engine configuration file with label and message overrides
        ///
        /// Falls back to RECORD_GUARD_CONFIG when omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format for the verdict
        #[arg(long, value_enum, default_value = "table")]
        format: Option<OutputFormat>,
    },

    /// List the built-in schemas and their field options
    Schemas {
        /// Output format for the listing
        #[arg(long, value_enum, default_value = "table")]
        format: Option<OutputFormat>,
    },
}

/// Execute the check command
pub fn execute_check(
    schema_name: &str,
    record_path: &Path,
    config_path: Option<&Path>,
    format: Option<OutputFormat>,
    quiet: bool,
) -> Result<ExitCode> {
    let output = check_record(schema_name, record_path, config_path)?;

    if !quiet {
        output.render(format.unwrap_or_default())?;
    }

    Ok(if output.is_valid {
        ExitCode::Success
    } else {
        ExitCode::ValidationError
    })
}

/// Check one record file and return the verdict without rendering it
///
/// Without `config_path` the engine configuration comes from the
/// environment.
pub fn check_record(
    schema_name: &str,
    record_path: &Path,
    config_path: Option<&Path>,
) -> Result<CheckOutput> {
    let config = match config_path {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::from_env()?,
    };
    let catalog = MessageCatalog::from_config(&config);

    let schema = builtin_schema(schema_name).ok_or_else(|| {
        CliError::invalid_input(format!(
            "Unknown schema: {}. Available schemas: {}",
            schema_name,
            BUILTIN_SCHEMAS.join(", ")
        ))
    })??;

    if !record_path.exists() {
        return Err(CliError::file_error(format!(
            "Record file not found: {}",
            record_path.display()
        )));
    }
    let content = std::fs::read_to_string(record_path).map_err(|e| {
        CliError::file_error(format!("Failed to read {}: {}", record_path.display(), e))
    })?;
    let record = parse_record_file(record_path, &content)?;
    debug!(record = %record_path.display(), "Parsed record file");

    let result = schema.evaluate_with(&record, &catalog)?;
    info!(
        schema = schema.name(),
        is_valid = result.is_valid,
        "Record checked"
    );

    Ok(CheckOutput::new(
        schema.name(),
        record_path.display().to_string(),
        &result,
    ))
}

/// Execute the schemas command
pub fn execute_schemas(format: Option<OutputFormat>) -> Result<ExitCode> {
    let schemas = BUILTIN_SCHEMAS
        .iter()
        .filter_map(|name| builtin_schema(name))
        .map(|declared| declared.map(|schema| SchemaOutput::from_schema(&schema)))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    render_schemas(&schemas, format.unwrap_or_default())?;
    Ok(ExitCode::Success)
}

/// Parse a record file based on its extension
pub(crate) fn parse_record_file(path: &Path, content: &str) -> Result<serde_json::Value> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "json" => Ok(serde_json::from_str(content)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(content)?),
        "toml" => {
            let toml_value: toml::Value = toml::from_str(content)?;
            serde_json::to_value(toml_value)
                .map_err(|e| CliError::parse_error(format!("Conversion error: {}", e)))
        }
        _ => Err(CliError::invalid_input(format!(
            "Unsupported file format: {}. Supported formats: json, yaml, yml, toml",
            extension
        ))),
    }
}
