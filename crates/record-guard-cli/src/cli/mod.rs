//! CLI module for Record Guard
//!
//! Command-line access to the built-in schemas: check a record file and
//! list the declared fields.

pub mod commands;
pub mod output;

pub use commands::{check_record, GuardCli, GuardCommands};
pub use output::{CheckOutput, OutputFormat, SchemaOutput};

use crate::error::CliError;

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Record passed every field rule
    Success = 0,
    /// Record failed a field rule
    ValidationError = 1,
    /// Invalid input or arguments
    InvalidInput = 3,
    /// File not found or inaccessible
    FileError = 4,
    /// Schema or engine configuration errors
    SchemaError = 5,
    /// Internal error
    InternalError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl ExitCode {
    /// Determine the exit code for a failed command
    pub fn from_error(error: &CliError) -> Self {
        match error {
            CliError::InvalidInput(_) | CliError::ParseError(_) => ExitCode::InvalidInput,
            CliError::FileError(_) => ExitCode::FileError,
            CliError::SchemaError(_) => ExitCode::SchemaError,
            CliError::SerializationError(_) => ExitCode::InternalError,
        }
    }
}

/// Run the CLI with the given arguments and return the exit code
pub fn run(cli: GuardCli) -> Result<ExitCode, CliError> {
    match cli.command {
        GuardCommands::Check {
            schema,
            record,
            config,
            format,
        } => commands::execute_check(&schema, &record, config.as_deref(), format, cli.quiet),
        GuardCommands::Schemas { format } => commands::execute_schemas(format),
    }
}
