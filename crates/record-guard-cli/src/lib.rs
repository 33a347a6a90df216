//! Record Guard CLI
//!
//! Command-line front end for the record validation engine.
//!
//! ## CLI Usage
//!
//! ```bash
//! # Check a record against a built-in schema
//! record-guard check --schema register --record body.json
//!
//! # Use English messages from a configuration file
//! record-guard check --schema login --record body.yaml --config messages.toml --format json
//!
//! # List built-in schemas
//! record-guard schemas --format yaml
//! ```

pub mod cli;
pub mod error;
pub mod schemas;

pub use cli::{ExitCode, GuardCli, GuardCommands, OutputFormat};
pub use error::{CliError, Result};

/// Run the CLI and map any error to an exit code
///
/// ```rust,no_run
/// use clap::Parser;
/// use record_guard_cli::{run_cli, GuardCli};
///
/// let cli = GuardCli::parse();
/// let exit_code = run_cli(cli);
/// std::process::exit(exit_code.into());
/// ```
pub fn run_cli(cli: GuardCli) -> ExitCode {
    match cli::run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from_error(&e)
        }
    }
}
