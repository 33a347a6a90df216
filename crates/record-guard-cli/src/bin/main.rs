//! Record Guard CLI
//!
//! # Usage
//!
//! ```bash
//! # Check a record file against a built-in schema
//! record-guard check --schema login --record body.json
//!
//! # List built-in schemas as JSON
//! record-guard schemas --format json
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success - record passed
//! - 1: Record failed a field rule
//! - 3: Invalid input or arguments
//! - 4: File not found or inaccessible
//! - 5: Schema or configuration errors
//! - 10: Internal error

use clap::Parser;
use record_guard_cli::{run_cli, GuardCli};
use tracing::Level;

fn main() {
    let cli = GuardCli::parse();

    let level = if cli.quiet {
        Level::ERROR
    } else {
        match cli.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = run_cli(cli);
    std::process::exit(exit_code.into());
}
