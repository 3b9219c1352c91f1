//! Hoist: a small deployment task runner.
//!
//! This is the main entry point for the `hoist` CLI. It parses arguments,
//! sets up logging, dispatches to the appropriate command handler, and
//! handles errors with proper exit codes.

mod cli;
mod commands;
pub mod app;
pub mod binding;
pub mod builtin;
pub mod config;
pub mod container;
pub mod error;
pub mod exit_codes;
pub mod resolver;
pub mod strategies;
pub mod task;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "HOIST_LOG";

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        let level = match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        EnvFilter::new(level)
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    match commands::dispatch(cli) {
        Ok(code) => ExitCode::from(code as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
