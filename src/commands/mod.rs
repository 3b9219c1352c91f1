//! Command implementations for hoist.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Every command runs against an [`Application`]
//! bootstrapped from the resolved config file.

mod list;
mod run;
mod strategies;

use crate::app::Application;
use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::error::{HoistError, Result};
use crate::exit_codes;
use std::path::Path;

/// Dispatch a command to its implementation.
///
/// Returns the process exit code on success; errors carry their own.
pub fn dispatch(cli: Cli) -> Result<i32> {
    let config = load_config(cli.config.as_deref())?;
    let app = Application::new(config)?;

    match cli.command {
        Command::List(args) => list::cmd_list(&app, args),
        Command::Run(args) => run::cmd_run(&app, args),
        Command::Strategies(args) => strategies::cmd_strategies(&app, args),
        Command::Config => cmd_config(&app),
    }
}

/// Load the explicit config file, or discover one in the working directory.
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => {
            let cwd = std::env::current_dir().map_err(|e| {
                HoistError::UserError(format!("failed to get current working directory: {}", e))
            })?;
            Config::discover(cwd)
        }
    }
}

fn cmd_config(app: &Application) -> Result<i32> {
    print!("{}", app.config().to_yaml()?);
    Ok(exit_codes::SUCCESS)
}
