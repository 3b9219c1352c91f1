//! CLI argument parsing for hoist.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Hoist: resolve deployment tasks and run them as commands.
///
/// Tasks can be shell commands, built-in task classes, `Target::method`
/// references or custom tasks declared in `hoist.yaml`.
#[derive(Parser, Debug)]
#[command(name = "hoist")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file (default: `hoist.yaml` in the current directory).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    ///
    /// `HOIST_LOG` takes precedence when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for hoist.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every command that can be run.
    List(ListArgs),

    /// Run a task by name.
    ///
    /// The name may be the root task, a built-in task, a custom task,
    /// a `Target::method` reference or a shell command. Remaining
    /// arguments are forwarded to the task.
    Run(RunArgs),

    /// Show the strategy bound for each phase.
    Strategies(StrategiesArgs),

    /// Print the effective configuration as YAML.
    Config,
}

/// Arguments for the `list` command.
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Task name to run.
    pub task: String,

    /// Arguments forwarded to the task.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Arguments for the `strategies` command.
#[derive(Parser, Debug)]
pub struct StrategiesArgs {
    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
