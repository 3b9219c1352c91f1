//! The `list` command.

use crate::app::Application;
use crate::cli::ListArgs;
use crate::error::{HoistError, Result};
use crate::exit_codes;
use serde_json::json;

/// Print every command that can be run, as text or JSON.
pub fn cmd_list(app: &Application, args: ListArgs) -> Result<i32> {
    let builder = app.builder();
    let commands = app.commands().build_commands(&builder);

    if args.json {
        let entries: Vec<_> = commands
            .iter()
            .map(|command| {
                json!({
                    "name": command.name(),
                    "task": command.task_name(),
                    "kind": format!("{:?}", command.kind()),
                    "description": command.description(),
                })
            })
            .collect();
        let output = serde_json::to_string_pretty(&entries).map_err(|e| {
            HoistError::UserError(format!("failed to serialize command list: {}", e))
        })?;
        println!("{}", output);
        return Ok(exit_codes::SUCCESS);
    }

    let width = commands.iter().map(|c| c.name().len()).max().unwrap_or(0);
    println!("Available commands ({}):", commands.len());
    println!();
    for command in &commands {
        println!("  {:width$}  {}", command.name(), command.description(), width = width);
    }

    Ok(exit_codes::SUCCESS)
}
