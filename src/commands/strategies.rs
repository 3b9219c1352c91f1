//! The `strategies` command.

use crate::app::Application;
use crate::cli::StrategiesArgs;
use crate::error::{HoistError, Result};
use crate::exit_codes;
use serde_json::json;

/// Print the strategy bound for each phase, as text or JSON.
pub fn cmd_strategies(app: &Application, args: StrategiesArgs) -> Result<i32> {
    let binder = app.strategies();
    let bound = binder.bound_strategies();

    if args.json {
        let entries: serde_json::Map<String, serde_json::Value> = bound
            .iter()
            .map(|(phase, class)| (phase.clone(), json!(class)))
            .collect();
        let output = serde_json::to_string_pretty(&entries).map_err(|e| {
            HoistError::UserError(format!("failed to serialize strategy list: {}", e))
        })?;
        println!("{}", output);
        return Ok(exit_codes::SUCCESS);
    }

    if bound.is_empty() {
        println!("No strategies bound.");
        return Ok(exit_codes::SUCCESS);
    }

    println!("Bound strategies:");
    for (phase, _) in &bound {
        // Describe through the live binding, not the listing snapshot.
        match binder.build_strategy(phase, "") {
            Some(strategy) => println!(
                "  {:<14} {} ({})",
                phase,
                strategy.name(),
                strategy.description()
            ),
            None => println!("  {:<14} (unbound)", phase),
        }
    }

    Ok(exit_codes::SUCCESS)
}
