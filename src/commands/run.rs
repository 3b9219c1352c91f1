//! The `run` command.

use crate::app::Application;
use crate::cli::RunArgs;
use crate::error::Result;

/// Bind the task name to a command and run it.
///
/// Forwarded arguments are re-joined shell-style so the command sees them
/// exactly as typed.
pub fn cmd_run(app: &Application, args: RunArgs) -> Result<i32> {
    let raw_args = shell_words::join(&args.args);
    let command = app.commands().build_command(&args.task, &raw_args);

    tracing::info!(command = %command.name(), kind = ?command.kind(), "dispatching");
    Ok(command.run(&app.builder()))
}
