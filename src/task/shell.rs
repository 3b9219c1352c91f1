//! Local shell command runner.

use crate::error::{HoistError, Result};
use std::process::Command;

/// Default shell program.
pub const DEFAULT_SHELL: &str = "sh";

/// Default flag that makes the shell read the command from its argument.
pub const DEFAULT_SHELL_FLAG: &str = "-c";

/// The shell a task runs its commands through (`<program> <flag> <command>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    program: String,
    flag: String,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(DEFAULT_SHELL, DEFAULT_SHELL_FLAG)
    }
}

impl Shell {
    /// Create a shell from a program and its command flag.
    pub fn new(program: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            flag: flag.into(),
        }
    }

    /// The shell program.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run a command and return its trimmed stdout.
    ///
    /// # Errors
    ///
    /// - `ExecutionError` if the shell cannot be spawned
    /// - `CommandFailed` if the command exits unsuccessfully
    pub fn run(&self, command: &str) -> Result<String> {
        tracing::debug!(shell = %self.program, %command, "running shell command");

        let output = Command::new(&self.program)
            .arg(&self.flag)
            .arg(command)
            .output()
            .map_err(|e| {
                HoistError::ExecutionError(format!(
                    "failed to spawn shell '{}' for `{}`: {}\n\
                     Fix: ensure the shell is installed and in PATH.",
                    self.program, command, e
                ))
            })?;

        if !output.status.success() {
            return Err(HoistError::CommandFailed {
                command: command.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
