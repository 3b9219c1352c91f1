//! Error types for hoist.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for hoist operations.
///
/// Resolution and binding only ever raise [`HoistError::TaskComposition`];
/// the execution variants come from running a task and are passed through
/// untouched.
#[derive(Error, Debug)]
pub enum HoistError {
    /// User provided invalid arguments.
    #[error("{0}")]
    UserError(String),

    /// The configuration file could not be read or is invalid.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// A task reference could not be turned into a task.
    #[error("{}", composition_message(*index, reference, reason))]
    TaskComposition {
        /// Position of the reference in the queue being built, if any.
        index: Option<usize>,
        /// The offending reference, as written by the caller.
        reference: String,
        /// Why it could not be resolved.
        reason: String,
    },

    /// A task failed while executing.
    #[error("Task execution failed: {0}")]
    ExecutionError(String),

    /// A shell command exited unsuccessfully.
    #[error("Command `{command}` failed ({status}): {stderr}")]
    CommandFailed {
        /// The command line that was run.
        command: String,
        /// Exit status description.
        status: String,
        /// Trimmed standard error output.
        stderr: String,
    },
}

fn composition_message(index: Option<usize>, reference: &str, reason: &str) -> String {
    match index {
        Some(i) => format!("Cannot build task #{} '{}': {}", i, reference, reason),
        None => format!("Cannot build task '{}': {}", reference, reason),
    }
}

impl HoistError {
    /// Build a composition error for a single reference.
    pub fn composition(reference: impl Into<String>, reason: impl Into<String>) -> Self {
        HoistError::TaskComposition {
            index: None,
            reference: reference.into(),
            reason: reason.into(),
        }
    }

    /// Attach a queue position to a composition error.
    ///
    /// Other variants are returned unchanged.
    pub fn at_index(self, position: usize) -> Self {
        match self {
            HoistError::TaskComposition {
                reference, reason, ..
            } => HoistError::TaskComposition {
                index: Some(position),
                reference,
                reason,
            },
            other => other,
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            HoistError::UserError(_) => exit_codes::USER_ERROR,
            HoistError::ConfigError(_) => exit_codes::USER_ERROR,
            HoistError::TaskComposition { .. } => exit_codes::COMPOSITION_FAILURE,
            HoistError::ExecutionError(_) => exit_codes::EXECUTION_FAILURE,
            HoistError::CommandFailed { .. } => exit_codes::EXECUTION_FAILURE,
        }
    }
}

/// Result type alias for hoist operations.
pub type Result<T> = std::result::Result<T, HoistError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = HoistError::UserError("bad argument".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn config_error_has_correct_exit_code() {
        let err = HoistError::ConfigError("namespace is empty".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn composition_error_has_correct_exit_code() {
        let err = HoistError::composition("Nope", "no task class named 'Nope'");
        assert_eq!(err.exit_code(), exit_codes::COMPOSITION_FAILURE);
    }

    #[test]
    fn execution_errors_have_correct_exit_code() {
        let err = HoistError::ExecutionError("boom".to_string());
        assert_eq!(err.exit_code(), exit_codes::EXECUTION_FAILURE);

        let err = HoistError::CommandFailed {
            command: "false".to_string(),
            status: "exit status: 1".to_string(),
            stderr: String::new(),
        };
        assert_eq!(err.exit_code(), exit_codes::EXECUTION_FAILURE);
    }

    #[test]
    fn composition_message_names_the_reference() {
        let err = HoistError::composition("Nope", "no task class named 'Nope'");
        assert_eq!(
            err.to_string(),
            "Cannot build task 'Nope': no task class named 'Nope'"
        );
    }

    #[test]
    fn at_index_adds_queue_position() {
        let err = HoistError::composition("Nope", "unknown").at_index(2);
        assert!(matches!(
            err,
            HoistError::TaskComposition { index: Some(2), .. }
        ));
        assert_eq!(err.to_string(), "Cannot build task #2 'Nope': unknown");
    }

    #[test]
    fn at_index_leaves_other_errors_alone() {
        let err = HoistError::UserError("bad".to_string()).at_index(4);
        assert_eq!(err.to_string(), "bad");
    }
}
