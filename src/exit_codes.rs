//! Exit code constants for the hoist CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config)
//! - 2: Task composition failure (a task reference could not be resolved)
//! - 3: Execution failure (a task or shell command failed while running)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or an invalid configuration file.
pub const USER_ERROR: i32 = 1;

/// Composition failure: a task reference could not be turned into a task.
pub const COMPOSITION_FAILURE: i32 = 2;

/// Execution failure: a resolved task failed while running.
pub const EXECUTION_FAILURE: i32 = 3;
