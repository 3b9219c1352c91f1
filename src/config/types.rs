//! Configuration defaults for hoist.

use std::collections::BTreeMap;

/// Default name of the root task.
pub const DEFAULT_ROOT_TASK: &str = "Hoist";

/// Default top-level command-line verb.
pub const DEFAULT_ROOT_COMMAND: &str = "deploy";

/// Default namespace for task commands.
pub const DEFAULT_NAMESPACE: &str = "deploy";

pub fn default_root_task() -> String {
    DEFAULT_ROOT_TASK.to_string()
}

pub fn default_root_command() -> String {
    DEFAULT_ROOT_COMMAND.to_string()
}

pub fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

pub fn default_shell() -> String {
    crate::task::DEFAULT_SHELL.to_string()
}

pub fn default_shell_flag() -> String {
    crate::task::DEFAULT_SHELL_FLAG.to_string()
}

/// Default strategy per phase.
pub fn default_strategies() -> BTreeMap<String, String> {
    [
        ("check", "Php"),
        ("dependencies", "Composer"),
        ("test", "Phpunit"),
        ("migrate", "Artisan"),
    ]
    .into_iter()
    .map(|(phase, name)| (phase.to_string(), name.to_string()))
    .collect()
}

/// Default task queue run by `Deploy`.
pub fn default_deploy_queue() -> Vec<String> {
    vec![
        "Check".to_string(),
        "Dependencies".to_string(),
        "Test".to_string(),
        "Migrate".to_string(),
    ]
}
