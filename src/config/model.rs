//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for hoist.
///
/// This struct represents the contents of `hoist.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Command naming
    // =========================================================================
    /// Task name that maps to the top-level command (default: "Hoist").
    #[serde(default = "default_root_task")]
    pub root_task: String,

    /// Command-line name of the top-level command (default: "deploy").
    #[serde(default = "default_root_command")]
    pub root_command: String,

    /// Namespace prefixed to every task command (default: "deploy").
    #[serde(default = "default_namespace")]
    pub namespace: String,

    // =========================================================================
    // Shell
    // =========================================================================
    /// Shell program used for shell tasks (default: "sh").
    #[serde(default = "default_shell")]
    pub shell: String,

    /// Flag passing the command to the shell (default: "-c").
    #[serde(default = "default_shell_flag")]
    pub shell_flag: String,

    // =========================================================================
    // Strategies and tasks
    // =========================================================================
    /// Strategy per phase, e.g. `check: Php`.
    #[serde(default = "default_strategies")]
    pub strategies: BTreeMap<String, String>,

    /// Custom tasks: name -> ordered task references.
    ///
    /// References are shell commands, task class names, or `Target::method`.
    #[serde(default)]
    pub tasks: BTreeMap<String, Vec<String>>,

    /// Task references run, in order, by the `Deploy` task.
    #[serde(default = "default_deploy_queue")]
    pub deploy_queue: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_task: default_root_task(),
            root_command: default_root_command(),
            namespace: default_namespace(),
            shell: default_shell(),
            shell_flag: default_shell_flag(),
            strategies: default_strategies(),
            tasks: BTreeMap::new(),
            deploy_queue: default_deploy_queue(),
        }
    }
}
