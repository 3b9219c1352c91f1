//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::binding::BuiltinCommand;
use crate::error::{HoistError, Result};
use crate::strategies::StrategyKind;
use crate::task::Shell;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// File name looked up by [`Config::discover`].
pub const CONFIG_FILE_NAME: &str = "hoist.yaml";

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(HoistError::ConfigError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            HoistError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        tracing::debug!(path = %path.display(), "loaded config file");
        Self::from_yaml(&content)
    }

    /// Load `hoist.yaml` from `dir`, or the defaults when there is none.
    pub fn discover<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty file means all defaults.
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml)
                .map_err(|e| HoistError::ConfigError(format!("failed to parse config YAML: {}", e)))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            HoistError::ConfigError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// The shell tasks run their commands through.
    pub fn shell(&self) -> Shell {
        Shell::new(&self.shell, &self.shell_flag)
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `root_task`, `root_command`, `namespace` and `shell` must be non-empty
    /// - `namespace` must not contain `:` or whitespace
    /// - every `strategies` entry must name a known strategy for its phase
    /// - custom task names must be single words that do not shadow built-in
    ///   commands or the root task, and must not list themselves
    /// - custom tasks and `deploy_queue` must not reach themselves through
    ///   one another
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("root_task", &self.root_task),
            ("root_command", &self.root_command),
            ("namespace", &self.namespace),
            ("shell", &self.shell),
        ] {
            if value.trim().is_empty() {
                return Err(HoistError::ConfigError(format!("{} must not be empty", field)));
            }
        }

        if self.namespace.contains(':') || self.namespace.contains(char::is_whitespace) {
            return Err(HoistError::ConfigError(format!(
                "namespace '{}' must not contain ':' or whitespace",
                self.namespace
            )));
        }

        for (phase, name) in &self.strategies {
            if StrategyKind::find(phase, name).is_none() {
                return Err(HoistError::ConfigError(format!(
                    "unknown strategy '{}' for phase '{}'. Available: {}",
                    name,
                    phase,
                    available_strategies(phase)
                )));
            }
        }

        for (name, refs) in &self.tasks {
            self.validate_custom_task(name, refs)?;
        }

        if self.deploy_queue.iter().any(|r| r.trim().is_empty()) {
            return Err(HoistError::ConfigError(
                "deploy_queue entries must be non-empty".to_string(),
            ));
        }

        self.check_sequence_cycles()
    }

    /// Reject custom tasks and deploy queues that end up running themselves.
    fn check_sequence_cycles(&self) -> Result<()> {
        let deploy = BuiltinCommand::Deploy.task_class();
        let custom: BTreeSet<String> = self.tasks.keys().map(|name| name.to_lowercase()).collect();

        // Steps resolve through `tasks.<lowercased>` aliases, so custom tasks
        // match case-insensitively; `Deploy` only matches its exact class name.
        let sequence_of = |step: &str| -> Option<String> {
            let step = step.trim();
            if step == deploy {
                return Some(deploy.to_string());
            }
            let key = step.to_lowercase();
            custom.contains(&key).then_some(key)
        };

        let mut graph: BTreeMap<String, Vec<String>> = BTreeMap::new();
        graph.insert(
            deploy.to_string(),
            self.deploy_queue.iter().filter_map(|s| sequence_of(s)).collect(),
        );
        for (name, steps) in &self.tasks {
            graph.insert(
                name.to_lowercase(),
                steps.iter().filter_map(|s| sequence_of(s)).collect(),
            );
        }

        let mut done = BTreeSet::new();
        for start in graph.keys() {
            let mut path = Vec::new();
            if let Some(cycle) = find_cycle(&graph, start, &mut path, &mut done) {
                return Err(HoistError::ConfigError(format!(
                    "tasks run each other in a cycle: {}",
                    cycle.join(" -> ")
                )));
            }
        }

        Ok(())
    }

    fn validate_custom_task(&self, name: &str, refs: &[String]) -> Result<()> {
        if name.is_empty() || name.contains(char::is_whitespace) || name.contains(':') {
            return Err(HoistError::ConfigError(format!(
                "task name '{}' must be a single word without ':'",
                name
            )));
        }

        if BuiltinCommand::from_task_name(name).is_some() || name == self.root_task {
            return Err(HoistError::ConfigError(format!(
                "task name '{}' is reserved by a built-in command",
                name
            )));
        }

        if refs.is_empty() {
            return Err(HoistError::ConfigError(format!(
                "task '{}' must list at least one step",
                name
            )));
        }

        for step in refs {
            if step.trim().is_empty() {
                return Err(HoistError::ConfigError(format!(
                    "task '{}' has an empty step",
                    name
                )));
            }
            if step.eq_ignore_ascii_case(name) {
                return Err(HoistError::ConfigError(format!(
                    "task '{}' lists itself as a step",
                    name
                )));
            }
        }

        Ok(())
    }
}

/// Depth-first search for a path from `node` back onto `path`.
fn find_cycle<'a>(
    graph: &'a BTreeMap<String, Vec<String>>,
    node: &'a str,
    path: &mut Vec<&'a str>,
    done: &mut BTreeSet<&'a str>,
) -> Option<Vec<&'a str>> {
    if let Some(position) = path.iter().position(|visited| *visited == node) {
        let mut cycle = path[position..].to_vec();
        cycle.push(node);
        return Some(cycle);
    }
    if done.contains(node) {
        return None;
    }

    path.push(node);
    for next in graph.get(node).into_iter().flatten() {
        if let Some(cycle) = find_cycle(graph, next, path, done) {
            return Some(cycle);
        }
    }
    path.pop();
    done.insert(node);
    None
}

fn available_strategies(phase: &str) -> String {
    let names: Vec<&str> = StrategyKind::ALL
        .iter()
        .filter(|kind| kind.phase().eq_ignore_ascii_case(phase))
        .map(|kind| kind.name())
        .collect();
    if names.is_empty() {
        "(none for this phase)".to_string()
    } else {
        names.join(", ")
    }
}
