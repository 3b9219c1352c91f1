//! Built-in shell-backed strategies.

use super::Strategy;
use crate::container::{Container, Instance};
use crate::error::Result;
use crate::task::Task;
use std::sync::Arc;

/// The closed set of built-in strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// Check that PHP is available.
    CheckPhp,
    /// Check that Node.js is available.
    CheckNode,
    /// Install dependencies with Composer.
    DependenciesComposer,
    /// Install dependencies with npm.
    DependenciesNpm,
    /// Install dependencies with Bundler.
    DependenciesBundler,
    /// Run the PHPUnit suite.
    TestPhpunit,
    /// Run `cargo test`.
    TestCargo,
    /// Run Artisan migrations.
    MigrateArtisan,
}

impl StrategyKind {
    /// Every built-in strategy.
    pub const ALL: [StrategyKind; 8] = [
        StrategyKind::CheckPhp,
        StrategyKind::CheckNode,
        StrategyKind::DependenciesComposer,
        StrategyKind::DependenciesNpm,
        StrategyKind::DependenciesBundler,
        StrategyKind::TestPhpunit,
        StrategyKind::TestCargo,
        StrategyKind::MigrateArtisan,
    ];

    /// Find a strategy by phase and concrete name (case-insensitive).
    pub fn find(phase: &str, name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| {
            kind.phase().eq_ignore_ascii_case(phase) && kind.name().eq_ignore_ascii_case(name)
        })
    }

    /// Phase name.
    pub fn phase(self) -> &'static str {
        match self {
            StrategyKind::CheckPhp | StrategyKind::CheckNode => "Check",
            StrategyKind::DependenciesComposer
            | StrategyKind::DependenciesNpm
            | StrategyKind::DependenciesBundler => "Dependencies",
            StrategyKind::TestPhpunit | StrategyKind::TestCargo => "Test",
            StrategyKind::MigrateArtisan => "Migrate",
        }
    }

    /// Concrete name.
    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::CheckPhp => "Php",
            StrategyKind::CheckNode => "Node",
            StrategyKind::DependenciesComposer => "Composer",
            StrategyKind::DependenciesNpm => "Npm",
            StrategyKind::DependenciesBundler => "Bundler",
            StrategyKind::TestPhpunit => "Phpunit",
            StrategyKind::TestCargo => "Cargo",
            StrategyKind::MigrateArtisan => "Artisan",
        }
    }

    /// One-line description.
    pub fn description(self) -> &'static str {
        match self {
            StrategyKind::CheckPhp => "Checks that PHP is installed",
            StrategyKind::CheckNode => "Checks that Node.js is installed",
            StrategyKind::DependenciesComposer => "Installs dependencies with Composer",
            StrategyKind::DependenciesNpm => "Installs dependencies with npm",
            StrategyKind::DependenciesBundler => "Installs dependencies with Bundler",
            StrategyKind::TestPhpunit => "Runs the PHPUnit test suite",
            StrategyKind::TestCargo => "Runs the cargo test suite",
            StrategyKind::MigrateArtisan => "Runs Artisan database migrations",
        }
    }

    /// Shell commands run, in order.
    pub fn commands(self) -> &'static [&'static str] {
        match self {
            StrategyKind::CheckPhp => &["php --version"],
            StrategyKind::CheckNode => &["node --version"],
            StrategyKind::DependenciesComposer => {
                &["composer install --no-interaction --no-dev --prefer-dist"]
            }
            StrategyKind::DependenciesNpm => &["npm install --production"],
            StrategyKind::DependenciesBundler => &["bundle install"],
            StrategyKind::TestPhpunit => &["vendor/bin/phpunit --stop-on-failure"],
            StrategyKind::TestCargo => &["cargo test"],
            StrategyKind::MigrateArtisan => &["php artisan migrate --force"],
        }
    }

    /// Container class name.
    pub fn class_name(self) -> String {
        strategy_class(self.phase(), self.name())
    }
}

/// Container class name for a phase/concrete pair: `<Phase><Concrete>Strategy`.
///
/// Both halves are normalized to an uppercase first letter followed by
/// lowercase, so `("check", "PHP")` gives `CheckPhpStrategy`.
pub fn strategy_class(phase: &str, concrete: &str) -> String {
    format!("{}{}Strategy", capitalize(phase), capitalize(concrete))
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A built-in strategy: runs its commands through the task's shell.
struct ShellStrategy {
    kind: StrategyKind,
    class_name: String,
}

impl Strategy for ShellStrategy {
    fn phase(&self) -> &str {
        self.kind.phase()
    }

    fn name(&self) -> &str {
        self.kind.name()
    }

    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn description(&self) -> &str {
        self.kind.description()
    }

    fn run(&self, task: &Task) -> Result<String> {
        let mut outputs = Vec::new();
        for command in self.kind.commands() {
            tracing::info!(strategy = %self.class_name, %command, "running strategy step");
            outputs.push(task.run_shell(command)?);
        }
        Ok(outputs.join("\n"))
    }
}

/// Register every built-in strategy in the class catalog.
pub fn register(container: &mut Container) {
    for kind in StrategyKind::ALL {
        let class_name = kind.class_name();
        let captured = class_name.clone();
        container.register_class(class_name, move |_| {
            Instance::Strategy(Arc::new(ShellStrategy {
                kind,
                class_name: captured.clone(),
            }))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Registry;

    #[test]
    fn test_strategy_class_normalizes_case() {
        assert_eq!(strategy_class("check", "PHP"), "CheckPhpStrategy");
        assert_eq!(strategy_class("Dependencies", "npm"), "DependenciesNpmStrategy");
    }

    #[test]
    fn test_find_is_case_insensitive() {
        assert_eq!(StrategyKind::find("check", "php"), Some(StrategyKind::CheckPhp));
        assert_eq!(StrategyKind::find("TEST", "Cargo"), Some(StrategyKind::TestCargo));
        assert_eq!(StrategyKind::find("Check", "Cobol"), None);
        assert_eq!(StrategyKind::find("Deploy", "Php"), None);
    }

    #[test]
    fn test_class_names_are_unique() {
        let mut names: Vec<String> = StrategyKind::ALL.iter().map(|k| k.class_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), StrategyKind::ALL.len());
    }

    #[test]
    fn test_register_adds_every_strategy_class() {
        let mut container = Container::new();
        register(&mut container);

        for kind in StrategyKind::ALL {
            let instance = container.construct(&kind.class_name()).unwrap();
            match instance {
                Instance::Strategy(strategy) => {
                    assert_eq!(strategy.phase(), kind.phase());
                    assert_eq!(strategy.name(), kind.name());
                    assert_eq!(strategy.class_name(), kind.class_name());
                }
                other => panic!("expected a strategy, got {other:?}"),
            }
        }
    }
}
