//! Application bootstrap.
//!
//! Builds the container from a [`Config`] and hands out the builder and
//! binders that share it:
//!
//! 1. Register the built-in task classes and strategy classes
//! 2. Bind `strategies.<phase>` for every configured strategy
//! 3. Bind `tasks.<name>` for every custom task

use crate::binding::{CommandBinder, StrategyBinder, strategy_key};
use crate::builtin;
use crate::config::Config;
use crate::container::{Container, Registry};
use crate::error::{HoistError, Result};
use crate::resolver::TasksBuilder;
use crate::strategies::{self, strategy_class};
use crate::task::TaskContext;
use std::sync::Arc;

/// A bootstrapped container plus the config it was built from.
pub struct Application {
    config: Config,
    container: Arc<Container>,
}

impl Application {
    /// Bootstrap with only the built-in classes.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_classes(config, |_| {})
    }

    /// Bootstrap, letting the host add its own classes to the catalog
    /// before the container is shared.
    pub fn with_classes<F>(config: Config, register: F) -> Result<Self>
    where
        F: FnOnce(&mut Container),
    {
        config.validate()?;

        let mut container = Container::new();
        builtin::register(&mut container, &config);
        strategies::register(&mut container);
        register(&mut container);

        for (phase, name) in &config.strategies {
            let class = strategy_class(phase, name);
            if !container.alias_class(strategy_key(phase), &class) {
                return Err(HoistError::ConfigError(format!(
                    "strategy '{}' for phase '{}' is not registered (looked for class '{}')",
                    name, phase, class
                )));
            }
        }

        tracing::debug!(
            classes = container.class_names().len(),
            bindings = container.bound_names().len(),
            "application bootstrapped"
        );

        Ok(Self {
            config,
            container: Arc::new(container),
        })
    }

    /// The config the application was built from.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The shared container. Bindings may be changed between calls.
    pub fn container(&self) -> &Arc<Container> {
        &self.container
    }

    /// Context handed to every task.
    pub fn context(&self) -> TaskContext {
        TaskContext::new(self.config.shell(), self.container.clone())
    }

    /// A tasks builder over the shared container.
    pub fn builder(&self) -> TasksBuilder {
        TasksBuilder::new(self.context())
    }

    /// The command binder for the configured naming.
    pub fn commands(&self) -> CommandBinder {
        CommandBinder::from_config(&self.config)
    }

    /// A strategy binder over the shared container.
    pub fn strategies(&self) -> StrategyBinder {
        StrategyBinder::new(self.container.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::CallableTask;

    #[test]
    fn test_bootstrap_binds_default_strategies() {
        let app = Application::new(Config::default()).unwrap();

        for phase in ["check", "dependencies", "test", "migrate"] {
            assert!(app.container().is_bound(&strategy_key(phase)), "{phase} not bound");
        }
    }

    #[test]
    fn test_bootstrap_registers_builtin_tasks() {
        let app = Application::new(Config::default()).unwrap();

        for class in ["Check", "Dependencies", "Test", "Migrate", "Deploy"] {
            assert!(app.container().has_class(class), "{class} missing");
        }
    }

    #[test]
    fn test_bootstrap_binds_custom_tasks() {
        let mut config = Config::default();
        config
            .tasks
            .insert("warm-cache".to_string(), vec!["echo warm".to_string()]);

        let app = Application::new(config).unwrap();
        assert!(app.container().is_bound("tasks.warm-cache"));
    }

    #[test]
    fn test_with_classes_adds_host_classes() {
        let app = Application::with_classes(Config::default(), |container| {
            container.register_class("CallableTask", |_| CallableTask::labelled("host"));
        })
        .unwrap();

        assert!(app.container().has_class("CallableTask"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = Config::default();
        config.namespace = String::new();

        let err = Application::new(config).err().unwrap();
        assert!(matches!(err, HoistError::ConfigError(_)));
    }

    #[test]
    fn test_context_uses_configured_shell() {
        let mut config = Config::default();
        config.shell = "bash".to_string();

        let app = Application::new(config).unwrap();
        assert_eq!(app.context().shell().program(), "bash");
    }
}
