use crate::container::{Component, Container, Instance};
use crate::error::Result;
use crate::strategies::Strategy;
use crate::task::{Shell, Task, TaskContext, TaskHandler};
use std::sync::Arc;

/// Label given to `CallableTask` instances built from the class catalog.
pub(crate) const CONSTRUCTED: &str = "constructed";

/// A component with a couple of invokable methods.
pub(crate) struct CallableTask {
    pub(crate) label: String,
}

impl CallableTask {
    pub(crate) fn labelled(label: &str) -> Instance {
        Instance::Component(Arc::new(CallableTask {
            label: label.to_string(),
        }))
    }
}

impl Component for CallableTask {
    fn class_name(&self) -> &str {
        "CallableTask"
    }

    fn methods(&self) -> &[&str] {
        &["someMethod", "whoami"]
    }

    fn call(&self, method: &str, task: &Task) -> Result<String> {
        match method {
            "someMethod" => Ok(task.class_name().to_string()),
            _ => Ok(self.label.clone()),
        }
    }
}

/// A task class that echoes its arguments.
pub(crate) struct EchoTask;

impl TaskHandler for EchoTask {
    fn name(&self) -> &str {
        "EchoTask"
    }

    fn description(&self) -> &str {
        "Echoes its arguments"
    }

    fn execute(&self, task: &Task) -> Result<String> {
        Ok(format!("echo:{}", task.arguments().join(",")))
    }
}

/// A container with the test classes and the built-in strategies registered.
pub(crate) fn test_container() -> Container {
    let mut container = Container::new();
    container.register_class("CallableTask", |_| CallableTask::labelled(CONSTRUCTED));
    container.register_class("EchoTask", |_| Instance::Task(Arc::new(EchoTask)));
    crate::strategies::register(&mut container);
    container
}

pub(crate) fn test_context(container: &Arc<Container>) -> TaskContext {
    TaskContext::new(Shell::default(), container.clone())
}

/// A strategy that returns a fixed output.
pub(crate) struct FixedStrategy {
    pub(crate) phase: &'static str,
    pub(crate) output: &'static str,
}

impl Strategy for FixedStrategy {
    fn phase(&self) -> &str {
        self.phase
    }

    fn name(&self) -> &str {
        "Fixed"
    }

    fn class_name(&self) -> &str {
        "FixedStrategy"
    }

    fn run(&self, _task: &Task) -> Result<String> {
        Ok(self.output.to_string())
    }
}

pub(crate) fn fixed_strategy(phase: &'static str, output: &'static str) -> Instance {
    Instance::Strategy(Arc::new(FixedStrategy { phase, output }))
}
