//! Objects the container hands out.

use crate::error::{HoistError, Result};
use crate::strategies::Strategy;
use crate::task::{Task, TaskHandler};
use std::fmt;
use std::sync::Arc;

/// Methods a task handler answers to when used as a method target.
pub const TASK_METHODS: &[&str] = &["execute", "fire"];

/// Methods a strategy answers to when used as a method target.
pub const STRATEGY_METHODS: &[&str] = &["run"];

/// A plain service object whose named methods can back a task.
///
/// Used as the target of `[target, method]` and `Target::method` task
/// references.
pub trait Component: Send + Sync {
    /// Class name of the component.
    fn class_name(&self) -> &str;

    /// Methods that can be invoked by name.
    fn methods(&self) -> &[&str];

    /// Invoke `method`, passing the task that wraps the call.
    fn call(&self, method: &str, task: &Task) -> Result<String>;

    /// Whether `method` can be invoked.
    fn has_method(&self, method: &str) -> bool {
        self.methods().contains(&method)
    }
}

/// The closed set of things a container binding or class can produce.
#[derive(Clone)]
pub enum Instance {
    /// A task class.
    Task(Arc<dyn TaskHandler>),
    /// A service object with invokable methods.
    Component(Arc<dyn Component>),
    /// A phase strategy.
    Strategy(Arc<dyn Strategy>),
}

impl Instance {
    /// Short label for the kind of instance, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Instance::Task(_) => "task",
            Instance::Component(_) => "component",
            Instance::Strategy(_) => "strategy",
        }
    }

    /// Class name of the underlying object.
    pub fn class_name(&self) -> &str {
        match self {
            Instance::Task(handler) => handler.name(),
            Instance::Component(component) => component.class_name(),
            Instance::Strategy(strategy) => strategy.class_name(),
        }
    }

    /// Whether `method` can be invoked on this instance.
    pub fn supports(&self, method: &str) -> bool {
        match self {
            Instance::Task(_) => TASK_METHODS.contains(&method),
            Instance::Component(component) => component.has_method(method),
            Instance::Strategy(_) => STRATEGY_METHODS.contains(&method),
        }
    }

    /// Invoke `method` on this instance on behalf of `task`.
    pub fn invoke(&self, method: &str, task: &Task) -> Result<String> {
        match self {
            Instance::Task(handler) if TASK_METHODS.contains(&method) => handler.execute(task),
            Instance::Component(component) if component.has_method(method) => {
                component.call(method, task)
            }
            Instance::Strategy(strategy) if STRATEGY_METHODS.contains(&method) => {
                strategy.run(task)
            }
            other => Err(HoistError::ExecutionError(format!(
                "{} '{}' has no method '{}'",
                other.kind(),
                other.class_name(),
                method
            ))),
        }
    }

    /// Whether both values point at the same object.
    pub fn same_as(&self, other: &Instance) -> bool {
        match (self, other) {
            (Instance::Task(a), Instance::Task(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            (Instance::Component(a), Instance::Component(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            (Instance::Strategy(a), Instance::Strategy(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Instance::{}({})", self.kind(), self.class_name())
    }
}
