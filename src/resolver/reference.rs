//! Caller-facing task references.

use crate::container::Instance;
use crate::task::{Task, TaskClosure};
use std::fmt;

/// The object a method reference is invoked on.
#[derive(Clone)]
pub enum Target {
    /// A container binding name, or a class name when nothing is bound.
    Named(String),
    /// An instance supplied directly.
    Instance(Instance),
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Named(name) => write!(f, "{}", name),
            Target::Instance(instance) => write!(f, "{}", instance.class_name()),
        }
    }
}

/// An unresolved description of a task.
///
/// Prefer the typed constructors. [`TaskRef::Text`] is for strings whose
/// shape is only known at resolution time (configuration files, the CLI).
#[derive(Clone)]
pub enum TaskRef {
    /// An already-resolved task, passed through unchanged.
    Prebuilt(Task),
    /// Call `method` on `target`.
    Method {
        /// The object to call.
        target: Target,
        /// The method name.
        method: String,
    },
    /// A caller-supplied closure.
    Callable(TaskClosure),
    /// A task class (or bound task alias) that must exist.
    Class(String),
    /// A literal shell command.
    Command(String),
    /// An untyped string: `Target::method`, a task class, or a shell command.
    Text(String),
}

impl TaskRef {
    /// Reference a task class by name.
    pub fn class(name: impl Into<String>) -> Self {
        TaskRef::Class(name.into())
    }

    /// Reference a literal shell command.
    pub fn command(command: impl Into<String>) -> Self {
        TaskRef::Command(command.into())
    }

    /// Reference `method` on a named container binding or class.
    pub fn method(target: impl Into<String>, method: impl Into<String>) -> Self {
        TaskRef::Method {
            target: Target::Named(target.into()),
            method: method.into(),
        }
    }

    /// Reference `method` on an instance.
    pub fn instance_method(instance: Instance, method: impl Into<String>) -> Self {
        TaskRef::Method {
            target: Target::Instance(instance),
            method: method.into(),
        }
    }

    /// Reference a closure. The same `Arc` ends up inside the task.
    pub fn closure(closure: TaskClosure) -> Self {
        TaskRef::Callable(closure)
    }

    /// How the reference reads in error messages.
    pub fn describe(&self) -> String {
        match self {
            TaskRef::Prebuilt(task) => task.class_name().to_string(),
            TaskRef::Method { target, method } => format!("{:?}::{}", target, method),
            TaskRef::Callable(_) => "<closure>".to_string(),
            TaskRef::Class(name) | TaskRef::Command(name) | TaskRef::Text(name) => name.clone(),
        }
    }
}

impl fmt::Debug for TaskRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variant = match self {
            TaskRef::Prebuilt(_) => "Prebuilt",
            TaskRef::Method { .. } => "Method",
            TaskRef::Callable(_) => "Callable",
            TaskRef::Class(_) => "Class",
            TaskRef::Command(_) => "Command",
            TaskRef::Text(_) => "Text",
        };
        write!(f, "TaskRef::{}({})", variant, self.describe())
    }
}

impl From<Task> for TaskRef {
    fn from(task: Task) -> Self {
        TaskRef::Prebuilt(task)
    }
}

impl From<TaskClosure> for TaskRef {
    fn from(closure: TaskClosure) -> Self {
        TaskRef::Callable(closure)
    }
}

impl From<&str> for TaskRef {
    fn from(text: &str) -> Self {
        TaskRef::Text(text.to_string())
    }
}

impl From<String> for TaskRef {
    fn from(text: String) -> Self {
        TaskRef::Text(text)
    }
}

impl From<&String> for TaskRef {
    fn from(text: &String) -> Self {
        TaskRef::Text(text.clone())
    }
}
