//! Task resolution.
//!
//! This module turns a [`TaskRef`] into a [`Task`].
//!
//! # Resolution Order
//!
//! The first matching rule wins:
//!
//! 1. A prebuilt task is returned unchanged
//! 2. A method reference calls `method` on the bound instance named by the
//!    target, or on a freshly constructed instance of that class
//! 3. A string containing `::` is split into a method reference
//! 4. A closure is wrapped as-is
//! 5. A string naming a task class (bound `tasks.<name>` alias first, then a
//!    binding under the name itself, then the class catalog) builds that class
//! 6. Any other string runs as a literal shell command
//!
//! Strings shaped like a class name (`Deploy`, `Nope`) that resolve to
//! nothing fail instead of falling through to rule 6.

mod builder;
mod reference;

pub use builder::TasksBuilder;
pub use reference::{Target, TaskRef};

use crate::container::{Instance, Registry};
use crate::error::{HoistError, Result};
use crate::task::{ClosureOrigin, Task, TaskClosure, TaskContext};
use regex::Regex;
use std::sync::{Arc, LazyLock};

/// Container prefix for named task bindings.
pub const TASK_ALIAS_PREFIX: &str = "tasks.";

static METHOD_REF_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_.\-]*)::([A-Za-z_][A-Za-z0-9_]*)$")
        .expect("Invalid method reference regex")
});

static CLASS_PATH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Za-z0-9_]*$").expect("Invalid class path regex"));

/// Container key of a named task: `tasks.<lowercased-name>`.
pub fn task_alias(name: &str) -> String {
    format!("{}{}", TASK_ALIAS_PREFIX, name.to_lowercase())
}

/// Whether `text` reads as a class name rather than a shell command.
pub fn looks_like_class(text: &str) -> bool {
    CLASS_PATH_REGEX.is_match(text)
}

/// Dispatches task references to tasks.
///
/// Holds no state of its own beyond the injected context; every lookup goes
/// to the registry live.
#[derive(Debug, Clone)]
pub struct TaskResolver {
    context: TaskContext,
}

impl TaskResolver {
    /// Create a resolver over the given context.
    pub fn new(context: TaskContext) -> Self {
        Self { context }
    }

    /// The context handed to every task this resolver builds.
    pub fn context(&self) -> &TaskContext {
        &self.context
    }

    fn registry(&self) -> &Arc<dyn Registry> {
        self.context.registry()
    }

    /// Resolve a single reference.
    ///
    /// # Errors
    ///
    /// `TaskComposition` when the reference matches no rule, names something
    /// that is not a task, or targets a method the instance does not have.
    pub fn resolve(&self, reference: TaskRef) -> Result<Task> {
        match reference {
            TaskRef::Prebuilt(task) => {
                tracing::debug!(task = %task.class_name(), "task already built");
                Ok(task)
            }
            TaskRef::Method { target, method } => self.resolve_method(target, &method),
            TaskRef::Text(text) if text.contains("::") => {
                let (target, method) = split_method_ref(&text)?;
                self.resolve_method(Target::Named(target.to_string()), method)
            }
            TaskRef::Callable(closure) => Ok(self.closure_task(closure)),
            TaskRef::Class(name) => self
                .resolve_class(&name)?
                .ok_or_else(|| unknown_class(&name)),
            TaskRef::Text(text) => match self.resolve_class(&text)? {
                Some(task) => Ok(task),
                None if looks_like_class(&text) => Err(unknown_class(&text)),
                None => Ok(self.shell_task(text)),
            },
            TaskRef::Command(command) => Ok(self.shell_task(command)),
        }
    }

    /// Resolve every reference in order.
    ///
    /// # Errors
    ///
    /// The first failure, tagged with its queue position. Nothing is returned
    /// for the elements that did resolve.
    pub fn resolve_queue<I>(&self, queue: I) -> Result<Vec<Task>>
    where
        I: IntoIterator,
        I::Item: Into<TaskRef>,
    {
        queue
            .into_iter()
            .enumerate()
            .map(|(index, reference)| {
                self.resolve(reference.into())
                    .map_err(|err| err.at_index(index))
            })
            .collect()
    }

    /// Wrap a closure without re-wrapping it.
    pub fn closure_task(&self, closure: TaskClosure) -> Task {
        tracing::debug!("resolved closure task");
        Task::from_closure(closure, ClosureOrigin::Inline, self.context.clone())
    }

    /// Wrap a literal shell command.
    pub fn shell_task(&self, command: String) -> Task {
        tracing::debug!(%command, "resolved shell task");
        Task::from_shell(command, self.context.clone())
    }

    /// Look up a task class: bound `tasks.<name>` alias, then a binding under
    /// `name`, then the catalog.
    ///
    /// `Ok(None)` means nothing by that name exists; an existing name that
    /// is not a task is an error.
    pub fn resolve_class(&self, name: &str) -> Result<Option<Task>> {
        let registry = self.registry();
        let instance = registry
            .try_get(&task_alias(name))
            .or_else(|| registry.try_get(name))
            .or_else(|| registry.construct(name));

        match instance {
            None => Ok(None),
            Some(Instance::Task(handler)) => {
                tracing::debug!(%name, class = %handler.name(), "resolved task class");
                Ok(Some(Task::from_handler(handler, self.context.clone())))
            }
            Some(other) => Err(HoistError::composition(
                name,
                format!(
                    "'{}' is a {}, not a task",
                    other.class_name(),
                    other.kind()
                ),
            )),
        }
    }

    fn resolve_method(&self, target: Target, method: &str) -> Result<Task> {
        let (label, instance) = match target {
            Target::Instance(instance) => (instance.class_name().to_string(), instance),
            Target::Named(name) => {
                // A binding under the exact name overrides the class.
                let registry = self.registry();
                let instance = registry
                    .try_get(&name)
                    .or_else(|| registry.construct(&name))
                    .ok_or_else(|| {
                        HoistError::composition(
                            format!("{}::{}", name, method),
                            format!(
                                "'{}' is neither bound in the container nor a known class",
                                name
                            ),
                        )
                    })?;
                (name, instance)
            }
        };

        if !instance.supports(method) {
            return Err(HoistError::composition(
                format!("{}::{}", label, method),
                format!(
                    "{} '{}' has no method '{}'",
                    instance.kind(),
                    instance.class_name(),
                    method
                ),
            ));
        }

        tracing::debug!(target = %label, %method, "resolved method task");
        let method_name = method.to_string();
        let closure: TaskClosure =
            Arc::new(move |task: &Task| instance.invoke(&method_name, task));
        Ok(Task::from_closure(
            closure,
            ClosureOrigin::Method {
                target: label,
                method: method.to_string(),
            },
            self.context.clone(),
        ))
    }
}

fn split_method_ref(text: &str) -> Result<(&str, &str)> {
    let captures = METHOD_REF_REGEX.captures(text).ok_or_else(|| {
        HoistError::composition(
            text,
            "malformed method reference, expected `Target::method`",
        )
    })?;
    match (captures.get(1), captures.get(2)) {
        (Some(target), Some(method)) => Ok((target.as_str(), method.as_str())),
        _ => Err(HoistError::composition(
            text,
            "malformed method reference, expected `Target::method`",
        )),
    }
}

fn unknown_class(name: &str) -> HoistError {
    HoistError::composition(name, format!("no task class named '{}'", name))
}
