//! The tasks builder: the entry point callers use to turn names, closures
//! and queues into tasks.

use super::{TASK_ALIAS_PREFIX, TaskRef, TaskResolver, unknown_class};
use crate::container::Instance;
use crate::error::Result;
use crate::task::{Task, TaskClosure, TaskContext};

/// Builds tasks through a [`TaskResolver`].
#[derive(Debug, Clone)]
pub struct TasksBuilder {
    resolver: TaskResolver,
}

impl TasksBuilder {
    /// Create a builder over the given context.
    pub fn new(context: TaskContext) -> Self {
        Self {
            resolver: TaskResolver::new(context),
        }
    }

    /// The underlying resolver.
    pub fn resolver(&self) -> &TaskResolver {
        &self.resolver
    }

    /// Resolve any task reference.
    pub fn build_task(&self, reference: impl Into<TaskRef>) -> Result<Task> {
        self.resolver.resolve(reference.into())
    }

    /// Resolve a queue of references, preserving order.
    ///
    /// Fails as a whole on the first unresolvable element.
    pub fn build_tasks<I>(&self, queue: I) -> Result<Vec<Task>>
    where
        I: IntoIterator,
        I::Item: Into<TaskRef>,
    {
        self.resolver.resolve_queue(queue)
    }

    /// Build a task class by name (bound `tasks.<name>` alias, then a binding
    /// under `name`, then the catalog).
    ///
    /// # Errors
    ///
    /// `TaskComposition` when no task class has that name or the name
    /// resolves to something that is not a task.
    pub fn build_task_from_class(&self, name: &str) -> Result<Task> {
        self.resolver
            .resolve_class(name)?
            .ok_or_else(|| unknown_class(name))
    }

    /// Build a task that runs `command` through the shell.
    pub fn build_task_from_string(&self, command: impl Into<String>) -> Task {
        self.resolver.shell_task(command.into())
    }

    /// Build a task around `closure`, keeping the same `Arc`.
    pub fn build_task_from_closure(&self, closure: TaskClosure) -> Task {
        self.resolver.closure_task(closure)
    }

    /// Names of every task that can be built by name, sorted and without
    /// case-insensitive duplicates.
    ///
    /// Covers task classes in the catalog and bound `tasks.*` aliases.
    pub fn task_names(&self) -> Vec<String> {
        let registry = self.resolver.context().registry();
        let mut names: Vec<String> = registry
            .class_names()
            .into_iter()
            .filter(|class| matches!(registry.construct(class), Some(Instance::Task(_))))
            .collect();

        for alias in registry.bound_names() {
            let Some(short) = alias.strip_prefix(TASK_ALIAS_PREFIX) else {
                continue;
            };
            if let Some(Instance::Task(handler)) = registry.try_get(&alias) {
                let name = if handler.name().eq_ignore_ascii_case(short) {
                    handler.name().to_string()
                } else {
                    short.to_string()
                };
                names.push(name);
            }
        }

        names.sort_by_key(|name| name.to_lowercase());
        names.dedup_by(|a, b| a.eq_ignore_ascii_case(b));
        names
    }
}
