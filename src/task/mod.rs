//! The executable task model.
//!
//! A [`Task`] is the normalized unit of deployment work. However it was
//! described by the caller (shell string, closure, task class, or a
//! `target::method` reference), it ends up as one of two bodies:
//!
//! - **Class**: a [`TaskHandler`] instance constructed from the container
//! - **Closure**: a captured [`TaskClosure`] plus a record of where it came from
//!
//! Callers only ever see [`Task::execute`]; they never branch on the body.

mod shell;

pub use shell::{DEFAULT_SHELL, DEFAULT_SHELL_FLAG, Shell};

use crate::container::Registry;
use crate::error::{HoistError, Result};
use std::fmt;
use std::sync::Arc;

/// Identity reported by every closure-backed task.
pub const CLOSURE_TASK_NAME: &str = "Closure";

/// A callable captured by a closure task.
///
/// The closure receives the task it is wrapped in, so it can reach the
/// task's arguments and shell.
pub type TaskClosure = Arc<dyn Fn(&Task) -> Result<String> + Send + Sync>;

/// Capability contract for task classes.
///
/// Anything registered in the container as a task implements this trait.
pub trait TaskHandler: Send + Sync {
    /// Class name of the task (e.g. "Deploy").
    fn name(&self) -> &str;

    /// One-line description, shown in command listings.
    fn description(&self) -> &str {
        ""
    }

    /// Run the task. `task` is the [`Task`] wrapping this handler.
    fn execute(&self, task: &Task) -> Result<String>;
}

/// What a task needs from its surroundings to run.
///
/// Holds the shell used for shell commands, the registry nested
/// resolutions go through (sequence tasks, phase strategies) and the chain
/// of sequence tasks currently running.
#[derive(Clone)]
pub struct TaskContext {
    shell: Shell,
    registry: Arc<dyn Registry>,
    running: Vec<String>,
}

impl TaskContext {
    /// Create a context from a shell and a registry.
    pub fn new(shell: Shell, registry: Arc<dyn Registry>) -> Self {
        Self {
            shell,
            registry,
            running: Vec::new(),
        }
    }

    /// A child context for running the nested task `name`.
    ///
    /// # Errors
    ///
    /// `TaskComposition` when `name` is already running further up the
    /// chain, since running it again would never terminate.
    pub fn enter(&self, name: &str) -> Result<TaskContext> {
        if self.running.iter().any(|running| running == name) {
            let mut chain = self.running.clone();
            chain.push(name.to_string());
            return Err(HoistError::composition(
                name,
                format!("task runs itself recursively ({})", chain.join(" -> ")),
            ));
        }

        let mut child = self.clone();
        child.running.push(name.to_string());
        Ok(child)
    }

    /// Names of the nested tasks currently running, outermost first.
    pub fn running(&self) -> &[String] {
        &self.running
    }

    /// The shell used to run shell commands.
    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    /// The registry used for nested resolution.
    pub fn registry(&self) -> &Arc<dyn Registry> {
        &self.registry
    }
}

impl fmt::Debug for TaskContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskContext")
            .field("shell", &self.shell)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}

/// Where a closure task's callable came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClosureOrigin {
    /// A closure supplied directly by the caller.
    Inline,
    /// A literal shell command run verbatim.
    Shell {
        /// The command string.
        command: String,
    },
    /// A method call on a container instance or class.
    Method {
        /// Container name or class name of the target.
        target: String,
        /// Method invoked on the target.
        method: String,
    },
}

/// A captured callable plus its origin.
#[derive(Clone)]
pub struct ClosureTask {
    closure: TaskClosure,
    origin: ClosureOrigin,
}

impl ClosureTask {
    /// The exact callable this task wraps.
    pub fn closure(&self) -> &TaskClosure {
        &self.closure
    }

    /// Where the callable came from.
    pub fn origin(&self) -> &ClosureOrigin {
        &self.origin
    }
}

/// The two task bodies.
#[derive(Clone)]
pub enum TaskBody {
    /// A constructed task class.
    Class(Arc<dyn TaskHandler>),
    /// A captured callable.
    Closure(ClosureTask),
}

/// A resolved, ready-to-run unit of work.
#[derive(Clone)]
pub struct Task {
    body: TaskBody,
    arguments: Vec<String>,
    context: TaskContext,
}

impl Task {
    /// Wrap a task class instance.
    pub fn from_handler(handler: Arc<dyn TaskHandler>, context: TaskContext) -> Self {
        Self {
            body: TaskBody::Class(handler),
            arguments: Vec::new(),
            context,
        }
    }

    /// Wrap a callable, keeping the exact `Arc` the caller handed in.
    pub fn from_closure(closure: TaskClosure, origin: ClosureOrigin, context: TaskContext) -> Self {
        Self {
            body: TaskBody::Closure(ClosureTask { closure, origin }),
            arguments: Vec::new(),
            context,
        }
    }

    /// A closure task that runs `command` through the context's shell.
    ///
    /// Arguments attached with [`Task::with_arguments`] are shell-quoted and
    /// appended to the command at execution time.
    pub fn from_shell(command: impl Into<String>, context: TaskContext) -> Self {
        let command = command.into();
        let captured = command.clone();
        let closure: TaskClosure = Arc::new(move |task: &Task| {
            if task.arguments.is_empty() {
                task.run_shell(&captured)
            } else {
                let line = format!("{} {}", captured, shell_words::join(&task.arguments));
                task.run_shell(&line)
            }
        });
        Self::from_closure(closure, ClosureOrigin::Shell { command }, context)
    }

    /// Attach arguments forwarded from the command line.
    pub fn with_arguments(mut self, arguments: Vec<String>) -> Self {
        self.arguments = arguments;
        self
    }

    /// Run the task and return its textual output.
    pub fn execute(&self) -> Result<String> {
        tracing::debug!(task = %self.class_name(), "executing task");
        match &self.body {
            TaskBody::Class(handler) => handler.execute(self),
            TaskBody::Closure(closure) => (closure.closure)(self),
        }
    }

    /// Alias of [`Task::execute`].
    pub fn fire(&self) -> Result<String> {
        self.execute()
    }

    /// Class name of a class task, or [`CLOSURE_TASK_NAME`].
    pub fn class_name(&self) -> &str {
        match &self.body {
            TaskBody::Class(handler) => handler.name(),
            TaskBody::Closure(_) => CLOSURE_TASK_NAME,
        }
    }

    /// Human-readable description.
    pub fn description(&self) -> String {
        match &self.body {
            TaskBody::Class(handler) => handler.description().to_string(),
            TaskBody::Closure(closure) => match &closure.origin {
                ClosureOrigin::Inline => "Inline closure".to_string(),
                ClosureOrigin::Shell { command } => format!("Run `{}`", command),
                ClosureOrigin::Method { target, method } => {
                    format!("Call {}::{}", target, method)
                }
            },
        }
    }

    /// The task body.
    pub fn body(&self) -> &TaskBody {
        &self.body
    }

    /// The wrapped callable, if this is a closure task.
    pub fn closure(&self) -> Option<&TaskClosure> {
        match &self.body {
            TaskBody::Closure(closure) => Some(&closure.closure),
            TaskBody::Class(_) => None,
        }
    }

    /// The closure origin, if this is a closure task.
    pub fn origin(&self) -> Option<&ClosureOrigin> {
        match &self.body {
            TaskBody::Closure(closure) => Some(&closure.origin),
            TaskBody::Class(_) => None,
        }
    }

    /// Arguments attached to this task.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Execution context.
    pub fn context(&self) -> &TaskContext {
        &self.context
    }

    /// Run a shell command through this task's shell.
    pub fn run_shell(&self, command: &str) -> Result<String> {
        self.context.shell.run(command)
    }

    /// Whether both tasks share the same body (same handler or same closure).
    pub fn same_as(&self, other: &Task) -> bool {
        match (&self.body, &other.body) {
            (TaskBody::Class(a), TaskBody::Class(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            (TaskBody::Closure(a), TaskBody::Closure(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(&a.closure), Arc::as_ptr(&b.closure))
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Task");
        debug.field("class", &self.class_name());
        if let Some(origin) = self.origin() {
            debug.field("origin", origin);
        }
        debug.field("arguments", &self.arguments).finish()
    }
}
