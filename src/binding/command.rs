//! Command binding.
//!
//! # Naming
//!
//! - The root task name becomes the bare top-level verb (`deploy`)
//! - Every other task becomes `<namespace>:<lowercased-task-name>`
//!
//! Binding never fails. A name with no dedicated command gets a generic
//! wrapper that resolves the task only when run, so resolution errors
//! surface at run time.

use crate::config::Config;
use crate::error::{HoistError, Result};
use crate::exit_codes;
use crate::resolver::{TaskRef, TasksBuilder};

/// Commands with a dedicated implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinCommand {
    /// Check the server is ready to receive the application.
    Check,
    /// Install the application's dependencies.
    Dependencies,
    /// Run the application's tests.
    Test,
    /// Run database migrations.
    Migrate,
    /// Run the whole deployment queue.
    Deploy,
}

impl BuiltinCommand {
    /// Every built-in command.
    pub const ALL: [BuiltinCommand; 5] = [
        BuiltinCommand::Check,
        BuiltinCommand::Dependencies,
        BuiltinCommand::Test,
        BuiltinCommand::Migrate,
        BuiltinCommand::Deploy,
    ];

    /// Match a task name to a built-in command (case-insensitive).
    pub fn from_task_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|command| command.task_class().eq_ignore_ascii_case(name))
    }

    /// The task class this command runs.
    pub fn task_class(self) -> &'static str {
        match self {
            BuiltinCommand::Check => "Check",
            BuiltinCommand::Dependencies => "Dependencies",
            BuiltinCommand::Test => "Test",
            BuiltinCommand::Migrate => "Migrate",
            BuiltinCommand::Deploy => "Deploy",
        }
    }

    /// One-line description.
    pub fn description(self) -> &'static str {
        match self {
            BuiltinCommand::Check => "Check if the server is ready to receive the application",
            BuiltinCommand::Dependencies => "Install or update the application's dependencies",
            BuiltinCommand::Test => "Run the application's tests",
            BuiltinCommand::Migrate => "Migrate the database",
            BuiltinCommand::Deploy => "Deploy the application",
        }
    }
}

/// Which implementation a command uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// The top-level program command.
    Root,
    /// A dedicated built-in command.
    BuiltIn(BuiltinCommand),
    /// The generic wrapper around an arbitrary task name.
    Generic,
}

/// A command-line invocable wrapper around a task name.
#[derive(Debug, Clone)]
pub struct Command {
    name: String,
    task_name: String,
    kind: CommandKind,
    raw_args: String,
    namespace: String,
}

impl Command {
    /// Command-line name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The task name this command was bound from.
    pub fn task_name(&self) -> &str {
        &self.task_name
    }

    /// Implementation used.
    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    /// Raw arguments, as given at bind time.
    pub fn raw_args(&self) -> &str {
        &self.raw_args
    }

    /// One-line description.
    pub fn description(&self) -> String {
        match self.kind {
            CommandKind::Root => "List the available commands".to_string(),
            CommandKind::BuiltIn(builtin) => builtin.description().to_string(),
            CommandKind::Generic => format!("Run the '{}' task", self.task_name),
        }
    }

    /// Raw arguments split shell-style.
    pub fn arguments(&self) -> Result<Vec<String>> {
        shell_words::split(&self.raw_args).map_err(|e| {
            HoistError::UserError(format!(
                "failed to parse arguments '{}' for {}: {}\n\
                 Fix: check for unmatched quotes or invalid escape sequences.",
                self.raw_args, self.name, e
            ))
        })
    }

    /// Resolve the task and run it, returning its output.
    ///
    /// The root command lists the commands that can be built instead.
    pub fn execute(&self, builder: &TasksBuilder) -> Result<String> {
        let task = match self.kind {
            CommandKind::Root => return Ok(self.listing(builder)),
            CommandKind::BuiltIn(builtin) => builder.build_task_from_class(builtin.task_class())?,
            CommandKind::Generic => builder.build_task(TaskRef::Text(self.task_name.clone()))?,
        };

        tracing::info!(command = %self.name, task = %task.class_name(), "running command");
        task.with_arguments(self.arguments()?).execute()
    }

    /// Run the command, print its output and return the exit code.
    pub fn run(&self, builder: &TasksBuilder) -> i32 {
        match self.execute(builder) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{}", output);
                }
                exit_codes::SUCCESS
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                err.exit_code()
            }
        }
    }

    fn listing(&self, builder: &TasksBuilder) -> String {
        let mut lines = vec![format!("Available commands ({}):", self.name)];
        for task in builder.task_names() {
            lines.push(format!("  {}:{}", self.namespace, task.to_lowercase()));
        }
        lines.join("\n")
    }
}

/// Maps task names to commands.
#[derive(Debug, Clone)]
pub struct CommandBinder {
    root_task: String,
    root_command: String,
    namespace: String,
}

impl CommandBinder {
    /// Create a binder.
    pub fn new(
        root_task: impl Into<String>,
        root_command: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            root_task: root_task.into(),
            root_command: root_command.into(),
            namespace: namespace.into(),
        }
    }

    /// Create a binder from the configured root task, root command and namespace.
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.root_task, &config.root_command, &config.namespace)
    }

    /// Bind a task name to a command. Never fails.
    pub fn build_command(&self, task_name: &str, raw_args: &str) -> Command {
        let (kind, name) = if task_name == self.root_task {
            (CommandKind::Root, self.root_command.clone())
        } else {
            let kind = match BuiltinCommand::from_task_name(task_name) {
                Some(builtin) => CommandKind::BuiltIn(builtin),
                None => CommandKind::Generic,
            };
            (kind, self.namespaced(task_name))
        };

        tracing::debug!(%task_name, command = %name, ?kind, "bound command");
        Command {
            name,
            task_name: task_name.to_string(),
            kind,
            raw_args: raw_args.to_string(),
            namespace: self.namespace.clone(),
        }
    }

    /// The root command plus one command per buildable task, sorted by name.
    pub fn build_commands(&self, builder: &TasksBuilder) -> Vec<Command> {
        let mut commands = vec![self.build_command(&self.root_task, "")];
        for task in builder.task_names() {
            if task != self.root_task {
                commands.push(self.build_command(&task, ""));
            }
        }
        commands.sort_by(|a, b| a.name.cmp(&b.name));
        commands
    }

    fn namespaced(&self, task_name: &str) -> String {
        format!("{}:{}", self.namespace, task_name.to_lowercase())
    }
}
