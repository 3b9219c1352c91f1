//! Tasks made of other tasks.

use crate::error::Result;
use crate::resolver::TasksBuilder;
use crate::task::{Task, TaskHandler};

/// Resolves its steps when run and executes them in order.
///
/// Steps are resolved all at once before any of them runs, so a bad step
/// fails the task without side effects. The first failing step stops the
/// sequence. A sequence that ends up running itself again fails instead of
/// recursing.
pub struct SequenceTask {
    name: String,
    description: String,
    steps: Vec<String>,
}

impl SequenceTask {
    /// Create a sequence task.
    pub fn new(name: impl Into<String>, description: impl Into<String>, steps: Vec<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            steps,
        }
    }

    /// The task references run by this sequence.
    pub fn steps(&self) -> &[String] {
        &self.steps
    }
}

impl TaskHandler for SequenceTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn execute(&self, task: &Task) -> Result<String> {
        let context = task.context().enter(&self.name)?;
        let builder = TasksBuilder::new(context);
        let steps = builder.build_tasks(&self.steps)?;

        let mut outputs = Vec::with_capacity(steps.len());
        for step in steps {
            tracing::info!(sequence = %self.name, step = %step.class_name(), "running step");
            let output = step.with_arguments(task.arguments().to_vec()).execute()?;
            if !output.is_empty() {
                outputs.push(output);
            }
        }
        Ok(outputs.join("\n"))
    }
}
