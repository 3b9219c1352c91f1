//! Built-in task classes.
//!
//! - **Phase tasks** (`Check`, `Dependencies`, `Test`, `Migrate`) run
//!   whatever strategy is bound for their phase, and skip when none is
//! - **Sequence tasks** run a list of task references in order; `Deploy`
//!   is the sequence from `deploy_queue`, custom tasks from `tasks:` are
//!   bound as `tasks.<name>`

mod phase;
mod sequence;
#[cfg(test)]
mod tests;

pub use phase::PhaseTask;
pub use sequence::SequenceTask;

use crate::binding::BuiltinCommand;
use crate::config::Config;
use crate::container::{Container, Instance};
use crate::resolver::task_alias;
use std::sync::Arc;

/// Register the built-in task classes and bind the configured custom tasks.
pub fn register(container: &mut Container, config: &Config) {
    for command in BuiltinCommand::ALL {
        let class = command.task_class();
        if command == BuiltinCommand::Deploy {
            let queue = config.deploy_queue.clone();
            container.register_class(class, move |_| {
                Instance::Task(Arc::new(SequenceTask::new(
                    class,
                    command.description(),
                    queue.clone(),
                )))
            });
        } else {
            container.register_class(class, move |_| {
                Instance::Task(Arc::new(PhaseTask::new(class, command.description())))
            });
        }
    }

    for (name, steps) in &config.tasks {
        let task = SequenceTask::new(name, format!("Custom task '{}'", name), steps.clone());
        container.instance(task_alias(name), Instance::Task(Arc::new(task)));
    }
}

