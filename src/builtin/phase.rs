//! Tasks that delegate to their phase strategy.

use crate::binding::StrategyBinder;
use crate::error::Result;
use crate::task::{Task, TaskHandler};
use std::sync::Arc;

/// Runs the strategy bound for its phase. The phase is the class name.
pub struct PhaseTask {
    phase: String,
    description: String,
}

impl PhaseTask {
    /// Create a phase task.
    pub fn new(phase: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            phase: phase.into(),
            description: description.into(),
        }
    }
}

impl TaskHandler for PhaseTask {
    fn name(&self) -> &str {
        &self.phase
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn execute(&self, task: &Task) -> Result<String> {
        let binder = StrategyBinder::new(Arc::clone(task.context().registry()));
        match binder.build_strategy(&self.phase, "") {
            Some(strategy) => {
                tracing::info!(phase = %self.phase, strategy = %strategy.class_name(), "running phase");
                strategy.run(task)
            }
            None => {
                tracing::info!(phase = %self.phase, "no strategy bound, skipping phase");
                Ok(format!("No {} strategy configured, skipping", self.phase))
            }
        }
    }
}
