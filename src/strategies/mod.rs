//! Pluggable per-phase algorithms.
//!
//! A strategy is looked up by phase name (`strategies.<phase>` in the
//! container) by the phase tasks. The built-in implementations live in
//! [`catalog`] and are registered as container classes named
//! `<Phase><Concrete>Strategy` (e.g. `CheckPhpStrategy`).

mod catalog;

pub use catalog::{StrategyKind, register, strategy_class};

use crate::error::Result;
use crate::task::Task;

/// A pluggable algorithm for one deployment phase.
pub trait Strategy: Send + Sync {
    /// Phase this strategy implements (e.g. "Check").
    fn phase(&self) -> &str;

    /// Concrete implementation name (e.g. "Php").
    fn name(&self) -> &str;

    /// Container class name (e.g. "CheckPhpStrategy").
    fn class_name(&self) -> &str;

    /// One-line description.
    fn description(&self) -> &str {
        ""
    }

    /// Run the strategy on behalf of `task`.
    fn run(&self, task: &Task) -> Result<String>;
}
