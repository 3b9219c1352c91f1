//! Strategy binding.
//!
//! # Resolution Order
//!
//! 1. A concrete name was given: build `<Phase><Concrete>Strategy` from the
//!    class catalog
//! 2. Otherwise: the live binding under `strategies.<phase>`
//! 3. Nothing found: `None`, meaning "no strategy for this phase"

use crate::container::{Instance, Registry};
use crate::strategies::{Strategy, strategy_class};
use std::sync::Arc;

/// Container prefix for phase strategy bindings.
pub const STRATEGY_KEY_PREFIX: &str = "strategies.";

/// Container key of a phase strategy: `strategies.<lowercased-phase>`.
pub fn strategy_key(phase: &str) -> String {
    format!("{}{}", STRATEGY_KEY_PREFIX, phase.to_lowercase())
}

/// Resolves strategies by phase name.
#[derive(Clone)]
pub struct StrategyBinder {
    registry: Arc<dyn Registry>,
}

impl StrategyBinder {
    /// Create a binder over a registry.
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self { registry }
    }

    /// Resolve the strategy for `phase`.
    ///
    /// With an empty `concrete`, returns whatever is bound under
    /// `strategies.<phase>` right now; nothing is cached between calls.
    /// With a `concrete` name, builds that implementation directly.
    pub fn build_strategy(&self, phase: &str, concrete: &str) -> Option<Arc<dyn Strategy>> {
        let instance = if concrete.is_empty() {
            let key = strategy_key(phase);
            if !self.registry.is_bound(&key) {
                tracing::debug!(%phase, %key, "no strategy bound");
                return None;
            }
            self.registry.try_get(&key)?
        } else {
            let class = strategy_class(phase, concrete);
            match self.registry.construct(&class) {
                Some(instance) => instance,
                None => {
                    tracing::debug!(%phase, %concrete, %class, "unknown strategy class");
                    return None;
                }
            }
        };

        match instance {
            Instance::Strategy(strategy) => {
                tracing::debug!(%phase, strategy = %strategy.class_name(), "resolved strategy");
                Some(strategy)
            }
            other => {
                tracing::warn!(
                    %phase,
                    kind = other.kind(),
                    class = %other.class_name(),
                    "strategy binding does not hold a strategy"
                );
                None
            }
        }
    }

    /// Every bound phase and the class name of its strategy, sorted by phase.
    pub fn bound_strategies(&self) -> Vec<(String, String)> {
        self.registry
            .bound_names()
            .into_iter()
            .filter_map(|key| {
                let phase = key.strip_prefix(STRATEGY_KEY_PREFIX)?.to_string();
                match self.registry.try_get(&key)? {
                    Instance::Strategy(strategy) => Some((phase, strategy.class_name().to_string())),
                    _ => None,
                }
            })
            .collect()
    }
}
