//! Name-keyed instance registry.
//!
//! The container has two layers:
//!
//! - **Class catalog**: a closed name → constructor map filled in at startup
//!   (built-in tasks, strategies, host components). It never changes once
//!   the container is shared.
//! - **Bindings**: name → shared instance or factory. The host may add or
//!   remove bindings between calls; lookups always see the live state.
//!
//! Resolution code depends on the [`Registry`] trait rather than on
//! [`Container`] directly, so the override source is an explicit
//! constructor-time dependency.

mod instance;
#[cfg(test)]
mod tests;

pub use instance::{Component, Instance, STRATEGY_METHODS, TASK_METHODS};

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

/// Builds an instance. Receives the container so it can resolve its own
/// dependencies.
pub type Constructor = Arc<dyn Fn(&Container) -> Instance + Send + Sync>;

/// What a name is bound to.
#[derive(Clone)]
enum Binding {
    /// The same instance on every resolve.
    Shared(Instance),
    /// A fresh instance on every resolve.
    Factory(Constructor),
}

/// Lookup interface consumed by the resolver and binders.
pub trait Registry: Send + Sync {
    /// Whether `name` is currently bound (classes do not count).
    fn is_bound(&self, name: &str) -> bool;

    /// The bound instance for `name`, if bound.
    fn try_get(&self, name: &str) -> Option<Instance>;

    /// Construct a new instance of catalog class `class`.
    fn construct(&self, class: &str) -> Option<Instance>;

    /// Whether the class catalog knows `class`.
    fn has_class(&self, class: &str) -> bool;

    /// Catalog class names, sorted.
    fn class_names(&self) -> Vec<String>;

    /// Bound names, sorted.
    fn bound_names(&self) -> Vec<String>;
}

/// The default [`Registry`] implementation.
#[derive(Default)]
pub struct Container {
    classes: BTreeMap<String, Constructor>,
    bindings: RwLock<HashMap<String, Binding>>,
}

impl Container {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class to the catalog. Only possible before the container is shared.
    pub fn register_class<F>(&mut self, class: impl Into<String>, constructor: F)
    where
        F: Fn(&Container) -> Instance + Send + Sync + 'static,
    {
        let class = class.into();
        tracing::debug!(%class, "registering class");
        self.classes.insert(class, Arc::new(constructor));
    }

    /// Bind `name` to a factory that builds a new instance per resolve.
    pub fn bind<F>(&self, name: impl Into<String>, factory: F)
    where
        F: Fn(&Container) -> Instance + Send + Sync + 'static,
    {
        self.insert(name.into(), Binding::Factory(Arc::new(factory)));
    }

    /// Bind `name` to a shared instance.
    pub fn instance(&self, name: impl Into<String>, instance: Instance) {
        self.insert(name.into(), Binding::Shared(instance));
    }

    /// Bind `name` to the constructor of catalog class `class`.
    ///
    /// Returns `false` (and binds nothing) when the class is unknown.
    pub fn alias_class(&self, name: impl Into<String>, class: &str) -> bool {
        match self.classes.get(class) {
            Some(constructor) => {
                self.insert(name.into(), Binding::Factory(Arc::clone(constructor)));
                true
            }
            None => false,
        }
    }

    /// Remove a binding. Returns whether something was bound.
    pub fn unbind(&self, name: &str) -> bool {
        let removed = self
            .bindings
            .write()
            .unwrap_or_else(|poison| poison.into_inner())
            .remove(name)
            .is_some();
        tracing::debug!(%name, removed, "unbinding");
        removed
    }

    /// Resolve `name`: the bound instance if bound, else a new instance of
    /// catalog class `name`.
    pub fn resolve(&self, name: &str) -> Option<Instance> {
        self.try_get(name).or_else(|| self.construct(name))
    }

    fn insert(&self, name: String, binding: Binding) {
        tracing::debug!(%name, "binding");
        self.bindings
            .write()
            .unwrap_or_else(|poison| poison.into_inner())
            .insert(name, binding);
    }

    fn binding(&self, name: &str) -> Option<Binding> {
        self.bindings
            .read()
            .unwrap_or_else(|poison| poison.into_inner())
            .get(name)
            .cloned()
    }
}

impl Registry for Container {
    fn is_bound(&self, name: &str) -> bool {
        self.bindings
            .read()
            .unwrap_or_else(|poison| poison.into_inner())
            .contains_key(name)
    }

    fn try_get(&self, name: &str) -> Option<Instance> {
        // The lock is released before a factory runs, so factories may
        // resolve other names.
        match self.binding(name)? {
            Binding::Shared(instance) => Some(instance),
            Binding::Factory(factory) => Some(factory(self)),
        }
    }

    fn construct(&self, class: &str) -> Option<Instance> {
        self.classes.get(class).map(|constructor| constructor(self))
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.contains_key(class)
    }

    fn class_names(&self) -> Vec<String> {
        self.classes.keys().cloned().collect()
    }

    fn bound_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .bindings
            .read()
            .unwrap_or_else(|poison| poison.into_inner())
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}
