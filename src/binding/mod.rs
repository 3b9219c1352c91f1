//! Name-based binding of commands and strategies.
//!
//! - **Command**: a task name becomes an invocable [`Command`] with a
//!   namespaced command-line name
//! - **Strategy**: a phase name becomes the strategy bound for it, if any
//!
//! Neither binder inspects a task's body; both work on names only.

mod command;
mod strategy;

pub use command::{BuiltinCommand, Command, CommandBinder, CommandKind};
pub use strategy::{STRATEGY_KEY_PREFIX, StrategyBinder, strategy_key};
