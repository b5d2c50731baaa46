//! Leaf abstractions of the dispatch engine.
//!
//! This module contains the building blocks every dispatcher is made of:
//! - State values via the `State` bound
//! - `Predicate`s deciding whether a rule matches
//! - `Effect`s applied to a target when a rule wins
//! - A bounded `ApplyHistory` of what was applied

mod effect;
mod history;
mod predicate;
mod state;

pub use effect::Effect;
pub use history::{Applied, ApplyHistory, ApplyRecord};
pub use predicate::Predicate;
pub use state::State;
