//! Delayed work for timed effects.

pub mod advance;
pub mod scheduler;

pub use advance::advance_after;
pub use scheduler::{Callback, ManualScheduler, Scheduler};
