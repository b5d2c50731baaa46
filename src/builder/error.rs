//! Build errors for dispatcher builders.

use thiserror::Error;

/// Errors that can occur when building dispatchers and mode registries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No rules and no default effect. Add a rule or call .default_effect()")]
    NoRules,

    #[error("History limit must be at least 1. Omit .record_history() to disable it")]
    ZeroHistoryLimit,
}
