//! Audit findings.

use thiserror::Error;

/// Structural problems an audit can find in a dispatcher.
///
/// None of these stop a dispatcher from running: they describe rules that
/// can never win, modes that do nothing, or fallbacks that are missing.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuditIssue {
    #[error("Rule '{key}' at position {duplicate} is shadowed by position {first}")]
    DuplicateKey {
        key: String,
        first: usize,
        duplicate: usize,
    },

    #[error("Mode '{key}' at position {index} has no parts")]
    EmptyMode { key: String, index: usize },

    #[error("No default effect configured")]
    MissingDefault,

    #[error("Dispatcher has no rules")]
    NoRules,

    #[error("Custom check failed: {message}")]
    CustomCheckFailed { message: String },
}
