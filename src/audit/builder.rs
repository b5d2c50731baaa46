//! Builder API for creating audit rules.

use crate::audit::issues::AuditIssue;
use crate::audit::rules::{AuditCheck, AuditRules};
use crate::audit::summary::DispatchSummary;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for creating audit rules. Every check is off until enabled.
pub struct AuditBuilder {
    deny_duplicates: bool,
    deny_empty_modes: bool,
    require_default: bool,
    require_rules: bool,
    custom_checks: Vec<AuditCheck>,
}

impl AuditBuilder {
    pub fn new() -> Self {
        Self {
            deny_duplicates: false,
            deny_empty_modes: false,
            require_default: false,
            require_rules: false,
            custom_checks: Vec::new(),
        }
    }

    /// Flag rules whose label repeats an earlier rule's label
    pub fn deny_duplicates(mut self) -> Self {
        self.deny_duplicates = true;
        self
    }

    /// Flag modes without parts
    pub fn deny_empty_modes(mut self) -> Self {
        self.deny_empty_modes = true;
        self
    }

    /// Flag dispatchers without a default effect
    pub fn require_default(mut self) -> Self {
        self.require_default = true;
        self
    }

    /// Flag dispatchers without rules
    pub fn require_rules(mut self) -> Self {
        self.require_rules = true;
        self
    }

    /// Add a custom validation check
    pub fn require<F>(mut self, check: F) -> Self
    where
        F: Fn(&DispatchSummary) -> Validation<(), NonEmptyVec<AuditIssue>>
            + Send
            + Sync
            + 'static,
    {
        self.custom_checks.push(Box::new(check));
        self
    }

    /// Add a simple predicate check with error message
    pub fn require_pred<F>(mut self, predicate: F, error_msg: String) -> Self
    where
        F: Fn(&DispatchSummary) -> bool + Send + Sync + 'static,
    {
        let check = move |summary: &DispatchSummary| {
            if predicate(summary) {
                Validation::success(())
            } else {
                Validation::fail(AuditIssue::CustomCheckFailed {
                    message: error_msg.clone(),
                })
            }
        };
        self.custom_checks.push(Box::new(check));
        self
    }

    pub fn build(self) -> AuditRules {
        AuditRules {
            deny_duplicates: self.deny_duplicates,
            deny_empty_modes: self.deny_empty_modes,
            require_default: self.require_default,
            require_rules: self.require_rules,
            custom_checks: self.custom_checks,
        }
    }
}

impl Default for AuditBuilder {
    fn default() -> Self {
        Self::new()
    }
}
