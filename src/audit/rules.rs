//! Audit rules evaluated with `Validation`.

use crate::audit::issues::AuditIssue;
use crate::audit::summary::DispatchSummary;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Type alias for custom audit check functions
pub type AuditCheck =
    Box<dyn Fn(&DispatchSummary) -> Validation<(), NonEmptyVec<AuditIssue>> + Send + Sync>;

/// Configured set of audit checks.
/// Uses Validation to accumulate ALL issues.
pub struct AuditRules {
    pub(crate) deny_duplicates: bool,
    pub(crate) deny_empty_modes: bool,
    pub(crate) require_default: bool,
    pub(crate) require_rules: bool,
    pub(crate) custom_checks: Vec<AuditCheck>,
}

impl AuditRules {
    /// Run every configured check, accumulating ALL issues.
    /// Returns Validation::Success(()) if all checks pass.
    pub fn audit(&self, summary: &DispatchSummary) -> Validation<(), NonEmptyVec<AuditIssue>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<AuditIssue>>> = Vec::new();

        if self.deny_duplicates {
            for (key, first, duplicate) in summary.shadowed() {
                checks.push(Validation::fail(AuditIssue::DuplicateKey {
                    key,
                    first,
                    duplicate,
                }));
            }
        }

        if self.deny_empty_modes {
            for rule in &summary.rules {
                if rule.parts == Some(0) {
                    checks.push(Validation::fail(AuditIssue::EmptyMode {
                        key: rule.label.clone().unwrap_or_default(),
                        index: rule.index,
                    }));
                }
            }
        }

        if self.require_default && !summary.has_default {
            checks.push(Validation::fail(AuditIssue::MissingDefault));
        }

        if self.require_rules && summary.rules.is_empty() {
            checks.push(Validation::fail(AuditIssue::NoRules));
        }

        for check_fn in &self.custom_checks {
            checks.push(check_fn(summary));
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Like [`audit`](AuditRules::audit), collected into a plain `Result`.
    pub fn check(&self, summary: &DispatchSummary) -> Result<(), Vec<AuditIssue>> {
        match self.audit(summary) {
            Validation::Success(()) => Ok(()),
            Validation::Failure(issues) => Err(issues.iter().cloned().collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::builder::AuditBuilder;
    use crate::audit::summary::RuleSummary;

    fn summary(rules: Vec<(Option<&str>, Option<usize>)>, has_default: bool) -> DispatchSummary {
        DispatchSummary {
            state: "Idle".to_string(),
            rules: rules
                .into_iter()
                .enumerate()
                .map(|(index, (label, parts))| RuleSummary {
                    index,
                    label: label.map(str::to_string),
                    parts,
                })
                .collect(),
            has_default,
        }
    }

    #[test]
    fn audit_accumulates_all_issues() {
        let rules = AuditBuilder::new()
            .deny_duplicates()
            .deny_empty_modes()
            .require_default()
            .require_pred(|_| false, "Custom check always fails".to_string())
            .build();

        let shape = summary(
            vec![(Some("Data"), Some(1)), (Some("Data"), Some(0))],
            false,
        );

        match rules.audit(&shape) {
            Validation::Failure(issues) => {
                assert_eq!(issues.len(), 4);

                assert!(issues
                    .iter()
                    .any(|i| matches!(i, AuditIssue::DuplicateKey { duplicate: 1, .. })));
                assert!(issues
                    .iter()
                    .any(|i| matches!(i, AuditIssue::EmptyMode { index: 1, .. })));
                assert!(issues.iter().any(|i| matches!(i, AuditIssue::MissingDefault)));
                assert!(issues
                    .iter()
                    .any(|i| matches!(i, AuditIssue::CustomCheckFailed { .. })));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn audit_succeeds_when_all_checks_pass() {
        let rules = AuditBuilder::new()
            .deny_duplicates()
            .deny_empty_modes()
            .require_default()
            .require_rules()
            .require_pred(|s| s.rules.len() == 2, "Expected two rules".to_string())
            .build();

        let shape = summary(vec![(Some("A"), Some(1)), (Some("B"), None)], true);

        assert!(rules.audit(&shape).is_success());
        assert_eq!(rules.check(&shape), Ok(()));
    }

    #[test]
    fn disabled_checks_do_not_run() {
        let rules = AuditBuilder::new().build();
        let shape = summary(vec![(Some("A"), Some(0)), (Some("A"), Some(0))], false);

        assert!(rules.audit(&shape).is_success());
    }

    #[test]
    fn require_rules_flags_empty_dispatchers() {
        let rules = AuditBuilder::new().require_rules().build();

        assert_eq!(rules.check(&summary(vec![], true)), Err(vec![AuditIssue::NoRules]));
    }

    #[test]
    fn custom_validation_check_works() {
        let rules = AuditBuilder::new()
            .require(|s: &DispatchSummary| {
                if s.has_default {
                    Validation::success(())
                } else {
                    Validation::fail(AuditIssue::CustomCheckFailed {
                        message: "Fallback required in production".to_string(),
                    })
                }
            })
            .build();

        assert!(rules.audit(&summary(vec![(None, None)], false)).is_failure());
        assert!(rules.audit(&summary(vec![(None, None)], true)).is_success());
    }
}
