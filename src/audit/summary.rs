//! Structural summary of a dispatcher, the input of every audit check.

use crate::core::State;
use crate::dispatch::{Dispatcher, Rule};

/// One rule as seen by an audit.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleSummary {
    pub index: usize,
    pub label: Option<String>,
    /// Number of parts for modes, `None` for single-effect rules
    pub parts: Option<usize>,
}

/// Snapshot of a dispatcher's shape: its rules in order and whether a
/// default effect exists.
#[derive(Clone, Debug, PartialEq)]
pub struct DispatchSummary {
    pub state: String,
    pub rules: Vec<RuleSummary>,
    pub has_default: bool,
}

impl DispatchSummary {
    /// Indices of rules sharing a label with an earlier rule, paired with
    /// that earlier rule's index.
    pub fn shadowed(&self) -> Vec<(String, usize, usize)> {
        let mut shadowed = Vec::new();
        for (position, rule) in self.rules.iter().enumerate() {
            let Some(label) = &rule.label else { continue };
            let first = self.rules[..position]
                .iter()
                .find(|earlier| earlier.label.as_ref() == Some(label));
            if let Some(first) = first {
                shadowed.push((label.clone(), first.index, rule.index));
            }
        }
        shadowed
    }
}

impl<E, S, R> Dispatcher<E, S, R>
where
    S: State,
    R: Rule<E>,
{
    /// Summarize this dispatcher for auditing.
    pub fn summary(&self) -> DispatchSummary {
        DispatchSummary {
            state: format!("{:?}", self.state()),
            rules: self
                .rules()
                .iter()
                .enumerate()
                .map(|(index, rule)| RuleSummary {
                    index,
                    label: rule.label(),
                    parts: rule.part_count(),
                })
                .collect(),
            has_default: self.has_default(),
        }
    }
}
