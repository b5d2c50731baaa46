//! Apply history tracking.
//!
//! Dispatchers can keep a bounded, in-memory log of every apply they
//! performed: which state was applied, what was selected for it and when.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Outcome of one apply pass over a dispatcher.
///
/// Every apply returns one of these, so the two silent outcomes of
/// first-match dispatch (nothing matched, or the state did not change)
/// are observable by callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Applied {
    /// The rule at this position matched first and its effect ran.
    Rule(usize),

    /// No rule matched; the configured default effect ran.
    Default,

    /// No rule matched and no default is configured. Nothing ran.
    NoMatch,

    /// The state equals the last applied state, so nothing was re-applied.
    Skipped,
}

impl Applied {
    /// Whether any effect ran.
    pub fn ran(&self) -> bool {
        matches!(self, Self::Rule(_) | Self::Default)
    }

    /// Index of the winning rule, if a rule won.
    pub fn rule_index(&self) -> Option<usize> {
        match self {
            Self::Rule(index) => Some(*index),
            _ => None,
        }
    }
}

/// Record of a single apply.
///
/// # Example
///
/// ```rust
/// use statable::core::{Applied, ApplyRecord};
/// use chrono::Utc;
///
/// let record = ApplyRecord {
///     state: 3u8,
///     outcome: Applied::Rule(0),
///     timestamp: Utc::now(),
/// };
/// assert!(record.outcome.ran());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApplyRecord<S> {
    /// The state that was applied
    pub state: S,
    /// What the dispatcher selected for it
    pub outcome: Applied,
    /// When the apply happened
    pub timestamp: DateTime<Utc>,
}

/// Bounded, ordered history of applies.
///
/// Records are kept oldest first. Once `limit` records are held, recording
/// another evicts the oldest.
///
/// # Example
///
/// ```rust
/// use statable::core::{Applied, ApplyHistory, ApplyRecord};
/// use chrono::Utc;
///
/// let mut history = ApplyHistory::with_limit(2);
/// for state in ["green", "yellow", "red"] {
///     history.record(ApplyRecord {
///         state,
///         outcome: Applied::Rule(0),
///         timestamp: Utc::now(),
///     });
/// }
///
/// assert_eq!(history.path(), vec![&"yellow", &"red"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApplyHistory<S> {
    records: VecDeque<ApplyRecord<S>>,
    limit: usize,
}

impl<S: State> ApplyHistory<S> {
    /// Create an empty history holding at most `limit` records.
    ///
    /// A `limit` of zero keeps nothing.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            records: VecDeque::new(),
            limit,
        }
    }

    /// Append a record, evicting the oldest when full.
    pub fn record(&mut self, record: ApplyRecord<S>) {
        if self.limit == 0 {
            return;
        }
        while self.records.len() >= self.limit {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All retained records, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &ApplyRecord<S>> {
        self.records.iter()
    }

    /// The most recent record.
    pub fn last(&self) -> Option<&ApplyRecord<S>> {
        self.records.back()
    }

    /// States applied, oldest first.
    pub fn path(&self) -> Vec<&S> {
        self.records.iter().map(|record| &record.state).collect()
    }

    /// Time between the oldest and newest retained records.
    ///
    /// Returns `None` when the history is empty.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.front(), self.records.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Initial,
        Processing,
        Complete,
    }

    fn record(state: TestState, outcome: Applied) -> ApplyRecord<TestState> {
        ApplyRecord {
            state,
            outcome,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: ApplyHistory<TestState> = ApplyHistory::with_limit(8);
        assert!(history.is_empty());
        assert!(history.path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_appends_in_order() {
        let mut history = ApplyHistory::with_limit(8);
        history.record(record(TestState::Initial, Applied::Rule(0)));
        history.record(record(TestState::Processing, Applied::Default));

        assert_eq!(
            history.path(),
            vec![&TestState::Initial, &TestState::Processing]
        );
        assert_eq!(history.last().map(|r| r.outcome), Some(Applied::Default));
    }

    #[test]
    fn limit_evicts_oldest() {
        let mut history = ApplyHistory::with_limit(2);
        history.record(record(TestState::Initial, Applied::Rule(0)));
        history.record(record(TestState::Processing, Applied::Rule(1)));
        history.record(record(TestState::Complete, Applied::NoMatch));

        assert_eq!(history.len(), 2);
        assert_eq!(
            history.path(),
            vec![&TestState::Processing, &TestState::Complete]
        );
    }

    #[test]
    fn zero_limit_keeps_nothing() {
        let mut history = ApplyHistory::with_limit(0);
        history.record(record(TestState::Initial, Applied::Rule(0)));
        assert!(history.is_empty());
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let mut history = ApplyHistory::with_limit(4);
        let start = Utc::now();
        history.record(ApplyRecord {
            state: TestState::Initial,
            outcome: Applied::Rule(0),
            timestamp: start,
        });
        history.record(ApplyRecord {
            state: TestState::Complete,
            outcome: Applied::Rule(2),
            timestamp: start + chrono::Duration::milliseconds(10),
        });

        assert_eq!(history.duration(), Some(Duration::from_millis(10)));
    }

    #[test]
    fn single_record_has_duration_zero() {
        let mut history = ApplyHistory::with_limit(4);
        history.record(record(TestState::Initial, Applied::Rule(0)));

        assert_eq!(history.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = ApplyHistory::with_limit(4);
        history.record(record(TestState::Initial, Applied::Rule(0)));
        history.record(record(TestState::Processing, Applied::Skipped));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: ApplyHistory<TestState> = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.path(), history.path());
        assert_eq!(deserialized.limit(), 4);
    }

    #[test]
    fn applied_helpers() {
        assert!(Applied::Rule(2).ran());
        assert!(Applied::Default.ran());
        assert!(!Applied::NoMatch.ran());
        assert!(!Applied::Skipped.ran());
        assert_eq!(Applied::Rule(2).rule_index(), Some(2));
        assert_eq!(Applied::Default.rule_index(), None);
    }
}
