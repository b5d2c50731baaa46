//! State value bound shared by dispatchers, histories and predicates.
//!
//! The engine only ever compares state values for equality and prints them
//! in diagnostics, so the bound is deliberately small.

use std::fmt::Debug;

/// Trait for values an entity holds as its "current state".
///
/// # Required Traits
///
/// - `Clone`: the dispatcher snapshots the state before running an effect
/// - `PartialEq`: factors and change detection compare states
/// - `Debug`: states appear in log fields and audit summaries
///
/// Every type meeting these bounds is a `State`, so plain values such as
/// `bool`, integers or `String` work out of the box. Closed enums declared
/// with [`state_enum!`](crate::state_enum) are the usual choice.
///
/// # Example
///
/// ```rust
/// use statable::core::State;
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Signal {
///     Go,
///     Stop,
/// }
///
/// fn assert_state<S: State>(_: &S) {}
///
/// assert_state(&Signal::Go);
/// assert_state(&true);
/// assert_state(&42u8);
/// ```
pub trait State: Clone + PartialEq + Debug + 'static {}

impl<T> State for T where T: Clone + PartialEq + Debug + 'static {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Initial,
        Processing,
        Complete,
    }

    fn is_state<S: State>(_: &S) -> bool {
        true
    }

    #[test]
    fn primitives_are_states() {
        assert!(is_state(&false));
        assert!(is_state(&7i32));
        assert!(is_state(&String::from("idle")));
    }

    #[test]
    fn enums_are_states() {
        assert!(is_state(&TestState::Initial));
    }

    #[test]
    fn state_serializes_correctly() {
        let state = TestState::Processing;
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: TestState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }

    #[test]
    fn state_is_comparable() {
        assert_eq!(TestState::Complete, TestState::Complete.clone());
        assert_ne!(TestState::Initial, TestState::Complete);
    }
}
