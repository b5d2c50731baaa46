//! Rules and factors.

use crate::core::{Effect, Predicate};
use crate::dispatch::dispatcher::Statable;

/// One entry of a dispatcher's ordered rule list.
///
/// A rule decides whether it matches an entity and, when it is the first
/// match, applies itself to that entity. `Factor` and `Mode` are the two
/// rule kinds shipped with the crate; both are dispatched by the same
/// first-match algorithm.
pub trait Rule<E>: Clone {
    /// Whether this rule matches the entity right now. Must be pure.
    fn evaluate(&self, entity: &E) -> bool;

    /// Run this rule's effect on the entity.
    fn apply(&self, entity: &mut E);

    /// Name used in log fields and audits.
    fn label(&self) -> Option<String> {
        None
    }

    /// Number of effect fragments, for rules composed of parts.
    fn part_count(&self) -> Option<usize> {
        None
    }
}

/// A predicate bound to an effect: "if the predicate matches, run the effect".
///
/// # Example
///
/// ```rust
/// use statable::dispatch::{Factor, Rule};
///
/// let clamp = Factor::when(|n: &i32| *n > 10, |n: &mut i32| *n = 10).labeled("clamp");
///
/// let mut value = 42;
/// assert!(clamp.apply_if_matched(&mut value));
/// assert_eq!(value, 10);
/// assert!(!clamp.apply_if_matched(&mut value));
/// assert_eq!(clamp.label().as_deref(), Some("clamp"));
/// ```
pub struct Factor<E> {
    predicate: Predicate<E>,
    effect: Effect<E>,
    label: Option<String>,
}

impl<E: 'static> Factor<E> {
    pub fn new(predicate: Predicate<E>, effect: Effect<E>) -> Self {
        Self {
            predicate,
            effect,
            label: None,
        }
    }

    /// Build a factor from two closures.
    pub fn when<P, F>(predicate: P, effect: F) -> Self
    where
        P: Fn(&E) -> bool + 'static,
        F: Fn(&mut E) + 'static,
    {
        Self::new(Predicate::new(predicate), Effect::new(effect))
    }

    /// Factor matching when the entity's state equals `state`.
    pub fn on_state<F>(state: E::State, effect: F) -> Self
    where
        E: Statable,
        F: Fn(&mut E) + 'static,
    {
        Self::new(state_is(state), Effect::new(effect))
    }

    /// Attach a label for logs and audits.
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn predicate(&self) -> &Predicate<E> {
        &self.predicate
    }

    pub fn effect(&self) -> &Effect<E> {
        &self.effect
    }

    /// Apply the effect only if the predicate matches. Returns whether it ran.
    pub fn apply_if_matched(&self, entity: &mut E) -> bool {
        let matched = self.predicate.evaluate(entity);
        if matched {
            self.effect.apply(entity);
        }
        matched
    }
}

impl<E> Clone for Factor<E> {
    fn clone(&self) -> Self {
        Self {
            predicate: self.predicate.clone(),
            effect: self.effect.clone(),
            label: self.label.clone(),
        }
    }
}

impl<E: 'static> Rule<E> for Factor<E> {
    fn evaluate(&self, entity: &E) -> bool {
        self.predicate.evaluate(entity)
    }

    fn apply(&self, entity: &mut E) {
        self.effect.apply(entity)
    }

    fn label(&self) -> Option<String> {
        self.label.clone()
    }
}

/// Predicate matching entities whose current state equals `expected`.
pub fn state_is<E>(expected: E::State) -> Predicate<E>
where
    E: Statable + 'static,
{
    Predicate::new(move |entity: &E| *entity.state() == expected)
}

/// Position and value of the first rule matching `entity`.
///
/// This is the whole precedence policy of the engine: list order decides,
/// and the scan stops at the first match.
pub(crate) fn first_match<'a, E, R>(rules: &'a [R], entity: &E) -> Option<(usize, &'a R)>
where
    R: Rule<E>,
{
    rules
        .iter()
        .enumerate()
        .find(|(_, rule)| rule.evaluate(entity))
}
