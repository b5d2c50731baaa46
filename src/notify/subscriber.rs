//! Observers of an externally announced state.

use crate::core::Predicate;
use std::fmt;

/// An observer that reacts to a state it does not own.
///
/// The announcing side pushes a state value; the subscriber decides with a
/// pure predicate whether that value concerns it, and if so runs its action.
pub trait StateSubscriber<X: ?Sized> {
    /// Whether the announced state concerns this subscriber. Must be pure.
    fn evaluate(&self, state: &X) -> bool;

    /// React to a matching state.
    fn invoke(&mut self);

    /// Evaluate `state` and invoke on a match. Returns whether it fired.
    fn notify(&mut self, state: &X) -> bool {
        let matched = self.evaluate(state);
        if matched {
            self.invoke();
        }
        matched
    }
}

/// Closure-backed [`StateSubscriber`].
///
/// ```rust
/// use statable::notify::{StateSubscriber, Subscriber};
///
/// let mut overheats = 0;
/// {
///     let mut on_overheat = Subscriber::when(|celsius: &u32| *celsius > 90, || overheats += 1);
///     assert!(on_overheat.notify(&95));
///     assert!(!on_overheat.notify(&40));
/// }
/// assert_eq!(overheats, 1);
/// ```
pub struct Subscriber<'a, X: ?Sized> {
    predicate: Predicate<X>,
    action: Box<dyn FnMut() + 'a>,
}

impl<'a, X: ?Sized + 'static> Subscriber<'a, X> {
    pub fn new<F>(predicate: Predicate<X>, action: F) -> Self
    where
        F: FnMut() + 'a,
    {
        Self {
            predicate,
            action: Box::new(action),
        }
    }

    /// Build a subscriber from a predicate closure and an action.
    pub fn when<P, F>(predicate: P, action: F) -> Self
    where
        P: Fn(&X) -> bool + 'static,
        F: FnMut() + 'a,
    {
        Self::new(Predicate::new(predicate), action)
    }

    pub fn predicate(&self) -> &Predicate<X> {
        &self.predicate
    }
}

impl<X: ?Sized + 'static> StateSubscriber<X> for Subscriber<'_, X> {
    fn evaluate(&self, state: &X) -> bool {
        self.predicate.evaluate(state)
    }

    fn invoke(&mut self) {
        (self.action)()
    }
}

impl<X: ?Sized> fmt::Debug for Subscriber<'_, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber").finish_non_exhaustive()
    }
}
