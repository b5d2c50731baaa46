//! Predicates over entities.
//!
//! A predicate is a pure boolean function. Factors and modes use predicates
//! to decide whether they match an entity, and subscribers use them to decide
//! whether an announced state concerns them.

use std::fmt;
use std::rc::Rc;

/// Pure predicate evaluated against a borrowed value.
///
/// Predicates never fail: a condition that cannot be decided (missing data,
/// for instance) must evaluate to `false`. They are cheap to clone, so one
/// predicate can be shared by several factors.
///
/// # Example
///
/// ```rust
/// use statable::core::Predicate;
///
/// let positive = Predicate::new(|n: &i32| *n > 0);
/// let even = Predicate::new(|n: &i32| n % 2 == 0);
/// let positive_even = positive.clone().and(even);
///
/// assert!(positive.evaluate(&3));
/// assert!(!positive_even.evaluate(&3));
/// assert!(positive_even.evaluate(&4));
/// ```
pub struct Predicate<E: ?Sized> {
    test: Rc<dyn Fn(&E) -> bool>,
}

impl<E: ?Sized + 'static> Predicate<E> {
    /// Create a predicate from a pure function.
    pub fn new<F>(test: F) -> Self
    where
        F: Fn(&E) -> bool + 'static,
    {
        Predicate {
            test: Rc::new(test),
        }
    }

    /// Predicate that matches everything. Useful as a catch-all last factor.
    pub fn always() -> Self {
        Self::new(|_| true)
    }

    /// Predicate that matches nothing.
    pub fn never() -> Self {
        Self::new(|_| false)
    }

    /// Evaluate the predicate.
    pub fn evaluate(&self, entity: &E) -> bool {
        (self.test)(entity)
    }

    /// Both predicates must match. `other` is not evaluated when `self` fails.
    pub fn and(self, other: Predicate<E>) -> Self {
        Self::new(move |entity| self.evaluate(entity) && other.evaluate(entity))
    }

    /// Either predicate must match. `other` is not evaluated when `self` matches.
    pub fn or(self, other: Predicate<E>) -> Self {
        Self::new(move |entity| self.evaluate(entity) || other.evaluate(entity))
    }

    /// Negate the predicate.
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::new(move |entity| !self.evaluate(entity))
    }
}

impl<E: 'static> Predicate<E> {
    /// Predicate matching values equal to `expected`.
    ///
    /// ```rust
    /// use statable::core::Predicate;
    ///
    /// let is_red = Predicate::equals("red");
    /// assert!(is_red.evaluate(&"red"));
    /// assert!(!is_red.evaluate(&"green"));
    /// ```
    pub fn equals(expected: E) -> Self
    where
        E: PartialEq,
    {
        Self::new(move |value| *value == expected)
    }
}

impl<E: ?Sized> Clone for Predicate<E> {
    fn clone(&self) -> Self {
        Predicate {
            test: Rc::clone(&self.test),
        }
    }
}

impl<E: ?Sized> fmt::Debug for Predicate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Clone, Copy, PartialEq, Debug)]
    enum Light {
        Red,
        Yellow,
        Green,
    }

    #[test]
    fn predicate_matches_selected_values() {
        let is_red = Predicate::new(|l: &Light| matches!(l, Light::Red));

        assert!(is_red.evaluate(&Light::Red));
        assert!(!is_red.evaluate(&Light::Green));
    }

    #[test]
    fn predicate_is_deterministic() {
        let stop = Predicate::new(|l: &Light| !matches!(l, Light::Green));

        assert_eq!(stop.evaluate(&Light::Yellow), stop.evaluate(&Light::Yellow));
    }

    #[test]
    fn combinators_compose() {
        let not_green = Predicate::equals(Light::Green).not();
        let red_or_yellow = Predicate::equals(Light::Red).or(Predicate::equals(Light::Yellow));
        let both = not_green.clone().and(red_or_yellow.clone());

        for light in [Light::Red, Light::Yellow, Light::Green] {
            assert_eq!(both.evaluate(&light), light != Light::Green);
            assert_eq!(not_green.evaluate(&light), red_or_yellow.evaluate(&light));
        }
    }

    #[test]
    fn and_short_circuits() {
        let calls = Rc::new(Cell::new(0));
        let counted = {
            let calls = Rc::clone(&calls);
            Predicate::new(move |_: &Light| {
                calls.set(calls.get() + 1);
                true
            })
        };

        let combined = Predicate::never().and(counted);

        assert!(!combined.evaluate(&Light::Red));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn always_and_never() {
        assert!(Predicate::<Light>::always().evaluate(&Light::Green));
        assert!(!Predicate::<Light>::never().evaluate(&Light::Green));
    }

    #[test]
    fn clones_share_the_same_function() {
        let original = Predicate::equals(3);
        let copy = original.clone();

        assert!(copy.evaluate(&3));
        assert!(Rc::ptr_eq(&original.test, &copy.test));
    }
}
