//! Side effects applied to entities.

use std::fmt;
use std::rc::Rc;

/// A caller-supplied side effect applied to a target.
///
/// The engine treats the body as opaque: it only requires that the effect
/// can be invoked any number of times. An effect may mutate the target's
/// state and thereby re-enter the dispatcher, or schedule future work.
///
/// # Example
///
/// ```rust
/// use statable::core::Effect;
///
/// let double = Effect::new(|n: &mut i32| *n *= 2);
/// let then_inc = double.then(Effect::new(|n: &mut i32| *n += 1));
///
/// let mut value = 5;
/// then_inc.apply(&mut value);
/// assert_eq!(value, 11);
/// ```
pub struct Effect<E: ?Sized> {
    body: Rc<dyn Fn(&mut E)>,
}

impl<E: ?Sized + 'static> Effect<E> {
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(&mut E) + 'static,
    {
        Effect {
            body: Rc::new(body),
        }
    }

    /// Effect that leaves the target untouched.
    pub fn noop() -> Self {
        Self::new(|_| {})
    }

    pub fn apply(&self, target: &mut E) {
        (self.body)(target)
    }

    /// Run `self`, then `next`, as a single effect.
    pub fn then(self, next: Effect<E>) -> Self {
        Self::new(move |target| {
            self.apply(target);
            next.apply(target);
        })
    }
}

impl<E: ?Sized> Clone for Effect<E> {
    fn clone(&self) -> Self {
        Effect {
            body: Rc::clone(&self.body),
        }
    }
}

impl<E: ?Sized> fmt::Debug for Effect<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Effect(..)")
    }
}
