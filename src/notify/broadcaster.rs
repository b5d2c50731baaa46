//! Fan-out of announced states to subscribers.

use crate::notify::subscriber::StateSubscriber;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a subscription
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owns a list of subscribers and announces states to all of them.
///
/// Subscribers are notified in subscription order. Each one decides on its
/// own whether a state concerns it, so the outcome of a broadcast does not
/// depend on that order.
///
/// ```rust
/// use statable::notify::{Broadcaster, Subscriber};
/// use std::cell::Cell;
///
/// let stopped = Cell::new(0);
/// let started = Cell::new(0);
///
/// let mut light = Broadcaster::new();
/// light.subscribe(Subscriber::when(|red: &bool| *red, || stopped.set(stopped.get() + 1)));
/// let go = light.subscribe(Subscriber::when(|red: &bool| !*red, || started.set(started.get() + 1)));
///
/// assert_eq!(light.broadcast(&true), 1);
/// assert!(light.unsubscribe(go));
/// assert_eq!(light.broadcast(&false), 0);
/// assert_eq!((stopped.get(), started.get()), (1, 0));
/// ```
pub struct Broadcaster<'a, X: ?Sized> {
    subscribers: Vec<(SubscriptionId, Box<dyn StateSubscriber<X> + 'a>)>,
}

impl<'a, X: ?Sized> Broadcaster<'a, X> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Add a subscriber. The returned id removes it again.
    pub fn subscribe<S>(&mut self, subscriber: S) -> SubscriptionId
    where
        S: StateSubscriber<X> + 'a,
    {
        let id = SubscriptionId::new();
        self.subscribers.push((id, Box::new(subscriber)));
        tracing::trace!(subscription = %id, total = self.subscribers.len(), "subscriber added");
        id
    }

    /// Remove a subscriber. Returns whether it was subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        before != self.subscribers.len()
    }

    /// Notify every subscriber of `state`. Returns how many fired.
    pub fn broadcast(&mut self, state: &X) -> usize
    where
        X: fmt::Debug,
    {
        let fired = self
            .subscribers
            .iter_mut()
            .map(|(_, subscriber)| subscriber.notify(state))
            .filter(|fired| *fired)
            .count();
        tracing::trace!(state = ?state, fired, total = self.subscribers.len(), "state broadcast");
        fired
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl<X: ?Sized> Default for Broadcaster<'_, X> {
    fn default() -> Self {
        Self::new()
    }
}

impl<X: ?Sized> fmt::Debug for Broadcaster<'_, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Broadcaster")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
