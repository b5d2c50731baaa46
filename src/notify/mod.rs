//! Push-style observers.
//!
//! Unlike dispatchers, which live inside the entity they drive, subscribers
//! react to a state owned by someone else: the owner announces each new
//! value through a [`Broadcaster`] and every [`StateSubscriber`] decides
//! independently whether to react.

pub mod broadcaster;
pub mod subscriber;

pub use broadcaster::{Broadcaster, SubscriptionId};
pub use subscriber::{StateSubscriber, Subscriber};
