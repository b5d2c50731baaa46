//! Statable: declarative first-match-wins dispatch for stateful entities
//!
//! An entity owns a dispatcher holding its current state and an ordered list
//! of rules. Whenever the state changes, the rules are scanned in order and
//! the first one whose predicate matches runs its effect; if none matches, an
//! optional default effect runs instead. Rules are pure predicates paired with
//! caller-supplied effects, so the selection logic stays deterministic and
//! the side effects stay at the edge.
//!
//! # Core Concepts
//!
//! - **Factor**: a predicate bound to one effect
//! - **Mode**: a predicate bound to a list of parts that can grow at runtime
//! - **Dispatcher**: current state plus ordered rules, owned by the entity
//! - **Subscriber**: an observer reacting to a state announced by someone else
//!
//! Everything is single-threaded: rules hold reference counted closures, so
//! dispatchers are neither `Send` nor `Sync`.
//!
//! # Example
//!
//! ```rust
//! use statable::{state_enum, Applied, Dispatcher, Factor, Statable};
//!
//! state_enum! {
//!     enum Power {
//!         On,
//!         Off,
//!         Standby,
//!     }
//! }
//!
//! struct Printer {
//!     dispatcher: Dispatcher<Printer, Power>,
//!     output: Vec<&'static str>,
//! }
//!
//! impl Statable for Printer {
//!     type State = Power;
//!     type Rule = Factor<Printer>;
//!
//!     fn dispatcher(&self) -> &Dispatcher<Self, Power> {
//!         &self.dispatcher
//!     }
//!
//!     fn dispatcher_mut(&mut self) -> &mut Dispatcher<Self, Power> {
//!         &mut self.dispatcher
//!     }
//! }
//!
//! let mut printer = Printer { dispatcher: Dispatcher::new(Power::Off), output: Vec::new() };
//! printer.dispatcher_mut().register(Factor::on_state(Power::On, |p: &mut Printer| p.output.push("on")));
//! printer.dispatcher_mut().register(Factor::on_state(Power::Off, |p: &mut Printer| p.output.push("off")));
//!
//! assert_eq!(printer.set_state(Power::On), Applied::Rule(0));
//! assert_eq!(printer.set_state(Power::Standby), Applied::NoMatch);
//! assert_eq!(printer.output, vec!["on"]);
//! ```

pub mod audit;
pub mod builder;
pub mod core;
pub mod dispatch;
pub mod notify;
pub mod schedule;

// Re-export commonly used types
pub use builder::{BuildError, DispatcherBuilder};
pub use core::{Applied, ApplyHistory, ApplyRecord, Effect, Predicate, State};
pub use dispatch::{
    Dispatcher, Factor, Mode, ModeHandle, ModeKey, ModePart, ModeRegistry, Moddable, PartOutcome,
    ReapplyPolicy, Rule, Statable,
};
pub use notify::{Broadcaster, StateSubscriber, Subscriber, SubscriptionId};
pub use schedule::{advance_after, ManualScheduler, Scheduler};
