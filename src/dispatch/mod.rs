//! First-match-wins dispatch over ordered rules.
//!
//! This module is the imperative shell around the pure core: it owns the
//! current state, selects the first matching rule and runs its effect.
//!
//! # Key Concepts
//!
//! - **Rules**: anything that can match an entity and apply itself (`Rule`)
//! - **Factors**: a predicate bound to a single effect
//! - **Modes**: a predicate bound to a growable list of effect parts
//! - **Dispatcher**: the entity-owned state plus ordered rules
//!
//! # Precedence
//!
//! Rules are scanned in registration order and the first match wins. There
//! are no priorities and no specificity ordering.

mod dispatcher;
mod factor;
mod modes;

pub use dispatcher::{Dispatcher, ReapplyPolicy, Selection, Statable};
pub use factor::{state_is, Factor, Rule};
pub use modes::{Mode, ModeHandle, ModeKey, ModePart, ModeRegistry, Moddable, PartOutcome};
