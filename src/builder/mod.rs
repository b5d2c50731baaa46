//! Builder API for ergonomic dispatcher construction.
//!
//! This module provides a fluent builder, the `state_enum!` macro and a few
//! constructors for the most common rule shapes: one rule per state value.

pub mod dispatcher;
pub mod error;
pub mod macros;

pub use dispatcher::DispatcherBuilder;
pub use error::BuildError;

use crate::dispatch::{Factor, Mode, ModeKey, Statable};
use std::rc::Rc;

/// One factor per state value, each matching while the entity is in that
/// state and handing the state to a shared applier.
///
/// # Example
///
/// ```
/// use statable::builder::state_factors;
/// use statable::dispatch::{Dispatcher, Factor, Statable};
/// use statable::state_enum;
///
/// state_enum! {
///     enum Lamp {
///         On,
///         Off,
///     }
/// }
///
/// struct Bulb {
///     dispatcher: Dispatcher<Bulb, Lamp>,
///     lit: bool,
/// }
///
/// impl Statable for Bulb {
///     type State = Lamp;
///     type Rule = Factor<Bulb>;
///     fn dispatcher(&self) -> &Dispatcher<Bulb, Lamp> { &self.dispatcher }
///     fn dispatcher_mut(&mut self) -> &mut Dispatcher<Bulb, Lamp> { &mut self.dispatcher }
/// }
///
/// let mut bulb = Bulb { dispatcher: Dispatcher::new(Lamp::Off), lit: false };
/// for factor in state_factors(Lamp::ALL.iter().copied(), |bulb: &mut Bulb, state: &Lamp| {
///     bulb.lit = *state == Lamp::On;
/// }) {
///     bulb.dispatcher_mut().register(factor);
/// }
///
/// bulb.set_state(Lamp::On);
/// assert!(bulb.lit);
/// ```
pub fn state_factors<E, I, F>(states: I, applier: F) -> Vec<Factor<E>>
where
    E: Statable,
    I: IntoIterator<Item = E::State>,
    F: Fn(&mut E, &E::State) + 'static,
{
    let applier = Rc::new(applier);
    states
        .into_iter()
        .map(|state| {
            let applier = Rc::clone(&applier);
            let applied = state.clone();
            Factor::on_state(state, move |target: &mut E| (*applier)(target, &applied))
        })
        .collect()
}

/// One empty mode per state value, keyed by the state itself.
///
/// Handy when the registry's key type and state type are the same enum.
pub fn state_modes<E, I>(states: I) -> Vec<Mode<E, E::State>>
where
    E: Statable,
    E::State: ModeKey,
    I: IntoIterator<Item = E::State>,
{
    states
        .into_iter()
        .map(|state| Mode::on_state(state, state))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{Dispatcher, ModePart, ModeRegistry, Moddable, PartOutcome};

    crate::state_enum! {
        enum Element {
            Enabled,
            Disabled,
            Transition,
        }
    }

    struct ElementView {
        dispatcher: Dispatcher<ElementView, Element>,
        painted: Vec<Element>,
    }

    impl Statable for ElementView {
        type State = Element;
        type Rule = Factor<ElementView>;

        fn dispatcher(&self) -> &Dispatcher<Self, Element> {
            &self.dispatcher
        }

        fn dispatcher_mut(&mut self) -> &mut Dispatcher<Self, Element> {
            &mut self.dispatcher
        }
    }

    struct Panel {
        registry: ModeRegistry<Panel, Element, Element>,
        label: Option<&'static str>,
    }

    impl Statable for Panel {
        type State = Element;
        type Rule = Mode<Panel, Element>;

        fn dispatcher(&self) -> &ModeRegistry<Self, Element, Element> {
            &self.registry
        }

        fn dispatcher_mut(&mut self) -> &mut ModeRegistry<Self, Element, Element> {
            &mut self.registry
        }
    }

    #[test]
    fn state_factors_cover_every_state() {
        let mut view = ElementView {
            dispatcher: Dispatcher::new(Element::Disabled),
            painted: Vec::new(),
        };
        let factors = state_factors(Element::ALL.iter().copied(), |v: &mut ElementView, s: &Element| {
            v.painted.push(*s)
        });
        assert_eq!(factors.len(), 3);
        for factor in factors {
            view.dispatcher_mut().register(factor);
        }

        view.apply_current();
        view.set_state(Element::Transition);
        view.set_state(Element::Enabled);

        assert_eq!(
            view.painted,
            vec![Element::Disabled, Element::Transition, Element::Enabled]
        );
    }

    #[test]
    fn state_modes_are_keyed_by_state() {
        let mut panel = Panel {
            registry: ModeRegistry::new(Element::Enabled),
            label: None,
        };
        for mode in state_modes(Element::ALL.iter().copied()) {
            panel.dispatcher_mut().register_mode(mode);
        }

        let outcome = panel.add_part(
            ModePart::new(|p: &mut Panel| p.label = Some("enabled")),
            Element::Enabled,
        );

        assert!(matches!(outcome, PartOutcome::Applied(_)));
        assert_eq!(panel.label, Some("enabled"));
        assert_eq!(panel.dispatcher().find(Element::Transition).map(|h| h.index()), Some(2));
    }
}
