//! Entity-owned dispatcher implementing first-match-wins apply.

use crate::core::{Applied, ApplyHistory, ApplyRecord, Effect, State};
use crate::dispatch::factor::{first_match, Factor, Rule};
use chrono::Utc;

/// Whether `set_state` re-applies a state that is already applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReapplyPolicy {
    /// Every state change re-applies, even to the same value.
    #[default]
    Always,

    /// Setting the state to the last applied value is skipped.
    WhenChanged,
}

/// What an apply pass would run, without running it.
#[derive(Debug)]
pub enum Selection<'a, E, R> {
    /// The rule at this position matches first.
    Rule(usize, &'a R),
    /// Nothing matches; the default effect would run.
    Default(&'a Effect<E>),
    /// Nothing matches and no default is configured.
    None,
}

/// Current state plus an ordered rule list.
///
/// A dispatcher lives inside the entity it drives (see [`Statable`]). The
/// rules are scanned in registration order and the first one whose
/// predicate matches the entity wins; at most one effect runs per apply.
/// When nothing matches, the default effect runs if one was configured.
///
/// Rules and effects are reference counted closures, so a dispatcher is
/// neither `Send` nor `Sync`: it belongs to a single thread of control.
pub struct Dispatcher<E, S, R = Factor<E>> {
    state: S,
    rules: Vec<R>,
    default: Option<Effect<E>>,
    last_applied: Option<S>,
    history: Option<ApplyHistory<S>>,
    reapply: ReapplyPolicy,
}

impl<E, S, R> Dispatcher<E, S, R>
where
    S: State,
    R: Rule<E>,
{
    /// Create a dispatcher in `initial` state with no rules and no default.
    pub fn new(initial: S) -> Self {
        Self {
            state: initial,
            rules: Vec::new(),
            default: None,
            last_applied: None,
            history: None,
            reapply: ReapplyPolicy::default(),
        }
    }

    /// Append a rule. Returns its position, which is also its precedence.
    pub fn register(&mut self, rule: R) -> usize {
        self.rules.push(rule);
        self.rules.len() - 1
    }

    /// Set or clear the effect run when no rule matches.
    pub fn set_default(&mut self, effect: Option<Effect<E>>) {
        self.default = effect;
    }

    pub fn default_effect(&self) -> Option<&Effect<E>> {
        self.default.as_ref()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn rules(&self) -> &[R] {
        &self.rules
    }

    pub fn rule(&self, index: usize) -> Option<&R> {
        self.rules.get(index)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The state most recently applied, if any apply happened yet.
    pub fn last_applied(&self) -> Option<&S> {
        self.last_applied.as_ref()
    }

    pub fn history(&self) -> Option<&ApplyHistory<S>> {
        self.history.as_ref()
    }

    /// Start (or restart) recording up to `limit` applies.
    pub fn record_history(&mut self, limit: usize) {
        self.history = Some(ApplyHistory::with_limit(limit));
    }

    pub fn reapply_policy(&self) -> ReapplyPolicy {
        self.reapply
    }

    pub fn set_reapply_policy(&mut self, policy: ReapplyPolicy) {
        self.reapply = policy;
    }

    /// What an apply would run for `entity` right now.
    ///
    /// Pure: no effect runs and nothing is recorded.
    pub fn select<'a>(&'a self, entity: &E) -> Selection<'a, E, R> {
        match first_match(&self.rules, entity) {
            Some((index, rule)) => Selection::Rule(index, rule),
            None => match &self.default {
                Some(effect) => Selection::Default(effect),
                None => Selection::None,
            },
        }
    }

    pub(crate) fn replace_state(&mut self, state: S) -> S {
        std::mem::replace(&mut self.state, state)
    }

    pub(crate) fn rules_mut(&mut self) -> &mut [R] {
        &mut self.rules
    }

    fn mark_applied(&mut self, state: S, outcome: Applied) {
        if let Some(history) = self.history.as_mut() {
            history.record(ApplyRecord {
                state: state.clone(),
                outcome,
                timestamp: Utc::now(),
            });
        }
        self.last_applied = Some(state);
    }

    pub(crate) fn is_applied(&self) -> bool {
        self.last_applied.as_ref() == Some(&self.state)
    }
}

/// An entity driven by a dispatcher it owns.
///
/// Implementors only expose their dispatcher; the apply algorithm and the
/// state setter are provided.
///
/// # Example
///
/// ```rust
/// use statable::dispatch::{Dispatcher, Factor, Statable};
///
/// struct Printer {
///     dispatcher: Dispatcher<Printer, bool>,
///     output: Option<&'static str>,
/// }
///
/// impl Statable for Printer {
///     type State = bool;
///     type Rule = Factor<Printer>;
///
///     fn dispatcher(&self) -> &Dispatcher<Self, bool> {
///         &self.dispatcher
///     }
///
///     fn dispatcher_mut(&mut self) -> &mut Dispatcher<Self, bool> {
///         &mut self.dispatcher
///     }
/// }
///
/// let mut printer = Printer { dispatcher: Dispatcher::new(false), output: None };
/// printer.dispatcher_mut().register(Factor::on_state(true, |p: &mut Printer| p.output = Some("on")));
/// printer.dispatcher_mut().register(Factor::on_state(false, |p: &mut Printer| p.output = Some("off")));
///
/// printer.set_state(true);
/// assert_eq!(printer.output, Some("on"));
/// printer.set_state(false);
/// assert_eq!(printer.output, Some("off"));
/// ```
pub trait Statable: Sized + 'static {
    type State: State;
    type Rule: Rule<Self>;

    fn dispatcher(&self) -> &Dispatcher<Self, Self::State, Self::Rule>;

    fn dispatcher_mut(&mut self) -> &mut Dispatcher<Self, Self::State, Self::Rule>;

    fn state(&self) -> &Self::State {
        self.dispatcher().state()
    }

    /// Run the first matching rule for the current state.
    ///
    /// Falls back to the default effect, or does nothing, when no rule
    /// matches. The effect may change the state again, which re-enters
    /// this method; such nested applies complete before this call returns.
    fn apply_current(&mut self) -> Applied {
        apply_current(self)
    }

    /// Like [`apply_current`](Statable::apply_current), but skipped when the
    /// current state is the one applied last.
    fn apply_if_changed(&mut self) -> Applied {
        if self.dispatcher().is_applied() {
            tracing::debug!(state = ?self.state(), "state already applied, skipping");
            return Applied::Skipped;
        }
        apply_current(self)
    }

    /// Change the state and re-apply according to the reapply policy.
    fn set_state(&mut self, state: Self::State) -> Applied {
        self.dispatcher_mut().replace_state(state);
        match self.dispatcher().reapply_policy() {
            ReapplyPolicy::Always => self.apply_current(),
            ReapplyPolicy::WhenChanged => self.apply_if_changed(),
        }
    }
}

enum Chosen<E, R> {
    Rule(usize, R),
    Default(Effect<E>),
    Nothing,
}

/// First-match-wins apply, shared by every rule kind.
///
/// The winner is cloned out of the dispatcher before its effect runs so the
/// effect can borrow the entity mutably, including re-entering this function.
fn apply_current<E: Statable>(entity: &mut E) -> Applied {
    let dispatcher = entity.dispatcher();
    let state = dispatcher.state().clone();
    let chosen = match dispatcher.select(entity) {
        Selection::Rule(index, rule) => Chosen::Rule(index, rule.clone()),
        Selection::Default(effect) => Chosen::Default(effect.clone()),
        Selection::None => Chosen::Nothing,
    };

    let outcome = match &chosen {
        Chosen::Rule(index, _) => Applied::Rule(*index),
        Chosen::Default(_) => Applied::Default,
        Chosen::Nothing => Applied::NoMatch,
    };
    entity.dispatcher_mut().mark_applied(state.clone(), outcome);

    match chosen {
        Chosen::Rule(index, rule) => {
            tracing::trace!(state = ?state, rule = index, label = ?rule.label(), "applying rule");
            rule.apply(entity);
        }
        Chosen::Default(effect) => {
            tracing::trace!(state = ?state, "no rule matched, applying default");
            effect.apply(entity);
        }
        Chosen::Nothing => {
            tracing::debug!(state = ?state, "no rule matched and no default configured");
        }
    }
    outcome
}
