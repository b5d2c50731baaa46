//! Builder for constructing dispatchers and mode registries.

use crate::builder::error::BuildError;
use crate::core::{Effect, Predicate, State};
use crate::dispatch::{Dispatcher, Factor, Mode, ModeKey, ReapplyPolicy, Rule};
use std::marker::PhantomData;

/// Builder for constructing dispatchers with a fluent API.
///
/// # Example
///
/// ```rust
/// use statable::builder::DispatcherBuilder;
/// use statable::dispatch::{Dispatcher, ReapplyPolicy};
///
/// struct Lamp;
///
/// let dispatcher: Dispatcher<Lamp, bool> = DispatcherBuilder::<Lamp, bool>::new()
///     .initial(false)
///     .factor(|_: &Lamp| true, |_: &mut Lamp| {})
///     .record_history(16)
///     .reapply(ReapplyPolicy::WhenChanged)
///     .build()
///     .unwrap();
///
/// assert_eq!(dispatcher.len(), 1);
/// assert_eq!(dispatcher.history().map(|h| h.limit()), Some(16));
/// ```
pub struct DispatcherBuilder<E, S, R = Factor<E>> {
    initial: Option<S>,
    rules: Vec<R>,
    default: Option<Effect<E>>,
    history_limit: Option<usize>,
    reapply: ReapplyPolicy,
    _phantom: PhantomData<E>,
}

impl<E: 'static, S: State, R: Rule<E>> DispatcherBuilder<E, S, R> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            rules: Vec::new(),
            default: None,
            history_limit: None,
            reapply: ReapplyPolicy::default(),
            _phantom: PhantomData,
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Append a rule. Rules keep the order they are added in.
    pub fn rule(mut self, rule: R) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append several rules at once.
    pub fn rules(mut self, rules: impl IntoIterator<Item = R>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Effect run when no rule matches.
    pub fn default_effect<F>(mut self, effect: F) -> Self
    where
        F: Fn(&mut E) + 'static,
    {
        self.default = Some(Effect::new(effect));
        self
    }

    /// Keep the last `limit` applies in memory.
    pub fn record_history(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    pub fn reapply(mut self, policy: ReapplyPolicy) -> Self {
        self.reapply = policy;
        self
    }

    /// Build the dispatcher.
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<Dispatcher<E, S, R>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.rules.is_empty() && self.default.is_none() {
            return Err(BuildError::NoRules);
        }

        let mut dispatcher = Dispatcher::new(initial);
        if let Some(limit) = self.history_limit {
            if limit == 0 {
                return Err(BuildError::ZeroHistoryLimit);
            }
            dispatcher.record_history(limit);
        }
        for rule in self.rules {
            dispatcher.register(rule);
        }
        dispatcher.set_default(self.default);
        dispatcher.set_reapply_policy(self.reapply);

        Ok(dispatcher)
    }
}

impl<E: 'static, S: State> DispatcherBuilder<E, S, Factor<E>> {
    /// Append a factor built from two closures.
    pub fn factor<P, F>(self, predicate: P, effect: F) -> Self
    where
        P: Fn(&E) -> bool + 'static,
        F: Fn(&mut E) + 'static,
    {
        self.rule(Factor::when(predicate, effect))
    }
}

impl<E: 'static, S: State, K: ModeKey> DispatcherBuilder<E, S, Mode<E, K>> {
    /// Append an empty mode. Parts are attached later through the entity.
    pub fn mode<P>(self, key: K, predicate: P) -> Self
    where
        P: Fn(&E) -> bool + 'static,
    {
        self.rule(Mode::new(key, Predicate::new(predicate)))
    }
}

impl<E: 'static, S: State, R: Rule<E>> Default for DispatcherBuilder<E, S, R> {
    fn default() -> Self {
        Self::new()
    }
}
