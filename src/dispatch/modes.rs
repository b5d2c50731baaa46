//! Mode registry: dispatch over modes whose effects grow part by part.
//!
//! A [`Mode`] is a rule whose effect is an ordered list of [`ModePart`]s.
//! Parts can be attached long after the mode was registered; attaching a
//! part to a mode that currently matches applies that part at once, so a
//! composite effect can be assembled incrementally while it is live.

use crate::core::{Effect, Predicate};
use crate::dispatch::dispatcher::{Dispatcher, Statable};
use crate::dispatch::factor::{state_is, Rule};
use std::fmt::Debug;
use std::hash::Hash;

/// Closed key type naming the modes of one registry.
///
/// Usually a fieldless enum declared with [`state_enum!`](crate::state_enum).
/// Because a registry is generic over its key type, only keys of that type
/// can be used to attach parts.
pub trait ModeKey: Copy + Eq + Hash + Debug + 'static {}

impl<T> ModeKey for T where T: Copy + Eq + Hash + Debug + 'static {}

/// Non-owning handle to a mode: its position in the registry.
///
/// Modes are never removed from a registry, so a handle stays valid for
/// the registry's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ModeHandle(usize);

impl ModeHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Result of attaching a part to a registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartOutcome {
    /// Attached to an active mode and applied immediately.
    Applied(ModeHandle),

    /// Attached to an inactive mode; it runs once the mode is applied.
    Attached(ModeHandle),

    /// No mode with the requested key exists. The part was discarded.
    Dropped,
}

impl PartOutcome {
    pub fn is_attached(&self) -> bool {
        !matches!(self, Self::Dropped)
    }

    pub fn handle(&self) -> Option<ModeHandle> {
        match self {
            Self::Applied(handle) | Self::Attached(handle) => Some(*handle),
            Self::Dropped => None,
        }
    }
}

/// One effect fragment of a mode.
///
/// Knows the mode it was attached under, if any, which decides whether it
/// applies itself on attachment.
pub struct ModePart<E> {
    effect: Effect<E>,
    owner: Option<ModeHandle>,
}

impl<E: 'static> ModePart<E> {
    pub fn new<F>(apply: F) -> Self
    where
        F: Fn(&mut E) + 'static,
    {
        Self::from_effect(Effect::new(apply))
    }

    /// Part carrying its own associated values, handed to `apply` on each run.
    ///
    /// ```rust
    /// use statable::dispatch::ModePart;
    ///
    /// struct Screen {
    ///     title: String,
    /// }
    ///
    /// let part = ModePart::with_params("Inbox".to_string(), |screen: &mut Screen, title: &String| {
    ///     screen.title = title.clone();
    /// });
    ///
    /// let mut screen = Screen { title: String::new() };
    /// part.apply(&mut screen);
    /// assert_eq!(screen.title, "Inbox");
    /// ```
    pub fn with_params<P, F>(params: P, apply: F) -> Self
    where
        P: 'static,
        F: Fn(&mut E, &P) + 'static,
    {
        Self::new(move |target| apply(target, &params))
    }

    pub fn from_effect(effect: Effect<E>) -> Self {
        Self {
            effect,
            owner: None,
        }
    }

    /// Handle of the mode this part is attached to.
    pub fn owner(&self) -> Option<ModeHandle> {
        self.owner
    }

    pub fn apply(&self, target: &mut E) {
        self.effect.apply(target)
    }
}

impl<E> Clone for ModePart<E> {
    fn clone(&self) -> Self {
        Self {
            effect: self.effect.clone(),
            owner: self.owner,
        }
    }
}

/// A rule whose effect is the ordered list of its parts.
pub struct Mode<E, K> {
    key: K,
    predicate: Predicate<E>,
    parts: Vec<ModePart<E>>,
}

impl<E: 'static, K: ModeKey> Mode<E, K> {
    pub fn new(key: K, predicate: Predicate<E>) -> Self {
        Self {
            key,
            predicate,
            parts: Vec::new(),
        }
    }

    pub fn when<P>(key: K, predicate: P) -> Self
    where
        P: Fn(&E) -> bool + 'static,
    {
        Self::new(key, Predicate::new(predicate))
    }

    /// Mode active while the entity's state equals `state`.
    pub fn on_state(key: K, state: E::State) -> Self
    where
        E: Statable,
    {
        Self::new(key, state_is(state))
    }

    pub fn key(&self) -> K {
        self.key
    }

    pub fn parts(&self) -> &[ModePart<E>] {
        &self.parts
    }

    pub fn evaluate(&self, target: &E) -> bool {
        self.predicate.evaluate(target)
    }

    /// Run every part in attachment order. The predicate is not re-checked.
    pub fn apply(&self, target: &mut E) {
        for part in &self.parts {
            part.apply(target);
        }
    }

    /// Run every part if the mode matches. Returns whether it matched.
    pub fn apply_if_needed(&self, target: &mut E) -> bool {
        let active = self.evaluate(target);
        if active {
            self.apply(target);
        }
        active
    }

    fn push(&mut self, part: ModePart<E>) {
        self.parts.push(part);
    }
}

impl<E, K: Copy> Clone for Mode<E, K> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            predicate: self.predicate.clone(),
            parts: self.parts.clone(),
        }
    }
}

impl<E: 'static, K: ModeKey> Rule<E> for Mode<E, K> {
    fn evaluate(&self, entity: &E) -> bool {
        Mode::evaluate(self, entity)
    }

    fn apply(&self, entity: &mut E) {
        Mode::apply(self, entity)
    }

    fn label(&self) -> Option<String> {
        Some(format!("{:?}", self.key))
    }

    fn part_count(&self) -> Option<usize> {
        Some(self.parts.len())
    }
}

/// A dispatcher whose rules are modes keyed by `K`.
pub type ModeRegistry<E, S, K> = Dispatcher<E, S, Mode<E, K>>;

impl<E, S, K> Dispatcher<E, S, Mode<E, K>>
where
    E: 'static,
    S: crate::core::State,
    K: ModeKey,
{
    /// Append a mode. Keys are not checked for uniqueness; on duplicates
    /// the first registered mode wins both dispatch and part lookup.
    pub fn register_mode(&mut self, mode: Mode<E, K>) -> ModeHandle {
        ModeHandle(self.register(mode))
    }

    /// Handle of the first mode registered under `key`.
    pub fn find(&self, key: K) -> Option<ModeHandle> {
        self.rules()
            .iter()
            .position(|mode| mode.key() == key)
            .map(ModeHandle)
    }

    pub fn mode(&self, handle: ModeHandle) -> Option<&Mode<E, K>> {
        self.rule(handle.0)
    }

    /// Attach `part` to the first mode under `key` without applying it.
    /// [`Moddable::add_part`] is the public entry point.
    ///
    /// Returns the owning mode's handle, or `None` when the key is unknown.
    pub(crate) fn attach(&mut self, part: ModePart<E>, key: K) -> Option<ModeHandle> {
        let handle = self.find(key)?;
        let mode = self.rules_mut().get_mut(handle.0)?;
        mode.push(ModePart {
            owner: Some(handle),
            ..part
        });
        Some(handle)
    }
}

/// Entities driven by a mode registry.
///
/// Implemented for every [`Statable`] whose rules are `Mode<Self, K>`.
///
/// # Example
///
/// ```rust
/// use statable::dispatch::{Mode, ModePart, ModeRegistry, Moddable, PartOutcome, Statable};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Manager {
///     Collection,
///     Data,
/// }
///
/// struct Editor {
///     registry: ModeRegistry<Editor, Manager, Manager>,
///     commands: Vec<&'static str>,
/// }
///
/// impl Statable for Editor {
///     type State = Manager;
///     type Rule = Mode<Editor, Manager>;
///
///     fn dispatcher(&self) -> &ModeRegistry<Editor, Manager, Manager> {
///         &self.registry
///     }
///
///     fn dispatcher_mut(&mut self) -> &mut ModeRegistry<Editor, Manager, Manager> {
///         &mut self.registry
///     }
/// }
///
/// let mut editor = Editor { registry: ModeRegistry::new(Manager::Collection), commands: vec![] };
/// editor.dispatcher_mut().register_mode(Mode::on_state(Manager::Collection, Manager::Collection));
/// editor.dispatcher_mut().register_mode(Mode::on_state(Manager::Data, Manager::Data));
///
/// let outcome = editor.add_part(ModePart::new(|e: &mut Editor| e.commands = vec!["add", "remove"]), Manager::Collection);
/// assert!(matches!(outcome, PartOutcome::Applied(_)));
/// assert_eq!(editor.commands, vec!["add", "remove"]);
/// ```
pub trait Moddable<K: ModeKey>: Statable<Rule = Mode<Self, K>> {
    /// Attach `part` to the first mode registered under `key`, applying it
    /// at once when that mode currently matches.
    ///
    /// An unknown key drops the part; the entity is left untouched.
    fn add_part(&mut self, part: ModePart<Self>, key: K) -> PartOutcome {
        let Some(handle) = self.dispatcher_mut().attach(part.clone(), key) else {
            tracing::warn!(mode = ?key, "no mode registered under key, dropping part");
            return PartOutcome::Dropped;
        };
        let attached = ModePart {
            owner: Some(handle),
            ..part
        };
        if self.apply_part_if_needed(&attached) {
            PartOutcome::Applied(handle)
        } else {
            PartOutcome::Attached(handle)
        }
    }

    /// Apply `part` if its owning mode currently matches.
    ///
    /// Parts without an owner never apply themselves.
    fn apply_part_if_needed(&mut self, part: &ModePart<Self>) -> bool {
        let Some(handle) = part.owner() else {
            return false;
        };
        let active = self
            .dispatcher()
            .mode(handle)
            .is_some_and(|mode| mode.evaluate(self));
        if active {
            tracing::trace!(mode = handle.index(), "owning mode active, applying part");
            part.apply(self);
        }
        active
    }
}

impl<E, K> Moddable<K> for E
where
    K: ModeKey,
    E: Statable<Rule = Mode<E, K>>,
{
}
