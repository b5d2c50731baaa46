//! Timed auto-advance: an effect that moves its entity on after a delay.

use crate::core::Effect;
use crate::dispatch::Statable;
use crate::schedule::scheduler::Scheduler;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Effect that, when applied, schedules the entity's next state.
///
/// After `delay` the entity is moved to `next(current state)` through
/// [`Statable::set_state`], which applies the new state and usually
/// schedules the following advance. The effect only holds a `Weak` handle:
/// once the entity is dropped, pending advances do nothing. An advance that
/// fires while the entity is already borrowed is retried after another
/// `delay`, so the cycle survives; with a zero `delay` it is dropped instead,
/// which ends the cycle.
///
/// ```rust
/// use statable::dispatch::{Dispatcher, Factor, Statable};
/// use statable::schedule::{advance_after, ManualScheduler};
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use std::time::Duration;
///
/// struct Blinker {
///     dispatcher: Dispatcher<Blinker, bool>,
/// }
///
/// impl Statable for Blinker {
///     type State = bool;
///     type Rule = Factor<Blinker>;
///     fn dispatcher(&self) -> &Dispatcher<Self, bool> { &self.dispatcher }
///     fn dispatcher_mut(&mut self) -> &mut Dispatcher<Self, bool> { &mut self.dispatcher }
/// }
///
/// let scheduler = ManualScheduler::new();
/// let blinker = Rc::new(RefCell::new(Blinker { dispatcher: Dispatcher::new(false) }));
/// let toggle = advance_after(scheduler.clone(), Duration::from_millis(400), Rc::downgrade(&blinker), |on: &bool| !on);
/// blinker.borrow_mut().dispatcher_mut().set_default(Some(toggle));
///
/// blinker.borrow_mut().apply_current();
/// scheduler.advance(Duration::from_millis(400));
/// assert!(*blinker.borrow().state());
/// scheduler.advance(Duration::from_millis(400));
/// assert!(!*blinker.borrow().state());
/// ```
pub fn advance_after<E, Sch, F>(
    scheduler: Sch,
    delay: Duration,
    entity: Weak<RefCell<E>>,
    next: F,
) -> Effect<E>
where
    E: Statable,
    Sch: Scheduler + 'static,
    F: Fn(&E::State) -> E::State + 'static,
{
    let scheduler = Rc::new(scheduler);
    let next = Rc::new(next);
    Effect::new(move |current: &mut E| {
        tracing::trace!(state = ?current.state(), ?delay, "scheduling advance");
        schedule_advance(Rc::clone(&scheduler), delay, entity.clone(), Rc::clone(&next));
    })
}

fn schedule_advance<E, Sch, F>(scheduler: Rc<Sch>, delay: Duration, weak: Weak<RefCell<E>>, next: Rc<F>)
where
    E: Statable,
    Sch: Scheduler + 'static,
    F: Fn(&E::State) -> E::State + 'static,
{
    let retry = Rc::clone(&scheduler);
    scheduler.after(
        delay,
        Box::new(move || {
            let Some(handle) = weak.upgrade() else {
                tracing::trace!("entity dropped before scheduled advance");
                return;
            };
            let Ok(mut entity) = handle.try_borrow_mut() else {
                if delay.is_zero() {
                    tracing::warn!("entity busy when zero-delay advance fired, dropping it");
                } else {
                    tracing::warn!(?delay, "entity busy when scheduled advance fired, retrying");
                    schedule_advance(retry, delay, weak, next);
                }
                return;
            };
            let target = (*next)(entity.state());
            entity.set_state(target);
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{Dispatcher, Factor};
    use crate::schedule::ManualScheduler;

    #[derive(Clone, Copy, PartialEq, Debug)]
    enum Phase {
        Warmup,
        Run,
        Cooldown,
    }

    impl Phase {
        fn next(&self) -> Phase {
            match self {
                Phase::Warmup => Phase::Run,
                Phase::Run => Phase::Cooldown,
                Phase::Cooldown => Phase::Warmup,
            }
        }
    }

    struct Machine {
        dispatcher: Dispatcher<Machine, Phase>,
        visited: Vec<Phase>,
    }

    impl Statable for Machine {
        type State = Phase;
        type Rule = Factor<Machine>;

        fn dispatcher(&self) -> &Dispatcher<Self, Phase> {
            &self.dispatcher
        }

        fn dispatcher_mut(&mut self) -> &mut Dispatcher<Self, Phase> {
            &mut self.dispatcher
        }
    }

    fn machine(scheduler: &ManualScheduler) -> Rc<RefCell<Machine>> {
        let machine = Rc::new(RefCell::new(Machine {
            dispatcher: Dispatcher::new(Phase::Warmup),
            visited: Vec::new(),
        }));
        let advance = advance_after(
            scheduler.clone(),
            Duration::from_secs(1),
            Rc::downgrade(&machine),
            Phase::next,
        );
        let record = Effect::new(|m: &mut Machine| {
            let phase = *m.state();
            m.visited.push(phase);
        });
        machine
            .borrow_mut()
            .dispatcher_mut()
            .set_default(Some(record.then(advance)));
        machine
    }

    #[test]
    fn advances_on_each_deadline() {
        let scheduler = ManualScheduler::new();
        let machine = machine(&scheduler);

        machine.borrow_mut().apply_current();
        assert_eq!(scheduler.pending(), 1);

        scheduler.advance(Duration::from_secs(3));

        assert_eq!(
            machine.borrow().visited,
            vec![Phase::Warmup, Phase::Run, Phase::Cooldown, Phase::Warmup]
        );
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn dropped_entity_is_ignored() {
        let scheduler = ManualScheduler::new();
        let machine = machine(&scheduler);
        machine.borrow_mut().apply_current();

        drop(machine);

        assert_eq!(scheduler.advance(Duration::from_secs(1)), 1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn busy_entity_retries_and_keeps_cycling() {
        let scheduler = ManualScheduler::new();
        let machine = machine(&scheduler);
        machine.borrow_mut().apply_current();

        let guard = machine.borrow();
        scheduler.advance(Duration::from_secs(1));
        drop(guard);

        assert_eq!(machine.borrow().state(), &Phase::Warmup);
        assert_eq!(scheduler.pending(), 1);

        scheduler.advance(Duration::from_secs(1));
        assert_eq!(machine.borrow().state(), &Phase::Run);

        scheduler.advance(Duration::from_secs(1));
        assert_eq!(
            machine.borrow().visited,
            vec![Phase::Warmup, Phase::Run, Phase::Cooldown]
        );
    }

    #[test]
    fn busy_entity_drops_zero_delay_advance() {
        let scheduler = ManualScheduler::new();
        let machine = Rc::new(RefCell::new(Machine {
            dispatcher: Dispatcher::new(Phase::Warmup),
            visited: Vec::new(),
        }));
        let advance = advance_after(scheduler.clone(), Duration::ZERO, Rc::downgrade(&machine), Phase::next);
        machine.borrow_mut().dispatcher_mut().set_default(Some(advance));
        machine.borrow_mut().apply_current();

        let guard = machine.borrow();
        assert_eq!(scheduler.advance(Duration::from_secs(1)), 1);
        drop(guard);

        assert_eq!(machine.borrow().state(), &Phase::Warmup);
        assert_eq!(scheduler.pending(), 0);
    }
}
