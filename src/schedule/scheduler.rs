//! Delayed callback capability and a deterministic implementation.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Callback run once its delay has elapsed.
pub type Callback = Box<dyn FnOnce()>;

/// Capability to run a callback later on the same thread.
///
/// The engine never drives time itself. Timed effects receive a scheduler
/// and hand it their follow-up work; the host decides what "later" means,
/// whether that is a UI run loop, a game tick or a test advancing a clock.
pub trait Scheduler {
    /// Run `callback` once `delay` has elapsed.
    fn after(&self, delay: Duration, callback: Callback);
}

impl<S: Scheduler + ?Sized> Scheduler for Rc<S> {
    fn after(&self, delay: Duration, callback: Callback) {
        (**self).after(delay, callback)
    }
}

struct Pending {
    deadline: Duration,
    seq: u64,
    callback: Callback,
}

#[derive(Default)]
struct Timeline {
    now: Duration,
    seq: u64,
    pending: Vec<Pending>,
}

impl Timeline {
    /// Remove the earliest callback due at or before `until`.
    fn pop_due(&mut self, until: Duration) -> Option<Pending> {
        let position = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.deadline <= until)
            .min_by_key(|(_, p)| (p.deadline, p.seq))
            .map(|(position, _)| position)?;
        Some(self.pending.remove(position))
    }
}

/// Scheduler driven by a virtual clock.
///
/// Nothing fires until [`advance`](ManualScheduler::advance) moves the clock.
/// Callbacks fire in deadline order, ties broken by scheduling order, and a
/// callback scheduled while advancing fires in the same call when its
/// deadline falls inside the advanced window. Clones share one timeline.
///
/// ```rust
/// use statable::schedule::{ManualScheduler, Scheduler};
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use std::time::Duration;
///
/// let scheduler = ManualScheduler::new();
/// let ticks = Rc::new(Cell::new(0));
///
/// let counter = Rc::clone(&ticks);
/// scheduler.after(Duration::from_secs(2), Box::new(move || counter.set(counter.get() + 1)));
///
/// assert_eq!(scheduler.advance(Duration::from_secs(1)), 0);
/// assert_eq!(scheduler.advance(Duration::from_secs(1)), 1);
/// assert_eq!(ticks.get(), 1);
/// assert_eq!(scheduler.now(), Duration::from_secs(2));
/// ```
#[derive(Clone, Default)]
pub struct ManualScheduler {
    timeline: Rc<RefCell<Timeline>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock.
    pub fn now(&self) -> Duration {
        self.timeline.borrow().now
    }

    /// Number of callbacks not yet fired.
    pub fn pending(&self) -> usize {
        self.timeline.borrow().pending.len()
    }

    /// Move the clock forward by `by`, firing every callback that falls due.
    /// Returns how many fired. The clock saturates at `Duration::MAX`.
    pub fn advance(&self, by: Duration) -> usize {
        let until = self.now().saturating_add(by);
        let mut fired = 0;

        loop {
            // The borrow must end before the callback runs: callbacks may
            // schedule more work on this same timeline.
            let due = {
                let mut timeline = self.timeline.borrow_mut();
                let due = timeline.pop_due(until);
                if let Some(pending) = &due {
                    timeline.now = pending.deadline;
                }
                due
            };
            let Some(pending) = due else { break };

            tracing::trace!(at = ?pending.deadline, seq = pending.seq, "firing scheduled callback");
            (pending.callback)();
            fired += 1;
        }

        self.timeline.borrow_mut().now = until;
        fired
    }

    /// Advance just far enough to fire the next pending callback, if any.
    pub fn fire_next(&self) -> bool {
        let next = {
            let timeline = self.timeline.borrow();
            timeline
                .pending
                .iter()
                .map(|p| p.deadline)
                .min()
                .map(|deadline| deadline.saturating_sub(timeline.now))
        };
        match next {
            Some(wait) => self.advance(wait) > 0,
            None => false,
        }
    }
}

impl Scheduler for ManualScheduler {
    fn after(&self, delay: Duration, callback: Callback) {
        let mut timeline = self.timeline.borrow_mut();
        let deadline = timeline.now.saturating_add(delay);
        let seq = timeline.seq;
        timeline.seq += 1;
        timeline.pending.push(Pending {
            deadline,
            seq,
            callback,
        });
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timeline = self.timeline.borrow();
        f.debug_struct("ManualScheduler")
            .field("now", &timeline.now)
            .field("pending", &timeline.pending.len())
            .finish()
    }
}
