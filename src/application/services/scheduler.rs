//! Frame Scheduler - Single-shot continuations driven by the engine tick
//!
//! A few announcements must wait a short while and then re-check the game
//! ("did the map really finish loading", "did the move state settle"). Instead
//! of suspended coroutines, each wait is a keyed entry with a frame deadline.
//! `advance` runs due entries on the dispatch thread. Scheduling under a key that
//! is already pending replaces the old entry, which is the only cancellation.
//!
//! Continuations must perform their own liveness check: by the time they run,
//! the object they were watching may be gone.

use std::cell::{Cell, RefCell};

use tracing::{debug, trace};

use crate::domain::value_objects::{Announcement, ContinuationId};

pub type Continuation<C> = Box<dyn FnOnce(&C) -> Option<Announcement>>;

struct Pending<C> {
    id: ContinuationId,
    key: &'static str,
    deadline: u64,
    task: Continuation<C>,
}

pub struct FrameScheduler<C> {
    frame: Cell<u64>,
    pending: RefCell<Vec<Pending<C>>>,
}

impl<C> Default for FrameScheduler<C> {
    fn default() -> Self {
        Self {
            frame: Cell::new(0),
            pending: RefCell::new(Vec::new()),
        }
    }
}

impl<C> FrameScheduler<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self) -> u64 {
        self.frame.get()
    }

    /// Run `task` once `delay_frames` ticks have passed, replacing any pending
    /// continuation with the same key.
    pub fn schedule(
        &self,
        key: &'static str,
        delay_frames: u64,
        task: impl FnOnce(&C) -> Option<Announcement> + 'static,
    ) -> ContinuationId {
        let id = ContinuationId::new();
        let deadline = self.frame.get().saturating_add(delay_frames.max(1));
        let mut pending = self.pending.borrow_mut();
        pending.retain(|entry| entry.key != key);
        pending.push(Pending {
            id,
            key,
            deadline,
            task: Box::new(task),
        });
        trace!(key, %id, deadline, "Scheduled continuation");
        id
    }

    pub fn cancel(&self, key: &str) -> bool {
        let mut pending = self.pending.borrow_mut();
        let before = pending.len();
        pending.retain(|entry| entry.key != key);
        before != pending.len()
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.pending.borrow().iter().any(|entry| entry.key == key)
    }

    pub fn clear(&self) {
        self.pending.borrow_mut().clear();
    }

    /// Advance one frame and run everything now due, in scheduling order.
    ///
    /// Due entries are detached before any of them runs, so a continuation may
    /// schedule follow-up work without touching a borrowed queue.
    pub fn advance(&self, context: &C) -> Vec<Announcement> {
        let now = self.frame.get() + 1;
        self.frame.set(now);

        let due: Vec<Pending<C>> = {
            let mut pending = self.pending.borrow_mut();
            let (due, waiting): (Vec<_>, Vec<_>) =
                pending.drain(..).partition(|entry| entry.deadline <= now);
            *pending = waiting;
            due
        };

        due.into_iter()
            .filter_map(|entry| {
                debug!(key = entry.key, id = %entry.id, frame = now, "Running continuation");
                (entry.task)(context)
            })
            .collect()
    }
}
