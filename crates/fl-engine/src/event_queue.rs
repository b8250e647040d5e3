//! `EventQueue` — the kernel's time-ordered pending-event set.
//!
//! # Why this exists
//!
//! Every suspension in the simulation — a busy-period timeout or a task
//! resumed after a slot hand-off — becomes one entry here.  The kernel only
//! ever needs the earliest entry, and ties at the same instant must resolve
//! in submission order so that identical scenarios replay identically.
//!
//! # Ordering
//!
//! Entries are keyed by `(at, seq)` where `seq` is a monotonically increasing
//! submission counter.  `BTreeMap` iteration order then gives exactly the
//! required schedule: non-decreasing time, FIFO within an instant.  O(log n)
//! insert and pop, with n = suspended tasks (a handful in practice).

use std::collections::BTreeMap;

use fl_core::{SimTime, TaskId};

/// Priority key for one scheduled event: timestamp first, submission order
/// second.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct EventKey {
    pub at:  SimTime,
    pub seq: u64,
}

/// A time-ordered queue of `(EventKey, TaskId)` wake-ups.
#[derive(Default)]
pub struct EventQueue {
    inner:    BTreeMap<EventKey, TaskId>,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to be dispatched at `at`.
    ///
    /// A task may have at most one pending event at a time in the current
    /// design (it is either waiting on a timeout or on a slot), but the queue
    /// itself does not rely on that.
    pub fn push(&mut self, at: SimTime, task: TaskId) {
        let key = EventKey { at, seq: self.next_seq };
        self.next_seq += 1;
        self.inner.insert(key, task);
    }

    /// Remove and return the earliest event.
    pub fn pop_first(&mut self) -> Option<(EventKey, TaskId)> {
        self.inner.pop_first()
    }

    /// Timestamp of the earliest pending event, or `None` if idle.
    pub fn next_time(&self) -> Option<SimTime> {
        self.inner.keys().next().map(|k| k.at)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
