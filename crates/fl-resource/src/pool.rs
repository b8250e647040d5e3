//! The `ResourcePool` — slot table, waiter queues, and budget accounting.
//!
//! # Design
//!
//! One [`ResourceState`] per scenario resource, indexed by [`ResourceId`]:
//! a count of currently granted slots, a FIFO queue of tasks waiting for a
//! slot, and the cumulative duration committed against the availability
//! budget.
//!
//! The pool is the only owner of this mutable state.  It is mutated
//! exclusively from the kernel's single execution context; a multi-threaded
//! driver would have to wrap the pool in a mutex or hand it to a single
//! owning actor.
//!
//! # Admission vs. commitment
//!
//! Budget accounting happens at two distinct points:
//!
//! 1. [`try_reserve`][ResourcePool::try_reserve] — advisory check *before* an
//!    execution starts: would `consumed + duration` stay within the budget?
//!    A refusal here consumes nothing: no slot, no time, no execution count.
//! 2. [`commit`][ResourcePool::commit] — after the busy period elapses, the
//!    duration is added to `consumed`.  Committed time is never rolled back;
//!    an execution that starts always runs to completion.

use std::collections::VecDeque;

use fl_core::{ResourceId, Scenario, SimDuration, TaskId};

// ── ResourceState ─────────────────────────────────────────────────────────────

/// Runtime state for one resource.  Lifecycle = one simulation run.
#[derive(Debug)]
struct ResourceState {
    /// Number of slots currently granted.  Invariant: `in_use <= capacity`.
    in_use: u32,

    /// Tasks waiting for a slot, in request order.
    waiters: VecDeque<TaskId>,

    /// Cumulative busy time committed against the availability budget.
    consumed: SimDuration,
}

impl ResourceState {
    fn new() -> Self {
        Self {
            in_use:   0,
            waiters:  VecDeque::new(),
            consumed: SimDuration::ZERO,
        }
    }
}

// ── Acquire ───────────────────────────────────────────────────────────────────

/// Outcome of a slot request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Acquire {
    /// A slot was free; the caller holds it as of this instant.
    Granted,
    /// All slots are busy; the task has been queued and will be handed a slot
    /// by a future [`release`][ResourcePool::release].
    Queued,
}

// ── ResourcePool ──────────────────────────────────────────────────────────────

/// Bounded concurrent slots plus an optional cumulative time budget, per
/// resource.
///
/// Capacities and budgets are copied out of the scenario at construction so
/// the pool carries no borrow of the configuration.
pub struct ResourcePool {
    /// Slot capacity per resource, indexed by `ResourceId`.
    capacities: Vec<u32>,

    /// Availability budget per resource; `None` = unconstrained.
    budgets: Vec<Option<SimDuration>>,

    states: Vec<ResourceState>,
}

impl ResourcePool {
    /// Build a pool with one idle entry per scenario resource.
    pub fn new(scenario: &Scenario) -> Self {
        let capacities: Vec<u32> = scenario.resources.iter().map(|r| r.capacity).collect();
        let budgets: Vec<Option<SimDuration>> =
            scenario.resources.iter().map(|r| r.availability).collect();
        let states = (0..scenario.resources.len())
            .map(|_| ResourceState::new())
            .collect();
        Self { capacities, budgets, states }
    }

    // ── Budget admission ──────────────────────────────────────────────────

    /// Would an execution of `duration` stay within the availability budget?
    ///
    /// Always `true` for an unconstrained resource.  For `Some(0)` budgets
    /// this is `false` for any non-zero duration — the resource can never
    /// execute anything, and every set bound to it is refused.
    pub fn try_reserve(&self, resource: ResourceId, duration: SimDuration) -> bool {
        match self.budgets[resource.index()] {
            None => true,
            Some(budget) => {
                self.states[resource.index()].consumed + duration <= budget
            }
        }
    }

    /// Add a completed busy period to the resource's consumed total.
    ///
    /// Call only after a successful [`try_reserve`][Self::try_reserve] once
    /// the corresponding busy period has elapsed.
    pub fn commit(&mut self, resource: ResourceId, duration: SimDuration) {
        let state = &mut self.states[resource.index()];
        state.consumed += duration;
        debug_assert!(
            self.budgets[resource.index()].is_none_or(|b| state.consumed <= b),
            "committed duration exceeds availability budget for {resource}",
        );
    }

    // ── Slot management ───────────────────────────────────────────────────

    /// Request a slot for `task`.
    ///
    /// Grants immediately if a slot is free; otherwise appends the task to
    /// the FIFO waiter queue.
    pub fn acquire(&mut self, resource: ResourceId, task: TaskId) -> Acquire {
        let state = &mut self.states[resource.index()];
        if state.in_use < self.capacities[resource.index()] {
            state.in_use += 1;
            Acquire::Granted
        } else {
            state.waiters.push_back(task);
            Acquire::Queued
        }
    }

    /// Release a granted slot.
    ///
    /// If tasks are waiting, the slot transfers to the head of the queue
    /// atomically (occupancy never dips) and that task is returned so the
    /// kernel can resume it at the current instant.
    ///
    /// # Panics
    /// Panics in debug mode if no slot is currently granted.
    pub fn release(&mut self, resource: ResourceId) -> Option<TaskId> {
        let state = &mut self.states[resource.index()];
        debug_assert!(state.in_use > 0, "release without a granted slot on {resource}");
        match state.waiters.pop_front() {
            some @ Some(_) => some, // slot hands off, in_use unchanged
            None => {
                state.in_use -= 1;
                None
            }
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Total busy time committed so far.
    #[inline]
    pub fn consumed(&self, resource: ResourceId) -> SimDuration {
        self.states[resource.index()].consumed
    }

    /// Number of slots currently granted.
    #[inline]
    pub fn in_use(&self, resource: ResourceId) -> u32 {
        self.states[resource.index()].in_use
    }

    /// Number of tasks queued for a slot.
    #[inline]
    pub fn waiting(&self, resource: ResourceId) -> usize {
        self.states[resource.index()].waiters.len()
    }

    /// Consumed totals for all resources, indexed by `ResourceId`.
    pub fn consumed_all(&self) -> Vec<SimDuration> {
        self.states.iter().map(|s| s.consumed).collect()
    }
}
