//! The cooperative scheduling kernel.
//!
//! # Design
//!
//! Single-threaded cooperative execution: exactly one logical activity runs
//! at any simulated instant, and time advances only by popping the next
//! event from the [`EventQueue`] in `(time, submission)` order.  A task
//! suspends at exactly two points — waiting for a resource slot, and waiting
//! for its busy-period timeout — and both suspensions are resumed through
//! the queue, so the full schedule is a deterministic function of the
//! scenario.
//!
//! The kernel owns all shared mutable state: the clock, the queue, the
//! [`ResourcePool`], the task slab, the chronological log, and the
//! statistics accumulators.  Nothing else mutates them.  A multi-threaded
//! driver would have to serialize access to the pool (mutex or owning
//! actor); nothing here does cross-thread synchronization.
//!
//! # One dispatch, one task
//!
//! [`dispatch`][Kernel::dispatch] advances a single task as far as it can go
//! without waiting: it skips budget-refused sets (logging each refusal at
//! the current instant), acquires a slot or parks in the resource's FIFO
//! queue, and on busy-period completion releases the slot (handing it to the
//! next waiter at the same instant), commits the duration, and rolls
//! straight into admitting its next set.

use fl_core::{Scenario, SimTime, StepId, TaskId};
use fl_report::{FlowOutcome, LogEntry, LogKind, SimReport, StatsAggregator};
use fl_resource::{Acquire, ResourcePool};

use crate::event_queue::EventQueue;
use crate::executor::{Phase, StepRun};
use crate::observer::SimObserver;

/// The discrete-event scheduler for one simulation run.
pub struct Kernel {
    scenario: Scenario,

    /// Current simulated instant.  Never decreases.
    now: SimTime,

    queue: EventQueue,
    pool:  ResourcePool,

    /// All tasks ever spawned, indexed by `TaskId`.  Completed tasks stay in
    /// place so results can be read after the fact.
    tasks: Vec<StepRun>,

    log:   Vec<LogEntry>,
    stats: StatsAggregator,

    /// Set when an event past the configured horizon terminated the run.
    horizon_hit: bool,
}

impl Kernel {
    pub fn new(scenario: Scenario) -> Self {
        let pool = ResourcePool::new(&scenario);
        let stats = StatsAggregator::new(scenario.step_count());
        Self {
            scenario,
            now: SimTime::ZERO,
            queue: EventQueue::new(),
            pool,
            tasks: Vec::new(),
            log: Vec::new(),
            stats,
            horizon_hit: false,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    #[inline]
    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    #[inline]
    pub fn pool(&self) -> &ResourcePool {
        &self.pool
    }

    /// Chronological log so far.
    #[inline]
    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    /// Units processed so far by `task` (completed sets only).
    #[inline]
    pub fn processed(&self, task: TaskId) -> u64 {
        self.tasks[task.index()].processed()
    }

    /// `true` once an event past the configured horizon has terminated the
    /// run.
    #[inline]
    pub fn horizon_hit(&self) -> bool {
        self.horizon_hit
    }

    /// Could the step's resource budget admit one more set right now?
    ///
    /// Budgets never recover, so once this is `false` for a step it stays
    /// `false` — the coordinator uses that to avoid futile re-invocations.
    pub fn can_admit(&self, step: StepId) -> bool {
        let step = &self.scenario.steps[step.index()];
        self.pool.try_reserve(step.resource, step.duration)
    }

    // ── Task lifecycle ────────────────────────────────────────────────────

    /// Spawn a step execution of `quantity` units and schedule its first
    /// dispatch at the current instant.
    pub fn spawn(&mut self, step: StepId, quantity: u64) -> TaskId {
        let capacity = self.scenario.steps[step.index()].capacity;
        let task = TaskId(self.tasks.len() as u32);
        self.tasks.push(StepRun::new(step, quantity, capacity));
        self.queue.push(self.now, task);
        task
    }

    /// Pop and dispatch events until `task` completes.
    ///
    /// Returns the units it processed, or `None` if the run was cut off at
    /// the simulation horizon first (partial progress remains readable via
    /// [`processed`][Self::processed]).
    pub fn drive_task<O: SimObserver>(&mut self, task: TaskId, obs: &mut O) -> Option<u64> {
        while !self.tasks[task.index()].is_done() {
            if !self.step_event(obs) {
                return None;
            }
        }
        Some(self.tasks[task.index()].processed())
    }

    /// Pop and dispatch events until the queue is empty (or the horizon is
    /// reached).  Used when several tasks are in flight at once.
    pub fn drive_idle<O: SimObserver>(&mut self, obs: &mut O) {
        while self.step_event(obs) {}
    }

    /// Consume the kernel into the final report.
    pub fn into_report(self, unprocessed: Vec<u64>, outcome: FlowOutcome) -> SimReport {
        let consumed = self.pool.consumed_all();
        self.stats.finalize(
            &self.scenario,
            &consumed,
            self.now.elapsed(),
            self.log,
            unprocessed,
            outcome,
        )
    }

    // ── Event loop ────────────────────────────────────────────────────────

    /// Pop and dispatch one event.
    ///
    /// Returns `false` when the queue is empty or the next event lies past
    /// the simulation horizon (in which case `now` is clamped to the
    /// horizon).
    fn step_event<O: SimObserver>(&mut self, obs: &mut O) -> bool {
        let Some((key, task)) = self.queue.pop_first() else {
            return false;
        };
        if let Some(horizon) = self.scenario.horizon {
            if key.at.elapsed() > horizon {
                self.now = SimTime::ZERO + horizon;
                self.horizon_hit = true;
                return false;
            }
        }
        debug_assert!(key.at >= self.now, "event queue delivered out of order");
        self.now = key.at;
        self.dispatch(task, obs);
        true
    }

    /// Advance one task as far as it can go without suspending.
    fn dispatch<O: SimObserver>(&mut self, task: TaskId, obs: &mut O) {
        // Copy the step binding out so the task slab and the pool can be
        // borrowed independently below.
        let (step_id, resource, capacity, duration) = {
            let run = &self.tasks[task.index()];
            let step = &self.scenario.steps[run.step.index()];
            (run.step, step.resource, step.capacity, step.duration)
        };

        loop {
            match self.tasks[task.index()].phase {
                // ── Budget admission ──────────────────────────────────────
                Phase::Admit => {
                    // Skip every set the budget cannot cover.  Refusals are
                    // logged at the current instant: they consume no slot and
                    // advance no time.
                    while {
                        let run = &self.tasks[task.index()];
                        run.next_set < run.sets_total
                            && !self.pool.try_reserve(resource, duration)
                    } {
                        let set = self.tasks[task.index()].next_set;
                        self.log.push(LogEntry {
                            at:   self.now,
                            kind: LogKind::Refused,
                            step: step_id,
                            set,
                        });
                        obs.on_set_refused(self.now, step_id, set);
                        self.tasks[task.index()].next_set += 1;
                    }

                    if self.tasks[task.index()].next_set
                        >= self.tasks[task.index()].sets_total
                    {
                        self.tasks[task.index()].phase = Phase::Done;
                        return;
                    }

                    self.tasks[task.index()].phase = Phase::WaitSlot;
                    match self.pool.acquire(resource, task) {
                        // Slot free: start the busy period at this instant.
                        Acquire::Granted => continue,
                        // All slots busy: parked in the resource's FIFO; a
                        // release will re-schedule this task.
                        Acquire::Queued => return,
                    }
                }

                // ── Slot held: begin the busy period ──────────────────────
                Phase::WaitSlot => {
                    let set = self.tasks[task.index()].next_set;
                    self.log.push(LogEntry {
                        at:   self.now,
                        kind: LogKind::Start,
                        step: step_id,
                        set,
                    });
                    obs.on_set_start(self.now, step_id, set);
                    self.tasks[task.index()].phase = Phase::Busy;
                    self.queue.push(self.now + duration, task);
                    return;
                }

                // ── Busy period elapsed: account and move on ──────────────
                Phase::Busy => {
                    let set = self.tasks[task.index()].next_set;
                    self.log.push(LogEntry {
                        at:   self.now,
                        kind: LogKind::End,
                        step: step_id,
                        set,
                    });

                    // Hand the slot to the next waiter (if any) at this very
                    // instant, then commit the elapsed duration.
                    if let Some(waiter) = self.pool.release(resource) {
                        self.queue.push(self.now, waiter);
                    }
                    self.pool.commit(resource, duration);

                    let units = {
                        let run = &mut self.tasks[task.index()];
                        let units = run.units_in_set(capacity);
                        run.processed += units;
                        run.next_set += 1;
                        run.phase = Phase::Admit;
                        units
                    };
                    self.stats.record_set(step_id, units, duration);
                    obs.on_set_end(self.now, step_id, set, units);
                    // Fall through to admitting the next set at this instant.
                }

                Phase::Done => return,
            }
        }
    }
}
