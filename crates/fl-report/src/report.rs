//! Plain data types that make up a simulation report.
//!
//! A [`SimReport`] is the engine's complete result object: the chronological
//! event log, the derived per-step and per-resource statistics, and the run
//! outcome.  Everything is `PartialEq` so determinism tests can compare whole
//! reports for equality.

use std::fmt;

use fl_core::{ResourceId, SimDuration, SimTime, StepId};

// ── Log ───────────────────────────────────────────────────────────────────────

/// What happened at a log entry's instant.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogKind {
    /// A set acquired its slot and began its busy period.
    Start,
    /// A set's busy period elapsed; its units are now processed.
    End,
    /// A set was refused admission because the resource's availability budget
    /// could not cover its duration.  Refusals consume no time and no slot.
    Refused,
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogKind::Start   => "start",
            LogKind::End     => "end",
            LogKind::Refused => "refused",
        };
        f.write_str(s)
    }
}

/// One chronological log entry.
///
/// `set` is the zero-based index of the set within its step-execution call;
/// renderers display it one-based to match operator expectations.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub at:   SimTime,
    pub kind: LogKind,
    pub step: StepId,
    pub set:  u64,
}

// ── Outcome ───────────────────────────────────────────────────────────────────

/// How the run terminated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlowOutcome {
    /// Every buffer reached zero: all units exited the final step.
    Drained,
    /// A full coordinator pass made no progress (budget exhaustion); the
    /// remaining units per step are in [`SimReport::unprocessed`].
    Stalled,
    /// The configured simulation horizon was reached first.
    HorizonReached,
}

// ── Statistics rows ───────────────────────────────────────────────────────────

/// Aggregated statistics for one pipeline step.
#[derive(Clone, Debug, PartialEq)]
pub struct StepStats {
    pub name:     String,
    pub resource: ResourceId,

    /// Number of sets run to completion.  Refused sets do not count.
    pub executions: u64,

    /// Work units carried by completed sets.
    pub units_processed: u64,

    /// Total busy time across completed sets.
    pub busy: SimDuration,

    /// `(cost_rate / availability) * busy`; zero for an unconstrained or
    /// zero availability budget.
    pub cost: f64,
}

/// Aggregated statistics for one resource.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceStats {
    pub name: String,

    /// Total committed busy time across all steps bound to this resource.
    pub busy: SimDuration,

    pub availability: Option<SimDuration>,

    /// `100 * busy / availability`; zero when unconstrained or zero budget.
    pub utilization_pct: f64,

    /// `cost_rate * busy / availability`; zero when unconstrained or zero
    /// budget.
    pub cost: f64,
}

// ── SimReport ─────────────────────────────────────────────────────────────────

/// The complete result of one simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimReport {
    /// Chronological event log.  Timestamps are non-decreasing.
    pub log: Vec<LogEntry>,

    /// Simulated time at termination — the total elapsed processing time.
    pub elapsed: SimDuration,

    pub outcome: FlowOutcome,

    /// Per-step statistics, indexed by `StepId`.
    pub steps: Vec<StepStats>,

    /// Per-resource statistics, indexed by `ResourceId`.
    pub resources: Vec<ResourceStats>,

    /// Units still buffered per step at termination.  All zeros when
    /// `outcome == Drained`.
    pub unprocessed: Vec<u64>,

    /// Sum of all step costs.  Reconciles with the sum of resource costs.
    pub total_cost: f64,
}

impl SimReport {
    /// Name of the step a log entry refers to.
    #[inline]
    pub fn step_name(&self, step: StepId) -> &str {
        &self.steps[step.index()].name
    }

    /// Number of refusal entries in the log.
    pub fn refusal_count(&self) -> usize {
        self.log
            .iter()
            .filter(|e| e.kind == LogKind::Refused)
            .count()
    }

    /// Units that exited the final step (the pipeline's finished output).
    pub fn units_completed(&self) -> u64 {
        self.steps.last().map_or(0, |s| s.units_processed)
    }
}
