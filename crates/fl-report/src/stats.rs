//! The statistics aggregator.
//!
//! # Cost model
//!
//! A resource's `cost_rate` is the price of consuming its *entire*
//! availability budget.  Costs are therefore normalized against the budget:
//!
//! ```text
//! step.cost      = (cost_rate / availability) * step.busy
//! resource.cost  =  cost_rate * consumed / availability
//! utilization%   =  100 * consumed / availability
//! ```
//!
//! A resource's consumed duration is by construction the sum of the busy
//! durations of the steps bound to it, so the two cost columns total to the
//! same number.
//!
//! When `availability` is `None` (unconstrained) or zero, the formulas above
//! would divide by zero or by infinity; the fixed policy is that such
//! resources cost nothing and report zero utilization.  A zero-budget
//! resource still shows up with all-zero stats rather than being dropped.

use fl_core::{Scenario, SimDuration, StepId};

use crate::report::{FlowOutcome, LogEntry, ResourceStats, SimReport, StepStats};

// ── StatsAggregator ───────────────────────────────────────────────────────────

/// Accumulates per-step counters as set executions complete, then derives the
/// final [`SimReport`].
///
/// One instance per simulation run; mutated only by the kernel on set
/// completion.
pub struct StatsAggregator {
    steps: Vec<StepAccum>,
}

#[derive(Default)]
struct StepAccum {
    executions: u64,
    units:      u64,
    busy:       SimDuration,
}

impl StatsAggregator {
    pub fn new(step_count: usize) -> Self {
        let steps = (0..step_count).map(|_| StepAccum::default()).collect();
        Self { steps }
    }

    /// Record one completed set: `units` processed after holding a slot for
    /// `duration`.
    pub fn record_set(&mut self, step: StepId, units: u64, duration: SimDuration) {
        let accum = &mut self.steps[step.index()];
        accum.executions += 1;
        accum.units += units;
        accum.busy += duration;
    }

    /// Derive the final report.
    ///
    /// `consumed` is the pool's committed busy time per resource, indexed by
    /// `ResourceId`; `unprocessed` the coordinator's remaining buffer per
    /// step.
    pub fn finalize(
        self,
        scenario:    &Scenario,
        consumed:    &[SimDuration],
        elapsed:     SimDuration,
        log:         Vec<LogEntry>,
        unprocessed: Vec<u64>,
        outcome:     FlowOutcome,
    ) -> SimReport {
        let steps: Vec<StepStats> = self
            .steps
            .iter()
            .zip(&scenario.steps)
            .map(|(accum, step)| {
                let resource = scenario.resource_for(step);
                StepStats {
                    name:            step.name.clone(),
                    resource:        step.resource,
                    executions:      accum.executions,
                    units_processed: accum.units,
                    busy:            accum.busy,
                    cost:            normalized_cost(
                        resource.cost_rate,
                        resource.availability,
                        accum.busy,
                    ),
                }
            })
            .collect();

        let resources: Vec<ResourceStats> = scenario
            .resources
            .iter()
            .zip(consumed)
            .map(|(def, &busy)| ResourceStats {
                name:            def.name.clone(),
                busy,
                availability:    def.availability,
                utilization_pct: budget_fraction(def.availability, busy) * 100.0,
                cost:            normalized_cost(def.cost_rate, def.availability, busy),
            })
            .collect();

        let total_cost = steps.iter().map(|s| s.cost).sum();

        SimReport {
            log,
            elapsed,
            outcome,
            steps,
            resources,
            unprocessed,
            total_cost,
        }
    }
}

// ── Formula helpers ───────────────────────────────────────────────────────────

/// `busy / availability`, or 0.0 for an unconstrained or zero budget.
fn budget_fraction(availability: Option<SimDuration>, busy: SimDuration) -> f64 {
    match availability {
        Some(budget) if !budget.is_zero() => busy.as_secs() as f64 / budget.as_secs() as f64,
        _ => 0.0,
    }
}

/// `(rate / availability) * busy`, or 0.0 for an unconstrained or zero budget.
fn normalized_cost(rate: f64, availability: Option<SimDuration>, busy: SimDuration) -> f64 {
    rate * budget_fraction(availability, busy)
}
