//! Simulation observer trait for progress reporting.

use fl_core::{SimTime, StepId};

/// Callbacks invoked by the kernel and coordinator at key points in a run.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  The full event history is always
/// available in the final report's log; observers exist for *live* progress
/// (printing, counting, early diagnostics), not as the system of record.
///
/// # Example — refusal counter
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct RefusalCounter(u64);
///
/// impl SimObserver for RefusalCounter {
///     fn on_set_refused(&mut self, _at: SimTime, _step: StepId, _set: u64) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// A set acquired its slot and began its busy period.
    fn on_set_start(&mut self, _at: SimTime, _step: StepId, _set: u64) {}

    /// A set's busy period elapsed; `units` units are now processed.
    fn on_set_end(&mut self, _at: SimTime, _step: StepId, _set: u64, _units: u64) {}

    /// A set was refused admission by its resource's availability budget.
    fn on_set_refused(&mut self, _at: SimTime, _step: StepId, _set: u64) {}

    /// A coordinator pass finished; `buffers` holds the per-step remainders.
    fn on_pass_end(&mut self, _pass: u64, _buffers: &[u64]) {}

    /// Called once when the run terminates, at the final simulated instant.
    fn on_sim_end(&mut self, _at: SimTime) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
