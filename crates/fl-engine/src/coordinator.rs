//! The flow coordinator — sequences the batch through the pipeline.
//!
//! # Buffer model
//!
//! One buffer slot per step holds the units waiting to *enter* that step.
//! Position 0 is seeded with the whole batch; units exiting the last step
//! are finished product and are not re-buffered.
//!
//! # Pass loop
//!
//! Each outer pass invokes the executor at most once per step, with the full
//! buffered quantity.  Only the quantity the executor *actually* processed
//! moves to the next buffer — a refused remainder stays put.  A step whose
//! resource budget can no longer admit a single set is skipped on later
//! passes (budgets never recover, so re-invoking it would only repeat the
//! refusals already logged).  A full pass with zero progress means the run
//! is stalled and terminates with the remainders reported, never loops.

use fl_core::StepId;
use fl_report::FlowOutcome;

use crate::kernel::Kernel;
use crate::observer::SimObserver;

/// Lifecycle of the coordinator across one run.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum FlowState {
    /// Buffers initialised; nothing executed yet.
    Seeded,
    /// Pass loop in progress.
    Running,
    /// Every buffer reached zero.
    Drained,
}

/// Drives the per-step buffers through the kernel until the batch drains,
/// stalls, or hits the horizon.
pub struct FlowCoordinator {
    /// Units waiting to enter each step, indexed by step position.
    buffers: Vec<u64>,

    /// Steps that have been invoked at least once.  First invocations always
    /// go through (so refusals get logged even for a hopeless resource);
    /// afterwards a step is only re-invoked while its budget can still admit.
    attempted: Vec<bool>,

    state: FlowState,
}

impl FlowCoordinator {
    /// Seed the first buffer with the scenario's full unit count.
    pub fn new(step_count: usize, unit_count: u64) -> Self {
        let mut buffers = vec![0; step_count];
        buffers[0] = unit_count;
        Self {
            buffers,
            attempted: vec![false; step_count],
            state: FlowState::Seeded,
        }
    }

    #[inline]
    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Units still waiting per step.
    #[inline]
    pub fn buffers(&self) -> &[u64] {
        &self.buffers
    }

    /// Run passes until the pipeline drains, stalls, or the kernel reports
    /// the horizon.
    pub fn run<O: SimObserver>(&mut self, kernel: &mut Kernel, obs: &mut O) -> FlowOutcome {
        self.state = FlowState::Running;
        let mut pass: u64 = 0;

        while self.buffers.iter().any(|&b| b > 0) {
            let mut progressed = false;

            for i in 0..self.buffers.len() {
                let quantity = self.buffers[i];
                if quantity == 0 {
                    // A step with nothing buffered is never scheduled.
                    continue;
                }
                let step = StepId(i as u16);
                if self.attempted[i] && !kernel.can_admit(step) {
                    continue;
                }
                self.attempted[i] = true;

                let task = kernel.spawn(step, quantity);
                match kernel.drive_task(task, obs) {
                    Some(processed) => {
                        self.advance(i, processed);
                        if processed > 0 {
                            progressed = true;
                        }
                    }
                    None => {
                        // Horizon reached mid-execution: account for the sets
                        // that completed, then stop.
                        let processed = kernel.processed(task);
                        self.advance(i, processed);
                        obs.on_pass_end(pass, &self.buffers);
                        return FlowOutcome::HorizonReached;
                    }
                }
            }

            obs.on_pass_end(pass, &self.buffers);
            pass += 1;

            if !progressed {
                return FlowOutcome::Stalled;
            }
        }

        self.state = FlowState::Drained;
        FlowOutcome::Drained
    }

    /// Move `processed` units from step `i`'s buffer into the next buffer
    /// (units leaving the last step are finished and not re-buffered).
    fn advance(&mut self, i: usize, processed: u64) {
        self.buffers[i] -= processed;
        if i + 1 < self.buffers.len() {
            self.buffers[i + 1] += processed;
        }
    }
}
