//! The public `Sim` runner.

use fl_report::SimReport;

use crate::coordinator::FlowCoordinator;
use crate::kernel::Kernel;
use crate::observer::SimObserver;

/// A ready-to-run simulation: kernel plus coordinator, built from a
/// validated scenario.
///
/// Create via [`SimBuilder`][crate::SimBuilder].  `run` consumes the `Sim` —
/// the engine simulates exactly one run per instance; build a fresh one to
/// re-run (identical configurations produce identical reports).
pub struct Sim {
    kernel:      Kernel,
    coordinator: FlowCoordinator,
}

impl std::fmt::Debug for Sim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sim").finish_non_exhaustive()
    }
}

impl Sim {
    pub(crate) fn new(kernel: Kernel) -> Self {
        let scenario = kernel.scenario();
        let coordinator = FlowCoordinator::new(scenario.step_count(), scenario.unit_count);
        Self { kernel, coordinator }
    }

    /// The validated scenario this sim will run.
    pub fn scenario(&self) -> &fl_core::Scenario {
        self.kernel.scenario()
    }

    /// Execute the run to termination and produce the full report.
    ///
    /// Termination is guaranteed: the pipeline drains, a refusal stall is
    /// detected, or the simulation horizon cuts the run off — the coordinator
    /// never retries a step that cannot make progress.
    pub fn run<O: SimObserver>(mut self, observer: &mut O) -> SimReport {
        let outcome = self.coordinator.run(&mut self.kernel, observer);
        observer.on_sim_end(self.kernel.now());
        let unprocessed = self.coordinator.buffers().to_vec();
        self.kernel.into_report(unprocessed, outcome)
    }
}
