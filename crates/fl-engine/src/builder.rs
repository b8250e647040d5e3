//! Fluent builder for constructing a [`Sim`].

use fl_core::{SimConfig, SimDuration};

use crate::kernel::Kernel;
use crate::sim::Sim;
use crate::SimResult;

/// Validates a [`SimConfig`] and assembles a ready-to-run [`Sim`].
///
/// All configuration problems surface from [`build`][Self::build] as
/// [`SimError::Config`][crate::SimError::Config] — nothing is deferred to
/// run time.
///
/// # Example
///
/// ```rust,ignore
/// let report = SimBuilder::new(config)
///     .horizon(SimDuration::from_hms(8, 0, 0))
///     .build()?
///     .run(&mut NoopObserver);
/// ```
pub struct SimBuilder {
    config: SimConfig,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self { config }
    }

    /// Cap the run at `horizon` of simulated time.
    ///
    /// Overrides any horizon already present in the config.  Without one,
    /// the run ends when the pipeline drains or stalls.
    pub fn horizon(mut self, horizon: SimDuration) -> Self {
        self.config.horizon = Some(horizon);
        self
    }

    /// Validate the configuration and build the sim.
    pub fn build(self) -> SimResult<Sim> {
        let scenario = self.config.resolve()?;
        Ok(Sim::new(Kernel::new(scenario)))
    }
}
