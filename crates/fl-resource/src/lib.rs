//! `fl-resource` — the resource-contention model for the flowline simulator.
//!
//! A resource is a bounded set of concurrent execution slots plus an optional
//! cumulative availability budget.  [`ResourcePool`] owns all per-resource
//! runtime state for one simulation run: slot occupancy, FIFO waiter queues,
//! and the committed-duration accumulators the statistics layer reads at the
//! end of the run.
//!
//! The pool knows nothing about steps, events, or time — the kernel in
//! `fl-engine` decides *when* to call it; the pool only answers *whether* an
//! execution may be admitted and *who* holds the slots.

pub mod pool;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use pool::{Acquire, ResourcePool};
