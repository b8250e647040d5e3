//! `fl-engine` — the discrete-event core of the flowline process simulator.
//!
//! # Execution model
//!
//! ```text
//! FlowCoordinator            one pass: invoke each non-empty step in order
//!   └─ Kernel.spawn/drive    one StepRun task per step invocation
//!        ├─ Admit            budget check per set; refusals logged, no time
//!        ├─ WaitSlot         slot request → granted now, or parked FIFO
//!        ├─ Busy             timeout = step duration, pushed on EventQueue
//!        └─ (repeat)         release → hand slot to next waiter at same
//!                            instant; commit; account; admit next set
//! ```
//!
//! Time advances only by popping the event queue in `(timestamp, submission)`
//! order, so a scenario's full schedule — including slot hand-offs at equal
//! instants — is deterministic and replayable.  The executor issues its sets
//! strictly one after another and the coordinator awaits each step in turn;
//! concurrency in the kernel exists for tasks parked on slots and timeouts,
//! not for parallel set execution.
//!
//! # Crate layout
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`event_queue`] | `EventQueue`, `EventKey` (time + FIFO tie-break)      |
//! | [`executor`]    | `StepRun`, `Phase` — one step execution's state       |
//! | [`kernel`]      | `Kernel` — clock, queue, pool, dispatch loop          |
//! | [`coordinator`] | `FlowCoordinator`, `FlowState` — buffer passes        |
//! | [`sim`]         | `Sim` — public runner                                 |
//! | [`builder`]     | `SimBuilder` — validate config, assemble `Sim`        |
//! | [`observer`]    | `SimObserver`, `NoopObserver`                         |
//! | [`loader`]      | CSV scenario loading                                  |
//! | [`error`]       | `SimError`, `SimResult<T>`                            |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fl_engine::{NoopObserver, SimBuilder};
//!
//! let report = SimBuilder::new(config).build()?.run(&mut NoopObserver);
//! println!("{} units in {}", report.units_completed(), report.elapsed);
//! ```

pub mod builder;
pub mod coordinator;
pub mod error;
pub mod event_queue;
pub mod executor;
pub mod kernel;
pub mod loader;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::SimBuilder;
pub use coordinator::{FlowCoordinator, FlowState};
pub use error::{SimError, SimResult};
pub use event_queue::{EventKey, EventQueue};
pub use kernel::Kernel;
pub use loader::{load_config_csv, load_config_readers};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
