//! `fl-core` — foundational types for the `flowline` process simulator.
//!
//! This crate is a dependency of every other `fl-*` crate.  It intentionally
//! has no `fl-*` dependencies and minimal external ones (only `rustc-hash`
//! and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`ids`]    | `StepId`, `ResourceId`, `TaskId`                          |
//! | [`time`]   | `SimTime`, `SimDuration` (whole-second simulated clock)   |
//! | [`config`] | `ResourceDef`, `StepDef`, `SimConfig`, `Scenario`         |
//! | [`error`]  | `ConfigError`, `ConfigResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                      |
//! |---------|-------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.         |

pub mod config;
pub mod error;
pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{BoundStep, ResourceDef, Scenario, SimConfig, StepDef};
pub use error::{ConfigError, ConfigResult};
pub use ids::{ResourceId, StepId, TaskId};
pub use time::{SimDuration, SimTime};
