//! Configuration error type.
//!
//! All configuration problems are fatal and surface from
//! [`SimConfig::resolve`][crate::SimConfig::resolve] before any simulation
//! state exists.  Sub-crates wrap `ConfigError` as one variant of their own
//! error enums via `#[from]`.

use thiserror::Error;

/// A problem in the caller-supplied configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unit count must be at least 1")]
    ZeroUnits,

    #[error("scenario defines no steps")]
    NoSteps,

    #[error("{what} name must not be empty")]
    EmptyName { what: &'static str },

    #[error("duplicate resource name {0:?}")]
    DuplicateResource(String),

    #[error("step {step:?} references unknown resource {resource:?}")]
    UnknownResource { step: String, resource: String },

    #[error("{what} {name:?} has zero capacity")]
    ZeroCapacity { what: &'static str, name: String },

    #[error("resource {0:?} has a negative cost rate")]
    NegativeCostRate(String),
}

/// Shorthand result type for configuration validation.
pub type ConfigResult<T> = Result<T, ConfigError>;
