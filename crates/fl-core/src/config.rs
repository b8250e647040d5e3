//! Scenario configuration: resource and step definitions plus validation.
//!
//! # Model
//!
//! A scenario is a batch of identical work units flowing through an ordered
//! pipeline of steps.  Each step is bound by name to one resource; a resource
//! offers a fixed number of concurrent slots and, optionally, a cumulative
//! availability budget that caps its total busy time for the run.
//!
//! [`SimConfig`] is the caller-facing, name-keyed form (typically built in
//! code or loaded from CSV by `fl-engine`).  [`SimConfig::resolve`] validates
//! it and produces a [`Scenario`] whose steps are bound to [`ResourceId`]
//! indices, so the engine never does name lookups at run time.
//!
//! # Availability budget
//!
//! `ResourceDef::availability` is an `Option`:
//!
//! | Value               | Meaning                                          |
//! |---------------------|--------------------------------------------------|
//! | `None`              | Unconstrained — always admits, zero cost basis   |
//! | `Some(d)`, `d > 0`  | Hard budget: admission refused once exceeded     |
//! | `Some(0)`           | Resource can never execute anything              |
//!
//! The `Some(0)` case is deliberate: every set bound to such a resource is
//! refused, which must surface as refusal log entries, not as an error.

use rustc_hash::FxHashMap;

use crate::error::{ConfigError, ConfigResult};
use crate::ids::ResourceId;
use crate::time::SimDuration;

// ── Definitions ───────────────────────────────────────────────────────────────

/// One resource: a named pool of concurrent execution slots with an optional
/// cumulative time budget and a cost rate.
///
/// Immutable once the configuration is resolved.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceDef {
    /// Unique, non-empty resource name.
    pub name: String,

    /// Number of slots that may be busy at the same simulated instant.
    pub capacity: u32,

    /// Cumulative busy-time budget for the whole run.  `None` = unconstrained.
    pub availability: Option<SimDuration>,

    /// Cost per full availability budget consumed.  The per-step cost formula
    /// normalizes against `availability`; with an unconstrained or zero
    /// budget the cost contribution is zero.
    pub cost_rate: f64,
}

/// One pipeline step: a named operation bound to a resource.
///
/// `capacity` is the number of work units processed per execution ("set");
/// `duration` is the fixed time cost of one execution, independent of how
/// many units the set carries.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepDef {
    pub name: String,

    /// Name of the resource this step executes on.  Must match a
    /// [`ResourceDef::name`] in the same configuration.
    pub resource: String,

    /// Max units processed per execution.
    pub capacity: u32,

    /// Fixed duration of one execution.
    pub duration: SimDuration,
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Caller-supplied simulation configuration, keyed by resource *names*.
///
/// Step order defines pipeline order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Total number of work units seeded into the first step's buffer.
    pub unit_count: u64,

    pub resources: Vec<ResourceDef>,

    /// Ordered pipeline steps.
    pub steps: Vec<StepDef>,

    /// Optional simulation horizon.  The run terminates when the event queue
    /// empties or this much simulated time has elapsed, whichever is first.
    pub horizon: Option<SimDuration>,
}

impl SimConfig {
    /// Validate the configuration and bind step → resource references.
    ///
    /// All `ConfigError` cases surface here, before any simulation state is
    /// built: duplicate or empty resource names, steps referencing unknown
    /// resources, zero capacities, negative cost rates, an empty step list,
    /// and a zero unit count.
    pub fn resolve(self) -> ConfigResult<Scenario> {
        if self.unit_count == 0 {
            return Err(ConfigError::ZeroUnits);
        }
        if self.steps.is_empty() {
            return Err(ConfigError::NoSteps);
        }

        // ── Resource table ────────────────────────────────────────────────
        let mut by_name: FxHashMap<&str, ResourceId> = FxHashMap::default();
        for (i, res) in self.resources.iter().enumerate() {
            if res.name.is_empty() {
                return Err(ConfigError::EmptyName { what: "resource" });
            }
            if res.capacity == 0 {
                return Err(ConfigError::ZeroCapacity {
                    what: "resource",
                    name: res.name.clone(),
                });
            }
            if res.cost_rate < 0.0 {
                return Err(ConfigError::NegativeCostRate(res.name.clone()));
            }
            let id = ResourceId(i as u16);
            if by_name.insert(res.name.as_str(), id).is_some() {
                return Err(ConfigError::DuplicateResource(res.name.clone()));
            }
        }

        // ── Bind steps ────────────────────────────────────────────────────
        let mut steps = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            if step.name.is_empty() {
                return Err(ConfigError::EmptyName { what: "step" });
            }
            if step.capacity == 0 {
                return Err(ConfigError::ZeroCapacity {
                    what: "step",
                    name: step.name.clone(),
                });
            }
            let resource = match by_name.get(step.resource.as_str()) {
                Some(&id) => id,
                None => {
                    return Err(ConfigError::UnknownResource {
                        step:     step.name.clone(),
                        resource: step.resource.clone(),
                    });
                }
            };
            steps.push(BoundStep {
                name: step.name.clone(),
                resource,
                capacity: step.capacity,
                duration: step.duration,
            });
        }

        Ok(Scenario {
            unit_count: self.unit_count,
            resources:  self.resources,
            steps,
            horizon:    self.horizon,
        })
    }
}

// ── Scenario ──────────────────────────────────────────────────────────────────

/// A step with its resource reference resolved to a [`ResourceId`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundStep {
    pub name:     String,
    pub resource: ResourceId,
    pub capacity: u32,
    pub duration: SimDuration,
}

/// A validated, fully bound scenario — the engine's input.
///
/// Produced only by [`SimConfig::resolve`]; every step's `resource` index is
/// guaranteed to be in range for `resources`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    pub unit_count: u64,
    pub resources:  Vec<ResourceDef>,
    pub steps:      Vec<BoundStep>,
    pub horizon:    Option<SimDuration>,
}

impl Scenario {
    #[inline]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// The resource a bound step executes on.
    #[inline]
    pub fn resource_for(&self, step: &BoundStep) -> &ResourceDef {
        &self.resources[step.resource.index()]
    }
}
