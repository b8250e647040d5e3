//! CSV scenario loader.
//!
//! # CSV format
//!
//! Two files: one row per resource, one row per step (step order in the file
//! is pipeline order).
//!
//! `resources.csv`:
//!
//! ```csv
//! name,capacity,availability,cost_rate
//! oven,2,01:00:00,50.0
//! packer,1,,10.0
//! ```
//!
//! `steps.csv`:
//!
//! ```csv
//! name,resource,capacity,duration
//! bake,oven,4,00:05:00
//! pack,packer,1,45
//! ```
//!
//! **Duration fields** accept either `HH:MM:SS` or a plain number of
//! seconds.  An empty `availability` means the resource is unconstrained.
//!
//! The loader only parses; all semantic validation (unique names, resource
//! references, capacities) happens in [`SimConfig::resolve`] when the sim is
//! built.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use fl_core::{ResourceDef, SimConfig, SimDuration, StepDef};

use crate::error::{SimError, SimResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ResourceRecord {
    name:         String,
    capacity:     u32,
    availability: String,
    cost_rate:    f64,
}

#[derive(Deserialize)]
struct StepRecord {
    name:     String,
    resource: String,
    capacity: u32,
    duration: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`SimConfig`] from a resources CSV and a steps CSV.
pub fn load_config_csv(
    resources_path: &Path,
    steps_path:     &Path,
    unit_count:     u64,
) -> SimResult<SimConfig> {
    let resources = std::fs::File::open(resources_path)?;
    let steps = std::fs::File::open(steps_path)?;
    load_config_readers(resources, steps, unit_count)
}

/// Like [`load_config_csv`] but accepts any `Read` sources.
///
/// Useful for testing (pass `std::io::Cursor`s) or embedded scenarios.
pub fn load_config_readers<R1: Read, R2: Read>(
    resources:  R1,
    steps:      R2,
    unit_count: u64,
) -> SimResult<SimConfig> {
    let mut resource_defs = Vec::new();
    for result in csv::Reader::from_reader(resources).deserialize::<ResourceRecord>() {
        let row = result.map_err(|e| SimError::Parse(e.to_string()))?;
        resource_defs.push(ResourceDef {
            name:         row.name,
            capacity:     row.capacity,
            availability: parse_availability(&row.availability)?,
            cost_rate:    row.cost_rate,
        });
    }

    let mut step_defs = Vec::new();
    for result in csv::Reader::from_reader(steps).deserialize::<StepRecord>() {
        let row = result.map_err(|e| SimError::Parse(e.to_string()))?;
        step_defs.push(StepDef {
            name:     row.name,
            resource: row.resource,
            capacity: row.capacity,
            duration: parse_duration(&row.duration)?,
        });
    }

    Ok(SimConfig {
        unit_count,
        resources: resource_defs,
        steps:     step_defs,
        horizon:   None,
    })
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Empty string → unconstrained; anything else parses as a duration.
fn parse_availability(s: &str) -> SimResult<Option<SimDuration>> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    parse_duration(s).map(Some)
}

/// Parse `HH:MM:SS` or a plain number of seconds.
fn parse_duration(s: &str) -> SimResult<SimDuration> {
    let s = s.trim();
    if let Some((h, rest)) = s.split_once(':') {
        let Some((m, sec)) = rest.split_once(':') else {
            return Err(bad_duration(s));
        };
        let (h, m, sec) = (
            h.parse::<u64>().map_err(|_| bad_duration(s))?,
            m.parse::<u64>().map_err(|_| bad_duration(s))?,
            sec.parse::<u64>().map_err(|_| bad_duration(s))?,
        );
        if m >= 60 || sec >= 60 {
            return Err(bad_duration(s));
        }
        return Ok(SimDuration::from_hms(h, m, sec));
    }
    s.parse::<u64>()
        .map(SimDuration)
        .map_err(|_| bad_duration(s))
}

fn bad_duration(s: &str) -> SimError {
    SimError::Parse(format!(
        "invalid duration {s:?}: expected \"HH:MM:SS\" or whole seconds"
    ))
}
