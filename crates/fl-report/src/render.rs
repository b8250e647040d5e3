//! Plain-text rendering of a [`SimReport`].
//!
//! Produces the operator-facing views: the chronological log with `HH:MM:SS`
//! timestamps and fixed-width summary tables for steps and resources.  No
//! styling, no table crate — output is meant for terminals and log files.

use std::fmt::Write;

use fl_core::SimDuration;

use crate::report::{FlowOutcome, SimReport};

/// Render the chronological event log, one line per entry.
///
/// ```text
/// 00:00:00  start    cut (set 1)
/// 00:00:05  end      cut (set 1)
/// 00:00:05  refused  polish (set 2)
/// ```
pub fn render_log(report: &SimReport) -> String {
    let mut out = String::new();
    for entry in &report.log {
        let _ = writeln!(
            out,
            "{}  {:<8} {} (set {})",
            entry.at,
            entry.kind.to_string(),
            report.step_name(entry.step),
            entry.set + 1,
        );
    }
    out
}

/// Render the per-step summary table.
pub fn render_step_table(report: &SimReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<16} {:>10} {:>8} {:>10} {:>10}",
        "Step", "Executions", "Units", "Busy", "Cost"
    );
    let _ = writeln!(out, "{}", "-".repeat(58));
    for step in &report.steps {
        let _ = writeln!(
            out,
            "{:<16} {:>10} {:>8} {:>10} {:>10.2}",
            step.name,
            step.executions,
            step.units_processed,
            step.busy.to_string(),
            step.cost,
        );
    }
    out
}

/// Render the per-resource summary table.
pub fn render_resource_table(report: &SimReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<16} {:>10} {:>14} {:>12} {:>10}",
        "Resource", "Busy", "Availability", "Util %", "Cost"
    );
    let _ = writeln!(out, "{}", "-".repeat(66));
    for res in &report.resources {
        let _ = writeln!(
            out,
            "{:<16} {:>10} {:>14} {:>12.2} {:>10.2}",
            res.name,
            res.busy.to_string(),
            availability_cell(res.availability),
            res.utilization_pct,
            res.cost,
        );
    }
    out
}

/// Render the closing summary: elapsed time, completed units, total cost, and
/// any unprocessed remainder.
pub fn render_summary(report: &SimReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total processing time: {}", report.elapsed);
    let _ = writeln!(out, "Units completed:       {}", report.units_completed());
    let _ = writeln!(out, "Total cost:            {:.2}", report.total_cost);
    match report.outcome {
        FlowOutcome::Drained => {}
        FlowOutcome::Stalled => {
            let _ = writeln!(out, "Run stalled — unprocessed units per step:");
            for (i, &remaining) in report.unprocessed.iter().enumerate() {
                if remaining > 0 {
                    let _ = writeln!(
                        out,
                        "  {:<16} {}",
                        report.steps[i].name, remaining
                    );
                }
            }
        }
        FlowOutcome::HorizonReached => {
            let _ = writeln!(out, "Run cut off at the simulation horizon.");
        }
    }
    if report.refusal_count() > 0 {
        let _ = writeln!(
            out,
            "Refused admissions:    {}",
            report.refusal_count()
        );
    }
    out
}

fn availability_cell(availability: Option<SimDuration>) -> String {
    match availability {
        Some(d) => d.to_string(),
        None => "-".to_string(),
    }
}
