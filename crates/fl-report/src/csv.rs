//! CSV report backend.
//!
//! Creates three files in the configured output directory:
//! - `simulation_log.csv`
//! - `step_stats.csv`
//! - `resource_stats.csv`

use std::fs::File;
use std::path::Path;

use ::csv::Writer;

use crate::report::SimReport;
use crate::writer::ReportWriter;
use crate::ReportResult;

/// Writes a simulation report to three CSV files.
pub struct CsvReportWriter {
    log:       Writer<File>,
    steps:     Writer<File>,
    resources: Writer<File>,
    finished:  bool,
}

impl CsvReportWriter {
    /// Open (or create) the three CSV files in `dir` and write header rows.
    pub fn new(dir: &Path) -> ReportResult<Self> {
        let mut log = Writer::from_path(dir.join("simulation_log.csv"))?;
        log.write_record(["time_secs", "time", "event", "step", "set"])?;

        let mut steps = Writer::from_path(dir.join("step_stats.csv"))?;
        steps.write_record([
            "step", "resource", "executions", "units_processed", "busy_secs", "cost",
        ])?;

        let mut resources = Writer::from_path(dir.join("resource_stats.csv"))?;
        resources.write_record([
            "resource", "busy_secs", "availability_secs", "utilization_pct", "cost",
        ])?;

        Ok(Self {
            log,
            steps,
            resources,
            finished: false,
        })
    }
}

impl ReportWriter for CsvReportWriter {
    fn write_report(&mut self, report: &SimReport) -> ReportResult<()> {
        for entry in &report.log {
            self.log.write_record(&[
                entry.at.0.to_string(),
                entry.at.to_string(),
                entry.kind.to_string(),
                report.step_name(entry.step).to_string(),
                entry.set.to_string(),
            ])?;
        }

        for step in &report.steps {
            self.steps.write_record(&[
                step.name.clone(),
                report.resources[step.resource.index()].name.clone(),
                step.executions.to_string(),
                step.units_processed.to_string(),
                step.busy.as_secs().to_string(),
                step.cost.to_string(),
            ])?;
        }

        for res in &report.resources {
            self.resources.write_record(&[
                res.name.clone(),
                res.busy.as_secs().to_string(),
                res.availability
                    .map(|d| d.as_secs().to_string())
                    .unwrap_or_default(),
                res.utilization_pct.to_string(),
                res.cost.to_string(),
            ])?;
        }

        Ok(())
    }

    fn finish(&mut self) -> ReportResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.log.flush()?;
        self.steps.flush()?;
        self.resources.flush()?;
        Ok(())
    }
}
