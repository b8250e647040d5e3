//! `fl-report` — statistics aggregation and report output for the flowline
//! simulator.
//!
//! The engine accumulates raw counters through [`StatsAggregator`] while the
//! run executes; at termination [`StatsAggregator::finalize`] derives the
//! complete [`SimReport`] (log, per-step and per-resource statistics, costs,
//! outcome).  The report can then be rendered as text ([`render`]) or
//! persisted through a [`ReportWriter`] backend:
//!
//! | Feature  | Backend | Files created                                              |
//! |----------|---------|------------------------------------------------------------|
//! | *(none)* | CSV     | `simulation_log.csv`, `step_stats.csv`, `resource_stats.csv` |
//! | `sqlite` | SQLite  | `report.db`                                                |
//!
//! # Usage
//!
//! ```rust,ignore
//! use fl_report::{CsvReportWriter, ReportWriter, render};
//!
//! let report = sim.run(&mut NoopObserver)?;
//! print!("{}", render::render_step_table(&report));
//! let mut writer = CsvReportWriter::new(Path::new("./output"))?;
//! writer.write_report(&report)?;
//! writer.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod render;
pub mod report;
pub mod stats;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use crate::csv::CsvReportWriter;
pub use error::{ReportError, ReportResult};
pub use report::{FlowOutcome, LogEntry, LogKind, ResourceStats, SimReport, StepStats};
pub use stats::StatsAggregator;
pub use writer::ReportWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteReportWriter;
