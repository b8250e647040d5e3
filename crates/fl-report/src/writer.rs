//! The `ReportWriter` trait implemented by all backend writers.

use crate::{ReportResult, SimReport};

/// Trait implemented by the CSV and SQLite report writers.
///
/// A report is written in one shot after the run terminates — there is no
/// streaming: the engine produces a complete [`SimReport`] and the writer
/// persists it.
pub trait ReportWriter {
    /// Persist the full report: log, step statistics, resource statistics.
    fn write_report(&mut self, report: &SimReport) -> ReportResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> ReportResult<()>;
}
