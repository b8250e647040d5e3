//! SQLite report backend (feature `sqlite`).
//!
//! Creates a single `report.db` file in the configured output directory with
//! three tables: `simulation_log`, `step_stats`, and `resource_stats`.

use std::path::Path;

use rusqlite::Connection;

use crate::report::SimReport;
use crate::writer::ReportWriter;
use crate::ReportResult;

/// Writes a simulation report to an SQLite database.
pub struct SqliteReportWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteReportWriter {
    /// Open (or create) `report.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> ReportResult<Self> {
        let conn = Connection::open(dir.join("report.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS simulation_log (
                 time_secs INTEGER NOT NULL,
                 event     TEXT    NOT NULL,
                 step      TEXT    NOT NULL,
                 set_idx   INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS step_stats (
                 step            TEXT    NOT NULL,
                 resource        TEXT    NOT NULL,
                 executions      INTEGER NOT NULL,
                 units_processed INTEGER NOT NULL,
                 busy_secs       INTEGER NOT NULL,
                 cost            REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS resource_stats (
                 resource          TEXT    NOT NULL,
                 busy_secs         INTEGER NOT NULL,
                 availability_secs INTEGER,
                 utilization_pct   REAL    NOT NULL,
                 cost              REAL    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl ReportWriter for SqliteReportWriter {
    fn write_report(&mut self, report: &SimReport) -> ReportResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO simulation_log (time_secs, event, step, set_idx) \
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for entry in &report.log {
                stmt.execute(rusqlite::params![
                    entry.at.0,
                    entry.kind.to_string(),
                    report.step_name(entry.step),
                    entry.set,
                ])?;
            }
        }
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO step_stats \
                 (step, resource, executions, units_processed, busy_secs, cost) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for step in &report.steps {
                stmt.execute(rusqlite::params![
                    step.name,
                    report.resources[step.resource.index()].name,
                    step.executions,
                    step.units_processed,
                    step.busy.as_secs(),
                    step.cost,
                ])?;
            }
        }
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO resource_stats \
                 (resource, busy_secs, availability_secs, utilization_pct, cost) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for res in &report.resources {
                stmt.execute(rusqlite::params![
                    res.name,
                    res.busy.as_secs(),
                    res.availability.map(|d| d.as_secs()),
                    res.utilization_pct,
                    res.cost,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> ReportResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
