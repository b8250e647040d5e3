//! assembly — end-to-end demo for the flowline process simulator.
//!
//! Simulates a small electronics assembly line: 10 units pass through fit,
//! solder, and test steps shared between an assembler station and a test
//! bench.  The assembler's availability budget is sized so the batch consumes
//! it exactly; raise `UNIT_COUNT` to see budget refusals and a stalled run.

use std::io::Cursor;
use std::path::Path;

use anyhow::Result;

use fl_core::{SimTime, StepId};
use fl_engine::{load_config_readers, SimBuilder, SimObserver};
use fl_report::{render, CsvReportWriter, ReportWriter};

// ── Constants ─────────────────────────────────────────────────────────────────

const UNIT_COUNT: u64 = 10;
const OUTPUT_DIR: &str = "output/assembly";

// ── Scenario CSVs ─────────────────────────────────────────────────────────────

// The assembler serves two steps (fit + solder): 5 sets × 2 min + 10 sets ×
// 1 min = 20 min, exactly its availability budget.
const RESOURCES_CSV: &str = "\
name,capacity,availability,cost_rate
assembler,1,00:20:00,75.0
tester,1,00:10:00,40.0
";

const STEPS_CSV: &str = "\
name,resource,capacity,duration
fit,assembler,2,00:02:00
solder,assembler,1,00:01:00
test,tester,2,00:01:30
";

// ── Progress observer ─────────────────────────────────────────────────────────

#[derive(Default)]
struct Progress {
    sets:     usize,
    refusals: usize,
}

impl SimObserver for Progress {
    fn on_set_end(&mut self, _at: SimTime, _step: StepId, _set: u64, _units: u64) {
        self.sets += 1;
    }

    fn on_set_refused(&mut self, _at: SimTime, _step: StepId, _set: u64) {
        self.refusals += 1;
    }

    fn on_pass_end(&mut self, pass: u64, buffers: &[u64]) {
        println!("pass {pass}: waiting per step {buffers:?}");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== assembly — flowline process simulator ===");
    println!("Units: {UNIT_COUNT}");
    println!();

    // 1. Load the embedded scenario.
    let config = load_config_readers(
        Cursor::new(RESOURCES_CSV),
        Cursor::new(STEPS_CSV),
        UNIT_COUNT,
    )?;
    println!(
        "Scenario: {} resources, {} steps",
        config.resources.len(),
        config.steps.len()
    );

    // 2. Validate and build.
    let sim = SimBuilder::new(config).build()?;

    // 3. Run with live pass reporting.
    let mut progress = Progress::default();
    let report = sim.run(&mut progress);
    println!(
        "{} sets completed, {} refused",
        progress.sets, progress.refusals
    );
    println!();

    // 4. Print the chronological log and the summary tables.
    println!("--- simulation log ---");
    print!("{}", render::render_log(&report));
    println!();
    print!("{}", render::render_step_table(&report));
    println!();
    print!("{}", render::render_resource_table(&report));
    println!();
    print!("{}", render::render_summary(&report));
    println!();

    // 5. Persist the report as CSV.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let mut writer = CsvReportWriter::new(Path::new(OUTPUT_DIR))?;
    writer.write_report(&report)?;
    writer.finish()?;
    println!("Report written to {OUTPUT_DIR}/");

    Ok(())
}
