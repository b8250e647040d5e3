//! Integration tests for the event queue, kernel, coordinator, and loader.

use fl_core::{ResourceDef, SimConfig, SimDuration, SimTime, StepDef, StepId, TaskId};
use fl_report::{FlowOutcome, LogKind};

use crate::{NoopObserver, SimBuilder, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn resource(name: &str, capacity: u32, availability: Option<u64>, cost_rate: f64) -> ResourceDef {
    ResourceDef {
        name: name.to_string(),
        capacity,
        availability: availability.map(SimDuration),
        cost_rate,
    }
}

fn step(name: &str, resource: &str, capacity: u32, duration_secs: u64) -> StepDef {
    StepDef {
        name:     name.to_string(),
        resource: resource.to_string(),
        capacity,
        duration: SimDuration(duration_secs),
    }
}

fn config(
    unit_count: u64,
    resources:  Vec<ResourceDef>,
    steps:      Vec<StepDef>,
) -> SimConfig {
    SimConfig { unit_count, resources, steps, horizon: None }
}

/// Observer that tracks concurrent slot holders and records start instants.
#[derive(Default)]
struct ConcurrencyTracker {
    active:         i64,
    max_active:     i64,
    start_times:    Vec<SimTime>,
    end_times:      Vec<SimTime>,
    refusal_times:  Vec<SimTime>,
}

impl SimObserver for ConcurrencyTracker {
    fn on_set_start(&mut self, at: SimTime, _step: StepId, _set: u64) {
        self.active += 1;
        self.max_active = self.max_active.max(self.active);
        self.start_times.push(at);
    }
    fn on_set_end(&mut self, at: SimTime, _step: StepId, _set: u64, _units: u64) {
        self.active -= 1;
        self.end_times.push(at);
    }
    fn on_set_refused(&mut self, at: SimTime, _step: StepId, _set: u64) {
        self.refusal_times.push(at);
    }
}

// ── Event queue ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod event_queue_tests {
    use super::*;
    use crate::EventQueue;

    #[test]
    fn pops_in_time_order() {
        let mut q = EventQueue::new();
        q.push(SimTime(5), TaskId(0));
        q.push(SimTime(3), TaskId(1));
        q.push(SimTime(1), TaskId(2));

        assert_eq!(q.next_time(), Some(SimTime(1)));
        let order: Vec<TaskId> = std::iter::from_fn(|| q.pop_first().map(|(_, t)| t)).collect();
        assert_eq!(order, vec![TaskId(2), TaskId(1), TaskId(0)]);
        assert!(q.is_empty());
    }

    #[test]
    fn equal_timestamps_resolve_in_submission_order() {
        let mut q = EventQueue::new();
        q.push(SimTime(7), TaskId(3));
        q.push(SimTime(7), TaskId(1));
        q.push(SimTime(7), TaskId(2));

        let order: Vec<TaskId> = std::iter::from_fn(|| q.pop_first().map(|(_, t)| t)).collect();
        // FIFO by submission, not by task id.
        assert_eq!(order, vec![TaskId(3), TaskId(1), TaskId(2)]);
    }

    #[test]
    fn len_tracks_entries() {
        let mut q = EventQueue::new();
        assert_eq!(q.len(), 0);
        q.push(SimTime(1), TaskId(0));
        q.push(SimTime(2), TaskId(1));
        assert_eq!(q.len(), 2);
        q.pop_first();
        assert_eq!(q.len(), 1);
    }
}

// ── Kernel: slot contention ───────────────────────────────────────────────────

#[cfg(test)]
mod kernel_tests {
    use super::*;
    use crate::kernel::Kernel;

    /// Spawn `n` one-unit tasks of step 0 and drive to idle.
    fn run_contended(resource_capacity: u32, n: usize) -> (Kernel, ConcurrencyTracker) {
        let scenario = config(
            n as u64,
            vec![resource("r", resource_capacity, None, 0.0)],
            vec![step("s", "r", 1, 5)],
        )
        .resolve()
        .unwrap();
        let mut kernel = Kernel::new(scenario);
        let mut obs = ConcurrencyTracker::default();
        for _ in 0..n {
            kernel.spawn(StepId(0), 1);
        }
        kernel.drive_idle(&mut obs);
        (kernel, obs)
    }

    #[test]
    fn single_slot_serializes_tasks_fifo() {
        let (kernel, obs) = run_contended(1, 3);
        assert_eq!(obs.max_active, 1);
        assert_eq!(obs.start_times, vec![SimTime(0), SimTime(5), SimTime(10)]);
        assert_eq!(kernel.now(), SimTime(15));
    }

    #[test]
    fn capacity_two_runs_pairs_concurrently() {
        let (kernel, obs) = run_contended(2, 3);
        // Two tasks start together; the third inherits a slot at t=5.
        assert_eq!(obs.max_active, 2);
        assert_eq!(obs.start_times, vec![SimTime(0), SimTime(0), SimTime(5)]);
        assert_eq!(kernel.now(), SimTime(10));
    }

    #[test]
    fn concurrent_grants_never_exceed_capacity() {
        for capacity in 1..=4u32 {
            let (_, obs) = run_contended(capacity, 8);
            assert!(
                obs.max_active <= capacity as i64,
                "capacity {capacity}: saw {} concurrent grants",
                obs.max_active
            );
        }
    }

    #[test]
    fn slot_hands_off_at_the_release_instant() {
        let (kernel, obs) = run_contended(1, 2);
        // Task 1's start coincides exactly with task 0's end — the hand-off
        // happens atomically at the same simulated instant.
        assert_eq!(obs.end_times[0], obs.start_times[1]);
        // But in log order the end precedes the start.
        let kinds: Vec<LogKind> = kernel.log().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![LogKind::Start, LogKind::End, LogKind::Start, LogKind::End]
        );
    }
}

// ── Full pipeline scenarios ───────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn zero_refusal_round_trip() {
        // 1 step, capacity 1, duration d, n units, unconstrained budget:
        // elapsed is exactly n * d and nothing costs anything.
        let report = SimBuilder::new(config(
            4,
            vec![resource("r", 1, None, 50.0)],
            vec![step("s", "r", 1, 7)],
        ))
        .build()
        .unwrap()
        .run(&mut NoopObserver);

        assert_eq!(report.outcome, FlowOutcome::Drained);
        assert_eq!(report.elapsed, SimDuration(28));
        assert_eq!(report.steps[0].executions, 4);
        assert_eq!(report.steps[0].units_processed, 4);
        assert_eq!(report.steps[0].cost, 0.0);
        assert_eq!(report.total_cost, 0.0);
        assert_eq!(report.refusal_count(), 0);
        // Conservation with equality: no refusals anywhere.
        assert_eq!(report.units_completed(), 4);
        assert_eq!(report.unprocessed, vec![0]);
    }

    #[test]
    fn reference_costing_scenario() {
        // Resource: capacity 2, budget 100 s, rate 50.  Step: capacity 2,
        // duration 5 s.  10 units → 5 sets of 2.  Sets are serialized through
        // the executor, so elapsed = 5 × 5 = 25 s, utilization 25 %, cost 12.5.
        let report = SimBuilder::new(config(
            10,
            vec![resource("machine", 2, Some(100), 50.0)],
            vec![step("press", "machine", 2, 5)],
        ))
        .build()
        .unwrap()
        .run(&mut NoopObserver);

        assert_eq!(report.outcome, FlowOutcome::Drained);
        assert_eq!(report.elapsed, SimDuration(25));
        assert_eq!(report.steps[0].executions, 5);
        assert_eq!(report.steps[0].units_processed, 10);
        assert_eq!(report.steps[0].busy, SimDuration(25));
        assert_eq!(report.steps[0].cost, 12.5);
        assert_eq!(report.resources[0].busy, SimDuration(25));
        assert_eq!(report.resources[0].utilization_pct, 25.0);
        assert_eq!(report.resources[0].cost, 12.5);
        assert_eq!(report.total_cost, 12.5);
        assert_eq!(report.refusal_count(), 0);
    }

    #[test]
    fn budget_exhaustion_refuses_exactly_once() {
        // Budget 10 s, duration 5 s, capacity 1, 3 units: sets 1 and 2
        // consume the whole budget, set 3 is refused.  The coordinator must
        // not re-invoke the starved step, so the log holds exactly one
        // refusal.
        let report = SimBuilder::new(config(
            3,
            vec![resource("r", 1, Some(10), 20.0)],
            vec![step("s", "r", 1, 5)],
        ))
        .build()
        .unwrap()
        .run(&mut NoopObserver);

        assert_eq!(report.outcome, FlowOutcome::Stalled);
        assert_eq!(report.steps[0].units_processed, 2);
        assert_eq!(report.steps[0].executions, 2);
        assert_eq!(report.refusal_count(), 1);
        assert_eq!(report.resources[0].busy, SimDuration(10));
        // Budget fully consumed, never exceeded.
        assert_eq!(report.resources[0].utilization_pct, 100.0);
        assert_eq!(report.unprocessed, vec![1]);
        // Refusals advance no time: the run ends when set 2 ends.
        assert_eq!(report.elapsed, SimDuration(10));
    }

    #[test]
    fn zero_budget_resource_refuses_every_set() {
        let mut obs = ConcurrencyTracker::default();
        let report = SimBuilder::new(config(
            4,
            vec![resource("dead", 1, Some(0), 99.0)],
            vec![step("s", "dead", 1, 5)],
        ))
        .build()
        .unwrap()
        .run(&mut obs);

        assert_eq!(report.outcome, FlowOutcome::Stalled);
        assert_eq!(report.refusal_count(), 4);
        assert_eq!(report.steps[0].executions, 0);
        assert_eq!(report.steps[0].units_processed, 0);
        assert_eq!(report.elapsed, SimDuration::ZERO);
        assert_eq!(report.unprocessed, vec![4]);
        // No NaN from the zero denominator.
        assert_eq!(report.resources[0].utilization_pct, 0.0);
        assert_eq!(report.total_cost, 0.0);
        assert!(obs.start_times.is_empty());
        // All four refusals land at t=0: refusals never advance time.
        assert_eq!(obs.refusal_times, vec![SimTime::ZERO; 4]);
    }

    #[test]
    fn multi_step_carry_forward() {
        // Step A (capacity 3, 2 s) feeds step B (capacity 1, 1 s); 5 units.
        // A runs 2 sets (0–2, 2–4); B then runs 5 sets (4–9).
        let report = SimBuilder::new(config(
            5,
            vec![
                resource("ra", 1, None, 0.0),
                resource("rb", 1, None, 0.0),
            ],
            vec![step("a", "ra", 3, 2), step("b", "rb", 1, 1)],
        ))
        .build()
        .unwrap()
        .run(&mut NoopObserver);

        assert_eq!(report.outcome, FlowOutcome::Drained);
        assert_eq!(report.steps[0].executions, 2);
        assert_eq!(report.steps[0].units_processed, 5);
        assert_eq!(report.steps[0].busy, SimDuration(4));
        assert_eq!(report.steps[1].executions, 5);
        assert_eq!(report.steps[1].units_processed, 5);
        assert_eq!(report.elapsed, SimDuration(9));
        assert_eq!(report.units_completed(), 5);
    }

    #[test]
    fn partial_batch_carries_only_processed_units() {
        // Step A unconstrained; step B's resource admits one 2-second set
        // (budget 3 s).  Of 3 units, only 1 exits the pipeline; the stalled
        // remainder stays buffered at step B.
        let report = SimBuilder::new(config(
            3,
            vec![
                resource("ra", 1, None, 0.0),
                resource("rb", 1, Some(3), 0.0),
            ],
            vec![step("a", "ra", 1, 2), step("b", "rb", 1, 2)],
        ))
        .build()
        .unwrap()
        .run(&mut NoopObserver);

        assert_eq!(report.outcome, FlowOutcome::Stalled);
        assert_eq!(report.steps[0].units_processed, 3);
        assert_eq!(report.steps[1].units_processed, 1);
        assert_eq!(report.units_completed(), 1);
        assert_eq!(report.unprocessed, vec![0, 2]);
        // Conservation: completed ≤ seeded, strict because refusals occurred.
        assert!(report.units_completed() < 3);
        assert!(report.refusal_count() > 0);
        // Budget respected at all times.
        assert!(report.resources[1].busy <= SimDuration(3));
    }

    #[test]
    fn log_timestamps_are_monotonic() {
        let report = SimBuilder::new(config(
            6,
            vec![
                resource("ra", 2, None, 1.0),
                resource("rb", 1, Some(9), 2.0),
            ],
            vec![step("a", "ra", 2, 3), step("b", "rb", 1, 4)],
        ))
        .build()
        .unwrap()
        .run(&mut NoopObserver);

        assert!(
            report.log.windows(2).all(|w| w[0].at <= w[1].at),
            "log out of order: {:?}",
            report.log
        );
    }

    #[test]
    fn identical_configs_replay_identically() {
        let make = || {
            SimBuilder::new(config(
                7,
                vec![
                    resource("ra", 2, Some(40), 12.5),
                    resource("rb", 1, Some(6), 30.0),
                ],
                vec![step("a", "ra", 2, 4), step("b", "rb", 3, 2)],
            ))
            .build()
            .unwrap()
            .run(&mut NoopObserver)
        };
        assert_eq!(make(), make());
    }

    #[test]
    fn horizon_cuts_the_run_short() {
        // Three 10-second sets would end at t=30; a 25 s horizon stops the
        // run after the second completes.
        let report = SimBuilder::new(config(
            5,
            vec![resource("r", 1, None, 0.0)],
            vec![step("s", "r", 1, 10)],
        ))
        .horizon(SimDuration(25))
        .build()
        .unwrap()
        .run(&mut NoopObserver);

        assert_eq!(report.outcome, FlowOutcome::HorizonReached);
        assert_eq!(report.elapsed, SimDuration(25));
        assert_eq!(report.steps[0].units_processed, 2);
        assert_eq!(report.unprocessed, vec![3]);
        // The third set started but never completed.
        let starts = report.log.iter().filter(|e| e.kind == LogKind::Start).count();
        let ends = report.log.iter().filter(|e| e.kind == LogKind::End).count();
        assert_eq!(starts, 3);
        assert_eq!(ends, 2);
    }

    #[test]
    fn single_unit_visits_every_step_once() {
        let report = SimBuilder::new(config(
            1,
            vec![resource("r", 1, None, 0.0)],
            vec![
                step("a", "r", 4, 2),
                step("b", "r", 4, 3),
                step("c", "r", 4, 4),
            ],
        ))
        .build()
        .unwrap()
        .run(&mut NoopObserver);

        assert_eq!(report.outcome, FlowOutcome::Drained);
        for stats in &report.steps {
            assert_eq!(stats.executions, 1);
            assert_eq!(stats.units_processed, 1);
        }
        assert_eq!(report.elapsed, SimDuration(9));
    }
}

// ── Builder validation ────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::SimError;
    use fl_core::ConfigError;

    #[test]
    fn unknown_resource_fails_loudly_before_running() {
        let result = SimBuilder::new(config(
            1,
            vec![resource("r", 1, None, 0.0)],
            vec![step("s", "ghost", 1, 5)],
        ))
        .build();
        assert!(matches!(
            result.unwrap_err(),
            SimError::Config(ConfigError::UnknownResource { .. })
        ));
    }

    #[test]
    fn duplicate_resources_rejected() {
        let result = SimBuilder::new(config(
            1,
            vec![resource("r", 1, None, 0.0), resource("r", 2, None, 0.0)],
            vec![step("s", "r", 1, 5)],
        ))
        .build();
        assert!(matches!(
            result.unwrap_err(),
            SimError::Config(ConfigError::DuplicateResource(_))
        ));
    }

    #[test]
    fn builder_horizon_overrides_config() {
        let mut cfg = config(
            1,
            vec![resource("r", 1, None, 0.0)],
            vec![step("s", "r", 1, 5)],
        );
        cfg.horizon = Some(SimDuration(1_000));
        let sim = SimBuilder::new(cfg).horizon(SimDuration(2)).build().unwrap();
        assert_eq!(sim.scenario().horizon, Some(SimDuration(2)));
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader_tests {
    use super::*;
    use crate::{load_config_readers, SimError};
    use std::io::Cursor;

    const RESOURCES_CSV: &str = "\
name,capacity,availability,cost_rate
oven,2,01:00:00,50.0
packer,1,,10.0
";

    const STEPS_CSV: &str = "\
name,resource,capacity,duration
bake,oven,4,00:05:00
pack,packer,1,45
";

    #[test]
    fn loads_both_files() {
        let cfg =
            load_config_readers(Cursor::new(RESOURCES_CSV), Cursor::new(STEPS_CSV), 20).unwrap();

        assert_eq!(cfg.unit_count, 20);
        assert_eq!(cfg.resources.len(), 2);
        assert_eq!(cfg.resources[0].name, "oven");
        assert_eq!(cfg.resources[0].availability, Some(SimDuration(3_600)));
        // Empty availability field = unconstrained.
        assert_eq!(cfg.resources[1].availability, None);

        assert_eq!(cfg.steps.len(), 2);
        assert_eq!(cfg.steps[0].duration, SimDuration(300));
        // Plain-seconds form.
        assert_eq!(cfg.steps[1].duration, SimDuration(45));
    }

    #[test]
    fn loaded_config_runs_end_to_end() {
        let cfg =
            load_config_readers(Cursor::new(RESOURCES_CSV), Cursor::new(STEPS_CSV), 8).unwrap();
        let report = SimBuilder::new(cfg).build().unwrap().run(&mut NoopObserver);
        assert_eq!(report.outcome, FlowOutcome::Drained);
        assert_eq!(report.units_completed(), 8);
        // bake: 2 sets × 300 s; pack: 8 sets × 45 s.
        assert_eq!(report.elapsed, SimDuration(2 * 300 + 8 * 45));
    }

    #[test]
    fn malformed_duration_is_a_parse_error() {
        let steps = "name,resource,capacity,duration\nbake,oven,4,soon\n";
        let result =
            load_config_readers(Cursor::new(RESOURCES_CSV), Cursor::new(steps), 1);
        assert!(matches!(result.unwrap_err(), SimError::Parse(_)));
    }

    #[test]
    fn out_of_range_minutes_rejected() {
        let steps = "name,resource,capacity,duration\nbake,oven,4,00:61:00\n";
        let result =
            load_config_readers(Cursor::new(RESOURCES_CSV), Cursor::new(steps), 1);
        assert!(matches!(result.unwrap_err(), SimError::Parse(_)));
    }
}
