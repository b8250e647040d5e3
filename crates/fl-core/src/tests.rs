//! Unit tests for fl-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ResourceId, StepId, TaskId};

    #[test]
    fn index_roundtrip() {
        let id = StepId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(StepId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(StepId(0) < StepId(1));
        assert!(ResourceId(100) > ResourceId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(StepId::INVALID.0, u16::MAX);
        assert_eq!(ResourceId::INVALID.0, u16::MAX);
        assert_eq!(TaskId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(StepId(7).to_string(), "StepId(7)");
    }
}

#[cfg(test)]
mod time {
    use crate::{SimDuration, SimTime};

    #[test]
    fn duration_from_hms() {
        assert_eq!(SimDuration::from_hms(0, 0, 5), SimDuration(5));
        assert_eq!(SimDuration::from_hms(0, 2, 30), SimDuration(150));
        assert_eq!(SimDuration::from_hms(1, 0, 0), SimDuration(3_600));
        assert_eq!(SimDuration::from_hms(2, 30, 15), SimDuration(9_015));
    }

    #[test]
    fn time_arithmetic() {
        let t = SimTime(10);
        assert_eq!(t + SimDuration(5), SimTime(15));
        assert_eq!(SimTime(15) - SimTime(10), SimDuration(5));
        assert_eq!(SimTime(15).since(SimTime(10)), SimDuration(5));
        assert_eq!(SimTime(25).elapsed(), SimDuration(25));
    }

    #[test]
    fn duration_arithmetic() {
        let mut d = SimDuration(10);
        d += SimDuration(5);
        assert_eq!(d, SimDuration(15));
        assert_eq!(SimDuration(5) * 3, SimDuration(15));
        assert!(SimDuration::ZERO.is_zero());
        assert!(!SimDuration(1).is_zero());
    }

    #[test]
    fn hms_display() {
        assert_eq!(SimTime(0).to_string(), "00:00:00");
        assert_eq!(SimTime(5).to_string(), "00:00:05");
        assert_eq!(SimTime(65).to_string(), "00:01:05");
        assert_eq!(SimTime(3_661).to_string(), "01:01:01");
        assert_eq!(SimDuration(9_015).to_string(), "02:30:15");
        // hours widen past two digits instead of wrapping
        assert_eq!(SimTime(360_000).to_string(), "100:00:00");
    }
}

#[cfg(test)]
mod config {
    use crate::{ConfigError, ResourceDef, ResourceId, SimConfig, SimDuration, StepDef};

    fn resource(name: &str) -> ResourceDef {
        ResourceDef {
            name:         name.to_string(),
            capacity:     1,
            availability: None,
            cost_rate:    0.0,
        }
    }

    fn step(name: &str, resource: &str) -> StepDef {
        StepDef {
            name:     name.to_string(),
            resource: resource.to_string(),
            capacity: 1,
            duration: SimDuration(5),
        }
    }

    fn config(resources: Vec<ResourceDef>, steps: Vec<StepDef>) -> SimConfig {
        SimConfig { unit_count: 10, resources, steps, horizon: None }
    }

    #[test]
    fn resolve_binds_resource_ids() {
        let cfg = config(
            vec![resource("mill"), resource("lathe")],
            vec![step("cut", "lathe"), step("polish", "mill")],
        );
        let scenario = cfg.resolve().unwrap();
        assert_eq!(scenario.steps[0].resource, ResourceId(1));
        assert_eq!(scenario.steps[1].resource, ResourceId(0));
        assert_eq!(scenario.resource_for(&scenario.steps[0]).name, "lathe");
    }

    #[test]
    fn zero_units_rejected() {
        let mut cfg = config(vec![resource("r")], vec![step("s", "r")]);
        cfg.unit_count = 0;
        assert_eq!(cfg.resolve().unwrap_err(), ConfigError::ZeroUnits);
    }

    #[test]
    fn empty_step_list_rejected() {
        let cfg = config(vec![resource("r")], vec![]);
        assert_eq!(cfg.resolve().unwrap_err(), ConfigError::NoSteps);
    }

    #[test]
    fn duplicate_resource_rejected() {
        let cfg = config(vec![resource("r"), resource("r")], vec![step("s", "r")]);
        assert_eq!(
            cfg.resolve().unwrap_err(),
            ConfigError::DuplicateResource("r".to_string())
        );
    }

    #[test]
    fn unknown_resource_reference_rejected() {
        let cfg = config(vec![resource("r")], vec![step("s", "ghost")]);
        assert_eq!(
            cfg.resolve().unwrap_err(),
            ConfigError::UnknownResource {
                step:     "s".to_string(),
                resource: "ghost".to_string(),
            }
        );
    }

    #[test]
    fn zero_capacity_rejected() {
        let mut bad_res = resource("r");
        bad_res.capacity = 0;
        let cfg = config(vec![bad_res], vec![step("s", "r")]);
        assert!(matches!(
            cfg.resolve().unwrap_err(),
            ConfigError::ZeroCapacity { what: "resource", .. }
        ));

        let mut bad_step = step("s", "r");
        bad_step.capacity = 0;
        let cfg = config(vec![resource("r")], vec![bad_step]);
        assert!(matches!(
            cfg.resolve().unwrap_err(),
            ConfigError::ZeroCapacity { what: "step", .. }
        ));
    }

    #[test]
    fn empty_names_rejected() {
        let cfg = config(vec![resource("")], vec![step("s", "")]);
        assert_eq!(
            cfg.resolve().unwrap_err(),
            ConfigError::EmptyName { what: "resource" }
        );
    }

    #[test]
    fn negative_cost_rate_rejected() {
        let mut res = resource("r");
        res.cost_rate = -1.0;
        let cfg = config(vec![res], vec![step("s", "r")]);
        assert_eq!(
            cfg.resolve().unwrap_err(),
            ConfigError::NegativeCostRate("r".to_string())
        );
    }

    #[test]
    fn zero_availability_is_valid_config() {
        // A zero budget is a legal configuration: the resource exists but can
        // never admit an execution.  Refusal is a runtime event, not a
        // configuration error.
        let mut res = resource("r");
        res.availability = Some(SimDuration::ZERO);
        let cfg = config(vec![res], vec![step("s", "r")]);
        assert!(cfg.resolve().is_ok());
    }
}
