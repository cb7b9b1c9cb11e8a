//! Plan validation
//!
//! Rules:
//! - collector endpoint non-empty, http/https
//! - tick_interval_secs > 0, worker_count >= 1, batch_size >= 1
//! - landmark_bias within [0, 1]
//! - city bounds form a proper rectangle, landmarks inside lat/lng ranges
//! - at least one sensor configured

use contracts::{ContractError, SimulationPlan};

/// Validate a SimulationPlan
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(plan: &SimulationPlan) -> Result<(), ContractError> {
    validate_collector(plan)?;
    validate_schedule(plan)?;
    validate_city(plan)?;
    validate_fleet(plan)?;
    Ok(())
}

fn validate_collector(plan: &SimulationPlan) -> Result<(), ContractError> {
    let endpoint = plan.collector.endpoint.trim();
    if endpoint.is_empty() {
        return Err(ContractError::config_validation(
            "collector.endpoint",
            "endpoint must not be empty",
        ));
    }
    if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
        return Err(ContractError::config_validation(
            "collector.endpoint",
            format!("endpoint must be http(s), got '{endpoint}'"),
        ));
    }
    if plan.collector.request_timeout_secs == 0 {
        return Err(ContractError::config_validation(
            "collector.request_timeout_secs",
            "request timeout must be >= 1",
        ));
    }
    Ok(())
}

fn validate_schedule(plan: &SimulationPlan) -> Result<(), ContractError> {
    let schedule = &plan.schedule;

    if schedule.tick_interval_secs <= 0.0 {
        return Err(ContractError::config_validation(
            "schedule.tick_interval_secs",
            format!(
                "tick_interval_secs must be > 0, got {}",
                schedule.tick_interval_secs
            ),
        ));
    }
    if schedule.worker_count == 0 {
        return Err(ContractError::config_validation(
            "schedule.worker_count",
            "worker_count must be >= 1",
        ));
    }
    if schedule.batch_size == 0 {
        return Err(ContractError::config_validation(
            "schedule.batch_size",
            "batch_size must be >= 1",
        ));
    }
    if schedule.stats_interval_secs == 0 {
        return Err(ContractError::config_validation(
            "schedule.stats_interval_secs",
            "stats_interval_secs must be >= 1",
        ));
    }
    Ok(())
}

fn validate_city(plan: &SimulationPlan) -> Result<(), ContractError> {
    let city = &plan.city;

    if !(0.0..=1.0).contains(&city.landmark_bias) {
        return Err(ContractError::config_validation(
            "city.landmark_bias",
            format!("landmark_bias must be in [0, 1], got {}", city.landmark_bias),
        ));
    }

    let bounds = &city.bounds;
    if bounds.south >= bounds.north {
        return Err(ContractError::config_validation(
            "city.bounds",
            format!(
                "south ({}) must be < north ({})",
                bounds.south, bounds.north
            ),
        ));
    }
    if bounds.west >= bounds.east {
        return Err(ContractError::config_validation(
            "city.bounds",
            format!("west ({}) must be < east ({})", bounds.west, bounds.east),
        ));
    }

    for landmark in &city.landmarks {
        if !(-90.0..=90.0).contains(&landmark.latitude)
            || !(-180.0..=180.0).contains(&landmark.longitude)
        {
            return Err(ContractError::config_validation(
                format!("city.landmarks[label={}]", landmark.label),
                "landmark coordinates out of range",
            ));
        }
    }
    Ok(())
}

fn validate_fleet(plan: &SimulationPlan) -> Result<(), ContractError> {
    if plan.fleet.total() == 0 {
        return Err(ContractError::config_validation(
            "fleet",
            "at least one sensor must be configured",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{CollectorConfig, SimulationPlan};

    fn sample_plan() -> SimulationPlan {
        SimulationPlan {
            version: Default::default(),
            collector: CollectorConfig {
                endpoint: "http://localhost:3000/api".into(),
                request_timeout_secs: 30,
                health_timeout_secs: 5,
            },
            schedule: Default::default(),
            city: Default::default(),
            fleet: Default::default(),
        }
    }

    #[test]
    fn sample_plan_is_valid() {
        assert!(validate(&sample_plan()).is_ok());
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let mut plan = sample_plan();
        plan.collector.endpoint = "ftp://collector".into();
        let err = validate(&plan).unwrap_err();
        assert!(err.to_string().contains("collector.endpoint"));
    }

    #[test]
    fn rejects_zero_workers() {
        let mut plan = sample_plan();
        plan.schedule.worker_count = 0;
        assert!(validate(&plan).is_err());
    }

    #[test]
    fn rejects_inverted_bounds() {
        let mut plan = sample_plan();
        plan.city.bounds.south = plan.city.bounds.north + 1.0;
        let err = validate(&plan).unwrap_err();
        assert!(err.to_string().contains("city.bounds"));
    }

    #[test]
    fn rejects_bias_above_one() {
        let mut plan = sample_plan();
        plan.city.landmark_bias = 1.5;
        assert!(validate(&plan).is_err());
    }

    #[test]
    fn rejects_empty_fleet() {
        let mut plan = sample_plan();
        plan.fleet = contracts::FleetConfig {
            traffic: 0,
            waste: 0,
            air_quality: 0,
            noise: 0,
            water_quality: 0,
            energy: 0,
            parking: 0,
        };
        assert!(validate(&plan).is_err());
    }
}
