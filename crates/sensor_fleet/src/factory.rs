//! Fleet factory - turns a plan's fleet counts into live sensors.

use contracts::{SensorKind, SimulationPlan};
use tracing::{debug, info};

use crate::{FleetError, FleetRng, LocationProvider, Sensor, TickClock};

/// Builds the sensor population for one run. Sensor ids carry a single
/// counter across every kind (`traffic_001`, `traffic_002`, `waste_003`, ...)
/// so ids stay unique fleet-wide.
pub struct FleetFactory;

impl FleetFactory {
    /// Build the fleet described by the plan, deterministically from `seed`.
    pub fn build(plan: &SimulationPlan, seed: u64) -> Result<Vec<Sensor>, FleetError> {
        Self::build_at(plan, seed, &TickClock::current())
    }

    /// As [`build`](Self::build) with a pinned creation time.
    pub fn build_at(
        plan: &SimulationPlan,
        seed: u64,
        clock: &TickClock,
    ) -> Result<Vec<Sensor>, FleetError> {
        if plan.fleet.total() == 0 {
            return Err(FleetError::EmptyFleet);
        }

        let provider = LocationProvider::new(plan.city.clone());
        // Stream 0 feeds placement; sensors draw from streams 1..=total.
        let mut placement_rng = FleetRng::seeded(seed, 0);

        let mut sensors = Vec::with_capacity(plan.fleet.total());
        let mut counter: u64 = 0;
        for kind in SensorKind::ALL {
            for _ in 0..plan.fleet.count_for(kind) {
                counter += 1;
                let id = format!("{kind}_{counter:03}");
                let name = format!("{} Sensor {counter}", kind.label());
                let location = provider.assign(&mut placement_rng);
                let sensor = Sensor::new(
                    &id,
                    name,
                    kind,
                    location,
                    FleetRng::seeded(seed, counter),
                    clock,
                );
                debug!(sensor_id = %id, kind = %kind, "sensor created");
                sensors.push(sensor);
            }
        }

        info!(total = sensors.len(), seed, "fleet built");
        Ok(sensors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn plan() -> SimulationPlan {
        SimulationPlan::default()
    }

    #[test]
    fn ids_are_unique_and_share_one_counter() {
        let clock = TickClock::fixed(2026, 1, 5, 12, 0, 0);
        let plan = plan();
        let sensors = FleetFactory::build_at(&plan, 42, &clock).unwrap();
        assert_eq!(sensors.len(), plan.fleet.total());

        let ids: HashSet<&str> = sensors.iter().map(Sensor::id).collect();
        assert_eq!(ids.len(), sensors.len());

        // First sensor is traffic_001; numbering continues across kinds.
        assert_eq!(sensors[0].id(), "traffic_001");
        let first_waste = sensors
            .iter()
            .find(|s| s.kind() == SensorKind::Waste)
            .unwrap();
        let suffix: u64 = first_waste.id()["waste_".len()..].parse().unwrap();
        assert_eq!(suffix as usize, plan.fleet.traffic + 1);
    }

    #[test]
    fn kind_counts_match_the_plan() {
        let clock = TickClock::fixed(2026, 1, 5, 12, 0, 0);
        let plan = plan();
        let sensors = FleetFactory::build_at(&plan, 7, &clock).unwrap();
        for kind in SensorKind::ALL {
            let count = sensors.iter().filter(|s| s.kind() == kind).count();
            assert_eq!(count, plan.fleet.count_for(kind), "{kind}");
        }
    }

    #[test]
    fn same_seed_builds_the_same_fleet() {
        let clock = TickClock::fixed(2026, 1, 5, 12, 0, 0);
        let plan = plan();
        let mut a = FleetFactory::build_at(&plan, 9, &clock).unwrap();
        let mut b = FleetFactory::build_at(&plan, 9, &clock).unwrap();
        for (left, right) in a.iter_mut().zip(b.iter_mut()) {
            assert_eq!(left.descriptor(), right.descriptor());
            assert_eq!(
                left.generate_reading_at(&clock),
                right.generate_reading_at(&clock)
            );
        }
    }

    #[test]
    fn empty_fleet_is_rejected() {
        let clock = TickClock::fixed(2026, 1, 5, 12, 0, 0);
        let mut plan = plan();
        plan.fleet = contracts::FleetConfig {
            traffic: 0,
            waste: 0,
            air_quality: 0,
            noise: 0,
            water_quality: 0,
            energy: 0,
            parking: 0,
        };
        let err = FleetFactory::build_at(&plan, 1, &clock).unwrap_err();
        assert!(matches!(err, FleetError::EmptyFleet));
    }
}
