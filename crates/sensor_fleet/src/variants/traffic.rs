//! Traffic flow sensor: vehicle counts, speeds and a derived congestion
//! level, with rush-hour and night patterns on top of a road-class baseline.

use std::collections::BTreeMap;

use contracts::{MetricMap, MetricValue};
use serde_json::{json, Value};

use super::{name_contains, ReadingCtx, VariantState};
use crate::FleetRng;

#[derive(Debug, Clone)]
pub struct TrafficState {
    speed_limit: f64,
}

fn road_class(name: &str) -> &'static str {
    if name_contains(name, &["highway", "freeway", "interstate"]) {
        "highway"
    } else if name_contains(name, &["avenue", "boulevard", "parkway"]) {
        "arterial"
    } else {
        "local"
    }
}

pub(crate) fn seed(
    name: &str,
    rng: &mut FleetRng,
    baseline: &mut BTreeMap<String, f64>,
    metadata: &mut BTreeMap<String, Value>,
) -> VariantState {
    let class = road_class(name);
    let (vehicles, speed, congestion) = match class {
        "highway" => (
            rng.int_range(80, 150),
            rng.int_range(45, 65),
            rng.int_range(20, 40),
        ),
        "arterial" => (
            rng.int_range(40, 80),
            rng.int_range(25, 45),
            rng.int_range(15, 35),
        ),
        _ => (
            rng.int_range(10, 40),
            rng.int_range(15, 35),
            rng.int_range(5, 25),
        ),
    };

    baseline.insert("vehicle_count".into(), vehicles as f64);
    baseline.insert("average_speed".into(), speed as f64);
    baseline.insert("congestion_level".into(), congestion as f64);

    let speed_limit = (speed + rng.int_range(5, 15)) as f64;
    metadata.insert("location_type".into(), json!(class));
    metadata.insert("lanes".into(), json!(rng.int_range(2, 6)));
    metadata.insert("speed_limit".into(), json!(speed_limit));

    VariantState::Traffic(TrafficState { speed_limit })
}

pub(crate) fn base_reading(state: &mut TrafficState, ctx: &mut ReadingCtx<'_>) -> MetricMap {
    let base_vehicles = ctx.baseline.get("vehicle_count").copied().unwrap_or(50.0);
    let base_speed = ctx.baseline.get("average_speed").copied().unwrap_or(30.0);

    let mut vehicle_count = (base_vehicles + ctx.rng.int_range(-20, 20) as f64).max(0.0);
    let mut average_speed = (base_speed + ctx.rng.int_range(-10, 10) as f64).max(5.0);

    // Congestion: density against capacity plus speed deficit against the limit.
    let capacity = base_vehicles * 1.5;
    let speed_factor = ((state.speed_limit - average_speed) / state.speed_limit).max(0.0);
    let density_factor = vehicle_count / capacity;
    let mut congestion = (density_factor * 60.0 + speed_factor * 40.0).min(100.0);

    let hour = ctx.clock.hour();
    if (7..=9).contains(&hour) || (17..=19).contains(&hour) {
        vehicle_count *= ctx.rng.uniform(1.3, 1.8);
        average_speed *= ctx.rng.uniform(0.6, 0.8);
        congestion *= ctx.rng.uniform(1.4, 2.0);
    } else if hour >= 22 || hour <= 5 {
        vehicle_count *= ctx.rng.uniform(0.2, 0.4);
        average_speed *= ctx.rng.uniform(1.1, 1.3);
        congestion *= ctx.rng.uniform(0.1, 0.3);
    }

    if ctx.clock.is_weekend() {
        vehicle_count *= ctx.rng.uniform(0.7, 0.9);
        congestion *= ctx.rng.uniform(0.6, 0.8);
    }

    MetricMap::from([
        (
            "vehicle_count".to_string(),
            MetricValue::Number(vehicle_count.max(0.0)),
        ),
        (
            "average_speed".to_string(),
            MetricValue::Number(average_speed.max(5.0)),
        ),
        (
            "congestion_level".to_string(),
            MetricValue::Number(congestion.clamp(0.0, 100.0)),
        ),
        (
            "lane_occupancy".to_string(),
            MetricValue::Number(ctx.rng.uniform(10.0, 80.0)),
        ),
        (
            "heavy_vehicle_percentage".to_string(),
            MetricValue::Number(ctx.rng.uniform(5.0, 25.0)),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TickClock;

    fn seeded(name: &str) -> (TrafficState, BTreeMap<String, f64>, FleetRng) {
        let mut rng = FleetRng::seeded(3, 0);
        let mut baseline = BTreeMap::new();
        let mut metadata = BTreeMap::new();
        let VariantState::Traffic(state) = seed(name, &mut rng, &mut baseline, &mut metadata)
        else {
            unreachable!()
        };
        (state, baseline, rng)
    }

    #[test]
    fn road_class_from_name() {
        assert_eq!(road_class("Highway 9 Gantry"), "highway");
        assert_eq!(road_class("Fifth Avenue Mid"), "arterial");
        assert_eq!(road_class("Traffic Sensor 4"), "local");
    }

    #[test]
    fn highway_baseline_outpaces_local() {
        let (_, highway, _) = seeded("Interstate 95 Sensor");
        let (_, local, _) = seeded("Traffic Sensor 1");
        assert!(highway["vehicle_count"] >= 80.0);
        assert!(local["vehicle_count"] <= 40.0);
    }

    #[test]
    fn rush_hour_beats_night_on_average() {
        let (mut state, mut baseline, mut rng) = seeded("Traffic Sensor 2");
        let rush = TickClock::fixed(2026, 1, 5, 8, 0, 0);
        let night = TickClock::fixed(2026, 1, 5, 3, 0, 0);

        let mut total_rush = 0.0;
        let mut total_night = 0.0;
        for _ in 0..50 {
            let mut ctx = ReadingCtx {
                baseline: &mut baseline,
                rng: &mut rng,
                clock: &rush,
                last_reading: None,
            };
            let reading = base_reading(&mut state, &mut ctx);
            total_rush += reading["vehicle_count"].as_number().unwrap();

            let mut ctx = ReadingCtx {
                baseline: &mut baseline,
                rng: &mut rng,
                clock: &night,
                last_reading: None,
            };
            let reading = base_reading(&mut state, &mut ctx);
            total_night += reading["vehicle_count"].as_number().unwrap();
        }
        assert!(total_rush > total_night);
    }

    #[test]
    fn speed_floor_holds() {
        let (mut state, mut baseline, mut rng) = seeded("Traffic Sensor 3");
        let clock = TickClock::fixed(2026, 1, 5, 8, 0, 0);
        for _ in 0..100 {
            let mut ctx = ReadingCtx {
                baseline: &mut baseline,
                rng: &mut rng,
                clock: &clock,
                last_reading: None,
            };
            let reading = base_reading(&mut state, &mut ctx);
            assert!(reading["average_speed"].as_number().unwrap() >= 5.0);
            assert!(reading["congestion_level"].as_number().unwrap() <= 100.0);
            assert!(reading["vehicle_count"].as_number().unwrap() >= 0.0);
        }
    }
}
