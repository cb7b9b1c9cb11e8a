//! Parking occupancy sensor: fixed lot size, target occupancy driven by
//! weekday and hour bands.

use std::collections::BTreeMap;

use contracts::{MetricMap, MetricValue};
use serde_json::{json, Value};

use super::{ReadingCtx, VariantState};
use crate::FleetRng;

#[derive(Debug, Clone)]
pub struct ParkingState {
    total_spots: i64,
}

pub(crate) fn seed(
    rng: &mut FleetRng,
    baseline: &mut BTreeMap<String, f64>,
    metadata: &mut BTreeMap<String, Value>,
) -> VariantState {
    let total_spots = rng.int_range(50, 200);
    let occupancy_rate = rng.uniform(0.4, 0.8);

    baseline.insert("total_spots".into(), total_spots as f64);
    baseline.insert(
        "occupied_spots".into(),
        (total_spots as f64 * occupancy_rate).trunc(),
    );
    baseline.insert("occupancy_rate".into(), occupancy_rate * 100.0);

    metadata.insert(
        "parking_type".into(),
        json!(rng.pick(&["street", "garage", "lot"])),
    );
    metadata.insert(
        "pricing_tier".into(),
        json!(rng.pick(&["free", "low", "medium", "high"])),
    );
    metadata.insert(
        "time_limit".into(),
        json!(rng.pick(&[60i64, 120, 180, 240, 480])),
    );

    VariantState::Parking(ParkingState { total_spots })
}

pub(crate) fn base_reading(state: &mut ParkingState, ctx: &mut ReadingCtx<'_>) -> MetricMap {
    let hour = ctx.clock.hour();
    let mut target = if !ctx.clock.is_weekend() {
        if (9..=17).contains(&hour) {
            ctx.rng.uniform(0.7, 0.95)
        } else if (18..=22).contains(&hour) {
            ctx.rng.uniform(0.5, 0.8)
        } else {
            ctx.rng.uniform(0.2, 0.5)
        }
    } else if (10..=20).contains(&hour) {
        ctx.rng.uniform(0.6, 0.9)
    } else {
        ctx.rng.uniform(0.3, 0.6)
    };

    target = (target + ctx.rng.uniform(-0.1, 0.1)).clamp(0.0, 1.0);

    let total = state.total_spots as f64;
    let occupied = (total * target).trunc();
    let available = total - occupied;
    let occupancy_rate = occupied / total * 100.0;

    MetricMap::from([
        ("total_spots".to_string(), MetricValue::Number(total)),
        ("occupied_spots".to_string(), MetricValue::Number(occupied)),
        (
            "available_spots".to_string(),
            MetricValue::Number(available),
        ),
        (
            "occupancy_rate".to_string(),
            MetricValue::Number(occupancy_rate),
        ),
        (
            "turnover_rate".to_string(),
            MetricValue::Number(ctx.rng.uniform(0.1, 0.8)),
        ),
        (
            "average_duration".to_string(),
            MetricValue::Number(ctx.rng.int_range(30, 240) as f64),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TickClock;

    #[test]
    fn occupancy_accounting_adds_up() {
        let mut rng = FleetRng::seeded(5, 0);
        let mut baseline = BTreeMap::new();
        let mut metadata = BTreeMap::new();
        let VariantState::Parking(mut state) = seed(&mut rng, &mut baseline, &mut metadata)
        else {
            unreachable!()
        };

        let clock = TickClock::fixed(2026, 1, 5, 11, 0, 0);
        for _ in 0..50 {
            let mut ctx = ReadingCtx {
                baseline: &mut baseline,
                rng: &mut rng,
                clock: &clock,
                last_reading: None,
            };
            let reading = base_reading(&mut state, &mut ctx);
            let total = reading["total_spots"].as_number().unwrap();
            let occupied = reading["occupied_spots"].as_number().unwrap();
            let available = reading["available_spots"].as_number().unwrap();
            assert_eq!(total, occupied + available);
            assert!((0.0..=100.0).contains(&reading["occupancy_rate"].as_number().unwrap()));
        }
    }

    #[test]
    fn business_hours_run_fuller_than_nights() {
        let mut rng = FleetRng::seeded(5, 1);
        let mut baseline = BTreeMap::new();
        let mut metadata = BTreeMap::new();
        let VariantState::Parking(mut state) = seed(&mut rng, &mut baseline, &mut metadata)
        else {
            unreachable!()
        };

        let midday = TickClock::fixed(2026, 1, 5, 13, 0, 0);
        let night = TickClock::fixed(2026, 1, 5, 2, 0, 0);
        let mut day_total = 0.0;
        let mut night_total = 0.0;
        for _ in 0..50 {
            let mut ctx = ReadingCtx {
                baseline: &mut baseline,
                rng: &mut rng,
                clock: &midday,
                last_reading: None,
            };
            day_total += base_reading(&mut state, &mut ctx)["occupancy_rate"]
                .as_number()
                .unwrap();
            let mut ctx = ReadingCtx {
                baseline: &mut baseline,
                rng: &mut rng,
                clock: &night,
                last_reading: None,
            };
            night_total += base_reading(&mut state, &mut ctx)["occupancy_rate"]
                .as_number()
                .unwrap();
        }
        assert!(day_total > night_total);
    }
}
