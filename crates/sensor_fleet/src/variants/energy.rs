//! Energy meter sensor: building-type consumption bands, hourly load curves
//! and derived electrical quantities.

use std::collections::BTreeMap;

use contracts::{MetricMap, MetricValue};
use serde_json::{json, Value};

use super::{ReadingCtx, VariantState};
use crate::FleetRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildingType {
    Residential,
    Commercial,
    Industrial,
    Municipal,
}

impl BuildingType {
    fn as_str(self) -> &'static str {
        match self {
            BuildingType::Residential => "residential",
            BuildingType::Commercial => "commercial",
            BuildingType::Industrial => "industrial",
            BuildingType::Municipal => "municipal",
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnergyState {
    building: BuildingType,
}

pub(crate) fn seed(
    rng: &mut FleetRng,
    baseline: &mut BTreeMap<String, f64>,
    metadata: &mut BTreeMap<String, Value>,
) -> VariantState {
    let building = *rng.pick(&[
        BuildingType::Residential,
        BuildingType::Commercial,
        BuildingType::Industrial,
        BuildingType::Municipal,
    ]);
    let consumption = match building {
        BuildingType::Residential => rng.uniform(2.0, 8.0),
        BuildingType::Commercial => rng.uniform(10.0, 50.0),
        BuildingType::Industrial => rng.uniform(50.0, 200.0),
        BuildingType::Municipal => rng.uniform(5.0, 25.0),
    };

    baseline.insert("consumption".into(), consumption);
    baseline.insert("voltage".into(), rng.uniform(220.0, 240.0));
    baseline.insert("current".into(), consumption / 230.0);
    baseline.insert("power_factor".into(), rng.uniform(0.85, 0.95));

    metadata.insert("building_type".into(), json!(building.as_str()));
    metadata.insert(
        "meter_type".into(),
        json!(rng.pick(&["smart", "digital", "analog"])),
    );
    metadata.insert("phase".into(), json!(rng.pick(&["single", "three"])));
    metadata.insert(
        "rated_capacity".into(),
        json!(consumption * rng.uniform(1.5, 3.0)),
    );

    VariantState::Energy(EnergyState { building })
}

fn load_factor(building: BuildingType, hour: u32, rng: &mut FleetRng) -> f64 {
    match building {
        BuildingType::Residential => {
            if (6..=9).contains(&hour) || (17..=22).contains(&hour) {
                rng.uniform(1.3, 1.8)
            } else if hour >= 23 || hour <= 5 {
                rng.uniform(0.4, 0.7)
            } else {
                rng.uniform(0.8, 1.2)
            }
        }
        BuildingType::Commercial => {
            if (8..=18).contains(&hour) {
                rng.uniform(1.2, 1.6)
            } else if (19..=22).contains(&hour) {
                rng.uniform(0.6, 0.9)
            } else {
                rng.uniform(0.2, 0.4)
            }
        }
        BuildingType::Industrial => {
            if (6..=22).contains(&hour) {
                rng.uniform(0.9, 1.1)
            } else {
                rng.uniform(0.7, 0.9)
            }
        }
        BuildingType::Municipal => {
            if (6..=22).contains(&hour) {
                rng.uniform(1.0, 1.3)
            } else {
                rng.uniform(0.6, 0.8)
            }
        }
    }
}

pub(crate) fn base_reading(state: &mut EnergyState, ctx: &mut ReadingCtx<'_>) -> MetricMap {
    let base = |field: &str, fallback: f64| ctx.baseline.get(field).copied().unwrap_or(fallback);

    let mut factor = load_factor(state.building, ctx.clock.hour(), ctx.rng);
    if ctx.clock.is_weekend() {
        match state.building {
            BuildingType::Commercial => factor *= ctx.rng.uniform(0.3, 0.6),
            BuildingType::Residential => factor *= ctx.rng.uniform(1.1, 1.3),
            _ => {}
        }
    }

    let consumption = (base("consumption", 10.0) * factor).max(0.0);
    let voltage = (base("voltage", 230.0) + ctx.rng.uniform(-5.0, 5.0)).clamp(200.0, 250.0);
    let current = (consumption / (voltage / 1000.0)).max(0.0);
    let power_factor =
        (base("power_factor", 0.9) + ctx.rng.uniform(-0.05, 0.05)).clamp(0.7, 1.0);

    let apparent_power = consumption / power_factor;
    let reactive_power = (apparent_power.powi(2) - consumption.powi(2)).max(0.0).sqrt();

    MetricMap::from([
        ("consumption".to_string(), MetricValue::Number(consumption)),
        ("voltage".to_string(), MetricValue::Number(voltage)),
        ("current".to_string(), MetricValue::Number(current)),
        (
            "power_factor".to_string(),
            MetricValue::Number(power_factor),
        ),
        (
            "apparent_power".to_string(),
            MetricValue::Number(apparent_power),
        ),
        (
            "reactive_power".to_string(),
            MetricValue::Number(reactive_power),
        ),
        (
            "frequency".to_string(),
            MetricValue::Number(50.0 + ctx.rng.uniform(-0.2, 0.2)),
        ),
        (
            "energy_today".to_string(),
            MetricValue::Number(consumption * ctx.rng.uniform(8.0, 16.0)),
        ),
    ])
}
