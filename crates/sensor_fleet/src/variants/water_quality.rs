//! Water quality sensor: chemistry baselines with seasonal temperature and
//! the dissolved-oxygen/temperature inverse relationship.

use std::collections::BTreeMap;

use contracts::{MetricMap, MetricValue};
use serde_json::{json, Value};

use super::{ReadingCtx, VariantState};
use crate::FleetRng;

pub(crate) fn seed(
    rng: &mut FleetRng,
    baseline: &mut BTreeMap<String, f64>,
    metadata: &mut BTreeMap<String, Value>,
) -> VariantState {
    baseline.insert("ph".into(), rng.uniform(6.8, 7.8));
    baseline.insert("turbidity".into(), rng.uniform(0.5, 3.0));
    baseline.insert("dissolved_oxygen".into(), rng.uniform(7.0, 12.0));
    baseline.insert("temperature".into(), rng.uniform(15.0, 25.0));
    baseline.insert("conductivity".into(), rng.uniform(200.0, 800.0));
    baseline.insert("chlorine".into(), rng.uniform(0.2, 1.0));

    metadata.insert(
        "water_source".into(),
        json!(rng.pick(&["river", "lake", "reservoir", "treatment_plant"])),
    );
    metadata.insert("depth".into(), json!(rng.uniform(0.5, 3.0)));
    metadata.insert("flow_rate".into(), json!(rng.uniform(0.1, 2.0)));

    VariantState::WaterQuality
}

fn seasonal_factor(month: u32, rng: &mut FleetRng) -> f64 {
    match month {
        3..=5 => rng.uniform(0.8, 1.0),
        6..=8 => rng.uniform(1.1, 1.3),
        9..=11 => rng.uniform(0.9, 1.1),
        _ => rng.uniform(0.6, 0.8),
    }
}

pub(crate) fn base_reading(ctx: &mut ReadingCtx<'_>) -> MetricMap {
    let base = |field: &str, fallback: f64| ctx.baseline.get(field).copied().unwrap_or(fallback);

    let temp_factor = seasonal_factor(ctx.clock.month(), ctx.rng);
    let temperature = base("temperature", 20.0) * temp_factor;

    let ph = (base("ph", 7.2) + ctx.rng.uniform(-0.3, 0.3)).clamp(6.0, 8.5);

    // Warm water holds less oxygen.
    let do_factor = 1.2 - (temperature - 15.0) * 0.02;
    let dissolved_oxygen = (base("dissolved_oxygen", 9.0) * do_factor).max(4.0);

    MetricMap::from([
        ("ph".to_string(), MetricValue::Number(ph)),
        (
            "turbidity".to_string(),
            MetricValue::Number((base("turbidity", 1.5) + ctx.rng.uniform(-1.0, 2.0)).max(0.0)),
        ),
        (
            "dissolved_oxygen".to_string(),
            MetricValue::Number(dissolved_oxygen),
        ),
        ("temperature".to_string(), MetricValue::Number(temperature)),
        (
            "conductivity".to_string(),
            MetricValue::Number(base("conductivity", 500.0) + ctx.rng.uniform(-100.0, 100.0)),
        ),
        (
            "chlorine".to_string(),
            MetricValue::Number((base("chlorine", 0.6) + ctx.rng.uniform(-0.3, 0.2)).max(0.0)),
        ),
        (
            "ammonia".to_string(),
            MetricValue::Number(ctx.rng.uniform(0.0, 0.5)),
        ),
        (
            "nitrates".to_string(),
            MetricValue::Number(ctx.rng.uniform(0.0, 10.0)),
        ),
    ])
}
