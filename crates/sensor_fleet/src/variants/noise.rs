//! Noise level sensor: A-weighted decibel readings over a surroundings-class
//! baseline, with occasional loud events and a spectral breakdown.

use std::collections::BTreeMap;

use contracts::{MetricMap, MetricValue};
use serde_json::{json, Value};

use super::{name_contains, ReadingCtx, VariantState};
use crate::FleetRng;

fn surroundings(name: &str) -> &'static str {
    if name_contains(name, &["highway", "freeway", "airport"]) {
        "highway"
    } else if name_contains(name, &["downtown", "commercial", "business"]) {
        "urban"
    } else if name_contains(name, &["park", "garden", "quiet"]) {
        "park"
    } else {
        "residential"
    }
}

pub(crate) fn seed(
    name: &str,
    rng: &mut FleetRng,
    baseline: &mut BTreeMap<String, f64>,
    metadata: &mut BTreeMap<String, Value>,
) -> VariantState {
    let class = surroundings(name);
    let base_level = match class {
        "highway" => rng.uniform(70.0, 85.0),
        "urban" => rng.uniform(55.0, 70.0),
        "park" => rng.uniform(35.0, 50.0),
        _ => rng.uniform(45.0, 60.0),
    };
    baseline.insert("decibel_level".into(), base_level);

    metadata.insert("location_type".into(), json!(class));
    metadata.insert("measurement_standard".into(), json!("A-weighted"));
    metadata.insert("sampling_rate".into(), json!("1Hz"));
    metadata.insert("frequency_range".into(), json!("20Hz-20kHz"));

    VariantState::Noise
}

pub(crate) fn base_reading(ctx: &mut ReadingCtx<'_>) -> MetricMap {
    let hour = ctx.clock.hour();
    let time_factor = if (7..=9).contains(&hour) || (17..=19).contains(&hour) {
        ctx.rng.uniform(1.2, 1.5)
    } else if hour >= 22 || hour <= 6 {
        ctx.rng.uniform(0.6, 0.8)
    } else {
        ctx.rng.uniform(0.9, 1.1)
    };
    let weekend_factor = if ctx.clock.is_weekend() {
        ctx.rng.uniform(0.8, 0.9)
    } else {
        1.0
    };

    let base_level = ctx.baseline.get("decibel_level").copied().unwrap_or(50.0);
    let mut current = base_level * time_factor * weekend_factor;

    // Sirens, construction and the like.
    if ctx.rng.chance(0.05) {
        current += ctx.rng.uniform(10.0, 25.0);
    }

    let spectrum: BTreeMap<String, f64> = [
        ("low_freq".to_string(), round2(ctx.rng.uniform(0.2, 0.4))),
        ("mid_freq".to_string(), round2(ctx.rng.uniform(0.3, 0.5))),
        ("high_freq".to_string(), round2(ctx.rng.uniform(0.1, 0.3))),
    ]
    .into();

    MetricMap::from([
        (
            "decibel_level".to_string(),
            MetricValue::Number(current.clamp(30.0, 120.0)),
        ),
        (
            "peak_level".to_string(),
            MetricValue::Number(current + ctx.rng.uniform(5.0, 15.0)),
        ),
        (
            "minimum_level".to_string(),
            MetricValue::Number(current - ctx.rng.uniform(5.0, 10.0)),
        ),
        (
            "frequency_analysis".to_string(),
            MetricValue::Nested(spectrum),
        ),
    ])
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
