//! Per-kind domain models.
//!
//! Each module owns the baseline seeding and the base-reading generation for
//! one sensor kind. The shared pipeline in `pipeline.rs` never looks inside a
//! kind; everything kind-specific enters and leaves through `VariantState`
//! and the metric map.

use std::collections::BTreeMap;

use contracts::{MetricMap, SensorKind};
use serde_json::Value;

use crate::{FleetRng, TickClock};

mod air_quality;
mod energy;
mod noise;
mod parking;
mod traffic;
mod waste;
mod water_quality;

/// Kind-specific state a sensor carries between ticks.
#[derive(Debug, Clone)]
pub enum VariantState {
    Traffic(traffic::TrafficState),
    Parking(parking::ParkingState),
    AirQuality,
    Noise,
    WaterQuality,
    Waste(waste::WasteState),
    Energy(energy::EnergyState),
}

/// Borrowed view of the sensor internals a base reading may touch.
pub(crate) struct ReadingCtx<'a> {
    pub baseline: &'a mut BTreeMap<String, f64>,
    pub rng: &'a mut FleetRng,
    pub clock: &'a TickClock,
    pub last_reading: Option<&'a MetricMap>,
}

/// Seed baseline values and descriptor metadata for a new sensor, returning
/// the state its kind carries forward.
pub(crate) fn seed_baseline(
    kind: SensorKind,
    name: &str,
    rng: &mut FleetRng,
    clock: &TickClock,
    baseline: &mut BTreeMap<String, f64>,
    metadata: &mut BTreeMap<String, Value>,
) -> VariantState {
    match kind {
        SensorKind::Traffic => traffic::seed(name, rng, baseline, metadata),
        SensorKind::Parking => parking::seed(rng, baseline, metadata),
        SensorKind::AirQuality => air_quality::seed(rng, clock, baseline, metadata),
        SensorKind::Noise => noise::seed(name, rng, baseline, metadata),
        SensorKind::WaterQuality => water_quality::seed(rng, baseline, metadata),
        SensorKind::Waste => waste::seed(rng, clock, baseline, metadata),
        SensorKind::Energy => energy::seed(rng, baseline, metadata),
    }
}

/// Produce the raw (pre-pipeline) reading for one tick.
pub(crate) fn base_reading(state: &mut VariantState, ctx: &mut ReadingCtx<'_>) -> MetricMap {
    match state {
        VariantState::Traffic(traffic) => traffic::base_reading(traffic, ctx),
        VariantState::Parking(parking) => parking::base_reading(parking, ctx),
        VariantState::AirQuality => air_quality::base_reading(ctx),
        VariantState::Noise => noise::base_reading(ctx),
        VariantState::WaterQuality => water_quality::base_reading(ctx),
        VariantState::Waste(waste) => waste::base_reading(waste, ctx),
        VariantState::Energy(energy) => energy::base_reading(energy, ctx),
    }
}

/// True when the sensor name contains any of the given keywords
/// (case-insensitive). Used by kinds that classify their surroundings
/// from the deployment name.
pub(crate) fn name_contains(name: &str, keywords: &[&str]) -> bool {
    let lower = name.to_lowercase();
    keywords.iter().any(|word| lower.contains(word))
}
