//! Waste bin sensor: fill level accumulates between ticks and collections
//! empty the bin, driven by fill thresholds first and the pickup schedule
//! second.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDateTime};
use contracts::{MetricMap, MetricValue};
use serde_json::{json, Value};

use super::{ReadingCtx, VariantState};
use crate::{FleetRng, TickClock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionSchedule {
    Daily,
    EveryTwoDays,
    Weekly,
}

impl CollectionSchedule {
    fn as_str(self) -> &'static str {
        match self {
            CollectionSchedule::Daily => "daily",
            CollectionSchedule::EveryTwoDays => "every_2_days",
            CollectionSchedule::Weekly => "weekly",
        }
    }

    /// Hours after which a scheduled pickup becomes likely, and how likely.
    fn due(self, hours_since: f64) -> Option<f64> {
        match self {
            CollectionSchedule::Daily if hours_since > 20.0 => Some(0.6),
            CollectionSchedule::EveryTwoDays if hours_since > 44.0 => Some(0.7),
            CollectionSchedule::Weekly if hours_since > 164.0 => Some(0.8),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WasteState {
    capacity: f64,
    fill_rate: f64,
    last_collection: NaiveDateTime,
    schedule: CollectionSchedule,
    location_type: &'static str,
}

pub(crate) fn seed(
    rng: &mut FleetRng,
    clock: &TickClock,
    baseline: &mut BTreeMap<String, f64>,
    metadata: &mut BTreeMap<String, Value>,
) -> VariantState {
    let capacity = rng.int_range(100, 500) as f64;
    let fill_rate = rng.uniform(2.0, 8.0);
    let last_collection = clock.naive() - Duration::hours(rng.int_range(0, 72));

    let hours_since = clock.hours_since(last_collection);
    let fill_level = (hours_since * fill_rate).min(capacity);

    baseline.insert("capacity".into(), capacity);
    baseline.insert("fill_level".into(), fill_level);
    baseline.insert("fill_percentage".into(), fill_level / capacity * 100.0);

    let schedule = *rng.pick(&[
        CollectionSchedule::Daily,
        CollectionSchedule::EveryTwoDays,
        CollectionSchedule::Weekly,
    ]);
    let location_type = *rng.pick(&["street", "park", "commercial", "residential"]);

    metadata.insert(
        "bin_type".into(),
        json!(rng.pick(&["general", "recycling", "organic", "hazardous"])),
    );
    metadata.insert("collection_schedule".into(), json!(schedule.as_str()));
    metadata.insert("location_type".into(), json!(location_type));

    VariantState::Waste(WasteState {
        capacity,
        fill_rate,
        last_collection,
        schedule,
        location_type,
    })
}

/// Fill thresholds take precedence over the schedule: a bin at 95% gets
/// picked up regardless of the calendar.
fn collection_probability(state: &WasteState, fill_percentage: f64, clock: &TickClock) -> f64 {
    if fill_percentage > 90.0 {
        return 0.8;
    }
    if fill_percentage > 75.0 {
        return 0.3;
    }
    let hours_since = clock.hours_since(state.last_collection);
    state.schedule.due(hours_since).unwrap_or(0.05)
}

pub(crate) fn base_reading(state: &mut WasteState, ctx: &mut ReadingCtx<'_>) -> MetricMap {
    let hour = ctx.clock.hour();
    let mut rate_factor = if (8..=18).contains(&hour) {
        ctx.rng.uniform(1.2, 1.8)
    } else if (19..=22).contains(&hour) {
        ctx.rng.uniform(0.8, 1.2)
    } else {
        ctx.rng.uniform(0.3, 0.6)
    };
    if ctx.clock.is_weekend() {
        if matches!(state.location_type, "park" | "commercial") {
            rate_factor *= ctx.rng.uniform(1.3, 1.6);
        } else {
            rate_factor *= ctx.rng.uniform(0.7, 0.9);
        }
    }

    let fill_level = ctx.baseline.get("fill_level").copied().unwrap_or(0.0);
    let fill_percentage = fill_level / state.capacity * 100.0;

    let new_fill = if ctx
        .rng
        .chance(collection_probability(state, fill_percentage, ctx.clock))
    {
        state.last_collection = ctx.clock.naive();
        ctx.rng.uniform(0.0, 10.0)
    } else {
        // One reading-hour's worth of accumulation.
        (fill_level + state.fill_rate * rate_factor).min(state.capacity)
    };
    ctx.baseline.insert("fill_level".into(), new_fill);

    let fill_percentage = new_fill / state.capacity * 100.0;
    let ambient = ctx.rng.uniform(15.0, 35.0);
    let temperature = ambient + fill_percentage / 100.0 * ctx.rng.uniform(2.0, 8.0);

    MetricMap::from([
        ("fill_level".to_string(), MetricValue::Number(new_fill)),
        (
            "fill_percentage".to_string(),
            MetricValue::Number(fill_percentage),
        ),
        ("capacity".to_string(), MetricValue::Number(state.capacity)),
        ("temperature".to_string(), MetricValue::Number(temperature)),
        (
            "weight".to_string(),
            MetricValue::Number(new_fill * ctx.rng.uniform(0.3, 0.8)),
        ),
        (
            "last_collection".to_string(),
            MetricValue::Text(state.last_collection.format("%Y-%m-%dT%H:%M:%S").to_string()),
        ),
        (
            "collection_needed".to_string(),
            MetricValue::Flag(fill_percentage > 80.0),
        ),
    ])
}
