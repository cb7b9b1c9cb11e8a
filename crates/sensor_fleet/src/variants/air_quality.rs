//! Air quality sensor: pollutant concentrations driven by traffic, wind and
//! temperature-inversion factors, plus a simplified AQI derived from the
//! previous tick's PM2.5.

use std::collections::BTreeMap;

use contracts::{MetricMap, MetricValue};
use serde_json::{json, Value};

use super::{ReadingCtx, VariantState};
use crate::{FleetRng, TickClock};

const POLLUTANT_BASELINES: [(&str, f64); 7] = [
    ("pm25", 15.0),
    ("pm10", 25.0),
    ("co2", 400.0),
    ("no2", 20.0),
    ("o3", 50.0),
    ("co", 1.0),
    ("so2", 5.0),
];

pub(crate) fn seed(
    rng: &mut FleetRng,
    clock: &TickClock,
    baseline: &mut BTreeMap<String, f64>,
    metadata: &mut BTreeMap<String, Value>,
) -> VariantState {
    let location_factor = rng.uniform(0.8, 1.2);
    for (field, base) in POLLUTANT_BASELINES {
        baseline.insert(field.to_string(), base * location_factor);
    }

    metadata.insert(
        "measurement_height".into(),
        json!(rng.uniform(2.5, 4.0)),
    );
    metadata.insert("calibration_date".into(), json!(clock.date_string()));
    metadata.insert(
        "sensor_model".into(),
        json!(rng.pick(&["AQ-Pro-2000", "EnviroSense-X1", "AirWatch-Elite"])),
    );

    VariantState::AirQuality
}

pub(crate) fn base_reading(ctx: &mut ReadingCtx<'_>) -> MetricMap {
    let hour = ctx.clock.hour();
    let traffic_factor = if (7..=9).contains(&hour) || (17..=19).contains(&hour) {
        ctx.rng.uniform(1.3, 1.8)
    } else if hour >= 22 || hour <= 5 {
        ctx.rng.uniform(0.6, 0.8)
    } else {
        1.0
    };

    // Wind disperses pollutants; warm stagnant air traps them.
    let wind_factor = ctx.rng.uniform(0.7, 1.3);
    let temperature_factor = 1.0 + (ctx.rng.uniform(15.0, 35.0) - 25.0) * 0.02;
    let combined = traffic_factor * wind_factor * temperature_factor;

    let base = |field: &str, fallback: f64| ctx.baseline.get(field).copied().unwrap_or(fallback);

    let mut data = MetricMap::new();
    data.insert(
        "pm25".into(),
        MetricValue::Number((base("pm25", 15.0) * combined + ctx.rng.uniform(-5.0, 5.0)).max(0.0)),
    );
    data.insert(
        "pm10".into(),
        MetricValue::Number((base("pm10", 25.0) * combined + ctx.rng.uniform(-8.0, 8.0)).max(0.0)),
    );
    data.insert(
        "co2".into(),
        MetricValue::Number(
            (base("co2", 400.0) * combined + ctx.rng.uniform(-50.0, 100.0)).max(300.0),
        ),
    );
    data.insert(
        "no2".into(),
        MetricValue::Number((base("no2", 20.0) * combined + ctx.rng.uniform(-5.0, 10.0)).max(0.0)),
    );
    // Ozone titrates against fresh traffic emissions.
    data.insert(
        "o3".into(),
        MetricValue::Number(
            (base("o3", 50.0) * (2.0 - combined) + ctx.rng.uniform(-10.0, 10.0)).max(0.0),
        ),
    );
    data.insert(
        "co".into(),
        MetricValue::Number((base("co", 1.0) * combined + ctx.rng.uniform(-0.3, 0.5)).max(0.0)),
    );
    data.insert(
        "so2".into(),
        MetricValue::Number((base("so2", 5.0) * combined + ctx.rng.uniform(-2.0, 3.0)).max(0.0)),
    );
    data.insert(
        "aqi".into(),
        MetricValue::Number(aqi_from_last(ctx) as f64),
    );
    data.insert(
        "temperature".into(),
        MetricValue::Number(ctx.rng.uniform(15.0, 35.0)),
    );
    data.insert(
        "humidity".into(),
        MetricValue::Number(ctx.rng.uniform(30.0, 80.0)),
    );
    data
}

/// Simplified AQI from the previous tick's PM2.5 (EPA-style breakpoints).
fn aqi_from_last(ctx: &mut ReadingCtx<'_>) -> i64 {
    let pm25 = match ctx
        .last_reading
        .and_then(|last| last.get("pm25"))
        .and_then(MetricValue::as_number)
    {
        Some(pm25) => pm25,
        None => return ctx.rng.int_range(50, 150),
    };

    if pm25 <= 12.0 {
        (50.0 * pm25 / 12.0) as i64
    } else if pm25 <= 35.4 {
        (50.0 + 50.0 * (pm25 - 12.0) / (35.4 - 12.0)) as i64
    } else if pm25 <= 55.4 {
        (100.0 + 50.0 * (pm25 - 35.4) / (55.4 - 35.4)) as i64
    } else {
        ((150.0 + 100.0 * (pm25 - 55.4) / 100.0) as i64).min(300)
    }
}
