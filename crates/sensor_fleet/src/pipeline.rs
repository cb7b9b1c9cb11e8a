//! Shared reading pipeline steps.
//!
//! Fixed order: failure check -> variant base reading -> temporal modulation
//! -> noise -> drift -> rounding -> quality scoring. The failure check and
//! base reading live in `sensor.rs` / `variants`; everything here is a pure
//! transformation over the working metric map.

use contracts::{MetricMap, MetricValue, ReadingQuality};
use std::collections::BTreeMap;

use crate::{FleetRng, TickClock};

/// Fields excluded from generic temporal modulation: bounded physical
/// quantities that do not scale with city activity.
const TEMPORAL_EXEMPT: [&str; 2] = ["temperature", "ph"];

/// Fields reported as whole numbers.
const WHOLE_FIELDS: [&str; 9] = [
    "vehicle_count",
    "total_spots",
    "occupied_spots",
    "available_spots",
    "aqi",
    "average_duration",
    "capacity",
    "co2",
    "conductivity",
];

/// Weekend activity damping: 0.8 on Saturday/Sunday.
pub fn weekend_factor(clock: &TickClock) -> f64 {
    if clock.is_weekend() {
        0.8
    } else {
        1.0
    }
}

/// Time-of-day activity: 1.3 in rush hours (6-9, 17-19), 0.6 at night
/// (22-23, 0-5), 1.0 otherwise.
pub fn time_of_day_factor(clock: &TickClock) -> f64 {
    let hour = clock.hour();
    if (6..=9).contains(&hour) || (17..=19).contains(&hour) {
        1.3
    } else if hour >= 22 || hour <= 5 {
        0.6
    } else {
        1.0
    }
}

/// Step 3: multiply every numeric field (except temperature/pH) by the
/// combined weekend and time-of-day factor, clamped at zero.
pub fn apply_temporal(data: &mut MetricMap, clock: &TickClock) {
    let factor = weekend_factor(clock) * time_of_day_factor(clock);
    for (key, value) in data.iter_mut() {
        if TEMPORAL_EXEMPT.contains(&key.as_str()) {
            continue;
        }
        if let MetricValue::Number(v) = value {
            *v = (*v * factor).max(0.0);
        }
    }
}

/// Step 4: zero-mean Gaussian perturbation per numeric field with
/// sigma = |value| * noise_factor, clamped at zero.
pub fn apply_noise(data: &mut MetricMap, rng: &mut FleetRng, noise_factor: f64) {
    for value in data.values_mut() {
        if let MetricValue::Number(v) = value {
            let noise = rng.gaussian(0.0, v.abs() * noise_factor);
            *v = (*v + noise).max(0.0);
        }
    }
}

/// Step 5: slow within-day instrument drift, resetting conceptually at
/// midnight: value += value * drift_factor * day_fraction.
pub fn apply_drift(data: &mut MetricMap, drift_factor: f64, clock: &TickClock) {
    let day_fraction = f64::from(clock.seconds_since_midnight()) / 86_400.0;
    for value in data.values_mut() {
        if let MetricValue::Number(v) = value {
            let drift = *v * drift_factor * day_fraction;
            *v = (*v + drift).max(0.0);
        }
    }
}

/// Rounding precision per field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoundPolicy {
    /// Coordinates: 6 decimals.
    SixDecimals,
    /// Bounded physical quantities: 2 decimals.
    TwoDecimals,
    /// Default magnitudes: 1 decimal.
    OneDecimal,
    /// Counts: truncate to an integer.
    Whole,
}

fn policy_for(field: &str) -> RoundPolicy {
    if field == "latitude" || field == "longitude" {
        RoundPolicy::SixDecimals
    } else if TEMPORAL_EXEMPT.contains(&field) {
        RoundPolicy::TwoDecimals
    } else if WHOLE_FIELDS.contains(&field) {
        RoundPolicy::Whole
    } else {
        RoundPolicy::OneDecimal
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Step 6: round every numeric field by its policy. Whole-number fields
/// become `Integer`; re-rounding at the same precision is a no-op.
pub fn round_fields(data: &mut MetricMap) {
    for (key, value) in data.iter_mut() {
        let policy = policy_for(key);
        match value {
            MetricValue::Number(v) => match policy {
                RoundPolicy::SixDecimals => *v = round_to(*v, 6),
                RoundPolicy::TwoDecimals => *v = round_to(*v, 2),
                RoundPolicy::OneDecimal => *v = round_to(*v, 1),
                RoundPolicy::Whole => *value = MetricValue::Integer(v.trunc() as i64),
            },
            // Already whole; nothing to refine.
            MetricValue::Integer(_) => {}
            _ => {}
        }
    }
}

/// Step 7: deviation-based quality scoring. A numeric field deviating from
/// its recorded baseline by more than 200% counts as extreme; quality is
/// `poor` above half the fields, `fair` for any, `good` otherwise. The
/// denominator counts every data field, numeric or not.
pub fn score_quality(data: &MetricMap, baseline: &BTreeMap<String, f64>) -> ReadingQuality {
    let mut extreme = 0usize;
    for (key, value) in data {
        let Some(v) = value.as_number() else {
            continue;
        };
        if let Some(base) = baseline.get(key) {
            if (v - base).abs() > base * 2.0 {
                extreme += 1;
            }
        }
    }

    if extreme as f64 > data.len() as f64 * 0.5 {
        ReadingQuality::Poor
    } else if extreme > 0 {
        ReadingQuality::Fair
    } else {
        ReadingQuality::Good
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, MetricValue)]) -> MetricMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn rush_hour_and_weekend_factors() {
        let monday_8am = TickClock::fixed(2026, 1, 5, 8, 0, 0);
        assert_eq!(time_of_day_factor(&monday_8am), 1.3);
        assert_eq!(weekend_factor(&monday_8am), 1.0);

        let monday_3am = TickClock::fixed(2026, 1, 5, 3, 0, 0);
        assert_eq!(time_of_day_factor(&monday_3am), 0.6);

        let monday_noon = TickClock::fixed(2026, 1, 5, 12, 0, 0);
        assert_eq!(time_of_day_factor(&monday_noon), 1.0);

        let saturday_noon = TickClock::fixed(2026, 1, 10, 12, 0, 0);
        assert_eq!(weekend_factor(&saturday_noon), 0.8);
    }

    #[test]
    fn temporal_skips_temperature_and_ph() {
        let clock = TickClock::fixed(2026, 1, 5, 8, 0, 0); // weekday rush
        let mut data = map(&[
            ("flow", MetricValue::Number(100.0)),
            ("temperature", MetricValue::Number(20.0)),
            ("ph", MetricValue::Number(7.0)),
        ]);
        apply_temporal(&mut data, &clock);
        assert_eq!(data["flow"], MetricValue::Number(130.0));
        assert_eq!(data["temperature"], MetricValue::Number(20.0));
        assert_eq!(data["ph"], MetricValue::Number(7.0));
    }

    #[test]
    fn noise_never_goes_negative() {
        let mut rng = FleetRng::seeded(11, 0);
        for _ in 0..200 {
            let mut data = map(&[("level", MetricValue::Number(0.5))]);
            apply_noise(&mut data, &mut rng, 0.9);
            let v = data["level"].as_number().unwrap();
            assert!(v >= 0.0);
        }
    }

    #[test]
    fn drift_scales_with_day_fraction() {
        let noon = TickClock::fixed(2026, 1, 5, 12, 0, 0);
        let mut data = map(&[("flow", MetricValue::Number(1000.0))]);
        apply_drift(&mut data, 0.001, &noon);
        // 1000 + 1000 * 0.001 * 0.5 = 1000.5
        let v = data["flow"].as_number().unwrap();
        assert!((v - 1000.5).abs() < 1e-9);

        let midnight = TickClock::fixed(2026, 1, 5, 0, 0, 0);
        let mut data = map(&[("flow", MetricValue::Number(1000.0))]);
        apply_drift(&mut data, 0.001, &midnight);
        assert_eq!(data["flow"].as_number().unwrap(), 1000.0);
    }

    #[test]
    fn rounding_policies_by_field() {
        let mut data = map(&[
            ("latitude", MetricValue::Number(40.123_456_789)),
            ("temperature", MetricValue::Number(21.987_6)),
            ("decibel_level", MetricValue::Number(63.44)),
            ("vehicle_count", MetricValue::Number(87.9)),
        ]);
        round_fields(&mut data);
        assert_eq!(data["latitude"], MetricValue::Number(40.123_457));
        assert_eq!(data["temperature"], MetricValue::Number(21.99));
        assert_eq!(data["decibel_level"], MetricValue::Number(63.4));
        assert_eq!(data["vehicle_count"], MetricValue::Integer(87));
    }

    #[test]
    fn rounding_is_idempotent() {
        let mut data = map(&[
            ("latitude", MetricValue::Number(40.123_456_789)),
            ("temperature", MetricValue::Number(21.987_6)),
            ("flow", MetricValue::Number(12.345)),
            ("vehicle_count", MetricValue::Number(87.9)),
        ]);
        round_fields(&mut data);
        let once = data.clone();
        round_fields(&mut data);
        assert_eq!(once, data);
    }

    #[test]
    fn quality_tiers_by_extreme_count() {
        let baseline: BTreeMap<String, f64> =
            [("a".to_string(), 10.0), ("b".to_string(), 10.0)].into();

        let good = map(&[
            ("a", MetricValue::Number(12.0)),
            ("b", MetricValue::Number(9.0)),
        ]);
        assert_eq!(score_quality(&good, &baseline), ReadingQuality::Good);

        // One of three fields extreme: fair (1 <= 3 * 0.5)
        let fair = map(&[
            ("a", MetricValue::Number(45.0)),
            ("b", MetricValue::Number(9.0)),
            ("note", MetricValue::Text("x".into())),
        ]);
        assert_eq!(score_quality(&fair, &baseline), ReadingQuality::Fair);

        // Both of two fields extreme: poor (2 > 2 * 0.5)
        let poor = map(&[
            ("a", MetricValue::Number(45.0)),
            ("b", MetricValue::Number(45.0)),
        ]);
        assert_eq!(score_quality(&poor, &baseline), ReadingQuality::Poor);
    }

    #[test]
    fn quality_ignores_fields_without_baseline() {
        let baseline: BTreeMap<String, f64> = BTreeMap::new();
        let data = map(&[("a", MetricValue::Number(1_000_000.0))]);
        assert_eq!(score_quality(&data, &baseline), ReadingQuality::Good);
    }
}
