//! Metric values carried inside a reading.
//!
//! Readings are flat string-keyed maps; values are numbers for measured
//! magnitudes, with a few text/flag/nested fields for domain annotations
//! (collection timestamps, frequency bands, threshold flags).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Ordered metric mapping. BTreeMap keeps wire payloads deterministic.
pub type MetricMap = BTreeMap<String, MetricValue>;

/// One metric field.
///
/// `Integer` precedes `Number` so whole JSON numbers deserialize as counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Integer(i64),
    Number(f64),
    Flag(bool),
    Text(String),
    Nested(BTreeMap<String, f64>),
}

impl MetricValue {
    /// Numeric view over `Number` and `Integer` fields.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            MetricValue::Number(v) => Some(*v),
            MetricValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, MetricValue::Number(_) | MetricValue::Integer(_))
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Number(v)
    }
}

impl From<i64> for MetricValue {
    fn from(v: i64) -> Self {
        MetricValue::Integer(v)
    }
}

impl From<bool> for MetricValue {
    fn from(v: bool) -> Self {
        MetricValue::Flag(v)
    }
}

impl From<String> for MetricValue {
    fn from(v: String) -> Self {
        MetricValue::Text(v)
    }
}

impl From<&str> for MetricValue {
    fn from(v: &str) -> Self {
        MetricValue::Text(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_integer_wins_for_whole_numbers() {
        let v: MetricValue = serde_json::from_str("42").unwrap();
        assert_eq!(v, MetricValue::Integer(42));
        let v: MetricValue = serde_json::from_str("42.5").unwrap();
        assert_eq!(v, MetricValue::Number(42.5));
    }

    #[test]
    fn as_number_covers_both_numeric_variants() {
        assert_eq!(MetricValue::Integer(7).as_number(), Some(7.0));
        assert_eq!(MetricValue::Number(7.5).as_number(), Some(7.5));
        assert_eq!(MetricValue::Flag(true).as_number(), None);
    }

    #[test]
    fn nested_serializes_as_object() {
        let mut bands = BTreeMap::new();
        bands.insert("low_freq".to_string(), 0.3);
        let json = serde_json::to_string(&MetricValue::Nested(bands)).unwrap();
        assert_eq!(json, r#"{"low_freq":0.3}"#);
    }
}
