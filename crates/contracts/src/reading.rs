//! Reading - one observation per sensor per tick.

use serde::{Deserialize, Serialize};

use crate::{MetricMap, MetricValue, SensorStatus};

/// Categorical confidence label attached to a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingQuality {
    Good,
    Fair,
    Poor,
    Invalid,
}

impl ReadingQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingQuality::Good => "good",
            ReadingQuality::Fair => "fair",
            ReadingQuality::Poor => "poor",
            ReadingQuality::Invalid => "invalid",
        }
    }
}

impl std::fmt::Display for ReadingQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One emitted observation. Ownership transfers to the delivery batch buffer
/// as soon as it is produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    /// Stable sensor identifier.
    pub sensor_id: String,

    /// Metric mapping. For failed ticks this holds only status/error fields.
    pub data: MetricMap,

    /// Confidence label; `invalid` iff the sensor was not active this tick.
    pub quality: ReadingQuality,

    /// ISO-8601 generation time.
    pub timestamp: String,
}

impl Reading {
    /// Build the short-circuit reading for a simulated sensor failure.
    pub fn failed(sensor_id: impl Into<String>, status: SensorStatus, timestamp: String) -> Self {
        let mut data = MetricMap::new();
        data.insert("status".to_string(), MetricValue::from(status.as_str()));
        data.insert(
            "error".to_string(),
            MetricValue::from(format!("Sensor {status}")),
        );
        Self {
            sensor_id: sensor_id.into(),
            data,
            quality: ReadingQuality::Invalid,
            timestamp,
        }
    }
}
