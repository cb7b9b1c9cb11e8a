//! SensorDescriptor - registration payload sent to the collector.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{GeoLocation, SensorKind};

/// Identity and placement submitted once per sensor at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorDescriptor {
    pub sensor_id: String,

    pub name: String,

    /// Wire field is `type` per the collector contract.
    #[serde(rename = "type")]
    pub kind: SensorKind,

    pub location: GeoLocation,

    /// Variant-specific annotations (location class, lanes, bin type, ...).
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_uses_type_on_the_wire() {
        let descriptor = SensorDescriptor {
            sensor_id: "energy_042".into(),
            name: "Energy Sensor 42".into(),
            kind: SensorKind::Energy,
            location: GeoLocation::new(40.7589, -73.9851, "Times Square"),
            metadata: BTreeMap::new(),
        };
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["type"], "energy");
        assert_eq!(json["sensorId"], "energy_042");
        assert_eq!(json["location"]["address"], "Times Square");
    }
}
