//! Sensor identity: kinds, status, and geographic placement.

use serde::{Deserialize, Serialize};

/// The seven simulated sensor families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    Traffic,
    Parking,
    AirQuality,
    Noise,
    WaterQuality,
    Waste,
    Energy,
}

impl SensorKind {
    /// All kinds, in the order the fleet is created.
    pub const ALL: [SensorKind; 7] = [
        SensorKind::Traffic,
        SensorKind::Waste,
        SensorKind::AirQuality,
        SensorKind::Noise,
        SensorKind::WaterQuality,
        SensorKind::Energy,
        SensorKind::Parking,
    ];

    /// Wire/id token, e.g. `air_quality`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorKind::Traffic => "traffic",
            SensorKind::Parking => "parking",
            SensorKind::AirQuality => "air_quality",
            SensorKind::Noise => "noise",
            SensorKind::WaterQuality => "water_quality",
            SensorKind::Waste => "waste",
            SensorKind::Energy => "energy",
        }
    }

    /// Human-readable label, e.g. `Air Quality`.
    pub fn label(&self) -> &'static str {
        match self {
            SensorKind::Traffic => "Traffic",
            SensorKind::Parking => "Parking",
            SensorKind::AirQuality => "Air Quality",
            SensorKind::Noise => "Noise",
            SensorKind::WaterQuality => "Water Quality",
            SensorKind::Waste => "Waste",
            SensorKind::Energy => "Energy",
        }
    }
}

impl std::fmt::Display for SensorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operational status of a sensor, re-evaluated on every reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorStatus {
    #[default]
    Active,
    Offline,
    Maintenance,
    Error,
}

impl SensorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorStatus::Active => "active",
            SensorStatus::Offline => "offline",
            SensorStatus::Maintenance => "maintenance",
            SensorStatus::Error => "error",
        }
    }

    /// The failure states a simulated fault can land in.
    pub const FAILURES: [SensorStatus; 3] = [
        SensorStatus::Offline,
        SensorStatus::Maintenance,
        SensorStatus::Error,
    ];
}

impl std::fmt::Display for SensorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed geographic placement, immutable after sensor creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
}

impl GeoLocation {
    pub fn new(latitude: f64, longitude: f64, address: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            address: address.into(),
        }
    }
}
