//! SimulationPlan - Config Loader output
//!
//! Describes a complete simulation run: collector endpoint, tick schedule,
//! city geography, and per-kind fleet counts.

use serde::{Deserialize, Serialize};

use crate::SensorKind;

/// Config schema version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete simulation plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationPlan {
    /// Config schema version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Collector endpoint settings
    pub collector: CollectorConfig,

    /// Tick loop settings
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// City geography for location assignment
    #[serde(default)]
    pub city: CityConfig,

    /// Fleet composition
    #[serde(default)]
    pub fleet: FleetConfig,
}

impl Default for SimulationPlan {
    fn default() -> Self {
        Self {
            version: ConfigVersion::default(),
            collector: CollectorConfig::default(),
            schedule: ScheduleConfig::default(),
            city: CityConfig::default(),
            fleet: FleetConfig::default(),
        }
    }
}

/// Collector endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Base URL, e.g. `http://localhost:3000/api`
    pub endpoint: String,

    /// Request timeout for register/send (seconds)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Health-check timeout (seconds)
    #[serde(default = "default_health_timeout_secs")]
    pub health_timeout_secs: u64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3000/api".to_string(),
            request_timeout_secs: default_request_timeout_secs(),
            health_timeout_secs: default_health_timeout_secs(),
        }
    }
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_health_timeout_secs() -> u64 {
    5
}

/// Tick loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Fixed tick interval (seconds)
    #[serde(default = "default_tick_interval_secs")]
    pub tick_interval_secs: f64,

    /// Bounded parallelism for per-tick reading fan-out
    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    /// Per-task timeout when awaiting one sensor's reading (seconds)
    #[serde(default = "default_task_timeout_secs")]
    pub task_timeout_secs: u64,

    /// Batch buffer auto-flush threshold
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Background statistics reporter interval (seconds)
    #[serde(default = "default_stats_interval_secs")]
    pub stats_interval_secs: u64,

    /// Optional run duration limit (minutes); None = run until signaled
    #[serde(default)]
    pub duration_mins: Option<u64>,

    /// Optional RNG seed for reproducible fleets
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: default_tick_interval_secs(),
            worker_count: default_worker_count(),
            task_timeout_secs: default_task_timeout_secs(),
            batch_size: default_batch_size(),
            stats_interval_secs: default_stats_interval_secs(),
            duration_mins: None,
            seed: None,
        }
    }
}

fn default_tick_interval_secs() -> f64 {
    5.0
}

fn default_worker_count() -> usize {
    10
}

fn default_task_timeout_secs() -> u64 {
    5
}

fn default_batch_size() -> usize {
    5
}

fn default_stats_interval_secs() -> u64 {
    30
}

/// City geography: bounding box plus a catalog of named landmarks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityConfig {
    /// Rectangular city bounds for uniform placement
    #[serde(default)]
    pub bounds: CityBounds,

    /// Named points new sensors are biased toward
    #[serde(default = "default_landmarks")]
    pub landmarks: Vec<Landmark>,

    /// Probability a new sensor lands on a landmark instead of a random point
    #[serde(default = "default_landmark_bias")]
    pub landmark_bias: f64,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            bounds: CityBounds::default(),
            landmarks: default_landmarks(),
            landmark_bias: default_landmark_bias(),
        }
    }
}

fn default_landmark_bias() -> f64 {
    0.7
}

/// Rectangular lat/lng bounds (defaults cover the New York City area)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CityBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl Default for CityBounds {
    fn default() -> Self {
        Self {
            north: 40.9176,
            south: 40.4774,
            east: -73.7004,
            west: -74.2591,
        }
    }
}

/// A named coordinate sensors can be pinned to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
}

impl Landmark {
    pub fn new(latitude: f64, longitude: f64, label: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            label: label.into(),
        }
    }
}

fn default_landmarks() -> Vec<Landmark> {
    vec![
        Landmark::new(40.7589, -73.9851, "Times Square"),
        Landmark::new(40.7505, -73.9934, "Herald Square"),
        Landmark::new(40.7614, -73.9776, "Central Park South"),
        Landmark::new(40.7829, -73.9654, "Central Park North"),
        Landmark::new(40.7282, -74.0776, "World Trade Center"),
        Landmark::new(40.7061, -74.0087, "Brooklyn Bridge"),
        Landmark::new(40.6892, -73.9442, "Fort Greene Park"),
        Landmark::new(40.6782, -73.9442, "Prospect Park"),
        Landmark::new(40.7282, -73.9942, "Williamsburg Bridge"),
        Landmark::new(40.7282, -73.7949, "Flushing Meadows"),
        Landmark::new(40.7505, -73.8370, "LaGuardia Airport Area"),
        Landmark::new(40.8448, -73.8648, "Yankee Stadium"),
        Landmark::new(40.8176, -73.8782, "Bronx Zoo"),
        Landmark::new(40.5795, -74.1502, "Staten Island Ferry Terminal"),
    ]
}

/// Per-kind fleet counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetConfig {
    #[serde(default = "default_traffic_count")]
    pub traffic: usize,
    #[serde(default = "default_waste_count")]
    pub waste: usize,
    #[serde(default = "default_air_quality_count")]
    pub air_quality: usize,
    #[serde(default = "default_noise_count")]
    pub noise: usize,
    #[serde(default = "default_water_quality_count")]
    pub water_quality: usize,
    #[serde(default = "default_energy_count")]
    pub energy: usize,
    #[serde(default = "default_parking_count")]
    pub parking: usize,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            traffic: default_traffic_count(),
            waste: default_waste_count(),
            air_quality: default_air_quality_count(),
            noise: default_noise_count(),
            water_quality: default_water_quality_count(),
            energy: default_energy_count(),
            parking: default_parking_count(),
        }
    }
}

fn default_traffic_count() -> usize {
    15
}

fn default_waste_count() -> usize {
    10
}

fn default_air_quality_count() -> usize {
    8
}

fn default_noise_count() -> usize {
    6
}

fn default_water_quality_count() -> usize {
    5
}

fn default_energy_count() -> usize {
    4
}

fn default_parking_count() -> usize {
    2
}

impl FleetConfig {
    /// Count configured for one kind
    pub fn count_for(&self, kind: SensorKind) -> usize {
        match kind {
            SensorKind::Traffic => self.traffic,
            SensorKind::Parking => self.parking,
            SensorKind::AirQuality => self.air_quality,
            SensorKind::Noise => self.noise,
            SensorKind::WaterQuality => self.water_quality,
            SensorKind::Waste => self.waste,
            SensorKind::Energy => self.energy,
        }
    }

    fn set_count(&mut self, kind: SensorKind, count: usize) {
        match kind {
            SensorKind::Traffic => self.traffic = count,
            SensorKind::Parking => self.parking = count,
            SensorKind::AirQuality => self.air_quality = count,
            SensorKind::Noise => self.noise = count,
            SensorKind::WaterQuality => self.water_quality = count,
            SensorKind::Waste => self.waste = count,
            SensorKind::Energy => self.energy = count,
        }
    }

    /// Total sensors across all kinds
    pub fn total(&self) -> usize {
        SensorKind::ALL
            .iter()
            .map(|kind| self.count_for(*kind))
            .sum()
    }

    /// Redistribute a total override proportionally across kinds.
    ///
    /// Every kind keeps at least one sensor, so the result can exceed the
    /// requested total for very small overrides.
    pub fn scaled_to_total(&self, total: usize) -> FleetConfig {
        let configured = self.total().max(1) as f64;
        let mut scaled = *self;
        for kind in SensorKind::ALL {
            let proportion = self.count_for(kind) as f64 / configured;
            scaled.set_count(kind, ((total as f64 * proportion) as usize).max(1));
        }
        scaled
    }
}
