//! Sensor - one simulated device and its full reading pipeline.

use std::collections::BTreeMap;

use contracts::{
    GeoLocation, MetricMap, Reading, SensorDescriptor, SensorKind, SensorStatus,
};
use serde_json::Value;
use tracing::trace;

use crate::pipeline;
use crate::variants::{self, ReadingCtx, VariantState};
use crate::{FleetRng, TickClock};

/// A single simulated sensor. Owns its RNG stream, baseline and kind state;
/// every tick runs the same pipeline: failure check, variant base reading,
/// temporal modulation, noise, drift, rounding, quality scoring.
#[derive(Debug)]
pub struct Sensor {
    id: String,
    name: String,
    kind: SensorKind,
    location: GeoLocation,
    metadata: BTreeMap<String, Value>,
    baseline: BTreeMap<String, f64>,
    noise_factor: f64,
    drift_factor: f64,
    failure_probability: f64,
    status: SensorStatus,
    last_reading: Option<MetricMap>,
    rng: FleetRng,
    variant: VariantState,
}

impl Sensor {
    /// 0.1% chance of a simulated fault per reading.
    const FAILURE_PROBABILITY: f64 = 0.001;

    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: SensorKind,
        location: GeoLocation,
        mut rng: FleetRng,
        clock: &TickClock,
    ) -> Self {
        let name = name.into();
        let noise_factor = rng.uniform(0.05, 0.15);
        let drift_factor = rng.uniform(-0.001, 0.001);

        let mut baseline = BTreeMap::new();
        let mut metadata = BTreeMap::new();
        let variant =
            variants::seed_baseline(kind, &name, &mut rng, clock, &mut baseline, &mut metadata);

        Self {
            id: id.into(),
            name,
            kind,
            location,
            metadata,
            baseline,
            noise_factor,
            drift_factor,
            failure_probability: Self::FAILURE_PROBABILITY,
            status: SensorStatus::Active,
            last_reading: None,
            rng,
            variant,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SensorKind {
        self.kind
    }

    pub fn status(&self) -> SensorStatus {
        self.status
    }

    /// Registration payload for the collector.
    pub fn descriptor(&self) -> SensorDescriptor {
        SensorDescriptor {
            sensor_id: self.id.clone(),
            name: self.name.clone(),
            kind: self.kind,
            location: self.location.clone(),
            metadata: self.metadata.clone(),
        }
    }

    /// Produce one reading at the current wall clock.
    pub fn generate_reading(&mut self) -> Reading {
        self.generate_reading_at(&TickClock::current())
    }

    /// Produce one reading at a pinned moment.
    pub fn generate_reading_at(&mut self, clock: &TickClock) -> Reading {
        if self.rng.chance(self.failure_probability) {
            self.status = *self.rng.pick(&SensorStatus::FAILURES);
            trace!(sensor_id = %self.id, status = %self.status, "simulated sensor fault");
            return Reading::failed(self.id.clone(), self.status, clock.iso8601());
        }
        self.status = SensorStatus::Active;

        let mut ctx = ReadingCtx {
            baseline: &mut self.baseline,
            rng: &mut self.rng,
            clock,
            last_reading: self.last_reading.as_ref(),
        };
        let mut data = variants::base_reading(&mut self.variant, &mut ctx);

        pipeline::apply_temporal(&mut data, clock);
        pipeline::apply_noise(&mut data, &mut self.rng, self.noise_factor);
        pipeline::apply_drift(&mut data, self.drift_factor, clock);
        pipeline::round_fields(&mut data);
        let quality = pipeline::score_quality(&data, &self.baseline);

        self.last_reading = Some(data.clone());

        Reading {
            sensor_id: self.id.clone(),
            data,
            quality,
            timestamp: clock.iso8601(),
        }
    }

    #[cfg(test)]
    fn with_failure_probability(mut self, probability: f64) -> Self {
        self.failure_probability = probability;
        self
    }
}
