//! Simulation metrics collection.
//!
//! Exported through the `metrics` facade (Prometheus when the exporter is
//! installed) plus an in-memory aggregator for end-of-run summaries.

use contracts::{ReadingQuality, SensorKind};
use metrics::{counter, gauge, histogram};

/// Record one produced reading.
pub fn record_reading(kind: SensorKind, quality: ReadingQuality) {
    counter!(
        "citypulse_readings_total",
        "kind" => kind.as_str(),
        "quality" => quality.as_str()
    )
    .increment(1);
}

/// Record one completed tick.
pub fn record_tick(duration_ms: f64, readings: usize) {
    counter!("citypulse_ticks_total").increment(1);
    histogram!("citypulse_tick_duration_ms").record(duration_ms);
    gauge!("citypulse_tick_readings").set(readings as f64);
}

/// Record one batch flush.
pub fn record_batch_flush(sent: usize, total: usize) {
    counter!("citypulse_batches_flushed_total").increment(1);
    if sent < total {
        counter!("citypulse_batch_send_failures_total").increment((total - sent) as u64);
    }
}

/// Record one registration attempt.
pub fn record_registration(success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        "citypulse_registrations_total",
        "status" => status
    )
    .increment(1);
}

/// In-memory reading aggregator for the end-of-run summary.
#[derive(Debug, Clone, Default)]
pub struct ReadingAggregator {
    /// Total readings produced
    pub total_readings: u64,

    /// Readings per quality tier
    pub good: u64,
    pub fair: u64,
    pub poor: u64,
    pub invalid: u64,

    /// Readings per sensor kind
    pub kind_counts: std::collections::BTreeMap<String, u64>,

    /// Tick duration statistics (ms)
    pub tick_stats: RunningStats,
}

impl ReadingAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in one reading.
    pub fn update(&mut self, kind: SensorKind, quality: ReadingQuality) {
        self.total_readings += 1;
        match quality {
            ReadingQuality::Good => self.good += 1,
            ReadingQuality::Fair => self.fair += 1,
            ReadingQuality::Poor => self.poor += 1,
            ReadingQuality::Invalid => self.invalid += 1,
        }
        *self.kind_counts.entry(kind.as_str().to_string()).or_insert(0) += 1;
    }

    /// Fold in one tick's wall time.
    pub fn record_tick_duration(&mut self, duration_ms: f64) {
        self.tick_stats.push(duration_ms);
    }

    /// Produce the summary report.
    pub fn summary(&self) -> ReadingSummary {
        ReadingSummary {
            total_readings: self.total_readings,
            good: self.good,
            fair: self.fair,
            poor: self.poor,
            invalid: self.invalid,
            invalid_rate: if self.total_readings > 0 {
                self.invalid as f64 / self.total_readings as f64 * 100.0
            } else {
                0.0
            },
            kind_counts: self.kind_counts.clone(),
            tick_duration_ms: StatsSummary::from(&self.tick_stats),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Aggregated reading summary
#[derive(Debug, Clone, Default)]
pub struct ReadingSummary {
    pub total_readings: u64,
    pub good: u64,
    pub fair: u64,
    pub poor: u64,
    pub invalid: u64,
    pub invalid_rate: f64,
    pub kind_counts: std::collections::BTreeMap<String, u64>,
    pub tick_duration_ms: StatsSummary,
}

impl std::fmt::Display for ReadingSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Reading Summary ===")?;
        writeln!(f, "Total readings: {}", self.total_readings)?;
        writeln!(
            f,
            "Quality: good={} fair={} poor={} invalid={} ({:.2}% invalid)",
            self.good, self.fair, self.poor, self.invalid, self.invalid_rate
        )?;
        writeln!(f, "Tick duration (ms): {}", self.tick_duration_ms)?;

        if !self.kind_counts.is_empty() {
            writeln!(f, "Readings per kind:")?;
            for (kind, count) in &self.kind_counts {
                writeln!(f, "  {}: {}", kind, count)?;
            }
        }

        Ok(())
    }
}

/// Statistics summary
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count(),
            min: stats.min(),
            max: stats.max(),
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// Online statistics accumulator (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// Fold in one value.
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation.
    pub fn std_dev(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            (self.m2 / (self.count - 1) as f64).sqrt()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_stats_match_known_values() {
        let mut stats = RunningStats::default();
        for value in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            stats.push(value);
        }
        assert_eq!(stats.count(), 8);
        assert_eq!(stats.min(), 2.0);
        assert_eq!(stats.max(), 9.0);
        assert!((stats.mean() - 5.0).abs() < 1e-9);
        // Sample std dev of the classic Welford example set.
        assert!((stats.std_dev() - 2.138).abs() < 1e-3);
    }

    #[test]
    fn aggregator_tracks_quality_and_kinds() {
        let mut agg = ReadingAggregator::new();
        agg.update(SensorKind::Traffic, ReadingQuality::Good);
        agg.update(SensorKind::Traffic, ReadingQuality::Fair);
        agg.update(SensorKind::Noise, ReadingQuality::Invalid);
        agg.record_tick_duration(12.5);

        let summary = agg.summary();
        assert_eq!(summary.total_readings, 3);
        assert_eq!(summary.good, 1);
        assert_eq!(summary.invalid, 1);
        assert!((summary.invalid_rate - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(summary.kind_counts["traffic"], 2);
        assert_eq!(summary.tick_duration_ms.count, 1);

        agg.reset();
        assert_eq!(agg.summary().total_readings, 0);
    }
}
