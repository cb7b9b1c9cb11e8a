//! Delivery statistics for observability

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for one run, shared between the tick loop and the background
/// stats reporter.
#[derive(Debug, Default)]
pub struct DeliveryStats {
    /// Sensors the collector newly created
    sensors_registered: AtomicU64,
    /// Readings acknowledged by the collector
    data_points_sent: AtomicU64,
    /// Total successful requests
    successful_requests: AtomicU64,
    /// Total failed requests
    failed_requests: AtomicU64,
    /// Alerts the collector reported back
    alerts_generated: AtomicU64,
}

impl DeliveryStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_sensors_registered(&self) {
        self.sensors_registered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_data_points_sent(&self) {
        self.data_points_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_successful_requests(&self) {
        self.successful_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_failed_requests(&self) {
        self.failed_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_alerts(&self, count: u64) {
        self.alerts_generated.fetch_add(count, Ordering::Relaxed);
    }

    /// Get a consistent-enough copy of all counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            sensors_registered: self.sensors_registered.load(Ordering::Relaxed),
            data_points_sent: self.data_points_sent.load(Ordering::Relaxed),
            successful_requests: self.successful_requests.load(Ordering::Relaxed),
            failed_requests: self.failed_requests.load(Ordering::Relaxed),
            alerts_generated: self.alerts_generated.load(Ordering::Relaxed),
        }
    }

    /// Zero all counters.
    pub fn reset(&self) {
        self.sensors_registered.store(0, Ordering::Relaxed);
        self.data_points_sent.store(0, Ordering::Relaxed);
        self.successful_requests.store(0, Ordering::Relaxed);
        self.failed_requests.store(0, Ordering::Relaxed);
        self.alerts_generated.store(0, Ordering::Relaxed);
    }
}

/// Snapshot of delivery counters (for reporting)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub sensors_registered: u64,
    pub data_points_sent: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub alerts_generated: u64,
}

impl StatsSnapshot {
    /// Successful share of all requests, as a percentage. None before any
    /// request has completed.
    pub fn success_rate(&self) -> Option<f64> {
        let total = self.successful_requests + self.failed_requests;
        if total == 0 {
            return None;
        }
        Some(self.successful_requests as f64 / total as f64 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_and_reset() {
        let stats = DeliveryStats::new();
        stats.inc_sensors_registered();
        stats.inc_data_points_sent();
        stats.inc_data_points_sent();
        stats.inc_successful_requests();
        stats.inc_failed_requests();
        stats.add_alerts(3);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.sensors_registered, 1);
        assert_eq!(snapshot.data_points_sent, 2);
        assert_eq!(snapshot.alerts_generated, 3);

        stats.reset();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn success_rate_needs_at_least_one_request() {
        let stats = DeliveryStats::new();
        assert_eq!(stats.snapshot().success_rate(), None);

        stats.inc_successful_requests();
        stats.inc_successful_requests();
        stats.inc_successful_requests();
        stats.inc_failed_requests();
        let rate = stats.snapshot().success_rate().unwrap();
        assert!((rate - 75.0).abs() < 1e-9);
    }
}
