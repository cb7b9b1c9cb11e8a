//! CollectorTransport trait - the delivery client's output interface.
//!
//! The client and orchestrator are generic over this seam so tests can run
//! the whole pipeline against an in-memory collector.

use contracts::{Reading, SensorDescriptor};

use crate::DeliveryError;

/// Result of a registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// The collector created the sensor (201).
    Created,
    /// The sensor already existed (409); treated as success.
    AlreadyRegistered,
}

/// Collector acknowledgement for one reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmitReceipt {
    /// Alerts the collector raised for this reading, when it reports them.
    pub alerts: u64,
}

/// Collector health probe result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HealthReport {
    pub uptime_secs: u64,
}

/// Transport to a collector endpoint.
///
/// All transport implementations must implement this trait.
#[trait_variant::make(CollectorTransport: Send)]
pub trait LocalCollectorTransport {
    /// Transport name (used for logging)
    fn name(&self) -> &str;

    /// Register one sensor with the collector.
    ///
    /// # Errors
    /// Returns transport or unexpected-status errors.
    async fn register(&self, descriptor: &SensorDescriptor)
        -> Result<RegisterOutcome, DeliveryError>;

    /// Submit one reading.
    async fn submit(&self, reading: &Reading) -> Result<SubmitReceipt, DeliveryError>;

    /// Probe the collector's health endpoint.
    async fn health(&self) -> Result<HealthReport, DeliveryError>;
}
