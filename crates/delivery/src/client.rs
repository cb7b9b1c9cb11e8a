//! DeliveryClient - batch buffering and best-effort sends.

use std::sync::Arc;

use contracts::Reading;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::transport::{HealthReport, RegisterOutcome};
use crate::{CollectorTransport, DeliveryError, DeliveryStats};

/// Wraps a transport with the batch buffer and run statistics.
///
/// Every operation is best-effort: failures are counted and logged but never
/// bubble up to the tick loop. Only [`check_health`](Self::check_health)
/// returns its error, because startup wants to abort on an unreachable
/// collector.
pub struct DeliveryClient<T> {
    transport: T,
    batch_size: usize,
    pending: Mutex<Vec<Reading>>,
    stats: Arc<DeliveryStats>,
}

impl<T: CollectorTransport> DeliveryClient<T> {
    pub fn new(transport: T, batch_size: usize) -> Self {
        Self {
            transport,
            batch_size: batch_size.max(1),
            pending: Mutex::new(Vec::new()),
            stats: Arc::new(DeliveryStats::new()),
        }
    }

    /// Shared statistics handle for background reporting.
    pub fn stats(&self) -> Arc<DeliveryStats> {
        Arc::clone(&self.stats)
    }

    /// Register one sensor. A 409 means the collector already knows it and
    /// counts as success without touching the registration counter.
    pub async fn register_sensor(&self, descriptor: &contracts::SensorDescriptor) -> bool {
        match self.transport.register(descriptor).await {
            Ok(RegisterOutcome::Created) => {
                self.stats.inc_sensors_registered();
                self.stats.inc_successful_requests();
                debug!(sensor_id = %descriptor.sensor_id, "sensor registered");
                true
            }
            Ok(RegisterOutcome::AlreadyRegistered) => true,
            Err(error) => {
                self.stats.inc_failed_requests();
                warn!(sensor_id = %descriptor.sensor_id, %error, "registration failed");
                false
            }
        }
    }

    /// Send one reading immediately, bypassing the batch buffer.
    pub async fn send_reading(&self, reading: &Reading) -> bool {
        match self.transport.submit(reading).await {
            Ok(receipt) => {
                self.stats.inc_data_points_sent();
                self.stats.inc_successful_requests();
                if receipt.alerts > 0 {
                    self.stats.add_alerts(receipt.alerts);
                    warn!(
                        sensor_id = %reading.sensor_id,
                        alerts = receipt.alerts,
                        "collector raised alerts"
                    );
                }
                true
            }
            Err(error) => {
                self.stats.inc_failed_requests();
                warn!(sensor_id = %reading.sensor_id, %error, "send failed");
                false
            }
        }
    }

    /// Buffer a reading, flushing automatically once the batch fills.
    pub async fn enqueue(&self, reading: Reading) {
        let should_flush = {
            let mut pending = self.pending.lock().await;
            pending.push(reading);
            pending.len() >= self.batch_size
        };
        if should_flush {
            self.flush().await;
        }
    }

    /// Send everything buffered, one reading at a time. A failed send does
    /// not block the rest of the batch. Returns (sent, attempted).
    pub async fn flush(&self) -> (usize, usize) {
        let batch = {
            let mut pending = self.pending.lock().await;
            std::mem::take(&mut *pending)
        };
        if batch.is_empty() {
            return (0, 0);
        }

        let total = batch.len();
        let mut sent = 0usize;
        for reading in &batch {
            if self.send_reading(reading).await {
                sent += 1;
            }
        }
        debug!(sent, total, transport = self.transport.name(), "batch flushed");
        (sent, total)
    }

    /// Probe the collector. Errors propagate so startup can gate on them.
    pub async fn check_health(&self) -> Result<HealthReport, DeliveryError> {
        self.transport.health().await
    }

    pub async fn pending_len(&self) -> usize {
        self.pending.lock().await.len()
    }
}
