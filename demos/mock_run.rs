//! Mock Run Demo
//!
//! Runs a small sensor fleet against an in-process mock collector, so the
//! whole pipeline can be exercised without a backend.
//!
//! Run with: cargo run --bin mock_run [plan.toml]

use contracts::{Reading, SensorDescriptor, SimulationPlan};
use delivery::transport::{HealthReport, RegisterOutcome, SubmitReceipt};
use delivery::{CollectorTransport, DeliveryClient, DeliveryError};
use observability::ReadingAggregator;
use sensor_fleet::{FleetFactory, TickClock};

/// Accepts everything and logs it.
struct MockCollector;

impl CollectorTransport for MockCollector {
    fn name(&self) -> &str {
        "mock"
    }

    async fn register(
        &self,
        descriptor: &SensorDescriptor,
    ) -> Result<RegisterOutcome, DeliveryError> {
        tracing::debug!(sensor_id = %descriptor.sensor_id, "mock register");
        Ok(RegisterOutcome::Created)
    }

    async fn submit(&self, reading: &Reading) -> Result<SubmitReceipt, DeliveryError> {
        tracing::debug!(sensor_id = %reading.sensor_id, quality = %reading.quality, "mock submit");
        Ok(SubmitReceipt { alerts: 0 })
    }

    async fn health(&self) -> Result<HealthReport, DeliveryError> {
        Ok(HealthReport { uptime_secs: 0 })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("Starting Mock Run Demo");

    let plan = if let Some(path) = std::env::args().nth(1) {
        tracing::info!(path = %path, "Loading plan");
        config_loader::PlanLoader::load_from_path(std::path::Path::new(&path))?
    } else {
        let mut plan = SimulationPlan::default();
        plan.fleet = plan.fleet.scaled_to_total(10);
        plan
    };

    let seed = plan.schedule.seed.unwrap_or(42);
    let mut sensors = FleetFactory::build(&plan, seed)?;
    tracing::info!(fleet = sensors.len(), seed, "Fleet built");

    let client = DeliveryClient::new(MockCollector, plan.schedule.batch_size);
    client.check_health().await?;

    for sensor in &sensors {
        client.register_sensor(&sensor.descriptor()).await;
    }
    tracing::info!("Fleet registered");

    let mut aggregator = ReadingAggregator::new();
    for tick in 1..=5u32 {
        let clock = TickClock::current();
        for sensor in sensors.iter_mut() {
            let reading = sensor.generate_reading_at(&clock);
            aggregator.update(sensor.kind(), reading.quality);
            client.enqueue(reading).await;
        }
        client.flush().await;
        tracing::info!(tick, "Tick complete");
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    }

    let snapshot = client.stats().snapshot();
    tracing::info!(
        data_points_sent = snapshot.data_points_sent,
        successful_requests = snapshot.successful_requests,
        "Demo finished"
    );
    print!("{}", aggregator.summary());

    Ok(())
}
