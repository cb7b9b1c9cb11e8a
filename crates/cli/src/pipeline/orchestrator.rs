//! Simulation orchestrator.
//!
//! Owns the whole run lifecycle: health gate, fleet construction and
//! registration, the tick loop with bounded fan-out, and graceful drain.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use contracts::{Reading, SensorKind, SimulationPlan};
use delivery::{CollectorTransport, DeliveryClient};
use observability::ReadingAggregator;
use sensor_fleet::{FleetFactory, Sensor};
use tokio::sync::{mpsc, watch, Mutex, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::stats::SimulationStats;

/// Everything a run needs beyond the transport
pub struct SimulationConfig {
    /// The loaded (and override-applied) plan
    pub plan: SimulationPlan,

    /// Fleet RNG seed, already resolved
    pub seed: u64,

    /// Prometheus listener port (None = disabled)
    pub metrics_port: Option<u16>,
}

/// Run lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Created,
    Registering,
    Running,
    Draining,
    Stopped,
}

/// Drives one simulation run against a collector transport
pub struct Simulation<T> {
    config: SimulationConfig,
    client: DeliveryClient<T>,
    phase: Phase,
}

impl<T: CollectorTransport + 'static> Simulation<T> {
    pub fn new(config: SimulationConfig, transport: T) -> Self {
        let batch_size = config.plan.schedule.batch_size;
        Self {
            config,
            client: DeliveryClient::new(transport, batch_size),
            phase: Phase::Created,
        }
    }

    fn set_phase(&mut self, next: Phase) {
        debug!(from = ?self.phase, to = ?next, "phase transition");
        self.phase = next;
    }

    /// Run until the duration limit or a shutdown signal, then drain.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> Result<SimulationStats> {
        let started = Instant::now();

        if let Some(port) = self.config.metrics_port {
            observability::init_metrics_only(port)?;
        }

        self.set_phase(Phase::Registering);

        // An unreachable collector aborts the run before any sensor exists.
        let report = self.client.check_health().await.with_context(|| {
            format!(
                "Collector unreachable at {}",
                self.config.plan.collector.endpoint
            )
        })?;
        info!(uptime_secs = report.uptime_secs, "Collector is healthy");

        let sensors = FleetFactory::build(&self.config.plan, self.config.seed)
            .context("Failed to build the sensor fleet")?;
        let fleet_size = sensors.len();

        for sensor in &sensors {
            let ok = self.client.register_sensor(&sensor.descriptor()).await;
            observability::record_registration(ok);
        }
        info!(
            registered = self.client.stats().snapshot().sensors_registered,
            fleet = fleet_size,
            "Fleet registered"
        );

        let sensor_ids: Vec<String> = sensors.iter().map(|s| s.id().to_string()).collect();
        let sensors: Vec<Arc<Mutex<Sensor>>> = sensors
            .into_iter()
            .map(|s| Arc::new(Mutex::new(s)))
            .collect();

        let reporter = self.spawn_stats_reporter();

        self.set_phase(Phase::Running);
        info!(
            interval_secs = self.config.plan.schedule.tick_interval_secs,
            workers = self.config.plan.schedule.worker_count,
            "Entering tick loop"
        );

        let schedule = self.config.plan.schedule.clone();
        let tick_interval = Duration::from_secs_f64(schedule.tick_interval_secs.max(0.0));
        let task_timeout = Duration::from_secs(schedule.task_timeout_secs);
        let semaphore = Arc::new(Semaphore::new(schedule.worker_count.max(1)));
        let deadline = schedule
            .duration_mins
            .map(|mins| started + Duration::from_secs(mins * 60));

        let mut aggregator = ReadingAggregator::new();
        let mut ticks: u64 = 0;
        let mut task_failures: u64 = 0;

        loop {
            if *shutdown.borrow() {
                info!("Shutdown requested, leaving tick loop");
                break;
            }
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    info!("Duration limit reached, leaving tick loop");
                    break;
                }
            }

            let tick_started = Instant::now();
            let (tx, mut rx) = mpsc::channel::<(SensorKind, Reading)>(sensors.len().max(1));
            let mut tasks = JoinSet::new();

            for (sensor, sensor_id) in sensors.iter().zip(&sensor_ids) {
                let sensor = Arc::clone(sensor);
                let sensor_id = sensor_id.clone();
                let semaphore = Arc::clone(&semaphore);
                let tx = tx.clone();
                tasks.spawn(async move {
                    let Ok(_permit) = semaphore.acquire_owned().await else {
                        return false;
                    };
                    let result = tokio::time::timeout(task_timeout, async {
                        let mut sensor = sensor.lock().await;
                        (sensor.kind(), sensor.generate_reading())
                    })
                    .await;
                    match result {
                        Ok(pair) => {
                            let _ = tx.send(pair).await;
                            true
                        }
                        Err(_) => {
                            warn!(sensor_id = %sensor_id, "Sensor reading timed out");
                            false
                        }
                    }
                });
            }
            drop(tx);

            // Single consumer: only the tick loop touches the batch buffer.
            let mut tick_readings = 0usize;
            while let Some((kind, reading)) = rx.recv().await {
                observability::record_reading(kind, reading.quality);
                aggregator.update(kind, reading.quality);
                tick_readings += 1;
                self.client.enqueue(reading).await;
            }
            while let Some(result) = tasks.join_next().await {
                if !result.unwrap_or(false) {
                    task_failures += 1;
                }
            }

            let (sent, total) = self.client.flush().await;
            observability::record_batch_flush(sent, total);

            ticks += 1;
            let elapsed = tick_started.elapsed();
            let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
            observability::record_tick(elapsed_ms, tick_readings);
            aggregator.record_tick_duration(elapsed_ms);
            debug!(
                tick = ticks,
                readings = tick_readings,
                elapsed_ms = format!("{elapsed_ms:.1}"),
                "Tick complete"
            );

            let remaining = tick_interval.saturating_sub(elapsed);
            tokio::select! {
                _ = tokio::time::sleep(remaining) => {}
                _ = shutdown.changed() => {}
            }
        }

        self.set_phase(Phase::Draining);
        reporter.abort();
        let (sent, total) = self.client.flush().await;
        if total > 0 {
            observability::record_batch_flush(sent, total);
        }

        self.set_phase(Phase::Stopped);
        info!(ticks, task_failures, "Simulation stopped");

        Ok(SimulationStats {
            ticks,
            fleet_size,
            duration: started.elapsed(),
            task_failures,
            delivery: self.client.stats().snapshot(),
            readings: aggregator.summary(),
        })
    }

    /// Periodic progress logging; aborted at drain time.
    fn spawn_stats_reporter(&self) -> tokio::task::JoinHandle<()> {
        let stats = self.client.stats();
        let interval = Duration::from_secs(self.config.plan.schedule.stats_interval_secs.max(1));
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                let snapshot = stats.snapshot();
                info!(
                    data_points_sent = snapshot.data_points_sent,
                    successful_requests = snapshot.successful_requests,
                    failed_requests = snapshot.failed_requests,
                    alerts = snapshot.alerts_generated,
                    success_rate = snapshot
                        .success_rate()
                        .map(|r| format!("{r:.1}%"))
                        .unwrap_or_else(|| "N/A".to_string()),
                    "Delivery progress"
                );
            }
        })
    }
}
