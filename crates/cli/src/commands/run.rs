//! `run` command implementation.

use anyhow::{Context, Result};
use contracts::SensorKind;
use delivery::HttpCollector;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::pipeline::{Simulation, SimulationConfig};

/// Execute the `run` command
pub async fn run_simulation(args: &RunArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading plan");

    if !args.config.exists() {
        anyhow::bail!("Plan file not found: {}", args.config.display());
    }

    let mut plan = config_loader::PlanLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load plan from {}", args.config.display()))?;

    // Apply CLI overrides
    if let Some(ref endpoint) = args.endpoint {
        info!(endpoint = %endpoint, "Overriding collector endpoint from CLI");
        plan.collector.endpoint = endpoint.clone();
    }
    if let Some(interval) = args.interval {
        info!(interval, "Overriding tick interval from CLI");
        plan.schedule.tick_interval_secs = interval;
    }
    if let Some(total) = args.sensors {
        info!(total, "Overriding fleet size from CLI");
        plan.fleet = plan.fleet.scaled_to_total(total);
    }
    if let Some(duration) = args.duration {
        plan.schedule.duration_mins = Some(duration);
    }
    if let Some(batch_size) = args.batch_size {
        plan.schedule.batch_size = batch_size;
    }
    if let Some(workers) = args.workers {
        plan.schedule.worker_count = workers;
    }
    if let Some(seed) = args.seed {
        plan.schedule.seed = Some(seed);
    }

    info!(
        endpoint = %plan.collector.endpoint,
        sensors = plan.fleet.total(),
        interval = plan.schedule.tick_interval_secs,
        batch_size = plan.schedule.batch_size,
        "Plan loaded"
    );

    // Dry run - validate and summarize without touching the collector
    if args.dry_run {
        info!("Dry run mode - plan is valid, exiting");
        print_plan_summary(&plan);
        return Ok(());
    }

    let seed = plan.schedule.seed.unwrap_or_else(rand::random);
    let config = SimulationConfig {
        plan: plan.clone(),
        seed,
        metrics_port: if args.metrics_port == 0 {
            None
        } else {
            Some(args.metrics_port)
        },
    };

    let transport = HttpCollector::new(&plan.collector)
        .context("Failed to build HTTP client for the collector")?;
    let simulation = Simulation::new(config, transport);

    // Signal handler feeds a watch channel; the tick loop observes it at
    // tick boundaries and drains before exiting.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        warn!("Received shutdown signal, draining...");
        let _ = shutdown_tx.send(true);
    });

    info!(seed, "Starting simulation...");

    let stats = simulation
        .run(shutdown_rx)
        .await
        .context("Simulation failed")?;

    stats.print_summary();
    info!("CityPulse finished");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Print plan summary for dry-run mode
fn print_plan_summary(plan: &contracts::SimulationPlan) {
    println!("\n=== Plan Summary ===\n");
    println!("Collector: {}", plan.collector.endpoint);
    println!(
        "Schedule: every {}s, batch {}, {} workers",
        plan.schedule.tick_interval_secs, plan.schedule.batch_size, plan.schedule.worker_count
    );

    println!("\nFleet ({} sensors):", plan.fleet.total());
    for kind in SensorKind::ALL {
        let count = plan.fleet.count_for(kind);
        if count > 0 {
            println!("  - {}: {}", kind.label(), count);
        }
    }

    println!(
        "\nCity: {} landmarks, {:.0}% landmark bias",
        plan.city.landmarks.len(),
        plan.city.landmark_bias * 100.0
    );
    println!();
}
