//! `info` command implementation.

use anyhow::{Context, Result};
use contracts::SensorKind;
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;

/// Plan info for JSON output
#[derive(Serialize)]
struct PlanInfo {
    version: String,
    collector: CollectorInfo,
    schedule: ScheduleInfo,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fleet: Vec<KindInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    landmarks: Vec<LandmarkInfo>,
}

#[derive(Serialize)]
struct CollectorInfo {
    endpoint: String,
    request_timeout_secs: u64,
    health_timeout_secs: u64,
}

#[derive(Serialize)]
struct ScheduleInfo {
    tick_interval_secs: f64,
    worker_count: usize,
    batch_size: usize,
    stats_interval_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_mins: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
}

#[derive(Serialize)]
struct KindInfo {
    kind: String,
    count: usize,
}

#[derive(Serialize)]
struct LandmarkInfo {
    label: String,
    latitude: f64,
    longitude: f64,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading plan info");

    if !args.config.exists() {
        anyhow::bail!("Plan file not found: {}", args.config.display());
    }

    let plan = config_loader::PlanLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load plan from {}", args.config.display()))?;

    if args.json {
        let info = build_plan_info(&plan, args);
        let json = serde_json::to_string_pretty(&info).context("Failed to serialize plan info")?;
        println!("{}", json);
    } else {
        print_plan_info(&plan, args);
    }

    Ok(())
}

fn build_plan_info(plan: &contracts::SimulationPlan, args: &InfoArgs) -> PlanInfo {
    let fleet = if args.fleet {
        SensorKind::ALL
            .iter()
            .map(|kind| KindInfo {
                kind: kind.as_str().to_string(),
                count: plan.fleet.count_for(*kind),
            })
            .collect()
    } else {
        Vec::new()
    };

    let landmarks = if args.landmarks {
        plan.city
            .landmarks
            .iter()
            .map(|l| LandmarkInfo {
                label: l.label.clone(),
                latitude: l.latitude,
                longitude: l.longitude,
            })
            .collect()
    } else {
        Vec::new()
    };

    PlanInfo {
        version: format!("{:?}", plan.version),
        collector: CollectorInfo {
            endpoint: plan.collector.endpoint.clone(),
            request_timeout_secs: plan.collector.request_timeout_secs,
            health_timeout_secs: plan.collector.health_timeout_secs,
        },
        schedule: ScheduleInfo {
            tick_interval_secs: plan.schedule.tick_interval_secs,
            worker_count: plan.schedule.worker_count,
            batch_size: plan.schedule.batch_size,
            stats_interval_secs: plan.schedule.stats_interval_secs,
            duration_mins: plan.schedule.duration_mins,
            seed: plan.schedule.seed,
        },
        fleet,
        landmarks,
    }
}

fn print_plan_info(plan: &contracts::SimulationPlan, args: &InfoArgs) {
    println!("=== CityPulse Plan ===\n");

    println!("Collector");
    println!("  Endpoint: {}", plan.collector.endpoint);
    println!(
        "  Timeouts: {}s request / {}s health",
        plan.collector.request_timeout_secs, plan.collector.health_timeout_secs
    );

    println!("\nSchedule");
    println!("  Tick interval: {}s", plan.schedule.tick_interval_secs);
    println!("  Workers: {}", plan.schedule.worker_count);
    println!("  Batch size: {}", plan.schedule.batch_size);
    match plan.schedule.duration_mins {
        Some(mins) => println!("  Duration: {} min", mins),
        None => println!("  Duration: until signaled"),
    }
    match plan.schedule.seed {
        Some(seed) => println!("  Seed: {}", seed),
        None => println!("  Seed: random"),
    }

    println!("\nFleet ({} sensors)", plan.fleet.total());
    if args.fleet {
        for kind in SensorKind::ALL {
            println!("  {}: {}", kind.label(), plan.fleet.count_for(kind));
        }
    }

    println!(
        "\nCity: {} landmarks, bias {:.0}%",
        plan.city.landmarks.len(),
        plan.city.landmark_bias * 100.0
    );
    if args.landmarks {
        for landmark in &plan.city.landmarks {
            println!(
                "  {} ({:.4}, {:.4})",
                landmark.label, landmark.latitude, landmark.longitude
            );
        }
    }

    println!();
}
