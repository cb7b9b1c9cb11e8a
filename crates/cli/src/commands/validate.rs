//! `validate` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<PlanSummary>,
}

#[derive(Serialize)]
struct PlanSummary {
    version: String,
    endpoint: String,
    tick_interval_secs: f64,
    batch_size: usize,
    sensor_count: usize,
    landmark_count: usize,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating plan");

    let result = validate_plan(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Plan validation failed")
    }
}

fn validate_plan(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    match config_loader::PlanLoader::load_from_path(&args.config) {
        Ok(plan) => {
            let warnings = collect_warnings(&plan);

            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(PlanSummary {
                    version: format!("{:?}", plan.version),
                    endpoint: plan.collector.endpoint.clone(),
                    tick_interval_secs: plan.schedule.tick_interval_secs,
                    batch_size: plan.schedule.batch_size,
                    sensor_count: plan.fleet.total(),
                    landmark_count: plan.city.landmarks.len(),
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect plan warnings (non-fatal issues)
fn collect_warnings(plan: &contracts::SimulationPlan) -> Vec<String> {
    let mut warnings = Vec::new();

    if plan.city.landmarks.is_empty() {
        warnings.push("No landmarks configured - all sensors get random locations".to_string());
    }

    if plan.schedule.tick_interval_secs < 1.0 {
        warnings.push(format!(
            "Tick interval of {}s is aggressive for {} sensors",
            plan.schedule.tick_interval_secs,
            plan.fleet.total()
        ));
    }

    if plan.schedule.seed.is_none() {
        warnings.push("No seed configured - runs will not be reproducible".to_string());
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(config: std::path::PathBuf) -> ValidateArgs {
        ValidateArgs {
            config,
            json: false,
        }
    }

    #[test]
    fn valid_plan_file_passes_with_summary() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "[collector]").unwrap();
        writeln!(file, "endpoint = \"http://localhost:3000/api\"").unwrap();

        let result = validate_plan(&args(file.path().to_path_buf()));
        assert!(result.valid);
        let summary = result.summary.unwrap();
        assert_eq!(summary.sensor_count, 50);
        assert_eq!(summary.endpoint, "http://localhost:3000/api");
    }

    #[test]
    fn missing_file_reports_invalid() {
        let result = validate_plan(&args("/nonexistent/plan.toml".into()));
        assert!(!result.valid);
        assert!(result.error.unwrap().contains("not found"));
    }

    #[test]
    fn invalid_plan_carries_the_validation_error() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "[collector]").unwrap();
        writeln!(file, "endpoint = \"ftp://collector\"").unwrap();

        let result = validate_plan(&args(file.path().to_path_buf()));
        assert!(!result.valid);
        assert!(result.error.unwrap().contains("collector.endpoint"));
    }

    #[test]
    fn default_plan_warns_about_missing_seed() {
        let warnings = collect_warnings(&contracts::SimulationPlan::default());
        assert!(warnings.iter().any(|w| w.contains("seed")));
    }
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Plan is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Collector: {}", summary.endpoint);
            println!("  Tick interval: {}s", summary.tick_interval_secs);
            println!("  Batch size: {}", summary.batch_size);
            println!("  Sensors: {}", summary.sensor_count);
            println!("  Landmarks: {}", summary.landmark_count);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Plan is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
