//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CityPulse - Smart-city telemetry fleet simulator
#[derive(Parser, Debug)]
#[command(
    name = "citypulse",
    author,
    version,
    about = "Smart-city sensor fleet simulator",
    long_about = "Simulates a city-wide fleet of IoT sensors (traffic, parking, air \n\
                  quality, noise, water quality, waste, energy), registers them with a \n\
                  collector backend, and streams batched readings over HTTP."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "CITYPULSE_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        global = true,
        env = "CITYPULSE_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the telemetry simulation
    Run(RunArgs),

    /// Validate a plan file without running
    Validate(ValidateArgs),

    /// Display plan information
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to plan file (TOML or JSON)
    #[arg(short, long, default_value = "citypulse.toml", env = "CITYPULSE_CONFIG")]
    pub config: PathBuf,

    /// Override collector endpoint from the plan
    #[arg(long, env = "CITYPULSE_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Override tick interval in seconds
    #[arg(long, env = "CITYPULSE_INTERVAL")]
    pub interval: Option<f64>,

    /// Override total sensor count (redistributed proportionally per kind)
    #[arg(long, env = "CITYPULSE_SENSORS")]
    pub sensors: Option<usize>,

    /// Stop after this many minutes (default: run until signaled)
    #[arg(long, env = "CITYPULSE_DURATION")]
    pub duration: Option<u64>,

    /// Override batch auto-flush threshold
    #[arg(long, env = "CITYPULSE_BATCH_SIZE")]
    pub batch_size: Option<usize>,

    /// Override reading fan-out parallelism
    #[arg(long, env = "CITYPULSE_WORKERS")]
    pub workers: Option<usize>,

    /// RNG seed for a reproducible fleet (default: random)
    #[arg(long, env = "CITYPULSE_SEED")]
    pub seed: Option<u64>,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "CITYPULSE_METRICS_PORT")]
    pub metrics_port: u16,

    /// Validate the plan and print the fleet summary without running
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to plan file to validate
    #[arg(short, long, default_value = "citypulse.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to plan file
    #[arg(short, long, default_value = "citypulse.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show per-kind fleet composition
    #[arg(long)]
    pub fleet: bool,

    /// Show the landmark catalog
    #[arg(long)]
    pub landmarks: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}
