//! Simulation pipeline: tick orchestration and run statistics.

mod orchestrator;
mod stats;

pub use orchestrator::{Simulation, SimulationConfig};
pub use stats::SimulationStats;
