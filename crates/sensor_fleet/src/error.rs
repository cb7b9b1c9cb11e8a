//! Fleet error types

use thiserror::Error;

/// Errors raised while building the sensor population
#[derive(Debug, Error)]
pub enum FleetError {
    /// The plan resolved to zero sensors
    #[error("empty fleet: the plan configured zero sensors")]
    EmptyFleet,
}
