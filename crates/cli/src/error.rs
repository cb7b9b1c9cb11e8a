//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[allow(dead_code)]
#[derive(Error, Debug)]
pub enum CliError {
    /// Plan file not found
    #[error("Plan file not found: {path}")]
    ConfigNotFound { path: String },

    /// Plan parsing error
    #[error("Failed to parse plan: {message}")]
    ConfigParse { message: String },

    /// Plan validation error
    #[error("Plan validation failed: {message}")]
    ConfigValidation { message: String },

    /// Collector unreachable at startup
    #[error("Collector unreachable at {endpoint}: {message}")]
    CollectorUnreachable { endpoint: String, message: String },

    /// Simulation execution error
    #[error("Simulation failed: {message}")]
    SimulationExecution { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error wrapper
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

#[allow(dead_code)]
impl CliError {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
        }
    }

    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    pub fn collector_unreachable(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CollectorUnreachable {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    pub fn simulation_execution(message: impl Into<String>) -> Self {
        Self::SimulationExecution {
            message: message.into(),
        }
    }
}

/// Result type alias for CLI operations
#[allow(dead_code)]
pub type Result<T> = std::result::Result<T, CliError>;
