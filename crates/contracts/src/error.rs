//! Layered error definitions
//!
//! Categorized by source: config / fleet / collector

use thiserror::Error;

/// Unified contract-level error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Plan parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Plan validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Fleet Errors =====
    /// Sensor construction error
    #[error("fleet error for '{sensor_id}': {message}")]
    Fleet { sensor_id: String, message: String },

    // ===== Collector Errors =====
    /// Collector endpoint rejected or unreachable
    #[error("collector error at {endpoint}: {message}")]
    Collector { endpoint: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create a plan parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create a plan validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a fleet error
    pub fn fleet(sensor_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fleet {
            sensor_id: sensor_id.into(),
            message: message.into(),
        }
    }

    /// Create a collector error
    pub fn collector(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Collector {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }
}
