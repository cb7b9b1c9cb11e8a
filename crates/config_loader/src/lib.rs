//! # Config Loader
//!
//! Simulation plan loading and parsing.
//!
//! Responsibilities:
//! - Parse TOML/JSON plan files
//! - Validate plan legality
//! - Produce a `SimulationPlan`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::PlanLoader;
//! use std::path::Path;
//!
//! let plan = PlanLoader::load_from_path(Path::new("citypulse.toml")).unwrap();
//! println!("Collector: {}", plan.collector.endpoint);
//! ```

mod parser;
mod validator;

pub use contracts::SimulationPlan;
pub use parser::ConfigFormat;

use contracts::ContractError;
use std::path::Path;

/// Plan loader
///
/// Static methods to load a plan from a file or a string.
pub struct PlanLoader;

impl PlanLoader {
    /// Load a plan from a file path.
    ///
    /// Detects format from the file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<SimulationPlan, ContractError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load a plan from a string.
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<SimulationPlan, ContractError> {
        let plan = parser::parse(content, format)?;
        validator::validate(&plan)?;
        Ok(plan)
    }

    /// Serialize a plan to a TOML string
    pub fn to_toml(plan: &SimulationPlan) -> Result<String, ContractError> {
        toml::to_string_pretty(plan)
            .map_err(|e| ContractError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize a plan to a JSON string
    pub fn to_json(plan: &SimulationPlan) -> Result<String, ContractError> {
        serde_json::to_string_pretty(plan)
            .map_err(|e| ContractError::config_parse(format!("JSON serialize error: {e}")))
    }
}

impl PlanLoader {
    /// Infer plan format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            ContractError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }

    fn read_file(path: &Path) -> Result<String, ContractError> {
        Ok(std::fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_TOML: &str = r#"
[collector]
endpoint = "http://localhost:3000/api"

[schedule]
tick_interval_secs = 2.0
batch_size = 5

[fleet]
traffic = 3
waste = 2
"#;

    #[test]
    fn test_load_from_str_toml() {
        let result = PlanLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let plan = result.unwrap();
        assert_eq!(plan.collector.endpoint, "http://localhost:3000/api");
        assert_eq!(plan.fleet.traffic, 3);
    }

    #[test]
    fn test_round_trip_toml() {
        let plan = PlanLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml).unwrap();
        let serialized = PlanLoader::to_toml(&plan).unwrap();
        let plan2 = PlanLoader::load_from_str(&serialized, ConfigFormat::Toml).unwrap();
        assert_eq!(plan.collector.endpoint, plan2.collector.endpoint);
        assert_eq!(plan.fleet, plan2.fleet);
        assert_eq!(plan.city.landmarks.len(), plan2.city.landmarks.len());
    }

    #[test]
    fn test_round_trip_json() {
        let plan = PlanLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml).unwrap();
        let json = PlanLoader::to_json(&plan).unwrap();
        let plan2 = PlanLoader::load_from_str(&json, ConfigFormat::Json).unwrap();
        assert_eq!(plan.collector.endpoint, plan2.collector.endpoint);
    }

    #[test]
    fn test_validation_runs_after_parse() {
        // Zero tick interval should fail validation
        let content = r#"
[collector]
endpoint = "http://localhost:3000/api"

[schedule]
tick_interval_secs = 0.0
"#;
        let result = PlanLoader::load_from_str(content, ConfigFormat::Toml);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("tick_interval_secs"));
    }
}
