//! Plan parsing
//!
//! Supports TOML (primary) and JSON formats.

use contracts::{ContractError, SimulationPlan};

/// Plan file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format (recommended)
    Toml,
    /// JSON format
    Json,
}

impl ConfigFormat {
    /// Infer format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse a TOML plan
pub fn parse_toml(content: &str) -> Result<SimulationPlan, ContractError> {
    toml::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse a JSON plan
pub fn parse_json(content: &str) -> Result<SimulationPlan, ContractError> {
    serde_json::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse a plan in the given format
pub fn parse(content: &str, format: ConfigFormat) -> Result<SimulationPlan, ContractError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml_minimal() {
        let content = r#"
[collector]
endpoint = "http://localhost:3000/api"
"#;
        let plan = parse_toml(content).unwrap();
        assert_eq!(plan.collector.endpoint, "http://localhost:3000/api");
        assert_eq!(plan.schedule.worker_count, 10);
    }

    #[test]
    fn test_parse_json_minimal() {
        let content = r#"{"collector": {"endpoint": "http://localhost:3000/api"}}"#;
        let plan = parse_json(content).unwrap();
        assert_eq!(plan.collector.endpoint, "http://localhost:3000/api");
    }

    #[test]
    fn test_parse_toml_invalid() {
        let result = parse_toml("not = [valid");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(ConfigFormat::from_extension("toml"), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_extension("TOML"), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_extension("json"), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_extension("yaml"), None);
    }
}
