//! HTTP transport to the collector backend.

use std::time::Duration;

use contracts::{CollectorConfig, Reading, SensorDescriptor};
use serde::Deserialize;
use tracing::debug;

use crate::transport::{HealthReport, RegisterOutcome, SubmitReceipt};
use crate::{CollectorTransport, DeliveryError};

const USER_AGENT: &str = concat!("citypulse/", env!("CARGO_PKG_VERSION"));

/// reqwest-backed transport speaking the collector's JSON API.
pub struct HttpCollector {
    base_url: String,
    client: reqwest::Client,
    health_timeout: Duration,
}

/// Body of a 201 data response; the alert count is optional.
#[derive(Debug, Deserialize)]
struct DataResponse {
    #[serde(default)]
    alerts: u64,
}

/// Body of a 200 health response.
#[derive(Debug, Deserialize)]
struct HealthResponse {
    #[serde(default)]
    uptime: u64,
}

impl HttpCollector {
    pub fn new(config: &CollectorConfig) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(DeliveryError::ClientBuild)?;

        Ok(Self {
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            client,
            health_timeout: Duration::from_secs(config.health_timeout_secs),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl CollectorTransport for HttpCollector {
    fn name(&self) -> &str {
        "http"
    }

    async fn register(
        &self,
        descriptor: &SensorDescriptor,
    ) -> Result<RegisterOutcome, DeliveryError> {
        let url = self.url("sensors");
        let response = self
            .client
            .post(&url)
            .json(descriptor)
            .send()
            .await
            .map_err(|e| DeliveryError::transport(&url, e))?;

        match response.status().as_u16() {
            201 => Ok(RegisterOutcome::Created),
            409 => {
                debug!(sensor_id = %descriptor.sensor_id, "sensor already registered");
                Ok(RegisterOutcome::AlreadyRegistered)
            }
            status => Err(DeliveryError::unexpected_status(url, status)),
        }
    }

    async fn submit(&self, reading: &Reading) -> Result<SubmitReceipt, DeliveryError> {
        let url = self.url("sensors/data");
        let response = self
            .client
            .post(&url)
            .json(reading)
            .send()
            .await
            .map_err(|e| DeliveryError::transport(&url, e))?;

        match response.status().as_u16() {
            201 => {
                // A missing or malformed body simply means no alerts.
                let body: DataResponse = response.json().await.unwrap_or(DataResponse {
                    alerts: 0,
                });
                Ok(SubmitReceipt { alerts: body.alerts })
            }
            status => Err(DeliveryError::unexpected_status(url, status)),
        }
    }

    async fn health(&self) -> Result<HealthReport, DeliveryError> {
        let url = self.url("health");
        let response = self
            .client
            .get(&url)
            .timeout(self.health_timeout)
            .send()
            .await
            .map_err(|e| DeliveryError::transport(&url, e))?;

        match response.status().as_u16() {
            200 => {
                let body: HealthResponse =
                    response.json().await.unwrap_or(HealthResponse { uptime: 0 });
                Ok(HealthReport {
                    uptime_secs: body.uptime,
                })
            }
            status => Err(DeliveryError::unexpected_status(url, status)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collector(endpoint: &str) -> HttpCollector {
        HttpCollector::new(&CollectorConfig {
            endpoint: endpoint.to_string(),
            request_timeout_secs: 30,
            health_timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let with = collector("http://localhost:3000/api/");
        let without = collector("http://localhost:3000/api");
        assert_eq!(with.url("sensors"), "http://localhost:3000/api/sensors");
        assert_eq!(with.url("sensors"), without.url("sensors"));
        assert_eq!(
            with.url("sensors/data"),
            "http://localhost:3000/api/sensors/data"
        );
    }

    #[test]
    fn alert_count_defaults_to_zero() {
        let body: DataResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(body.alerts, 0);
        let body: DataResponse = serde_json::from_str(r#"{"alerts": 3}"#).unwrap();
        assert_eq!(body.alerts, 3);
    }
}
