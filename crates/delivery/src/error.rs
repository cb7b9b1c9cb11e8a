//! Delivery error types

use thiserror::Error;

/// Errors raised while talking to the collector
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Request could not be sent or the response never arrived
    #[error("transport error for {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The collector answered with an unexpected status
    #[error("unexpected status {status} from {endpoint}")]
    UnexpectedStatus { endpoint: String, status: u16 },

    /// The HTTP client could not be constructed
    #[error("failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl DeliveryError {
    pub fn transport(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            source,
        }
    }

    pub fn unexpected_status(endpoint: impl Into<String>, status: u16) -> Self {
        Self::UnexpectedStatus {
            endpoint: endpoint.into(),
            status,
        }
    }
}
