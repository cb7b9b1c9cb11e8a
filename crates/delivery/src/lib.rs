//! # Delivery
//!
//! Best-effort reading delivery to the collector: the transport seam, the
//! HTTP implementation, the batch buffer, and run statistics.
//!
//! Delivery is never fatal to a run. Failed registrations and sends are
//! counted and logged; the tick loop keeps going.

pub mod client;
pub mod error;
pub mod http;
pub mod stats;
pub mod transport;

pub use client::DeliveryClient;
pub use error::DeliveryError;
pub use http::HttpCollector;
pub use stats::{DeliveryStats, StatsSnapshot};
pub use transport::{CollectorTransport, HealthReport, RegisterOutcome, SubmitReceipt};
