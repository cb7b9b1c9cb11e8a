//! # Contracts
//!
//! Frozen interface contracts shared by every citypulse crate: the sensor
//! model, reading value objects, the simulation plan (config schema), and the
//! layered error type. Business crates depend only on this crate; reverse
//! dependencies are prohibited.
//!
//! ## Time model
//! - Readings carry ISO-8601 local timestamps captured at tick generation.
//! - One reading per sensor per tick; ticks are fixed-interval.

mod descriptor;
mod error;
mod metric;
mod plan;
mod reading;
mod sensor;

pub use descriptor::*;
pub use error::*;
pub use metric::*;
pub use plan::*;
pub use reading::*;
pub use sensor::*;
