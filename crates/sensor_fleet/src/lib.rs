//! # Sensor Fleet
//!
//! The simulated sensor population: variant domain logic, the shared reading
//! pipeline, landmark-biased placement, and the fleet factory.
//!
//! A [`Sensor`] is a common record (baseline values, noise/drift factors,
//! status, last reading) paired with a [`VariantState`] tag that selects the
//! variant's baseline initializer and base-reading function. The rest of the
//! pipeline (failure simulation, temporal modulation, noise, drift, rounding,
//! quality scoring) is identical across variants.

mod clock;
mod error;
mod factory;
mod location;
mod pipeline;
mod rng;
mod sensor;
mod variants;

pub use clock::TickClock;
pub use error::FleetError;
pub use factory::FleetFactory;
pub use location::LocationProvider;
pub use rng::FleetRng;
pub use sensor::Sensor;
pub use variants::VariantState;
