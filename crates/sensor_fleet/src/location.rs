//! Location provider - landmark-biased placement for new sensors.

use contracts::{CityConfig, GeoLocation};

use crate::FleetRng;

/// Assigns coordinates to new sensors: with `landmark_bias` probability a
/// named catalog point, otherwise a uniform draw inside the city bounds.
pub struct LocationProvider {
    city: CityConfig,
}

impl LocationProvider {
    pub fn new(city: CityConfig) -> Self {
        Self { city }
    }

    /// Draw a location for one new sensor.
    pub fn assign(&self, rng: &mut FleetRng) -> GeoLocation {
        if !self.city.landmarks.is_empty() && rng.chance(self.city.landmark_bias) {
            let landmark = rng.pick(&self.city.landmarks);
            return GeoLocation::new(
                landmark.latitude,
                landmark.longitude,
                landmark.label.clone(),
            );
        }

        let bounds = &self.city.bounds;
        let latitude = rng.uniform(bounds.south, bounds.north);
        let longitude = rng.uniform(bounds.west, bounds.east);
        GeoLocation::new(
            latitude,
            longitude,
            format!("Random Location ({latitude:.4}, {longitude:.4})"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::Landmark;

    #[test]
    fn full_bias_always_lands_on_a_landmark() {
        let mut city = CityConfig::default();
        city.landmark_bias = 1.0;
        city.landmarks = vec![Landmark::new(40.7589, -73.9851, "Times Square")];
        let provider = LocationProvider::new(city);
        let mut rng = FleetRng::seeded(0, 0);

        for _ in 0..20 {
            let location = provider.assign(&mut rng);
            assert_eq!(location.address, "Times Square");
        }
    }

    #[test]
    fn zero_bias_stays_inside_bounds() {
        let mut city = CityConfig::default();
        city.landmark_bias = 0.0;
        let bounds = city.bounds;
        let provider = LocationProvider::new(city);
        let mut rng = FleetRng::seeded(0, 1);

        for _ in 0..100 {
            let location = provider.assign(&mut rng);
            assert!((bounds.south..=bounds.north).contains(&location.latitude));
            assert!((bounds.west..=bounds.east).contains(&location.longitude));
            assert!(location.address.starts_with("Random Location"));
        }
    }

    #[test]
    fn empty_catalog_falls_back_to_bounds() {
        let mut city = CityConfig::default();
        city.landmark_bias = 1.0;
        city.landmarks.clear();
        let provider = LocationProvider::new(city);
        let mut rng = FleetRng::seeded(0, 2);
        let location = provider.assign(&mut rng);
        assert!(location.address.starts_with("Random Location"));
    }
}
