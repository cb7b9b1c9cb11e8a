//! Deterministic per-sensor RNG.
//!
//! Each sensor owns an independent `SmallRng` seeded by
//!
//!   seed = global_seed XOR (sensor_index * GOLDEN_GAMMA)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive indices uniformly across the seed space. Sensors
//! therefore never share RNG state, and growing the fleet does not disturb
//! the streams of existing sensors.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// 64-bit fractional golden-ratio constant for seed mixing.
const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-sensor deterministic RNG.
#[derive(Debug)]
pub struct FleetRng(SmallRng);

impl FleetRng {
    /// Seed deterministically from the run's global seed and a sensor index.
    pub fn seeded(global_seed: u64, index: u64) -> Self {
        let seed = global_seed ^ index.wrapping_mul(GOLDEN_GAMMA);
        FleetRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform draw in the inclusive range `[lo, hi]`.
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if lo >= hi {
            return lo;
        }
        self.0.gen_range(lo..=hi)
    }

    /// Uniform integer draw in the inclusive range `[lo, hi]`.
    pub fn int_range(&mut self, lo: i64, hi: i64) -> i64 {
        if lo >= hi {
            return lo;
        }
        self.0.gen_range(lo..=hi)
    }

    /// Bernoulli draw: true with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.0.gen::<f64>() < p
    }

    /// Gaussian draw. A non-positive standard deviation yields the mean.
    pub fn gaussian(&mut self, mean: f64, std_dev: f64) -> f64 {
        if std_dev <= 0.0 {
            return mean;
        }
        match Normal::new(mean, std_dev) {
            Ok(normal) => normal.sample(&mut self.0),
            Err(_) => mean,
        }
    }

    /// Pick one element uniformly.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let index = self.0.gen_range(0..items.len());
        &items[index]
    }
}
