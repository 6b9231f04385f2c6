//! Deterministic random number generation
//!
//! Every garden and every flower synthesizer owns its own ChaCha stream,
//! seeded from values derived out of the founding quote.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub type GardenRng = ChaCha8Rng;

pub fn seeded(seed: u64) -> GardenRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Helper functions for common random operations
pub trait RngExt {
    /// Uniform in `[min, max)`; returns `min` when the range is empty.
    fn uniform(&mut self, min: f64, max: f64) -> f64;
    fn chance(&mut self, probability: f64) -> bool;
    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>;
}

impl<R: Rng> RngExt for R {
    fn uniform(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        self.gen::<f64>() * (max - min) + min
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.gen::<f64>() < probability
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            items.get(self.gen_range(0..items.len()))
        }
    }
}
