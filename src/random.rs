//! Seedable random source handed to every trial.
//!
//! Each trial owns its own [`RandomSource`], derived from the driver's master
//! seed and the trial ordinal. No generator is ever shared between threads, so
//! the randomness a trial sees does not depend on how the worker pool
//! schedules it.

use nalgebra::Vector3;
use rand::distributions::Uniform;
use rand::prelude::*;

/// Random source for sampling minimal subsets and any other draws a
/// strategy needs.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// Construct from a fixed seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Construct from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Independent stream for trial `trial` of a fit driven by `master_seed`.
    ///
    /// The same `(master_seed, trial)` pair always yields the same stream.
    pub fn for_trial(master_seed: u64, trial: usize) -> Self {
        Self::from_seed(derive_seed(master_seed, trial as u64))
    }

    /// Draw `k` distinct indices in `[0, n)`, in draw order.
    ///
    /// Returns `None` if fewer than `k` indices exist.
    pub fn next_index_sample(&mut self, n: usize, k: usize) -> Option<Vec<usize>> {
        if k > n {
            return None;
        }
        Some(rand::seq::index::sample(&mut self.rng, n, k).into_vec())
    }

    /// Uniform draw in `[low, high)`. Panics if `low >= high`.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.rng.sample(Uniform::new(low, high))
    }

    /// Direction drawn uniformly from the unit sphere.
    pub fn unit_vector(&mut self) -> Vector3<f64> {
        let cube = Uniform::new_inclusive(-1.0_f64, 1.0);
        loop {
            let v = Vector3::new(
                self.rng.sample(cube),
                self.rng.sample(cube),
                self.rng.sample(cube),
            );
            let norm_sq = v.norm_squared();
            if norm_sq > 1e-12 && norm_sq <= 1.0 {
                return v / norm_sq.sqrt();
            }
        }
    }

    /// The underlying generator, for draws not covered above.
    pub fn rng(&mut self) -> &mut impl Rng {
        &mut self.rng
    }
}

/// SplitMix64 finaliser over `master ^ golden * (trial + 1)`.
///
/// Neighbouring ordinals end up with unrelated seeds, and trial 0 does not
/// reuse the master seed itself.
fn derive_seed(master: u64, trial: u64) -> u64 {
    let mut z = master ^ trial.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
