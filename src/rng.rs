//! Random number source for emission.
//!
//! The emitter takes any [`RandomSource`], so tests can drive it with a
//! fixed seed or a scripted sequence. [`StdRandom`] is the production source:
//! one generator per process, seeded once at startup.

use rand::rngs::{OsRng, StdRng};
use rand::{Rng, RngCore, SeedableRng};

/// Uniform scalar sampling in a caller-given range.
pub trait RandomSource {
    /// Uniform `f32` in `[min, max)`. Returns `min` when the range is empty.
    fn uniform_f32(&mut self, min: f32, max: f32) -> f32;

    /// Uniform `u32` in `[min, max]`.
    fn uniform_u32(&mut self, min: u32, max: u32) -> u32;
}

/// `rand`-backed generator.
#[derive(Debug, Clone)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Seed from OS entropy mixed with the current wall-clock time.
    pub fn from_entropy() -> Self {
        let mut seed = <StdRng as SeedableRng>::Seed::default();
        OsRng.fill_bytes(&mut seed);

        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        for (byte, t) in seed.iter_mut().zip(now.to_le_bytes()) {
            *byte ^= t;
        }

        Self {
            rng: StdRng::from_seed(seed),
        }
    }

    /// Deterministic generator for reproducible runs.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for StdRandom {
    fn uniform_f32(&mut self, min: f32, max: f32) -> f32 {
        if min < max {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    fn uniform_u32(&mut self, min: u32, max: u32) -> u32 {
        if min < max {
            self.rng.gen_range(min..=max)
        } else {
            min
        }
    }
}
