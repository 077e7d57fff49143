//! # Random Sources
//!
//! Injected randomness for simulated providers.
//!
//! [`ThreadRandom`] draws from the thread-local generator. [`SeededRandom`]
//! is reproducible and is what tests use.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// A source of random numbers.
pub trait RandomSource: Send + Sync + fmt::Debug {
    /// Returns a value in `0..=max`.
    fn up_to(&self, max: u64) -> u64;

    /// Returns a value in `[0, 1)`.
    fn unit(&self) -> f64;
}

/// Thread-local random generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn up_to(&self, max: u64) -> u64 {
        rand::thread_rng().gen_range(0..=max)
    }

    fn unit(&self) -> f64 {
        rand::thread_rng().gen_range(0.0..1.0)
    }
}

/// Deterministic generator seeded at construction.
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    /// Creates a generator from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl fmt::Debug for SeededRandom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeededRandom").finish_non_exhaustive()
    }
}

impl RandomSource for SeededRandom {
    fn up_to(&self, max: u64) -> u64 {
        self.rng.lock().gen_range(0..=max)
    }

    fn unit(&self) -> f64 {
        self.rng.lock().gen_range(0.0..1.0)
    }
}
