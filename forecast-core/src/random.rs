use parking_lot::Mutex;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::{fmt::Debug, ops::Range};

/// Source of uniform integers for the mock generator.
pub trait RandomSource: Send + Sync + Debug {
    /// Uniform draw from the half-open `range`. The range must not be empty.
    fn next_in_range(&self, range: Range<i32>) -> i32;
}

/// Process-shared, unseeded randomness.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_in_range(&self, range: Range<i32>) -> i32 {
        rand::thread_rng().gen_range(range)
    }
}

/// Deterministic randomness for tests and reproducible output.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
    }
}

impl RandomSource for SeededRandom {
    fn next_in_range(&self, range: Range<i32>) -> i32 {
        self.rng.lock().gen_range(range)
    }
}
