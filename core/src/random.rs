//! Injectable randomness for usernames and catalog picks.
//!
//! Any `rand::Rng` is a `RandomSource`. Runs use a `StdRng` seeded either from
//! `ClientConfig::seed` or from fresh entropy; the seed is logged so a failing
//! run can be replayed with `BOOKSTORE_SEED`.

use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    /// `len` characters drawn from `[A-Za-z0-9]`.
    fn alphanumeric(&mut self, len: usize) -> String;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    fn alphanumeric(&mut self, len: usize) -> String {
        (0..len).map(|_| char::from(self.sample(Alphanumeric))).collect()
    }

    fn index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Build the run's generator, returning it with the seed actually used.
pub fn seeded_rng(seed: Option<u64>) -> (StdRng, u64) {
    let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
    (StdRng::seed_from_u64(seed), seed)
}
