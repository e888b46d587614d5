//! Seed-scoped random sources

use crate::trial::types::Seed;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Build a fresh random source for one trial.
///
/// The `i64` seed is reinterpreted bit-for-bit, so 0 and negative seeds
/// map to distinct, stable streams. ChaCha8 output is fixed across
/// platforms and crate releases.
pub fn seeded_rng(seed: Seed) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed as u64)
}
