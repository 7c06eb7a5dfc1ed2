//! Deterministic RNG wrapper and seed-derivation helpers.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// Deterministic RNG handle used for synthetic exercise inputs.
///
/// Wraps `StdRng` seeded from a caller supplied master seed. Substreams
/// (one per synthetic trace in a batch) are derived by hashing
/// `(master_seed, substream_id)` with SipHash-1-3 under fixed zero keys, so
/// a batch generated on one machine replays identically on another.
#[derive(Debug, Clone)]
pub struct RngHandle {
    rng: StdRng,
}

impl RngHandle {
    /// Creates a new RNG handle from a master seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates the handle for one substream of a master seed.
    pub fn substream(master_seed: u64, substream: u64) -> Self {
        Self::from_seed(derive_substream_seed(master_seed, substream))
    }

    /// Draws `count` distinct values from `pool` in random order.
    ///
    /// Returns fewer values when the pool is smaller than `count`.
    pub fn sample_distinct<T: Clone>(&mut self, pool: &[T], count: usize) -> Vec<T> {
        pool.choose_multiple(&mut self.rng, count).cloned().collect()
    }
}

/// Derives the deterministic seed for a specific substream.
pub fn derive_substream_seed(master_seed: u64, substream: u64) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write_u64(master_seed);
    hasher.write_u64(substream);
    hasher.finish()
}
