//! Seedable random number generation.
//!
//! Every random draw made by the engine comes from a generator owned by the
//! colony, so a run is fully determined by its seed.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Default generator used by [`Colony::new`](crate::colony::Colony::new).
pub type AcoRng = ChaCha8Rng;

/// Creates a deterministic generator from a seed.
pub fn create_rng(seed: u64) -> AcoRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Creates a generator from an optional seed, falling back to OS entropy.
pub fn rng_from_seed(seed: Option<u64>) -> AcoRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = create_rng(7);
        let mut b = create_rng(7);
        for _ in 0..32 {
            assert_eq!(a.random::<u64>(), b.random::<u64>());
        }
    }

    #[test]
    fn test_different_seed_different_stream() {
        let mut a = create_rng(1);
        let mut b = create_rng(2);
        let xs: Vec<u64> = (0..8).map(|_| a.random()).collect();
        let ys: Vec<u64> = (0..8).map(|_| b.random()).collect();
        assert_ne!(xs, ys);
    }
}
