//! Deterministic RNG using PCG32 with BLAKE3 seed derivation.
//!
//! All randomness in the synthesis backend flows through this module. Seeds
//! for independent components (shape generation, strike sweeps) are derived
//! by hashing the base seed with a component key, so the streams never
//! interleave: drawing extra strike locations does not shift the shape
//! sequence.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The 32-bit seed is expanded to 64 bits by duplicating the value in both
/// halves, as required by PCG32's state initialization.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// Derives a seed for a specific component from the base seed.
///
/// Hashes the base seed (little-endian bytes) concatenated with the
/// component key, then truncates to the first four bytes.
pub fn derive_component_seed(base_seed: u32, key: &str) -> u32 {
    let mut input = Vec::with_capacity(4 + key.len());
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(key.as_bytes());

    let hash = blake3::hash(&input);
    let bytes: [u8; 4] = hash.as_bytes()[0..4].try_into().unwrap();
    u32::from_le_bytes(bytes)
}

/// Creates an RNG for a specific component.
pub fn component_rng(base_seed: u32, key: &str) -> Pcg32 {
    create_rng(derive_component_seed(base_seed, key))
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn test_rng_determinism() {
        let mut rng1 = create_rng(42);
        let mut rng2 = create_rng(42);

        let values1: Vec<f64> = (0..100).map(|_| rng1.gen()).collect();
        let values2: Vec<f64> = (0..100).map(|_| rng2.gen()).collect();

        assert_eq!(values1, values2);
    }

    #[test]
    fn test_component_seed_derivation() {
        let base = 42u32;

        let seed_shape = derive_component_seed(base, "shape");
        let seed_strike = derive_component_seed(base, "strike");
        assert_ne!(seed_shape, seed_strike);

        // Same key produces the same seed.
        assert_eq!(seed_shape, derive_component_seed(base, "shape"));
    }

    #[test]
    fn test_component_streams_are_independent() {
        let mut rng0 = component_rng(42, "shape");
        let mut rng1 = component_rng(42, "strike");

        let values0: Vec<f64> = (0..10).map(|_| rng0.gen()).collect();
        let values1: Vec<f64> = (0..10).map(|_| rng1.gen()).collect();

        assert_ne!(values0, values1);
    }
}
