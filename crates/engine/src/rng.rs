//! Deterministic, serializable RNG used to drive pair selection.
//!
//! A seeded counter-based generator ([`rand_pcg::Lcg64Xsh32`], PCG32) is
//! used rather than a language-default thread-local RNG, because its full
//! state is a plain `u64` pair that round-trips through serde bit-for-bit —
//! exactly what log replay and snapshot restore require (see the
//! specification's design notes: "random-number state must be explicit and
//! serializable").

use rand_core::{RngCore, SeedableRng};
use rand_pcg::Lcg64Xsh32;
use serde::{Deserialize, Serialize};

/// Opaque, serializable RNG state for a [`crate::StrengthState`].
#[derive(Clone, Serialize, Deserialize)]
pub struct RngState(Lcg64Xsh32);

impl RngState {
    /// Seed a fresh generator. `stream` selects one of PCG32's independent
    /// output streams; `0` is used throughout this crate and is fine for a
    /// single-writer session.
    pub fn seeded(seed: u64) -> Self {
        Self(Lcg64Xsh32::new(seed, 0))
    }

    /// Draw a uniform float in `[0, 1)` using the standard 53-bit technique,
    /// advancing the underlying generator by one step.
    pub fn next_unit_f64(&mut self) -> f64 {
        let bits = self.0.next_u64() >> 11;
        (bits as f64) * (1.0 / (1u64 << 53) as f64)
    }
}

impl std::fmt::Debug for RngState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RngState").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = RngState::seeded(42);
        let mut b = RngState::seeded(42);
        for _ in 0..10 {
            assert_eq!(a.next_unit_f64(), b.next_unit_f64());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = RngState::seeded(1);
        let mut b = RngState::seeded(2);
        let draws: Vec<(f64, f64)> = (0..5).map(|_| (a.next_unit_f64(), b.next_unit_f64())).collect();
        assert!(draws.iter().any(|(x, y)| x != y));
    }

    #[test]
    fn draws_are_in_unit_range() {
        let mut rng = RngState::seeded(7);
        for _ in 0..1000 {
            let v = rng.next_unit_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn round_trips_through_bincode() {
        let mut rng = RngState::seeded(123);
        let _ = rng.next_unit_f64();
        let encoded = bincode::serialize(&rng).unwrap();
        let mut restored: RngState = bincode::deserialize(&encoded).unwrap();
        assert_eq!(rng.next_unit_f64(), restored.next_unit_f64());
    }
}
