//! The Strength Engine's mutable core: α, per-entity pair frequency, and
//! RNG state, plus the two operations that read or mutate them.

use crate::error::EngineError;
use crate::rng::RngState;
use crate::select::select_next_pair;
use crate::update::moment_matching_update;
use duelrank_core::EntityId;
use serde::{Deserialize, Serialize};

/// Dirichlet concentration vector α, pair-issue frequency, and RNG state
/// for a single session's K entities.
///
/// Invariants (see the specification §3): `alpha.len() == frequency.len()
/// == K`; every `alpha[k] > 0`; `sum(frequency) == 2 * (pairs issued)`.
#[derive(Clone, Serialize, Deserialize)]
pub struct StrengthState {
    k: usize,
    alpha: Vec<f64>,
    frequency: Vec<u64>,
    rng: RngState,
}

impl StrengthState {
    /// Create a fresh state for `k` entities: uniform Dirichlet prior
    /// (`alpha` all ones), zero frequency, and an RNG seeded from `seed`.
    pub fn new(k: usize, seed: u64) -> Self {
        Self {
            k,
            alpha: vec![1.0; k],
            frequency: vec![0; k],
            rng: RngState::seeded(seed),
        }
    }

    /// Number of entities, K.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Current α vector.
    pub fn alpha(&self) -> &[f64] {
        &self.alpha
    }

    /// Current per-entity pair-issue frequency.
    pub fn frequency(&self) -> &[u64] {
        &self.frequency
    }

    /// Select and record the next pair to issue, drawing one RNG step and
    /// incrementing both entities' frequency counts.
    ///
    /// Returns the pair in ascending `(EntityId, EntityId)` order.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidState`] if `K < 2`.
    pub fn get_next_pair(&mut self, temperature: f64) -> Result<(EntityId, EntityId), EngineError> {
        if self.k < 2 {
            return Err(EngineError::too_few_entities(self.k));
        }
        let (i, j) = select_next_pair(&self.frequency, temperature, &mut self.rng);
        self.frequency[i.index()] += 1;
        self.frequency[j.index()] += 1;
        Ok((i, j))
    }

    /// Apply an observed comparison outcome to α via moment matching.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidState`] if `i`/`j` are out of range,
    /// equal, or `winner` is not one of `{i, j}`.
    pub fn submit_comparison(
        &mut self,
        i: EntityId,
        j: EntityId,
        winner: EntityId,
    ) -> Result<(), EngineError> {
        if i.index() >= self.k {
            return Err(EngineError::index_out_of_range(i, self.k));
        }
        if j.index() >= self.k {
            return Err(EngineError::index_out_of_range(j, self.k));
        }
        if i == j {
            return Err(EngineError::equal_indices(i));
        }
        if winner != i && winner != j {
            return Err(EngineError::winner_not_in_pair(winner, i, j));
        }

        let y = if winner == i { 1.0 } else { -1.0 };
        match moment_matching_update(&self.alpha, i.index(), j.index(), y) {
            Some(updated) => self.alpha = updated,
            None => {
                tracing::warn!(
                    i = i.index(),
                    j = j.index(),
                    "moment-matching update hit a numeric guard; alpha left unchanged"
                );
            }
        }
        Ok(())
    }

    /// Entity indices sorted by α descending, ties broken by ascending id.
    pub fn get_rankings(&self) -> Vec<EntityId> {
        let mut order: Vec<usize> = (0..self.k).collect();
        order.sort_by(|&a, &b| {
            self.alpha[b]
                .partial_cmp(&self.alpha[a])
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cmp(&b))
        });
        order.into_iter().map(EntityId::new).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_has_uniform_prior() {
        let state = StrengthState::new(3, 1);
        assert_eq!(state.alpha(), &[1.0, 1.0, 1.0]);
        assert_eq!(state.frequency(), &[0, 0, 0]);
    }

    #[test]
    fn get_next_pair_requires_at_least_two_entities() {
        let mut state = StrengthState::new(1, 1);
        assert!(state.get_next_pair(1.0).is_err());
    }

    #[test]
    fn get_next_pair_advances_frequency_by_two() {
        let mut state = StrengthState::new(4, 1);
        for n in 1..=5 {
            state.get_next_pair(1.0).unwrap();
            assert_eq!(state.frequency().iter().sum::<u64>(), 2 * n);
        }
    }

    #[test]
    fn submit_comparison_rejects_equal_indices() {
        let mut state = StrengthState::new(3, 1);
        let err = state
            .submit_comparison(EntityId::new(0), EntityId::new(0), EntityId::new(0))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidState(_)));
    }

    #[test]
    fn submit_comparison_rejects_winner_outside_pair() {
        let mut state = StrengthState::new(3, 1);
        let err = state
            .submit_comparison(EntityId::new(0), EntityId::new(1), EntityId::new(2))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidState(_)));
    }

    #[test]
    fn rankings_is_permutation_and_reflects_strength() {
        let mut state = StrengthState::new(3, 1);
        state
            .submit_comparison(EntityId::new(0), EntityId::new(1), EntityId::new(1))
            .unwrap();
        let rankings = state.get_rankings();
        let mut sorted = rankings.clone();
        sorted.sort();
        assert_eq!(sorted, vec![EntityId::new(0), EntityId::new(1), EntityId::new(2)]);
        assert_eq!(rankings[0], EntityId::new(1));
    }

    #[test]
    fn same_seed_and_calls_reproduce_identical_state() {
        let mut a = StrengthState::new(4, 99);
        let mut b = StrengthState::new(4, 99);
        let pair_a = a.get_next_pair(1.0).unwrap();
        let pair_b = b.get_next_pair(1.0).unwrap();
        assert_eq!(pair_a, pair_b);
        a.submit_comparison(pair_a.0, pair_a.1, pair_a.0).unwrap();
        b.submit_comparison(pair_b.0, pair_b.1, pair_b.0).unwrap();
        assert_eq!(a.alpha(), b.alpha());
        assert_eq!(a.frequency(), b.frequency());
    }

    #[test]
    fn low_temperature_keeps_frequency_spread_tight() {
        // Invariant 8 / scenario S6: with K=4 and temperature=1.0, after 20
        // get_next_pair calls, max(frequency) - min(frequency) <= 4.
        let mut state = StrengthState::new(4, 1);
        for _ in 0..20 {
            state.get_next_pair(1.0).unwrap();
        }
        let freq = state.frequency();
        let spread = freq.iter().max().unwrap() - freq.iter().min().unwrap();
        assert!(spread <= 4, "frequency spread {spread} exceeds bound, freq={freq:?}");
    }

    #[test]
    fn near_zero_temperature_keeps_frequency_nearly_uniform() {
        // As temperature -> 0, the bound tightens to max - min <= 1.
        let mut state = StrengthState::new(4, 1);
        for _ in 0..20 {
            state.get_next_pair(1e-9).unwrap();
        }
        let freq = state.frequency();
        let spread = freq.iter().max().unwrap() - freq.iter().min().unwrap();
        assert!(spread <= 1, "frequency spread {spread} exceeds bound, freq={freq:?}");
    }

    #[test]
    fn snapshot_round_trips_through_bincode() {
        let mut state = StrengthState::new(3, 7);
        state.get_next_pair(1.0).unwrap();
        let encoded = bincode::serialize(&state).unwrap();
        let restored: StrengthState = bincode::deserialize(&encoded).unwrap();
        assert_eq!(state.alpha(), restored.alpha());
        assert_eq!(state.frequency(), restored.frequency());
    }
}
