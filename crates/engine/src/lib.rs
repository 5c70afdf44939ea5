//! Strength Engine — the Bayesian posterior over entity strengths and the
//! pair-selection policy used to probe it.
//!
//! This crate is deliberately free of I/O: it holds α, frequency, and RNG
//! state in memory and exposes `get_next_pair`/`submit_comparison`/
//! `get_rankings`. Durability (snapshotting this state, replaying logged
//! calls against it) lives one layer up, in `duelrank-durability` and
//! `duelrank-session`.

#![warn(missing_docs)]

mod error;
mod rng;
mod select;
mod state;
mod update;

pub use error::EngineError;
pub use rng::RngState;
pub use state::StrengthState;

#[cfg(test)]
mod proptests {
    use super::*;
    use duelrank_core::EntityId;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn frequency_sum_matches_twice_pair_count(k in 2usize..12, n in 0usize..30) {
            let mut state = StrengthState::new(k, 123);
            for _ in 0..n {
                state.get_next_pair(1.0).unwrap();
            }
            prop_assert_eq!(state.frequency().iter().sum::<u64>(), 2 * n as u64);
        }

        #[test]
        fn next_pair_is_always_in_range_and_not_self(k in 2usize..12, n in 0usize..20) {
            let mut state = StrengthState::new(k, 456);
            for _ in 0..n {
                let (i, j) = state.get_next_pair(1.0).unwrap();
                prop_assert_ne!(i, j);
                prop_assert!(i.index() < k);
                prop_assert!(j.index() < k);
            }
        }

        #[test]
        fn rankings_are_always_a_permutation(k in 2usize..10, n in 0usize..15) {
            let mut state = StrengthState::new(k, 789);
            for step in 0..n {
                let (i, j) = state.get_next_pair(1.0).unwrap();
                let winner = if step % 2 == 0 { i } else { j };
                state.submit_comparison(i, j, winner).unwrap();
            }
            let mut rankings = state.get_rankings();
            rankings.sort();
            let expected: Vec<EntityId> = (0..k).map(EntityId::new).collect();
            prop_assert_eq!(rankings, expected);
        }
    }
}
