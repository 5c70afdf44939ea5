//! Pair selection: a temperature-controlled softmax over negative pair
//! frequency, biasing toward under-sampled pairs.

use crate::rng::RngState;
use duelrank_core::EntityId;

/// Enumerate the `(K choose 2)` candidate pairs in the same order
/// `numpy.triu_indices(K, k=1)` would: `(0,1), (0,2), ..., (0,K-1), (1,2), ...`.
pub fn candidate_pairs(k: usize) -> Vec<(usize, usize)> {
    let mut pairs = Vec::with_capacity(k * (k.saturating_sub(1)) / 2);
    for i in 0..k {
        for j in (i + 1)..k {
            pairs.push((i, j));
        }
    }
    pairs
}

/// Stabilized softmax of `-pair_freq / temperature` over all candidate
/// pairs: subtract the max logit before exponentiating so large frequency
/// counts never overflow.
pub fn pair_distribution(frequency: &[u64], pairs: &[(usize, usize)], temperature: f64) -> Vec<f64> {
    let logits: Vec<f64> = pairs
        .iter()
        .map(|&(a, b)| {
            let pair_freq = (frequency[a] + frequency[b]) as f64;
            -pair_freq / temperature
        })
        .collect();

    let max_logit = logits.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|&l| (l - max_logit).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Draw one pair index from `distribution` using `rng`'s next uniform draw,
/// via inverse-CDF sampling.
pub fn draw_pair_index(distribution: &[f64], rng: &mut RngState) -> usize {
    let draw = rng.next_unit_f64();
    let mut cumulative = 0.0;
    for (index, &p) in distribution.iter().enumerate() {
        cumulative += p;
        if draw < cumulative {
            return index;
        }
    }
    // Floating-point rounding can leave the cumulative sum a hair under 1.0;
    // the last candidate is the correct fallback rather than panicking.
    distribution.len() - 1
}

/// Select the next pair to issue: builds the distribution, draws an index,
/// and returns the pair in ascending `(EntityId, EntityId)` order.
///
/// Does not mutate `frequency` — the caller (the engine, holding the
/// mutex) is responsible for incrementing it, since this function only
/// computes the selection.
pub fn select_next_pair(
    frequency: &[u64],
    temperature: f64,
    rng: &mut RngState,
) -> (EntityId, EntityId) {
    let pairs = candidate_pairs(frequency.len());
    let distribution = pair_distribution(frequency, &pairs, temperature);
    let chosen = draw_pair_index(&distribution, rng);
    let (i, j) = pairs[chosen];
    (EntityId::new(i), EntityId::new(j))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_pairs_enumerate_upper_triangle() {
        let pairs = candidate_pairs(3);
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn candidate_pairs_for_k_less_than_two_is_empty() {
        assert!(candidate_pairs(1).is_empty());
        assert!(candidate_pairs(0).is_empty());
    }

    #[test]
    fn distribution_sums_to_one() {
        let frequency = [3u64, 0, 5, 1];
        let pairs = candidate_pairs(4);
        let dist = pair_distribution(&frequency, &pairs, 1.0);
        let sum: f64 = dist.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn low_temperature_concentrates_on_least_sampled_pair() {
        let frequency = [10u64, 10, 0, 0];
        let pairs = candidate_pairs(4);
        let dist = pair_distribution(&frequency, &pairs, 1e-6);
        let least_sampled_index = pairs.iter().position(|&p| p == (2, 3)).unwrap();
        assert!(dist[least_sampled_index] > 0.999);
    }

    #[test]
    fn high_temperature_approaches_uniform() {
        let frequency = [10u64, 0, 5, 2];
        let pairs = candidate_pairs(4);
        let dist = pair_distribution(&frequency, &pairs, 1e6);
        let uniform = 1.0 / pairs.len() as f64;
        for p in dist {
            assert!((p - uniform).abs() < 1e-3);
        }
    }

    #[test]
    fn select_next_pair_never_picks_self_pair_or_out_of_range() {
        let mut rng = RngState::seeded(11);
        let frequency = vec![0u64; 5];
        for _ in 0..50 {
            let (i, j) = select_next_pair(&frequency, 1.0, &mut rng);
            assert_ne!(i, j);
            assert!(i.index() < 5 && j.index() < 5);
        }
    }
}
