//! Moment-matching posterior update over the Dirichlet concentration
//! vector α, given one observed pairwise outcome.

/// Smallest magnitude the `Σ Cₖ² − D` denominator may have before the
/// update is considered numerically degenerate and skipped.
const DEGENERACY_EPSILON: f64 = 1e-14;

/// Apply the moment-matching update described in the specification to
/// `alpha`, given the compared indices `i`, `j` and outcome `y` (`+1.0` if
/// `i` won, `-1.0` if `j` won).
///
/// Returns `Some(new_alpha)` on success, or `None` if any of the guard
/// conditions (`S <= 0`, a near-zero `Σ Cₖ² − D` denominator, or
/// `S' <= 0`) tripped — in which case the caller must leave α unchanged.
/// These guards are defensive against pathological inputs; correct inputs
/// never trigger them.
pub fn moment_matching_update(alpha: &[f64], i: usize, j: usize, y: f64) -> Option<Vec<f64>> {
    let s = alpha.iter().sum::<f64>();
    if s <= 0.0 {
        return None;
    }

    let ai = alpha[i];
    let aj = alpha[j];
    let pair_sum = ai + aj;

    let mut c: Vec<f64> = alpha.iter().map(|a| a / s).collect();
    let c_ij_denom = s * (pair_sum + 1.0);
    c[i] = ((ai + (1.0 + y) / 2.0) * pair_sum) / c_ij_denom;
    c[j] = ((aj + (1.0 - y) / 2.0) * pair_sum) / c_ij_denom;

    let d_ij_denom = s * (s + 1.0) * (pair_sum + 2.0);
    let d_i = (ai + (1.0 + y) / 2.0) * (ai + (3.0 + y) / 2.0) * pair_sum / d_ij_denom;
    let d_j = (aj + (1.0 - y) / 2.0) * (aj + (3.0 - y) / 2.0) * pair_sum / d_ij_denom;

    let d_rest_denom = s * (s + 1.0);
    let d_all = alpha.iter().map(|a| a * (a + 1.0)).sum::<f64>() / d_rest_denom;
    let d_extra = (ai * (ai + 1.0) + aj * (aj + 1.0)) / d_rest_denom;
    let d_rest = d_all - d_extra;

    let d = d_i + d_j + d_rest;

    let sum_ck_sq = c.iter().map(|ck| ck * ck).sum::<f64>();
    let denom = sum_ck_sq - d;
    if denom.abs() < DEGENERACY_EPSILON {
        return None;
    }

    let s_prime = (d - 1.0) / denom;
    if s_prime <= 0.0 {
        return None;
    }

    Some(c.into_iter().map(|ck| ck * s_prime).collect())
}
