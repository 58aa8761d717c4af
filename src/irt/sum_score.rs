//! Summed-score distributions via the Lord–Wingersky recursion.
//!
//! For each quadrature point the conditional distribution of the summed score
//! is built one item at a time,
//! `f_j(x | θ) = Σ_k f_{j−1}(x − w_k | θ)·P_k(θ)`,
//! and the marginal distribution is the weight-averaged mixture over points.
//! Score weights must be non-negative integers so summed scores index an
//! array `0..=max_score`.
use crate::irt::{
    errors::{IrtError, IrtResult},
    model::ItemSet,
    quadrature::QuadratureRule,
};
use ndarray::Array1;

/// Marginal probability of each summed score `0..=max_score` of `items`
/// under the ability distribution `quadrature`.
///
/// The result sums to one whenever the quadrature weights are not all zero.
///
/// # Errors
/// - `EmptyItemSet` when `items` is empty.
/// - `NonIntegerScoreWeight` / `NegativeScoreWeight` for unusable weights.
pub fn sum_score_distribution(
    items: &ItemSet, quadrature: &QuadratureRule,
) -> IrtResult<Array1<f64>> {
    if items.is_empty() {
        return Err(IrtError::EmptyItemSet);
    }
    let integer_weights = integer_score_weights(items)?;
    let max_score: usize =
        integer_weights.iter().map(|w| w.iter().max().copied().unwrap_or(0)).sum();

    let mut marginal = Array1::<f64>::zeros(max_score + 1);
    for (theta, weight) in quadrature.iter() {
        let conditional = conditional_distribution(items, &integer_weights, theta, max_score);
        marginal.scaled_add(weight, &conditional);
    }
    let total = quadrature.sum_weights();
    if total > 0.0 {
        marginal /= total;
    }
    Ok(marginal)
}

fn integer_score_weights(items: &ItemSet) -> IrtResult<Vec<Vec<usize>>> {
    items
        .iter()
        .map(|(name, model)| {
            model
                .score_weights()
                .iter()
                .map(|&w| {
                    if (w - w.round()).abs() > 1e-9 {
                        return Err(IrtError::NonIntegerScoreWeight {
                            item: name.to_string(),
                            weight: w,
                        });
                    }
                    if w < 0.0 {
                        return Err(IrtError::NegativeScoreWeight {
                            item: name.to_string(),
                            weight: w,
                        });
                    }
                    Ok(w.round() as usize)
                })
                .collect()
        })
        .collect()
}

fn conditional_distribution(
    items: &ItemSet, weights: &[Vec<usize>], theta: f64, max_score: usize,
) -> Array1<f64> {
    let mut current = Array1::<f64>::zeros(max_score + 1);
    current[0] = 1.0;
    let mut reached = 0;
    for (model, item_weights) in items.models().zip(weights) {
        let mut next = Array1::<f64>::zeros(max_score + 1);
        for (k, &w) in item_weights.iter().enumerate() {
            let p = model.probability(theta, k);
            for x in 0..=reached {
                next[x + w] += current[x] * p;
            }
        }
        reached += item_weights.iter().max().copied().unwrap_or(0);
        current = next;
    }
    current
}
