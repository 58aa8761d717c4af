//! Polytomous partial-credit items (PCM and GPCM).
//!
//! Category probabilities follow the divide-by-total form
//! `P_k(θ) ∝ exp(Σ_{v=1..k} D·a·(θ − δ_v))` with `P_0 ∝ 1`, computed with a
//! max-shift for numerical stability. Category scores default to `0..m−1`.
use crate::irt::{
    errors::{IrtError, IrtResult},
    logistic::{verify_discrimination, verify_scaling},
    model::{ItemFamily, ItemResponseModel},
};

#[derive(Debug, Clone, PartialEq)]
pub struct PartialCreditItem {
    family: ItemFamily,
    discrimination: f64,
    steps: Vec<f64>,
    scaling: f64,
    weights: Vec<f64>,
}

impl PartialCreditItem {
    /// Rasch partial-credit item (`a = 1`, `D = 1`).
    ///
    /// # Errors
    /// - `TooFewCategories` when `steps` is empty.
    /// - `InvalidLocation` for a non-finite step.
    pub fn pcm(steps: Vec<f64>) -> IrtResult<Self> {
        Self::build(ItemFamily::PartialCredit, 1.0, steps, 1.0)
    }

    /// Generalized partial-credit item with free discrimination.
    ///
    /// # Errors
    /// As [`PartialCreditItem::pcm`], plus `InvalidDiscrimination` and
    /// `InvalidScalingConstant`.
    pub fn gpcm(discrimination: f64, steps: Vec<f64>, scaling: f64) -> IrtResult<Self> {
        verify_discrimination(discrimination)?;
        verify_scaling(scaling)?;
        Self::build(ItemFamily::GeneralizedPartialCredit, discrimination, steps, scaling)
    }

    fn build(
        family: ItemFamily, discrimination: f64, steps: Vec<f64>, scaling: f64,
    ) -> IrtResult<Self> {
        if steps.is_empty() {
            return Err(IrtError::TooFewCategories { ncat: 1 });
        }
        if let Some((index, &value)) = steps.iter().enumerate().find(|(_, s)| !s.is_finite()) {
            return Err(IrtError::InvalidLocation { index, value });
        }
        let weights = (0..=steps.len()).map(|k| k as f64).collect();
        Ok(Self { family, discrimination, steps, scaling, weights })
    }

    /// Replace the default `0..m−1` category scores.
    ///
    /// # Errors
    /// `InvalidScoreWeights` for a length mismatch or a non-finite weight.
    pub fn with_score_weights(mut self, weights: Vec<f64>) -> IrtResult<Self> {
        let expected = self.steps.len() + 1;
        if weights.len() != expected {
            return Err(IrtError::InvalidScoreWeights {
                expected,
                found: weights.len(),
                reason: "One score weight per category is required.",
            });
        }
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(IrtError::InvalidScoreWeights {
                expected,
                found: weights.len(),
                reason: "Score weights must be finite.",
            });
        }
        self.weights = weights;
        Ok(self)
    }

    /// All category probabilities for slope `a` and steps `δ_v = step(v)`.
    fn category_probabilities<S: Fn(f64) -> f64>(&self, theta: f64, a: f64, step: S) -> Vec<f64> {
        let da = self.scaling * a;
        let mut z = Vec::with_capacity(self.steps.len() + 1);
        z.push(0.0);
        let mut acc = 0.0;
        for &delta in &self.steps {
            acc += da * (theta - step(delta));
            z.push(acc);
        }
        let max = z.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mut probs: Vec<f64> = z.iter().map(|v| (v - max).exp()).collect();
        let total: f64 = probs.iter().sum();
        probs.iter_mut().for_each(|p| *p /= total);
        probs
    }

    fn pick(probs: Vec<f64>, category: usize) -> f64 {
        probs.get(category).copied().unwrap_or(0.0)
    }
}

impl ItemResponseModel for PartialCreditItem {
    fn family(&self) -> ItemFamily {
        self.family
    }

    fn ncat(&self) -> usize {
        self.steps.len() + 1
    }

    fn discrimination(&self) -> f64 {
        self.discrimination
    }

    fn locations(&self) -> &[f64] {
        &self.steps
    }

    fn score_weights(&self) -> &[f64] {
        &self.weights
    }

    fn probability(&self, theta: f64, category: usize) -> f64 {
        Self::pick(self.category_probabilities(theta, self.discrimination, |d| d), category)
    }

    fn expected_value(&self, theta: f64) -> f64 {
        let probs = self.category_probabilities(theta, self.discrimination, |d| d);
        probs.iter().zip(&self.weights).map(|(p, w)| p * w).sum()
    }

    /// `dE/dθ = D·a·(Σ_k w_k·k·P_k − E·Σ_k k·P_k)`.
    fn derivative(&self, theta: f64) -> f64 {
        let probs = self.category_probabilities(theta, self.discrimination, |d| d);
        let (mut mean_k, mut expected, mut cross) = (0.0, 0.0, 0.0);
        for (k, (p, w)) in probs.iter().zip(&self.weights).enumerate() {
            let k = k as f64;
            mean_k += k * p;
            expected += w * p;
            cross += w * k * p;
        }
        self.scaling * self.discrimination * (cross - expected * mean_k)
    }

    fn t_star_probability(&self, theta: f64, category: usize, intercept: f64, slope: f64) -> f64 {
        let a = self.discrimination / slope;
        Self::pick(self.category_probabilities(theta, a, |d| slope * d + intercept), category)
    }

    fn t_sharp_probability(
        &self, theta: f64, category: usize, intercept: f64, slope: f64,
    ) -> f64 {
        let a = self.discrimination * slope;
        Self::pick(self.category_probabilities(theta, a, |d| (d - intercept) / slope), category)
    }
}
