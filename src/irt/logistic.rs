//! Dichotomous logistic items (1PL/Rasch, 2PL, 3PL, 4PL).
//!
//! `P(θ) = c + (s − c) / (1 + exp(−D·a·(θ − b)))`, with lower asymptote `c`,
//! upper asymptote `s` and scaling constant `D` (1.0 for the logistic metric,
//! 1.7 for the normal-ogive approximation). Category 0 is the incorrect
//! response, category 1 the correct one.
use crate::irt::{
    errors::{IrtError, IrtResult},
    model::{ItemFamily, ItemResponseModel},
};

#[derive(Debug, Clone, PartialEq)]
pub struct LogisticItem {
    discrimination: f64,
    difficulty: [f64; 1],
    guessing: f64,
    slipping: f64,
    scaling: f64,
    weights: [f64; 2],
}

impl LogisticItem {
    /// Construct a 4PL item; the other constructors are special cases.
    ///
    /// # Errors
    /// - `InvalidDiscrimination` for a non-finite or non-positive `a`.
    /// - `InvalidLocation` for a non-finite `b`.
    /// - `InvalidAsymptotes` unless `0 ≤ c < s ≤ 1`.
    /// - `InvalidScalingConstant` for a non-finite or non-positive `D`.
    pub fn new(
        discrimination: f64, difficulty: f64, guessing: f64, slipping: f64, scaling: f64,
    ) -> IrtResult<Self> {
        verify_discrimination(discrimination)?;
        if !difficulty.is_finite() {
            return Err(IrtError::InvalidLocation { index: 0, value: difficulty });
        }
        verify_asymptotes(guessing, slipping)?;
        verify_scaling(scaling)?;
        Ok(Self {
            discrimination,
            difficulty: [difficulty],
            guessing,
            slipping,
            scaling,
            weights: [0.0, 1.0],
        })
    }

    /// Rasch item: `a = 1`, `c = 0`, `s = 1`, `D = 1`.
    pub fn rasch(difficulty: f64) -> IrtResult<Self> {
        Self::new(1.0, difficulty, 0.0, 1.0, 1.0)
    }

    pub fn two_pl(discrimination: f64, difficulty: f64, scaling: f64) -> IrtResult<Self> {
        Self::new(discrimination, difficulty, 0.0, 1.0, scaling)
    }

    pub fn three_pl(
        discrimination: f64, difficulty: f64, guessing: f64, scaling: f64,
    ) -> IrtResult<Self> {
        Self::new(discrimination, difficulty, guessing, 1.0, scaling)
    }

    /// Replace the default `(0, 1)` score weights.
    ///
    /// # Errors
    /// `InvalidScoreWeights` if either weight is non-finite.
    pub fn with_score_weights(mut self, incorrect: f64, correct: f64) -> IrtResult<Self> {
        if !incorrect.is_finite() || !correct.is_finite() {
            return Err(IrtError::InvalidScoreWeights {
                expected: 2,
                found: 2,
                reason: "Score weights must be finite.",
            });
        }
        self.weights = [incorrect, correct];
        Ok(self)
    }

    pub fn scaling(&self) -> f64 {
        self.scaling
    }

    fn correct(&self, theta: f64, a: f64, b: f64) -> f64 {
        let z = self.scaling * a * (theta - b);
        self.guessing + (self.slipping - self.guessing) / (1.0 + (-z).exp())
    }

    fn category(&self, p_correct: f64, category: usize) -> f64 {
        match category {
            0 => 1.0 - p_correct,
            1 => p_correct,
            _ => 0.0,
        }
    }
}

impl ItemResponseModel for LogisticItem {
    fn family(&self) -> ItemFamily {
        ItemFamily::Logistic
    }

    fn ncat(&self) -> usize {
        2
    }

    fn discrimination(&self) -> f64 {
        self.discrimination
    }

    fn locations(&self) -> &[f64] {
        &self.difficulty
    }

    fn guessing(&self) -> f64 {
        self.guessing
    }

    fn slipping(&self) -> f64 {
        self.slipping
    }

    fn score_weights(&self) -> &[f64] {
        &self.weights
    }

    fn probability(&self, theta: f64, category: usize) -> f64 {
        let p = self.correct(theta, self.discrimination, self.difficulty[0]);
        self.category(p, category)
    }

    fn derivative(&self, theta: f64) -> f64 {
        let (c, s) = (self.guessing, self.slipping);
        let p = self.correct(theta, self.discrimination, self.difficulty[0]);
        let dp = self.scaling * self.discrimination * (p - c) * (s - p) / (s - c);
        (self.weights[1] - self.weights[0]) * dp
    }

    fn t_star_probability(&self, theta: f64, category: usize, intercept: f64, slope: f64) -> f64 {
        let a = self.discrimination / slope;
        let b = slope * self.difficulty[0] + intercept;
        self.category(self.correct(theta, a, b), category)
    }

    fn t_sharp_probability(
        &self, theta: f64, category: usize, intercept: f64, slope: f64,
    ) -> f64 {
        let a = self.discrimination * slope;
        let b = (self.difficulty[0] - intercept) / slope;
        self.category(self.correct(theta, a, b), category)
    }
}

// ---- Helper Methods ----

pub(crate) fn verify_discrimination(value: f64) -> IrtResult<()> {
    if !value.is_finite() {
        return Err(IrtError::InvalidDiscrimination { value, reason: "Must be finite." });
    }
    if value <= 0.0 {
        return Err(IrtError::InvalidDiscrimination { value, reason: "Must be positive." });
    }
    Ok(())
}

pub(crate) fn verify_scaling(value: f64) -> IrtResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(IrtError::InvalidScalingConstant { value });
    }
    Ok(())
}

fn verify_asymptotes(guessing: f64, slipping: f64) -> IrtResult<()> {
    if !guessing.is_finite() || !slipping.is_finite() {
        return Err(IrtError::InvalidAsymptotes {
            guessing,
            slipping,
            reason: "Asymptotes must be finite.",
        });
    }
    if guessing < 0.0 || slipping > 1.0 || guessing >= slipping {
        return Err(IrtError::InvalidAsymptotes {
            guessing,
            slipping,
            reason: "Asymptotes must satisfy 0 <= guessing < slipping <= 1.",
        });
    }
    Ok(())
}
