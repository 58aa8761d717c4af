//! equating::observed_score — IRT observed-score equating.
//!
//! Purpose
//! -------
//! Equate Form X summed scores to Form Y by equipercentile equating of
//! synthetic-population score distributions.
//!
//! Key behaviors
//! -------------
//! - Four summed-score densities are required: Form X under the Form X
//!   (`f1`) and Form Y (`f2`) populations, and Form Y under the Form X (`g1`)
//!   and Form Y (`g2`) populations.
//! - Synthetic densities mix the populations with weight `w` on Form X's:
//!   `f = w·f1 + (1 − w)·f2`, `g = w·g1 + (1 − w)·g2`.
//! - Each Form X score gets its continuized percentile rank under `f`, and
//!   its Y-equivalent is the percentile point of that rank under `g`.
//! - [`ObservedScoreEquating::from_forms`] computes the four densities with
//!   the Lord–Wingersky recursion, moving each population's quadrature onto
//!   the other form's scale with optional linking coefficients.
//!
//! Invariants & assumptions
//! ------------------------
//! - `f1`, `f2` share a length (Form X scores `0..=K_X`); `g1`, `g2` share a
//!   length (`0..=K_Y`). Entries are finite and non-negative.
//! - The synthetic densities sum to one when the components do; no
//!   renormalization is applied.
//!
//! Downstream usage
//! ----------------
//! - The returned [`ObservedScoreTable`] carries moments of the synthetic
//!   Form X and Form Y distributions and of the equated scores for
//!   reporting.
use crate::{
    equating::{
        errors::{EquatingError, EquatingResult},
        moments::Moments,
        percentile::{cumulative_distribution, percentile_point, percentile_rank},
    },
    irt::{ItemSet, QuadratureRule, sum_score_distribution},
    linking::LinkingCoefficients,
};
use ndarray::Array1;
use tracing::debug;

/// Observed-score equating table; score-indexed columns run over Form X
/// scores except the Form Y density and CDF.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedScoreTable {
    pub raw_scores: Array1<f64>,
    pub percentile_ranks: Array1<f64>,
    pub y_equivalent: Array1<f64>,
    pub density_x: Array1<f64>,
    pub density_y: Array1<f64>,
    pub cdf_x: Array1<f64>,
    pub cdf_y: Array1<f64>,
    pub moments_x: Moments,
    pub moments_y: Moments,
    /// Moments of the Y-equivalents under the synthetic Form X density.
    pub moments_equated: Moments,
}

impl ObservedScoreTable {
    pub fn len(&self) -> usize {
        self.raw_scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw_scores.is_empty()
    }
}

/// Equipercentile equating of synthetic-population summed-score densities.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedScoreEquating {
    f1: Array1<f64>,
    f2: Array1<f64>,
    g1: Array1<f64>,
    g2: Array1<f64>,
    population_weight: f64,
}

impl ObservedScoreEquating {
    /// # Errors
    /// - `InvalidPopulationWeight` unless `0 ≤ w ≤ 1`.
    /// - `EmptyDensity`, `DensityLengthMismatch` or `InvalidDensity` for
    ///   malformed densities.
    pub fn new(
        f1: Array1<f64>, f2: Array1<f64>, g1: Array1<f64>, g2: Array1<f64>, population_weight: f64,
    ) -> EquatingResult<Self> {
        if !(0.0..=1.0).contains(&population_weight) {
            return Err(EquatingError::InvalidPopulationWeight { value: population_weight });
        }
        verify_density("f1", &f1, f1.len())?;
        verify_density("f2", &f2, f1.len())?;
        verify_density("g1", &g1, g1.len())?;
        verify_density("g2", &g2, g1.len())?;
        Ok(Self { f1, f2, g1, g2, population_weight })
    }

    /// Build the four densities from calibrated forms.
    ///
    /// With coefficients `(A, B)` mapping Form X's scale onto Form Y's, the
    /// Form Y population is moved onto Form X's scale by `θ ↦ (θ − B)/A` to
    /// score Form X, and the Form X population onto Form Y's scale by
    /// `θ ↦ A·θ + B` to score Form Y.
    ///
    /// # Errors
    /// - `Irt` for empty forms, non-integer score weights, or a rescaling
    ///   that breaks quadrature ordering (non-positive slope).
    /// - As [`ObservedScoreEquating::new`].
    pub fn from_forms(
        form_x: &ItemSet, form_y: &ItemSet, quad_x: &QuadratureRule, quad_y: &QuadratureRule,
        population_weight: f64, coefficients: Option<&LinkingCoefficients>,
    ) -> EquatingResult<Self> {
        let (slope, intercept) = match coefficients {
            Some(coef) => (coef.slope, coef.intercept),
            None => (1.0, 0.0),
        };
        let quad_y_on_x = quad_y.rescaled(1.0 / slope, -intercept / slope)?;
        let quad_x_on_y = quad_x.rescaled(slope, intercept)?;
        let f1 = sum_score_distribution(form_x, quad_x)?;
        let f2 = sum_score_distribution(form_x, &quad_y_on_x)?;
        let g1 = sum_score_distribution(form_y, &quad_x_on_y)?;
        let g2 = sum_score_distribution(form_y, quad_y)?;
        Self::new(f1, f2, g1, g2, population_weight)
    }

    pub fn population_weight(&self) -> f64 {
        self.population_weight
    }

    /// Synthetic Form X density `w·f1 + (1 − w)·f2`.
    pub fn synthetic_x(&self) -> Array1<f64> {
        mix(&self.f1, &self.f2, self.population_weight)
    }

    /// Synthetic Form Y density `w·g1 + (1 − w)·g2`.
    pub fn synthetic_y(&self) -> Array1<f64> {
        mix(&self.g1, &self.g2, self.population_weight)
    }

    /// Build the full equating table.
    pub fn equate(&self) -> ObservedScoreTable {
        let density_x = self.synthetic_x();
        let density_y = self.synthetic_y();
        let cdf_x = cumulative_distribution(density_x.view());
        let cdf_y = cumulative_distribution(density_y.view());

        let raw_scores = Array1::from_iter((0..density_x.len()).map(|x| x as f64));
        let percentile_ranks = raw_scores.mapv(|x| percentile_rank(cdf_x.view(), x));
        let y_equivalent = percentile_ranks.mapv(|p| percentile_point(cdf_y.view(), p));

        let moments_x = Moments::from_density(density_x.view());
        let moments_y = Moments::from_density(density_y.view());
        let moments_equated = Moments::weighted(&y_equivalent.to_vec(), density_x.view());
        debug!(
            scores = raw_scores.len(),
            weight = self.population_weight,
            mean_x = moments_x.mean,
            mean_y = moments_y.mean,
            mean_equated = moments_equated.mean,
            "observed-score equating complete"
        );

        ObservedScoreTable {
            raw_scores,
            percentile_ranks,
            y_equivalent,
            density_x,
            density_y,
            cdf_x,
            cdf_y,
            moments_x,
            moments_y,
            moments_equated,
        }
    }
}

fn mix(first: &Array1<f64>, second: &Array1<f64>, weight: f64) -> Array1<f64> {
    first * weight + second * (1.0 - weight)
}

fn verify_density(
    name: &'static str, density: &Array1<f64>, expected: usize,
) -> EquatingResult<()> {
    if density.is_empty() {
        return Err(EquatingError::EmptyDensity { name });
    }
    if density.len() != expected {
        return Err(EquatingError::DensityLengthMismatch { name, expected, found: density.len() });
    }
    match density.iter().position(|v| !v.is_finite() || *v < 0.0) {
        Some(index) => Err(EquatingError::InvalidDensity { name, index, value: density[index] }),
        None => Ok(()),
    }
}
