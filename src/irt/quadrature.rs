//! irt::quadrature — discrete ability distributions.
//!
//! Purpose
//! -------
//! Represent an ability distribution as ordered `(point, weight)` pairs used
//! for weighted summation in the linking criteria and in summed-score
//! distributions.
//!
//! Key behaviors
//! -------------
//! - [`QuadratureRule::new`] validates externally supplied rules.
//! - [`QuadratureRule::normal`] builds `n` equally spaced points on
//!   `[min, max]` weighted by a normal density and normalized to sum to one.
//!
//! Invariants & assumptions
//! ------------------------
//! - Points are finite and strictly increasing; weights are finite and
//!   non-negative. Weights need not sum to one for externally supplied rules.
use crate::irt::errors::{IrtError, IrtResult};
use ndarray::Array1;
use statrs::distribution::{Continuous, Normal};

#[derive(Debug, Clone, PartialEq)]
pub struct QuadratureRule {
    points: Array1<f64>,
    weights: Array1<f64>,
}

impl QuadratureRule {
    /// Construct a validated rule.
    ///
    /// # Errors
    /// - `EmptyQuadrature` / `QuadratureLengthMismatch` for shape problems.
    /// - `InvalidQuadraturePoint` for non-finite or non-increasing points.
    /// - `InvalidQuadratureWeight` for non-finite or negative weights.
    pub fn new(points: Array1<f64>, weights: Array1<f64>) -> IrtResult<Self> {
        if points.is_empty() {
            return Err(IrtError::EmptyQuadrature);
        }
        if points.len() != weights.len() {
            return Err(IrtError::QuadratureLengthMismatch {
                points: points.len(),
                weights: weights.len(),
            });
        }
        for (index, &value) in points.iter().enumerate() {
            if !value.is_finite() {
                return Err(IrtError::InvalidQuadraturePoint {
                    index,
                    value,
                    reason: "Points must be finite.",
                });
            }
            if index > 0 && value <= points[index - 1] {
                return Err(IrtError::InvalidQuadraturePoint {
                    index,
                    value,
                    reason: "Points must be strictly increasing.",
                });
            }
        }
        for (index, &value) in weights.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(IrtError::InvalidQuadratureWeight {
                    index,
                    value,
                    reason: "Weights must be finite and non-negative.",
                });
            }
        }
        Ok(Self { points, weights })
    }

    /// Equally spaced points on `[min, max]` with normalized normal-density
    /// weights.
    ///
    /// # Errors
    /// - `InvalidQuadratureRange` unless `n ≥ 2` and `min < max` are finite.
    /// - `InvalidNormalMean` / `InvalidNormalSd` from the normal density.
    pub fn normal(n: usize, min: f64, max: f64, mean: f64, sd: f64) -> IrtResult<Self> {
        if n < 2 {
            return Err(IrtError::InvalidQuadratureRange {
                n,
                min,
                max,
                reason: "At least two points are required.",
            });
        }
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(IrtError::InvalidQuadratureRange {
                n,
                min,
                max,
                reason: "Range must be finite with min < max.",
            });
        }
        let density = Normal::new(mean, sd)?;
        let points = Array1::linspace(min, max, n);
        let raw = points.mapv(|x| density.pdf(x));
        let total = raw.sum();
        Self::new(points, raw / total)
    }

    pub fn points(&self) -> &Array1<f64> {
        &self.points
    }

    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn sum_weights(&self) -> f64 {
        self.weights.sum()
    }

    /// Iterate `(point, weight)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().copied().zip(self.weights.iter().copied())
    }

    /// The same distribution expressed on another scale: points map to
    /// `slope·θ + intercept`, weights are unchanged.
    ///
    /// # Errors
    /// `InvalidQuadraturePoint` when the map does not keep points finite and
    /// strictly increasing (e.g. a non-positive slope).
    pub fn rescaled(&self, slope: f64, intercept: f64) -> IrtResult<Self> {
        Self::new(self.points.mapv(|t| slope * t + intercept), self.weights.clone())
    }
}
