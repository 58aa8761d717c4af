//! Validation helpers for criterion minimization.
//!
//! Checks shared by the option constructors, builders and runners:
//!
//! - **Tolerance checks**: [`verify_tol_grad`], [`verify_tol_cost`],
//!   [`verify_sd_tolerance`], [`verify_simplex_step`] ensure numeric
//!   settings are finite and strictly positive when provided.
//! - **Brackets**: [`verify_bracket`] checks one-dimensional search intervals.
//! - **Inputs**: [`validate_theta_input`] rejects non-finite starting points.
//! - **Solver output**: [`validate_grad`], [`validate_theta_hat`] and
//!   [`validate_value`] reject wrong lengths and non-finite numbers.
use crate::optimization::{
    errors::{OptError, OptResult},
    minimizer::{Grad, Theta},
};

/// Why `value` is not a finite, strictly positive setting, if it is not.
fn positivity_violation(value: f64, what: &'static str) -> Option<&'static str> {
    match (value.is_finite(), value > 0.0, what) {
        (false, _, "step") => Some("Step must be finite."),
        (false, _, _) => Some("Tolerance must be finite."),
        (true, false, "step") => Some("Step must be positive."),
        (true, false, _) => Some("Tolerance must be positive."),
        (true, true, _) => None,
    }
}

/// Index and value of the first non-finite entry.
fn first_non_finite<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<(usize, f64)> {
    values.into_iter().copied().enumerate().find(|(_, v)| !v.is_finite())
}

/// Validate the optional gradient-norm tolerance.
///
/// # Errors
/// [`OptError::InvalidTolGrad`] if the value is non-finite or ≤ 0.
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    match tol.and_then(|t| positivity_violation(t, "tolerance").map(|r| (t, r))) {
        Some((tol, reason)) => Err(OptError::InvalidTolGrad { tol, reason }),
        None => Ok(()),
    }
}

/// Validate the optional cost-change tolerance.
///
/// # Errors
/// [`OptError::InvalidTolCost`] if the value is non-finite or ≤ 0.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    match tol.and_then(|t| positivity_violation(t, "tolerance").map(|r| (t, r))) {
        Some((tol, reason)) => Err(OptError::InvalidTolCost { tol, reason }),
        None => Ok(()),
    }
}

/// # Errors
/// [`OptError::InvalidSimplexStep`] if the step is non-finite or ≤ 0.
pub fn verify_simplex_step(step: f64) -> OptResult<()> {
    match positivity_violation(step, "step") {
        Some(reason) => Err(OptError::InvalidSimplexStep { step, reason }),
        None => Ok(()),
    }
}

/// # Errors
/// [`OptError::InvalidSdTolerance`] if the tolerance is non-finite or ≤ 0.
pub fn verify_sd_tolerance(tol: f64) -> OptResult<()> {
    match positivity_violation(tol, "tolerance") {
        Some(reason) => Err(OptError::InvalidSdTolerance { tol, reason }),
        None => Ok(()),
    }
}

/// Validate a one-dimensional search bracket `[lower, upper]`.
///
/// # Errors
/// [`OptError::InvalidBracket`] if either end is non-finite or
/// `lower >= upper`.
pub fn verify_bracket(lower: f64, upper: f64) -> OptResult<()> {
    let reason = if !lower.is_finite() || !upper.is_finite() {
        "Bracket ends must be finite."
    } else if lower >= upper {
        "Lower end must be strictly below the upper end."
    } else {
        return Ok(());
    };
    Err(OptError::InvalidBracket { lower, upper, reason })
}

/// # Errors
/// [`OptError::InvalidThetaInput`] for the first non-finite entry.
pub fn validate_theta_input(theta: &Theta) -> OptResult<()> {
    match first_non_finite(theta) {
        Some((index, value)) => Err(OptError::InvalidThetaInput { index, value }),
        None => Ok(()),
    }
}

/// Check a gradient's length against `dim` and its entries for finiteness.
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] on a length mismatch.
/// - [`OptError::InvalidGradient`] for the first non-finite entry.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    match first_non_finite(grad) {
        Some((index, value)) => Err(OptError::InvalidGradient {
            index,
            value,
            reason: "Gradient elements must be finite.",
        }),
        None => Ok(()),
    }
}

/// Unwrap the solver's best parameter vector, requiring finite entries.
///
/// # Errors
/// - [`OptError::MissingThetaHat`] if the solver recorded none.
/// - [`OptError::InvalidThetaHat`] for the first non-finite entry.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    let theta = theta_hat.ok_or(OptError::MissingThetaHat)?;
    match first_non_finite(&theta) {
        Some((index, value)) => Err(OptError::InvalidThetaHat {
            index,
            value,
            reason: "Parameter estimates must be finite.",
        }),
        None => Ok(theta),
    }
}

/// # Errors
/// [`OptError::NonFiniteCost`] if the value is `NaN` or infinite.
pub fn validate_value(value: f64) -> OptResult<()> {
    if value.is_finite() { Ok(()) } else { Err(OptError::NonFiniteCost { value }) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover the bracket, gradient and starting-point checks.
    // Tolerance checks are exercised through `Tolerances::new` in `traits`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // A bracket must be finite and ordered.
    //
    // Given
    // -----
    // - `[-4, 4]`, `[1, 1]`, `[-inf, 0]`.
    //
    // Expect
    // ------
    // - Only the first bracket is accepted.
    fn verify_bracket_accepts_only_finite_ordered_intervals() {
        // Act / Assert
        assert!(verify_bracket(-4.0, 4.0).is_ok());
        assert!(matches!(verify_bracket(1.0, 1.0), Err(OptError::InvalidBracket { .. })));
        assert!(matches!(
            verify_bracket(f64::NEG_INFINITY, 0.0),
            Err(OptError::InvalidBracket { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Gradients of the wrong length or with non-finite entries are rejected.
    //
    // Given
    // -----
    // - A length-2 gradient checked against dim 3, and `[1, inf]` against dim 2.
    //
    // Expect
    // ------
    // - `GradientDimMismatch` then `InvalidGradient { index: 1, .. }`.
    fn validate_grad_checks_length_and_finiteness() {
        // Act
        let wrong_len = validate_grad(&array![0.0, 1.0], 3);
        let non_finite = validate_grad(&array![1.0, f64::INFINITY], 2);

        // Assert
        assert_eq!(wrong_len, Err(OptError::GradientDimMismatch { expected: 3, found: 2 }));
        assert!(matches!(non_finite, Err(OptError::InvalidGradient { index: 1, .. })));
    }

    #[test]
    // Purpose
    // -------
    // Starting points must be finite.
    //
    // Given
    // -----
    // - `[0.0, NaN]`.
    //
    // Expect
    // ------
    // - `InvalidThetaInput { index: 1, .. }`.
    fn validate_theta_input_flags_first_non_finite_entry() {
        // Act
        let res = validate_theta_input(&array![0.0, f64::NAN]);

        // Assert
        assert!(matches!(res, Err(OptError::InvalidThetaInput { index: 1, .. })));
    }
}
