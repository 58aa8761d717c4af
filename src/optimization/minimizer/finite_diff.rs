//! minimizer::finite_diff — robust finite-difference gradients.
//!
//! Purpose
//! -------
//! Provide finite-difference gradient approximations for objectives that do
//! not supply an analytic gradient. The characteristic-curve criteria used
//! for scale linking are smooth in `(intercept, slope)` but their closed-form
//! derivatives depend on every item family, so the derivative-based linking
//! strategy relies on this module.
//!
//! Key behaviors
//! -------------
//! - Prefer a central-difference scheme and fall back to forward differences
//!   when the central approximation hits an evaluation error or produces a
//!   non-finite gradient.
//! - Capture errors raised inside the (infallible) FD closure through a
//!   `RefCell<Option<Error>>` slot and surface them as real errors afterwards.
//!
//! Invariants & assumptions
//! ------------------------
//! - The FD closure returns `NaN` after recording an error; callers never
//!   observe that `NaN` because the captured error takes precedence.
//! - Every returned gradient has passed [`validate_grad`].
//!
//! Testing notes
//! -------------
//! - Unit tests compare against analytic gradients of a quadratic and check
//!   that a captured closure error is propagated.
use crate::optimization::{
    errors::OptResult,
    minimizer::{Grad, Theta, validation::validate_grad},
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// fd_gradient — central-difference gradient with forward-difference fallback.
///
/// Parameters
/// ----------
/// - `theta`: point at which the gradient is approximated.
/// - `func`: objective closure; it must route evaluation errors into
///   `closure_err` and return `NaN` in that case.
/// - `closure_err`: slot shared with `func`.
///
/// Errors
/// ------
/// - Any error captured inside `func` during the forward-difference retry.
/// - `OptError::GradientDimMismatch` / `OptError::InvalidGradient` when the
///   fallback gradient still fails validation.
pub fn fd_gradient<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.central_diff(func);
    if closure_err.borrow().is_none() && validate_grad(&fd_grad, theta.len()).is_ok() {
        return Ok(fd_grad);
    }
    run_fd_diff(theta, func, closure_err)
}

/// run_fd_diff — forward-difference gradient with error capture and validation.
///
/// Clears `closure_err`, performs `forward_diff`, returns any captured error,
/// then validates the resulting gradient.
///
/// Errors
/// ------
/// - `OptError` (via `impl From<Error> for OptError`) for a captured error.
/// - `OptError::GradientDimMismatch` / `OptError::InvalidGradient` from
///   [`validate_grad`].
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    let dim = theta.len();
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, dim)?;
    Ok(fd_grad)
}
