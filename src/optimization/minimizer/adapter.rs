//! Adapters that expose user objectives as `argmin` problems.
//!
//! - [`ArgMinAdapter`] wraps an [`Objective`] over vector parameters and
//!   provides `CostFunction` plus `Gradient` (analytic when available,
//!   finite differences otherwise).
//! - [`ScalarAdapter`] wraps a fallible scalar closure for Brent's method.
use std::cell::RefCell;

use crate::optimization::{
    errors::{OptError, OptResult},
    minimizer::{
        finite_diff::fd_gradient,
        traits::Objective,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};

/// Bridges a user `Objective` to `argmin`'s `CostFunction` and `Gradient`.
///
/// - `CostFunction::cost` returns `c(θ)` after a finiteness check.
/// - `Gradient::gradient` returns the analytic gradient when the objective
///   provides one, or a validated finite-difference gradient otherwise.
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: Objective> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: Objective> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate the cost `c(θ)`.
    ///
    /// # Errors
    /// - Propagates any `OptError` from the user’s `value` via `?`.
    /// - `NonFiniteCost` if the value is not finite.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let output = self.f.value(theta, self.data)?;
        if !output.is_finite() {
            return Err((OptError::NonFiniteCost { value: output }).into());
        }
        Ok(output)
    }
}

impl<'a, F: Objective> Gradient for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// Evaluate the gradient of the cost at `θ`.
    ///
    /// The FD closure must return `f64`, so evaluation errors are captured in
    /// `closure_err` and turned back into real errors by [`fd_gradient`].
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = theta.len();
        match self.f.grad(theta, self.data) {
            Ok(g) => {
                validate_grad(&g, dim)?;
                Ok(g)
            }
            Err(OptError::GradientNotImplemented) => {
                let closure_err: RefCell<Option<Error>> = RefCell::new(None);
                let cost_func = |theta: &Theta| -> f64 {
                    match self.cost(theta) {
                        Ok(val) => val,
                        Err(e) => {
                            let mut slot = closure_err.borrow_mut();
                            if slot.is_none() {
                                *slot = Some(e);
                            }
                            f64::NAN
                        }
                    }
                };
                Ok(fd_gradient(theta, &cost_func, &closure_err)?)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl<'a, F: Objective> ArgMinAdapter<'a, F> {
    /// Construct a new adapter over a user `Objective` and its data.
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }
}

/// Bridges a fallible scalar closure `x ↦ c(x)` to `argmin`'s `CostFunction`
/// so it can be minimized by Brent's method.
pub struct ScalarAdapter<'a, G: Fn(f64) -> OptResult<Cost>> {
    pub f: &'a G,
}

impl<'a, G: Fn(f64) -> OptResult<Cost>> CostFunction for ScalarAdapter<'a, G> {
    type Param = f64;
    type Output = Cost;

    fn cost(&self, x: &Self::Param) -> Result<Self::Output, Error> {
        let output = (self.f)(*x)?;
        if !output.is_finite() {
            return Err((OptError::NonFiniteCost { value: output }).into());
        }
        Ok(output)
    }
}

impl<'a, G: Fn(f64) -> OptResult<Cost>> ScalarAdapter<'a, G> {
    pub fn new(f: &'a G) -> Self {
        Self { f }
    }
}
