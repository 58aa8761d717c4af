//! Public API surface for criterion minimization.
//!
//! - [`Objective`]: trait users implement for their criterion.
//! - [`MinimizerOptions`] and [`Tolerances`]: configuration for L-BFGS.
//! - [`SimplexOptions`]: configuration for a single Nelder–Mead run.
//! - [`LineSearcher`]: choice of line search used by L-BFGS.
//! - [`MinimizerOutcome`]: normalized result returned by every runner.
//!
//! Convention: objectives are *minimized* directly. If an analytic gradient
//! is provided, it is the gradient of the objective itself.
use crate::optimization::{
    errors::{OptError, OptResult},
    minimizer::{
        Cost, FnEvalMap, Grad, Theta,
        validation::{
            validate_theta_hat, validate_value, verify_sd_tolerance, verify_simplex_step,
            verify_tol_cost, verify_tol_grad,
        },
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use std::str::FromStr;

/// User-implemented objective interface.
///
/// - `type Data`: per-problem data carried into `value`/`grad`/`check`.
///
/// Required:
/// - `value(&Theta, &Data) -> OptResult<Cost>`: evaluate `c(θ)`.
///   - Errors: return a descriptive `OptError` for invalid inputs.
/// - `check(&Theta, &Data) -> OptResult<()>`: validation hook to reject
///   obviously invalid `θ`/`data` pairs. Called once before optimization.
///
/// Optional:
/// - `grad(&Theta, &Data) -> OptResult<Grad>`: analytic gradient `∇c(θ)`.
///   If not implemented, robust finite differences are used automatically.
pub trait Objective {
    type Data;

    // Required methods
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    // Optional methods
    fn grad(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }
}

/// Choice of line search used inside the L-BFGS solver.
///
/// Parsing:
/// This enum implements `FromStr` and accepts case-insensitive names
/// (`"MoreThuente"`, `"HagerZhang"`). Unknown names return
/// `OptError::InvalidLineSearch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Optimizer-level configuration for the derivative-based strategy.
///
/// Fields:
/// - `tols: Tolerances` — numerical tolerances and iteration limits.
/// - `line_searcher: LineSearcher` — line-search algorithm used by L-BFGS.
/// - `verbose: bool` — if `true`, attaches an observer (behind the `obs_slog`
///   feature) and prints progress.
/// - `lbfgs_mem: Option<usize>` — history size; `None` uses
///   [`DEFAULT_LBFGS_MEM`](crate::optimization::minimizer::DEFAULT_LBFGS_MEM).
///
/// Default:
/// - `tols`: `tol_grad = 1e-8`, `tol_cost = 1e-12`, `max_iter = 200`
/// - `line_searcher`: `MoreThuente`
/// - `verbose`: `false`
/// - `lbfgs_mem`: `None`
#[derive(Debug, Clone, PartialEq)]
pub struct MinimizerOptions {
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
}

impl MinimizerOptions {
    /// Create a new set of optimizer options.
    ///
    /// # Errors
    /// - [`OptError::InvalidLBFGSMem`] if `lbfgs_mem == Some(0)`.
    pub fn new(
        tols: Tolerances, line_searcher: LineSearcher, verbose: bool, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(OptError::InvalidLBFGSMem {
                    mem: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        Ok(Self { tols, line_searcher, verbose, lbfgs_mem })
    }
}

impl Default for MinimizerOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances { tol_grad: Some(1e-8), tol_cost: Some(1e-12), max_iter: Some(200) },
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
            lbfgs_mem: None,
        }
    }
}

/// Numerical tolerances and iteration limits used by the optimizer.
///
/// - `tol_grad`: terminate when the gradient norm falls below this threshold.
/// - `tol_cost`: terminate when the change in cost falls below this threshold.
/// - `max_iter`: hard cap on the number of iterations.
///
/// Any field can be `None` but **at least one** of the three must be provided
/// (see [`Tolerances::new`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Rules
    /// - At least one of `tol_grad`, `tol_cost`, or `max_iter` must be `Some`.
    /// - If provided, tolerances must be **finite and strictly positive**.
    /// - If provided, `max_iter` must be `> 0`.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if all three are `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for non-finite or
    ///   non-positive tolerances.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_cost(tol_cost)?;
        verify_tol_grad(tol_grad)?;
        if let Some(max_iter) = max_iter {
            verify_max_iter(max_iter)?;
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

/// Configuration for one Nelder–Mead run.
///
/// - `initial_step`: offset added to each coordinate of the starting point to
///   build the initial simplex.
/// - `sd_tolerance`: terminate when the standard deviation of the simplex
///   costs falls below this threshold.
/// - `max_iter`: hard cap on the number of simplex iterations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimplexOptions {
    pub initial_step: f64,
    pub sd_tolerance: f64,
    pub max_iter: usize,
}

impl SimplexOptions {
    /// Construct validated simplex options.
    ///
    /// # Errors
    /// - [`OptError::InvalidSimplexStep`] for a non-finite or non-positive step.
    /// - [`OptError::InvalidSdTolerance`] for a non-finite or non-positive tolerance.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    pub fn new(initial_step: f64, sd_tolerance: f64, max_iter: usize) -> OptResult<Self> {
        verify_simplex_step(initial_step)?;
        verify_sd_tolerance(sd_tolerance)?;
        verify_max_iter(max_iter)?;
        Ok(Self { initial_step, sd_tolerance, max_iter })
    }
}

impl Default for SimplexOptions {
    fn default() -> Self {
        Self { initial_step: 0.25, sd_tolerance: 1e-10, max_iter: 500 }
    }
}

/// Canonical result returned by every runner.
///
/// - `theta_hat`: best parameter vector found.
/// - `value`: best objective value `c(θ̂)`.
/// - `converged`: `true` if the solver stopped on its own convergence test;
///   a run that stopped on the iteration cap reports `false`.
/// - `status`: human-readable termination status string.
/// - `iterations`: number of optimizer iterations performed.
/// - `fn_evals`: function-evaluation counters reported by `argmin`.
/// - `grad_norm`: norm of the last available gradient, if present.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimizerOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl MinimizerOutcome {
    /// Build a validated [`MinimizerOutcome`] from raw solver state.
    ///
    /// Performs:
    /// - `theta_hat` check via `validate_theta_hat` (present and all finite).
    /// - `value` check via `validate_value` (finite).
    /// - Maps `TerminationStatus` into `(converged, status)`.
    /// - Computes `grad_norm` if a gradient was provided.
    ///
    /// # Errors
    /// - Propagates any validation errors for `theta_hat` or `value`.
    pub fn new(
        theta_hat_opt: Option<Theta>, value: f64, termination: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(value)?;
        let (converged, status) = match &termination {
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
            TerminationStatus::Terminated(TerminationReason::MaxItersReached) => {
                (false, format!("{termination:?}"))
            }
            _ => (true, format!("{termination:?}")),
        };
        let iterations = iterations as usize;
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self { theta_hat, value, converged, status, iterations, fn_evals, grad_norm })
    }
}

fn verify_max_iter(max_iter: usize) -> OptResult<()> {
    if max_iter == 0 {
        return Err(OptError::InvalidMaxIter {
            max_iter,
            reason: "Maximum iterations must be greater than zero.",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Validation rules of `Tolerances`, `MinimizerOptions`, `SimplexOptions`.
    // - Line-search parsing.
    // - Mapping of termination statuses in `MinimizerOutcome::new`.
    //
    // They intentionally DO NOT cover:
    // - Running any solver; see `api` and `run`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Reject a tolerance set in which every stopping rule is absent.
    //
    // Given
    // -----
    // - `Tolerances::new(None, None, None)`.
    //
    // Expect
    // ------
    // - `OptError::NoTolerancesProvided`.
    fn tolerances_require_at_least_one_rule() {
        // Act
        let res = Tolerances::new(None, None, None);

        // Assert
        assert_eq!(res, Err(OptError::NoTolerancesProvided));
    }

    #[test]
    // Purpose
    // -------
    // Reject a zero iteration cap and non-positive tolerances.
    //
    // Given
    // -----
    // - `max_iter = 0`, then `tol_grad = -1.0`.
    //
    // Expect
    // ------
    // - `InvalidMaxIter` and `InvalidTolGrad` respectively.
    fn tolerances_reject_zero_cap_and_negative_tolerance() {
        // Act
        let zero_cap = Tolerances::new(None, None, Some(0));
        let neg_tol = Tolerances::new(Some(-1.0), None, Some(10));

        // Assert
        assert!(matches!(zero_cap, Err(OptError::InvalidMaxIter { .. })));
        assert!(matches!(neg_tol, Err(OptError::InvalidTolGrad { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Line-search names parse case-insensitively; unknown names fail.
    //
    // Given
    // -----
    // - "hagerzhang", "MORETHUENTE", "backtracking".
    //
    // Expect
    // ------
    // - The first two parse; the last is `InvalidLineSearch`.
    fn line_searcher_parses_case_insensitively() {
        // Act / Assert
        assert_eq!("hagerzhang".parse::<LineSearcher>(), Ok(LineSearcher::HagerZhang));
        assert_eq!("MORETHUENTE".parse::<LineSearcher>(), Ok(LineSearcher::MoreThuente));
        assert!(matches!(
            "backtracking".parse::<LineSearcher>(),
            Err(OptError::InvalidLineSearch { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Zero L-BFGS memory and degenerate simplex settings are rejected.
    //
    // Given
    // -----
    // - `lbfgs_mem = Some(0)`; simplex step 0.0; simplex tolerance NaN.
    //
    // Expect
    // ------
    // - Matching validation errors.
    fn options_reject_degenerate_settings() {
        // Arrange
        let tols = Tolerances::new(Some(1e-6), None, Some(10)).expect("valid tolerances");

        // Act
        let mem = MinimizerOptions::new(tols, LineSearcher::HagerZhang, false, Some(0));
        let step = SimplexOptions::new(0.0, 1e-8, 100);
        let sd = SimplexOptions::new(0.1, f64::NAN, 100);

        // Assert
        assert!(matches!(mem, Err(OptError::InvalidLBFGSMem { .. })));
        assert!(matches!(step, Err(OptError::InvalidSimplexStep { .. })));
        assert!(matches!(sd, Err(OptError::InvalidSdTolerance { .. })));
    }

    #[test]
    // Purpose
    // -------
    // A run that stopped on the iteration cap must not be reported as
    // converged, while a solver-declared convergence is.
    //
    // Given
    // -----
    // - Two outcomes built from `MaxItersReached` and `SolverConverged`.
    //
    // Expect
    // ------
    // - `converged == false` and `converged == true` respectively.
    fn outcome_distinguishes_iteration_cap_from_convergence() {
        // Arrange
        let capped = TerminationStatus::Terminated(TerminationReason::MaxItersReached);
        let done = TerminationStatus::Terminated(TerminationReason::SolverConverged);

        // Act
        let a = MinimizerOutcome::new(Some(array![0.5]), 1.0, capped, 10, FnEvalMap::new(), None)
            .expect("valid outcome");
        let b = MinimizerOutcome::new(Some(array![0.5]), 1.0, done, 3, FnEvalMap::new(), None)
            .expect("valid outcome");

        // Assert
        assert!(!a.converged);
        assert!(b.converged);
        assert_eq!(b.iterations, 3);
    }

    #[test]
    // Purpose
    // -------
    // Non-finite estimates are rejected when an outcome is assembled.
    //
    // Given
    // -----
    // - `theta_hat = [NaN]`, and separately a missing `theta_hat`.
    //
    // Expect
    // ------
    // - `InvalidThetaHat` and `MissingThetaHat`.
    fn outcome_rejects_invalid_estimates() {
        // Arrange
        let status = TerminationStatus::Terminated(TerminationReason::SolverConverged);

        // Act
        let nan = MinimizerOutcome::new(
            Some(array![f64::NAN]),
            0.0,
            status.clone(),
            1,
            FnEvalMap::new(),
            None,
        );
        let missing = MinimizerOutcome::new(None, 0.0, status, 1, FnEvalMap::new(), None);

        // Assert
        assert!(matches!(nan, Err(OptError::InvalidThetaHat { .. })));
        assert_eq!(missing, Err(OptError::MissingThetaHat));
    }
}
