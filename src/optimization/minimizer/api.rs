//! High-level entry points for minimizing criterion functions.
//!
//! - [`minimize`]: L-BFGS with Hager–Zhang or More–Thuente line search.
//! - [`minimize_scalar`]: Brent's method on a bounded interval.
//! - [`minimize_simplex`]: one derivative-free Nelder–Mead run.
use crate::optimization::{
    errors::OptResult,
    minimizer::{
        MinimizerOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::{
            build_brent, build_optimizer_hager_zhang, build_optimizer_more_thuente, build_simplex,
        },
        run::{run_brent, run_lbfgs, run_simplex},
        traits::{LineSearcher, MinimizerOptions, Objective, SimplexOptions},
        types::Cost,
    },
};

/// Minimize an objective `c(θ)` using L-BFGS with the chosen line search.
///
/// # Behavior
/// - Validates the initial guess via `f.check(theta0, data)`.
/// - Builds an L-BFGS solver based on `opts.line_searcher`.
/// - Calls `run_lbfgs`, which applies the iteration cap and returns a
///   [`MinimizerOutcome`].
///
/// # Errors
/// - Propagates any error from `f.check`.
/// - Propagates builder errors from `build_optimizer_*`.
/// - Propagates runtime errors from `run_lbfgs` (e.g., line search failures).
///
/// # Example
/// ```
/// use irt_linking::optimization::errors::OptResult;
/// use irt_linking::optimization::minimizer::{minimize, MinimizerOptions, Objective, Theta};
/// use ndarray::array;
///
/// struct Bowl;
/// impl Objective for Bowl {
///     type Data = ();
///     fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
///         Ok((theta[0] - 1.0).powi(2) + (theta[1] + 0.5).powi(2))
///     }
///     fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = minimize(&Bowl, array![0.0, 0.0], &(), &MinimizerOptions::default())?;
/// assert!((out.theta_hat[0] - 1.0).abs() < 1e-4);
/// # Ok::<(), irt_linking::optimization::errors::OptError>(())
/// ```
pub fn minimize<F: Objective>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MinimizerOptions,
) -> OptResult<MinimizerOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
    }
}

/// Minimize a scalar function on `[lower, upper]` with Brent's method.
///
/// # Errors
/// - `OptError::InvalidBracket` for an invalid bracket.
/// - Propagates evaluation errors and outcome validation errors.
pub fn minimize_scalar<G>(
    f: &G, lower: f64, upper: f64, max_iter: usize,
) -> OptResult<MinimizerOutcome>
where
    G: Fn(f64) -> OptResult<Cost>,
{
    let solver = build_brent(lower, upper)?;
    run_brent(f, solver, max_iter)
}

/// Minimize an objective with one Nelder–Mead run started at `theta0`.
///
/// # Errors
/// - Propagates any error from `f.check`.
/// - Propagates builder errors (non-finite start, invalid tolerance).
/// - Propagates evaluation errors and outcome validation errors.
pub fn minimize_simplex<F: Objective>(
    f: &F, theta0: &Theta, data: &F::Data, opts: &SimplexOptions,
) -> OptResult<MinimizerOutcome> {
    f.check(theta0, data)?;
    let solver = build_simplex(theta0, opts)?;
    let problem = ArgMinAdapter::new(f, data);
    run_simplex(problem, solver, opts)
}
