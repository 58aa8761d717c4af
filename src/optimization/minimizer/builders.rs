//! minimizer::builders — solver construction helpers.
//!
//! Purpose
//! -------
//! Provide small, focused builders for the argmin solvers used by the
//! minimizer. These helpers hide Argmin’s generic wiring and apply
//! crate-level options (tolerances, memory size, simplex geometry) so that
//! higher-level code can request a configured solver without touching
//! Argmin-specific types.
//!
//! Key behaviors
//! -------------
//! - Construct L-BFGS solvers with either Hager–Zhang or More–Thuente line
//!   search and apply optional gradient and cost-change tolerances.
//! - Construct Brent solvers over a validated bracket.
//! - Construct Nelder–Mead solvers from a starting point by offsetting each
//!   coordinate by the configured initial step.
//!
//! Conventions
//! -----------
//! - Builders never set `max_iters`; the runner applies iteration caps.
//! - Errors are always reported via [`OptResult`].
//!
//! Testing notes
//! -------------
//! - Unit tests verify memory propagation, tolerance wiring, bracket
//!   rejection and simplex geometry.
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    minimizer::{
        traits::{MinimizerOptions, SimplexOptions},
        types::{
            Brent, Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Simplex, Theta,
        },
        validation::{validate_theta_input, verify_bracket},
    },
};

/// Absolute term of Brent's stopping tolerance.
const BRENT_ABS_TOL: f64 = 1e-8;

/// Construct L-BFGS with Hager–Zhang line search.
///
/// `opts.lbfgs_mem` sets the history size (default [`DEFAULT_LBFGS_MEM`]);
/// `opts.tols.tol_grad` / `opts.tols.tol_cost` are wired into the solver.
///
/// # Errors
/// `OptError` (via `From<argmin::core::Error>`) if Argmin rejects a tolerance.
pub fn build_optimizer_hager_zhang(opts: &MinimizerOptions) -> OptResult<LbfgsHagerZhang> {
    let hager_zhang = HagerZhangLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsHagerZhang::new(hager_zhang, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Construct L-BFGS with More–Thuente line search.
///
/// # Errors
/// `OptError` (via `From<argmin::core::Error>`) if Argmin rejects a tolerance.
pub fn build_optimizer_more_thuente(opts: &MinimizerOptions) -> OptResult<LbfgsMoreThuente> {
    let more_thuente = MoreThuenteLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsMoreThuente::new(more_thuente, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Apply optional tolerances to an L-BFGS solver, regardless of line search.
///
/// When a tolerance is `None`, Argmin’s default remains in effect.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &MinimizerOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

/// Construct Brent's bounded minimizer over `[lower, upper]`.
///
/// Brent starts from the golden-section point
/// `lower + 0.381966·(upper − lower)`; callers that want a particular
/// starting point choose the bracket accordingly.
///
/// # Errors
/// `OptError::InvalidBracket` for a non-finite or unordered bracket.
pub fn build_brent(lower: f64, upper: f64) -> OptResult<Brent> {
    verify_bracket(lower, upper)?;
    Ok(Brent::new(lower, upper).set_tolerance(f64::EPSILON.sqrt(), BRENT_ABS_TOL))
}

/// Construct a Nelder–Mead solver whose initial simplex is `theta0` plus one
/// vertex per coordinate offset by `opts.initial_step`.
///
/// # Errors
/// - `OptError::InvalidThetaInput` for a non-finite starting point.
/// - `OptError` (via `From<argmin::core::Error>`) if Argmin rejects the
///   standard-deviation tolerance.
pub fn build_simplex(theta0: &Theta, opts: &SimplexOptions) -> OptResult<Simplex> {
    validate_theta_input(theta0)?;
    let simplex = initial_simplex(theta0, opts.initial_step);
    let solver = Simplex::new(simplex).with_sd_tolerance(opts.sd_tolerance)?;
    Ok(solver)
}

fn initial_simplex(theta0: &Theta, step: f64) -> Vec<Theta> {
    let mut vertices = Vec::with_capacity(theta0.len() + 1);
    vertices.push(theta0.clone());
    for i in 0..theta0.len() {
        let mut v = theta0.clone();
        v[i] += step;
        vertices.push(v);
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{
        errors::OptError,
        minimizer::traits::{LineSearcher, MinimizerOptions, Tolerances},
    };
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Basic construction of L-BFGS solvers with both line searches.
    // - Bracket validation for Brent.
    // - Geometry of the initial Nelder–Mead simplex.
    //
    // They intentionally DO NOT cover:
    // - End-to-end executor behavior, which is tested in `api`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Both L-BFGS builders succeed with default and explicit memory.
    //
    // Given
    // -----
    // - Valid tolerances; `lbfgs_mem` of `None` and `Some(11)`.
    //
    // Expect
    // ------
    // - All builders return `Ok(_)`.
    fn lbfgs_builders_accept_default_and_explicit_memory() {
        // Arrange
        let tols =
            Tolerances::new(Some(1e-6), Some(1e-8), Some(50)).expect("Tolerances should be valid");
        let default_mem = MinimizerOptions::new(tols, LineSearcher::HagerZhang, false, None)
            .expect("options should be valid");
        let explicit_mem = MinimizerOptions::new(tols, LineSearcher::MoreThuente, false, Some(11))
            .expect("options should be valid");

        // Act / Assert
        assert!(build_optimizer_hager_zhang(&default_mem).is_ok());
        assert!(build_optimizer_more_thuente(&default_mem).is_ok());
        assert!(build_optimizer_hager_zhang(&explicit_mem).is_ok());
        assert!(build_optimizer_more_thuente(&explicit_mem).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // `configure_lbfgs` leaves the solver constructible when both
    // tolerances are absent.
    //
    // Given
    // -----
    // - Tolerances with only `max_iter`.
    //
    // Expect
    // ------
    // - `Ok(_)`.
    fn configure_lbfgs_respects_absent_tolerances() {
        // Arrange
        let raw = LBFGS::new(MoreThuenteLS::new(), DEFAULT_LBFGS_MEM);
        let tols = Tolerances::new(None, None, Some(50)).expect("Tolerances should be valid");
        let opts = MinimizerOptions::new(tols, LineSearcher::MoreThuente, false, None)
            .expect("options should be valid");

        // Act
        let configured = configure_lbfgs(raw, &opts);

        // Assert
        assert!(configured.is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Brent refuses an inverted bracket.
    //
    // Given
    // -----
    // - `lower = 4`, `upper = -4`.
    //
    // Expect
    // ------
    // - `OptError::InvalidBracket`.
    fn build_brent_rejects_inverted_bracket() {
        // Act
        let res = build_brent(4.0, -4.0);

        // Assert
        assert!(matches!(res, Err(OptError::InvalidBracket { .. })));
    }

    #[test]
    // Purpose
    // -------
    // The initial simplex has `n + 1` vertices offset along each axis.
    //
    // Given
    // -----
    // - θ₀ = (0.5, 1.0), step 0.25.
    //
    // Expect
    // ------
    // - Vertices θ₀, θ₀ + (0.25, 0), θ₀ + (0, 0.25).
    fn initial_simplex_offsets_each_coordinate() {
        // Act
        let simplex = initial_simplex(&array![0.5, 1.0], 0.25);

        // Assert
        assert_eq!(simplex.len(), 3);
        assert_eq!(simplex[0], array![0.5, 1.0]);
        assert_eq!(simplex[1], array![0.75, 1.0]);
        assert_eq!(simplex[2], array![0.5, 1.25]);
    }
}
