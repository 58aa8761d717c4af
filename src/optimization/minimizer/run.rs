//! Execution helpers that run an `argmin` solver and return a crate-friendly
//! [`MinimizerOutcome`].
//!
//! Three runners share the same shape: wire the problem and solver into an
//! `Executor`, apply the iteration cap, run, and normalize the final state.
//! Every run is bounded by `max_iters`, so worst-case cost is fixed even when
//! a tolerance is never reached.
use crate::optimization::{
    errors::OptResult,
    minimizer::{
        Grad, MinimizerOutcome, Objective, Theta,
        adapter::{ArgMinAdapter, ScalarAdapter},
        traits::{MinimizerOptions, SimplexOptions},
        types::{Brent, Cost, Simplex},
    },
};
#[cfg(feature = "obs_slog")]
use argmin::core::{CostFunction, Gradient};
use argmin::core::{Executor, IterState, State};
#[cfg(feature = "obs_slog")]
use argmin_math::ArgminL2Norm;
use ndarray::Array1;

/// Run an L-BFGS optimization (either line search) on an [`Objective`].
///
/// # Arguments
/// - `theta0`: initial parameter vector, consumed into the solver state.
/// - `opts`: tolerances, verbosity and the iteration cap.
/// - `problem`: an [`ArgMinAdapter`] wrapping the user’s objective and data.
/// - `solver`: a solver from the `build_optimizer_*` builders.
///
/// # Feature flags
/// With `obs_slog` and `opts.verbose == true`, a terminal slog observer is
/// attached and the initial cost (and gradient norm) is printed once.
///
/// # Errors
/// - Propagates any `argmin` runtime error (line-search failures, objective
///   errors) via `From<argmin::core::Error>`.
/// - Propagates validation errors from [`MinimizerOutcome::new`].
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &MinimizerOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<MinimizerOutcome>
where
    F: Objective,
    S: argmin::core::Solver<ArgMinAdapter<'a, F>, IterState<Theta, Grad, (), (), (), Cost>>,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&theta0, &problem)?;
    }
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(theta0));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    MinimizerOutcome::new(
        result.take_best_param(),
        result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        grad,
    )
}

/// Run Brent's method on a scalar closure, capped at `max_iter` iterations.
///
/// The scalar minimizer is reported as a length-1 `theta_hat`.
///
/// # Errors
/// - Propagates objective errors raised during evaluation.
/// - Propagates validation errors from [`MinimizerOutcome::new`].
pub fn run_brent<G>(f: &G, solver: Brent, max_iter: usize) -> OptResult<MinimizerOutcome>
where
    G: Fn(f64) -> OptResult<Cost>,
{
    let problem = ScalarAdapter::new(f);
    let result = Executor::new(problem, solver)
        .configure(|state| state.max_iters(max_iter as u64))
        .run()?;
    let state = result.state();
    let theta_hat = state.get_best_param().map(|&x| Array1::from_elem(1, x));
    MinimizerOutcome::new(
        theta_hat,
        state.get_best_cost(),
        state.get_termination_status().clone(),
        state.get_iter(),
        state.get_func_counts().clone(),
        None,
    )
}

/// Run one Nelder–Mead simplex search on an [`Objective`].
///
/// # Errors
/// - Propagates objective errors raised during evaluation.
/// - Propagates validation errors from [`MinimizerOutcome::new`].
pub fn run_simplex<'a, F>(
    problem: ArgMinAdapter<'a, F>, solver: Simplex, opts: &SimplexOptions,
) -> OptResult<MinimizerOutcome>
where
    F: Objective,
{
    let mut state = Executor::new(problem, solver)
        .configure(|state| state.max_iters(opts.max_iter as u64))
        .run()?
        .state()
        .clone();
    MinimizerOutcome::new(
        state.take_best_param(),
        state.get_best_cost(),
        state.get_termination_status().clone(),
        state.get_iter(),
        state.get_func_counts().clone(),
        None,
    )
}

// ---- Helper Methods ----

#[cfg(feature = "obs_slog")]
fn log_initial_state<F>(theta0: &Theta, problem: &ArgMinAdapter<'_, F>) -> OptResult<()>
where
    F: Objective,
{
    let c0 = problem.cost(theta0)?;
    let g0n = problem.gradient(theta0).ok().map(|g| g.l2_norm());

    eprintln!(
        "init: c(theta0) = {:.6}{}",
        c0,
        g0n.map(|n| format!(", ||grad|| = {:.6}", n)).unwrap_or_default()
    );
    Ok(())
}
