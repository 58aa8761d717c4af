//! minimizer — argmin-powered criterion minimization.
//!
//! Purpose
//! -------
//! Provide a high-level, Argmin-backed optimization layer for **minimizing
//! criterion functions** `c(θ)` such as the Haebara and Stocking–Lord
//! characteristic-curve criteria. Callers implement a single trait,
//! [`Objective`], and invoke one of three entry points:
//! - [`minimize`]: L-BFGS with a configurable line search, tolerances and a
//!   finite-difference gradient fallback;
//! - [`minimize_simplex`]: a single derivative-free Nelder–Mead run;
//! - [`minimize_scalar`]: Brent's method on a bounded interval for
//!   one-parameter problems.
//!
//! Key behaviors
//! -------------
//! - Expose user objectives as Argmin problems via [`adapter::ArgMinAdapter`]
//!   (vector parameters) and [`adapter::ScalarAdapter`] (scalar closures).
//!   No sign flip is applied: the solvers minimize `c(θ)` directly.
//! - Build configured solvers in [`builders`] and execute them in [`run`],
//!   normalizing every final state into a [`MinimizerOutcome`].
//! - Provide finite-difference gradients in [`finite_diff`] with post-hoc
//!   validation and error capture.
//! - Centralize configuration ([`Tolerances`], [`MinimizerOptions`],
//!   [`SimplexOptions`]) and validation logic ([`validation`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - [`Objective::value`] and [`Objective::grad`] report invalid inputs as
//!   recoverable [`OptError`](crate::optimization::errors::OptError) values,
//!   never panics. Such errors are tunneled through Argmin and recovered
//!   unchanged by `From<argmin::core::Error>`.
//! - Every run is capped by `max_iter`; an outcome that stopped on the cap is
//!   reported with `converged == false`.
//! - Configuration types are validated on construction and are treated as
//!   internally consistent by the solver layer.
//!
//! Conventions
//! -----------
//! - Parameters are [`Theta`] (`Array1<f64>`); scalar searches report a
//!   length-1 `theta_hat`.
//! - Errors bubble up as `OptResult<T>`; this module and its children never
//!   intentionally panic or use `unsafe`.
//!
//! Downstream usage
//! ----------------
//! - The linking layer implements [`Objective`] for its criterion wrappers
//!   and calls [`minimize`] or [`minimize_simplex`] once per restart.
//! - The Rasch-family branch calls [`minimize_scalar`] on the intercept.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover cost pass-through and gradient handling in
//!   [`adapter`], solver construction in [`builders`], finite differences in
//!   [`finite_diff`], validation helpers in [`validation`], configuration and
//!   outcome invariants in [`traits`], and end-to-end runs on toy problems in
//!   [`api`].

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::{minimize, minimize_scalar, minimize_simplex};
pub use self::traits::{
    LineSearcher, MinimizerOptions, MinimizerOutcome, Objective, SimplexOptions, Tolerances,
};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Theta};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use irt_linking::optimization::minimizer::prelude::*;
//
// to import the main minimizer surface in a single line.

pub mod prelude {
    pub use super::api::{minimize, minimize_scalar, minimize_simplex};
    pub use super::traits::{
        LineSearcher, MinimizerOptions, MinimizerOutcome, Objective, SimplexOptions, Tolerances,
    };
    pub use super::types::{Cost, Grad, Theta};
}
