//! optimization — criterion minimization and unified error surface.
//!
//! Purpose
//! -------
//! Provide a cohesive optimization layer for scale linking, combining an
//! Argmin-backed minimizer with a single error/result surface. Callers
//! implement a criterion, choose tolerances, and obtain the minimizer and
//! diagnostics without touching backend solver details.
//!
//! Key behaviors
//! -------------
//! - Expose a high-level API for **minimizing criteria** `c(θ)`
//!   (`minimizer`), covering L-BFGS, Nelder–Mead and Brent's method.
//! - Normalize configuration issues, numerical failures, and backend solver
//!   errors into a single enum (`errors::OptError`) with a common result
//!   alias (`OptResult<T>`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Solvers operate on unconstrained parameters `θ` and assume that inputs
//!   are finite once validation has passed; invalid states are reported as
//!   `OptError`, not panics.
//! - Criterion implementations treat domain violations (e.g., a zero slope)
//!   as recoverable errors surfaced through the optimization layer.
//!
//! Conventions
//! -----------
//! - Public optimization entrypoints that can fail return `OptResult<T>`;
//!   callers never see raw Argmin errors.
//! - This module avoids logging; the linking orchestrator reports progress
//!   and failures through `tracing`. The optional `obs_slog` feature attaches
//!   Argmin's slog observer for per-iteration traces.
//!
//! Downstream usage
//! ----------------
//! - `linking::criterion` implements `Objective` for the characteristic-curve
//!   criteria; `linking::orchestrator` drives all three entry points.
//! - Front-ends typically import the curated surface via
//!   `optimization::prelude::*`.
//!
//! Testing notes
//! -------------
//! - Unit tests in the submodules focus on local concerns: solver wiring,
//!   tolerance handling, finite differences and error conversions.
//! - Integration tests exercise the minimizer through the linking pipeline.

pub mod errors;
pub mod minimizer;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use irt_linking::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::minimizer::prelude::*;
}
