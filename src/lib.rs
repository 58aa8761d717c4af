//! irt_linking — IRT scale linking and score equating.
//!
//! Purpose
//! -------
//! Place two separately calibrated test forms on a common ability scale and
//! convert raw scores between them. Given item parameters for a set of
//! common items and an ability distribution per form, the crate estimates
//! linking coefficients (Mean/Mean, Mean/Sigma, Haebara, Stocking–Lord) and
//! builds true-score and observed-score equating tables.
//!
//! Key behaviors
//! -------------
//! - [`irt`] defines the item response capability, item sets, quadrature
//!   rules and summed-score distributions.
//! - [`linking`] validates the common-item design and fits every linking
//!   method, recording optimizer failures per method instead of aborting.
//! - [`equating`] inverts test characteristic curves (true scores) and runs
//!   continuized equipercentile equating (observed scores).
//! - [`optimization`] wraps `argmin` solvers (L-BFGS, Brent, Nelder–Mead)
//!   behind a small objective trait.
//!
//! Invariants & assumptions
//! ------------------------
//! - All computation is synchronous and in memory; inputs are borrowed and
//!   never mutated, so independent calls may run in parallel.
//! - Every iterative routine has a hard iteration cap.
//! - Randomized optimizer restarts are reproducible only with an explicit
//!   seed (`LinkingOptions::with_seed`).
//!
//! Conventions
//! -----------
//! - Linking maps Form X onto Form Y: `θ_Y = slope·θ_X + intercept`.
//! - Each module owns an error enum (`IrtError`, `OptError`, `LinkingError`,
//!   `EquatingError`) with `From` conversions along the dependency chain.
//! - Diagnostics are emitted through `tracing`; no subscriber is installed.
//!
//! Downstream usage
//! ----------------
//! ```ignore
//! use irt_linking::{equating::prelude::*, irt::prelude::*, linking::prelude::*};
//!
//! let linking = ScaleLinking::new(&form_x, &form_y, &quad_x, &quad_y, LinkingOptions::default())?;
//! let report = linking.compute();
//! let coef = report.stocking_lord.coefficients;
//! let table = TrueScoreEquating::new(&form_x, &form_y, Some(coef), NewtonOptions::default())?
//!     .equate_scores();
//! ```
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module; `tests/` holds an end-to-end
//!   linking and equating pipeline.

pub mod equating;
pub mod irt;
pub mod linking;
pub mod optimization;
