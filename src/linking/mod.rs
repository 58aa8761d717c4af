//! linking — place Form X item parameters on Form Y's scale.
//!
//! Purpose
//! -------
//! Estimate the linear transformation `θ_Y = A·θ_X + B` from a set of common
//! items calibrated separately on both forms, using four methods:
//! Mean/Mean, Mean/Sigma, Haebara, and Stocking–Lord.
//!
//! Key behaviors
//! -------------
//! - [`common_items`] validates the anchor design and fixes the canonical
//!   item order before any numeric work.
//! - [`closed_form`] computes Mean/Mean and Mean/Sigma from moments of the
//!   item parameters.
//! - [`criterion`] evaluates the characteristic-curve loss functions over
//!   both forms' quadrature rules and wraps them as minimizer objectives.
//! - [`ScaleLinking`] chooses the Rasch or free-slope branch, runs the
//!   optimizers with restarts, and assembles a [`LinkingReport`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Coefficients are reported as `(slope A, intercept B)`; optimizer
//!   parameter vectors are ordered `(intercept, slope)`.
//! - Rasch-family forms always report slope exactly 1.
//! - A fit whose optimizer fails is flagged `FitStatus::Failed` and keeps the
//!   Mean/Mean starting values; it never masquerades as identity.
//!
//! Conventions
//! -----------
//! - Construction errors are [`LinkingError`]; per-method failures live on
//!   the [`LinkingFit`].
//! - `precision` on coefficients only affects `Display`.
//!
//! Downstream usage
//! ----------------
//! - Pass `LinkingFit::coefficients` to the equating constructors to place
//!   Form X on Form Y's scale before equating.
//!
//! Testing notes
//! -------------
//! - Criterion tests check that losses vanish at the true transformation.
//! - Orchestrator tests recover known transformations on both branches and
//!   with both free-slope strategies.

pub mod closed_form;
pub mod coefficients;
pub mod common_items;
pub mod criterion;
pub mod errors;
pub mod options;
pub mod orchestrator;
pub mod rasch;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::closed_form::{mean_mean, mean_sigma};
pub use self::coefficients::{FitStatus, LinkingCoefficients, LinkingFit, LinkingMethod};
pub use self::common_items::common_items;
pub use self::criterion::{CriterionContext, CurveCriterion, InterceptOnly, InterceptSlope};
pub use self::errors::{LinkingError, LinkingResult};
pub use self::options::{CriterionKind, LinkingOptions, LinkingStrategy};
pub use self::orchestrator::{LinkingReport, ScaleLinking};
pub use self::rasch::{both_rasch_family, is_rasch_family};

pub mod prelude {
    pub use super::coefficients::{FitStatus, LinkingCoefficients, LinkingFit, LinkingMethod};
    pub use super::errors::{LinkingError, LinkingResult};
    pub use super::options::{CriterionKind, LinkingOptions, LinkingStrategy};
    pub use super::orchestrator::{LinkingReport, ScaleLinking};
}
