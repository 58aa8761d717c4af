//! irt — item response capability, item sets and ability quadrature.
//!
//! Purpose
//! -------
//! Provide the IRT building blocks consumed by scale linking and score
//! equating: calibrated item models behind a single capability trait,
//! per-form item sets, discrete ability distributions, and summed-score
//! distributions.
//!
//! Key behaviors
//! -------------
//! - [`ItemResponseModel`] exposes probabilities, expected scores, the
//!   derivative of the expected score, and the transformed "t-star" /
//!   "t-sharp" forms used by characteristic-curve linking.
//! - [`LogisticItem`] (1PL–4PL) and [`PartialCreditItem`] (PCM/GPCM)
//!   implement the capability.
//! - [`ItemSet`] aggregates items into test characteristic curves.
//! - [`QuadratureRule`] carries ordered `(θ, weight)` pairs.
//! - [`sum_score_distribution`] runs the Lord–Wingersky recursion.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every constructor validates its inputs and returns [`IrtError`] instead
//!   of panicking; downstream code assumes finite, consistent parameters.
//! - Items are immutable and shared through `Arc`.
//!
//! Conventions
//! -----------
//! - Transformed forms take `(intercept, slope)` in that order.
//! - Category indices and summed scores are 0-based.
//!
//! Downstream usage
//! ----------------
//! - `linking` evaluates the transformed forms over quadrature rules.
//! - `equating` inverts TCCs and mixes summed-score distributions.
//!
//! Testing notes
//! -------------
//! - Unit tests check probability formulas against closed-form cases,
//!   analytic derivatives against central differences, and Lord–Wingersky
//!   output against binomial and TCC-mean identities.

pub mod errors;
pub mod logistic;
pub mod model;
pub mod partial_credit;
pub mod quadrature;
pub mod sum_score;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{IrtError, IrtResult};
pub use self::logistic::LogisticItem;
pub use self::model::{ItemFamily, ItemResponseModel, ItemSet, SharedItem};
pub use self::partial_credit::PartialCreditItem;
pub use self::quadrature::QuadratureRule;
pub use self::sum_score::sum_score_distribution;

pub mod prelude {
    pub use super::errors::{IrtError, IrtResult};
    pub use super::model::{ItemResponseModel, ItemSet};
    pub use super::quadrature::QuadratureRule;
    pub use super::{LogisticItem, PartialCreditItem};
}
