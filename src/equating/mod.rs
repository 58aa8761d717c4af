//! equating — IRT true-score and observed-score equating.
//!
//! Purpose
//! -------
//! Produce score-conversion tables that express Form X raw scores on Form
//! Y's score scale, either through the test characteristic curves (true
//! scores) or through synthetic-population summed-score distributions
//! (observed scores).
//!
//! Key behaviors
//! -------------
//! - [`TrueScoreEquating`] inverts Form X's TCC by Newton–Raphson and maps
//!   the ability through Form Y's TCC.
//! - [`ObservedScoreEquating`] mixes summed-score densities into synthetic
//!   populations and applies continuized equipercentile equating.
//! - [`percentile_rank`] / [`percentile_point`] and [`Moments`] are exposed
//!   for callers that build their own distributions.
//!
//! Invariants & assumptions
//! ------------------------
//! - Callers always receive a complete table. Unreliable rows are flagged
//!   by [`ConvergenceStatus`], never silently filled.
//! - Linking coefficients are optional; without them both forms are assumed
//!   to share a scale.
//!
//! Testing notes
//! -------------
//! - Newton–Raphson is checked against bisection, equipercentile mapping
//!   against the rank/point inverse law, and synthetic densities against
//!   normalization.

pub mod errors;
pub mod moments;
pub mod observed_score;
pub mod percentile;
pub mod true_score;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{EquatingError, EquatingResult};
pub use self::moments::Moments;
pub use self::observed_score::{ObservedScoreEquating, ObservedScoreTable};
pub use self::percentile::{cumulative_distribution, percentile_point, percentile_rank};
pub use self::true_score::{ConvergenceStatus, NewtonOptions, TrueScoreEquating, TrueScoreTable};

pub mod prelude {
    pub use super::errors::{EquatingError, EquatingResult};
    pub use super::observed_score::{ObservedScoreEquating, ObservedScoreTable};
    pub use super::true_score::{
        ConvergenceStatus, NewtonOptions, TrueScoreEquating, TrueScoreTable,
    };
}
