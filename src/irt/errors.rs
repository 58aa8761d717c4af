//! Errors for item response models, item sets, quadrature rules and
//! summed-score distributions.
//!
//! ## Conventions
//! - **Indices are 0-based.**
//! - Every constructor validates its inputs and reports the offending value;
//!   once built, models and rules are assumed finite and consistent.
use statrs::distribution::NormalError;

/// Result alias for IRT model and quadrature operations.
pub type IrtResult<T> = Result<T, IrtError>;

/// Unified error type for the IRT capability layer.
#[derive(Debug, Clone, PartialEq)]
pub enum IrtError {
    // ---- Item parameters ----
    /// Discrimination must be finite and strictly positive.
    InvalidDiscrimination { value: f64, reason: &'static str },

    /// Difficulty / step parameters must be finite.
    InvalidLocation { index: usize, value: f64 },

    /// Asymptotes must satisfy 0 ≤ guessing < slipping ≤ 1.
    InvalidAsymptotes { guessing: f64, slipping: f64, reason: &'static str },

    /// Scaling constant D must be finite and strictly positive.
    InvalidScalingConstant { value: f64 },

    /// A polytomous item needs at least one step parameter.
    TooFewCategories { ncat: usize },

    /// Score weights must be finite and one per category.
    InvalidScoreWeights { expected: usize, found: usize, reason: &'static str },

    // ---- Quadrature ----
    /// Quadrature rule has no points.
    EmptyQuadrature,

    /// Points and weights must have the same length.
    QuadratureLengthMismatch { points: usize, weights: usize },

    /// Quadrature points must be finite and strictly increasing.
    InvalidQuadraturePoint { index: usize, value: f64, reason: &'static str },

    /// Quadrature weights must be finite and non-negative.
    InvalidQuadratureWeight { index: usize, value: f64, reason: &'static str },

    /// Generated rules need `n ≥ 2` points over a finite range with min < max.
    InvalidQuadratureRange { n: usize, min: f64, max: f64, reason: &'static str },

    // ---- Summed scores ----
    /// Lord–Wingersky requires integer score weights.
    NonIntegerScoreWeight { item: String, weight: f64 },

    /// Lord–Wingersky requires non-negative score weights.
    NegativeScoreWeight { item: String, weight: f64 },

    /// Operation needs at least one item.
    EmptyItemSet,

    // ---- statrs distribution errors ----
    /// Wrapper for statrs::distribution::NormalError::MeanInvalid
    InvalidNormalMean,

    /// Wrapper for statrs::distribution::NormalError::StandardDeviationInvalid
    InvalidNormalSd,

    /// Any other statrs normal-distribution error.
    NormalDistribution { text: String },
}

impl std::error::Error for IrtError {}

impl std::fmt::Display for IrtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Item parameters ----
            IrtError::InvalidDiscrimination { value, reason } => {
                write!(f, "Invalid discrimination {value}: {reason}")
            }
            IrtError::InvalidLocation { index, value } => {
                write!(f, "Invalid location parameter at index {index}: {value}, must be finite")
            }
            IrtError::InvalidAsymptotes { guessing, slipping, reason } => {
                write!(
                    f,
                    "Invalid asymptotes (guessing = {guessing}, slipping = {slipping}): {reason}"
                )
            }
            IrtError::InvalidScalingConstant { value } => {
                write!(f, "Invalid scaling constant {value}: must be finite and > 0")
            }
            IrtError::TooFewCategories { ncat } => {
                write!(f, "Polytomous item needs at least 2 categories, found {ncat}")
            }
            IrtError::InvalidScoreWeights { expected, found, reason } => {
                write!(f, "Invalid score weights (expected {expected}, found {found}): {reason}")
            }

            // ---- Quadrature ----
            IrtError::EmptyQuadrature => write!(f, "Quadrature rule has no points"),
            IrtError::QuadratureLengthMismatch { points, weights } => {
                write!(f, "Quadrature length mismatch: {points} points, {weights} weights")
            }
            IrtError::InvalidQuadraturePoint { index, value, reason } => {
                write!(f, "Invalid quadrature point at index {index}: {value}: {reason}")
            }
            IrtError::InvalidQuadratureWeight { index, value, reason } => {
                write!(f, "Invalid quadrature weight at index {index}: {value}: {reason}")
            }
            IrtError::InvalidQuadratureRange { n, min, max, reason } => {
                write!(f, "Invalid quadrature range ({n} points on [{min}, {max}]): {reason}")
            }

            // ---- Summed scores ----
            IrtError::NonIntegerScoreWeight { item, weight } => {
                write!(f, "Item '{item}' has non-integer score weight {weight}")
            }
            IrtError::NegativeScoreWeight { item, weight } => {
                write!(f, "Item '{item}' has negative score weight {weight}")
            }
            IrtError::EmptyItemSet => write!(f, "Item set is empty"),

            // ---- statrs distribution errors ----
            IrtError::InvalidNormalMean => write!(f, "Normal density mean must be finite"),
            IrtError::InvalidNormalSd => {
                write!(f, "Normal density standard deviation must be finite and > 0")
            }
            IrtError::NormalDistribution { text } => write!(f, "Normal density error: {text}"),
        }
    }
}

impl From<NormalError> for IrtError {
    fn from(err: NormalError) -> IrtError {
        match err {
            NormalError::MeanInvalid => IrtError::InvalidNormalMean,
            NormalError::StandardDeviationInvalid => IrtError::InvalidNormalSd,
            other => IrtError::NormalDistribution { text: other.to_string() },
        }
    }
}
