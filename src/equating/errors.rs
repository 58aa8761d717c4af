//! Errors for true-score and observed-score equating.
//!
//! Newton–Raphson non-convergence and degenerate equipercentile cells are not
//! errors: they are recorded in the equating tables. `EquatingError` covers
//! inputs that make an equating object impossible to build.
use crate::irt::errors::IrtError;

/// Result alias for equating operations.
pub type EquatingResult<T> = Result<T, EquatingError>;

#[derive(Debug, Clone, PartialEq)]
pub enum EquatingError {
    // ---- Forms ----
    /// A form has no items.
    EmptyForm { form: &'static str },

    // ---- Newton–Raphson options ----
    /// Tolerance must be finite and strictly positive.
    InvalidNewtonTolerance { value: f64 },

    /// Iteration cap must be at least 1.
    InvalidNewtonIterations { value: usize },

    /// Ability bound must be finite and strictly positive.
    InvalidThetaBound { value: f64 },

    // ---- Densities ----
    /// Population weight must lie in [0, 1].
    InvalidPopulationWeight { value: f64 },

    /// A summed-score density has no entries.
    EmptyDensity { name: &'static str },

    /// Densities describing the same form must have the same length.
    DensityLengthMismatch { name: &'static str, expected: usize, found: usize },

    /// Density entries must be finite and non-negative.
    InvalidDensity { name: &'static str, index: usize, value: f64 },

    // ---- Wrapped errors ----
    Irt(IrtError),
}

impl std::error::Error for EquatingError {}

impl std::fmt::Display for EquatingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Forms ----
            EquatingError::EmptyForm { form } => write!(f, "Form {form} has no items"),

            // ---- Newton–Raphson options ----
            EquatingError::InvalidNewtonTolerance { value } => {
                write!(f, "Invalid Newton-Raphson tolerance {value}: must be finite and positive")
            }
            EquatingError::InvalidNewtonIterations { value } => {
                write!(f, "Invalid Newton-Raphson iteration cap {value}: must be at least 1")
            }
            EquatingError::InvalidThetaBound { value } => {
                write!(f, "Invalid ability bound {value}: must be finite and positive")
            }

            // ---- Densities ----
            EquatingError::InvalidPopulationWeight { value } => {
                write!(f, "Invalid population weight {value}: must lie in [0, 1]")
            }
            EquatingError::EmptyDensity { name } => write!(f, "Density {name} is empty"),
            EquatingError::DensityLengthMismatch { name, expected, found } => {
                write!(f, "Density {name} has {found} entries; expected {expected}")
            }
            EquatingError::InvalidDensity { name, index, value } => write!(
                f,
                "Density {name} has invalid entry {value} at index {index}: \
                 entries must be finite and non-negative"
            ),

            // ---- Wrapped errors ----
            EquatingError::Irt(err) => write!(f, "IRT error: {err}"),
        }
    }
}

impl From<IrtError> for EquatingError {
    fn from(err: IrtError) -> Self {
        EquatingError::Irt(err)
    }
}
