//! optimization::errors — unified error surface for the minimizer layer.
//!
//! Every failure the minimizer can report (bad configuration, non-finite
//! objective values, malformed gradients, wrong parameter arity, and errors
//! raised inside argmin) is normalized into [`OptError`] so that callers never
//! see raw `argmin::core::Error` values.
use argmin::core::{ArgminError, Error};

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// Implies that FD should be used
    GradientNotImplemented,

    /// Gradient dimensions do not match parameter dimensions.
    GradientDimMismatch { expected: usize, found: usize },

    /// Gradient elements need to be finite
    InvalidGradient { index: usize, value: f64, reason: &'static str },

    // ---- MinimizerOptions ----
    /// Gradient tolerance needs to be positive and finite.
    InvalidTolGrad { tol: f64, reason: &'static str },
    /// Cost change tolerance needs to be positive and finite.
    InvalidTolCost { tol: f64, reason: &'static str },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter { max_iter: usize, reason: &'static str },
    /// At least one tolerance must be provided.
    NoTolerancesProvided,

    /// Invalid line searcher name.
    InvalidLineSearch { name: String, reason: &'static str },

    /// lbfgs_mem needs to be at least 1.
    InvalidLBFGSMem { mem: usize, reason: &'static str },

    // ---- Simplex / scalar search ----
    /// Initial simplex step must be positive and finite.
    InvalidSimplexStep { step: f64, reason: &'static str },
    /// Standard-deviation tolerance of the simplex must be positive and finite.
    InvalidSdTolerance { tol: f64, reason: &'static str },
    /// Bracket for a one-dimensional search must be finite with lower < upper.
    InvalidBracket { lower: f64, upper: f64, reason: &'static str },

    // ---- Objective ----
    /// Objective returned a non-finite value.
    NonFiniteCost { value: f64 },

    /// Parameter vector has the wrong number of elements for the objective.
    ParameterArity { expected: usize, found: usize },

    /// Candidate slope is zero (or numerically indistinguishable from it).
    DegenerateSlope { value: f64 },

    /// Parameter vector entries need to be finite.
    InvalidThetaInput { index: usize, value: f64 },

    // ---- Optimizer outcome ----
    /// Estimated parameters must be finite.
    InvalidThetaHat { index: usize, value: f64, reason: &'static str },

    /// Theta hat is missing
    MissingThetaHat,

    // ---- Argmin ---
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter { text: String },
    /// Wrapper for argmin::NotImplemented
    NotImplemented { text: String },
    /// Wrapper for argmin::NotInitialized
    NotInitialized { text: String },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated { text: String },
    /// Wrapper for argmin::CheckPointNotFound
    CheckPointNotFound { text: String },
    /// Wrapper for argmin::PotentialBug
    PotentialBug { text: String },
    /// Wrapper for argmin::ImpossibleError
    ImpossibleError { text: String },
    /// Wrapper for other argmin::Error types
    BackendError { text: String },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            OptError::GradientNotImplemented => {
                write!(f, "Gradient optimization not implemented")
            }
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }

            // ---- MinimizerOptions ----
            OptError::InvalidTolGrad { tol, reason } => {
                write!(f, "Invalid gradient tolerance {tol}: {reason}")
            }
            OptError::InvalidTolCost { tol, reason } => {
                write!(f, "Invalid cost function change tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::NoTolerancesProvided => {
                write!(f, "No tolerances provided")
            }
            OptError::InvalidLineSearch { name, reason } => {
                write!(f, "Invalid line searcher '{name}': {reason}")
            }
            OptError::InvalidLBFGSMem { mem, reason } => {
                write!(f, "Invalid L-BFGS memory {mem}: {reason}")
            }

            // ---- Simplex / scalar search ----
            OptError::InvalidSimplexStep { step, reason } => {
                write!(f, "Invalid initial simplex step {step}: {reason}")
            }
            OptError::InvalidSdTolerance { tol, reason } => {
                write!(f, "Invalid simplex standard-deviation tolerance {tol}: {reason}")
            }
            OptError::InvalidBracket { lower, upper, reason } => {
                write!(f, "Invalid search bracket [{lower}, {upper}]: {reason}")
            }

            // ---- Objective ----
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite cost value: {value}")
            }
            OptError::ParameterArity { expected, found } => {
                write!(f, "Parameter vector arity mismatch: expected {expected}, found {found}")
            }
            OptError::DegenerateSlope { value } => {
                write!(f, "Degenerate linking slope {value}: slope must be non-zero")
            }
            OptError::InvalidThetaInput { index, value } => {
                write!(f, "Invalid theta input at index {index}: {value}, must be finite")
            }

            // ---- Optimizer outcome ----
            OptError::InvalidThetaHat { index, value, reason } => {
                write!(f, "Invalid estimated parameter at index {index}: {value}: {reason}")
            }
            OptError::MissingThetaHat => {
                write!(f, "Missing estimated parameters (theta hat)")
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            OptError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            OptError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            OptError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            OptError::CheckPointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            OptError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            OptError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            OptError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- Fallback ----
            OptError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<Error> for OptError {
    /// Recover an `OptError` that was raised inside an objective and tunneled
    /// through argmin, otherwise map argmin's own error kinds.
    fn from(original_err: Error) -> Self {
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast() {
            Ok(opt_err) => match opt_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Display messages embedding their payloads.
    // - Round-tripping an `OptError` through argmin's `Error` type.
    //
    // They intentionally DO NOT cover:
    // - Every argmin error kind; those mappings are one-to-one.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure the arity variant reports both the expected and found lengths.
    //
    // Given
    // -----
    // - `OptError::ParameterArity { expected: 2, found: 3 }`.
    //
    // Expect
    // ------
    // - The rendered message contains "2" and "3".
    fn parameter_arity_display_contains_lengths() {
        // Arrange
        let err = OptError::ParameterArity { expected: 2, found: 3 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("expected 2"));
        assert!(msg.contains("found 3"));
    }

    #[test]
    // Purpose
    // -------
    // Verify that an `OptError` raised inside an objective survives the trip
    // through `argmin::core::Error` unchanged.
    //
    // Given
    // -----
    // - `OptError::DegenerateSlope { value: 0.0 }` converted into `Error`.
    //
    // Expect
    // ------
    // - Converting back yields the identical variant.
    fn opt_error_round_trips_through_argmin_error() {
        // Arrange
        let err: Error = OptError::DegenerateSlope { value: 0.0 }.into();

        // Act
        let back = OptError::from(err);

        // Assert
        assert_eq!(back, OptError::DegenerateSlope { value: 0.0 });
    }

    #[test]
    // Purpose
    // -------
    // Check that argmin's own error kinds are mapped to the matching variant.
    //
    // Given
    // -----
    // - `ArgminError::InvalidParameter` wrapped into `Error`.
    //
    // Expect
    // ------
    // - `OptError::InvalidParameter` with the same text.
    fn argmin_invalid_parameter_maps_to_matching_variant() {
        // Arrange
        let err: Error = ArgminError::InvalidParameter { text: "bad".to_string() }.into();

        // Act
        let mapped = OptError::from(err);

        // Assert
        assert_eq!(mapped, OptError::InvalidParameter { text: "bad".to_string() });
    }
}
