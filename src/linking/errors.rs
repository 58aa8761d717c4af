//! Errors for scale linking (common-item checks, option validation, closed-form
//! degeneracies) plus wrappers for IRT and optimizer failures.
//!
//! Optimizer failures inside the characteristic-curve fits do not surface here:
//! the orchestrator records them on the affected fit instead. `LinkingError`
//! is reserved for failures that make a linking object unusable.
use crate::{irt::errors::IrtError, optimization::errors::OptError};

/// Result alias for linking operations.
pub type LinkingResult<T> = Result<T, LinkingError>;

#[derive(Debug, Clone, PartialEq)]
pub enum LinkingError {
    // ---- Common items ----
    /// Item sets differ in size or in membership.
    DimensionMismatch { size_x: usize, size_y: usize, mismatched: usize },

    /// There are no common items to link on.
    NoCommonItems,

    // ---- Closed-form methods ----
    /// Dispersion of Form-X locations is zero, so Mean/Sigma is undefined.
    ZeroDispersion { sd_x: f64 },

    // ---- Options ----
    /// Intercept search bounds must be finite with lower < upper.
    InvalidBounds { lower: f64, upper: f64, reason: &'static str },

    /// Restart spread must be finite and non-negative.
    InvalidRestartSpread { spread: f64, reason: &'static str },

    /// Every optimizer run needs a positive iteration cap.
    MissingIterationCap { setting: &'static str, reason: &'static str },

    /// Unknown criterion name.
    InvalidCriterion { name: String, reason: &'static str },

    /// Unknown strategy name.
    InvalidStrategy { name: String, reason: &'static str },

    // ---- Wrapped errors ----
    Irt(IrtError),
    Opt(OptError),
}

impl std::error::Error for LinkingError {}

impl std::fmt::Display for LinkingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Common items ----
            LinkingError::DimensionMismatch { size_x, size_y, mismatched } => write!(
                f,
                "Common-item mismatch: Form X has {size_x} items, Form Y has {size_y}, \
                 {mismatched} item(s) not shared"
            ),
            LinkingError::NoCommonItems => write!(f, "No common items to link on"),

            // ---- Closed-form methods ----
            LinkingError::ZeroDispersion { sd_x } => {
                write!(f, "Form-X location standard deviation is {sd_x}; Mean/Sigma is undefined")
            }

            // ---- Options ----
            LinkingError::InvalidBounds { lower, upper, reason } => {
                write!(f, "Invalid intercept bounds [{lower}, {upper}]: {reason}")
            }
            LinkingError::InvalidRestartSpread { spread, reason } => {
                write!(f, "Invalid restart spread {spread}: {reason}")
            }
            LinkingError::MissingIterationCap { setting, reason } => {
                write!(f, "Invalid iteration cap for {setting}: {reason}")
            }
            LinkingError::InvalidCriterion { name, reason } => {
                write!(f, "Invalid criterion '{name}': {reason}")
            }
            LinkingError::InvalidStrategy { name, reason } => {
                write!(f, "Invalid linking strategy '{name}': {reason}")
            }

            // ---- Wrapped errors ----
            LinkingError::Irt(err) => write!(f, "IRT error: {err}"),
            LinkingError::Opt(err) => write!(f, "Optimization error: {err}"),
        }
    }
}

impl From<IrtError> for LinkingError {
    fn from(err: IrtError) -> Self {
        LinkingError::Irt(err)
    }
}

impl From<OptError> for LinkingError {
    fn from(err: OptError) -> Self {
        LinkingError::Opt(err)
    }
}
