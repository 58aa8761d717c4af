//! Linking coefficients and fit results.
//!
//! [`LinkingCoefficients`] is the `(slope, intercept)` pair of the linear
//! transformation `θ_Y = slope·θ_X + intercept`. [`LinkingFit`] pairs the
//! coefficients of one method with its minimized criterion value and an
//! explicit [`FitStatus`], so a failed characteristic-curve fit is never
//! mistaken for a successful one.
use std::fmt;

/// The four supported linking methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkingMethod {
    MeanMean,
    MeanSigma,
    Haebara,
    StockingLord,
}

impl fmt::Display for LinkingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LinkingMethod::MeanMean => "Mean/Mean",
            LinkingMethod::MeanSigma => "Mean/Sigma",
            LinkingMethod::Haebara => "Haebara",
            LinkingMethod::StockingLord => "Stocking-Lord",
        };
        f.write_str(name)
    }
}

/// Slope and intercept of a linking transformation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkingCoefficients {
    pub method: LinkingMethod,
    pub slope: f64,
    pub intercept: f64,
    /// Number of decimals used by `Display`.
    pub precision: usize,
}

impl LinkingCoefficients {
    /// Identity transformation (`slope = 1`, `intercept = 0`).
    pub fn identity(method: LinkingMethod, precision: usize) -> Self {
        Self { method, slope: 1.0, intercept: 0.0, precision }
    }

    pub fn new(method: LinkingMethod, slope: f64, intercept: f64, precision: usize) -> Self {
        Self { method, slope, intercept, precision }
    }

    /// Map an ability or difficulty from the Form-X scale onto Form Y's.
    pub fn transform(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

impl fmt::Display for LinkingCoefficients {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.precision;
        write!(
            f,
            "{}: slope = {:.p$}, intercept = {:.p$}",
            self.method, self.slope, self.intercept
        )
    }
}

/// How a set of coefficients was obtained.
#[derive(Debug, Clone, PartialEq)]
pub enum FitStatus {
    /// Computed by a closed-form formula.
    ClosedForm,
    /// Produced by the optimizer.
    ///
    /// `restarts` counts the runs that returned a result; `iterations` belongs
    /// to the run that was kept.
    Fitted { converged: bool, iterations: usize, restarts: usize },
    /// Nothing usable was produced; coefficients hold the starting values.
    Failed { reason: String },
}

/// Result of one linking method.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkingFit {
    pub coefficients: LinkingCoefficients,
    /// Minimized criterion value; `None` for closed-form and failed fits.
    pub objective: Option<f64>,
    pub status: FitStatus,
}

impl LinkingFit {
    pub fn closed_form(coefficients: LinkingCoefficients) -> Self {
        Self { coefficients, objective: None, status: FitStatus::ClosedForm }
    }

    pub fn failed(coefficients: LinkingCoefficients, reason: impl Into<String>) -> Self {
        Self { coefficients, objective: None, status: FitStatus::Failed { reason: reason.into() } }
    }

    /// `true` for closed-form results and converged optimizer fits.
    pub fn is_success(&self) -> bool {
        match self.status {
            FitStatus::ClosedForm => true,
            FitStatus::Fitted { converged, .. } => converged,
            FitStatus::Failed { .. } => false,
        }
    }

    pub fn slope(&self) -> f64 {
        self.coefficients.slope
    }

    pub fn intercept(&self) -> f64 {
        self.coefficients.intercept
    }
}
