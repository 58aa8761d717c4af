//! Configuration for scale linking.
//!
//! [`LinkingOptions`] collects the criterion selection, the optimizer strategy
//! and its settings, and the restart policy. Setters that take numeric input
//! validate it; [`LinkingOptions::default`] is always valid.
use crate::{
    linking::errors::{LinkingError, LinkingResult},
    optimization::minimizer::{MinimizerOptions, SimplexOptions},
};
use std::str::FromStr;

/// Which component criteria are summed.
///
/// Parsing accepts `"Q1"`, `"Q2"`, and `"Q1Q2"` / `"Q1+Q2"` / `"symmetric"`,
/// case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriterionKind {
    /// Evaluated over Form Y's quadrature (Form X transformed by t-star).
    Q1,
    /// Evaluated over Form X's quadrature (Form Y transformed by t-sharp).
    Q2,
    /// `Q1 + Q2`.
    Symmetric,
}

impl FromStr for CriterionKind {
    type Err = LinkingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "q1" => Ok(CriterionKind::Q1),
            "q2" => Ok(CriterionKind::Q2),
            "q1q2" | "q1+q2" | "symmetric" => Ok(CriterionKind::Symmetric),
            _ => Err(LinkingError::InvalidCriterion {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'Q1', 'Q2' or 'Q1Q2'.",
            }),
        }
    }
}

/// Optimizer used when slope and intercept are both free.
///
/// Parsing accepts `"lbfgs"` and `"neldermead"` / `"simplex"`,
/// case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkingStrategy {
    /// Quasi-Newton L-BFGS started from the Mean/Mean estimate.
    Lbfgs,
    /// Multi-start derivative-free Nelder–Mead.
    NelderMead,
}

impl FromStr for LinkingStrategy {
    type Err = LinkingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lbfgs" | "l-bfgs" => Ok(LinkingStrategy::Lbfgs),
            "neldermead" | "nelder-mead" | "simplex" => Ok(LinkingStrategy::NelderMead),
            _ => Err(LinkingError::InvalidStrategy {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'LBFGS' or 'NelderMead'.",
            }),
        }
    }
}

/// Scale-linking configuration.
///
/// Default:
/// - `criterion`: `Symmetric`, `standardize`: `true`
/// - `strategy`: `Lbfgs`
/// - `population_sd`: `false` (unbiased `n − 1` standard deviation)
/// - `intercept_bounds`: `(-4, 4)` for the Rasch-family search
/// - `restarts`: 5 randomized restarts, `restart_spread`: 0.5
/// - `seed`: `None` (results are not reproducible across runs)
/// - `precision`: 4
/// - `max_scalar_iter`: 100 Brent iterations per run
#[derive(Debug, Clone, PartialEq)]
pub struct LinkingOptions {
    pub criterion: CriterionKind,
    pub standardize: bool,
    pub strategy: LinkingStrategy,
    pub population_sd: bool,
    pub intercept_bounds: (f64, f64),
    pub restarts: usize,
    pub restart_spread: f64,
    pub seed: Option<u64>,
    pub precision: usize,
    pub max_scalar_iter: usize,
    pub minimizer: MinimizerOptions,
    pub simplex: SimplexOptions,
}

impl Default for LinkingOptions {
    fn default() -> Self {
        Self {
            criterion: CriterionKind::Symmetric,
            standardize: true,
            strategy: LinkingStrategy::Lbfgs,
            population_sd: false,
            intercept_bounds: (-4.0, 4.0),
            restarts: 5,
            restart_spread: 0.5,
            seed: None,
            precision: 4,
            max_scalar_iter: 100,
            minimizer: MinimizerOptions::default(),
            simplex: SimplexOptions::default(),
        }
    }
}

impl LinkingOptions {
    pub fn with_criterion(mut self, criterion: CriterionKind, standardize: bool) -> Self {
        self.criterion = criterion;
        self.standardize = standardize;
        self
    }

    pub fn with_strategy(mut self, strategy: LinkingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_population_sd(mut self, population_sd: bool) -> Self {
        self.population_sd = population_sd;
        self
    }

    pub fn with_minimizer(mut self, minimizer: MinimizerOptions) -> Self {
        self.minimizer = minimizer;
        self
    }

    pub fn with_simplex(mut self, simplex: SimplexOptions) -> Self {
        self.simplex = simplex;
        self
    }

    /// Set the Rasch-family intercept search interval.
    ///
    /// # Errors
    /// `InvalidBounds` unless both ends are finite with `lower < upper`.
    pub fn with_intercept_bounds(mut self, lower: f64, upper: f64) -> LinkingResult<Self> {
        verify_bounds(lower, upper)?;
        self.intercept_bounds = (lower, upper);
        Ok(self)
    }

    /// Set the number of randomized restarts and their spread.
    ///
    /// # Errors
    /// `InvalidRestartSpread` for a non-finite or negative spread.
    pub fn with_restarts(mut self, restarts: usize, spread: f64) -> LinkingResult<Self> {
        verify_spread(spread)?;
        self.restarts = restarts;
        self.restart_spread = spread;
        Ok(self)
    }

    /// Re-check fields that may have been set directly.
    ///
    /// # Errors
    /// `InvalidBounds`, `InvalidRestartSpread`, or `MissingIterationCap` when
    /// the L-BFGS, Brent or Nelder–Mead cap is absent or zero.
    pub fn validate(&self) -> LinkingResult<()> {
        verify_bounds(self.intercept_bounds.0, self.intercept_bounds.1)?;
        verify_spread(self.restart_spread)?;
        verify_cap("minimizer.tols.max_iter", self.minimizer.tols.max_iter)?;
        verify_cap("max_scalar_iter", Some(self.max_scalar_iter))?;
        verify_cap("simplex.max_iter", Some(self.simplex.max_iter))
    }
}

fn verify_cap(setting: &'static str, cap: Option<usize>) -> LinkingResult<()> {
    match cap {
        None => Err(LinkingError::MissingIterationCap {
            setting,
            reason: "A maximum iteration count is required.",
        }),
        Some(0) => Err(LinkingError::MissingIterationCap {
            setting,
            reason: "The maximum iteration count must be positive.",
        }),
        Some(_) => Ok(()),
    }
}

fn verify_bounds(lower: f64, upper: f64) -> LinkingResult<()> {
    if !lower.is_finite() || !upper.is_finite() {
        return Err(LinkingError::InvalidBounds { lower, upper, reason: "Bounds must be finite." });
    }
    if lower >= upper {
        return Err(LinkingError::InvalidBounds {
            lower,
            upper,
            reason: "Lower bound must be below the upper bound.",
        });
    }
    Ok(())
}

fn verify_spread(spread: f64) -> LinkingResult<()> {
    if !spread.is_finite() || spread < 0.0 {
        return Err(LinkingError::InvalidRestartSpread {
            spread,
            reason: "Spread must be finite and non-negative.",
        });
    }
    Ok(())
}
