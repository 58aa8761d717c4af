//! linking::criterion — Haebara and Stocking–Lord characteristic-curve criteria.
//!
//! Purpose
//! -------
//! Evaluate the loss between the two forms' characteristic curves for a
//! candidate `(intercept B, slope A)` and expose it to the minimizer as two
//! pure objectives: intercept only (slope fixed at 1) and intercept + slope.
//!
//! Key behaviors
//! -------------
//! - **Q1** sums over Form Y's quadrature, comparing Form Y's curves with
//!   Form X's curves transformed by t-star.
//! - **Q2** sums over Form X's quadrature, comparing Form X's curves with
//!   Form Y's curves transformed by t-sharp.
//! - **Haebara** squares per-category probability differences for every
//!   item; **Stocking–Lord** squares the difference of the test
//!   characteristic curves.
//! - With standardization, each component is divided by the sum of its
//!   quadrature weights, times the total category count for Haebara.
//!
//! Invariants & assumptions
//! ------------------------
//! - Items are paired through the canonical common-item order, so both forms
//!   contribute the same items in the same order.
//! - Probabilities and expected values come from the item capability
//!   (`t_star_*` / `t_sharp_*`); nothing is re-derived here.
//! - Parameter vectors are checked for arity explicitly: the intercept-only
//!   objective takes exactly one element, the two-parameter objective two.
//! - A slope with `|A| < 1e-10` is rejected as degenerate.
//!
//! Conventions
//! -----------
//! - The two-parameter vector is ordered `(intercept, slope)`.
//! - No analytic gradient is provided; the minimizer falls back to finite
//!   differences.
use crate::{
    irt::{ItemSet, QuadratureRule, SharedItem},
    linking::{coefficients::LinkingMethod, options::CriterionKind},
    optimization::{
        errors::{OptError, OptResult},
        minimizer::{Cost, Objective, Theta},
    },
};

const MIN_ABS_SLOPE: f64 = 1e-10;

/// Characteristic-curve linking method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveCriterion {
    Haebara,
    StockingLord,
}

impl CurveCriterion {
    pub fn method(self) -> LinkingMethod {
        match self {
            CurveCriterion::Haebara => LinkingMethod::Haebara,
            CurveCriterion::StockingLord => LinkingMethod::StockingLord,
        }
    }
}

/// Read-only evaluation context shared by both objectives.
#[derive(Debug, Clone)]
pub struct CriterionContext<'a> {
    /// `(Form-X item, Form-Y item)` pairs in canonical order.
    pairs: Vec<(&'a SharedItem, &'a SharedItem)>,
    quad_x: &'a QuadratureRule,
    quad_y: &'a QuadratureRule,
    kind: CriterionKind,
    standardize: bool,
    total_categories: usize,
}

impl<'a> CriterionContext<'a> {
    /// Pair the common items of both forms in `order`.
    ///
    /// Names absent from either form are skipped; callers validate the
    /// common-item design first.
    pub fn new(
        form_x: &'a ItemSet, form_y: &'a ItemSet, quad_x: &'a QuadratureRule,
        quad_y: &'a QuadratureRule, order: &[String], kind: CriterionKind, standardize: bool,
    ) -> Self {
        let pairs: Vec<_> = order
            .iter()
            .filter_map(|name| Some((form_x.get(name)?, form_y.get(name)?)))
            .collect();
        let total_categories = pairs.iter().map(|(_, y)| y.ncat()).sum();
        Self { pairs, quad_x, quad_y, kind, standardize, total_categories }
    }

    pub fn kind(&self) -> CriterionKind {
        self.kind
    }

    /// Criterion value at `(intercept, slope)`.
    ///
    /// # Errors
    /// - `InvalidThetaInput` for a non-finite intercept.
    /// - `DegenerateSlope` for a non-finite or (numerically) zero slope.
    pub fn evaluate(
        &self, criterion: CurveCriterion, intercept: f64, slope: f64,
    ) -> OptResult<Cost> {
        if !intercept.is_finite() {
            return Err(OptError::InvalidThetaInput { index: 0, value: intercept });
        }
        if !slope.is_finite() || slope.abs() < MIN_ABS_SLOPE {
            return Err(OptError::DegenerateSlope { value: slope });
        }
        let q1 = match self.kind {
            CriterionKind::Q1 | CriterionKind::Symmetric => self.q1(criterion, intercept, slope),
            CriterionKind::Q2 => 0.0,
        };
        let q2 = match self.kind {
            CriterionKind::Q2 | CriterionKind::Symmetric => self.q2(criterion, intercept, slope),
            CriterionKind::Q1 => 0.0,
        };
        Ok(q1 + q2)
    }

    fn q1(&self, criterion: CurveCriterion, intercept: f64, slope: f64) -> f64 {
        let raw = match criterion {
            CurveCriterion::Haebara => self.accumulate(self.quad_y, |theta| {
                self.pairs
                    .iter()
                    .map(|(x, y)| {
                        (0..y.ncat())
                            .map(|k| {
                                y.probability(theta, k)
                                    - x.t_star_probability(theta, k, intercept, slope)
                            })
                            .map(|d| d * d)
                            .sum::<f64>()
                    })
                    .sum()
            }),
            CurveCriterion::StockingLord => self.accumulate(self.quad_y, |theta| {
                let diff: f64 = self
                    .pairs
                    .iter()
                    .map(|(x, y)| {
                        y.expected_value(theta) - x.t_star_expected_value(theta, intercept, slope)
                    })
                    .sum();
                diff * diff
            }),
        };
        self.standardized(raw, criterion, self.quad_y)
    }

    fn q2(&self, criterion: CurveCriterion, intercept: f64, slope: f64) -> f64 {
        let raw = match criterion {
            CurveCriterion::Haebara => self.accumulate(self.quad_x, |theta| {
                self.pairs
                    .iter()
                    .map(|(x, y)| {
                        (0..x.ncat())
                            .map(|k| {
                                x.probability(theta, k)
                                    - y.t_sharp_probability(theta, k, intercept, slope)
                            })
                            .map(|d| d * d)
                            .sum::<f64>()
                    })
                    .sum()
            }),
            CurveCriterion::StockingLord => self.accumulate(self.quad_x, |theta| {
                let diff: f64 = self
                    .pairs
                    .iter()
                    .map(|(x, y)| {
                        x.expected_value(theta) - y.t_sharp_expected_value(theta, intercept, slope)
                    })
                    .sum();
                diff * diff
            }),
        };
        self.standardized(raw, criterion, self.quad_x)
    }

    fn accumulate<L: Fn(f64) -> f64>(&self, quadrature: &QuadratureRule, loss: L) -> f64 {
        quadrature.iter().map(|(theta, weight)| weight * loss(theta)).sum()
    }

    fn standardized(
        &self, raw: f64, criterion: CurveCriterion, quadrature: &QuadratureRule,
    ) -> f64 {
        if !self.standardize {
            return raw;
        }
        let mut denom = quadrature.sum_weights();
        if criterion == CurveCriterion::Haebara {
            denom *= self.total_categories as f64;
        }
        if denom > 0.0 { raw / denom } else { raw }
    }
}

fn check_arity(theta: &Theta, expected: usize) -> OptResult<()> {
    if theta.len() != expected {
        return Err(OptError::ParameterArity { expected, found: theta.len() });
    }
    Ok(())
}

/// Criterion over the intercept alone, with the slope fixed at 1.
#[derive(Debug, Clone, Copy)]
pub struct InterceptOnly<'c> {
    pub context: &'c CriterionContext<'c>,
    pub criterion: CurveCriterion,
}

impl<'c> InterceptOnly<'c> {
    pub fn new(context: &'c CriterionContext<'c>, criterion: CurveCriterion) -> Self {
        Self { context, criterion }
    }

    /// Scalar form used by bounded one-dimensional searches.
    pub fn at(&self, intercept: f64) -> OptResult<Cost> {
        self.context.evaluate(self.criterion, intercept, 1.0)
    }
}

impl Objective for InterceptOnly<'_> {
    type Data = ();

    fn value(&self, theta: &Theta, _data: &()) -> OptResult<Cost> {
        check_arity(theta, 1)?;
        self.at(theta[0])
    }

    fn check(&self, theta: &Theta, _data: &()) -> OptResult<()> {
        check_arity(theta, 1)?;
        self.at(theta[0]).map(|_| ())
    }
}

/// Criterion over `(intercept, slope)`.
#[derive(Debug, Clone, Copy)]
pub struct InterceptSlope<'c> {
    pub context: &'c CriterionContext<'c>,
    pub criterion: CurveCriterion,
}

impl<'c> InterceptSlope<'c> {
    pub fn new(context: &'c CriterionContext<'c>, criterion: CurveCriterion) -> Self {
        Self { context, criterion }
    }
}

impl Objective for InterceptSlope<'_> {
    type Data = ();

    fn value(&self, theta: &Theta, _data: &()) -> OptResult<Cost> {
        check_arity(theta, 2)?;
        self.context.evaluate(self.criterion, theta[0], theta[1])
    }

    fn check(&self, theta: &Theta, _data: &()) -> OptResult<()> {
        self.value(theta, &()).map(|_| ())
    }
}
