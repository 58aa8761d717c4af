//! equating::true_score — IRT true-score equating.
//!
//! Purpose
//! -------
//! Map each Form X raw score to a Form Y true-score equivalent by inverting
//! Form X's test characteristic curve (TCC) and evaluating Form Y's TCC at
//! the resulting ability.
//!
//! Key behaviors
//! -------------
//! - Raw scores `s = 0, 1, …, ⌊max possible score⌋` are processed
//!   independently.
//! - `s ≤ min true score of X`: θ is pinned at `−theta_bound` and the
//!   Y-equivalent is `s · low_score_factor` (status `Boundary`).
//! - `s = max possible score`: θ is pinned at `+theta_bound` and the
//!   Y-equivalent is Form Y's TCC there (status `Boundary`).
//! - Otherwise Newton–Raphson solves `TCC_X(θ) = s` from θ = 0 with
//!   `θ ← clamp(θ + (s − TCC_X(θ)) / TCC_X′(θ))`, stopping when
//!   `|Δθ| < tolerance` (status `Converged`) or at `max_iter`
//!   (status `NotConverged`, best θ kept).
//! - Optional linking coefficients map θ from Form X's scale onto Form Y's
//!   before evaluating Form Y's TCC.
//!
//! Invariants & assumptions
//! ------------------------
//! - TCCs are assumed monotone increasing; non-monotone curves (possible
//!   with some asymptote settings) can stall Newton–Raphson, which then
//!   shows up as `NotConverged` rows rather than an error.
//! - A vanishing or non-finite derivative stops iteration for that score.
//!
//! Conventions
//! -----------
//! - `low_score_factor = min_Y / min_X` when both minima are positive,
//!   otherwise 1.
//! - Status symbols: `'Y'` converged, `'N'` not converged, `'*'` boundary.
use crate::{
    equating::errors::{EquatingError, EquatingResult},
    irt::ItemSet,
    linking::LinkingCoefficients,
};
use ndarray::Array1;
use std::fmt;
use tracing::{debug, warn};

const DERIVATIVE_FLOOR: f64 = 1e-12;
const SCORE_TOL: f64 = 1e-9;

/// Newton–Raphson settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonOptions {
    pub tolerance: f64,
    pub max_iter: usize,
    pub theta_bound: f64,
}

impl Default for NewtonOptions {
    fn default() -> Self {
        Self { tolerance: 1e-4, max_iter: 150, theta_bound: 99.0 }
    }
}

impl NewtonOptions {
    /// # Errors
    /// `InvalidNewtonTolerance`, `InvalidNewtonIterations` or
    /// `InvalidThetaBound` for non-positive or non-finite settings.
    pub fn new(tolerance: f64, max_iter: usize, theta_bound: f64) -> EquatingResult<Self> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(EquatingError::InvalidNewtonTolerance { value: tolerance });
        }
        if max_iter == 0 {
            return Err(EquatingError::InvalidNewtonIterations { value: max_iter });
        }
        if !theta_bound.is_finite() || theta_bound <= 0.0 {
            return Err(EquatingError::InvalidThetaBound { value: theta_bound });
        }
        Ok(Self { tolerance, max_iter, theta_bound })
    }
}

/// Per-score outcome of the TCC inversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceStatus {
    Converged,
    NotConverged,
    Boundary,
}

impl ConvergenceStatus {
    pub fn symbol(self) -> char {
        match self {
            ConvergenceStatus::Converged => 'Y',
            ConvergenceStatus::NotConverged => 'N',
            ConvergenceStatus::Boundary => '*',
        }
    }
}

impl fmt::Display for ConvergenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// True-score equating table; all columns are indexed by raw score.
#[derive(Debug, Clone, PartialEq)]
pub struct TrueScoreTable {
    pub raw_scores: Array1<f64>,
    /// Form X ability solving `TCC_X(θ) = s`.
    pub theta: Array1<f64>,
    pub y_equivalent: Array1<f64>,
    pub iterations: Vec<usize>,
    pub status: Vec<ConvergenceStatus>,
    pub form_x_min: f64,
    pub form_y_min: f64,
    pub low_score_factor: f64,
}

impl TrueScoreTable {
    pub fn len(&self) -> usize {
        self.raw_scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw_scores.is_empty()
    }

    /// Number of scores whose Newton–Raphson run hit the iteration cap.
    pub fn not_converged(&self) -> usize {
        self.status.iter().filter(|s| **s == ConvergenceStatus::NotConverged).count()
    }
}

impl fmt::Display for TrueScoreTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = ("Score", "Theta", "Y-equiv", "Iter", "Status");
        writeln!(
            f,
            "{:>8} {:>10} {:>10} {:>5} {:>6}",
            header.0, header.1, header.2, header.3, header.4
        )?;
        for i in 0..self.len() {
            writeln!(
                f,
                "{:>8.2} {:>10.4} {:>10.4} {:>5} {:>6}",
                self.raw_scores[i],
                self.theta[i],
                self.y_equivalent[i],
                self.iterations[i],
                self.status[i]
            )?;
        }
        Ok(())
    }
}

/// True-score equating of Form X onto Form Y.
#[derive(Debug, Clone)]
pub struct TrueScoreEquating<'a> {
    form_x: &'a ItemSet,
    form_y: &'a ItemSet,
    coefficients: Option<LinkingCoefficients>,
    options: NewtonOptions,
}

impl<'a> TrueScoreEquating<'a> {
    /// # Errors
    /// `EmptyForm` when either form has no items.
    pub fn new(
        form_x: &'a ItemSet, form_y: &'a ItemSet, coefficients: Option<LinkingCoefficients>,
        options: NewtonOptions,
    ) -> EquatingResult<Self> {
        if form_x.is_empty() {
            return Err(EquatingError::EmptyForm { form: "X" });
        }
        if form_y.is_empty() {
            return Err(EquatingError::EmptyForm { form: "Y" });
        }
        Ok(Self { form_x, form_y, coefficients, options })
    }

    /// Build the full equating table.
    pub fn equate_scores(&self) -> TrueScoreTable {
        let bound = self.options.theta_bound;
        let max_score = self.form_x.max_possible_score();
        let form_x_min = self.form_x.min_true_score();
        let form_y_min = self.form_y.min_true_score();
        let low_score_factor =
            if form_x_min > 0.0 && form_y_min > 0.0 { form_y_min / form_x_min } else { 1.0 };

        let n = (max_score + SCORE_TOL).floor().max(0.0) as usize + 1;
        let raw_scores = Array1::from_iter((0..n).map(|s| s as f64));
        let mut theta = Array1::<f64>::zeros(n);
        let mut y_equivalent = Array1::<f64>::zeros(n);
        let mut iterations = vec![0; n];
        let mut status = vec![ConvergenceStatus::Boundary; n];

        for (i, &s) in raw_scores.iter().enumerate() {
            if s <= form_x_min + SCORE_TOL {
                theta[i] = -bound;
                y_equivalent[i] = s * low_score_factor;
            } else if s >= max_score - SCORE_TOL {
                theta[i] = bound;
                y_equivalent[i] = self.y_true_score(bound);
            } else {
                let (t, iters, converged) = self.solve(s);
                theta[i] = t;
                iterations[i] = iters;
                status[i] = if converged {
                    ConvergenceStatus::Converged
                } else {
                    ConvergenceStatus::NotConverged
                };
                y_equivalent[i] = self.y_true_score(t);
            }
        }

        let table = TrueScoreTable {
            raw_scores,
            theta,
            y_equivalent,
            iterations,
            status,
            form_x_min,
            form_y_min,
            low_score_factor,
        };
        let missed = table.not_converged();
        if missed > 0 {
            warn!(scores = missed, "true-score equating: Newton-Raphson did not converge");
        }
        debug!(rows = table.len(), form_x_min, form_y_min, "true-score equating complete");
        table
    }

    /// Y-equivalent true score for a Form X ability.
    pub fn y_true_score(&self, theta_x: f64) -> f64 {
        let theta_y = match &self.coefficients {
            Some(coef) => coef.transform(theta_x),
            None => theta_x,
        };
        self.form_y.tcc(theta_y)
    }

    /// Newton–Raphson for `TCC_X(θ) = score`: `(θ, iterations, converged)`.
    fn solve(&self, score: f64) -> (f64, usize, bool) {
        let NewtonOptions { tolerance, max_iter, theta_bound } = self.options;
        let mut theta = 0.0_f64;
        for iter in 1..=max_iter {
            let slope = self.form_x.tcc_derivative(theta);
            if !slope.is_finite() || slope.abs() < DERIVATIVE_FLOOR {
                return (theta, iter, false);
            }
            let next = (theta + (score - self.form_x.tcc(theta)) / slope)
                .clamp(-theta_bound, theta_bound);
            let delta = (next - theta).abs();
            theta = next;
            if delta < tolerance {
                return (theta, iter, true);
            }
        }
        (theta, max_iter, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{irt::LogisticItem, linking::LinkingMethod};
    use approx::assert_abs_diff_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Newton–Raphson against bisection on a Rasch-type TCC.
    // - Boundary rows and the low-score factor with guessing.
    // - Monotone Y-equivalents.
    // - Option validation.
    // -------------------------------------------------------------------------

    fn ten_item_form() -> ItemSet {
        (0..10).fold(ItemSet::new(), |set, j| {
            let b = -2.0 + 4.0 * j as f64 / 9.0;
            set.with_item(format!("i{j}"), LogisticItem::two_pl(1.0, b, 1.0).expect("valid item"))
        })
    }

    fn bisect(form: &ItemSet, score: f64) -> f64 {
        let (mut lo, mut hi) = (-20.0, 20.0);
        for _ in 0..200 {
            let mid = 0.5 * (lo + hi);
            if form.tcc(mid) < score {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        0.5 * (lo + hi)
    }

    #[test]
    // Purpose
    // -------
    // Every interior score converges and matches bisection.
    //
    // Given
    // -----
    // - Ten items with a = 1, c = 0, b evenly spaced on [−2, 2]; Form Y = X.
    //
    // Expect
    // ------
    // - Scores 1..9: status 'Y', ≤ 150 iterations, θ within 1e-3 of bisection,
    //   Y-equivalent ≈ raw score; scores 0 and 10 are boundary rows.
    fn newton_raphson_matches_bisection() {
        // Arrange
        let form = ten_item_form();
        let equating =
            TrueScoreEquating::new(&form, &form, None, NewtonOptions::default()).expect("valid");

        // Act
        let table = equating.equate_scores();

        // Assert
        assert_eq!(table.len(), 11);
        assert_eq!(table.status[0], ConvergenceStatus::Boundary);
        assert_eq!(table.status[10], ConvergenceStatus::Boundary);
        assert_eq!(table.theta[0], -99.0);
        assert_eq!(table.theta[10], 99.0);
        for s in 1..10 {
            assert_eq!(table.status[s].symbol(), 'Y', "score {s}");
            assert!(table.iterations[s] <= 150);
            assert_abs_diff_eq!(table.theta[s], bisect(&form, s as f64), epsilon = 1e-3);
            assert_abs_diff_eq!(table.y_equivalent[s], s as f64, epsilon = 1e-3);
        }
    }

    #[test]
    // Purpose
    // -------
    // Y-equivalents are non-decreasing for a strictly increasing Form Y TCC,
    // including when linking coefficients shift the ability scale.
    //
    // Given
    // -----
    // - X: the ten-item form; Y: the same items 0.4 harder; coefficients
    //   (slope 1, intercept 0.4).
    //
    // Expect
    // ------
    // - Monotone Y-equivalents, and interior Y-equivalents ≈ raw scores since
    //   the linked scales coincide.
    fn y_equivalents_are_monotone() {
        // Arrange
        let form_x = ten_item_form();
        let form_y = (0..10).fold(ItemSet::new(), |set, j| {
            let b = -2.0 + 4.0 * j as f64 / 9.0 + 0.4;
            set.with_item(format!("i{j}"), LogisticItem::two_pl(1.0, b, 1.0).expect("valid item"))
        });
        let coef = LinkingCoefficients::new(LinkingMethod::StockingLord, 1.0, 0.4, 4);
        let equating =
            TrueScoreEquating::new(&form_x, &form_y, Some(coef), NewtonOptions::default())
                .expect("valid");

        // Act
        let table = equating.equate_scores();

        // Assert
        for s in 1..table.len() {
            assert!(table.y_equivalent[s] >= table.y_equivalent[s - 1]);
        }
        for s in 1..10 {
            assert_abs_diff_eq!(table.y_equivalent[s], s as f64, epsilon = 1e-3);
        }
    }

    #[test]
    // Purpose
    // -------
    // Guessing raises the minimum true score, and scores at or below it use
    // the linear low-score rule.
    //
    // Given
    // -----
    // - X: four 3PL items with c = 0.25 (min 1.0); Y: four with c = 0.2
    //   (min 0.8).
    //
    // Expect
    // ------
    // - factor 0.8; scores 0 and 1 are boundary rows with Y-equivalents 0 and
    //   0.8; scores 2 and 3 converge.
    fn low_scores_use_linear_factor() {
        // Arrange
        let build = |c: f64| {
            (0..4).fold(ItemSet::new(), |set, j| {
                let item = LogisticItem::three_pl(1.2, -1.0 + 0.6 * j as f64, c, 1.7).expect("ok");
                set.with_item(format!("i{j}"), item)
            })
        };
        let (form_x, form_y) = (build(0.25), build(0.2));
        let equating =
            TrueScoreEquating::new(&form_x, &form_y, None, NewtonOptions::default()).expect("ok");

        // Act
        let table = equating.equate_scores();

        // Assert
        assert_abs_diff_eq!(table.form_x_min, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(table.low_score_factor, 0.8, epsilon = 1e-12);
        assert_eq!(table.status[1], ConvergenceStatus::Boundary);
        assert_abs_diff_eq!(table.y_equivalent[1], 0.8, epsilon = 1e-12);
        assert_eq!(table.y_equivalent[0], 0.0);
        assert_eq!(table.status[2], ConvergenceStatus::Converged);
        assert_eq!(table.status[3], ConvergenceStatus::Converged);
        assert_eq!(table.not_converged(), 0);
    }

    #[test]
    // Purpose
    // -------
    // Invalid options and empty forms are rejected.
    //
    // Given
    // -----
    // - Zero tolerance, zero iterations, infinite bound, an empty Form X.
    //
    // Expect
    // ------
    // - The matching `EquatingError` variants.
    fn invalid_inputs_are_rejected() {
        // Arrange
        let form = ten_item_form();
        let empty = ItemSet::new();

        // Act / Assert
        assert!(matches!(
            NewtonOptions::new(0.0, 10, 99.0),
            Err(EquatingError::InvalidNewtonTolerance { .. })
        ));
        assert!(matches!(
            NewtonOptions::new(1e-4, 0, 99.0),
            Err(EquatingError::InvalidNewtonIterations { value: 0 })
        ));
        assert!(matches!(
            NewtonOptions::new(1e-4, 10, f64::INFINITY),
            Err(EquatingError::InvalidThetaBound { .. })
        ));
        assert!(matches!(
            TrueScoreEquating::new(&empty, &form, None, NewtonOptions::default()),
            Err(EquatingError::EmptyForm { form: "X" })
        ));
    }

    #[test]
    // Purpose
    // -------
    // A Newton–Raphson cap too small to converge flags the row 'N' and still
    // returns the last iterate.
    //
    // Given
    // -----
    // - The ten-item form equated to itself; tolerance 1e-12, one iteration.
    //
    // Expect
    // ------
    // - Score 3: status 'N', one iteration, θ equal to a single Newton step
    //   from 0 and Y-equivalent evaluated at that θ.
    // - Score 5 (TCC(0) = 5): converges in that single step.
    fn capped_newton_reports_not_converged_with_last_iterate() {
        // Arrange
        let form = ten_item_form();
        let options = NewtonOptions::new(1e-12, 1, 99.0).expect("valid options");
        let one_step = (3.0 - form.tcc(0.0)) / form.tcc_derivative(0.0);

        // Act
        let table = TrueScoreEquating::new(&form, &form, None, options)
            .expect("non-empty forms")
            .equate_scores();

        // Assert
        assert_eq!(table.status[3], ConvergenceStatus::NotConverged);
        assert_eq!(table.status[3].symbol(), 'N');
        assert_eq!(table.iterations[3], 1);
        assert_abs_diff_eq!(table.theta[3], one_step, epsilon = 1e-12);
        assert_abs_diff_eq!(table.y_equivalent[3], form.tcc(one_step), epsilon = 1e-12);
        assert_eq!(table.status[5], ConvergenceStatus::Converged);
        assert!(table.not_converged() > 0);
    }
}
