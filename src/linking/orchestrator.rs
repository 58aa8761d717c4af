//! linking::orchestrator — end-to-end scale linking between two forms.
//!
//! Purpose
//! -------
//! Drive every linking method for one pair of calibrated forms and return a
//! [`LinkingReport`] holding a fit per method. Construction validates the
//! common-item design and computes the closed-form results; `compute` runs
//! the characteristic-curve optimizations.
//!
//! Key behaviors
//! -------------
//! - The branch is chosen once from the Rasch-family classification and
//!   applied identically to Haebara and Stocking–Lord:
//!   - **Rasch branch**: Brent search over the intercept across the whole of
//!     `intercept_bounds`. Each run splits the interval at its start (the
//!     Mean/Mean intercept, then randomized restarts) and searches both
//!     halves; the slope is fixed at 1.
//!   - **Free-slope branch**: `(intercept, slope)` started from the Mean/Mean
//!     estimate, minimized by L-BFGS or by multi-start Nelder–Mead.
//! - Restarts draw from a `Pcg64` stream seeded by `LinkingOptions::seed`, or
//!   from OS entropy when no seed is given.
//! - The best objective value across runs is kept.
//!
//! Invariants & assumptions
//! ------------------------
//! - A [`ScaleLinking`] value only exists for a valid common-item design.
//! - Optimizer errors never abort `compute`: the affected fit is recorded as
//!   `FitStatus::Failed` with the Mean/Mean starting values and a `warn!`
//!   event is emitted, and the remaining methods still run.
//! - Every run is bounded by an iteration cap.
//!
//! Downstream usage
//! ----------------
//! - Equating consumes any [`LinkingCoefficients`] from the report, e.g.
//!   `report.stocking_lord.coefficients`.
use crate::{
    irt::{ItemSet, QuadratureRule},
    linking::{
        closed_form::{mean_mean, mean_sigma},
        coefficients::{FitStatus, LinkingCoefficients, LinkingFit, LinkingMethod},
        common_items::common_items,
        criterion::{CriterionContext, CurveCriterion, InterceptOnly, InterceptSlope},
        errors::LinkingResult,
        options::{LinkingOptions, LinkingStrategy},
        rasch::both_rasch_family,
    },
    optimization::{
        errors::{OptError, OptResult},
        minimizer::{MinimizerOutcome, Theta, minimize, minimize_scalar, minimize_simplex},
    },
};
use ndarray::array;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use tracing::{debug, warn};

/// Relative width below which a half-interval is not searched on its own.
const MIN_SEGMENT: f64 = 1e-8;

/// Parameterization chosen for the characteristic-curve fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Branch {
    /// Intercept only; slope fixed at 1.
    Rasch,
    /// `(intercept, slope)`.
    FreeSlope,
}

/// Results of every linking method for one pair of forms.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkingReport {
    pub mean_mean: LinkingFit,
    pub mean_sigma: LinkingFit,
    pub haebara: LinkingFit,
    pub stocking_lord: LinkingFit,
    pub rasch_family: bool,
    /// Canonical common-item order (Form Y's names).
    pub common_items: Vec<String>,
}

impl LinkingReport {
    pub fn fits(&self) -> [&LinkingFit; 4] {
        [&self.mean_mean, &self.mean_sigma, &self.haebara, &self.stocking_lord]
    }

    pub fn get(&self, method: LinkingMethod) -> &LinkingFit {
        match method {
            LinkingMethod::MeanMean => &self.mean_mean,
            LinkingMethod::MeanSigma => &self.mean_sigma,
            LinkingMethod::Haebara => &self.haebara,
            LinkingMethod::StockingLord => &self.stocking_lord,
        }
    }
}

/// Scale linking of Form X onto Form Y.
#[derive(Debug, Clone)]
pub struct ScaleLinking<'a> {
    form_x: &'a ItemSet,
    form_y: &'a ItemSet,
    quad_x: &'a QuadratureRule,
    quad_y: &'a QuadratureRule,
    options: LinkingOptions,
    order: Vec<String>,
    rasch_family: bool,
    mean_mean: LinkingCoefficients,
    mean_sigma: LinkingFit,
}

impl<'a> ScaleLinking<'a> {
    /// Validate inputs and compute the closed-form methods.
    ///
    /// # Errors
    /// - `DimensionMismatch` / `NoCommonItems` from the common-item check,
    ///   before any numeric work.
    /// - `InvalidBounds` / `InvalidRestartSpread` / `MissingIterationCap` from
    ///   option validation.
    pub fn new(
        form_x: &'a ItemSet, form_y: &'a ItemSet, quad_x: &'a QuadratureRule,
        quad_y: &'a QuadratureRule, options: LinkingOptions,
    ) -> LinkingResult<Self> {
        let order = common_items(form_x, form_y)?;
        options.validate()?;
        let rasch_family = both_rasch_family(form_x, form_y);
        let precision = options.precision;
        let mean_mean = mean_mean(form_x, form_y, &order, precision);
        let mean_sigma = match mean_sigma(
            form_x,
            form_y,
            &order,
            rasch_family,
            options.population_sd,
            precision,
        ) {
            Ok(coefficients) => LinkingFit::closed_form(coefficients),
            Err(err) => {
                warn!(
                    method = %LinkingMethod::MeanSigma,
                    error = %err,
                    "closed-form linking failed"
                );
                LinkingFit::failed(
                    LinkingCoefficients::identity(LinkingMethod::MeanSigma, precision),
                    err.to_string(),
                )
            }
        };
        Ok(Self {
            form_x,
            form_y,
            quad_x,
            quad_y,
            options,
            order,
            rasch_family,
            mean_mean,
            mean_sigma,
        })
    }

    pub fn rasch_family(&self) -> bool {
        self.rasch_family
    }

    pub fn common_items(&self) -> &[String] {
        &self.order
    }

    pub fn mean_mean(&self) -> &LinkingCoefficients {
        &self.mean_mean
    }

    /// Run all four methods.
    pub fn compute(&self) -> LinkingReport {
        let mut rng = self.rng();
        let haebara = self.fit_with(CurveCriterion::Haebara, &mut rng);
        let stocking_lord = self.fit_with(CurveCriterion::StockingLord, &mut rng);
        LinkingReport {
            mean_mean: LinkingFit::closed_form(self.mean_mean),
            mean_sigma: self.mean_sigma.clone(),
            haebara,
            stocking_lord,
            rasch_family: self.rasch_family,
            common_items: self.order.clone(),
        }
    }

    /// Fit a single characteristic-curve method with a fresh RNG stream.
    pub fn fit(&self, criterion: CurveCriterion) -> LinkingFit {
        self.fit_with(criterion, &mut self.rng())
    }

    fn rng(&self) -> Pcg64 {
        match self.options.seed {
            Some(seed) => Pcg64::seed_from_u64(seed),
            None => Pcg64::from_os_rng(),
        }
    }

    fn fit_with(&self, criterion: CurveCriterion, rng: &mut Pcg64) -> LinkingFit {
        let method = criterion.method();
        let precision = self.options.precision;
        let start = LinkingCoefficients::new(
            method,
            self.mean_mean.slope,
            self.mean_mean.intercept,
            precision,
        );
        let context = CriterionContext::new(
            self.form_x,
            self.form_y,
            self.quad_x,
            self.quad_y,
            &self.order,
            self.options.criterion,
            self.options.standardize,
        );
        let branch = if self.rasch_family { Branch::Rasch } else { Branch::FreeSlope };
        let runs = match branch {
            Branch::Rasch => self.rasch_runs(&InterceptOnly::new(&context, criterion), rng),
            Branch::FreeSlope => {
                let objective = InterceptSlope::new(&context, criterion);
                match self.options.strategy {
                    LinkingStrategy::Lbfgs => self.lbfgs_runs(&objective),
                    LinkingStrategy::NelderMead => self.simplex_runs(&objective, rng),
                }
            }
        };
        self.select(branch, start, runs)
    }

    /// Brent searches over the intercept: one from the Mean/Mean intercept,
    /// then `restarts` from uniformly perturbed starting points. Every run
    /// covers the full bounds.
    fn rasch_runs(
        &self, objective: &InterceptOnly<'_>, rng: &mut Pcg64,
    ) -> Vec<OptResult<MinimizerOutcome>> {
        let (lower, upper) = self.options.intercept_bounds;
        let f = |b: f64| objective.at(b);
        let origin = self.mean_mean.intercept.clamp(lower, upper);
        let spread = self.options.restart_spread;
        let mut starts = vec![origin];
        starts.extend(
            (0..self.options.restarts)
                .map(|_| (origin + spread * rng.random_range(-1.0..=1.0)).clamp(lower, upper)),
        );
        starts
            .into_iter()
            .map(|start| {
                let halves = split_at_start(start, lower, upper)
                    .into_iter()
                    .map(|(lo, hi)| minimize_scalar(&f, lo, hi, self.options.max_scalar_iter));
                best_of_halves(halves)
            })
            .collect()
    }

    fn lbfgs_runs(&self, objective: &InterceptSlope<'_>) -> Vec<OptResult<MinimizerOutcome>> {
        let theta0 = array![self.mean_mean.intercept, self.mean_mean.slope];
        vec![minimize(objective, theta0, &(), &self.options.minimizer)]
    }

    /// Nelder–Mead from the Mean/Mean estimate, then `restarts` runs from
    /// starts perturbed by `±restart_spread` on the intercept and by a
    /// relative `±restart_spread` on the slope.
    fn simplex_runs(
        &self, objective: &InterceptSlope<'_>, rng: &mut Pcg64,
    ) -> Vec<OptResult<MinimizerOutcome>> {
        let (b0, a0) = (self.mean_mean.intercept, self.mean_mean.slope);
        let spread = self.options.restart_spread;
        let mut starts: Vec<Theta> = vec![array![b0, a0]];
        starts.extend((0..self.options.restarts).map(|_| {
            let db = spread * rng.random_range(-1.0..=1.0);
            let da = spread * rng.random_range(-1.0..=1.0);
            array![b0 + db, a0 * (1.0 + da)]
        }));
        starts
            .iter()
            .map(|theta0| minimize_simplex(objective, theta0, &(), &self.options.simplex))
            .collect()
    }

    /// Keep the run with the smallest objective; record failure if none ran.
    fn select(
        &self, branch: Branch, start: LinkingCoefficients, runs: Vec<OptResult<MinimizerOutcome>>,
    ) -> LinkingFit {
        let method = start.method;
        let mut last_error: Option<OptError> = None;
        let mut completed: Vec<MinimizerOutcome> = Vec::with_capacity(runs.len());
        for run in runs {
            match run {
                Ok(outcome) => completed.push(outcome),
                Err(err) => {
                    debug!(method = %method, error = %err, "linking run failed");
                    last_error = Some(err);
                }
            }
        }
        let restarts = completed.len();
        let best = completed.into_iter().min_by(|a, b| a.value.total_cmp(&b.value));
        match best {
            Some(outcome) => {
                let (intercept, slope) = match branch {
                    Branch::Rasch => (outcome.theta_hat[0], 1.0),
                    Branch::FreeSlope => (outcome.theta_hat[0], outcome.theta_hat[1]),
                };
                let coefficients = LinkingCoefficients { slope, intercept, ..start };
                if !outcome.converged {
                    warn!(
                        method = %method,
                        status = %outcome.status,
                        "linking fit did not converge"
                    );
                }
                debug!(
                    method = %method,
                    slope,
                    intercept,
                    objective = outcome.value,
                    iterations = outcome.iterations,
                    restarts,
                    "linking fit complete"
                );
                LinkingFit {
                    coefficients,
                    objective: Some(outcome.value),
                    status: FitStatus::Fitted {
                        converged: outcome.converged,
                        iterations: outcome.iterations,
                        restarts,
                    },
                }
            }
            None => {
                let reason = last_error
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "no optimizer run was attempted".to_string());
                warn!(
                    method = %method,
                    reason = %reason,
                    "linking fit failed; keeping Mean/Mean start"
                );
                LinkingFit::failed(start, reason)
            }
        }
    }
}

/// `[lower, start]` and `[start, upper]`, or the whole interval when `start`
/// sits within `MIN_SEGMENT` of a bound.
fn split_at_start(start: f64, lower: f64, upper: f64) -> Vec<(f64, f64)> {
    let min_width = MIN_SEGMENT * (upper - lower);
    if start - lower <= min_width || upper - start <= min_width {
        return vec![(lower, upper)];
    }
    vec![(lower, start), (start, upper)]
}

/// Lower-valued outcome among the halves of one run, with iterations summed.
/// Errors only when every half failed.
fn best_of_halves(
    halves: impl IntoIterator<Item = OptResult<MinimizerOutcome>>,
) -> OptResult<MinimizerOutcome> {
    let mut best: Option<MinimizerOutcome> = None;
    let mut last_error: Option<OptError> = None;
    let mut iterations = 0;
    for half in halves {
        match half {
            Ok(outcome) => {
                iterations += outcome.iterations;
                if best.as_ref().is_none_or(|b| outcome.value < b.value) {
                    best = Some(outcome);
                }
            }
            Err(err) => last_error = Some(err),
        }
    }
    match (best, last_error) {
        (Some(outcome), _) => Ok(MinimizerOutcome { iterations, ..outcome }),
        (None, Some(err)) => Err(err),
        (None, None) => Err(OptError::MissingThetaHat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        irt::{LogisticItem, PartialCreditItem},
        linking::{errors::LinkingError, options::CriterionKind},
        optimization::minimizer::FnEvalMap,
    };
    use approx::assert_abs_diff_eq;
    use argmin::core::{TerminationReason, TerminationStatus};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Branch selection (Rasch vs free slope) and both free-slope strategies.
    // - Recovery of a known transformation by Haebara and Stocking–Lord.
    // - Seeded reproducibility of randomized restarts.
    // - Early rejection of mismatched forms.
    // - Failure recording when no run can succeed.
    // - Full-interval Rasch search and branch-driven slope selection.
    // -------------------------------------------------------------------------

    fn free_slope_forms(slope: f64, intercept: f64) -> (ItemSet, ItemSet) {
        let params = [(1.0, -1.2), (1.4, -0.3), (0.8, 0.4), (1.1, 1.3), (0.6, 0.0)];
        let x = params.iter().enumerate().fold(ItemSet::new(), |s, (j, &(a, b))| {
            s.with_item(format!("i{j}"), LogisticItem::two_pl(a, b, 1.7).expect("ok"))
        });
        let y = params.iter().enumerate().fold(ItemSet::new(), |s, (j, &(a, b))| {
            let item = LogisticItem::two_pl(a / slope, slope * b + intercept, 1.7).expect("ok");
            s.with_item(format!("i{j}"), item)
        });
        (x, y)
    }

    fn rasch_forms(shift: f64) -> (ItemSet, ItemSet) {
        let x = ItemSet::new()
            .with_item("r1", LogisticItem::rasch(-1.0).expect("ok"))
            .with_item("r2", LogisticItem::rasch(0.5).expect("ok"))
            .with_item("p1", PartialCreditItem::pcm(vec![-0.8, 0.9]).expect("ok"));
        let y = ItemSet::new()
            .with_item("r1", LogisticItem::rasch(-1.0 + shift).expect("ok"))
            .with_item("r2", LogisticItem::rasch(0.5 + shift).expect("ok"))
            .with_item("p1", PartialCreditItem::pcm(vec![-0.8 + shift, 0.9 + shift]).expect("ok"));
        (x, y)
    }

    #[test]
    // Purpose
    // -------
    // Both strategies recover a known slope and intercept on the free-slope
    // branch.
    //
    // Given
    // -----
    // - Five 2PL items, Form Y = Form X under (B, A) = (0.4, 1.1);
    //   Q1 criterion over a 21-point normal rule.
    //
    // Expect
    // ------
    // - Haebara and Stocking–Lord within 1e-3 of (1.1, 0.4) for L-BFGS and
    //   Nelder–Mead.
    fn free_slope_strategies_recover_transformation() {
        // Arrange
        let (x, y) = free_slope_forms(1.1, 0.4);
        let rule = QuadratureRule::normal(21, -4.0, 4.0, 0.0, 1.0).expect("rule");

        for strategy in [LinkingStrategy::Lbfgs, LinkingStrategy::NelderMead] {
            let options = LinkingOptions::default()
                .with_strategy(strategy)
                .with_criterion(CriterionKind::Q1, true)
                .with_seed(7);
            let linking = ScaleLinking::new(&x, &y, &rule, &rule, options).expect("valid");

            // Act
            let report = linking.compute();

            // Assert
            assert!(!report.rasch_family);
            for fit in [&report.haebara, &report.stocking_lord] {
                assert!(matches!(fit.status, FitStatus::Fitted { .. }), "{strategy:?}: {fit:?}");
                assert_abs_diff_eq!(fit.slope(), 1.1, epsilon = 1e-3);
                assert_abs_diff_eq!(fit.intercept(), 0.4, epsilon = 1e-3);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Rasch-family forms take the intercept-only branch with slope fixed at 1,
    // and a fixed seed makes the restarts reproducible.
    //
    // Given
    // -----
    // - Rasch + PCM forms shifted by 0.7; seed 11; run twice.
    //
    // Expect
    // ------
    // - slope exactly 1, intercept ≈ 0.7, identical reports across runs.
    fn rasch_branch_fixes_slope_and_is_reproducible() {
        // Arrange
        let (x, y) = rasch_forms(0.7);
        let rule = QuadratureRule::normal(15, -4.0, 4.0, 0.0, 1.0).expect("rule");
        let options = LinkingOptions::default().with_seed(11);
        let linking = ScaleLinking::new(&x, &y, &rule, &rule, options).expect("valid");

        // Act
        let first = linking.compute();
        let second = linking.compute();

        // Assert
        assert!(first.rasch_family);
        assert_eq!(first.haebara.slope(), 1.0);
        assert_abs_diff_eq!(first.haebara.intercept(), 0.7, epsilon = 1e-4);
        assert_abs_diff_eq!(first.stocking_lord.intercept(), 0.7, epsilon = 1e-4);
        assert_eq!(first.mean_sigma.slope(), 1.0);
        assert_eq!(first, second);
    }

    #[test]
    // Purpose
    // -------
    // Construction fails before any numeric work when Form Y has an extra item.
    //
    // Given
    // -----
    // - Form Y = Form X plus one item.
    //
    // Expect
    // ------
    // - `DimensionMismatch { size_x: 5, size_y: 6, mismatched: 1 }`.
    fn mismatched_forms_are_rejected_at_construction() {
        // Arrange
        let (x, y) = free_slope_forms(1.0, 0.0);
        let y = y.with_item("extra", LogisticItem::rasch(0.0).expect("ok"));
        let rule = QuadratureRule::normal(5, -2.0, 2.0, 0.0, 1.0).expect("rule");

        // Act
        let res = ScaleLinking::new(&x, &y, &rule, &rule, LinkingOptions::default());

        // Assert
        assert!(matches!(
            res,
            Err(LinkingError::DimensionMismatch { size_x: 5, size_y: 6, mismatched: 1 })
        ));
    }

    #[test]
    // Purpose
    // -------
    // When every run errors, the fit is marked failed and keeps the Mean/Mean
    // start instead of an indistinguishable default.
    //
    // Given
    // -----
    // - A free-slope pair and a selection over two failed runs.
    //
    // Expect
    // ------
    // - `FitStatus::Failed` carrying the last error; coefficients equal the
    //   start; `is_success() == false`.
    fn all_failed_runs_are_recorded_as_failure() {
        // Arrange
        let (x, y) = free_slope_forms(1.0, 0.2);
        let rule = QuadratureRule::normal(5, -2.0, 2.0, 0.0, 1.0).expect("rule");
        let linking =
            ScaleLinking::new(&x, &y, &rule, &rule, LinkingOptions::default()).expect("valid");
        let start = LinkingCoefficients::new(LinkingMethod::Haebara, 1.0, 0.2, 4);
        let runs = vec![
            Err(OptError::DegenerateSlope { value: 0.0 }),
            Err(OptError::NonFiniteCost { value: f64::NAN }),
        ];

        // Act
        let fit = linking.select(Branch::FreeSlope, start, runs);

        // Assert
        assert!(!fit.is_success());
        assert_eq!(fit.coefficients, start);
        assert!(matches!(
            fit.status,
            FitStatus::Failed { ref reason } if reason.contains("Non-finite")
        ));
    }

    #[test]
    // Purpose
    // -------
    // The slope comes from the branch passed to `select`, not from the
    // length of the parameter vector.
    //
    // Given
    // -----
    // - Converged outcomes (−0.4) and (−0.4, 1.3), selected under the Rasch
    //   and free-slope branches.
    //
    // Expect
    // ------
    // - Rasch: slope exactly 1; free slope: slope 1.3; intercept −0.4 both.
    fn select_reads_slope_from_branch() {
        // Arrange
        let (x, y) = free_slope_forms(1.0, 0.0);
        let rule = QuadratureRule::normal(5, -2.0, 2.0, 0.0, 1.0).expect("rule");
        let linking =
            ScaleLinking::new(&x, &y, &rule, &rule, LinkingOptions::default()).expect("valid");
        let start = LinkingCoefficients::new(LinkingMethod::Haebara, 1.0, 0.0, 4);
        let outcome = |theta: Theta| {
            MinimizerOutcome::new(
                Some(theta),
                0.01,
                TerminationStatus::Terminated(TerminationReason::SolverConverged),
                4,
                FnEvalMap::new(),
                None,
            )
        };

        // Act
        let rasch = linking.select(Branch::Rasch, start, vec![outcome(array![-0.4])]);
        let free = linking.select(Branch::FreeSlope, start, vec![outcome(array![-0.4, 1.3])]);

        // Assert
        assert_eq!(rasch.slope(), 1.0);
        assert_abs_diff_eq!(rasch.intercept(), -0.4, epsilon = 1e-15);
        assert_abs_diff_eq!(free.slope(), 1.3, epsilon = 1e-15);
        assert!(free.is_success());
    }

    #[test]
    // Purpose
    // -------
    // Each Rasch run searches the whole interval split at its start.
    //
    // Given
    // -----
    // - start 0.3 in [−4, 4]; start on the lower bound.
    //
    // Expect
    // ------
    // - Halves [−4, 0.3] and [0.3, 4]; the full interval for the bound case.
    fn split_covers_full_interval() {
        // Act
        let interior = split_at_start(0.3, -4.0, 4.0);
        let edge = split_at_start(-4.0, -4.0, 4.0);

        // Assert
        assert_eq!(interior, vec![(-4.0, 0.3), (0.3, 4.0)]);
        assert_eq!(edge, vec![(-4.0, 4.0)]);
    }

    #[test]
    // Purpose
    // -------
    // A Mean/Mean intercept far from the optimum does not confine the Rasch
    // search to its neighbourhood.
    //
    // Given
    // -----
    // - Three Rasch anchors shifted by −3 and one off-scale item (X b = 10,
    //   Y b = 23), so the Mean/Mean intercept is +1.
    // - Seed 1, default options, 21-point normal rule.
    //
    // Expect
    // ------
    // - Mean/Mean intercept 1; Haebara and Stocking–Lord intercepts within
    //   0.05 of −3 with a near-zero Haebara objective.
    fn rasch_search_reaches_optimum_far_from_start() {
        // Arrange
        let x = ItemSet::new()
            .with_item("a1", LogisticItem::rasch(-1.0).expect("ok"))
            .with_item("a2", LogisticItem::rasch(0.5).expect("ok"))
            .with_item("a3", LogisticItem::rasch(0.0).expect("ok"))
            .with_item("far", LogisticItem::rasch(10.0).expect("ok"));
        let y = ItemSet::new()
            .with_item("a1", LogisticItem::rasch(-4.0).expect("ok"))
            .with_item("a2", LogisticItem::rasch(-2.5).expect("ok"))
            .with_item("a3", LogisticItem::rasch(-3.0).expect("ok"))
            .with_item("far", LogisticItem::rasch(23.0).expect("ok"));
        let rule = QuadratureRule::normal(21, -4.0, 4.0, 0.0, 1.0).expect("rule");
        let options = LinkingOptions::default().with_seed(1);
        let linking = ScaleLinking::new(&x, &y, &rule, &rule, options).expect("valid");

        // Act
        let report = linking.compute();

        // Assert
        assert!(report.rasch_family);
        assert_abs_diff_eq!(report.mean_mean.intercept(), 1.0, epsilon = 1e-12);
        for fit in [&report.haebara, &report.stocking_lord] {
            assert!(fit.is_success(), "{fit:?}");
            assert_abs_diff_eq!(fit.intercept(), -3.0, epsilon = 0.05);
        }
        assert!(report.haebara.objective.is_some_and(|v| v < 1e-3));
    }
}
