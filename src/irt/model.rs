//! irt::model — item response capability and item sets.
//!
//! Purpose
//! -------
//! Define the capability every calibrated item exposes to the linking and
//! equating layers, and the per-form collection of items keyed by name.
//! Linking criteria and equating code depend only on [`ItemResponseModel`];
//! they never inspect family-specific parameters beyond what the trait offers.
//!
//! Key behaviors
//! -------------
//! - Category probabilities, expected scores and their θ-derivative.
//! - Transformed forms for a candidate `(intercept B, slope A)` pair:
//!   - **t-star** places a Form-X item on the Form-Y scale
//!     (`a* = a / A`, `b* = A·b + B`);
//!   - **t-sharp** places a Form-Y item on the Form-X scale
//!     (`a# = A·a`, `b# = (b − B) / A`).
//! - [`ItemSet`] aggregates items into test characteristic curves (TCC).
//!
//! Invariants & assumptions
//! ------------------------
//! - Items are immutable once constructed; parameters were validated by the
//!   concrete constructors.
//! - `probability(θ, k)` is `0.0` for `k ≥ ncat()`.
//! - The slope `A` passed to the transformed forms is non-zero; callers
//!   reject degenerate slopes before evaluation.
//!
//! Conventions
//! -----------
//! - Argument order for transformed forms is `(θ, [k,] intercept, slope)`.
//! - Items are shared between forms and reports through `Arc`, never copied.
use std::{collections::BTreeMap, fmt::Debug, sync::Arc};

/// Closed set of item families supported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemFamily {
    /// Dichotomous logistic item (1PL through 4PL).
    Logistic,
    /// Rasch partial-credit item (slope fixed at 1).
    PartialCredit,
    /// Generalized partial-credit item (free slope).
    GeneralizedPartialCredit,
}

/// Capability set of a calibrated item.
pub trait ItemResponseModel: Debug + Send + Sync {
    fn family(&self) -> ItemFamily;

    /// Number of response categories.
    fn ncat(&self) -> usize;

    fn discrimination(&self) -> f64;

    /// Difficulty (dichotomous) or step difficulties (polytomous).
    fn locations(&self) -> &[f64];

    /// Lower asymptote.
    fn guessing(&self) -> f64 {
        0.0
    }

    /// Upper asymptote.
    fn slipping(&self) -> f64 {
        1.0
    }

    /// Score assigned to each category, indexed by category.
    fn score_weights(&self) -> &[f64];

    fn min_score_weight(&self) -> f64 {
        self.score_weights().iter().copied().fold(f64::INFINITY, f64::min)
    }

    fn max_score_weight(&self) -> f64 {
        self.score_weights().iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Probability of responding in `category` at ability `theta`.
    fn probability(&self, theta: f64, category: usize) -> f64;

    /// Expected item score at `theta`.
    fn expected_value(&self, theta: f64) -> f64 {
        weighted_sum(self.score_weights(), |k| self.probability(theta, k))
    }

    /// Derivative of the expected item score with respect to `theta`.
    fn derivative(&self, theta: f64) -> f64;

    /// Category probability of a Form-X item placed on the Form-Y scale.
    fn t_star_probability(&self, theta: f64, category: usize, intercept: f64, slope: f64) -> f64;

    /// Category probability of a Form-Y item placed on the Form-X scale.
    fn t_sharp_probability(
        &self, theta: f64, category: usize, intercept: f64, slope: f64,
    ) -> f64;

    fn t_star_expected_value(&self, theta: f64, intercept: f64, slope: f64) -> f64 {
        weighted_sum(self.score_weights(), |k| self.t_star_probability(theta, k, intercept, slope))
    }

    fn t_sharp_expected_value(&self, theta: f64, intercept: f64, slope: f64) -> f64 {
        weighted_sum(self.score_weights(), |k| self.t_sharp_probability(theta, k, intercept, slope))
    }
}

fn weighted_sum<P: Fn(usize) -> f64>(weights: &[f64], prob: P) -> f64 {
    weights.iter().enumerate().map(|(k, w)| w * prob(k)).sum()
}

/// Shared handle to a calibrated item.
pub type SharedItem = Arc<dyn ItemResponseModel>;

/// Ordered mapping from item name to item model, one per form.
#[derive(Debug, Clone, Default)]
pub struct ItemSet {
    items: BTreeMap<String, SharedItem>,
}

impl ItemSet {
    pub fn new() -> Self {
        Self { items: BTreeMap::new() }
    }

    /// Builder-style insert; a repeated name replaces the earlier item.
    pub fn with_item<M: ItemResponseModel + 'static>(
        mut self, name: impl Into<String>, item: M,
    ) -> Self {
        self.items.insert(name.into(), Arc::new(item));
        self
    }

    /// Insert a shared item, returning the item previously stored under `name`.
    pub fn insert(&mut self, name: impl Into<String>, item: SharedItem) -> Option<SharedItem> {
        self.items.insert(name.into(), item)
    }

    pub fn get(&self, name: &str) -> Option<&SharedItem> {
        self.items.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SharedItem)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn models(&self) -> impl Iterator<Item = &SharedItem> {
        self.items.values()
    }

    /// Test characteristic curve `Σ_j E_j(θ)`.
    pub fn tcc(&self, theta: f64) -> f64 {
        self.models().map(|m| m.expected_value(theta)).sum()
    }

    /// Derivative of the TCC with respect to θ.
    pub fn tcc_derivative(&self, theta: f64) -> f64 {
        self.models().map(|m| m.derivative(theta)).sum()
    }

    /// Sum of each item's maximum score weight.
    pub fn max_possible_score(&self) -> f64 {
        self.models().map(|m| m.max_score_weight()).sum()
    }

    /// Minimum attainable true score:
    /// `Σ_j min_j·(1 − c_j) + max_j·c_j`.
    pub fn min_true_score(&self) -> f64 {
        self.models()
            .map(|m| {
                let c = m.guessing();
                m.min_score_weight() * (1.0 - c) + m.max_score_weight() * c
            })
            .sum()
    }

    /// Total number of response categories across items.
    pub fn total_categories(&self) -> usize {
        self.models().map(|m| m.ncat()).sum()
    }
}

impl FromIterator<(String, SharedItem)> for ItemSet {
    fn from_iter<I: IntoIterator<Item = (String, SharedItem)>>(iter: I) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}
