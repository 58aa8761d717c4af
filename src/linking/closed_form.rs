//! Closed-form linking: Mean/Mean and Mean/Sigma.
//!
//! Both methods summarize the common items over the canonical order:
//! - **Mean/Mean**: `slope = mean(a_X) / mean(a_Y)`,
//!   `intercept = mean(b_Y) − slope·mean(b_X)`.
//! - **Mean/Sigma**: `slope = sd(b_Y) / sd(b_X)` (forced to 1 when both forms
//!   are Rasch family), `intercept = mean(b_Y) − slope·mean(b_X)`.
//!
//! Locations are pooled over every location parameter of every item, so
//! polytomous items contribute each step difficulty.
use crate::{
    irt::ItemSet,
    linking::{
        coefficients::{LinkingCoefficients, LinkingMethod},
        errors::{LinkingError, LinkingResult},
    },
};

/// Mean/Mean coefficients; cannot fail for a validated common-item design.
pub fn mean_mean(
    form_x: &ItemSet, form_y: &ItemSet, order: &[String], precision: usize,
) -> LinkingCoefficients {
    let a_x = mean(&discriminations(form_x, order));
    let a_y = mean(&discriminations(form_y, order));
    let b_x = mean(&locations(form_x, order));
    let b_y = mean(&locations(form_y, order));
    let slope = a_x / a_y;
    LinkingCoefficients::new(LinkingMethod::MeanMean, slope, b_y - slope * b_x, precision)
}

/// Mean/Sigma coefficients.
///
/// `population_sd` selects the biased (`n`) rather than unbiased (`n − 1`)
/// standard deviation.
///
/// # Errors
/// `ZeroDispersion` when the slope is free and Form X's locations have zero
/// (or undefined) standard deviation.
pub fn mean_sigma(
    form_x: &ItemSet, form_y: &ItemSet, order: &[String], rasch_family: bool,
    population_sd: bool, precision: usize,
) -> LinkingResult<LinkingCoefficients> {
    let b_x = locations(form_x, order);
    let b_y = locations(form_y, order);
    let slope = if rasch_family {
        1.0
    } else {
        let sd_x = std_dev(&b_x, population_sd);
        if !(sd_x.is_finite() && sd_x > 0.0) {
            return Err(LinkingError::ZeroDispersion { sd_x });
        }
        std_dev(&b_y, population_sd) / sd_x
    };
    let intercept = mean(&b_y) - slope * mean(&b_x);
    Ok(LinkingCoefficients::new(LinkingMethod::MeanSigma, slope, intercept, precision))
}

// ---- Helper Methods ----

fn discriminations(form: &ItemSet, order: &[String]) -> Vec<f64> {
    order.iter().filter_map(|name| form.get(name)).map(|m| m.discrimination()).collect()
}

fn locations(form: &ItemSet, order: &[String]) -> Vec<f64> {
    order
        .iter()
        .filter_map(|name| form.get(name))
        .flat_map(|m| m.locations().to_vec())
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn std_dev(values: &[f64], population: bool) -> f64 {
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    let n = values.len() as f64;
    let denom = if population { n } else { n - 1.0 };
    (ss / denom).sqrt()
}
