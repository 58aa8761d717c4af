//! Descriptive moments of discrete score distributions.
use ndarray::ArrayView1;

/// Mean, standard deviation, skewness and (non-excess) kurtosis.
///
/// Moments use population (`n`) denominators with the density as weights.
/// Skewness and kurtosis are reported as 0 for a degenerate distribution
/// (zero standard deviation or zero total mass).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    pub mean: f64,
    pub sd: f64,
    pub skewness: f64,
    pub kurtosis: f64,
}

impl Moments {
    /// Moments of the integer scores `0..n` under `density`.
    pub fn from_density(density: ArrayView1<'_, f64>) -> Self {
        let scores: Vec<f64> = (0..density.len()).map(|x| x as f64).collect();
        Self::weighted(&scores, density)
    }

    /// Moments of `values[i]` occurring with weight `weights[i]`; weights are
    /// normalized by their sum.
    pub fn weighted(values: &[f64], weights: ArrayView1<'_, f64>) -> Self {
        let total: f64 = weights.sum();
        if total <= 0.0 || !total.is_finite() {
            return Self { mean: 0.0, sd: 0.0, skewness: 0.0, kurtosis: 0.0 };
        }
        let pairs = || values.iter().zip(weights.iter()).map(|(&v, &w)| (v, w / total));
        let mean: f64 = pairs().map(|(v, w)| w * v).sum();
        let central = |order: i32| -> f64 {
            pairs().map(|(v, w)| w * (v - mean).powi(order)).sum()
        };
        let variance = central(2);
        let sd = variance.sqrt();
        if sd <= 0.0 {
            return Self { mean, sd: 0.0, skewness: 0.0, kurtosis: 0.0 };
        }
        Self {
            mean,
            sd,
            skewness: central(3) / sd.powi(3),
            kurtosis: central(4) / variance.powi(2),
        }
    }
}
