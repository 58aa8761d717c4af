//! Continuized percentile ranks and percentile points.
//!
//! Integer score `x` is treated as uniform on `[x − 0.5, x + 0.5)`, so the
//! cumulative distribution is piecewise linear between half-integer
//! boundaries. [`percentile_rank`] evaluates it (scaled to 0–100) and
//! [`percentile_point`] inverts it.
//!
//! Cumulative arrays are indexed by integer score `0..=K`, with `F(−1) = 0`.
use ndarray::{Array1, ArrayView1};

const CDF_TOL: f64 = 1e-12;

/// Prefix sums of `density`.
pub fn cumulative_distribution(density: ArrayView1<'_, f64>) -> Array1<f64> {
    density
        .iter()
        .scan(0.0, |total, &p| {
            *total += p;
            Some(*total)
        })
        .collect()
}

/// Percentile rank of score `x` on the continuized distribution `cdf`.
///
/// - `x < −0.5` → 0.
/// - `x ≥ K + 0.5` → 100.
/// - Otherwise, with `x* = ⌊x + 0.5⌋`,
///   `100·[F(x* − 1) + (x − x* + 0.5)·(F(x*) − F(x* − 1))]`.
pub fn percentile_rank(cdf: ArrayView1<'_, f64>, x: f64) -> f64 {
    if cdf.is_empty() || x < -0.5 {
        return 0.0;
    }
    let max_score = (cdf.len() - 1) as f64;
    if x >= max_score + 0.5 {
        return 100.0;
    }
    let nearest = (x + 0.5).floor();
    let k = nearest as usize;
    let below = if k == 0 { 0.0 } else { cdf[k - 1] };
    100.0 * (below + (x - nearest + 0.5) * (cdf[k] - below))
}

/// Score whose continuized percentile rank on `cdf` is `p`.
///
/// Uses the smallest score `x_U` with `F(x_U) > p/100`:
/// `x = (p/100 − F(x_U − 1)) / (F(x_U) − F(x_U − 1)) + x_U − 0.5`.
/// - When no cell exceeds `p/100` (p ≈ 100), returns the upper edge of the
///   last cell with mass.
/// - When the first cell already exceeds the target this reduces to
///   `p/100 / F(0) − 0.5`; for `p = 0` it returns the lower edge of the
///   first cell with mass.
/// - A zero-width cell (tied cumulative values) falls back to its midpoint.
pub fn percentile_point(cdf: ArrayView1<'_, f64>, p: f64) -> f64 {
    if cdf.is_empty() {
        return 0.0;
    }
    let target = (p / 100.0).clamp(0.0, 1.0);
    let upper = match cdf.iter().position(|&f| f > target + CDF_TOL) {
        Some(k) => k,
        None => return last_positive_cell(cdf) as f64 + 0.5,
    };
    let below = if upper == 0 { 0.0 } else { cdf[upper - 1] };
    let width = cdf[upper] - below;
    if width <= CDF_TOL {
        return upper as f64;
    }
    ((target - below) / width + upper as f64 - 0.5).max(-0.5)
}

fn last_positive_cell(cdf: ArrayView1<'_, f64>) -> usize {
    (0..cdf.len())
        .rev()
        .find(|&k| {
            let below = if k == 0 { 0.0 } else { cdf[k - 1] };
            cdf[k] - below > CDF_TOL
        })
        .unwrap_or(cdf.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Boundary ranks and the interior interpolation rule.
    // - The inverse law between rank and point on a distribution without
    //   empty extreme cells.
    // - Zero-mass cells at either end and a leading cell above the target.
    // -------------------------------------------------------------------------

    fn cdf_of(density: &Array1<f64>) -> Array1<f64> {
        cumulative_distribution(density.view())
    }

    #[test]
    // Purpose
    // -------
    // Ranks follow the half-integer rule.
    //
    // Given
    // -----
    // - Density (0.1, 0.2, 0.4, 0.3).
    //
    // Expect
    // ------
    // - rank(−0.6) = 0, rank(3.5) = 100, rank(1) = 100·(0.1 + 0.5·0.2) = 20,
    //   rank(−0.5) = 0, rank(2.25) = 100·(0.3 + 0.75·0.4) = 60.
    fn rank_follows_half_integer_rule() {
        // Arrange
        let cdf = cdf_of(&array![0.1, 0.2, 0.4, 0.3]);

        // Act / Assert
        assert_eq!(percentile_rank(cdf.view(), -0.6), 0.0);
        assert_eq!(percentile_rank(cdf.view(), 3.5), 100.0);
        assert_abs_diff_eq!(percentile_rank(cdf.view(), -0.5), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(percentile_rank(cdf.view(), 1.0), 20.0, epsilon = 1e-10);
        assert_abs_diff_eq!(percentile_rank(cdf.view(), 2.25), 60.0, epsilon = 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // `percentile_point` inverts `percentile_rank` for interior scores.
    //
    // Given
    // -----
    // - Density (0.05, 0.15, 0.3, 0.25, 0.15, 0.1) and x on a grid strictly
    //   inside (0, 5).
    //
    // Expect
    // ------
    // - point(rank(x)) = x within 1e-9.
    fn point_inverts_rank() {
        // Arrange
        let cdf = cdf_of(&array![0.05, 0.15, 0.3, 0.25, 0.15, 0.1]);

        for step in 1..50 {
            let x = 0.1 * step as f64;

            // Act
            let back = percentile_point(cdf.view(), percentile_rank(cdf.view(), x));

            // Assert
            assert_abs_diff_eq!(back, x, epsilon = 1e-9);
        }
    }

    #[test]
    // Purpose
    // -------
    // Degenerate cells are handled without division by zero.
    //
    // Given
    // -----
    // - Density (0, 0.5, 0, 0.5, 0): empty first, middle and last cells.
    //
    // Expect
    // ------
    // - point(0) = 0.5, the lower edge of the first cell with mass.
    // - point(100) = 3.5, the upper edge of the last cell with mass.
    // - point(50) = 2.5, the lower edge of cell 3 past the plateau.
    fn degenerate_cells_use_boundary_rules() {
        // Arrange
        let cdf = cdf_of(&array![0.0, 0.5, 0.0, 0.5, 0.0]);

        // Act
        let low = percentile_point(cdf.view(), 0.0);
        let high = percentile_point(cdf.view(), 100.0);
        let mid = percentile_point(cdf.view(), 50.0);

        // Assert
        assert_abs_diff_eq!(low, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(high, 3.5, epsilon = 1e-12);
        assert_abs_diff_eq!(mid, 2.5, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // When the first cell already exceeds the target the point is
    // `target / F(0) − 0.5`.
    //
    // Given
    // -----
    // - Density (0.4, 0.6), p = 10.
    //
    // Expect
    // ------
    // - 0.1 / 0.4 − 0.5 = −0.25.
    fn leading_cell_above_target() {
        // Arrange
        let cdf = cdf_of(&array![0.4, 0.6]);

        // Act
        let x = percentile_point(cdf.view(), 10.0);

        // Assert
        assert_abs_diff_eq!(x, -0.25, epsilon = 1e-12);
    }
}
