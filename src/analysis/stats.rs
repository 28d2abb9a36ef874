// ABOUTME: Shared statistical primitives for the analyzers
// ABOUTME: Mean, sample standard deviation, Pearson correlation, display rounding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalog Contributors

//! Statistical helpers
//!
//! Every analyzer funnels through these primitives so the "omit when
//! insufficient data" policy and the rounding convention are defined in
//! exactly one place. The pinned rounding convention is
//! round-half-away-from-zero (`f64::round`).

use crate::catalog::Precision;
use tracing::trace;

/// Shared minimum-sample-count guard. Logs the omission at trace level
/// so sparse data is diagnosable without error noise.
#[must_use]
pub fn meets_minimum(sample_count: usize, required: usize, what: &str) -> bool {
    if sample_count < required {
        trace!(what, sample_count, required, "omitted: below sample minimum");
        return false;
    }
    true
}

/// Arithmetic mean; `None` for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator); `None` below two
/// values. A constant series yields `Some(0.0)` - callers treat zero
/// spread as degenerate and skip comparison.
#[must_use]
pub fn std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq = values
        .iter()
        .map(|v| {
            let diff = v - m;
            diff * diff
        })
        .sum::<f64>();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Pearson correlation coefficient of two equal-length series.
///
/// Returns `None` when the series are empty, mismatched, or either has
/// zero variance (undefined correlation, never reported as 0).
#[must_use]
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.is_empty() || xs.len() != ys.len() {
        return None;
    }
    let n = xs.len() as f64;
    let sum_x = xs.iter().sum::<f64>();
    let sum_y = ys.iter().sum::<f64>();
    let sum_xx = xs.iter().map(|x| x * x).sum::<f64>();
    let sum_yy = ys.iter().map(|y| y * y).sum::<f64>();
    let sum_xy = xs.iter().zip(ys).map(|(x, y)| x * y).sum::<f64>();

    let var_x = sum_x.mul_add(-(sum_x / n), sum_xx);
    let var_y = sum_y.mul_add(-(sum_y / n), sum_yy);
    let denominator = (var_x * var_y).sqrt();
    if denominator < f64::EPSILON {
        return None;
    }

    let numerator = sum_x.mul_add(-(sum_y / n), sum_xy);
    Some((numerator / denominator).clamp(-1.0, 1.0))
}

/// Round a value to a metric's display precision,
/// half-away-from-zero.
#[must_use]
pub fn round_to(value: f64, precision: Precision) -> f64 {
    match precision {
        Precision::Integer => value.round(),
        Precision::OneDecimal => (value * 10.0).round() / 10.0,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn mean_of_empty_is_none() {
        assert!(mean(&[]).is_none());
        assert!((mean(&[8.0, 3.0, 8.0, 7.0]).unwrap() - 6.5).abs() < TOLERANCE);
    }

    #[test]
    fn std_dev_needs_two_values_and_detects_constants() {
        assert!(std_dev(&[5.0]).is_none());
        assert!(std_dev(&[5.0, 5.0, 5.0]).unwrap().abs() < TOLERANCE);
        // Sample (n-1) convention: [2, 4] has sd sqrt(2)
        assert!((std_dev(&[2.0, 4.0]).unwrap() - 2.0_f64.sqrt()).abs() < TOLERANCE);
    }

    #[test]
    fn pearson_perfect_and_inverse() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let inverted: Vec<f64> = xs.iter().map(|x| 10.0 - x).collect();
        assert!((pearson(&xs, &xs).unwrap() - 1.0).abs() < TOLERANCE);
        assert!((pearson(&xs, &inverted).unwrap() + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn pearson_zero_variance_is_undefined() {
        let flat = [3.0, 3.0, 3.0, 3.0, 3.0];
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!(pearson(&flat, &xs).is_none());
    }

    // Pins the crate-wide rounding convention: half away from zero.
    #[test]
    fn rounding_half_away_from_zero() {
        assert!((round_to(2.5, Precision::Integer) - 3.0).abs() < TOLERANCE);
        assert!((round_to(-2.5, Precision::Integer) + 3.0).abs() < TOLERANCE);
        assert!((round_to(0.25, Precision::OneDecimal) - 0.3).abs() < TOLERANCE);
        assert!((round_to(7.666_666, Precision::OneDecimal) - 7.7).abs() < TOLERANCE);
    }
}
