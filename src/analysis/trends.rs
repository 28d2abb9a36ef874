// ABOUTME: Polarity-aware trend classification over a log window
// ABOUTME: Chronological half-split comparison with a configurable stability band
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalog Contributors

//! Trend classifier
//!
//! Splits a metric's chronological series into an earlier and a later
//! half and compares the half averages. Direction is metric-aware: the
//! catalog's polarity table decides whether an increase is an
//! improvement, and polarity only kicks in once movement leaves the
//! metric's healthy range (where one is established). Metrics below
//! the minimum sample count are omitted - insufficient data is
//! "unknown", never "stable".

use crate::analysis::{aggregator::Aggregator, stats};
use crate::catalog::{MetricCatalog, MetricKey, Polarity};
use crate::config::TrendConfig;
use crate::models::{HealthLog, Trend, TrendDirection};
use std::collections::BTreeMap;
use tracing::debug;

/// Classifies per-metric movement across a window.
pub struct TrendClassifier {
    config: TrendConfig,
}

impl TrendClassifier {
    /// Classifier with the given thresholds.
    #[must_use]
    pub const fn new(config: TrendConfig) -> Self {
        Self { config }
    }

    /// Classify the requested metrics over `logs`.
    ///
    /// Metrics with fewer than `min_samples` present values are absent
    /// from the result.
    #[must_use]
    pub fn classify(&self, logs: &[HealthLog], keys: &[MetricKey]) -> BTreeMap<MetricKey, Trend> {
        let mut trends = BTreeMap::new();

        for &key in keys {
            let series = Aggregator::series(logs, key);
            if !stats::meets_minimum(series.len(), self.config.min_samples, key.as_str()) {
                continue;
            }
            let values: Vec<f64> = series.into_iter().map(|(_, value)| value).collect();
            if let Some(trend) = self.classify_series(key, &values) {
                trends.insert(key, trend);
            }
        }

        trends
    }

    /// Half-split comparison of one chronological value series.
    /// With an odd count the earlier half gets the extra point.
    fn classify_series(&self, key: MetricKey, values: &[f64]) -> Option<Trend> {
        let midpoint = values.len().div_ceil(2);
        let earlier_avg = stats::mean(&values[..midpoint])?;
        let later_avg = stats::mean(&values[midpoint..])?;
        let change = later_avg - earlier_avg;

        let descriptor = MetricCatalog::descriptor(key);
        let (magnitude, beyond_band) = if earlier_avg.abs() < f64::EPSILON {
            // Zero baseline: relative change is undefined, compare the
            // absolute change against the metric's meaningful delta.
            (change, change.abs() >= descriptor.min_meaningful_delta)
        } else {
            let relative = change / earlier_avg;
            (relative, relative.abs() >= self.config.stability_threshold)
        };

        // Movement where both half-averages sit inside the metric's
        // healthy range carries no health direction: 70 -> 64 bpm is
        // drift inside normal, not an improvement.
        let within_healthy_band = descriptor.healthy_range.is_some_and(|(low, high)| {
            (low..=high).contains(&earlier_avg) && (low..=high).contains(&later_avg)
        });

        let direction = if beyond_band && !within_healthy_band {
            match descriptor.polarity {
                Polarity::HigherIsBetter if change > 0.0 => TrendDirection::Improving,
                Polarity::LowerIsBetter if change < 0.0 => TrendDirection::Improving,
                Polarity::Neutral => TrendDirection::Stable,
                _ => TrendDirection::Declining,
            }
        } else {
            TrendDirection::Stable
        };

        debug!(metric = %key, ?direction, magnitude, "trend classified");
        Some(Trend {
            direction,
            magnitude,
        })
    }
}
