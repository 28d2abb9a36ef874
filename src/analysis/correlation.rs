// ABOUTME: Pairwise Pearson correlation between metrics across a log window
// ABOUTME: Date-aligned pairing with rayon fan-out over metric pairs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalog Contributors

//! Correlation analyzer
//!
//! For each metric pair, only dates where both metrics are present are
//! used (aligned by date, never by list index). Pairs below the sample
//! minimum or with a zero-variance series are omitted - an undefined
//! correlation is not reported as 0.

use crate::analysis::stats;
use crate::catalog::MetricKey;
use crate::config::CorrelationConfig;
use crate::models::{Correlation, HealthLog};
use rayon::prelude::*;

/// Metrics correlated by default, covering the journal's continuous
/// daily signals.
const DEFAULT_METRICS: &[MetricKey] = &[
    MetricKey::SleepHours,
    MetricKey::Steps,
    MetricKey::Mood,
    MetricKey::EnergyLevel,
    MetricKey::WaterIntakeLiters,
    MetricKey::HeartRateAvg,
    MetricKey::StressLevel,
];

/// Computes cross-metric linear correlations.
pub struct CorrelationAnalyzer {
    config: CorrelationConfig,
}

impl CorrelationAnalyzer {
    /// Analyzer with the given thresholds.
    #[must_use]
    pub const fn new(config: CorrelationConfig) -> Self {
        Self { config }
    }

    /// All unordered pairs of the default metric set.
    #[must_use]
    pub fn default_pairs() -> Vec<(MetricKey, MetricKey)> {
        let mut pairs = Vec::new();
        for (i, &a) in DEFAULT_METRICS.iter().enumerate() {
            for &b in &DEFAULT_METRICS[i + 1..] {
                pairs.push((a, b));
            }
        }
        pairs
    }

    /// Correlate the given metric pairs over `logs`.
    ///
    /// Output is ordered by pair (metric order), with omitted pairs
    /// simply absent.
    #[must_use]
    pub fn correlate(
        &self,
        logs: &[HealthLog],
        pairs: &[(MetricKey, MetricKey)],
    ) -> Vec<Correlation> {
        let mut correlations: Vec<Correlation> = pairs
            .par_iter()
            .filter_map(|&(a, b)| self.correlate_pair(logs, a, b))
            .collect();
        correlations.sort_by_key(|c| (c.metric_a, c.metric_b));
        correlations
    }

    fn correlate_pair(
        &self,
        logs: &[HealthLog],
        a: MetricKey,
        b: MetricKey,
    ) -> Option<Correlation> {
        let (xs, ys): (Vec<f64>, Vec<f64>) = logs
            .iter()
            .filter_map(|log| Some((log.metric(a)?, log.metric(b)?)))
            .unzip();

        if !stats::meets_minimum(xs.len(), self.config.min_paired_samples, a.as_str()) {
            return None;
        }
        let coefficient = stats::pearson(&xs, &ys)?;
        Some(Correlation {
            metric_a: a,
            metric_b: b,
            coefficient,
            sample_count: xs.len(),
        })
    }
}
