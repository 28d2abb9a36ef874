// ABOUTME: Per-metric statistical summaries over a log window
// ABOUTME: Averages, extrema, chart series, and symptom frequency extraction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalog Contributors

//! Aggregator
//!
//! Computes `{average, min, max, sample_count}` per metric over an
//! immutable log window. Metrics with zero present values are omitted
//! entirely - a metric with no data must never silently appear as a
//! zero-filled summary. All statistics are order-independent over the
//! same log set.

use crate::analysis::stats;
use crate::catalog::{MetricCatalog, MetricKey};
use crate::errors::{EngineError, EngineResult};
use crate::models::{HealthLog, MetricSummary, SymptomFrequency};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Stateless summary computation over log windows.
pub struct Aggregator;

impl Aggregator {
    /// Summarize the requested metrics over `logs`.
    ///
    /// Metrics without any present value are absent from the result.
    /// Averages and extrema are rounded to each metric's display
    /// precision (half away from zero).
    #[must_use]
    pub fn summarize(
        logs: &[HealthLog],
        keys: &[MetricKey],
    ) -> BTreeMap<MetricKey, MetricSummary> {
        let mut summaries = BTreeMap::new();

        for &key in keys {
            let values: Vec<f64> = logs.iter().filter_map(|log| log.metric(key)).collect();
            let Some(average) = stats::mean(&values) else {
                debug!(metric = %key, "no recorded values; metric omitted from summary");
                continue;
            };

            let precision = MetricCatalog::descriptor(key).precision;
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

            summaries.insert(
                key,
                MetricSummary {
                    average: stats::round_to(average, precision),
                    min: stats::round_to(min, precision),
                    max: stats::round_to(max, precision),
                    sample_count: values.len(),
                },
            );
        }

        summaries
    }

    /// Summary for a single requested metric, for per-metric queries
    /// where the caller named the metric explicitly.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MetricUnavailable`] when the metric has
    /// no present value in `logs`. Window-wide summaries handle the
    /// same absence by omission instead.
    pub fn summarize_metric(logs: &[HealthLog], key: MetricKey) -> EngineResult<MetricSummary> {
        Self::summarize(logs, &[key])
            .remove(&key)
            .ok_or_else(|| EngineError::metric_unavailable(key))
    }

    /// Date-aligned `(date, value)` series for one metric, suitable for
    /// charting. Entries without the metric are dropped; order follows
    /// the date, ascending.
    #[must_use]
    pub fn series(logs: &[HealthLog], key: MetricKey) -> Vec<(NaiveDate, f64)> {
        let mut points: Vec<(NaiveDate, f64)> = logs
            .iter()
            .filter_map(|log| log.metric(key).map(|value| (log.date, value)))
            .collect();
        points.sort_by_key(|(date, _)| *date);
        points
    }

    /// Most frequent symptom tags across the window, most frequent
    /// first (ties broken alphabetically), capped at `limit`.
    #[must_use]
    pub fn top_symptoms(logs: &[HealthLog], limit: usize) -> Vec<SymptomFrequency> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for log in logs {
            for symptom in &log.symptoms {
                *counts.entry(symptom.as_str()).or_insert(0) += 1;
            }
        }

        let mut frequencies: Vec<SymptomFrequency> = counts
            .into_iter()
            .map(|(name, occurrences)| SymptomFrequency {
                name: name.to_owned(),
                occurrences,
            })
            .collect();
        frequencies.sort_by(|a, b| {
            b.occurrences
                .cmp(&a.occurrences)
                .then_with(|| a.name.cmp(&b.name))
        });
        frequencies.truncate(limit);
        frequencies
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use uuid::Uuid;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn sleep_log(d: u32, hours: f64) -> HealthLog {
        HealthLog {
            sleep_hours: Some(hours),
            ..HealthLog::new(Uuid::nil(), day(d))
        }
    }

    #[test]
    fn absent_metric_is_omitted_not_zeroed() {
        let logs = vec![sleep_log(1, 8.0), sleep_log(2, 7.0)];
        let summaries = Aggregator::summarize(&logs, MetricKey::ALL);
        assert!(summaries.contains_key(&MetricKey::SleepHours));
        assert!(!summaries.contains_key(&MetricKey::Steps));
        assert!(!summaries.contains_key(&MetricKey::Mood));
    }

    #[test]
    fn summary_rounds_to_display_precision() {
        // Steps use integer precision, sleep one decimal.
        let logs = vec![
            HealthLog {
                sleep_hours: Some(7.25),
                steps: Some(10_333.0),
                ..HealthLog::new(Uuid::nil(), day(1))
            },
            HealthLog {
                sleep_hours: Some(6.4),
                steps: Some(8_400.0),
                ..HealthLog::new(Uuid::nil(), day(2))
            },
        ];
        let summaries = Aggregator::summarize(&logs, MetricKey::ALL);
        let sleep = &summaries[&MetricKey::SleepHours];
        assert!((sleep.average - 6.8).abs() < 1e-9); // 6.825 -> 6.8
        let steps = &summaries[&MetricKey::Steps];
        assert!((steps.average - 9367.0).abs() < 1e-9); // 9366.5 rounds half up
        assert_eq!(steps.sample_count, 2);
    }

    #[test]
    fn single_metric_query_errors_when_metric_is_absent() {
        let logs = vec![sleep_log(1, 8.0), sleep_log(2, 7.0)];

        let summary = Aggregator::summarize_metric(&logs, MetricKey::SleepHours).unwrap();
        assert_eq!(summary.sample_count, 2);

        let err = Aggregator::summarize_metric(&logs, MetricKey::Steps).unwrap_err();
        assert!(
            matches!(err, EngineError::MetricUnavailable { metric } if metric == MetricKey::Steps)
        );
    }

    #[test]
    fn series_drops_missing_values_and_sorts_by_date() {
        let logs = vec![
            sleep_log(3, 6.0),
            HealthLog::new(Uuid::nil(), day(2)),
            sleep_log(1, 8.0),
        ];
        let series = Aggregator::series(&logs, MetricKey::SleepHours);
        assert_eq!(series, vec![(day(1), 8.0), (day(3), 6.0)]);
    }

    #[test]
    fn top_symptoms_ranks_by_frequency_then_name() {
        let mut a = HealthLog::new(Uuid::nil(), day(1));
        a.symptoms = vec!["headache".into(), "fatigue".into()];
        let mut b = HealthLog::new(Uuid::nil(), day(2));
        b.symptoms = vec!["headache".into(), "nausea".into()];

        let top = Aggregator::top_symptoms(&[a, b], 2);
        assert_eq!(top[0].name, "headache");
        assert_eq!(top[0].occurrences, 2);
        assert_eq!(top[1].name, "fatigue");
        assert_eq!(top.len(), 2);
    }
}
