// ABOUTME: Out-of-distribution value detection and rule-based composite risk patterns
// ABOUTME: Leave-one-out z-scores plus a declarative cross-metric rule table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalog Contributors

//! Anomaly detector
//!
//! Two independent strategies evaluated per log entry against the rest
//! of the window:
//!
//! 1. **Statistical outliers** - each metric value is compared against
//!    the window's mean and sample standard deviation computed with the
//!    entry itself excluded (no self-bias). Metrics with too few
//!    comparison points or zero spread are skipped.
//! 2. **Composite rules** - declarative cross-metric conditions
//!    (condition + type + severity). Rules evaluate independently; one
//!    entry may trigger several.
//!
//! Output is capped and ordered highest severity first, then most
//! recent first. `type`, `severity`, and `date` are contractual and
//! deterministic; description wording is presentational.

use crate::analysis::stats;
use crate::catalog::{MetricCatalog, MetricKey};
use crate::config::AnomalyConfig;
use crate::models::{Anomaly, HealthLog, Severity};
use std::cmp::Reverse;
use tracing::debug;

/// Comparison operator for a rule condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Value strictly below the bound
    LessThan,
    /// Value at or below the bound
    AtMost,
    /// Value strictly above the bound
    GreaterThan,
    /// Value at or above the bound
    AtLeast,
}

impl Comparison {
    const fn holds(self, value: f64, bound: f64) -> bool {
        match self {
            Self::LessThan => value < bound,
            Self::AtMost => value <= bound,
            Self::GreaterThan => value > bound,
            Self::AtLeast => value >= bound,
        }
    }
}

/// A single metric condition inside a composite rule.
#[derive(Debug, Clone, Copy)]
pub struct MetricCondition {
    /// Metric inspected
    pub metric: MetricKey,
    /// Operator applied
    pub op: Comparison,
    /// Threshold compared against
    pub bound: f64,
}

/// Declarative cross-metric risk rule. Fires only when every condition
/// holds on metrics present in the entry.
#[derive(Debug, Clone, Copy)]
pub struct CompositeRule {
    /// Stable anomaly type tag emitted when the rule fires
    pub id: &'static str,
    /// Severity of the emitted anomaly
    pub severity: Severity,
    /// Conditions, all of which must hold
    pub conditions: &'static [MetricCondition],
}

/// Dangerously low sleep combined with very high stress.
const SLEEP_STRESS_RISK: CompositeRule = CompositeRule {
    id: "sleep_stress_risk",
    severity: Severity::High,
    conditions: &[
        MetricCondition {
            metric: MetricKey::SleepHours,
            op: Comparison::LessThan,
            bound: 4.0,
        },
        MetricCondition {
            metric: MetricKey::StressLevel,
            op: Comparison::AtLeast,
            bound: 8.0,
        },
    ],
};

/// Elevated average heart rate on a day without exercise.
const ELEVATED_RESTING_HEART_RATE: CompositeRule = CompositeRule {
    id: "elevated_resting_heart_rate",
    severity: Severity::Medium,
    conditions: &[
        MetricCondition {
            metric: MetricKey::HeartRateAvg,
            op: Comparison::GreaterThan,
            bound: 100.0,
        },
        MetricCondition {
            metric: MetricKey::ExerciseMinutes,
            op: Comparison::AtMost,
            bound: 0.0,
        },
    ],
};

/// Very low self-reported mood.
const LOW_MOOD: CompositeRule = CompositeRule {
    id: "low_mood",
    severity: Severity::High,
    conditions: &[MetricCondition {
        metric: MetricKey::Mood,
        op: Comparison::AtMost,
        bound: 3.0,
    }],
};

/// The built-in composite risk rules.
#[must_use]
pub fn default_rules() -> Vec<CompositeRule> {
    vec![SLEEP_STRESS_RISK, ELEVATED_RESTING_HEART_RATE, LOW_MOOD]
}

/// Detects statistical outliers and composite risk patterns.
pub struct AnomalyDetector {
    config: AnomalyConfig,
    rules: Vec<CompositeRule>,
}

impl AnomalyDetector {
    /// Detector with the built-in rule set.
    #[must_use]
    pub fn new(config: AnomalyConfig) -> Self {
        Self {
            config,
            rules: default_rules(),
        }
    }

    /// Detector with a custom rule set.
    #[must_use]
    pub const fn with_rules(config: AnomalyConfig, rules: Vec<CompositeRule>) -> Self {
        Self { config, rules }
    }

    /// Detect anomalies across `logs`, capped at the configured
    /// maximum, ordered severity descending then date descending.
    #[must_use]
    pub fn detect(&self, logs: &[HealthLog]) -> Vec<Anomaly> {
        let mut anomalies = Vec::new();

        for (index, log) in logs.iter().enumerate() {
            self.detect_outliers(logs, index, log, &mut anomalies);
            self.apply_rules(log, &mut anomalies);
        }

        anomalies.sort_by_key(|a| (Reverse(a.severity), Reverse(a.date)));
        if anomalies.len() > self.config.max_reported {
            debug!(
                found = anomalies.len(),
                cap = self.config.max_reported,
                "anomaly output capped"
            );
            anomalies.truncate(self.config.max_reported);
        }
        anomalies
    }

    /// Leave-one-out z-score check of every metric present in `log`.
    fn detect_outliers(
        &self,
        logs: &[HealthLog],
        index: usize,
        log: &HealthLog,
        out: &mut Vec<Anomaly>,
    ) {
        for &key in MetricKey::ALL {
            let Some(value) = log.metric(key) else {
                continue;
            };

            let comparison: Vec<f64> = logs
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .filter_map(|(_, other)| other.metric(key))
                .collect();

            if !stats::meets_minimum(
                comparison.len(),
                self.config.min_comparison_samples,
                key.as_str(),
            ) {
                continue;
            }
            let (Some(mean), Some(sd)) = (stats::mean(&comparison), stats::std_dev(&comparison))
            else {
                continue;
            };
            // Constant comparison data cannot be meaningfully compared.
            if sd < f64::EPSILON {
                continue;
            }

            let z = (value - mean) / sd;
            if z.abs() <= self.config.z_score_threshold {
                continue;
            }

            let severity = if z.abs() > self.config.severe_z_score_threshold {
                Severity::High
            } else {
                Severity::Medium
            };
            let descriptor = MetricCatalog::descriptor(key);
            out.push(Anomaly {
                anomaly_type: format!("{key}_outlier"),
                severity,
                description: format!(
                    "unusual {key}: {} {} on {} (window mean {}, {:.1} sd away)",
                    stats::round_to(value, descriptor.precision),
                    descriptor.unit,
                    log.date,
                    stats::round_to(mean, descriptor.precision),
                    z.abs(),
                ),
                date: log.date,
                value,
            });
        }
    }

    /// Evaluate every composite rule against one entry.
    fn apply_rules(&self, log: &HealthLog, out: &mut Vec<Anomaly>) {
        for rule in &self.rules {
            let satisfied = rule
                .conditions
                .iter()
                .all(|c| log.metric(c.metric).is_some_and(|v| c.op.holds(v, c.bound)));
            if !satisfied {
                continue;
            }

            let triggering = rule
                .conditions
                .iter()
                .filter_map(|c| {
                    log.metric(c.metric)
                        .map(|v| format!("{} {v}", c.metric))
                })
                .collect::<Vec<_>>()
                .join(", ");
            let value = rule
                .conditions
                .first()
                .and_then(|c| log.metric(c.metric))
                .unwrap_or_default();

            out.push(Anomaly {
                anomaly_type: rule.id.to_owned(),
                severity: rule.severity,
                description: format!("{}: {triggering} on {}", rule.id, log.date),
                date: log.date,
                value,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, d).unwrap()
    }

    fn detector(min_comparison: usize) -> AnomalyDetector {
        AnomalyDetector::new(AnomalyConfig {
            z_score_threshold: 2.0,
            severe_z_score_threshold: 3.0,
            min_comparison_samples: min_comparison,
            max_reported: 20,
        })
    }

    fn sleep_logs(values: &[f64]) -> Vec<HealthLog> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| HealthLog {
                sleep_hours: Some(*v),
                ..HealthLog::new(Uuid::nil(), day(1 + i as u32))
            })
            .collect()
    }

    #[test]
    fn constant_series_never_flags_outliers() {
        let logs = sleep_logs(&[7.0; 10]);
        assert!(detector(5).detect(&logs).is_empty());
    }

    #[test]
    fn leave_one_out_flags_the_deviant_day() {
        let logs = sleep_logs(&[8.0, 3.0, 8.0, 7.0]);
        let anomalies = detector(3).detect(&logs);
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].anomaly_type, "sleep_hours_outlier");
        assert_eq!(anomalies[0].date, day(2));
        assert!((anomalies[0].value - 3.0).abs() < 1e-9);
        assert_eq!(anomalies[0].severity, Severity::High);
    }

    #[test]
    fn too_few_comparison_points_are_skipped() {
        let logs = sleep_logs(&[8.0, 3.0, 8.0, 7.0]);
        // Default minimum (5) exceeds the 3 available comparison points.
        assert!(detector(5).detect(&logs).is_empty());
    }

    #[test]
    fn sleep_stress_rule_fires_high_severity() {
        let mut log = HealthLog::new(Uuid::nil(), day(1));
        log.sleep_hours = Some(3.5);
        log.stress_level = Some(9.0);
        let anomalies = detector(5).detect(&[log]);
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].anomaly_type, "sleep_stress_risk");
        assert_eq!(anomalies[0].severity, Severity::High);
    }

    #[test]
    fn rule_does_not_fire_on_absent_metric() {
        let mut log = HealthLog::new(Uuid::nil(), day(1));
        log.sleep_hours = Some(3.5);
        // stress_level absent: sleep_stress_risk must not fire.
        assert!(detector(5).detect(&[log]).is_empty());
    }

    #[test]
    fn one_entry_can_trigger_multiple_rules() {
        let mut log = HealthLog::new(Uuid::nil(), day(1));
        log.sleep_hours = Some(3.0);
        log.stress_level = Some(9.0);
        log.mood = Some(2.0);
        let types: Vec<String> = detector(5)
            .detect(&[log])
            .into_iter()
            .map(|a| a.anomaly_type)
            .collect();
        assert!(types.contains(&"sleep_stress_risk".to_owned()));
        assert!(types.contains(&"low_mood".to_owned()));
    }

    #[test]
    fn output_is_capped_and_sorted_by_severity_then_recency() {
        let mut logs = Vec::new();
        for d in 1..=6 {
            let mut log = HealthLog::new(Uuid::nil(), day(d));
            log.mood = Some(2.0); // high severity each day
            log.heart_rate_avg = Some(110.0);
            log.exercise_minutes = Some(0.0); // medium severity each day
            logs.push(log);
        }
        let detector = AnomalyDetector::new(AnomalyConfig {
            z_score_threshold: 2.0,
            severe_z_score_threshold: 3.0,
            min_comparison_samples: 5,
            max_reported: 4,
        });
        let anomalies = detector.detect(&logs);
        assert_eq!(anomalies.len(), 4);
        // All high severity (low_mood), newest first.
        assert!(anomalies.iter().all(|a| a.severity == Severity::High));
        assert_eq!(anomalies[0].date, day(6));
        assert!(anomalies[0].date > anomalies[3].date);
    }
}
