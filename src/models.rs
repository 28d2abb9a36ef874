// ABOUTME: Domain types for health logs and derived analysis results
// ABOUTME: HealthLog snapshots in, summaries/trends/anomalies/correlations/insights out
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalog Contributors

//! Domain model
//!
//! [`HealthLog`] is the immutable per-day journal entry the engine
//! reads; everything else here is derived per analysis call. Only
//! [`Insight`] is meant to be persisted (by the caller), and a new
//! analysis always produces a new `Insight` rather than mutating a
//! prior one.

use crate::catalog::MetricKey;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// One user's journal entry for one day.
///
/// All metric fields are optional; an absent value means the metric was
/// not recorded that day and is excluded from statistics (never treated
/// as zero). At most one log exists per (user, date) - the log store
/// collaborator enforces that invariant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthLog {
    /// Owning user
    pub user_id: Uuid,
    /// Day the entry covers (unique per user)
    pub date: NaiveDate,
    /// Hours slept
    pub sleep_hours: Option<f64>,
    /// Subjective sleep quality (1-10)
    pub sleep_quality: Option<f64>,
    /// Step count
    pub steps: Option<f64>,
    /// Average heart rate (bpm)
    pub heart_rate_avg: Option<f64>,
    /// Maximum heart rate (bpm)
    pub heart_rate_max: Option<f64>,
    /// Water intake (liters)
    pub water_intake_liters: Option<f64>,
    /// Calories consumed
    pub calories_consumed: Option<f64>,
    /// Subjective mood (1-10)
    pub mood: Option<f64>,
    /// Subjective energy level (1-10)
    pub energy_level: Option<f64>,
    /// Subjective stress level (1-10)
    pub stress_level: Option<f64>,
    /// Subjective pain level (1-10)
    pub pain_level: Option<f64>,
    /// Minutes of exercise
    pub exercise_minutes: Option<f64>,
    /// Symptom tags recorded that day
    #[serde(default)]
    pub symptoms: Vec<String>,
    /// Free-text notes
    pub notes: Option<String>,
}

impl HealthLog {
    /// Empty log for a user and day.
    #[must_use]
    pub fn new(user_id: Uuid, date: NaiveDate) -> Self {
        Self {
            user_id,
            date,
            ..Self::default()
        }
    }

    /// Value of a metric in this entry, if recorded.
    #[must_use]
    pub const fn metric(&self, key: MetricKey) -> Option<f64> {
        match key {
            MetricKey::SleepHours => self.sleep_hours,
            MetricKey::SleepQuality => self.sleep_quality,
            MetricKey::Steps => self.steps,
            MetricKey::HeartRateAvg => self.heart_rate_avg,
            MetricKey::HeartRateMax => self.heart_rate_max,
            MetricKey::WaterIntakeLiters => self.water_intake_liters,
            MetricKey::CaloriesConsumed => self.calories_consumed,
            MetricKey::Mood => self.mood,
            MetricKey::EnergyLevel => self.energy_level,
            MetricKey::StressLevel => self.stress_level,
            MetricKey::PainLevel => self.pain_level,
            MetricKey::ExerciseMinutes => self.exercise_minutes,
        }
    }
}

/// Contiguous date range (inclusive) used as analysis input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisWindow {
    /// First day of the window
    pub start: NaiveDate,
    /// Last day of the window
    pub end: NaiveDate,
}

impl AnalysisWindow {
    /// Window covering the `days` days ending at `end` (inclusive).
    #[must_use]
    pub fn ending_at(end: NaiveDate, days: u32) -> Self {
        let span = i64::from(days.saturating_sub(1));
        Self {
            start: end - chrono::Duration::days(span),
            end,
        }
    }

    /// Number of days covered, inclusive of both endpoints.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for AnalysisWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window {}..={}", self.start, self.end)
    }
}

/// Per-metric statistical summary over a window. Derived, ephemeral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    /// Arithmetic mean, rounded to the metric's display precision
    pub average: f64,
    /// Minimum present value, same rounding
    pub min: f64,
    /// Maximum present value, same rounding
    pub max: f64,
    /// Number of logs where the metric was present
    pub sample_count: usize,
}

/// Direction of a metric's movement across a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// Moving in the metric's healthy direction
    Improving,
    /// Moving against the metric's healthy direction
    Declining,
    /// Change within the stability band
    Stable,
}

/// Trend classification for one metric. Always relative to a specific
/// window; recomputed each call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    /// Polarity-aware direction
    pub direction: TrendDirection,
    /// Relative change between window halves (later vs earlier); when
    /// the earlier half averages zero this is the absolute change
    pub magnitude: f64,
}

/// Qualitative anomaly risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Worth surfacing
    Medium,
    /// Needs attention
    High,
}

/// A flagged out-of-distribution value or rule-based risk pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    /// Stable anomaly type tag, e.g. `sleep_hours_outlier`
    pub anomaly_type: String,
    /// Risk tier
    pub severity: Severity,
    /// Human-readable description (presentation detail)
    pub description: String,
    /// Day of the triggering entry
    pub date: NaiveDate,
    /// Triggering value
    pub value: f64,
}

/// Pairwise linear correlation between two metrics across a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    /// First metric of the pair
    pub metric_a: MetricKey,
    /// Second metric of the pair
    pub metric_b: MetricKey,
    /// Pearson coefficient in [-1, 1]
    pub coefficient: f64,
    /// Number of date-aligned samples used
    pub sample_count: usize,
}

/// A recurring symptom tag and how often it appeared in the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomFrequency {
    /// Symptom tag as logged
    pub name: String,
    /// Number of logs carrying the tag
    pub occurrences: usize,
}

/// Structured analysis payload handed to the AI narrative generator and
/// stored alongside the narrative it produced.
///
/// Raw logs are deliberately not included: the snapshot bounds payload
/// size and avoids leaking unnecessary detail to the external service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    /// Window the analysis covers
    pub window: AnalysisWindow,
    /// Number of logs analyzed
    pub log_count: usize,
    /// Per-metric summaries (metrics with no data are absent)
    pub summaries: BTreeMap<MetricKey, MetricSummary>,
    /// Per-metric trends (metrics below the sample minimum are absent)
    pub trends: BTreeMap<MetricKey, Trend>,
    /// Detected anomalies, highest severity and most recent first
    pub anomalies: Vec<Anomaly>,
    /// Cross-metric correlations that met the sample minimum
    pub correlations: Vec<Correlation>,
    /// Most frequent symptom tags, most frequent first
    pub top_symptoms: Vec<SymptomFrequency>,
}

/// A persisted, timestamped narrative plus the statistical snapshot it
/// was generated from. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// Insight identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Generation timestamp
    pub generated_at: DateTime<Utc>,
    /// Source window
    pub window: AnalysisWindow,
    /// Narrative text returned by the AI generator, stored verbatim
    pub narrative: String,
    /// Snapshot the narrative was built from
    pub snapshot: HealthSnapshot,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn metric_accessor_maps_every_key() {
        let mut log = HealthLog::new(Uuid::new_v4(), NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert!(MetricKey::ALL.iter().all(|k| log.metric(*k).is_none()));

        log.sleep_hours = Some(7.5);
        log.stress_level = Some(4.0);
        assert_eq!(log.metric(MetricKey::SleepHours), Some(7.5));
        assert_eq!(log.metric(MetricKey::StressLevel), Some(4.0));
        assert_eq!(log.metric(MetricKey::Steps), None);
    }

    #[test]
    fn window_days_is_inclusive() {
        let end = NaiveDate::from_ymd_opt(2025, 3, 30).unwrap();
        let window = AnalysisWindow::ending_at(end, 30);
        assert_eq!(window.days(), 30);
        assert_eq!(window.start, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    }

    #[test]
    fn severity_orders_medium_below_high() {
        assert!(Severity::Medium < Severity::High);
    }

    #[test]
    fn enums_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&TrendDirection::Improving).unwrap(),
            "\"improving\""
        );
        assert_eq!(serde_json::to_string(&Severity::High).unwrap(), "\"high\"");
        assert_eq!(
            serde_json::to_string(&MetricKey::SleepHours).unwrap(),
            "\"sleep_hours\""
        );
    }
}
