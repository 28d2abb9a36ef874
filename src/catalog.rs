// ABOUTME: Static metric registry describing every trackable health metric
// ABOUTME: Holds numeric domains, units, display precision, polarity, and healthy ranges
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalog Contributors

//! Metric catalog
//!
//! Every metric the journal can track is described here as declarative
//! data: its numeric domain, unit, display precision, polarity (whether
//! a higher value is healthier), and an optional healthy reference
//! range. Analyzers consult the catalog instead of branching on metric
//! names, so adding a metric is a data change, not a code change.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier for a tracked health metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    /// Hours slept (0-24)
    SleepHours,
    /// Subjective sleep quality (1-10)
    SleepQuality,
    /// Daily step count
    Steps,
    /// Average heart rate (bpm)
    HeartRateAvg,
    /// Maximum heart rate (bpm)
    HeartRateMax,
    /// Water intake (liters)
    WaterIntakeLiters,
    /// Calories consumed
    CaloriesConsumed,
    /// Subjective mood (1-10)
    Mood,
    /// Subjective energy level (1-10)
    EnergyLevel,
    /// Subjective stress level (1-10)
    StressLevel,
    /// Subjective pain level (1-10)
    PainLevel,
    /// Minutes of exercise
    ExerciseMinutes,
}

impl MetricKey {
    /// Every metric the catalog knows about.
    pub const ALL: &'static [Self] = &[
        Self::SleepHours,
        Self::SleepQuality,
        Self::Steps,
        Self::HeartRateAvg,
        Self::HeartRateMax,
        Self::WaterIntakeLiters,
        Self::CaloriesConsumed,
        Self::Mood,
        Self::EnergyLevel,
        Self::StressLevel,
        Self::PainLevel,
        Self::ExerciseMinutes,
    ];

    /// Snake-case wire name of the metric.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SleepHours => "sleep_hours",
            Self::SleepQuality => "sleep_quality",
            Self::Steps => "steps",
            Self::HeartRateAvg => "heart_rate_avg",
            Self::HeartRateMax => "heart_rate_max",
            Self::WaterIntakeLiters => "water_intake_liters",
            Self::CaloriesConsumed => "calories_consumed",
            Self::Mood => "mood",
            Self::EnergyLevel => "energy_level",
            Self::StressLevel => "stress_level",
            Self::PainLevel => "pain_level",
            Self::ExerciseMinutes => "exercise_minutes",
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("unknown metric key: '{s}'"))
    }
}

/// Whether increasing a metric's value is considered healthy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// More is healthier (steps, sleep, mood)
    HigherIsBetter,
    /// Less is healthier (stress, pain, resting heart rate)
    LowerIsBetter,
    /// No universal direction (calories consumed)
    Neutral,
}

/// Display precision for averages and extrema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    /// Whole numbers (steps, heart rate, calories)
    Integer,
    /// One decimal place (hours, liters, 1-10 scales)
    OneDecimal,
}

/// Declarative description of one trackable metric.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MetricDescriptor {
    /// Metric this descriptor applies to
    pub key: MetricKey,
    /// Human-readable unit label
    pub unit: &'static str,
    /// Valid value domain (inclusive)
    pub domain: (f64, f64),
    /// Rounding applied to derived statistics
    pub precision: Precision,
    /// Direction considered healthy
    pub polarity: Polarity,
    /// Recommended healthy range, when one is established; movement
    /// staying inside it carries no trend direction
    pub healthy_range: Option<(f64, f64)>,
    /// Smallest change considered meaningful when a relative
    /// comparison is impossible (zero baseline)
    pub min_meaningful_delta: f64,
}

const DESCRIPTORS: &[MetricDescriptor] = &[
    MetricDescriptor {
        key: MetricKey::SleepHours,
        unit: "hours",
        domain: (0.0, 24.0),
        precision: Precision::OneDecimal,
        polarity: Polarity::HigherIsBetter,
        healthy_range: Some((7.0, 9.0)),
        min_meaningful_delta: 0.5,
    },
    MetricDescriptor {
        key: MetricKey::SleepQuality,
        unit: "score",
        domain: (1.0, 10.0),
        precision: Precision::OneDecimal,
        polarity: Polarity::HigherIsBetter,
        healthy_range: None,
        min_meaningful_delta: 1.0,
    },
    MetricDescriptor {
        key: MetricKey::Steps,
        unit: "steps",
        domain: (0.0, 200_000.0),
        precision: Precision::Integer,
        polarity: Polarity::HigherIsBetter,
        healthy_range: Some((10_000.0, 200_000.0)),
        min_meaningful_delta: 500.0,
    },
    MetricDescriptor {
        key: MetricKey::HeartRateAvg,
        unit: "bpm",
        domain: (20.0, 250.0),
        precision: Precision::Integer,
        polarity: Polarity::LowerIsBetter,
        healthy_range: Some((60.0, 100.0)),
        min_meaningful_delta: 5.0,
    },
    MetricDescriptor {
        key: MetricKey::HeartRateMax,
        unit: "bpm",
        domain: (20.0, 250.0),
        precision: Precision::Integer,
        polarity: Polarity::LowerIsBetter,
        healthy_range: None,
        min_meaningful_delta: 5.0,
    },
    MetricDescriptor {
        key: MetricKey::WaterIntakeLiters,
        unit: "liters",
        domain: (0.0, 15.0),
        precision: Precision::OneDecimal,
        polarity: Polarity::HigherIsBetter,
        healthy_range: Some((2.0, 4.0)),
        min_meaningful_delta: 0.25,
    },
    MetricDescriptor {
        key: MetricKey::CaloriesConsumed,
        unit: "kcal",
        domain: (0.0, 20_000.0),
        precision: Precision::Integer,
        polarity: Polarity::Neutral,
        healthy_range: None,
        min_meaningful_delta: 100.0,
    },
    MetricDescriptor {
        key: MetricKey::Mood,
        unit: "score",
        domain: (1.0, 10.0),
        precision: Precision::OneDecimal,
        polarity: Polarity::HigherIsBetter,
        healthy_range: None,
        min_meaningful_delta: 1.0,
    },
    MetricDescriptor {
        key: MetricKey::EnergyLevel,
        unit: "score",
        domain: (1.0, 10.0),
        precision: Precision::OneDecimal,
        polarity: Polarity::HigherIsBetter,
        healthy_range: None,
        min_meaningful_delta: 1.0,
    },
    MetricDescriptor {
        key: MetricKey::StressLevel,
        unit: "score",
        domain: (1.0, 10.0),
        precision: Precision::OneDecimal,
        polarity: Polarity::LowerIsBetter,
        healthy_range: None,
        min_meaningful_delta: 1.0,
    },
    MetricDescriptor {
        key: MetricKey::PainLevel,
        unit: "score",
        domain: (1.0, 10.0),
        precision: Precision::OneDecimal,
        polarity: Polarity::LowerIsBetter,
        healthy_range: None,
        min_meaningful_delta: 1.0,
    },
    MetricDescriptor {
        key: MetricKey::ExerciseMinutes,
        unit: "minutes",
        domain: (0.0, 1440.0),
        precision: Precision::Integer,
        polarity: Polarity::HigherIsBetter,
        healthy_range: Some((30.0, 1440.0)),
        min_meaningful_delta: 10.0,
    },
];

/// Static registry of metric descriptors.
pub struct MetricCatalog;

impl MetricCatalog {
    /// Look up the descriptor for a metric.
    #[must_use]
    pub fn descriptor(key: MetricKey) -> &'static MetricDescriptor {
        // DESCRIPTORS covers MetricKey::ALL; the fallback is unreachable
        // but keeps the lookup panic-free.
        DESCRIPTORS
            .iter()
            .find(|d| d.key == key)
            .unwrap_or(&DESCRIPTORS[0])
    }

    /// All descriptors, in catalog order.
    #[must_use]
    pub fn all() -> &'static [MetricDescriptor] {
        DESCRIPTORS
    }
}
