// ABOUTME: Configuration-driven thresholds for all analysis algorithms
// ABOUTME: Defaults, VITALOG_* environment overrides, and validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalog Contributors

//! Analytics configuration
//!
//! Every threshold the analyzers use (stability band, outlier z-score
//! bands, minimum sample counts, anomaly cap, narrative timeout) lives
//! here rather than inline in the algorithms. Defaults match the
//! documented engine behavior; each value can be overridden through a
//! `VITALOG_*` environment variable.

use crate::errors::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Trend classification parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendConfig {
    /// Minimum data points before a metric gets a trend at all
    pub min_samples: usize,
    /// Relative changes below this are reported as stable
    pub stability_threshold: f64,
}

/// Anomaly detection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyConfig {
    /// Z-score beyond which a value is an outlier
    pub z_score_threshold: f64,
    /// Z-score beyond which an outlier is high severity
    pub severe_z_score_threshold: f64,
    /// Minimum comparison points (window excluding the tested entry)
    pub min_comparison_samples: usize,
    /// Cap on reported anomalies per analysis
    pub max_reported: usize,
}

/// Correlation analysis parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationConfig {
    /// Minimum date-aligned sample pairs per metric pair
    pub min_paired_samples: usize,
}

/// Narrative generation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeConfig {
    /// Hard timeout on the external narrative call
    pub timeout_secs: u64,
    /// Sampling temperature passed to the model
    pub temperature: f32,
    /// Token budget for the narrative
    pub max_tokens: u32,
}

/// Root engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Trend classification parameters
    pub trend: TrendConfig,
    /// Anomaly detection parameters
    pub anomaly: AnomalyConfig,
    /// Correlation analysis parameters
    pub correlation: CorrelationConfig,
    /// Narrative generation parameters
    pub narrative: NarrativeConfig,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            trend: TrendConfig {
                min_samples: 4,
                stability_threshold: 0.05,
            },
            anomaly: AnomalyConfig {
                z_score_threshold: 2.0,
                severe_z_score_threshold: 3.0,
                min_comparison_samples: 5,
                max_reported: 20,
            },
            correlation: CorrelationConfig {
                min_paired_samples: 5,
            },
            narrative: NarrativeConfig {
                timeout_secs: 30,
                temperature: 0.7,
                max_tokens: 1000,
            },
        }
    }
}

fn env_override<T: std::str::FromStr>(var: &str, slot: &mut T) -> EngineResult<()> {
    if let Ok(raw) = std::env::var(var) {
        *slot = raw
            .parse()
            .map_err(|_| EngineError::config(format!("{var} has invalid value '{raw}'")))?;
    }
    Ok(())
}

impl AnalyticsConfig {
    /// Load configuration from the environment, falling back to
    /// defaults for anything unset.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] when an override cannot be
    /// parsed or the resulting configuration fails validation.
    pub fn from_environment() -> EngineResult<Self> {
        let mut config = Self::default();

        env_override("VITALOG_TREND_MIN_SAMPLES", &mut config.trend.min_samples)?;
        env_override(
            "VITALOG_STABILITY_THRESHOLD",
            &mut config.trend.stability_threshold,
        )?;
        env_override(
            "VITALOG_OUTLIER_Z_THRESHOLD",
            &mut config.anomaly.z_score_threshold,
        )?;
        env_override(
            "VITALOG_SEVERE_Z_THRESHOLD",
            &mut config.anomaly.severe_z_score_threshold,
        )?;
        env_override(
            "VITALOG_MIN_COMPARISON_SAMPLES",
            &mut config.anomaly.min_comparison_samples,
        )?;
        env_override("VITALOG_MAX_ANOMALIES", &mut config.anomaly.max_reported)?;
        env_override(
            "VITALOG_MIN_PAIRED_SAMPLES",
            &mut config.correlation.min_paired_samples,
        )?;
        env_override(
            "VITALOG_NARRATIVE_TIMEOUT_SECS",
            &mut config.narrative.timeout_secs,
        )?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] for out-of-range values.
    pub fn validate(&self) -> EngineResult<()> {
        if self.trend.min_samples < 2 {
            return Err(EngineError::config("trend.min_samples must be >= 2"));
        }
        if !(0.0..1.0).contains(&self.trend.stability_threshold)
            || self.trend.stability_threshold <= 0.0
        {
            return Err(EngineError::config(
                "trend.stability_threshold must be in (0, 1)",
            ));
        }
        if self.anomaly.z_score_threshold <= 0.0 {
            return Err(EngineError::config("anomaly.z_score_threshold must be > 0"));
        }
        if self.anomaly.severe_z_score_threshold <= self.anomaly.z_score_threshold {
            return Err(EngineError::config(
                "anomaly.severe_z_score_threshold must exceed z_score_threshold",
            ));
        }
        if self.anomaly.min_comparison_samples < 2 {
            return Err(EngineError::config(
                "anomaly.min_comparison_samples must be >= 2",
            ));
        }
        if self.anomaly.max_reported == 0 {
            return Err(EngineError::config("anomaly.max_reported must be > 0"));
        }
        if self.correlation.min_paired_samples < 3 {
            return Err(EngineError::config(
                "correlation.min_paired_samples must be >= 3",
            ));
        }
        if self.narrative.timeout_secs == 0 {
            return Err(EngineError::config("narrative.timeout_secs must be > 0"));
        }
        if !(0.0..=2.0).contains(&self.narrative.temperature) {
            return Err(EngineError::config(
                "narrative.temperature must be in [0, 2]",
            ));
        }
        Ok(())
    }

    /// Narrative timeout as a [`Duration`].
    #[must_use]
    pub const fn narrative_timeout(&self) -> Duration {
        Duration::from_secs(self.narrative.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use serial_test::serial;

    #[test]
    fn defaults_are_valid() {
        let config = AnalyticsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.trend.min_samples, 4);
        assert!((config.trend.stability_threshold - 0.05).abs() < f64::EPSILON);
        assert_eq!(config.anomaly.min_comparison_samples, 5);
        assert_eq!(config.correlation.min_paired_samples, 5);
    }

    #[test]
    fn severe_band_must_exceed_outlier_band() {
        let mut config = AnalyticsConfig::default();
        config.anomaly.severe_z_score_threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn environment_overrides_apply() {
        std::env::set_var("VITALOG_STABILITY_THRESHOLD", "0.10");
        std::env::set_var("VITALOG_MAX_ANOMALIES", "7");
        let config = AnalyticsConfig::from_environment().unwrap();
        std::env::remove_var("VITALOG_STABILITY_THRESHOLD");
        std::env::remove_var("VITALOG_MAX_ANOMALIES");

        assert!((config.trend.stability_threshold - 0.10).abs() < f64::EPSILON);
        assert_eq!(config.anomaly.max_reported, 7);
    }

    #[test]
    #[serial]
    fn invalid_override_is_rejected() {
        std::env::set_var("VITALOG_OUTLIER_Z_THRESHOLD", "not-a-number");
        let result = AnalyticsConfig::from_environment();
        std::env::remove_var("VITALOG_OUTLIER_Z_THRESHOLD");
        assert!(result.is_err());
    }
}
