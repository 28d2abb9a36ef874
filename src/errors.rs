// ABOUTME: Unified error taxonomy for the analytics engine
// ABOUTME: Separates "no data yet" from "analysis service unavailable" for callers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalog Contributors

//! Engine error taxonomy
//!
//! Statistical computations never error for "not enough data" - they
//! omit the affected metric. Only data access and external-call
//! failures surface as [`EngineError`] values, so a caller can always
//! distinguish "add data first" from "analysis service unavailable".

use crate::catalog::MetricKey;
use crate::models::AnalysisWindow;
use thiserror::Error;

/// Result alias used throughout the engine.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by the analytics engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The requested window contains zero logs. User-visible "add data
    /// first" condition; the engine never retries it.
    #[error("no health logs recorded in {window}; add journal entries before requesting analysis")]
    InsufficientData {
        /// Window that was queried
        window: AnalysisWindow,
    },

    /// A single-metric query targeted a metric with no present values
    /// in the window. Window-wide analyzer outputs never carry this as
    /// a failure; they omit the metric instead.
    #[error("metric '{metric}' has no recorded values in the requested window")]
    MetricUnavailable {
        /// Metric with no data
        metric: MetricKey,
    },

    /// The AI narrative generator (or another collaborator) failed or
    /// timed out. Retry policy belongs to the caller.
    #[error("{service} unavailable: {message}")]
    ExternalService {
        /// Collaborator that failed
        service: String,
        /// Transport or protocol detail
        message: String,
    },

    /// Invalid configuration or environment override.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The log store failed to serve a read.
    #[error("log store failure: {0}")]
    Store(String),
}

impl EngineError {
    /// Zero logs in the requested window.
    #[must_use]
    pub fn insufficient_data(window: AnalysisWindow) -> Self {
        Self::InsufficientData { window }
    }

    /// A single-metric query found no data for the metric.
    #[must_use]
    pub fn metric_unavailable(metric: MetricKey) -> Self {
        Self::MetricUnavailable { metric }
    }

    /// A collaborator transport/timeout failure.
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExternalService {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Invalid configuration value.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Log store read failure.
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// True when the caller may reasonably re-trigger the operation
    /// (transient collaborator failures, not missing data).
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ExternalService { .. } | Self::Store(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn window() -> AnalysisWindow {
        AnalysisWindow {
            start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap_or_default(),
        }
    }

    #[test]
    fn insufficient_data_message_tells_user_to_add_entries() {
        let err = EngineError::insufficient_data(window());
        assert!(err.to_string().contains("add journal entries"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn external_service_is_retryable() {
        let err = EngineError::external_service("narrative generator", "timed out");
        assert!(err.is_retryable());
        assert!(err.to_string().contains("narrative generator"));
    }
}
