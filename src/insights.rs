// ABOUTME: Insight orchestration - analyzers in, narrative out, atomic all-or-nothing
// ABOUTME: Fetches logs, assembles the snapshot, calls the AI generator under a timeout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalog Contributors

//! Insight orchestrator
//!
//! Ties the four analyzers together: fetch logs for a window, build a
//! [`HealthSnapshot`], send it to the narrative generator under an
//! explicit timeout, and wrap the result into a new [`Insight`]. An
//! `Insight` only comes into existence when narrative generation
//! succeeds; any failure or timeout leaves no partial state behind.
//! Calling [`InsightOrchestrator::generate`] twice for the same window
//! intentionally produces two distinct insights - the insight list is a
//! historical log, not a cache.

use crate::analysis::{Aggregator, AnomalyDetector, CorrelationAnalyzer, TrendClassifier};
use crate::catalog::MetricKey;
use crate::config::AnalyticsConfig;
use crate::errors::{EngineError, EngineResult};
use crate::llm::NarrativeGenerator;
use crate::models::{AnalysisWindow, HealthLog, HealthSnapshot, Insight};
use crate::store::LogStore;
use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Number of top symptom tags carried in a snapshot.
const TOP_SYMPTOM_LIMIT: usize = 5;

/// Generates persisted-ready insights from a user's log window.
pub struct InsightOrchestrator<S, G> {
    store: S,
    generator: G,
    config: AnalyticsConfig,
}

impl<S, G> InsightOrchestrator<S, G>
where
    S: LogStore,
    G: NarrativeGenerator,
{
    /// Orchestrator over a log store and a narrative generator.
    #[must_use]
    pub const fn new(store: S, generator: G, config: AnalyticsConfig) -> Self {
        Self {
            store,
            generator,
            config,
        }
    }

    /// Run all analyzers over an immutable log snapshot.
    ///
    /// Pure and synchronous; safe to call outside of insight
    /// generation (e.g. to serve dashboard data).
    #[must_use]
    pub fn analyze(&self, logs: &[HealthLog], window: AnalysisWindow) -> HealthSnapshot {
        let summaries = Aggregator::summarize(logs, MetricKey::ALL);
        let trends = TrendClassifier::new(self.config.trend.clone()).classify(logs, MetricKey::ALL);
        let anomalies = AnomalyDetector::new(self.config.anomaly.clone()).detect(logs);
        let correlations = CorrelationAnalyzer::new(self.config.correlation.clone())
            .correlate(logs, &CorrelationAnalyzer::default_pairs());
        let top_symptoms = Aggregator::top_symptoms(logs, TOP_SYMPTOM_LIMIT);

        debug!(
            summaries = summaries.len(),
            trends = trends.len(),
            anomalies = anomalies.len(),
            correlations = correlations.len(),
            "analysis complete"
        );

        HealthSnapshot {
            window,
            log_count: logs.len(),
            summaries,
            trends,
            anomalies,
            correlations,
            top_symptoms,
        }
    }

    /// Generate a new insight for a user and window.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InsufficientData`] when the window holds zero
    ///   logs (user should add entries first; never retried here).
    /// - [`EngineError::ExternalService`] when the narrative generator
    ///   fails or exceeds its timeout; no insight is produced.
    /// - [`EngineError::Store`] when the log store read fails.
    #[instrument(skip(self), fields(user = %user_id))]
    pub async fn generate(&self, user_id: Uuid, window: AnalysisWindow) -> EngineResult<Insight> {
        let snapshot = self.snapshot_for(user_id, window).await?;
        let narrative = self.narrate(self.generator.generate_narrative(&snapshot)).await?;

        info!(window = %window, "insight generated");
        Ok(Insight {
            id: Uuid::new_v4(),
            user_id,
            generated_at: Utc::now(),
            window,
            narrative,
            snapshot,
        })
    }

    /// Generate a short reminder for a user and window. Nothing is
    /// persisted; the text goes straight back to the caller.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::generate`].
    #[instrument(skip(self), fields(user = %user_id))]
    pub async fn generate_reminder(
        &self,
        user_id: Uuid,
        window: AnalysisWindow,
    ) -> EngineResult<String> {
        let snapshot = self.snapshot_for(user_id, window).await?;
        self.narrate(self.generator.generate_reminder(&snapshot)).await
    }

    /// Fetch the window's logs and analyze them.
    async fn snapshot_for(
        &self,
        user_id: Uuid,
        window: AnalysisWindow,
    ) -> EngineResult<HealthSnapshot> {
        let logs = self
            .store
            .fetch_logs(user_id, window.start, window.end)
            .await?;
        if logs.is_empty() {
            return Err(EngineError::insufficient_data(window));
        }
        Ok(self.analyze(&logs, window))
    }

    /// Await a narrative future under the configured timeout.
    async fn narrate(
        &self,
        narrative: impl std::future::Future<Output = EngineResult<String>> + Send,
    ) -> EngineResult<String> {
        let timeout = self.config.narrative_timeout();
        tokio::time::timeout(timeout, narrative)
            .await
            .map_err(|_| {
                EngineError::external_service(
                    "narrative generator",
                    format!("timed out after {}s", timeout.as_secs()),
                )
            })?
    }
}
