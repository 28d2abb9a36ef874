// ABOUTME: Health analytics engine - summaries, trends, anomalies, correlations, insights
// ABOUTME: Library root wiring the analyzers, collaborator seams, and ambient concerns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalog Contributors

//! # Vitalog
//!
//! Analytics engine for a daily health journal. Feed it a user's
//! time-ordered log entries and it produces per-metric statistical
//! summaries, polarity-aware trend classifications, anomaly detections,
//! cross-metric correlations, and the structured payload handed to an
//! AI narrative generator.
//!
//! The engine is stateless per user: every analysis reads an immutable
//! log snapshot and derives fresh results. Storage, identity, and
//! rendering are external collaborators behind the [`store::LogStore`]
//! and [`llm::NarrativeGenerator`] seams.
//!
//! ## Example
//!
//! ```rust,no_run
//! use vitalog::analysis::Aggregator;
//! use vitalog::catalog::MetricKey;
//! use vitalog::models::HealthLog;
//!
//! let logs: Vec<HealthLog> = Vec::new(); // fetched from a LogStore
//! let summaries = Aggregator::summarize(&logs, MetricKey::ALL);
//! for (metric, summary) in &summaries {
//!     println!("{metric}: avg {}", summary.average);
//! }
//! ```

/// Analysis sub-computations (aggregation, trends, anomalies, correlation)
pub mod analysis;
/// Static metric registry
pub mod catalog;
/// Thresholds and tunables
pub mod config;
/// Error taxonomy
pub mod errors;
/// Insight orchestration
pub mod insights;
/// AI narrative generation seam
pub mod llm;
/// Structured logging setup
pub mod logging;
/// Domain types
pub mod models;
/// Log store seam
pub mod store;

pub use analysis::{Aggregator, AnomalyDetector, CorrelationAnalyzer, TrendClassifier};
pub use catalog::{MetricCatalog, MetricKey, Polarity, Precision};
pub use config::AnalyticsConfig;
pub use errors::{EngineError, EngineResult};
pub use insights::InsightOrchestrator;
pub use llm::{GroqProvider, NarrativeGenerator};
pub use models::{
    AnalysisWindow, Anomaly, Correlation, HealthLog, HealthSnapshot, Insight, MetricSummary,
    Severity, Trend, TrendDirection,
};
pub use store::{LogStore, MemoryLogStore};
