// ABOUTME: Analysis sub-computations over an immutable log snapshot
// ABOUTME: Aggregation, trend classification, anomaly detection, correlation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalog Contributors

//! Analysis engine
//!
//! The four analyzers are read-only over the same immutable log
//! snapshot and have no mutual dependency; the orchestrator is free to
//! run them in any order.

/// Per-metric statistical summaries
pub mod aggregator;
/// Outlier and composite-risk detection
pub mod anomaly;
/// Cross-metric correlation
pub mod correlation;
/// Shared statistical primitives
pub mod stats;
/// Polarity-aware trend classification
pub mod trends;

pub use aggregator::Aggregator;
pub use anomaly::{AnomalyDetector, Comparison, CompositeRule, MetricCondition};
pub use correlation::CorrelationAnalyzer;
pub use trends::TrendClassifier;
