// ABOUTME: AI narrative generator seam - trait, chat types, and prompt assembly
// ABOUTME: The engine sends structured snapshots out and stores returned text verbatim
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalog Contributors

//! # Narrative generation
//!
//! The engine never interprets narrative text; it hands a
//! [`HealthSnapshot`](crate::models::HealthSnapshot) to a
//! [`NarrativeGenerator`] and stores whatever markdown comes back.
//! [`GroqProvider`] is the bundled implementation; tests substitute
//! their own.

/// Groq chat-completion provider
pub mod groq;

pub use groq::GroqProvider;

use crate::errors::EngineResult;
use crate::models::HealthSnapshot;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction
    System,
    /// User content
    User,
}

impl MessageRole {
    /// Wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

/// One message in a chat completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role
    pub role: MessageRole,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// System-role message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// User-role message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// External text-generation collaborator.
///
/// Implementations own transport and model selection; the engine owns
/// the timeout and treats any failure as
/// [`EngineError::ExternalService`](crate::errors::EngineError::ExternalService).
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    /// Produce a narrative health analysis from a structured snapshot.
    ///
    /// # Errors
    ///
    /// Implementations surface transport, protocol, and provider
    /// failures as
    /// [`EngineError::ExternalService`](crate::errors::EngineError::ExternalService).
    async fn generate_narrative(&self, snapshot: &HealthSnapshot) -> EngineResult<String>;

    /// Produce a short, encouraging reminder from a structured
    /// snapshot.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::generate_narrative`].
    async fn generate_reminder(&self, snapshot: &HealthSnapshot) -> EngineResult<String>;
}

/// System instruction for full analyses.
pub const ANALYSIS_SYSTEM_PROMPT: &str = "You are a helpful health assistant. Analyze the \
    provided health data and give personalized insights, recommendations, and explanations. \
    Be encouraging and practical in your advice.";

/// System instruction for reminders.
pub const REMINDER_SYSTEM_PROMPT: &str = "You are a friendly health assistant. Generate \
    short, encouraging health reminders.";

fn pretty(value: &impl Serialize) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_owned())
}

/// Assemble the analysis prompt from a snapshot. Only derived
/// statistics are included, never raw log entries.
#[must_use]
pub fn analysis_prompt(snapshot: &HealthSnapshot) -> String {
    format!(
        "Please analyze the following health data and provide personalized insights.\n\n\
         Data summary:\n\
         - Entries analyzed: {count}\n\
         - Window: {start} to {end}\n\n\
         Metric summaries:\n{summaries}\n\n\
         Trends:\n{trends}\n\n\
         Anomalies:\n{anomalies}\n\n\
         Correlations:\n{correlations}\n\n\
         Recurring symptoms:\n{symptoms}\n\n\
         Please provide:\n\
         1. A brief summary of the user's health patterns\n\
         2. Any concerning trends or patterns\n\
         3. Specific recommendations for improvement\n\
         4. Encouragement and positive observations\n\
         5. Any correlations you notice between different health metrics\n\n\
         Keep your response practical, encouraging, and easy to understand.",
        count = snapshot.log_count,
        start = snapshot.window.start,
        end = snapshot.window.end,
        summaries = pretty(&snapshot.summaries),
        trends = pretty(&snapshot.trends),
        anomalies = pretty(&snapshot.anomalies),
        correlations = pretty(&snapshot.correlations),
        symptoms = pretty(&snapshot.top_symptoms),
    )
}

/// Assemble the reminder prompt from a snapshot.
#[must_use]
pub fn reminder_prompt(snapshot: &HealthSnapshot) -> String {
    format!(
        "Based on this health data, generate a friendly reminder or tip:\n\n\
         Averages over {start} to {end}:\n{summaries}\n\n\
         Provide a short, encouraging reminder (1-2 sentences) about maintaining good \
         health habits.",
        start = snapshot.window.start,
        end = snapshot.window.end,
        summaries = pretty(&snapshot.summaries),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnalysisWindow;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn snapshot() -> HealthSnapshot {
        HealthSnapshot {
            window: AnalysisWindow {
                start: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap_or_default(),
                end: NaiveDate::from_ymd_opt(2025, 5, 30).unwrap_or_default(),
            },
            log_count: 12,
            summaries: BTreeMap::new(),
            trends: BTreeMap::new(),
            anomalies: Vec::new(),
            correlations: Vec::new(),
            top_symptoms: Vec::new(),
        }
    }

    #[test]
    fn analysis_prompt_carries_window_and_count() {
        let prompt = analysis_prompt(&snapshot());
        assert!(prompt.contains("Entries analyzed: 12"));
        assert!(prompt.contains("2025-05-01"));
        assert!(prompt.contains("2025-05-30"));
    }

    #[test]
    fn reminder_prompt_is_short_form() {
        let prompt = reminder_prompt(&snapshot());
        assert!(prompt.contains("friendly reminder"));
        assert!(!prompt.contains("Anomalies"));
    }
}
