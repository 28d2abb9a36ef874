// ABOUTME: Groq LLM provider for narrative insight generation
// ABOUTME: OpenAI-compatible chat completions over Groq's LPU inference API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalog Contributors

//! # Groq Provider
//!
//! [`NarrativeGenerator`] implementation backed by Groq's
//! OpenAI-compatible chat completion API.
//!
//! ## Configuration
//!
//! Set the `GROQ_API_KEY` environment variable with your API key from
//! Groq Console: <https://console.groq.com/keys>. `VITALOG_GROQ_MODEL`
//! selects a non-default model.

use super::{
    analysis_prompt, reminder_prompt, ChatMessage, NarrativeGenerator, ANALYSIS_SYSTEM_PROMPT,
    REMINDER_SYSTEM_PROMPT,
};
use crate::config::NarrativeConfig;
use crate::errors::{EngineError, EngineResult};
use crate::models::HealthSnapshot;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Environment variable for the Groq API key
const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";

/// Environment variable overriding the model
const GROQ_MODEL_ENV: &str = "VITALOG_GROQ_MODEL";

/// Default model to use
const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Base URL for the Groq API (OpenAI-compatible)
const API_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Service name used in error reporting
const SERVICE: &str = "groq";

// ============================================================================
// API Request/Response Types (OpenAI-compatible format)
// ============================================================================

#[derive(Debug, Serialize)]
struct GroqRequest {
    model: String,
    messages: Vec<GroqMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct GroqMessage {
    role: String,
    content: String,
}

impl From<&ChatMessage> for GroqMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role.as_str().to_owned(),
            content: msg.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GroqResponse {
    choices: Vec<GroqChoice>,
    #[serde(default)]
    usage: Option<GroqUsage>,
}

#[derive(Debug, Deserialize)]
struct GroqChoice {
    message: GroqResponseMessage,
}

#[derive(Debug, Deserialize)]
struct GroqResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct GroqUsage {
    total_tokens: u32,
}

/// Groq-backed narrative generator.
pub struct GroqProvider {
    client: Client,
    api_key: String,
    model: String,
    config: NarrativeConfig,
}

impl GroqProvider {
    /// Provider from environment configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] when `GROQ_API_KEY` is unset or
    /// the HTTP client cannot be built.
    pub fn from_env(config: NarrativeConfig) -> EngineResult<Self> {
        let api_key = std::env::var(GROQ_API_KEY_ENV)
            .map_err(|_| EngineError::config(format!("{GROQ_API_KEY_ENV} is not set")))?;
        let model =
            std::env::var(GROQ_MODEL_ENV).unwrap_or_else(|_| DEFAULT_MODEL.to_owned());
        Self::new(api_key, model, config)
    }

    /// Provider with an explicit key and model.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] when the HTTP client cannot be
    /// built.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        config: NarrativeConfig,
    ) -> EngineResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EngineError::config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            config,
        })
    }

    /// Execute one chat completion and return the first choice's text.
    async fn complete(&self, messages: Vec<ChatMessage>) -> EngineResult<String> {
        let request = GroqRequest {
            model: self.model.clone(),
            messages: messages.iter().map(GroqMessage::from).collect(),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .client
            .post(format!("{API_BASE_URL}/chat/completions"))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| EngineError::external_service(SERVICE, format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "groq API returned an error");
            return Err(EngineError::external_service(
                SERVICE,
                format!("API error {status}: {body}"),
            ));
        }

        let parsed: GroqResponse = response.json().await.map_err(|e| {
            EngineError::external_service(SERVICE, format!("invalid response body: {e}"))
        })?;

        if let Some(usage) = &parsed.usage {
            debug!(model = %self.model, total_tokens = usage.total_tokens, "groq completion");
        }

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| EngineError::external_service(SERVICE, "response contained no choices"))
    }
}

#[async_trait]
impl NarrativeGenerator for GroqProvider {
    async fn generate_narrative(&self, snapshot: &HealthSnapshot) -> EngineResult<String> {
        self.complete(vec![
            ChatMessage::system(ANALYSIS_SYSTEM_PROMPT),
            ChatMessage::user(analysis_prompt(snapshot)),
        ])
        .await
    }

    async fn generate_reminder(&self, snapshot: &HealthSnapshot) -> EngineResult<String> {
        self.complete(vec![
            ChatMessage::system(REMINDER_SYSTEM_PROMPT),
            ChatMessage::user(reminder_prompt(snapshot)),
        ])
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_conversion_keeps_role_names() {
        let msg = ChatMessage::system("be helpful");
        let wire = GroqMessage::from(&msg);
        assert_eq!(wire.role, "system");
        assert_eq!(wire.content, "be helpful");
    }

    #[test]
    fn provider_requires_a_well_formed_client() {
        let provider = GroqProvider::new(
            "test-key",
            DEFAULT_MODEL,
            NarrativeConfig {
                timeout_secs: 5,
                temperature: 0.7,
                max_tokens: 256,
            },
        );
        assert!(provider.is_ok());
    }
}
