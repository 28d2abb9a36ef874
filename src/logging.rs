// ABOUTME: Structured logging setup for the analytics engine
// ABOUTME: EnvFilter-driven tracing-subscriber with pretty, compact, and JSON formats
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalog Contributors

//! Logging configuration
//!
//! Embedders call [`init_logging`] once at startup. The filter honors
//! `RUST_LOG` when set, otherwise the configured level; format and
//! level can be driven by `VITALOG_LOG_FORMAT` / `VITALOG_LOG_LEVEL`.

use crate::errors::{EngineError, EngineResult};
use std::env;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for space-constrained environments
    Compact,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
        }
    }
}

impl LoggingConfig {
    /// Configuration from `VITALOG_LOG_LEVEL` / `VITALOG_LOG_FORMAT`,
    /// with defaults for anything unset.
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("VITALOG_LOG_LEVEL").unwrap_or_else(|_| "info".into());
        let format = match env::var("VITALOG_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("compact") => LogFormat::Compact,
            _ => LogFormat::Pretty,
        };
        Self { level, format }
    }
}

/// Initialize the global tracing subscriber.
///
/// # Errors
///
/// Returns [`EngineError::Config`] when a subscriber is already
/// installed or the filter directive cannot be parsed.
pub fn init_logging(config: &LoggingConfig) -> EngineResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| EngineError::config(format!("invalid log filter: {e}")))?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.format {
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init(),
        LogFormat::Compact => registry.with(fmt::layer().compact()).try_init(),
    };
    result.map_err(|e| EngineError::config(format!("failed to install subscriber: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn from_env_defaults_to_pretty_info() {
        std::env::remove_var("VITALOG_LOG_LEVEL");
        std::env::remove_var("VITALOG_LOG_FORMAT");
        let config = LoggingConfig::from_env();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    #[serial]
    fn from_env_honors_overrides() {
        std::env::set_var("VITALOG_LOG_LEVEL", "debug");
        std::env::set_var("VITALOG_LOG_FORMAT", "json");
        let config = LoggingConfig::from_env();
        std::env::remove_var("VITALOG_LOG_LEVEL");
        std::env::remove_var("VITALOG_LOG_FORMAT");
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
    }
}
