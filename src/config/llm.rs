// ABOUTME: Gemini connection settings loaded from the environment
// ABOUTME: API key, model name and request timeout for the AI assessment adapter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use nutrilens_core::errors::{AppError, AppResult, ErrorCode};

/// Environment variable for Gemini API key
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Environment variable for the Gemini model override
pub const GEMINI_MODEL_ENV: &str = "GEMINI_MODEL";

/// Environment variable for the request timeout in seconds
pub const GEMINI_TIMEOUT_ENV: &str = "GEMINI_TIMEOUT_SECS";

/// Default model to use
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-001";

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Gemini adapter configuration
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key from Google AI Studio
    pub api_key: String,
    /// Model identifier
    pub model: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Configuration with the default model and timeout
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_GEMINI_MODEL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Load from `GEMINI_API_KEY`, `GEMINI_MODEL` and `GEMINI_TIMEOUT_SECS`
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` if the key is unset or blank, `ConfigInvalid` if the
    /// timeout is not a positive integer
    pub fn from_env() -> AppResult<Self> {
        let api_key = env::var(GEMINI_API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AppError::new(
                    ErrorCode::ConfigMissing,
                    format!("{GEMINI_API_KEY_ENV} environment variable not set"),
                )
            })?;

        let mut config = Self::new(api_key);

        if let Ok(model) = env::var(GEMINI_MODEL_ENV) {
            if !model.trim().is_empty() {
                config.model = model.trim().to_owned();
            }
        }

        if let Ok(raw) = env::var(GEMINI_TIMEOUT_ENV) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    AppError::new(
                        ErrorCode::ConfigInvalid,
                        format!("Invalid {GEMINI_TIMEOUT_ENV}: '{raw}'"),
                    )
                })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

impl Debug for GeminiConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_key() {
        let config = GeminiConfig::new("secret-key-123");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret-key-123"));
        assert!(rendered.contains(DEFAULT_GEMINI_MODEL));
    }
}
