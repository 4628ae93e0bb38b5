// ABOUTME: Google Gemini provider implementing the image and text assessment capabilities
// ABOUTME: Sends inline base64 images with a text prompt to the generateContent REST endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Gemini Provider
//!
//! Implementation of [`ImageAssessmentService`] and [`TextAssessmentService`]
//! for Google's Gemini models.
//!
//! ## Configuration
//!
//! Set the `GEMINI_API_KEY` environment variable with your API key from
//! Google AI Studio. `GEMINI_MODEL` overrides the default
//! `gemini-2.0-flash-001` and `GEMINI_TIMEOUT_SECS` the request timeout.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{AssessmentCapabilities, ImageAssessmentService, MealImage, TextAssessmentService};
use crate::config::llm::GeminiConfig;
use crate::errors::{AppError, AppResult, ErrorCode};

/// Base URL for the Gemini API
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Service name attached to errors
const SERVICE_NAME: &str = "Gemini";

/// Low temperature keeps nutrition estimates stable between calls
const IMAGE_TEMPERATURE: f32 = 0.2;

/// Narrative text benefits from some variation
const TEXT_TEMPERATURE: f32 = 0.7;

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Gemini API request structure
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

/// Content structure for Gemini API
#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

/// Part of content (inline image or text)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ContentPart {
    /// Base64 image payload
    InlineData {
        #[serde(rename = "inline_data", alias = "inlineData")]
        inline_data: InlineData,
    },
    /// Text content
    Text { text: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct InlineData {
    #[serde(rename = "mime_type", alias = "mimeType")]
    mime_type: String,
    data: String,
}

/// Generation configuration
#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    candidate_count: u32,
}

/// Gemini API response structure
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<GeminiError>,
}

/// Response candidate
#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

/// API error response from Gemini
#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini assessment provider
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
    base_url: String,
}

impl GeminiProvider {
    /// Create a provider from explicit configuration
    ///
    /// # Errors
    ///
    /// Returns `InternalError` if the HTTP client cannot be built
    pub fn new(config: GeminiConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            config,
            client,
            base_url: API_BASE_URL.to_owned(),
        })
    }

    /// Create a provider from `GEMINI_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not set or the timeout is invalid
    pub fn from_env() -> AppResult<Self> {
        Self::new(GeminiConfig::from_env()?)
    }

    /// Point the provider at another endpoint root
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Features this backend supports
    #[must_use]
    pub const fn capabilities(&self) -> AssessmentCapabilities {
        AssessmentCapabilities::TEXT.union(AssessmentCapabilities::VISION)
    }

    /// Model used for every request
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn build_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.config.model, self.config.api_key
        )
    }

    fn build_request(parts: Vec<ContentPart>, temperature: f32) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_owned()),
                parts,
            }],
            generation_config: Some(GenerationConfig {
                temperature,
                candidate_count: 1,
            }),
        }
    }

    /// Send a request and return the first candidate's text
    async fn generate(&self, request: &GeminiRequest) -> AppResult<String> {
        let response = self
            .client
            .post(self.build_url())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                AppError::new(
                    ErrorCode::ExternalServiceUnavailable,
                    format!("{SERVICE_NAME} request failed: {e}"),
                )
            })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            AppError::external_service(SERVICE_NAME, format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status, &response_text));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                error!(error = %e, "Failed to parse Gemini response");
                AppError::external_service(SERVICE_NAME, format!("Failed to parse response: {e}"))
            })?;

        if let Some(error) = gemini_response.error {
            return Err(AppError::external_service(SERVICE_NAME, error.message));
        }

        let content = Self::extract_content(&gemini_response)?;
        debug!(chars = content.len(), "Received Gemini response");
        Ok(content)
    }

    /// Extract text content from the first candidate
    fn extract_content(response: &GeminiResponse) -> AppResult<String> {
        let candidate = response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .ok_or_else(|| AppError::external_service(SERVICE_NAME, "No candidates in response"))?;

        let text: String = candidate
            .content
            .as_ref()
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| match part {
                        ContentPart::Text { text } => Some(text.as_str()),
                        ContentPart::InlineData { .. } => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            let reason = candidate.finish_reason.as_deref().unwrap_or("unknown");
            return Err(AppError::external_service(
                SERVICE_NAME,
                format!("Empty response (finish reason: {reason})"),
            ));
        }
        Ok(text)
    }

    /// Map API error status to appropriate error type
    fn map_api_error(status: StatusCode, response_text: &str) -> AppError {
        let message = serde_json::from_str::<GeminiResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);

        match status {
            StatusCode::TOO_MANY_REQUESTS => {
                AppError::new(ErrorCode::ExternalRateLimited, Self::extract_quota_message(&message))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::new(
                ErrorCode::ExternalAuthFailed,
                format!("{SERVICE_NAME} rejected the API key: {message}"),
            ),
            s if s.is_server_error() => AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                format!("{SERVICE_NAME} unavailable ({}): {message}", s.as_u16()),
            ),
            s => AppError::external_service(SERVICE_NAME, format!("API error ({}): {message}", s.as_u16())),
        }
    }

    /// Extract a user-friendly quota/rate limit message from Gemini error
    fn extract_quota_message(message: &str) -> String {
        const RETRY_PREFIX: &str = "Please retry in ";
        let seconds = message
            .find(RETRY_PREFIX)
            .map(|pos| &message[pos + RETRY_PREFIX.len()..])
            .and_then(|rest| rest.split('s').next())
            .and_then(|value| value.trim().parse::<f64>().ok());

        match seconds {
            Some(seconds) => format!(
                "AI service quota exceeded. Please try again in {} seconds.",
                seconds.ceil() as u64
            ),
            None => "AI service quota exceeded. Please wait a moment and try again.".to_owned(),
        }
    }
}

#[async_trait]
impl ImageAssessmentService for GeminiProvider {
    fn capabilities(&self) -> AssessmentCapabilities {
        Self::capabilities(self)
    }

    #[instrument(skip(self, prompt, image), fields(model = %self.config.model, image.bytes = image.bytes().len()))]
    async fn assess_image(&self, prompt: &str, image: &MealImage) -> AppResult<String> {
        let request = Self::build_request(
            vec![
                ContentPart::InlineData {
                    inline_data: InlineData {
                        mime_type: image.mime_type().to_owned(),
                        data: image.to_base64(),
                    },
                },
                ContentPart::Text {
                    text: prompt.to_owned(),
                },
            ],
            IMAGE_TEMPERATURE,
        );
        debug!("Sending image assessment request to Gemini");
        self.generate(&request).await
    }
}

#[async_trait]
impl TextAssessmentService for GeminiProvider {
    fn capabilities(&self) -> AssessmentCapabilities {
        Self::capabilities(self)
    }

    #[instrument(skip(self, prompt), fields(model = %self.config.model))]
    async fn assess_text(&self, prompt: &str) -> AppResult<String> {
        let request = Self::build_request(
            vec![ContentPart::Text {
                text: prompt.to_owned(),
            }],
            TEXT_TEMPERATURE,
        );
        debug!("Sending text assessment request to Gemini");
        self.generate(&request).await
    }
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("model", &self.config.model)
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_request_puts_inline_data_before_text() {
        let request = GeminiProvider::build_request(
            vec![
                ContentPart::InlineData {
                    inline_data: InlineData {
                        mime_type: "image/png".to_owned(),
                        data: "AQID".to_owned(),
                    },
                },
                ContentPart::Text {
                    text: "prompt".to_owned(),
                },
            ],
            IMAGE_TEMPERATURE,
        );
        let json = serde_json::to_value(&request).unwrap();
        let parts = &json["contents"][0]["parts"];
        assert_eq!(parts[0]["inline_data"]["mime_type"], "image/png");
        assert_eq!(parts[0]["inline_data"]["data"], "AQID");
        assert_eq!(parts[1]["text"], "prompt");
    }

    #[test]
    fn test_rate_limit_maps_to_rate_limited() {
        let body = r#"{"error":{"message":"Quota exceeded. Please retry in 6.4s."}}"#;
        let err = GeminiProvider::map_api_error(StatusCode::TOO_MANY_REQUESTS, body);
        assert_eq!(err.code, ErrorCode::ExternalRateLimited);
        assert!(err.message.contains("7 seconds"));
    }

    #[test]
    fn test_bad_request_maps_to_external_error() {
        let err = GeminiProvider::map_api_error(StatusCode::BAD_REQUEST, "boom");
        assert_eq!(err.code, ErrorCode::ExternalServiceError);
        assert!(err.message.contains("boom"));
    }

    #[test]
    fn test_extracts_joined_text_parts() {
        let response: GeminiResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"{\"a\":"},{"text":"1}"}]},"finishReason":"STOP"}]}"#,
        )
        .unwrap();
        assert_eq!(GeminiProvider::extract_content(&response).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_debug_redacts_key() {
        let provider = GeminiProvider::new(GeminiConfig::new("top-secret")).unwrap();
        assert!(!format!("{provider:?}").contains("top-secret"));
    }
}
