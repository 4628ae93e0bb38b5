// ABOUTME: AI assessment abstraction for meal photo and profile narrative generation
// ABOUTME: Defines the injected text and image capabilities plus the validated MealImage payload
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # AI Assessment Service Interface
//!
//! The services never reach for a global AI client. Instead they receive an
//! implementation of [`ImageAssessmentService`] or [`TextAssessmentService`],
//! which keeps the estimation swappable and lets tests script responses.
//!
//! ## Key Concepts
//!
//! - **`AssessmentCapabilities`**: Bitflags describing what a backend accepts
//! - **`MealImage`**: Validated photo bytes with their MIME type
//! - **`prompts`**: Prompt builders for the two assessment kinds
//! - **`response`**: Parsing and validation of the model's JSON answer
//!
//! ## Example
//!
//! ```rust,no_run
//! use nutrilens::llm::{GeminiProvider, ImageAssessmentService, MealImage};
//! use nutrilens::errors::AppError;
//!
//! async fn example(bytes: Vec<u8>) -> Result<(), AppError> {
//!     let provider = GeminiProvider::from_env()?;
//!     let image = MealImage::new(bytes, "image/jpeg")?;
//!     let raw = provider.assess_image("Estimate this meal", &image).await?;
//!     println!("{raw}");
//!     Ok(())
//! }
//! ```

mod gemini;
pub mod prompts;
pub mod response;

pub use gemini::GeminiProvider;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::intelligence::physiological_constants::meal::MAX_IMAGE_BYTES;

bitflags::bitflags! {
    /// Assessment capability flags
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct AssessmentCapabilities: u8 {
        /// Backend accepts text-only prompts
        const TEXT = 0b0000_0001;
        /// Backend accepts inline images
        const VISION = 0b0000_0010;
    }
}

impl AssessmentCapabilities {
    /// Check if text-only prompts are supported
    #[must_use]
    pub const fn supports_text(&self) -> bool {
        self.contains(Self::TEXT)
    }

    /// Check if image input is supported
    #[must_use]
    pub const fn supports_vision(&self) -> bool {
        self.contains(Self::VISION)
    }
}

/// Meal photo ready to be sent inline to a model
#[derive(Clone, PartialEq, Eq)]
pub struct MealImage {
    bytes: Vec<u8>,
    mime_type: String,
}

impl MealImage {
    /// Validate and wrap image bytes
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for empty data, a non `image/*` MIME type or a
    /// payload above 10 MiB
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> AppResult<Self> {
        let mime_type = mime_type.into().trim().to_lowercase();
        if bytes.is_empty() {
            return Err(AppError::invalid_input("Meal image is empty"));
        }
        if !mime_type.starts_with("image/") || mime_type.len() == "image/".len() {
            return Err(AppError::invalid_input(format!(
                "Unsupported meal image type '{mime_type}'"
            )));
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(AppError::invalid_input(format!(
                "Meal image of {} bytes exceeds the {MAX_IMAGE_BYTES} byte limit",
                bytes.len()
            )));
        }
        Ok(Self { bytes, mime_type })
    }

    /// Raw bytes
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Normalized MIME type
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Standard base64 encoding of the bytes
    #[must_use]
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

impl std::fmt::Debug for MealImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MealImage")
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Model that answers a prompt about an image
#[async_trait]
pub trait ImageAssessmentService: Send + Sync {
    /// Features the backend supports; callers check `VISION` before sending images
    fn capabilities(&self) -> AssessmentCapabilities;

    /// Return the model's raw text for `prompt` applied to `image`
    async fn assess_image(&self, prompt: &str, image: &MealImage) -> AppResult<String>;
}

/// Model that answers a text-only prompt
#[async_trait]
pub trait TextAssessmentService: Send + Sync {
    /// Features the backend supports; callers check `TEXT` before prompting
    fn capabilities(&self) -> AssessmentCapabilities;

    /// Return the model's raw text for `prompt`
    async fn assess_text(&self, prompt: &str) -> AppResult<String>;
}
