// ABOUTME: Main library entry point for the NutriLens nutrition assessment platform
// ABOUTME: Exposes the assessment calculator, AI meal analysis, services, config and logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `NutriLens`
//!
//! Physical assessment and meal analysis for a nutrition tracking app.
//!
//! ## Features
//!
//! - **Physical assessment**: BMI, BMR (Mifflin-St Jeor), TDEE, caloric target,
//!   weight goal and a macronutrient split that conserves energy exactly
//! - **Meal analysis**: photo based nutrition estimates through an injected AI service
//! - **Meal summaries**: daily totals, weekly calorie chart and target progress
//!
//! ## Architecture
//!
//! - **Intelligence**: the pure calculator and meal aggregations
//! - **Services**: async orchestration over the store and AI collaborators
//! - **LLM**: prompt building, response validation and the Gemini adapter
//! - **Config**: assessment policy with `NUTRILENS_*` environment overrides
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use chrono::{NaiveDate, Utc};
//! use nutrilens::config::AssessmentConfig;
//! use nutrilens::errors::AppResult;
//! use nutrilens::intelligence::{generate_physical_assessment, NeutralProfessionAdjustment};
//! use nutrilens::models::{AssessmentInput, AssessmentRequest};
//!
//! fn main() -> AppResult<()> {
//!     let request: AssessmentRequest = serde_json::from_str(
//!         r#"{"sex":"male","dateOfBirth":"1995-01-01","heightCm":175,"weightKg":70,
//!             "activityLevel":"moderate","objective":"maintain_weight"}"#,
//!     )?;
//!     let input = AssessmentInput::try_from(request)?;
//!     let result = generate_physical_assessment(
//!         &input,
//!         Utc::now().date_naive(),
//!         Utc::now(),
//!         AssessmentConfig::global(),
//!         &NeutralProfessionAdjustment,
//!     )?;
//!     println!("TDEE: {} kcal", result.tdee);
//!     Ok(())
//! }
//! ```

/// Assessment policy and AI adapter configuration
pub mod config;

/// Unified error handling, re-exported from `nutrilens-core`
pub mod errors;

/// Physical assessment calculator and meal aggregations
pub mod intelligence;

/// AI assessment abstraction, prompts and the Gemini adapter
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Domain models, re-exported from `nutrilens-core`
pub mod models;

/// Assessment and meal analysis services
pub mod services;
