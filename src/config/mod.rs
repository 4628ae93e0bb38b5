// ABOUTME: Configuration module for assessment policy and outbound AI settings
// ABOUTME: Re-exports the assessment config container and the Gemini connection settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module for `NutriLens`
//!
//! - **Intelligence**: BMI bands, BMR coefficients, activity factors, caloric and macro policy
//! - **LLM**: Gemini API key, model and timeout

/// Assessment policy configuration
pub mod intelligence;
/// Gemini adapter settings
pub mod llm;

pub use intelligence::{
    ActivityFactorsConfig, AssessmentConfig, BiometricLimitsConfig, BmiConfig, BmrConfig,
    CaloricTargetConfig, ConfigError, MacroDistribution, MacronutrientConfig, WeightGoalConfig,
};
pub use llm::GeminiConfig;
