// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Quiet logging, reference profiles and scripted AI assessment services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `nutrilens`

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use nutrilens::errors::{AppError, AppResult, ErrorCode};
use nutrilens::llm::{
    AssessmentCapabilities, ImageAssessmentService, MealImage, TextAssessmentService,
};
use nutrilens::models::{ActivityLevel, AssessmentInput, Objective, Sex, UserProfile};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Reference date every fixture's age is computed on
pub fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

/// Reference creation timestamp
pub fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap()
}

/// Male, 30 years old on [`as_of`], 175 cm, 70 kg, moderately active
pub fn male_input() -> AssessmentInput {
    AssessmentInput {
        sex: Sex::Male,
        date_of_birth: NaiveDate::from_ymd_opt(1995, 1, 15).unwrap(),
        height_cm: 175.0,
        weight_kg: 70.0,
        activity_level: ActivityLevel::Moderate,
        profession: "Software engineer".into(),
        objective: Objective::MaintainWeight,
        training_type: "Yoga".into(),
    }
}

/// Female, 25 years old on [`as_of`], 165 cm, 60 kg, lightly active
pub fn female_input() -> AssessmentInput {
    AssessmentInput {
        sex: Sex::Female,
        date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 10).unwrap(),
        height_cm: 165.0,
        weight_kg: 60.0,
        activity_level: ActivityLevel::Light,
        profession: "Teacher".into(),
        objective: Objective::MaintainWeight,
        training_type: "Pilates".into(),
    }
}

/// Fully populated profile built from [`male_input`]
pub fn complete_profile(user_id: Uuid) -> UserProfile {
    let input = male_input();
    UserProfile {
        user_id,
        name: Some("Test User".into()),
        sex: Some(input.sex),
        date_of_birth: Some(input.date_of_birth),
        height_cm: Some(input.height_cm),
        weight_kg: Some(input.weight_kg),
        activity_level: Some(input.activity_level),
        profession: Some(input.profession),
        objective: Some(input.objective),
        training_type: Some(input.training_type),
    }
}

/// Tiny valid JPEG header, enough for `MealImage` validation
pub fn sample_image() -> MealImage {
    MealImage::new(vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10], "image/jpeg").unwrap()
}

/// Canned answer of a scripted service
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Return this text
    Answer(String),
    /// Fail with this code and message
    Fail(ErrorCode, String),
}

/// AI service double answering every prompt with the same script
#[derive(Debug, Clone)]
pub struct ScriptedAssessmentService {
    script: Scripted,
    capabilities: AssessmentCapabilities,
    calls: Arc<AtomicUsize>,
    last_prompt: Arc<std::sync::Mutex<Option<String>>>,
}

impl ScriptedAssessmentService {
    pub fn answering(text: impl Into<String>) -> Self {
        Self::new(Scripted::Answer(text.into()))
    }

    pub fn failing(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(Scripted::Fail(code, message.into()))
    }

    fn new(script: Scripted) -> Self {
        Self {
            script,
            capabilities: AssessmentCapabilities::TEXT | AssessmentCapabilities::VISION,
            calls: Arc::new(AtomicUsize::new(0)),
            last_prompt: Arc::new(std::sync::Mutex::new(None)),
        }
    }

    /// Advertise only these capabilities
    pub fn with_capabilities(mut self, capabilities: AssessmentCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }

    fn respond(&self, prompt: &str) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_owned());
        match &self.script {
            Scripted::Answer(text) => Ok(text.clone()),
            Scripted::Fail(code, message) => Err(AppError::new(*code, message.clone())),
        }
    }
}

#[async_trait]
impl TextAssessmentService for ScriptedAssessmentService {
    fn capabilities(&self) -> AssessmentCapabilities {
        self.capabilities
    }

    async fn assess_text(&self, prompt: &str) -> AppResult<String> {
        self.respond(prompt)
    }
}

#[async_trait]
impl ImageAssessmentService for ScriptedAssessmentService {
    fn capabilities(&self) -> AssessmentCapabilities {
        self.capabilities
    }

    async fn assess_image(&self, prompt: &str, _image: &MealImage) -> AppResult<String> {
        self.respond(prompt)
    }
}
