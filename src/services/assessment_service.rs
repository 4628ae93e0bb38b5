// ABOUTME: Physical assessment orchestration gated by profile completeness and uniqueness
// ABOUTME: Runs the calculator, optionally narrates recommendations with an AI service, persists once
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::assessment_store::{AssessmentStore, CreateOutcome};
use crate::config::AssessmentConfig;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::intelligence::{
    generate_physical_assessment, NeutralProfessionAdjustment, ProfessionAdjustment,
};
use crate::llm::prompts::recommendations_prompt;
use crate::llm::response::parse_recommendation_text;
use crate::llm::TextAssessmentService;
use nutrilens_core::models::{AssessmentInput, AssessmentResult, UserProfile};

/// Creates each user's physical assessment exactly once
pub struct PhysicalAssessmentService {
    store: Arc<dyn AssessmentStore>,
    config: AssessmentConfig,
    profession: Arc<dyn ProfessionAdjustment>,
    narrator: Option<Arc<dyn TextAssessmentService>>,
}

impl PhysicalAssessmentService {
    /// Service using the global configuration and the neutral profession strategy
    #[must_use]
    pub fn new(store: Arc<dyn AssessmentStore>) -> Self {
        Self {
            store,
            config: AssessmentConfig::global().clone(),
            profession: Arc::new(NeutralProfessionAdjustment),
            narrator: None,
        }
    }

    /// Replace the assessment configuration
    #[must_use]
    pub fn with_config(mut self, config: AssessmentConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the profession adjustment strategy
    #[must_use]
    pub fn with_profession_adjustment(mut self, profession: Arc<dyn ProfessionAdjustment>) -> Self {
        self.profession = profession;
        self
    }

    /// Narrate `generalRecommendations` with an AI text service
    #[must_use]
    pub fn with_narrator(mut self, narrator: Arc<dyn TextAssessmentService>) -> Self {
        self.narrator = Some(narrator);
        self
    }

    /// Stored assessment of a user, if any
    ///
    /// # Errors
    ///
    /// Propagates store failures
    pub async fn find_assessment(&self, user_id: Uuid) -> AppResult<Option<AssessmentResult>> {
        self.store.find(user_id).await
    }

    /// Return the user's assessment, creating it on first call
    ///
    /// # Errors
    ///
    /// See [`Self::ensure_assessment_at`]
    pub async fn ensure_assessment(
        &self,
        user_id: Uuid,
        profile: &UserProfile,
    ) -> AppResult<AssessmentResult> {
        let now = Utc::now();
        self.ensure_assessment_at(user_id, profile, now.date_naive(), now)
            .await
    }

    /// Return the user's assessment, creating it with a fixed clock
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the profile belongs to another user or holds out of domain values
    /// - `MissingRequiredField` naming the first absent profile field
    /// - `ComputationInvariantViolation` if the macronutrient split breaks the energy identity
    /// - store failures
    #[instrument(skip(self, profile), fields(user.id = %user_id))]
    pub async fn ensure_assessment_at(
        &self,
        user_id: Uuid,
        profile: &UserProfile,
        as_of: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> AppResult<AssessmentResult> {
        if let Some(existing) = self.store.find(user_id).await? {
            info!(user.id = %user_id, "Returning existing physical assessment");
            return Ok(existing);
        }

        if profile.user_id != user_id {
            return Err(AppError::invalid_input("Profile belongs to a different user")
                .with_user_id(user_id)
                .with_resource_id(profile.user_id.to_string()));
        }

        let complete = profile.complete().map_err(|e| e.with_user_id(user_id))?;
        let mut assessment = generate_physical_assessment(
            complete.input(),
            as_of,
            created_at,
            &self.config,
            self.profession.as_ref(),
        )
        .map_err(|e| e.with_user_id(user_id))?;

        if let Some(narrator) = &self.narrator {
            match narrate(narrator.as_ref(), complete.input(), as_of, &assessment).await {
                Ok(text) => assessment.general_recommendations = text,
                Err(e) => warn!(
                    user.id = %user_id,
                    error.code = ?e.code,
                    error = %e,
                    "AI recommendations unavailable, keeping computed text"
                ),
            }
        }

        let outcome = self.store.create_if_absent(user_id, assessment).await?;
        if let CreateOutcome::Existing(_) = &outcome {
            info!(user.id = %user_id, "Concurrent request stored the assessment first");
        }
        let stored = outcome.into_stored();

        info!(
            user.id = %user_id,
            assessment.bmi = stored.bmi.value,
            assessment.bmr = stored.bmr,
            assessment.tdee = stored.tdee,
            assessment.target_kcal = stored.daily_caloric_target.value,
            "Physical assessment ready"
        );
        Ok(stored)
    }
}

async fn narrate(
    narrator: &dyn TextAssessmentService,
    input: &AssessmentInput,
    as_of: NaiveDate,
    assessment: &AssessmentResult,
) -> AppResult<String> {
    if !narrator.capabilities().supports_text() {
        return Err(AppError::new(
            ErrorCode::ConfigInvalid,
            "Configured narrator does not accept text prompts",
        ));
    }
    let prompt = recommendations_prompt(input, as_of, assessment)?;
    let raw = narrator.assess_text(&prompt).await?;
    parse_recommendation_text(&raw)
}
