// ABOUTME: Meal photo analysis through an injected image assessment service
// ABOUTME: Builds the meal prompt, calls the model and validates the nutrition estimate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::errors::{AppError, AppResult, ErrorCode};
use crate::llm::prompts::meal_assessment_prompt;
use crate::llm::response::parse_meal_nutrition;
use crate::llm::{ImageAssessmentService, MealImage};
use nutrilens_core::models::{LoggedMeal, MealNutrition, MealType};

/// Longest description accepted, in characters
pub const MAX_DESCRIPTION_CHARS: usize = 2_000;

/// Meal to log, before analysis
#[derive(Debug, Clone)]
pub struct NewMeal {
    /// Owning user
    pub user_id: Uuid,
    /// User supplied description
    pub description: String,
    /// Public URL of the uploaded photo
    pub image_url: Option<String>,
    /// Meal type
    pub meal_type: MealType,
    /// Local time the meal was eaten
    pub eaten_at: NaiveDateTime,
}

/// Estimates meal nutrition from a photo and a description
pub struct MealAnalysisService {
    estimator: Arc<dyn ImageAssessmentService>,
}

impl MealAnalysisService {
    /// Create a service over an image assessment backend
    #[must_use]
    pub fn new(estimator: Arc<dyn ImageAssessmentService>) -> Self {
        Self { estimator }
    }

    /// Estimate calories and macronutrients of the pictured meal
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for a description above [`MAX_DESCRIPTION_CHARS`]
    /// - `ConfigInvalid` if the estimator does not accept images
    /// - the estimator's external service errors
    /// - `ExternalServiceError` when the answer is not a valid estimate
    #[instrument(skip(self, description), fields(image.mime = image.mime_type(), image.len = image.bytes().len()))]
    pub async fn analyze(&self, description: &str, image: &MealImage) -> AppResult<MealNutrition> {
        let length = description.chars().count();
        if length > MAX_DESCRIPTION_CHARS {
            return Err(AppError::invalid_input(format!(
                "Meal description of {length} characters exceeds {MAX_DESCRIPTION_CHARS}"
            )));
        }

        if !self.estimator.capabilities().supports_vision() {
            return Err(AppError::new(
                ErrorCode::ConfigInvalid,
                "Configured meal estimator does not accept images",
            ));
        }

        let prompt = meal_assessment_prompt(description)?;
        let raw = self.estimator.assess_image(&prompt, image).await?;
        debug!(response.len = raw.len(), "Received meal estimate");

        let nutrition = parse_meal_nutrition(&raw)?;
        info!(
            meal.calories = nutrition.calories,
            meal.proteins_g = nutrition.proteins_grams,
            meal.carbs_g = nutrition.carbs_grams,
            meal.fats_g = nutrition.fats_grams,
            "Meal analyzed"
        );
        Ok(nutrition)
    }

    /// Analyze a meal and produce its log entry
    ///
    /// # Errors
    ///
    /// Same as [`Self::analyze`]
    pub async fn analyze_and_log(&self, meal: NewMeal, image: &MealImage) -> AppResult<LoggedMeal> {
        let nutrition = self
            .analyze(&meal.description, image)
            .await
            .map_err(|e| e.with_user_id(meal.user_id))?;

        Ok(LoggedMeal {
            id: Uuid::new_v4(),
            user_id: meal.user_id,
            description: meal.description,
            image_url: meal.image_url,
            meal_type: meal.meal_type,
            eaten_at: meal.eaten_at,
            nutrition: Some(nutrition),
        })
    }
}
