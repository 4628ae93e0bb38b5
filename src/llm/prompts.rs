// ABOUTME: Prompt builders for meal photo estimation and assessment narratives
// ABOUTME: Embeds user supplied text as escaped JSON so it cannot break the prompt structure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Prompt templates sent to the AI assessment services.

use chrono::NaiveDate;
use serde_json::json;

use crate::errors::AppResult;
use nutrilens_core::models::{AssessmentInput, AssessmentResult};

const MEAL_ASSESSMENT_TEMPLATE: &str = r#"You are a nutritionist AI. Analyse the meal in the image together with the user's description and estimate its nutritional content as accurately as possible.

Your answer MUST be a single well-formed JSON object. Do not include any introduction, explanation, comments or Markdown formatting.

Instructions:
1. Identify every food in the image and estimate each portion in grams or common units.
2. Use the description to refine the analysis: preparation method, sauces and quantities that are not visible.
3. Compute the total calories, protein, carbohydrate and fat of the whole meal.
4. Report whole numbers rounded to the nearest integer.

User data:
{{USER_DATA}}

Required output structure:
{
  "calories": <integer>,
  "proteinsGrams": <integer>,
  "carbsGrams": <integer>,
  "fatsGrams": <integer>
}"#;

const RECOMMENDATIONS_TEMPLATE: &str = r"You are an assistant specialised in nutrition and physical preparation. The physical assessment below was computed with the Mifflin-St Jeor equation and standard activity factors. Do not recompute or contradict any number.

Write a short, motivating paragraph of general recommendations (at most 120 words) in plain text for this user, considering their profession and training type. Do not use Markdown, lists or JSON.

User profile:
{{PROFILE}}

Computed assessment:
{{ASSESSMENT}}";

/// Prompt asking for `{calories, proteinsGrams, carbsGrams, fatsGrams}`
///
/// # Errors
///
/// Returns `SerializationError` if the description cannot be encoded
pub fn meal_assessment_prompt(description: &str) -> AppResult<String> {
    let user_data = serde_json::to_string_pretty(&json!({ "description": description.trim() }))?;
    Ok(MEAL_ASSESSMENT_TEMPLATE.replace("{{USER_DATA}}", &user_data))
}

/// Prompt asking for a plain-text narrative of a computed assessment
///
/// # Errors
///
/// Returns `SerializationError` if the profile or result cannot be encoded, or
/// `InvalidInput` if `as_of` precedes the date of birth
pub fn recommendations_prompt(
    input: &AssessmentInput,
    as_of: NaiveDate,
    result: &AssessmentResult,
) -> AppResult<String> {
    let profile = serde_json::to_string_pretty(&json!({
        "sex": input.sex,
        "ageYears": input.age_on(as_of)?,
        "heightCm": input.height_cm,
        "weightKg": input.weight_kg,
        "activityLevel": input.activity_level.description(),
        "profession": input.profession,
        "objective": input.objective.label(),
        "trainingType": input.training_type,
    }))?;

    let assessment = serde_json::to_string_pretty(&json!({
        "bmi": result.bmi,
        "bmr": result.bmr,
        "tdee": result.tdee,
        "dailyCaloricTarget": result.daily_caloric_target.value,
        "weightGoal": result.weight_goal.recommendation,
        "macronutrients": result.macronutrients,
    }))?;

    Ok(RECOMMENDATIONS_TEMPLATE
        .replace("{{PROFILE}}", &profile)
        .replace("{{ASSESSMENT}}", &assessment))
}
