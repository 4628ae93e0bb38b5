// ABOUTME: Parsing and validation of AI model answers
// ABOUTME: Extracts the first JSON object from fenced or chatty output and checks nutrition values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Model answers are untrusted text. Models wrap JSON in Markdown fences or
//! add a sentence before it despite instructions, so the parser looks for the
//! first balanced JSON object and validates every field it needs.

use serde_json::{Map, Value};

use crate::errors::{AppError, AppResult};
use crate::intelligence::physiological_constants::meal::MAX_PLAUSIBLE_MEAL_KCAL;
use nutrilens_core::models::MealNutrition;

const SERVICE_NAME: &str = "AI assessment";

fn invalid_response(message: impl Into<String>, raw: &str) -> AppError {
    AppError::external_service(SERVICE_NAME, message).with_details(serde_json::json!({ "raw": raw }))
}

/// Remove a surrounding Markdown code fence, if any
#[must_use]
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. `json`) on the opening line
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Slice of the first balanced `{...}` object in `raw`
///
/// Braces inside JSON strings are ignored.
#[must_use]
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let text = strip_code_fences(raw);
    let start = text.find('{')?;

    let mut depth = 0_usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

fn non_negative_integer(object: &Map<String, Value>, key: &str, raw: &str) -> AppResult<u32> {
    let value = object
        .get(key)
        .ok_or_else(|| invalid_response(format!("Missing '{key}' in nutrition estimate"), raw))?;

    let integer = value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && *f >= 0.0 && f.fract().abs() < f64::EPSILON)
            .map(|f| f as u64)
    });

    integer
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| {
            invalid_response(
                format!("'{key}' must be a non-negative integer, got {value}"),
                raw,
            )
        })
}

/// Parse and validate a meal estimate
///
/// # Errors
///
/// Returns `ExternalServiceError`, with the raw answer in the details, when no
/// JSON object is found, a field is missing or negative or fractional, or the
/// calories exceed 10 000 kcal
pub fn parse_meal_nutrition(raw: &str) -> AppResult<MealNutrition> {
    let json = extract_json_object(raw)
        .ok_or_else(|| invalid_response("No JSON object in nutrition estimate", raw))?;
    let value: Value = serde_json::from_str(json)
        .map_err(|e| invalid_response(format!("Malformed nutrition estimate: {e}"), raw))?;
    let object = value
        .as_object()
        .ok_or_else(|| invalid_response("Nutrition estimate is not an object", raw))?;

    let nutrition = MealNutrition {
        calories: non_negative_integer(object, "calories", raw)?,
        proteins_grams: non_negative_integer(object, "proteinsGrams", raw)?,
        carbs_grams: non_negative_integer(object, "carbsGrams", raw)?,
        fats_grams: non_negative_integer(object, "fatsGrams", raw)?,
    };

    if nutrition.calories > MAX_PLAUSIBLE_MEAL_KCAL {
        return Err(invalid_response(
            format!(
                "Implausible estimate of {} kcal for a single meal",
                nutrition.calories
            ),
            raw,
        ));
    }

    Ok(nutrition)
}

/// Clean up a narrative answer
///
/// # Errors
///
/// Returns `ExternalServiceError` when the answer is blank
pub fn parse_recommendation_text(raw: &str) -> AppResult<String> {
    let text = strip_code_fences(raw);
    if text.is_empty() {
        return Err(invalid_response("Empty recommendation text", raw));
    }
    Ok(text.to_owned())
}
