// ABOUTME: Meal logging models for photo-based nutrition estimates
// ABOUTME: MealType, MealNutrition and LoggedMeal definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Type of meal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Breakfast meal
    #[serde(alias = "CAFE_DA_MANHA")]
    Breakfast,
    /// Lunch meal
    #[serde(alias = "ALMOCO")]
    Lunch,
    /// Dinner meal
    #[serde(alias = "JANTAR")]
    Dinner,
    /// Snack between meals
    #[serde(alias = "LANCHE")]
    Snack,
    /// Meal eaten before training
    #[serde(alias = "PRE_TREINO")]
    PreWorkout,
    /// Meal eaten after training
    #[serde(alias = "POS_TREINO")]
    PostWorkout,
    /// Late evening meal
    #[serde(alias = "CEIA")]
    Supper,
    /// Unspecified or other meal type
    #[serde(alias = "OUTRO")]
    Other,
}

impl MealType {
    /// Parse meal type from string
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "breakfast" | "cafe_da_manha" => Self::Breakfast,
            "lunch" | "almoco" => Self::Lunch,
            "dinner" | "jantar" => Self::Dinner,
            "snack" | "lanche" => Self::Snack,
            "pre_workout" | "pre_treino" => Self::PreWorkout,
            "post_workout" | "pos_treino" => Self::PostWorkout,
            "supper" | "ceia" => Self::Supper,
            _ => Self::Other,
        }
    }
}

/// Estimated nutrition of one meal, whole units as returned by the estimator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealNutrition {
    /// Energy in kcal
    pub calories: u32,
    /// Protein grams
    pub proteins_grams: u32,
    /// Carbohydrate grams
    pub carbs_grams: u32,
    /// Fat grams
    pub fats_grams: u32,
}

impl MealNutrition {
    /// Component-wise sum, saturating at `u32::MAX`
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self {
            calories: self.calories.saturating_add(other.calories),
            proteins_grams: self.proteins_grams.saturating_add(other.proteins_grams),
            carbs_grams: self.carbs_grams.saturating_add(other.carbs_grams),
            fats_grams: self.fats_grams.saturating_add(other.fats_grams),
        }
    }
}

/// A meal logged by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedMeal {
    /// Meal identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// User supplied description
    pub description: String,
    /// Public URL of the uploaded photo
    pub image_url: Option<String>,
    /// Meal type
    pub meal_type: MealType,
    /// Local wall-clock time the meal was eaten
    pub eaten_at: NaiveDateTime,
    /// Estimate, absent until the analysis has run
    pub nutrition: Option<MealNutrition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_type_lossy_parse() {
        assert_eq!(MealType::from_str_lossy("ALMOCO"), MealType::Lunch);
        assert_eq!(MealType::from_str_lossy("post_workout"), MealType::PostWorkout);
        assert_eq!(MealType::from_str_lossy("brunch"), MealType::Other);
    }

    #[test]
    fn test_nutrition_sum() {
        let a = MealNutrition {
            calories: 500,
            proteins_grams: 30,
            carbs_grams: 60,
            fats_grams: 15,
        };
        let total = a.saturating_add(a);
        assert_eq!(total.calories, 1000);
        assert_eq!(total.fats_grams, 30);
    }
}
