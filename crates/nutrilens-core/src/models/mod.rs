// ABOUTME: Domain models shared across the NutriLens crates
// ABOUTME: Assessment records, user profile completeness and meal logging types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Physical assessment input and result records
pub mod assessment;

/// Meal logging and nutrition estimate types
pub mod meal;

/// User profile and the completeness capability
pub mod profile;

pub use assessment::{
    ActivityLevel, AssessmentInput, AssessmentRequest, AssessmentResult, BmiAssessment,
    BmiClassification, CaloricTarget, MacronutrientSplit, Objective, Sex, WeightGoal,
};
pub use meal::{LoggedMeal, MealNutrition, MealType};
pub use profile::{CompleteProfile, UserProfile};
