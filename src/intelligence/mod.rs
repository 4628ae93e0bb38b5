// ABOUTME: Intelligence module with the physical assessment calculator and meal aggregations
// ABOUTME: Re-exports the calculator operations and the profession adjustment strategies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intelligence Module
//!
//! Deterministic nutrition analytics. Nothing here performs I/O: the
//! calculator is pure and the meal summaries work on slices handed in by the
//! caller.

/// Daily totals, weekly chart and target progress over logged meals
pub mod meal_summary;
/// BMI, BMR, TDEE, caloric target, weight goal and macronutrient split
pub mod physical_assessment;
/// Fixed physiological constants
pub mod physiological_constants;
/// Profession based TDEE adjustment strategies
pub mod profession;

pub use meal_summary::{
    daily_progress, daily_totals, week_start, weekly_calorie_chart, DailyCalories, DailyProgress,
    WeeklyCalories,
};
pub use physical_assessment::{
    apply_training_emphasis, calculate_bmi, calculate_caloric_target,
    calculate_macronutrient_split, calculate_mifflin_st_jeor, calculate_tdee,
    classify_bmi, classify_training_type, general_recommendations,
    generate_physical_assessment, recommend_weight_goal, validate_biometrics,
    verify_energy_balance, TrainingEmphasis,
};
pub use profession::{
    KeywordProfessionAdjustment, NeutralProfessionAdjustment, ProfessionAdjustment,
    ProfessionRule,
};
