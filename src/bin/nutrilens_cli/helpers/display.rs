// ABOUTME: Output formatting helpers for nutrilens-cli
// ABOUTME: Human readable assessment report and ErrorResponse JSON on stderr
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutrilens::errors::{AppError, ErrorResponse};
use nutrilens::models::{AssessmentInput, AssessmentResult};

/// Display an assessment as a report
pub fn display_assessment(input: &AssessmentInput, result: &AssessmentResult) {
    let split = &result.macronutrients;

    println!("\nPhysical Assessment");
    println!("{}", "=".repeat(60));
    println!("Profile:");
    println!("   Sex: {}", input.sex);
    println!("   Height: {} cm", input.height_cm);
    println!("   Weight: {} kg", input.weight_kg);
    println!("   Activity: {}", input.activity_level.description());
    println!("   Objective: {}", input.objective.label());

    println!("\nEnergy:");
    println!(
        "   BMI: {:.2} ({})",
        result.bmi.value, result.bmi.classification
    );
    println!("   BMR: {} kcal/day", result.bmr);
    println!("   TDEE: {} kcal/day", result.tdee);
    println!(
        "   Daily target: {} kcal ({})",
        result.daily_caloric_target.value, result.daily_caloric_target.explanation
    );

    println!("\nWeight goal:");
    println!("   {}", result.weight_goal.recommendation);
    println!(
        "   Change: {:+.1} kg, target {:.1} kg",
        result.weight_goal.change_kg, result.weight_goal.target_weight_kg
    );

    println!("\nMacronutrients:");
    println!("   Protein: {} g", split.proteins_grams);
    println!("   Carbohydrates: {} g", split.carbohydrates_grams);
    println!("   Fat: {} g", split.fats_grams);
    println!("   Energy: {} kcal", split.energy_kcal());

    println!("\nRecommendations:");
    println!("   {}", result.general_recommendations);
    println!("{}", "=".repeat(60));
}

/// Print an error as `ErrorResponse` JSON on stderr
pub fn report_error(error: AppError) {
    let fallback = error.to_string();
    let response = ErrorResponse::from(error);
    match serde_json::to_string(&response) {
        Ok(json) => eprintln!("{json}"),
        Err(_) => eprintln!("{fallback}"),
    }
}
