// ABOUTME: Integration tests for the physical assessment calculator through its public API
// ABOUTME: Reference values for BMI, BMR, TDEE, caloric target, weight goal and macro split
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::NaiveDate;
use common::{as_of, created_at, female_input, male_input};
use nutrilens::config::{AssessmentConfig, MacroDistribution};
use nutrilens::errors::ErrorCode;
use nutrilens::intelligence::{
    apply_training_emphasis, calculate_bmi, calculate_caloric_target,
    calculate_macronutrient_split, calculate_mifflin_st_jeor, calculate_tdee,
    generate_physical_assessment, recommend_weight_goal, verify_energy_balance,
    KeywordProfessionAdjustment, NeutralProfessionAdjustment, TrainingEmphasis,
};
use nutrilens::models::{
    ActivityLevel, AssessmentInput, AssessmentRequest, BmiClassification, MacronutrientSplit,
    Objective, Sex,
};

fn config() -> AssessmentConfig {
    AssessmentConfig::default()
}

// === BMI ===

#[test]
fn test_bmi_reference_value_is_overweight() {
    let config = config();
    let bmi = calculate_bmi(180.0, 81.0, &config.limits, &config.bmi).unwrap();
    assert!((bmi.value - 25.0).abs() < 1e-9);
    assert_eq!(bmi.classification, BmiClassification::Overweight);
}

#[test]
fn test_bmi_bands() {
    let config = config();
    let classify = |h: f64, w: f64| {
        calculate_bmi(h, w, &config.limits, &config.bmi)
            .unwrap()
            .classification
    };
    assert_eq!(classify(180.0, 55.0), BmiClassification::Underweight);
    assert_eq!(classify(175.0, 70.0), BmiClassification::Normal);
    assert_eq!(classify(170.0, 100.0), BmiClassification::Obese);
}

#[test]
fn test_zero_height_is_invalid_input() {
    let config = config();
    let err = calculate_bmi(0.0, 70.0, &config.limits, &config.bmi).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[test]
fn test_implausible_weight_is_invalid_input() {
    let config = config();
    for weight in [-1.0, f64::NAN, 5.0, 900.0] {
        let err = calculate_bmi(175.0, weight, &config.limits, &config.bmi).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput, "weight {weight}");
    }
}

// === BMR / TDEE / target ===

#[test]
fn test_mifflin_st_jeor_reference_values() {
    let bmr = config().bmr;
    assert_eq!(
        calculate_mifflin_st_jeor(70.0, 175.0, 30, Sex::Male, &bmr).unwrap(),
        1649
    );
    assert_eq!(
        calculate_mifflin_st_jeor(60.0, 165.0, 25, Sex::Female, &bmr).unwrap(),
        1345
    );
}

#[test]
fn test_tdee_reference_value() {
    let factors = config().activity_factors;
    assert_eq!(
        calculate_tdee(1649, ActivityLevel::Moderate, 1.0, &factors).unwrap(),
        2556
    );
}

#[test]
fn test_tdee_rejects_out_of_range_profession_multiplier() {
    let factors = config().activity_factors;
    let err = calculate_tdee(1649, ActivityLevel::Moderate, 0.5, &factors).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert!(calculate_tdee(1649, ActivityLevel::Moderate, 1.5, &factors).is_ok());
}

#[test]
fn test_tdee_rejects_non_finite_activity_factor() {
    let mut factors = config().activity_factors;
    factors.moderate = f64::NAN;
    let err = calculate_tdee(1649, ActivityLevel::Moderate, 1.0, &factors).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    factors.moderate = f64::INFINITY;
    assert!(calculate_tdee(1649, ActivityLevel::Moderate, 1.0, &factors).is_err());
}

#[test]
fn test_nan_activity_factor_config_fails_before_computing() {
    let mut config = config();
    config.activity_factors.moderate = f64::NAN;
    let input = AssessmentInput {
        objective: Objective::GainMuscle,
        ..male_input()
    };
    let err = generate_physical_assessment(
        &input,
        as_of(),
        created_at(),
        &config,
        &NeutralProfessionAdjustment,
    )
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
}

#[test]
fn test_caloric_target_per_objective() {
    let policy = config().caloric_target;

    let lose = calculate_caloric_target(2556, Objective::LoseWeight, &policy).unwrap();
    assert_eq!(lose.value, 2106);
    assert!(!lose.explanation.is_empty());

    let maintain = calculate_caloric_target(2556, Objective::MaintainWeight, &policy).unwrap();
    assert_eq!(maintain.value, 2556);

    let gain = calculate_caloric_target(2556, Objective::GainMuscle, &policy).unwrap();
    assert_eq!(gain.value, 2956);
}

// === Weight goal ===

#[test]
fn test_weight_goal_outside_band_targets_boundary() {
    let config = config();
    let bmi = calculate_bmi(180.0, 81.0, &config.limits, &config.bmi).unwrap();
    let goal = recommend_weight_goal(
        &bmi,
        180.0,
        81.0,
        Objective::LoseWeight,
        &config.weight_goal,
    );
    // 24.9 x 3.24 = 80.676 kg, rounded down so the target stays inside the band
    assert!((goal.change_kg - -0.4).abs() < 1e-9);
    assert!((goal.target_weight_kg - 80.6).abs() < 1e-9);
    assert!(goal.target_weight_kg / 3.24 <= config.weight_goal.healthy_bmi_max);
    assert!(!goal.recommendation.contains("works against"));
}

#[test]
fn test_weight_goal_flags_conflicting_objective() {
    let config = config();
    let bmi = calculate_bmi(180.0, 55.0, &config.limits, &config.bmi).unwrap();
    let goal = recommend_weight_goal(
        &bmi,
        180.0,
        55.0,
        Objective::LoseWeight,
        &config.weight_goal,
    );
    // 18.5 x 3.24 = 59.94 kg, rounded up so the target stays inside the band
    assert!((goal.change_kg - 5.0).abs() < 1e-9);
    assert!((goal.target_weight_kg - 60.0).abs() < 1e-9);
    assert!(goal.target_weight_kg / 3.24 >= config.weight_goal.healthy_bmi_min);
    assert!(goal.recommendation.contains("works against"));
}

#[test]
fn test_weight_goal_maintain_keeps_weight_outside_band() {
    let config = config();
    let bmi = calculate_bmi(180.0, 100.0, &config.limits, &config.bmi).unwrap();
    assert_eq!(bmi.classification, BmiClassification::Obese);

    let goal = recommend_weight_goal(
        &bmi,
        180.0,
        100.0,
        Objective::MaintainWeight,
        &config.weight_goal,
    );
    assert!(goal.change_kg.abs() < 1e-9);
    assert!((goal.target_weight_kg - 100.0).abs() < 1e-9);
    assert!(goal.recommendation.contains("maintain your current weight"));
    assert!(goal.recommendation.contains("outside the healthy range"));
    assert!(!goal.recommendation.contains("Losing"));
}

#[test]
fn test_weight_goal_inside_band_uses_modest_change() {
    let config = config();
    let bmi = calculate_bmi(175.0, 70.0, &config.limits, &config.bmi).unwrap();
    let change = |objective| {
        recommend_weight_goal(&bmi, 175.0, 70.0, objective, &config.weight_goal).change_kg
    };
    assert!((change(Objective::LoseWeight) - -5.0).abs() < 1e-9);
    assert!((change(Objective::GainMuscle) - 3.0).abs() < 1e-9);
    assert!(change(Objective::MaintainWeight).abs() < 1e-9);
}

// === Macronutrients ===

#[test]
fn test_macro_split_conserves_energy_exactly() {
    let split =
        calculate_macronutrient_split(2556, MacroDistribution::new(25, 45, 30), 0.01).unwrap();
    assert_eq!(
        split,
        MacronutrientSplit {
            proteins_grams: 160,
            carbohydrates_grams: 290,
            fats_grams: 84,
        }
    );
    assert_eq!(split.energy_kcal(), 2556);
}

#[test]
fn test_macro_split_rejects_tiny_target() {
    let err =
        calculate_macronutrient_split(20, MacroDistribution::new(25, 45, 30), 0.01).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[test]
fn test_energy_mismatch_is_invariant_violation() {
    let split = MacronutrientSplit {
        proteins_grams: 100,
        carbohydrates_grams: 100,
        fats_grams: 10,
    };
    let err = verify_energy_balance(&split, 2000, 0.01).unwrap_err();
    assert_eq!(err.code, ErrorCode::ComputationInvariantViolation);
    assert_eq!(err.context.details["energyKcal"], 890);
}

#[test]
fn test_training_emphasis_shifts_percentages() {
    let base = MacroDistribution::new(35, 35, 30);
    assert_eq!(
        apply_training_emphasis(base, TrainingEmphasis::Endurance, 5).as_tuple(),
        (35, 40, 25)
    );
    assert_eq!(
        apply_training_emphasis(base, TrainingEmphasis::Strength, 5).as_tuple(),
        (40, 30, 30)
    );
}

// === Full pipeline ===

#[test]
fn test_full_assessment_for_reference_male() {
    let result = generate_physical_assessment(
        &male_input(),
        as_of(),
        created_at(),
        &config(),
        &NeutralProfessionAdjustment,
    )
    .unwrap();

    assert!((result.bmi.value - 22.86).abs() < 1e-9);
    assert_eq!(result.bmi.classification, BmiClassification::Normal);
    assert_eq!(result.bmr, 1649);
    assert_eq!(result.tdee, 2556);
    assert_eq!(result.daily_caloric_target.value, 2556);
    assert!(result.weight_goal.change_kg.abs() < 1e-9);
    assert_eq!(result.macronutrients.energy_kcal(), 2556);
    assert!(!result.general_recommendations.is_empty());
    assert_eq!(result.created_at, created_at());
}

#[test]
fn test_full_assessment_for_reference_female() {
    let result = generate_physical_assessment(
        &female_input(),
        as_of(),
        created_at(),
        &config(),
        &NeutralProfessionAdjustment,
    )
    .unwrap();
    assert_eq!(result.bmr, 1345);
}

#[test]
fn test_identical_input_serializes_identically() {
    let run = || {
        let result = generate_physical_assessment(
            &male_input(),
            as_of(),
            created_at(),
            &config(),
            &NeutralProfessionAdjustment,
        )
        .unwrap();
        serde_json::to_vec(&result).unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_result_uses_camel_case_fields() {
    let result = generate_physical_assessment(
        &male_input(),
        as_of(),
        created_at(),
        &config(),
        &NeutralProfessionAdjustment,
    )
    .unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert!(json.get("dailyCaloricTarget").is_some());
    assert!(json.get("generalRecommendations").is_some());
    assert!(json["macronutrients"].get("proteinsGrams").is_some());
    assert!(json["weightGoal"].get("changeKg").is_some());
}

#[test]
fn test_profession_rule_scales_tdee() {
    let strategy = KeywordProfessionAdjustment::new()
        .with_rule(["construction", "farm"], 1.1)
        .unwrap();
    let input = AssessmentInput {
        profession: "Construction worker".into(),
        ..male_input()
    };
    let result =
        generate_physical_assessment(&input, as_of(), created_at(), &config(), &strategy).unwrap();
    assert_eq!(result.tdee, 2812);
}

#[test]
fn test_lose_weight_with_endurance_training() {
    let input = AssessmentInput {
        objective: Objective::LoseWeight,
        training_type: "Marathon running".into(),
        ..male_input()
    };
    let result = generate_physical_assessment(
        &input,
        as_of(),
        created_at(),
        &config(),
        &NeutralProfessionAdjustment,
    )
    .unwrap();
    assert_eq!(result.daily_caloric_target.value, 2106);
    assert_eq!(result.macronutrients.energy_kcal(), 2106);
    assert!(result.macronutrients.carbohydrates_grams > result.macronutrients.proteins_grams);
    assert!(result.general_recommendations.contains("endurance"));
}

#[test]
fn test_birth_date_after_assessment_date_is_invalid() {
    let input = AssessmentInput {
        date_of_birth: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        ..male_input()
    };
    let err = generate_physical_assessment(
        &input,
        as_of(),
        created_at(),
        &config(),
        &NeutralProfessionAdjustment,
    )
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[test]
fn test_implausible_age_is_invalid() {
    let input = AssessmentInput {
        date_of_birth: NaiveDate::from_ymd_opt(1880, 1, 1).unwrap(),
        ..male_input()
    };
    let err = generate_physical_assessment(
        &input,
        as_of(),
        created_at(),
        &config(),
        &NeutralProfessionAdjustment,
    )
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[test]
fn test_invalid_config_is_rejected_before_computing() {
    let mut config = config();
    config.caloric_target.deficit_kcal = 900;
    let err = generate_physical_assessment(
        &male_input(),
        as_of(),
        created_at(),
        &config,
        &NeutralProfessionAdjustment,
    )
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
}

// === Raw request parsing ===

fn request(activity_level: &str) -> AssessmentRequest {
    AssessmentRequest {
        sex: "male".into(),
        date_of_birth: "1995-01-15".into(),
        height_cm: 175.0,
        weight_kg: 70.0,
        activity_level: activity_level.into(),
        profession: "Engineer".into(),
        objective: "maintain_weight".into(),
        training_type: String::new(),
    }
}

#[test]
fn test_unknown_activity_label_is_invalid_input() {
    let err = AssessmentInput::try_from(request("couch_potato")).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[test]
fn test_legacy_labels_are_accepted() {
    let mut legacy = request("Muito_Ativo");
    legacy.sex = "Masculino".into();
    legacy.objective = "Perder_peso".into();
    let input = AssessmentInput::try_from(legacy).unwrap();
    assert_eq!(input.activity_level, ActivityLevel::VeryActive);
    assert_eq!(input.objective, Objective::LoseWeight);
}

#[test]
fn test_malformed_birth_date_is_invalid_input() {
    let mut bad = request("moderate");
    bad.date_of_birth = "15/01/1995".into();
    let err = AssessmentInput::try_from(bad).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}
