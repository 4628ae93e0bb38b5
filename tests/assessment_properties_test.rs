// ABOUTME: Property tests for energy conservation and monotonicity of the calculator
// ABOUTME: Uses proptest over the whole plausible input domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use nutrilens::config::AssessmentConfig;
use nutrilens::intelligence::{
    apply_training_emphasis, calculate_bmi, calculate_macronutrient_split,
    calculate_mifflin_st_jeor, calculate_tdee, recommend_weight_goal, TrainingEmphasis,
};
use nutrilens::models::{ActivityLevel, Objective, Sex};
use proptest::prelude::*;

fn objective() -> impl Strategy<Value = Objective> {
    prop_oneof![
        Just(Objective::LoseWeight),
        Just(Objective::MaintainWeight),
        Just(Objective::GainMuscle),
    ]
}

fn emphasis() -> impl Strategy<Value = TrainingEmphasis> {
    prop_oneof![
        Just(TrainingEmphasis::Balanced),
        Just(TrainingEmphasis::Endurance),
        Just(TrainingEmphasis::Strength),
    ]
}

fn sex() -> impl Strategy<Value = Sex> {
    prop_oneof![Just(Sex::Male), Just(Sex::Female)]
}

proptest! {
    #[test]
    fn macro_split_conserves_energy(
        target in 27_u32..=10_000,
        objective in objective(),
        emphasis in emphasis(),
    ) {
        let config = AssessmentConfig::default();
        let distribution = apply_training_emphasis(
            config.macronutrients.distribution_for(objective),
            emphasis,
            config.macronutrients.emphasis_shift_pct,
        );
        let split = calculate_macronutrient_split(
            target,
            distribution,
            config.macronutrients.energy_tolerance_ratio,
        )
        .unwrap();

        let energy = split.energy_kcal();
        prop_assert!(f64::from(energy.abs_diff(target)) <= 0.01 * f64::from(target));
        prop_assert_eq!(energy, target);
    }

    #[test]
    fn bmr_strictly_increases_with_weight(
        weight in 30.0_f64..200.0,
        height in 140.0_f64..210.0,
        age in 18_u32..80,
        sex in sex(),
    ) {
        let bmr = AssessmentConfig::default().bmr;
        let lighter = calculate_mifflin_st_jeor(weight, height, age, sex, &bmr).unwrap();
        let heavier = calculate_mifflin_st_jeor(weight + 1.0, height, age, sex, &bmr).unwrap();
        prop_assert!(heavier > lighter);
    }

    #[test]
    fn tdee_strictly_increases_with_activity(bmr in 800_u32..3_000) {
        let factors = AssessmentConfig::default().activity_factors;
        let tdees: Vec<u32> = ActivityLevel::ALL
            .iter()
            .map(|level| calculate_tdee(bmr, *level, 1.0, &factors).unwrap())
            .collect();
        for pair in tdees.windows(2) {
            prop_assert!(pair[1] > pair[0], "{:?}", tdees);
        }
    }

    #[test]
    fn weight_goal_target_lands_inside_healthy_band(
        height in 140.0_f64..210.0,
        weight in 35.0_f64..200.0,
        objective in objective(),
    ) {
        let config = AssessmentConfig::default();
        let bmi = calculate_bmi(height, weight, &config.limits, &config.bmi).unwrap();
        let goal = recommend_weight_goal(&bmi, height, weight, objective, &config.weight_goal);

        if objective == Objective::MaintainWeight {
            prop_assert!(goal.change_kg.abs() < 1e-9);
        } else {
            let height_m = height / 100.0;
            let target_bmi = goal.target_weight_kg / (height_m * height_m);
            prop_assert!(
                target_bmi >= config.weight_goal.healthy_bmi_min - 1e-9,
                "target BMI {} below band", target_bmi
            );
            prop_assert!(
                target_bmi <= config.weight_goal.healthy_bmi_max + 1e-9,
                "target BMI {} above band", target_bmi
            );
        }
    }
}
