// ABOUTME: Physical assessment calculator for BMI, BMR, TDEE, caloric target and macros
// ABOUTME: Pure deterministic formulas; no clock access, logging or persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Physical Assessment Calculator
//!
//! Implements the deterministic part of a user's first assessment. Every
//! function is pure: the reference date and creation timestamp are supplied
//! by the caller, so identical arguments always produce identical results.
//!
//! # Scientific References
//!
//! - WHO (2000). Obesity: preventing and managing the global epidemic.
//!   *WHO Technical Report Series* 894.
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>
//!
//! - `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010). *Exercise Physiology*.
//!
//! - Helms, E.R., et al. (2014). Evidence-based recommendations for natural
//!   bodybuilding contest preparation: nutrition and supplementation.
//!   *Journal of the International Society of Sports Nutrition*, 11, 20.
//!   <https://doi.org/10.1186/1550-2783-11-20>

use chrono::{DateTime, NaiveDate, Utc};
use nutrilens_core::errors::{AppError, AppResult};
use nutrilens_core::models::{
    ActivityLevel, AssessmentInput, AssessmentResult, BmiAssessment, BmiClassification,
    CaloricTarget, MacronutrientSplit, Objective, Sex, WeightGoal,
};
use serde::{Deserialize, Serialize};

use super::physiological_constants::energy::{
    KCAL_PER_GRAM_CARBS, KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN, MIN_SPLITTABLE_TARGET_KCAL,
};
use super::physiological_constants::units::CM_PER_METER;
use super::profession::{validate_multiplier, ProfessionAdjustment};
use crate::config::intelligence::{
    ActivityFactorsConfig, AssessmentConfig, BiometricLimitsConfig, BmiConfig, BmrConfig,
    CaloricTargetConfig, MacroDistribution, WeightGoalConfig,
};

/// Training focus derived from the free-text training type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrainingEmphasis {
    /// No shift from the objective's table
    Balanced,
    /// Carbohydrate leaning (running, cycling, swimming)
    Endurance,
    /// Protein leaning (weight training, hypertrophy)
    Strength,
}

const ENDURANCE_KEYWORDS: &[&str] = &[
    "run",
    "jog",
    "marathon",
    "cycl",
    "bike",
    "swim",
    "triathlon",
    "rowing",
    "cardio",
    "endurance",
    "corrida",
    "ciclismo",
    "natacao",
    "natação",
];

const STRENGTH_KEYWORDS: &[&str] = &[
    "strength",
    "weight",
    "lifting",
    "powerlifting",
    "bodybuilding",
    "hypertrophy",
    "resistance",
    "crossfit",
    "calisthenics",
    "gym",
    "musculacao",
    "musculação",
];

/// Round half away from zero to `decimals` places
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

fn floor_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).floor() / factor
}

fn ceil_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).ceil() / factor
}

fn height_m_squared(height_cm: f64) -> f64 {
    let height_m = height_cm / CM_PER_METER;
    height_m * height_m
}

/// Check height and weight against the plausible biometric domain
///
/// # Errors
///
/// Returns `InvalidInput` for non-finite, non-positive or out of range values
pub fn validate_biometrics(
    height_cm: f64,
    weight_kg: f64,
    limits: &BiometricLimitsConfig,
) -> AppResult<()> {
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return Err(AppError::invalid_input("Height must be a positive number"));
    }
    if !(limits.min_height_cm..=limits.max_height_cm).contains(&height_cm) {
        return Err(AppError::invalid_input(format!(
            "Height must be between {} and {} cm",
            limits.min_height_cm, limits.max_height_cm
        )));
    }
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(AppError::invalid_input("Weight must be a positive number"));
    }
    if !(limits.min_weight_kg..=limits.max_weight_kg).contains(&weight_kg) {
        return Err(AppError::invalid_input(format!(
            "Weight must be between {} and {} kg",
            limits.min_weight_kg, limits.max_weight_kg
        )));
    }
    Ok(())
}

/// Classify a BMI value into its band
#[must_use]
pub fn classify_bmi(bmi: f64, config: &BmiConfig) -> BmiClassification {
    if bmi < config.normal_from {
        BmiClassification::Underweight
    } else if bmi < config.overweight_from {
        BmiClassification::Normal
    } else if bmi < config.obese_from {
        BmiClassification::Overweight
    } else {
        BmiClassification::Obese
    }
}

/// Calculate Body Mass Index
///
/// Formula: BMI = `weight_kg` / `height_m`²
///
/// The value is rounded to 2 decimals and the band is taken from the rounded
/// value, so a computed 24.999... reports as 25.00 overweight.
///
/// # Errors
///
/// Returns `InvalidInput` if height or weight is outside the plausible domain
pub fn calculate_bmi(
    height_cm: f64,
    weight_kg: f64,
    limits: &BiometricLimitsConfig,
    config: &BmiConfig,
) -> AppResult<BmiAssessment> {
    validate_biometrics(height_cm, weight_kg, limits)?;

    let value = round_to(weight_kg / height_m_squared(height_cm), 2);
    Ok(BmiAssessment {
        value,
        classification: classify_bmi(value, config),
    })
}

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation (1990)
///
/// Formula: BMR = (10 x `weight_kg`) + (6.25 x `height_cm`) - (5 x age) + `sex_constant`
/// - Male: +5
/// - Female: -161
///
/// # Reference
/// Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
///
/// # Errors
///
/// Returns `InvalidInput` if the rounded result is not positive
pub fn calculate_mifflin_st_jeor(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    sex: Sex,
    config: &BmrConfig,
) -> AppResult<u32> {
    let weight_component = config.msj_weight_coef * weight_kg;
    let height_component = config.msj_height_coef * height_cm;
    let age_component = config.msj_age_coef * f64::from(age);

    let sex_constant = match sex {
        Sex::Male => config.msj_male_constant,
        Sex::Female => config.msj_female_constant,
    };

    let bmr = (weight_component + height_component + age_component + sex_constant).round();
    if !bmr.is_finite() || bmr <= 0.0 {
        return Err(AppError::invalid_input(format!(
            "BMR of {bmr} kcal is not positive for these biometrics"
        )));
    }

    Ok(bmr as u32)
}

/// Calculate Total Daily Energy Expenditure (TDEE)
///
/// Formula: TDEE = BMR x Activity Factor x Profession Multiplier
///
/// # Reference
/// `McArdle` et al. (2010) - Exercise Physiology
///
/// # Errors
///
/// Returns `InvalidInput` if BMR is zero, the profession multiplier is
/// outside (0.5, 1.5] or the product is not a positive finite number
pub fn calculate_tdee(
    bmr: u32,
    activity_level: ActivityLevel,
    profession_multiplier: f64,
    config: &ActivityFactorsConfig,
) -> AppResult<u32> {
    if bmr == 0 {
        return Err(AppError::invalid_input("BMR must be positive"));
    }
    let profession_multiplier = validate_multiplier(profession_multiplier)?;

    let tdee = (f64::from(bmr) * config.factor_for(activity_level) * profession_multiplier).round();
    if !tdee.is_finite() || tdee <= 0.0 || tdee > f64::from(u32::MAX) {
        return Err(AppError::invalid_input(format!(
            "TDEE of {tdee} kcal is not a positive finite value for activity level {activity_level}"
        )));
    }
    Ok(tdee as u32)
}

/// Daily intake target for an objective
///
/// - `lose_weight`: TDEE minus the configured deficit
/// - `maintain_weight`: TDEE
/// - `gain_muscle`: TDEE plus the configured surplus
///
/// # Errors
///
/// Returns `InvalidInput` if the target would not be positive
pub fn calculate_caloric_target(
    tdee: u32,
    objective: Objective,
    config: &CaloricTargetConfig,
) -> AppResult<CaloricTarget> {
    let (value, explanation) = match objective {
        Objective::LoseWeight => {
            let deficit = config.deficit_kcal;
            (
                i64::from(tdee) - i64::from(deficit),
                format!(
                    "Your TDEE of {tdee} kcal minus a {deficit} kcal deficit supports gradual fat loss of roughly 0.4-0.5 kg per week while preserving lean mass."
                ),
            )
        }
        Objective::MaintainWeight => (
            i64::from(tdee),
            format!("Eating at your TDEE of {tdee} kcal keeps your weight stable."),
        ),
        Objective::GainMuscle => {
            let surplus = config.surplus_kcal;
            (
                i64::from(tdee) + i64::from(surplus),
                format!(
                    "Your TDEE of {tdee} kcal plus a {surplus} kcal surplus fuels muscle growth while limiting fat gain."
                ),
            )
        }
    };

    let value = u32::try_from(value)
        .ok()
        .filter(|kcal| *kcal > 0)
        .ok_or_else(|| {
            AppError::invalid_input(format!(
                "Caloric target of {value} kcal is not positive for a TDEE of {tdee} kcal"
            ))
        })?;

    Ok(CaloricTarget { value, explanation })
}

/// Recommend a weight change toward or within the healthy BMI band
///
/// `maintain_weight` always keeps the current weight; outside the band it
/// only notes where the BMI sits. For the other objectives, outside the band
/// the target is the weight at the nearest band edge, rounded to 0.1 kg toward
/// the band interior. Inside the band the configured modest change applies.
#[must_use]
pub fn recommend_weight_goal(
    bmi: &BmiAssessment,
    height_cm: f64,
    weight_kg: f64,
    objective: Objective,
    config: &WeightGoalConfig,
) -> WeightGoal {
    let height_m2 = height_m_squared(height_cm);

    let target_weight_kg = if bmi.value < config.healthy_bmi_min {
        ceil_to(config.healthy_bmi_min * height_m2, 1)
    } else if bmi.value > config.healthy_bmi_max {
        floor_to(config.healthy_bmi_max * height_m2, 1)
    } else {
        return healthy_band_goal(weight_kg, objective, config);
    };

    if objective == Objective::MaintainWeight {
        return WeightGoal {
            recommendation: format!(
                "Your BMI of {:.2} is outside the healthy range. Your objective is to maintain your current weight of {weight_kg:.1} kg; reaching about {target_weight_kg:.1} kg would bring it into the range.",
                bmi.value
            ),
            change_kg: 0.0,
            target_weight_kg: round_to(weight_kg, 1),
        };
    }

    let change_kg = normalize_zero(round_to(target_weight_kg - weight_kg, 1));
    let target_bmi = round_to(target_weight_kg / height_m2, 2);

    let mut recommendation = if change_kg.abs() < f64::EPSILON {
        format!(
            "Your BMI of {:.2} sits at the edge of the healthy range. Maintain your current weight of {target_weight_kg:.1} kg.",
            bmi.value
        )
    } else if change_kg > 0.0 {
        format!(
            "Your BMI of {:.2} is below the healthy range. Gaining about {change_kg:.1} kg, to {target_weight_kg:.1} kg, would bring it to {target_bmi:.2}.",
            bmi.value
        )
    } else {
        format!(
            "Your BMI of {:.2} is above the healthy range. Losing about {:.1} kg, to {target_weight_kg:.1} kg, would bring it to {target_bmi:.2}.",
            bmi.value,
            change_kg.abs()
        )
    };

    let conflicts = (change_kg > 0.0 && objective == Objective::LoseWeight)
        || (change_kg < 0.0 && objective == Objective::GainMuscle);
    if conflicts {
        recommendation.push_str(&format!(
            " Your objective ({}) works against this; consider reviewing it with a health professional.",
            objective.label().to_lowercase()
        ));
    }

    WeightGoal {
        recommendation,
        change_kg,
        target_weight_kg,
    }
}

fn healthy_band_goal(weight_kg: f64, objective: Objective, config: &WeightGoalConfig) -> WeightGoal {
    let (change_kg, recommendation) = match objective {
        Objective::LoseWeight => {
            let change = round_to(-config.lose_weight_modest_kg, 1);
            (
                change,
                format!(
                    "Your BMI is within the healthy range. A modest loss of {:.1} kg fits your objective.",
                    change.abs()
                ),
            )
        }
        Objective::GainMuscle => {
            let change = round_to(config.gain_muscle_modest_kg, 1);
            (
                change,
                format!(
                    "Your BMI is within the healthy range. A lean gain of about {change:.1} kg supports muscle growth."
                ),
            )
        }
        Objective::MaintainWeight => (
            0.0,
            format!(
                "Your BMI is within the healthy range. Maintain your current weight of {weight_kg:.1} kg."
            ),
        ),
    };

    let change_kg = normalize_zero(change_kg);
    WeightGoal {
        recommendation,
        change_kg,
        target_weight_kg: round_to(weight_kg + change_kg, 1),
    }
}

/// Map `-0.0` to `0.0` so serialized output never carries a signed zero
fn normalize_zero(value: f64) -> f64 {
    if value.abs() < f64::EPSILON {
        0.0
    } else {
        value
    }
}

/// Classify the free-text training type
///
/// Mixed or unrecognized descriptions are balanced.
#[must_use]
pub fn classify_training_type(training_type: &str) -> TrainingEmphasis {
    let text = training_type.to_lowercase();
    let endurance = ENDURANCE_KEYWORDS.iter().any(|k| text.contains(k));
    let strength = STRENGTH_KEYWORDS.iter().any(|k| text.contains(k));

    match (endurance, strength) {
        (true, false) => TrainingEmphasis::Endurance,
        (false, true) => TrainingEmphasis::Strength,
        _ => TrainingEmphasis::Balanced,
    }
}

/// Shift a distribution toward the training emphasis
///
/// Endurance moves `shift_pct` points from fat to carbohydrates; strength
/// moves them from carbohydrates to protein.
#[must_use]
pub const fn apply_training_emphasis(
    distribution: MacroDistribution,
    emphasis: TrainingEmphasis,
    shift_pct: u8,
) -> MacroDistribution {
    match emphasis {
        TrainingEmphasis::Balanced => distribution,
        TrainingEmphasis::Endurance => {
            let shift = min_u8(shift_pct, distribution.fat_pct);
            MacroDistribution {
                protein_pct: distribution.protein_pct,
                carbs_pct: distribution.carbs_pct + shift,
                fat_pct: distribution.fat_pct - shift,
            }
        }
        TrainingEmphasis::Strength => {
            let shift = min_u8(shift_pct, distribution.carbs_pct);
            MacroDistribution {
                protein_pct: distribution.protein_pct + shift,
                carbs_pct: distribution.carbs_pct - shift,
                fat_pct: distribution.fat_pct,
            }
        }
    }
}

const fn min_u8(a: u8, b: u8) -> u8 {
    if a < b {
        a
    } else {
        b
    }
}

/// Allocate grams so that `4p + 4c + 9f` equals the target exactly
///
/// Fat energy must leave a multiple of 4 kcal for the other two macros, which
/// holds when `fat ≡ target (mod 4)`. Fat is the congruent gram count nearest
/// to its share, protein is rounded from its share and carbohydrates take the
/// remainder.
///
/// # Errors
///
/// Returns `InvalidInput` for targets below 27 kcal and
/// `ComputationInvariantViolation` if the identity does not hold
pub fn calculate_macronutrient_split(
    target_kcal: u32,
    distribution: MacroDistribution,
    energy_tolerance_ratio: f64,
) -> AppResult<MacronutrientSplit> {
    if target_kcal < MIN_SPLITTABLE_TARGET_KCAL {
        return Err(AppError::invalid_input(format!(
            "Caloric target of {target_kcal} kcal is too low to split into macronutrients (minimum {MIN_SPLITTABLE_TARGET_KCAL})"
        )));
    }
    if distribution.total() != 100 {
        return Err(AppError::invalid_input(format!(
            "Macro percentages must sum to 100, got {}",
            distribution.total()
        )));
    }

    let target = u64::from(target_kcal);
    let fat_kcal = u64::from(KCAL_PER_GRAM_FAT);
    let lean_kcal = u64::from(KCAL_PER_GRAM_PROTEIN);
    let residue = target % lean_kcal;

    let ideal_fat = (target * u64::from(distribution.fat_pct)) as f64 / (100.0 * fat_kcal as f64);
    let steps = ((ideal_fat - residue as f64) / lean_kcal as f64).round().max(0.0) as u64;
    let mut fats = residue + lean_kcal * steps;
    while fats * fat_kcal > target {
        fats -= lean_kcal;
    }

    let remaining = (target - fats * fat_kcal) / lean_kcal;
    let ideal_protein =
        (target * u64::from(distribution.protein_pct)) as f64 / (100.0 * lean_kcal as f64);
    let proteins = (ideal_protein.round() as u64).min(remaining);
    let carbohydrates = remaining - proteins;

    let split = MacronutrientSplit {
        proteins_grams: proteins as u32,
        carbohydrates_grams: carbohydrates as u32,
        fats_grams: fats as u32,
    };

    verify_energy_balance(&split, target_kcal, energy_tolerance_ratio)?;
    Ok(split)
}

/// Check `|4p + 4c + 9f - target| <= tolerance * target`
///
/// # Errors
///
/// Returns `ComputationInvariantViolation` when the identity is broken
pub fn verify_energy_balance(
    split: &MacronutrientSplit,
    target_kcal: u32,
    tolerance_ratio: f64,
) -> AppResult<()> {
    let energy = u64::from(split.proteins_grams) * u64::from(KCAL_PER_GRAM_PROTEIN)
        + u64::from(split.carbohydrates_grams) * u64::from(KCAL_PER_GRAM_CARBS)
        + u64::from(split.fats_grams) * u64::from(KCAL_PER_GRAM_FAT);
    let deviation = energy.abs_diff(u64::from(target_kcal)) as f64;

    if deviation > tolerance_ratio * f64::from(target_kcal) {
        return Err(AppError::invariant_violation(format!(
            "Macronutrient energy {energy} kcal deviates from target {target_kcal} kcal"
        ))
        .with_details(serde_json::json!({
            "energyKcal": energy,
            "targetKcal": target_kcal,
            "proteinsGrams": split.proteins_grams,
            "carbohydratesGrams": split.carbohydrates_grams,
            "fatsGrams": split.fats_grams,
        })));
    }
    Ok(())
}

/// Deterministic guidance used when no narrative service is available
#[must_use]
pub fn general_recommendations(
    bmi: &BmiAssessment,
    activity_level: ActivityLevel,
    objective: Objective,
    emphasis: TrainingEmphasis,
    target: &CaloricTarget,
) -> String {
    let mut lines = Vec::with_capacity(5);

    lines.push(match objective {
        Objective::LoseWeight => format!(
            "Aim for about {} kcal per day and prioritise protein at every meal to protect lean mass.",
            target.value
        ),
        Objective::MaintainWeight => format!(
            "Aim for about {} kcal per day and keep meal timing consistent.",
            target.value
        ),
        Objective::GainMuscle => format!(
            "Aim for about {} kcal per day and spread protein across 3-5 meals.",
            target.value
        ),
    });

    lines.push(
        match bmi.classification {
            BmiClassification::Underweight => {
                "Your BMI is below the healthy range; favour energy-dense whole foods."
            }
            BmiClassification::Normal => "Your BMI is within the healthy range.",
            BmiClassification::Overweight => {
                "Your BMI is above the healthy range; favour high-fibre, minimally processed foods."
            }
            BmiClassification::Obese => {
                "Your BMI is in the obese range; consider following up with a health professional."
            }
        }
        .to_owned(),
    );

    if activity_level <= ActivityLevel::Light {
        lines.push(
            "Adding regular moderate activity, such as brisk walks, would raise your daily expenditure."
                .to_owned(),
        );
    }

    match emphasis {
        TrainingEmphasis::Endurance => lines.push(
            "Your endurance training favours carbohydrates around longer sessions.".to_owned(),
        ),
        TrainingEmphasis::Strength => lines.push(
            "Your strength training favours protein after each session.".to_owned(),
        ),
        TrainingEmphasis::Balanced => {}
    }

    lines.push("Drink water regularly throughout the day.".to_owned());
    lines.join(" ")
}

/// Run the full assessment pipeline
///
/// `as_of` is the date the age is computed on and `created_at` the timestamp
/// stored on the result; neither is read from the clock here.
///
/// # Errors
///
/// Returns `ConfigInvalid` for an invalid configuration, `InvalidInput` for
/// out of domain input and `ComputationInvariantViolation` if the macronutrient
/// energy identity breaks
pub fn generate_physical_assessment(
    input: &AssessmentInput,
    as_of: NaiveDate,
    created_at: DateTime<Utc>,
    config: &AssessmentConfig,
    profession: &dyn ProfessionAdjustment,
) -> AppResult<AssessmentResult> {
    config.validate()?;

    let age = input.age_on(as_of)?;
    if age > config.limits.max_age_years {
        return Err(AppError::invalid_input(format!(
            "Age of {age} years exceeds the supported maximum of {}",
            config.limits.max_age_years
        )));
    }

    let bmi = calculate_bmi(input.height_cm, input.weight_kg, &config.limits, &config.bmi)?;
    let bmr = calculate_mifflin_st_jeor(
        input.weight_kg,
        input.height_cm,
        age,
        input.sex,
        &config.bmr,
    )?;
    let tdee = calculate_tdee(
        bmr,
        input.activity_level,
        profession.multiplier(&input.profession),
        &config.activity_factors,
    )?;
    let daily_caloric_target = calculate_caloric_target(tdee, input.objective, &config.caloric_target)?;
    let weight_goal = recommend_weight_goal(
        &bmi,
        input.height_cm,
        input.weight_kg,
        input.objective,
        &config.weight_goal,
    );

    let emphasis = classify_training_type(&input.training_type);
    let distribution = apply_training_emphasis(
        config.macronutrients.distribution_for(input.objective),
        emphasis,
        config.macronutrients.emphasis_shift_pct,
    );
    let macronutrients = calculate_macronutrient_split(
        daily_caloric_target.value,
        distribution,
        config.macronutrients.energy_tolerance_ratio,
    )?;

    let general_recommendations = general_recommendations(
        &bmi,
        input.activity_level,
        input.objective,
        emphasis,
        &daily_caloric_target,
    );

    Ok(AssessmentResult {
        bmi,
        bmr,
        tdee,
        daily_caloric_target,
        weight_goal,
        macronutrients,
        general_recommendations,
        created_at,
    })
}
