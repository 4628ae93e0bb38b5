// ABOUTME: Physical assessment input and result records shared by calculator, services and CLI
// ABOUTME: Sex, ActivityLevel, Objective, BmiClassification plus AssessmentInput and AssessmentResult
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Biological sex used by the Mifflin-St Jeor constant
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    /// Male (+5 kcal constant)
    #[serde(alias = "Masculino")]
    Male,
    /// Female (-161 kcal constant)
    #[serde(alias = "Feminino")]
    Female,
}

impl Sex {
    /// Canonical snake case label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl FromStr for Sex {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "masculino" => Ok(Self::Male),
            "female" | "feminino" => Ok(Self::Female),
            other => Err(AppError::invalid_input(format!("Unknown sex '{other}'"))),
        }
    }
}

/// Activity level driving the TDEE multiplier
///
/// Variants are declared in ascending order of energy expenditure, so the
/// derived `Ord` matches the ordinal rank of the multipliers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise, mostly seated work
    #[serde(alias = "Sedentario")]
    Sedentary,
    /// Occasional walks, light activity 1-2 times a week
    #[serde(alias = "Leve")]
    Light,
    /// Moderate exercise 3-5 times a week
    #[serde(alias = "Moderado")]
    Moderate,
    /// Intense exercise 6-7 times a week
    #[serde(alias = "Muito_Ativo")]
    VeryActive,
    /// Heavy daily training or physically demanding work
    #[serde(alias = "Extremo")]
    Extreme,
}

impl ActivityLevel {
    /// All levels in ascending order
    pub const ALL: [Self; 5] = [
        Self::Sedentary,
        Self::Light,
        Self::Moderate,
        Self::VeryActive,
        Self::Extreme,
    ];

    /// Canonical snake case label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::VeryActive => "very_active",
            Self::Extreme => "extreme",
        }
    }

    /// Short description shown to users and embedded in AI prompts
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Sedentary => "Sedentary (little or no exercise, mostly seated work)",
            Self::Light => "Lightly active (occasional walks, light activity 1-2x per week)",
            Self::Moderate => "Moderately active (moderate exercise 3-5x per week)",
            Self::VeryActive => "Very active (intense exercise 6-7x per week)",
            Self::Extreme => "Extremely active (heavy daily training or physically demanding work)",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sedentary" | "sedentario" => Ok(Self::Sedentary),
            "light" | "leve" => Ok(Self::Light),
            "moderate" | "moderado" => Ok(Self::Moderate),
            "very_active" | "muito_ativo" => Ok(Self::VeryActive),
            "extreme" | "extremo" => Ok(Self::Extreme),
            other => Err(AppError::invalid_input(format!(
                "Unknown activity level '{other}'"
            ))),
        }
    }
}

/// Body composition objective selecting the caloric policy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    /// Caloric deficit
    #[serde(alias = "Perder_peso")]
    LoseWeight,
    /// Caloric balance
    #[serde(alias = "Manter_peso")]
    MaintainWeight,
    /// Caloric surplus
    #[serde(alias = "Ganhar_massa")]
    GainMuscle,
}

impl Objective {
    /// Canonical snake case label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LoseWeight => "lose_weight",
            Self::MaintainWeight => "maintain_weight",
            Self::GainMuscle => "gain_muscle",
        }
    }

    /// Human readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::LoseWeight => "Lose weight",
            Self::MaintainWeight => "Maintain weight",
            Self::GainMuscle => "Gain muscle mass",
        }
    }
}

impl FromStr for Objective {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lose_weight" | "perder_peso" => Ok(Self::LoseWeight),
            "maintain_weight" | "manter_peso" => Ok(Self::MaintainWeight),
            "gain_muscle" | "ganhar_massa" => Ok(Self::GainMuscle),
            other => Err(AppError::invalid_input(format!("Unknown objective '{other}'"))),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Biometric and lifestyle attributes consumed by the calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentInput {
    /// Biological sex
    pub sex: Sex,
    /// Date of birth; age is derived from it at a caller supplied date
    pub date_of_birth: NaiveDate,
    /// Height in centimeters
    pub height_cm: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Habitual activity level
    pub activity_level: ActivityLevel,
    /// Free text profession, a qualitative TDEE signal only
    pub profession: String,
    /// Body composition objective
    pub objective: Objective,
    /// Free text training description
    pub training_type: String,
}

impl AssessmentInput {
    /// Age in whole years on `as_of`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when `as_of` precedes the date of birth
    pub fn age_on(&self, as_of: NaiveDate) -> AppResult<u32> {
        let mut years = as_of.year() - self.date_of_birth.year();
        if (as_of.month(), as_of.day()) < (self.date_of_birth.month(), self.date_of_birth.day()) {
            years -= 1;
        }
        u32::try_from(years).map_err(|_| {
            AppError::invalid_input(format!(
                "Date of birth {} lies after the assessment date {as_of}",
                self.date_of_birth
            ))
        })
    }
}

/// Untyped form of [`AssessmentInput`] as submitted by a profile form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRequest {
    /// Biological sex label
    pub sex: String,
    /// ISO-8601 date (YYYY-MM-DD)
    pub date_of_birth: String,
    /// Height in centimeters
    pub height_cm: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Activity level label
    pub activity_level: String,
    /// Free text profession
    #[serde(default)]
    pub profession: String,
    /// Objective label
    pub objective: String,
    /// Free text training description
    #[serde(default)]
    pub training_type: String,
}

impl TryFrom<AssessmentRequest> for AssessmentInput {
    type Error = AppError;

    fn try_from(request: AssessmentRequest) -> Result<Self, Self::Error> {
        let date_of_birth = NaiveDate::parse_from_str(request.date_of_birth.trim(), "%Y-%m-%d")
            .map_err(|e| {
                AppError::invalid_input(format!(
                    "Invalid date of birth '{}': {e}",
                    request.date_of_birth
                ))
            })?;

        Ok(Self {
            sex: request.sex.parse()?,
            date_of_birth,
            height_cm: request.height_cm,
            weight_kg: request.weight_kg,
            activity_level: request.activity_level.parse()?,
            profession: request.profession,
            objective: request.objective.parse()?,
            training_type: request.training_type,
        })
    }
}

/// WHO-style BMI bands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BmiClassification {
    /// BMI below 18.5
    Underweight,
    /// 18.5 to below 25.0
    Normal,
    /// 25.0 to below 30.0
    Overweight,
    /// 30.0 and above
    Obese,
}

impl BmiClassification {
    /// Canonical label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Underweight => "underweight",
            Self::Normal => "normal",
            Self::Overweight => "overweight",
            Self::Obese => "obese",
        }
    }
}

impl fmt::Display for BmiClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// BMI value and its band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiAssessment {
    /// BMI rounded to 2 decimals
    pub value: f64,
    /// Band of the rounded value
    pub classification: BmiClassification,
}

/// Daily caloric target and how it was derived
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaloricTarget {
    /// kcal/day
    pub value: u32,
    /// Human readable derivation
    pub explanation: String,
}

/// Recommended weight change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightGoal {
    /// Human readable recommendation
    pub recommendation: String,
    /// Signed change in kg, 1 decimal; zero means maintain
    pub change_kg: f64,
    /// Weight after the change, 1 decimal
    pub target_weight_kg: f64,
}

/// Daily macronutrient allocation in grams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacronutrientSplit {
    /// Protein grams (4 kcal/g)
    pub proteins_grams: u32,
    /// Carbohydrate grams (4 kcal/g)
    pub carbohydrates_grams: u32,
    /// Fat grams (9 kcal/g)
    pub fats_grams: u32,
}

impl MacronutrientSplit {
    /// Energy content of the split in kcal
    #[must_use]
    pub const fn energy_kcal(&self) -> u32 {
        4 * self.proteins_grams + 4 * self.carbohydrates_grams + 9 * self.fats_grams
    }
}

/// Complete physical assessment, created once per user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    /// Body mass index
    pub bmi: BmiAssessment,
    /// Basal metabolic rate, kcal/day
    pub bmr: u32,
    /// Total daily energy expenditure, kcal/day
    pub tdee: u32,
    /// Objective dependent intake target
    pub daily_caloric_target: CaloricTarget,
    /// Recommended weight change
    pub weight_goal: WeightGoal,
    /// Macronutrient grams for the target
    pub macronutrients: MacronutrientSplit,
    /// Free text guidance
    pub general_recommendations: String,
    /// Creation timestamp supplied by the caller
    pub created_at: DateTime<Utc>,
}
