// ABOUTME: Assessment configuration container with global loading and validation
// ABOUTME: Orchestrates the nutrition policy configs and applies NUTRILENS_* environment overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Assessment Configuration Module
//!
//! Type-safe configuration for the physical assessment calculator.
//!
//! # Loading
//!
//! [`AssessmentConfig::load`] starts from the defaults, applies `NUTRILENS_*`
//! environment overrides and validates the result. [`AssessmentConfig::global`]
//! caches the first successful load for the life of the process and falls
//! back to defaults, with a warning, when the environment is invalid.

pub mod error;
pub mod nutrition;

pub use error::ConfigError;
pub use nutrition::{
    ActivityFactorsConfig, BiometricLimitsConfig, BmiConfig, BmrConfig, CaloricTargetConfig,
    MacroDistribution, MacronutrientConfig, WeightGoalConfig,
};

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration singleton
static ASSESSMENT_CONFIG: OnceLock<AssessmentConfig> = OnceLock::new();

/// Allowed deficit range for `lose_weight` (kcal)
const DEFICIT_RANGE_KCAL: (u32, u32) = (400, 500);

/// Allowed surplus range for `gain_muscle` (kcal)
const SURPLUS_RANGE_KCAL: (u32, u32) = (300, 500);

/// Main assessment configuration container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentConfig {
    /// Plausible height, weight and age domain
    pub limits: BiometricLimitsConfig,
    /// BMI band thresholds
    pub bmi: BmiConfig,
    /// Mifflin-St Jeor coefficients
    pub bmr: BmrConfig,
    /// TDEE multipliers per activity level
    pub activity_factors: ActivityFactorsConfig,
    /// Deficit and surplus per objective
    pub caloric_target: CaloricTargetConfig,
    /// Healthy band and modest weight changes
    pub weight_goal: WeightGoalConfig,
    /// Macro distribution policy
    pub macronutrients: MacronutrientConfig,
}

impl AssessmentConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        ASSESSMENT_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load assessment config: {}, using defaults", e);
                Self::default()
            })
        })
    }

    /// Load configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_finite()?;
        self.validate_limits()?;
        self.validate_energy()?;
        self.validate_weight_goal()?;
        self.macronutrients.validate()
    }

    /// Reject NaN and infinities, which pass every ordered comparison below
    fn validate_finite(&self) -> Result<(), ConfigError> {
        let values = [
            ("limits.min_height_cm", self.limits.min_height_cm),
            ("limits.max_height_cm", self.limits.max_height_cm),
            ("limits.min_weight_kg", self.limits.min_weight_kg),
            ("limits.max_weight_kg", self.limits.max_weight_kg),
            ("bmi.normal_from", self.bmi.normal_from),
            ("bmi.overweight_from", self.bmi.overweight_from),
            ("bmi.obese_from", self.bmi.obese_from),
            ("bmr.msj_weight_coef", self.bmr.msj_weight_coef),
            ("bmr.msj_height_coef", self.bmr.msj_height_coef),
            ("bmr.msj_age_coef", self.bmr.msj_age_coef),
            ("bmr.msj_male_constant", self.bmr.msj_male_constant),
            ("bmr.msj_female_constant", self.bmr.msj_female_constant),
            ("activity_factors.sedentary", self.activity_factors.sedentary),
            ("activity_factors.light", self.activity_factors.light),
            ("activity_factors.moderate", self.activity_factors.moderate),
            ("activity_factors.very_active", self.activity_factors.very_active),
            ("activity_factors.extreme", self.activity_factors.extreme),
            ("weight_goal.healthy_bmi_min", self.weight_goal.healthy_bmi_min),
            ("weight_goal.healthy_bmi_max", self.weight_goal.healthy_bmi_max),
            (
                "weight_goal.lose_weight_modest_kg",
                self.weight_goal.lose_weight_modest_kg,
            ),
            (
                "weight_goal.gain_muscle_modest_kg",
                self.weight_goal.gain_muscle_modest_kg,
            ),
            (
                "macronutrients.energy_tolerance_ratio",
                self.macronutrients.energy_tolerance_ratio,
            ),
        ];

        match values.into_iter().find(|(_, value)| !value.is_finite()) {
            Some((name, _)) => Err(ConfigError::NonFinite(name)),
            None => Ok(()),
        }
    }

    fn validate_limits(&self) -> Result<(), ConfigError> {
        let limits = &self.limits;
        if limits.min_height_cm <= 0.0 || limits.min_height_cm >= limits.max_height_cm {
            return Err(ConfigError::InvalidRange(
                "Height limits must be positive and min < max",
            ));
        }
        if limits.min_weight_kg <= 0.0 || limits.min_weight_kg >= limits.max_weight_kg {
            return Err(ConfigError::InvalidRange(
                "Weight limits must be positive and min < max",
            ));
        }

        let bmi = &self.bmi;
        if bmi.normal_from <= 0.0
            || bmi.normal_from >= bmi.overweight_from
            || bmi.overweight_from >= bmi.obese_from
        {
            return Err(ConfigError::InvalidRange(
                "BMI thresholds must be positive and ascending",
            ));
        }

        Ok(())
    }

    fn validate_energy(&self) -> Result<(), ConfigError> {
        if self.bmr.msj_weight_coef <= 0.0 || self.bmr.msj_height_coef <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "BMR weight and height coefficients must be positive",
            ));
        }

        let factors = &self.activity_factors;
        if factors.sedentary < 1.0 || factors.extreme > 2.5 {
            return Err(ConfigError::ValueOutOfRange(
                "Activity factors must be between 1.0 and 2.5",
            ));
        }
        if factors.sedentary >= factors.light
            || factors.light >= factors.moderate
            || factors.moderate >= factors.very_active
            || factors.very_active >= factors.extreme
        {
            return Err(ConfigError::InvalidRange(
                "Activity factors must be in ascending order",
            ));
        }

        let target = &self.caloric_target;
        if !(DEFICIT_RANGE_KCAL.0..=DEFICIT_RANGE_KCAL.1).contains(&target.deficit_kcal) {
            return Err(ConfigError::ValueOutOfRange(
                "Caloric deficit must be within 400-500 kcal",
            ));
        }
        if !(SURPLUS_RANGE_KCAL.0..=SURPLUS_RANGE_KCAL.1).contains(&target.surplus_kcal) {
            return Err(ConfigError::ValueOutOfRange(
                "Caloric surplus must be within 300-500 kcal",
            ));
        }

        Ok(())
    }

    fn validate_weight_goal(&self) -> Result<(), ConfigError> {
        let goal = &self.weight_goal;
        if goal.healthy_bmi_min <= 0.0 || goal.healthy_bmi_min >= goal.healthy_bmi_max {
            return Err(ConfigError::InvalidRange(
                "Healthy BMI band must be positive and min < max",
            ));
        }
        if goal.lose_weight_modest_kg < 0.0 || goal.gain_muscle_modest_kg < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "Modest weight changes must be non-negative magnitudes",
            ));
        }
        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .trim()
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Caloric policy
        Self::apply_env_var(
            "NUTRILENS_DEFICIT_KCAL",
            &mut self.caloric_target.deficit_kcal,
        )?;
        Self::apply_env_var(
            "NUTRILENS_SURPLUS_KCAL",
            &mut self.caloric_target.surplus_kcal,
        )?;

        // Weight goal policy
        Self::apply_env_var(
            "NUTRILENS_HEALTHY_BMI_MIN",
            &mut self.weight_goal.healthy_bmi_min,
        )?;
        Self::apply_env_var(
            "NUTRILENS_HEALTHY_BMI_MAX",
            &mut self.weight_goal.healthy_bmi_max,
        )?;
        Self::apply_env_var(
            "NUTRILENS_LOSE_WEIGHT_MODEST_KG",
            &mut self.weight_goal.lose_weight_modest_kg,
        )?;
        Self::apply_env_var(
            "NUTRILENS_GAIN_MUSCLE_MODEST_KG",
            &mut self.weight_goal.gain_muscle_modest_kg,
        )?;

        // Macro policy
        Self::apply_env_var(
            "NUTRILENS_EMPHASIS_SHIFT_PCT",
            &mut self.macronutrients.emphasis_shift_pct,
        )?;

        // Activity factors
        Self::apply_env_var(
            "NUTRILENS_ACTIVITY_FACTOR_SEDENTARY",
            &mut self.activity_factors.sedentary,
        )?;
        Self::apply_env_var(
            "NUTRILENS_ACTIVITY_FACTOR_LIGHT",
            &mut self.activity_factors.light,
        )?;
        Self::apply_env_var(
            "NUTRILENS_ACTIVITY_FACTOR_MODERATE",
            &mut self.activity_factors.moderate,
        )?;
        Self::apply_env_var(
            "NUTRILENS_ACTIVITY_FACTOR_VERY_ACTIVE",
            &mut self.activity_factors.very_active,
        )?;
        Self::apply_env_var(
            "NUTRILENS_ACTIVITY_FACTOR_EXTREME",
            &mut self.activity_factors.extreme,
        )?;

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(AssessmentConfig::default().validate().is_ok());
    }

    #[test]
    fn test_deficit_outside_range_rejected() {
        let mut config = AssessmentConfig::default();
        config.caloric_target.deficit_kcal = 700;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange(_))
        ));
    }

    #[test]
    fn test_activity_factors_must_ascend() {
        let mut config = AssessmentConfig::default();
        config.activity_factors.light = 1.1;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRange(_))));
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let mut config = AssessmentConfig::default();
        config.activity_factors.moderate = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite("activity_factors.moderate"))
        ));

        let mut config = AssessmentConfig::default();
        config.weight_goal.healthy_bmi_max = f64::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite("weight_goal.healthy_bmi_max"))
        ));

        let mut config = AssessmentConfig::default();
        config.macronutrients.energy_tolerance_ratio = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_healthy_band_rejected() {
        let mut config = AssessmentConfig::default();
        config.weight_goal.healthy_bmi_min = 26.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRange(_))));
    }
}
