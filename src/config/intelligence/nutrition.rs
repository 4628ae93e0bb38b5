// ABOUTME: Assessment policy configuration for BMI bands, BMR, TDEE and caloric targets
// ABOUTME: Configures biometric limits, weight-goal defaults and macronutrient policy tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Physical Assessment Configuration
//!
//! Every constant the calculator relies on lives here so deployments can
//! calibrate the open policy choices (deficit, surplus, modest weight changes)
//! without touching the formulas.
//!
//! # Scientific References
//!
//! - BMI bands: WHO Technical Report Series 894 (2000)
//! - BMR: Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
//! - Activity factors: `McArdle`, Katch & Katch (2010), Exercise Physiology

use nutrilens_core::models::{ActivityLevel, Objective};
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Plausible biometric domain; values outside fail as `InvalidInput`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiometricLimitsConfig {
    /// Minimum height (cm)
    pub min_height_cm: f64,
    /// Maximum height (cm)
    pub max_height_cm: f64,
    /// Minimum weight (kg)
    pub min_weight_kg: f64,
    /// Maximum weight (kg)
    pub max_weight_kg: f64,
    /// Maximum age (years)
    pub max_age_years: u32,
}

/// BMI band thresholds, each an inclusive lower bound of the next band
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmiConfig {
    /// First BMI of the normal band (18.5)
    pub normal_from: f64,
    /// First BMI of the overweight band (25.0)
    pub overweight_from: f64,
    /// First BMI of the obese band (30.0)
    pub obese_from: f64,
}

/// BMR (Basal Metabolic Rate) calculation configuration
///
/// Reference: Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
/// American Journal of Clinical Nutrition, 51(2), 241-247. DOI: 10.1093/ajcn/51.2.241
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmrConfig {
    /// Mifflin-St Jeor weight coefficient (10.0)
    pub msj_weight_coef: f64,
    /// Mifflin-St Jeor height coefficient (6.25)
    pub msj_height_coef: f64,
    /// Mifflin-St Jeor age coefficient (-5.0)
    pub msj_age_coef: f64,
    /// Mifflin-St Jeor male constant (+5)
    pub msj_male_constant: f64,
    /// Mifflin-St Jeor female constant (-161)
    pub msj_female_constant: f64,
}

/// Activity factor multipliers for TDEE calculation
///
/// Reference: `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010). Exercise Physiology
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// Sedentary: 1.2
    pub sedentary: f64,
    /// Light: 1.375
    pub light: f64,
    /// Moderate: 1.55
    pub moderate: f64,
    /// Very active: 1.725
    pub very_active: f64,
    /// Extreme: 1.9
    pub extreme: f64,
}

impl ActivityFactorsConfig {
    /// Multiplier for an activity level
    #[must_use]
    pub const fn factor_for(&self, level: ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Sedentary => self.sedentary,
            ActivityLevel::Light => self.light,
            ActivityLevel::Moderate => self.moderate,
            ActivityLevel::VeryActive => self.very_active,
            ActivityLevel::Extreme => self.extreme,
        }
    }
}

/// Caloric deficit and surplus applied to TDEE
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaloricTargetConfig {
    /// Deficit for `lose_weight`, kcal (400-500)
    pub deficit_kcal: u32,
    /// Surplus for `gain_muscle`, kcal (300-500)
    pub surplus_kcal: u32,
}

/// Healthy band and modest weight-change defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightGoalConfig {
    /// Lower edge of the healthy BMI band (18.5)
    pub healthy_bmi_min: f64,
    /// Upper edge of the healthy BMI band (24.9)
    pub healthy_bmi_max: f64,
    /// Loss suggested when already healthy and losing weight (kg, positive)
    pub lose_weight_modest_kg: f64,
    /// Gain suggested when already healthy and gaining muscle (kg, positive)
    pub gain_muscle_modest_kg: f64,
}

/// Macro distribution as whole percentages of the caloric target
///
/// All percentages must sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroDistribution {
    /// Protein percentage (0-100)
    pub protein_pct: u8,
    /// Carbohydrate percentage (0-100)
    pub carbs_pct: u8,
    /// Fat percentage (0-100)
    pub fat_pct: u8,
}

impl MacroDistribution {
    /// Create a new macro distribution
    ///
    /// # Panics
    ///
    /// Panics in debug mode if percentages don't sum to 100
    #[must_use]
    pub const fn new(protein_pct: u8, carbs_pct: u8, fat_pct: u8) -> Self {
        debug_assert!(
            protein_pct
                .saturating_add(carbs_pct)
                .saturating_add(fat_pct)
                == 100,
            "Macro percentages must sum to 100"
        );
        Self {
            protein_pct,
            carbs_pct,
            fat_pct,
        }
    }

    /// Sum of the three percentages
    #[must_use]
    pub const fn total(&self) -> u8 {
        self.protein_pct
            .saturating_add(self.carbs_pct)
            .saturating_add(self.fat_pct)
    }

    /// Get as a tuple (protein, carbs, fat)
    #[must_use]
    pub const fn as_tuple(&self) -> (u8, u8, u8) {
        (self.protein_pct, self.carbs_pct, self.fat_pct)
    }
}

/// Largest accepted deviation of macro energy from the caloric target (1%)
pub const MAX_ENERGY_TOLERANCE_RATIO: f64 = 0.01;

/// Macronutrient policy table keyed by objective
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacronutrientConfig {
    /// Higher protein to preserve lean mass in a deficit: (35, 35, 30)
    pub lose_weight: MacroDistribution,
    /// Balanced everyday split: (25, 45, 30)
    pub maintain_weight: MacroDistribution,
    /// Protein and carbohydrate for hypertrophy: (30, 45, 25)
    pub gain_muscle: MacroDistribution,
    /// Percentage points moved by a training emphasis (5)
    pub emphasis_shift_pct: u8,
    /// Accepted energy deviation as a fraction of the target (0.01)
    pub energy_tolerance_ratio: f64,
}

impl MacronutrientConfig {
    /// Get the base distribution for an objective
    #[must_use]
    pub const fn distribution_for(&self, objective: Objective) -> MacroDistribution {
        match objective {
            Objective::LoseWeight => self.lose_weight,
            Objective::MaintainWeight => self.maintain_weight,
            Objective::GainMuscle => self.gain_muscle,
        }
    }

    /// Validate the policy table
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidWeights` if a distribution does not sum to 100,
    /// `ConfigError::ValueOutOfRange` if the emphasis shift cannot be applied to every
    /// distribution or the tolerance is outside (0, 0.01]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tables = [
            ("lose_weight", &self.lose_weight),
            ("maintain_weight", &self.maintain_weight),
            ("gain_muscle", &self.gain_muscle),
        ];

        for (name, distribution) in tables {
            let sum = distribution.total();
            if sum != 100 {
                return Err(ConfigError::InvalidWeights(format!(
                    "{name} macro percentages must sum to 100, got {sum}"
                )));
            }
            if self.emphasis_shift_pct > distribution.fat_pct
                || self.emphasis_shift_pct > distribution.carbs_pct
            {
                return Err(ConfigError::ValueOutOfRange(
                    "emphasis shift must not exceed the fat or carbohydrate share",
                ));
            }
        }

        let tolerance = self.energy_tolerance_ratio;
        if tolerance.is_nan() || tolerance <= 0.0 || tolerance > MAX_ENERGY_TOLERANCE_RATIO {
            return Err(ConfigError::ValueOutOfRange(
                "energy tolerance must be within (0, 0.01]",
            ));
        }

        Ok(())
    }
}

impl Default for BiometricLimitsConfig {
    fn default() -> Self {
        Self {
            min_height_cm: 50.0,
            max_height_cm: 300.0,
            min_weight_kg: 10.0,
            max_weight_kg: 500.0,
            max_age_years: 130,
        }
    }
}

impl Default for BmiConfig {
    fn default() -> Self {
        Self {
            normal_from: 18.5,
            overweight_from: 25.0,
            obese_from: 30.0,
        }
    }
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            msj_weight_coef: 10.0,
            msj_height_coef: 6.25,
            msj_age_coef: -5.0,
            msj_male_constant: 5.0,
            msj_female_constant: -161.0,
        }
    }
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            light: 1.375,
            moderate: 1.55,
            very_active: 1.725,
            extreme: 1.9,
        }
    }
}

impl Default for CaloricTargetConfig {
    fn default() -> Self {
        Self {
            deficit_kcal: 450,
            surplus_kcal: 400,
        }
    }
}

impl Default for WeightGoalConfig {
    fn default() -> Self {
        Self {
            healthy_bmi_min: 18.5,
            healthy_bmi_max: 24.9,
            lose_weight_modest_kg: 5.0,
            gain_muscle_modest_kg: 3.0,
        }
    }
}

impl Default for MacronutrientConfig {
    fn default() -> Self {
        Self {
            lose_weight: MacroDistribution::new(35, 35, 30),
            maintain_weight: MacroDistribution::new(25, 45, 30),
            gain_muscle: MacroDistribution::new(30, 45, 25),
            emphasis_shift_pct: 5,
            energy_tolerance_ratio: 0.01,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_macro_tables_are_valid() {
        assert!(MacronutrientConfig::default().validate().is_ok());
    }

    #[test]
    fn test_macro_table_must_sum_to_100() {
        let config = MacronutrientConfig {
            gain_muscle: MacroDistribution {
                protein_pct: 40,
                carbs_pct: 40,
                fat_pct: 25,
            },
            ..MacronutrientConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWeights(message)) if message.contains("gain_muscle")
        ));
    }

    #[test]
    fn test_energy_tolerance_capped_at_one_percent() {
        let at_cap = MacronutrientConfig {
            energy_tolerance_ratio: MAX_ENERGY_TOLERANCE_RATIO,
            ..MacronutrientConfig::default()
        };
        assert!(at_cap.validate().is_ok());

        let loose = MacronutrientConfig {
            energy_tolerance_ratio: 0.05,
            ..MacronutrientConfig::default()
        };
        assert!(matches!(loose.validate(), Err(ConfigError::ValueOutOfRange(_))));

        let nan = MacronutrientConfig {
            energy_tolerance_ratio: f64::NAN,
            ..MacronutrientConfig::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_distribution_lookup() {
        let config = MacronutrientConfig::default();
        assert_eq!(
            config.distribution_for(Objective::LoseWeight).as_tuple(),
            (35, 35, 30)
        );
    }
}
