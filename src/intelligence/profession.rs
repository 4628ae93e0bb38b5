// ABOUTME: Profession based TDEE adjustment strategies
// ABOUTME: Neutral default plus a deployer supplied keyword table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Profession adjustment
//!
//! A profession is free text and only a qualitative energy signal. The
//! calculator therefore takes the adjustment as a strategy: the neutral
//! default leaves TDEE untouched, and [`KeywordProfessionAdjustment`] lets a
//! deployer register their own keyword rules.

use nutrilens_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Exclusive lower bound of an accepted multiplier
pub const MIN_PROFESSION_MULTIPLIER: f64 = 0.5;

/// Inclusive upper bound of an accepted multiplier
pub const MAX_PROFESSION_MULTIPLIER: f64 = 1.5;

/// Strategy turning a profession into a TDEE multiplier
pub trait ProfessionAdjustment: Send + Sync {
    /// Multiplier applied on top of the activity factor
    fn multiplier(&self, profession: &str) -> f64;
}

/// Leaves TDEE unchanged for every profession
#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralProfessionAdjustment;

impl ProfessionAdjustment for NeutralProfessionAdjustment {
    fn multiplier(&self, _profession: &str) -> f64 {
        1.0
    }
}

/// Check that a multiplier lies in (0.5, 1.5]
///
/// # Errors
///
/// Returns `InvalidInput` for non-finite or out of range values
pub fn validate_multiplier(multiplier: f64) -> AppResult<f64> {
    if multiplier.is_finite()
        && multiplier > MIN_PROFESSION_MULTIPLIER
        && multiplier <= MAX_PROFESSION_MULTIPLIER
    {
        Ok(multiplier)
    } else {
        Err(AppError::invalid_input(format!(
            "Profession multiplier {multiplier} must be within ({MIN_PROFESSION_MULTIPLIER}, {MAX_PROFESSION_MULTIPLIER}]"
        )))
    }
}

/// One keyword rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessionRule {
    /// Lowercase substrings that select the rule
    pub keywords: Vec<String>,
    /// Multiplier applied when any keyword matches
    pub multiplier: f64,
}

/// First-match keyword table; empty unless the deployer adds rules
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordProfessionAdjustment {
    rules: Vec<ProfessionRule>,
}

impl KeywordProfessionAdjustment {
    /// Empty table, equivalent to the neutral strategy
    #[must_use]
    pub const fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the multiplier is outside (0.5, 1.5] or no
    /// non-blank keyword is given
    pub fn with_rule<I, S>(mut self, keywords: I, multiplier: f64) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let multiplier = validate_multiplier(multiplier)?;
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|keyword| keyword.as_ref().trim().to_lowercase())
            .filter(|keyword| !keyword.is_empty())
            .collect();
        if keywords.is_empty() {
            return Err(AppError::invalid_input(
                "A profession rule needs at least one keyword",
            ));
        }
        self.rules.push(ProfessionRule {
            keywords,
            multiplier,
        });
        Ok(self)
    }

    /// Build from deserialized rules, validating each one
    ///
    /// # Errors
    ///
    /// Returns the first invalid rule as `InvalidInput`
    pub fn from_rules(rules: Vec<ProfessionRule>) -> AppResult<Self> {
        rules
            .into_iter()
            .try_fold(Self::new(), |table, rule| {
                table.with_rule(rule.keywords, rule.multiplier)
            })
    }

    /// Registered rules in match order
    #[must_use]
    pub fn rules(&self) -> &[ProfessionRule] {
        &self.rules
    }
}

impl ProfessionAdjustment for KeywordProfessionAdjustment {
    fn multiplier(&self, profession: &str) -> f64 {
        let profession = profession.to_lowercase();
        self.rules
            .iter()
            .find(|rule| {
                rule.keywords
                    .iter()
                    .any(|keyword| profession.contains(keyword.as_str()))
            })
            .map_or(1.0, |rule| rule.multiplier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_is_one() {
        assert!((NeutralProfessionAdjustment.multiplier("Bricklayer") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_table_is_neutral() {
        let table = KeywordProfessionAdjustment::new();
        assert!((table.multiplier("Nurse") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let table = KeywordProfessionAdjustment::new()
            .with_rule(["construction", "mason"], 1.1)
            .unwrap()
            .with_rule(["construction"], 1.3)
            .unwrap();
        assert!((table.multiplier("Construction worker") - 1.1).abs() < f64::EPSILON);
        assert!((table.multiplier("Accountant") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_out_of_range_multiplier_rejected() {
        assert!(KeywordProfessionAdjustment::new()
            .with_rule(["desk"], 0.5)
            .is_err());
        assert!(KeywordProfessionAdjustment::new()
            .with_rule(["miner"], 1.6)
            .is_err());
        assert!(validate_multiplier(1.5).is_ok());
    }

    #[test]
    fn test_blank_keywords_rejected() {
        assert!(KeywordProfessionAdjustment::new()
            .with_rule(["  "], 1.1)
            .is_err());
    }
}
