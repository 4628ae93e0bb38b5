// ABOUTME: User profile as stored by the account collaborator, with nullable biometric fields
// ABOUTME: Completeness check producing the CompleteProfile capability required for assessment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::assessment::{ActivityLevel, AssessmentInput, Objective, Sex};
use crate::errors::{AppError, AppResult};

/// Profile as filled in progressively by the registration flow
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Owning user
    pub user_id: Uuid,
    /// Display name
    pub name: Option<String>,
    /// Biological sex
    pub sex: Option<Sex>,
    /// Date of birth
    pub date_of_birth: Option<NaiveDate>,
    /// Height in centimeters
    pub height_cm: Option<f64>,
    /// Weight in kilograms
    pub weight_kg: Option<f64>,
    /// Habitual activity level
    pub activity_level: Option<ActivityLevel>,
    /// Free text profession
    pub profession: Option<String>,
    /// Body composition objective
    pub objective: Option<Objective>,
    /// Free text training description
    pub training_type: Option<String>,
}

/// Proof that every biometric field of a profile is populated
///
/// Only [`UserProfile::complete`] can build one, so holding a value is the
/// capability to request an assessment.
#[derive(Debug, Clone, PartialEq)]
pub struct CompleteProfile {
    user_id: Uuid,
    input: AssessmentInput,
}

impl CompleteProfile {
    /// Owning user
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.user_id
    }

    /// Calculator input derived from the profile
    #[must_use]
    pub const fn input(&self) -> &AssessmentInput {
        &self.input
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> AppResult<T> {
    value.ok_or_else(|| AppError::missing_field(field))
}

fn required_text(value: Option<&String>, field: &'static str) -> AppResult<String> {
    match value.map(|text| text.trim()) {
        Some(text) if !text.is_empty() => Ok(text.to_owned()),
        _ => Err(AppError::missing_field(field)),
    }
}

impl UserProfile {
    /// Empty profile for a freshly registered user
    #[must_use]
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            ..Self::default()
        }
    }

    /// Whether every biometric field is populated
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete().is_ok()
    }

    /// Check completeness and hand out the assessment capability
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` naming the first absent field
    pub fn complete(&self) -> AppResult<CompleteProfile> {
        let input = AssessmentInput {
            sex: required(self.sex, "sex")?,
            date_of_birth: required(self.date_of_birth, "date_of_birth")?,
            height_cm: required(self.height_cm, "height_cm")?,
            weight_kg: required(self.weight_kg, "weight_kg")?,
            activity_level: required(self.activity_level, "activity_level")?,
            profession: required_text(self.profession.as_ref(), "profession")?,
            objective: required(self.objective, "objective")?,
            training_type: required_text(self.training_type.as_ref(), "training_type")?,
        };

        Ok(CompleteProfile {
            user_id: self.user_id,
            input,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    fn full_profile() -> UserProfile {
        UserProfile {
            user_id: Uuid::new_v4(),
            name: Some("Ana".into()),
            sex: Some(Sex::Female),
            date_of_birth: NaiveDate::from_ymd_opt(1995, 3, 2),
            height_cm: Some(168.0),
            weight_kg: Some(61.5),
            activity_level: Some(ActivityLevel::Moderate),
            profession: Some("Nurse".into()),
            objective: Some(Objective::MaintainWeight),
            training_type: Some("Running".into()),
        }
    }

    #[test]
    fn test_complete_profile_exposes_input() {
        let profile = full_profile();
        let complete = profile.complete().unwrap();
        assert_eq!(complete.user_id(), profile.user_id);
        assert!((complete.input().weight_kg - 61.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_field_is_reported() {
        let mut profile = full_profile();
        profile.weight_kg = None;
        let err = profile.complete().unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingRequiredField);
        assert_eq!(err.context.details["field"], "weight_kg");
        assert!(!profile.is_complete());
    }

    #[test]
    fn test_blank_profession_counts_as_missing() {
        let mut profile = full_profile();
        profile.profession = Some("   ".into());
        let err = profile.complete().unwrap_err();
        assert_eq!(err.context.details["field"], "profession");
    }

    #[test]
    fn test_new_profile_is_incomplete() {
        assert!(!UserProfile::new(Uuid::new_v4()).is_complete());
    }
}
