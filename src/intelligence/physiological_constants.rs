// ABOUTME: Fixed physiological constants used by the assessment and meal analysis code
// ABOUTME: Atwater energy factors, plausibility ceilings and unit conversions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Physiological constants based on nutrition science
//!
//! Unlike the values in [`crate::config::AssessmentConfig`], these are not
//! policy choices and are never overridden at runtime.

/// Atwater general factors
///
/// Reference: Atwater, W.O. & Bryant, A.P. (1900). The availability and fuel
/// value of food materials. USDA Agricultural Experiment Station Report.
pub mod energy {
    /// kcal per gram of protein
    pub const KCAL_PER_GRAM_PROTEIN: u32 = 4;

    /// kcal per gram of carbohydrate
    pub const KCAL_PER_GRAM_CARBS: u32 = 4;

    /// kcal per gram of fat
    pub const KCAL_PER_GRAM_FAT: u32 = 9;

    /// Smallest target whose fat residue (at most 3 g) still fits
    pub const MIN_SPLITTABLE_TARGET_KCAL: u32 = 3 * KCAL_PER_GRAM_FAT;
}

/// Plausibility limits for AI meal estimates
pub mod meal {
    /// Estimates above this are treated as hallucinated
    pub const MAX_PLAUSIBLE_MEAL_KCAL: u32 = 10_000;

    /// Upper bound on an uploaded meal photo (10 MiB)
    pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;
}

/// Unit conversions
pub mod units {
    /// Centimeters per meter
    pub const CM_PER_METER: f64 = 100.0;
}
