// ABOUTME: Assess command for nutrilens-cli
// ABOUTME: Builds the assessment input from flags or a JSON file and runs the calculator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use nutrilens::config::AssessmentConfig;
use nutrilens::errors::{AppError, AppResult};
use nutrilens::intelligence::{
    generate_physical_assessment, KeywordProfessionAdjustment, NeutralProfessionAdjustment,
    ProfessionAdjustment, ProfessionRule,
};
use nutrilens::models::{AssessmentInput, AssessmentRequest};
use tracing::info;

use crate::helpers::display::display_assessment;
use crate::OutputFormat;

/// Raw assessment arguments as parsed by clap
pub struct AssessInput {
    pub input: Option<PathBuf>,
    pub sex: Option<String>,
    pub date_of_birth: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub activity_level: Option<String>,
    pub objective: Option<String>,
    pub profession: Option<String>,
    pub training_type: Option<String>,
}

fn required<T>(value: Option<T>, flag: &str) -> AppResult<T> {
    value.ok_or_else(|| AppError::missing_field(flag))
}

fn read_file(path: &Path) -> AppResult<String> {
    fs::read_to_string(path).map_err(|e| {
        AppError::invalid_input(format!("Cannot read {}: {e}", path.display())).with_source(e)
    })
}

fn build_request(args: AssessInput) -> AppResult<AssessmentRequest> {
    if let Some(path) = args.input {
        let raw = read_file(&path)?;
        return serde_json::from_str(&raw).map_err(|e| {
            AppError::invalid_format(format!("Invalid assessment file {}: {e}", path.display()))
        });
    }

    Ok(AssessmentRequest {
        sex: required(args.sex, "sex")?,
        date_of_birth: required(args.date_of_birth, "date_of_birth")?,
        height_cm: required(args.height_cm, "height_cm")?,
        weight_kg: required(args.weight_kg, "weight_kg")?,
        activity_level: required(args.activity_level, "activity_level")?,
        profession: args.profession.unwrap_or_default(),
        objective: required(args.objective, "objective")?,
        training_type: args.training_type.unwrap_or_default(),
    })
}

fn load_profession_strategy(path: Option<&Path>) -> AppResult<Arc<dyn ProfessionAdjustment>> {
    let Some(path) = path else {
        return Ok(Arc::new(NeutralProfessionAdjustment));
    };
    let raw = read_file(path)?;
    let rules: Vec<ProfessionRule> = serde_json::from_str(&raw).map_err(|e| {
        AppError::invalid_format(format!("Invalid profession rules {}: {e}", path.display()))
    })?;
    info!(rules = rules.len(), "Loaded profession rules");
    Ok(Arc::new(KeywordProfessionAdjustment::from_rules(rules)?))
}

/// Compute and print an assessment
pub fn run(
    args: AssessInput,
    as_of: Option<NaiveDate>,
    profession_rules: Option<&Path>,
    format: OutputFormat,
) -> AppResult<()> {
    let input = AssessmentInput::try_from(build_request(args)?)?;
    let profession = load_profession_strategy(profession_rules)?;
    let config = AssessmentConfig::load()?;

    let created_at = Utc::now();
    let as_of = as_of.unwrap_or_else(|| created_at.date_naive());
    let result =
        generate_physical_assessment(&input, as_of, created_at, &config, profession.as_ref())?;

    info!(
        assessment.bmr = result.bmr,
        assessment.tdee = result.tdee,
        "Assessment computed"
    );

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Pretty => display_assessment(&input, &result),
    }
    Ok(())
}
