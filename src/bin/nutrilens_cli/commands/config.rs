// ABOUTME: Config command for nutrilens-cli
// ABOUTME: Loads the assessment configuration with environment overrides and prints it as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutrilens::config::AssessmentConfig;
use nutrilens::errors::AppResult;
use tracing::debug;

/// Print the effective configuration
///
/// Unlike the global accessor this fails on invalid overrides instead of
/// falling back to defaults.
pub fn show() -> AppResult<()> {
    let config = AssessmentConfig::load()?;
    debug!("Loaded assessment configuration");
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
