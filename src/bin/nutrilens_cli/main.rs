// ABOUTME: NutriLens CLI - computes physical assessments and inspects the effective configuration
// ABOUTME: Prints results on stdout, logs and ErrorResponse JSON on stderr with a failing exit code
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Assess from flags
//! nutrilens-cli assess --sex male --date-of-birth 1995-01-01 --height-cm 175 \
//!     --weight-kg 70 --activity-level moderate --objective lose_weight \
//!     --profession "Software engineer" --training-type "Weight lifting"
//!
//! # Assess from a JSON file on a fixed date, human readable
//! nutrilens-cli assess --input profile.json --as-of 2025-06-01 --format pretty
//!
//! # Show the effective configuration after NUTRILENS_* overrides
//! nutrilens-cli config
//! ```

mod commands;
mod helpers;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use nutrilens::errors::{AppError, AppResult};
use nutrilens::logging::LoggingConfig;

use helpers::display::report_error;

#[derive(Parser)]
#[command(
    name = "nutrilens-cli",
    about = "NutriLens physical assessment CLI",
    long_about = "Compute BMI, BMR, TDEE, caloric target, weight goal and macronutrient split from a profile."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Compute a physical assessment
    Assess(AssessArgs),

    /// Print the effective assessment configuration as JSON
    Config,
}

/// Output format of the assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty printed JSON
    Json,
    /// Human readable report
    Pretty,
}

#[derive(Args)]
struct AssessArgs {
    /// JSON file holding the whole profile (camelCase fields)
    #[arg(long, conflicts_with_all = ["sex", "date_of_birth", "height_cm", "weight_kg", "activity_level", "objective", "profession", "training_type"])]
    input: Option<PathBuf>,

    /// Biological sex (male, female)
    #[arg(long, required_unless_present = "input")]
    sex: Option<String>,

    /// Date of birth (YYYY-MM-DD)
    #[arg(long, required_unless_present = "input")]
    date_of_birth: Option<String>,

    /// Height in centimeters
    #[arg(long, required_unless_present = "input", allow_negative_numbers = true)]
    height_cm: Option<f64>,

    /// Weight in kilograms
    #[arg(long, required_unless_present = "input", allow_negative_numbers = true)]
    weight_kg: Option<f64>,

    /// Activity level (sedentary, light, moderate, very_active, extreme)
    #[arg(long, required_unless_present = "input")]
    activity_level: Option<String>,

    /// Objective (lose_weight, maintain_weight, gain_muscle)
    #[arg(long, required_unless_present = "input")]
    objective: Option<String>,

    /// Profession, free text
    #[arg(long)]
    profession: Option<String>,

    /// Training type, free text
    #[arg(long)]
    training_type: Option<String>,

    /// Date the age is computed on (defaults to today, UTC)
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// JSON file with keyword profession rules
    #[arg(long)]
    profession_rules: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

fn init_logging(verbose: bool) -> AppResult<()> {
    let mut config = LoggingConfig::from_env().with_stderr();
    if verbose {
        config.level = "debug".into();
    } else if env::var("RUST_LOG").is_err() {
        config.level = "warn".into();
    }
    config.init().map_err(AppError::from)
}

fn run(cli: Cli) -> AppResult<()> {
    init_logging(cli.verbose)?;

    match cli.command {
        Command::Assess(args) => {
            let request = commands::assess::AssessInput {
                input: args.input,
                sex: args.sex,
                date_of_birth: args.date_of_birth,
                height_cm: args.height_cm,
                weight_kg: args.weight_kg,
                activity_level: args.activity_level,
                objective: args.objective,
                profession: args.profession,
                training_type: args.training_type,
            };
            commands::assess::run(
                request,
                args.as_of,
                args.profession_rules.as_deref(),
                args.format,
            )
        }
        Command::Config => commands::config::show(),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            report_error(error);
            ExitCode::FAILURE
        }
    }
}
