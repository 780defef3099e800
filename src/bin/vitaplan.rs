// ABOUTME: VitaPlan CLI - one-shot health report generation from the command line
// ABOUTME: Reads a biometric profile from flags, runs one submit cycle, prints report JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitaPlan Labs
//!
//! Usage:
//! ```bash
//! export GEMINI_API_KEY=your-key
//! vitaplan --name Alex --age 34 --weight-kg 92 --height-cm 178 \
//!          --goal-weight-kg 82 --minutes-per-day 45 --pretty
//! ```

use clap::Parser;
use std::process;

use vitaplan::config::LlmConfig;
use vitaplan::errors::{AppError, AppResult};
use vitaplan::gateway::ReportGateway;
use vitaplan::llm::GeminiProvider;
use vitaplan::logging::LoggingConfig;
use vitaplan::models::UserProfileInput;
use vitaplan::store::ReportStore;

#[derive(Parser)]
#[command(
    name = "vitaplan",
    about = "Generate an AI health and fitness report from a biometric profile",
    long_about = "Builds a prompt from the given profile, asks Gemini for a structured plan, \
                  validates the reply, and prints the report as JSON."
)]
struct Cli {
    /// Display name
    #[arg(long)]
    name: String,

    /// Age in years (16-90)
    #[arg(long)]
    age: u32,

    /// Current weight in kilograms (30-300)
    #[arg(long)]
    weight_kg: f64,

    /// Height in centimeters (120-220)
    #[arg(long)]
    height_cm: f64,

    /// Goal weight in kilograms (30-300)
    #[arg(long)]
    goal_weight_kg: f64,

    /// Minutes available for exercise per day (10-240)
    #[arg(long)]
    minutes_per_day: u32,

    /// Model override (defaults to VITAPLAN_LLM_MODEL or gemini-2.5-flash)
    #[arg(long)]
    model: Option<String>,

    /// Pretty-print the report JSON
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    LoggingConfig::from_env()
        .init()
        .map_err(|e| AppError::internal(format!("failed to initialize logging: {e}")))?;

    let mut config = LlmConfig::from_env()?;
    if let Some(model) = cli.model {
        config = config.with_model(model);
    }

    let gateway = ReportGateway::new(GeminiProvider::new(&config));
    let store = ReportStore::new();

    let input = UserProfileInput {
        name: cli.name,
        age: cli.age,
        weight_kg: cli.weight_kg,
        height_cm: cli.height_cm,
        goal_weight_kg: cli.goal_weight_kg,
        minutes_per_day: cli.minutes_per_day,
    };

    let snapshot = store.submit_profile(&gateway, input).await;

    if let Some(error) = snapshot.error {
        eprintln!("report generation failed: {error}");
        process::exit(1);
    }

    let Some(report) = snapshot.report else {
        eprintln!("report generation produced no result");
        process::exit(1);
    };

    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .map_err(|e| AppError::internal(format!("failed to serialize report: {e}")))?;

    println!("{json}");

    Ok(())
}
