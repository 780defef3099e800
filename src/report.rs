// ABOUTME: Typed health report structures mirroring the JSON shape the model must return
// ABOUTME: Two-step decoding separates syntax failures from schema failures on untrusted replies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitaPlan Labs

//! # Health Report Model
//!
//! The full structured output for one user submission: BMI summary, exercise
//! calendar, nutrition plan, weight-progress forecast, timeline, and
//! composition estimates. The model produces everything except `user`, which
//! the gateway re-attaches from the caller's input because the model does
//! not echo it reliably.
//!
//! [`decode_body`] is the single entry point for turning an untrusted reply
//! string into a [`ReportBody`]. A reply that is not JSON fails with
//! `ResponseNotJson`; JSON that does not match this shape fails with
//! `SchemaMismatch`. A report is never partially populated.

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::models::UserProfileInput;

/// Kind of activity scheduled for a calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    /// Cardiovascular training
    Cardio,
    /// Strength training
    Strength,
    /// Stretching and mobility work
    Stretching,
    /// Rest day
    Rest,
}

/// BMI figure, category label, and free-text interpretation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiSummary {
    /// Body mass index computed by the model
    pub bmi: f64,
    /// Category label (e.g. "Overweight")
    pub category: String,
    /// Free-text interpretation
    pub text: String,
}

/// One day of the exercise calendar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDay {
    /// Day label (e.g. "Monday")
    pub day: String,
    /// Scheduled activity kind
    pub activity_type: ActivityType,
    /// What to do that day
    pub description: String,
    /// Planned duration in minutes
    pub duration_minutes: u32,
    /// Estimated calories burned
    pub calories_burned: u32,
}

/// Macro nutrient split in percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacrosPercent {
    /// Protein share
    pub protein: f64,
    /// Carbohydrate share
    pub carbs: f64,
    /// Fat share
    pub fat: f64,
}

/// Daily calorie target plus macro percentages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionBreakdown {
    /// Daily calorie target
    pub daily_calories: u32,
    /// Macro split
    pub macros_percent: MacrosPercent,
}

/// Forecast weight at a given week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightProgressPoint {
    /// Week number, starting at 0 for the current weight
    pub week: u32,
    /// Forecast weight in kilograms
    pub weight_kg: f64,
}

/// Ordered weight forecast plus the goal weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightProgress {
    /// Target weight in kilograms
    pub goal_weight_kg: f64,
    /// Ordered forecast points
    pub points: Vec<WeightProgressPoint>,
}

/// One milestone on the plan timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineStep {
    /// Week number of the milestone
    pub week: u32,
    /// Short milestone label
    pub label: String,
    /// Expected weight at this milestone
    pub expected_weight_kg: f64,
    /// Free-text note
    pub note: String,
}

/// Total plan length and ordered milestone steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    /// Total number of weeks in the plan
    pub total_weeks: u32,
    /// Ordered milestones
    pub steps: Vec<TimelineStep>,
}

/// Weekly minute split across the four activity buckets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityComposition {
    /// Cardio minutes
    pub cardio_minutes: u32,
    /// Strength minutes
    pub strength_minutes: u32,
    /// Stretching minutes
    pub stretching_minutes: u32,
    /// Rest minutes
    pub rest_minutes: u32,
}

/// Estimated body composition in percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyComposition {
    /// Muscle share
    pub muscle_percent: f64,
    /// Fat share
    pub fat_percent: f64,
    /// Water share
    pub water_percent: f64,
    /// Bone share
    pub bone_percent: f64,
}

/// The model-produced portion of a report (everything except `user`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportBody {
    /// BMI summary
    pub summary: BmiSummary,
    /// Per-day activity plan
    pub exercise_calendar: Vec<ExerciseDay>,
    /// Calorie and macro plan
    pub nutrition: NutritionBreakdown,
    /// Weight forecast
    pub weight_progress: WeightProgress,
    /// Milestone timeline
    pub timeline: Timeline,
    /// Weekly activity minute buckets
    pub activity_composition: ActivityComposition,
    /// Body composition estimate
    pub body_composition: BodyComposition,
}

/// A complete report for one submission: the caller's profile plus the plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    /// The exact profile the caller submitted, never model-generated
    pub user: UserProfileInput,
    /// The model-produced plan
    #[serde(flatten)]
    pub body: ReportBody,
}

impl HealthReport {
    /// Attach the caller's profile to a decoded report body
    #[must_use]
    pub const fn from_parts(user: UserProfileInput, body: ReportBody) -> Self {
        Self { user, body }
    }
}

/// Decode an untrusted model reply into a typed report body
///
/// # Errors
///
/// Returns `ResponseNotJson` when the text is not syntactically valid JSON
/// and `SchemaMismatch` when it is JSON but violates the report shape.
pub fn decode_body(raw_text: &str) -> AppResult<ReportBody> {
    let value: serde_json::Value = serde_json::from_str(raw_text).map_err(|e| {
        AppError::response_not_json(format!("reply is not valid JSON: {e}")).with_source(e)
    })?;

    serde_json::from_value(value).map_err(|e| {
        AppError::schema_mismatch(format!("reply does not match the report shape: {e}"))
            .with_source(e)
    })
}
