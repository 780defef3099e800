// ABOUTME: User profile input model with the biometric ranges accepted by the engine
// ABOUTME: Validation runs at the inbound boundary; downstream components trust validated values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitaPlan Labs

//! # User Profile Input
//!
//! The six biometric fields a user submits to request a report. Field names
//! serialize in camelCase because the same vocabulary appears in the prompt
//! sent to the model and in exported report JSON.

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Accepted age range in years
pub const AGE_RANGE: (u32, u32) = (16, 90);
/// Accepted weight range in kilograms (current and goal)
pub const WEIGHT_KG_RANGE: (f64, f64) = (30.0, 300.0);
/// Accepted height range in centimeters
pub const HEIGHT_CM_RANGE: (f64, f64) = (120.0, 220.0);
/// Accepted daily exercise budget in minutes
pub const MINUTES_PER_DAY_RANGE: (u32, u32) = (10, 240);

/// A user's biometric profile, immutable once submitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileInput {
    /// Display name, non-empty
    pub name: String,
    /// Age in years
    pub age: u32,
    /// Current weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Target weight in kilograms
    pub goal_weight_kg: f64,
    /// Minutes available for exercise per day
    pub minutes_per_day: u32,
}

impl UserProfileInput {
    /// Validate all fields against the accepted ranges
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty name and `ValueOutOfRange` for
    /// the first numeric field outside its range.
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::invalid_input("name must not be empty"));
        }
        check_range("age", f64::from(self.age), AGE_RANGE.0.into(), AGE_RANGE.1.into())?;
        check_range("weightKg", self.weight_kg, WEIGHT_KG_RANGE.0, WEIGHT_KG_RANGE.1)?;
        check_range("heightCm", self.height_cm, HEIGHT_CM_RANGE.0, HEIGHT_CM_RANGE.1)?;
        check_range(
            "goalWeightKg",
            self.goal_weight_kg,
            WEIGHT_KG_RANGE.0,
            WEIGHT_KG_RANGE.1,
        )?;
        check_range(
            "minutesPerDay",
            f64::from(self.minutes_per_day),
            MINUTES_PER_DAY_RANGE.0.into(),
            MINUTES_PER_DAY_RANGE.1.into(),
        )?;
        Ok(())
    }
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> AppResult<()> {
    if value < min || value > max {
        return Err(AppError::out_of_range(field, min, max));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    fn valid_input() -> UserProfileInput {
        UserProfileInput {
            name: "Alex".to_owned(),
            age: 34,
            weight_kg: 92.0,
            height_cm: 178.0,
            goal_weight_kg: 82.0,
            minutes_per_day: 45,
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut input = valid_input();
        input.name = "  ".to_owned();
        let err = input.validate().expect_err("empty name must fail");
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_out_of_range_fields_rejected() {
        let mut input = valid_input();
        input.age = 15;
        assert_eq!(
            input.validate().expect_err("age too low").code,
            ErrorCode::ValueOutOfRange
        );

        let mut input = valid_input();
        input.weight_kg = 305.0;
        assert_eq!(
            input.validate().expect_err("weight too high").code,
            ErrorCode::ValueOutOfRange
        );

        let mut input = valid_input();
        input.minutes_per_day = 5;
        assert_eq!(
            input.validate().expect_err("minutes too low").code,
            ErrorCode::ValueOutOfRange
        );
    }

    #[test]
    fn test_boundary_values_accepted() {
        let mut input = valid_input();
        input.age = 16;
        input.minutes_per_day = 240;
        input.height_cm = 220.0;
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(valid_input()).expect("serializes");
        assert!(json.get("weightKg").is_some());
        assert!(json.get("minutesPerDay").is_some());
        assert!(json.get("weight_kg").is_none());
    }
}
