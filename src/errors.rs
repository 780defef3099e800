// ABOUTME: Unified error handling for the report engine with tagged error codes
// ABOUTME: Keeps errors structured internally and flattens to strings only at the store boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitaPlan Labs

//! # Unified Error Handling
//!
//! Every fallible path in the crate returns [`AppError`], which pairs a
//! machine-readable [`ErrorCode`] tag with a human-readable message. The
//! tag survives all the way to the report store, which is the only place
//! allowed to collapse an error into a display string.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Configuration (1000-1999)
    /// Required configuration value is missing
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 1000,
    /// Configuration value is present but unusable
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 1001,

    // Input validation (2000-2999)
    /// Input is malformed or empty
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 2000,
    /// Numeric input falls outside the accepted range
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 2001,

    // Model response decoding (3000-3999)
    /// The model returned no text at all
    #[serde(rename = "RESPONSE_EMPTY")]
    ResponseEmpty = 3000,
    /// The model reply is not syntactically valid JSON
    #[serde(rename = "RESPONSE_NOT_JSON")]
    ResponseNotJson = 3001,
    /// The reply parsed as JSON but does not match the report shape
    #[serde(rename = "SCHEMA_MISMATCH")]
    SchemaMismatch = 3002,

    // External service (5000-5999)
    /// The generation service returned an error or was unreachable
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    /// The generation service rate limited or quota-limited the request
    #[serde(rename = "EXTERNAL_RATE_LIMITED")]
    ExternalRateLimited = 5001,

    // Internal (9000-9999)
    /// Anything else that went wrong inside the engine
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InvalidInput => "The provided input is invalid",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::ResponseEmpty => "The AI service returned an empty response",
            Self::ResponseNotJson => "The AI response could not be parsed as JSON",
            Self::SchemaMismatch => "The AI response does not match the expected report shape",
            Self::ExternalServiceError => "The AI service encountered an error",
            Self::ExternalRateLimited => "The AI service rate limit was exceeded",
            Self::InternalError => "An internal error occurred",
        }
    }
}

/// Unified error type for the engine
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code tag
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new error with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Missing configuration (e.g. absent API key)
    pub fn config_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigMissing, message)
    }

    /// Configuration present but unusable (e.g. malformed model override)
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Numeric input outside the accepted range
    pub fn out_of_range(field: &str, min: f64, max: f64) -> Self {
        Self::new(
            ErrorCode::ValueOutOfRange,
            format!("{field} must be between {min} and {max}"),
        )
    }

    /// Empty model reply
    pub fn response_empty(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResponseEmpty, message)
    }

    /// Model reply that is not valid JSON
    pub fn response_not_json(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResponseNotJson, message)
    }

    /// Model reply that parsed but violates the report schema
    pub fn schema_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SchemaMismatch, message)
    }

    /// External service failure
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
