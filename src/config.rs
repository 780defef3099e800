// ABOUTME: LLM configuration for the report engine with explicit injection support
// ABOUTME: Environment lookup is confined to from_env so gateways stay testable with injected keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitaPlan Labs

//! # Configuration
//!
//! Environment-only configuration for the generation backend. The
//! [`LlmConfig`] object is constructed explicitly and handed to the provider,
//! so nothing below this module reads process environment implicitly.

use std::env;

use crate::errors::{AppError, AppResult};

/// Environment variable holding the Gemini API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Environment variable for overriding the generation model
pub const MODEL_ENV: &str = "VITAPLAN_LLM_MODEL";

/// Default model used when no override is configured
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Configuration for the external generation service
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// API key for the Gemini API
    pub api_key: String,
    /// Model identifier to request
    pub model: String,
}

impl LlmConfig {
    /// Create a configuration with an explicit API key and the default model
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_owned(),
        }
    }

    /// Set a custom model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Load configuration from the process environment
    ///
    /// Reads `GEMINI_API_KEY` (required) and `VITAPLAN_LLM_MODEL` (optional).
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` if the API key variable is unset or empty,
    /// and `ConfigInvalid` if the model override is not a single model
    /// identifier. Both are recoverable per request, not a startup crash.
    pub fn from_env() -> AppResult<Self> {
        let api_key = env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AppError::config_missing(format!("{API_KEY_ENV} environment variable not set"))
            })?;

        let model = match env::var(MODEL_ENV).ok().filter(|model| !model.is_empty()) {
            Some(model) => {
                if model.contains(char::is_whitespace) {
                    return Err(AppError::config_invalid(format!(
                        "{MODEL_ENV} must be a single model identifier, got {model:?}"
                    )));
                }
                model
            }
            None => DEFAULT_MODEL.to_owned(),
        };

        Ok(Self { api_key, model })
    }
}
