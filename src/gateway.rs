// ABOUTME: Prompt/response gateway turning a user profile into a typed health report
// ABOUTME: One completion call per request, with empty/parse/schema gates on the reply
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitaPlan Labs

//! # Report Gateway
//!
//! Builds the deterministic system + data prompt for a validated
//! [`UserProfileInput`], invokes the generation provider exactly once, and
//! decodes the raw text reply into a [`HealthReport`]. No retry, no timeout
//! budget, no streaming: one round trip, success or failure.
//!
//! The gateway trusts caller-side range validation and performs no numeric
//! re-validation of the input. On success the returned report's `user` field
//! is exactly the caller-supplied input, never model output.

use chrono::{DateTime, Utc};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::llm::prompts::REPORT_SYSTEM_PROMPT;
use crate::llm::{ChatMessage, ChatRequest, GeminiProvider, LlmProvider, TokenUsage};
use crate::models::UserProfileInput;
use crate::report::{decode_body, HealthReport};

/// Temperature pinned for report generation
const REPORT_TEMPERATURE: f32 = 0.5;

/// Result of one successful generation cycle
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    /// The decoded report with the caller's profile attached
    pub report: HealthReport,
    /// The raw reply text the report was decoded from
    pub raw_text: String,
    /// Token usage, when the API reports it
    pub usage: Option<TokenUsage>,
    /// When the reply landed
    pub generated_at: DateTime<Utc>,
}

/// Gateway from user profiles to typed health reports
pub struct ReportGateway {
    provider: Box<dyn LlmProvider>,
}

impl ReportGateway {
    /// Create a gateway over any generation provider
    pub fn new(provider: impl LlmProvider + 'static) -> Self {
        Self {
            provider: Box::new(provider),
        }
    }

    /// Create a Gemini-backed gateway from the process environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` if `GEMINI_API_KEY` is not set. Fails before
    /// any network call.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self::new(GeminiProvider::from_env()?))
    }

    /// Name of the underlying provider
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Build the per-request data instruction from the profile fields
    fn build_data_prompt(input: &UserProfileInput) -> String {
        format!(
            "User profile:\n\
             - Name: {}\n\
             - Age: {}\n\
             - Current weight (kg): {}\n\
             - Height (cm): {}\n\
             - Goal weight (kg): {}\n\
             - Available time for exercise per day (minutes): {}\n\n\
             Generate a realistic, sustainable plan for weight change per week and exercise schedule.\n\
             Return ONLY valid JSON as specified, no explanations.",
            input.name,
            input.age,
            input.weight_kg,
            input.height_cm,
            input.goal_weight_kg,
            input.minutes_per_day
        )
    }

    /// Generate a health report for a validated profile
    ///
    /// # Errors
    ///
    /// - `ResponseEmpty` when the model returned no text
    /// - `ResponseNotJson` when the reply is not syntactically valid JSON
    /// - `SchemaMismatch` when the JSON violates the report shape
    /// - `ExternalServiceError` / `ExternalRateLimited` for transport and
    ///   API failures, as mapped by the provider
    #[instrument(skip(self, input), fields(request_id = %Uuid::new_v4(), provider = %self.provider.name()))]
    pub async fn generate(&self, input: &UserProfileInput) -> AppResult<GenerateOutcome> {
        let request = ChatRequest::new(vec![
            ChatMessage::system(REPORT_SYSTEM_PROMPT),
            ChatMessage::user(Self::build_data_prompt(input)),
        ])
        .with_temperature(REPORT_TEMPERATURE);

        debug!("Requesting health report from generation provider");

        let response = self.provider.complete(&request).await?;

        if response.content.trim().is_empty() {
            warn!("Provider returned an empty reply");
            return Err(AppError::response_empty(format!(
                "{} returned no text",
                self.provider.display_name()
            )));
        }

        let body = decode_body(&response.content)?;

        debug!(
            model = %response.model,
            total_tokens = response.usage.as_ref().map_or(0, |u| u.total_tokens),
            "Decoded health report"
        );

        Ok(GenerateOutcome {
            report: HealthReport::from_parts(input.clone(), body),
            raw_text: response.content,
            usage: response.usage,
            generated_at: Utc::now(),
        })
    }
}

impl std::fmt::Debug for ReportGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportGateway")
            .field("provider", &self.provider.name())
            .finish()
    }
}
