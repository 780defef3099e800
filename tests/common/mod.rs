// ABOUTME: Shared test fixtures - scripted LLM provider and report body fixtures
// ABOUTME: Lets tests control reply content, errors, and completion timing per call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitaPlan Labs

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use vitaplan::errors::AppResult;
use vitaplan::gateway::GenerateOutcome;
use vitaplan::llm::{ChatRequest, ChatResponse, LlmProvider};
use vitaplan::models::UserProfileInput;
use vitaplan::report::{decode_body, HealthReport};

/// A report body reply the model could plausibly produce
pub const VALID_BODY_JSON: &str = r#"{
    "summary": {"bmi": 29.0, "category": "Overweight", "text": "Slightly above range."},
    "exerciseCalendar": [
        {"day": "Monday", "activityType": "cardio", "description": "Brisk walk",
         "durationMinutes": 45, "caloriesBurned": 320},
        {"day": "Tuesday", "activityType": "strength", "description": "Full body circuit",
         "durationMinutes": 40, "caloriesBurned": 280}
    ],
    "nutrition": {"dailyCalories": 2100,
                  "macrosPercent": {"protein": 30.0, "carbs": 45.0, "fat": 25.0}},
    "weightProgress": {"goalWeightKg": 82.0,
                       "points": [{"week": 0, "weightKg": 92.0}, {"week": 4, "weightKg": 89.5}]},
    "timeline": {"totalWeeks": 16,
                 "steps": [{"week": 4, "label": "First checkpoint",
                            "expectedWeightKg": 89.5, "note": "Keep pace"}]},
    "activityComposition": {"cardioMinutes": 150, "strengthMinutes": 90,
                            "stretchingMinutes": 45, "restMinutes": 30},
    "bodyComposition": {"musclePercent": 38.0, "fatPercent": 26.0,
                        "waterPercent": 31.0, "bonePercent": 5.0}
}"#;

/// A profile inside every accepted range
pub fn valid_input() -> UserProfileInput {
    UserProfileInput {
        name: "Alex".to_owned(),
        age: 34,
        weight_kg: 92.0,
        height_cm: 178.0,
        goal_weight_kg: 82.0,
        minutes_per_day: 45,
    }
}

/// Build a synthetic generation outcome with a recognizable category label
pub fn sample_outcome(category: &str) -> GenerateOutcome {
    let raw_text = VALID_BODY_JSON.replace("Overweight", category);
    let body = decode_body(&raw_text).expect("fixture decodes");
    GenerateOutcome {
        report: HealthReport::from_parts(valid_input(), body),
        raw_text,
        usage: None,
        generated_at: chrono::Utc::now(),
    }
}

/// One scripted reply: an optional completion delay plus the result
pub struct ScriptedReply {
    pub delay: Duration,
    pub result: AppResult<String>,
}

impl ScriptedReply {
    pub fn text(content: &str) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(content.to_owned()),
        }
    }

    pub fn text_after(delay_ms: u64, content: &str) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            result: Ok(content.to_owned()),
        }
    }

    pub fn error(error: vitaplan::errors::AppError) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(error),
        }
    }
}

/// Test provider that pops one scripted reply per completion call
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<ScriptedReply>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<ScriptedReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Provider scripted to answer a single call with immediate text
    pub fn replying(content: &str) -> Self {
        Self::new(vec![ScriptedReply::text(content)])
    }

    pub fn failing(error: vitaplan::errors::AppError) -> Self {
        Self::new(vec![ScriptedReply::error(error)])
    }

    /// Handle to the call counter, usable after the provider is boxed away
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn display_name(&self) -> &'static str {
        "Scripted Test Provider"
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    fn available_models(&self) -> &'static [&'static str] {
        &["scripted-model"]
    }

    async fn complete(&self, _request: &ChatRequest) -> AppResult<ChatResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self
            .replies
            .lock()
            .expect("scripted replies lock")
            .pop_front()
            .expect("no scripted reply left for this call");
        if reply.delay > Duration::ZERO {
            tokio::time::sleep(reply.delay).await;
        }
        let content = reply.result?;
        Ok(ChatResponse {
            content,
            model: "scripted-model".to_owned(),
            usage: None,
            finish_reason: Some("STOP".to_owned()),
        })
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
