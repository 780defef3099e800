// ABOUTME: Main library entry point for the VitaPlan health report engine
// ABOUTME: Wires user profile input, the Gemini gateway, and the report state store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitaPlan Labs

#![deny(unsafe_code)]

//! # VitaPlan
//!
//! An engine that turns a user's basic biometric profile into a structured
//! health and fitness report by delegating the planning intelligence to a
//! generative model (Google Gemini). The crate itself owns only the glue:
//! prompt construction, response validation, and the request/response state
//! machine consumed by presentation layers.
//!
//! ## Architecture
//!
//! - **`llm`**: Provider abstraction and the Gemini HTTP client
//! - **`gateway`**: Prompt/response gateway producing typed [`report::HealthReport`]s
//! - **`store`**: Finite-state report store (idle → loading → success/error)
//! - **`models`**: Validated user profile input
//! - **`errors`**: Unified tagged error type
//!
//! ## Example
//!
//! ```rust,no_run
//! use vitaplan::config::LlmConfig;
//! use vitaplan::gateway::ReportGateway;
//! use vitaplan::llm::GeminiProvider;
//! use vitaplan::models::UserProfileInput;
//! use vitaplan::store::ReportStore;
//!
//! #[tokio::main]
//! async fn main() -> vitaplan::errors::AppResult<()> {
//!     let config = LlmConfig::from_env()?;
//!     let gateway = ReportGateway::new(GeminiProvider::new(&config));
//!     let store = ReportStore::new();
//!
//!     let input = UserProfileInput {
//!         name: "Alex".to_owned(),
//!         age: 34,
//!         weight_kg: 92.0,
//!         height_cm: 178.0,
//!         goal_weight_kg: 82.0,
//!         minutes_per_day: 45,
//!     };
//!
//!     let snapshot = store.submit_profile(&gateway, input).await;
//!     if let Some(report) = snapshot.report {
//!         println!("BMI: {}", report.body.summary.bmi);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod errors;
pub mod gateway;
pub mod llm;
pub mod logging;
pub mod models;
pub mod report;
pub mod store;
