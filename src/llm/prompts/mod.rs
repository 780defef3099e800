// ABOUTME: System prompt for report generation loaded at compile time
// ABOUTME: Pins the exact JSON shape the model must return for a health report
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitaPlan Labs

//! # System Prompts
//!
//! Prompts are loaded at compile time from markdown files for easy
//! maintenance. The report schema prompt describes the required JSON shape
//! of a report body (everything except `user`, which the gateway attaches
//! itself).

/// Report generation system prompt
///
/// Instructs the model to return strict JSON conforming to the
/// [`crate::report::ReportBody`] shape, with no markdown and no prose
/// outside the JSON object.
pub const REPORT_SYSTEM_PROMPT: &str = include_str!("report_schema.md");
