// ABOUTME: Integration tests for the report state store lifecycle and sequencing
// ABOUTME: Covers success/failure transitions, stale-completion discard, and re-entrancy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitaPlan Labs

#![allow(missing_docs)]

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use common::{sample_outcome, valid_input, ScriptedProvider, ScriptedReply, VALID_BODY_JSON};
use vitaplan::errors::AppError;
use vitaplan::gateway::ReportGateway;
use vitaplan::store::ReportStore;

// ============================================================================
// Initial State
// ============================================================================

#[test]
fn test_new_store_is_idle() {
    let store = ReportStore::new();
    let snapshot = store.snapshot();
    assert!(snapshot.user_input.is_none());
    assert!(snapshot.report.is_none());
    assert!(snapshot.error.is_none());
    assert!(!snapshot.loading);
}

#[test]
fn test_set_user_input_only_records_the_input() {
    let store = ReportStore::new();
    store.set_user_input(valid_input());
    let snapshot = store.snapshot();
    assert_eq!(snapshot.user_input, Some(valid_input()));
    assert!(snapshot.report.is_none());
    assert!(snapshot.error.is_none());
    assert!(!snapshot.loading);
}

// ============================================================================
// Submit Cycle
// ============================================================================

#[tokio::test]
async fn test_successful_submit_stores_report_with_caller_input() {
    let store = ReportStore::new();
    let gateway = ReportGateway::new(ScriptedProvider::replying(VALID_BODY_JSON));
    let input = valid_input();

    let snapshot = store.submit_profile(&gateway, input.clone()).await;

    assert!(!snapshot.loading);
    assert!(snapshot.error.is_none());
    assert!(snapshot.generated_at.is_some());
    assert_eq!(snapshot.raw_response.as_deref(), Some(VALID_BODY_JSON));
    let report = snapshot.report.expect("report stored");
    assert_eq!(report.user, input);
}

#[tokio::test]
async fn test_failure_preserves_prior_report() {
    let store = ReportStore::new();

    let ok_gateway = ReportGateway::new(ScriptedProvider::replying(VALID_BODY_JSON));
    let first = store.submit_profile(&ok_gateway, valid_input()).await;
    assert!(first.report.is_some());

    // Each failure kind leaves the earlier report in place
    let failure_gateways = [
        ReportGateway::new(ScriptedProvider::replying("")),
        ReportGateway::new(ScriptedProvider::replying("not json")),
        ReportGateway::new(ScriptedProvider::replying(r#"{"summary": null}"#)),
        ReportGateway::new(ScriptedProvider::failing(AppError::external_service(
            "Gemini",
            "boom",
        ))),
    ];

    for gateway in &failure_gateways {
        let snapshot = store.submit_profile(gateway, valid_input()).await;
        assert!(!snapshot.loading);
        assert!(snapshot.error.is_some(), "failure must surface as state");
        assert!(
            snapshot.report.is_some(),
            "failure must not clear the prior report"
        );
    }
}

#[tokio::test]
async fn test_error_clears_on_next_successful_submit() {
    let store = ReportStore::new();

    let failing = ReportGateway::new(ScriptedProvider::replying("not json"));
    let failed = store.submit_profile(&failing, valid_input()).await;
    assert!(failed.error.is_some());

    let ok_gateway = ReportGateway::new(ScriptedProvider::replying(VALID_BODY_JSON));
    let snapshot = store.submit_profile(&ok_gateway, valid_input()).await;
    assert!(snapshot.error.is_none());
    assert!(snapshot.report.is_some());
}

#[tokio::test]
async fn test_invalid_input_never_reaches_the_provider() {
    let store = ReportStore::new();
    let provider = ScriptedProvider::replying(VALID_BODY_JSON);
    let calls = provider.call_counter();
    let gateway = ReportGateway::new(provider);

    let mut input = valid_input();
    input.age = 9;

    let snapshot = store.submit_profile(&gateway, input).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(!snapshot.loading);
    assert!(snapshot.report.is_none());
    let error = snapshot.error.expect("validation error surfaces as state");
    assert!(error.contains("age"));
}

#[tokio::test]
async fn test_invalid_submit_keeps_loading_while_request_in_flight() {
    let store = ReportStore::new();

    // A valid request is outstanding when the invalid profile arrives
    let token = store.begin_generate(valid_input());
    assert!(store.is_loading());

    let provider = ScriptedProvider::replying(VALID_BODY_JSON);
    let calls = provider.call_counter();
    let gateway = ReportGateway::new(provider);

    let mut input = valid_input();
    input.age = 9;
    let snapshot = store.submit_profile(&gateway, input).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(snapshot.error.is_some());
    assert!(
        snapshot.loading,
        "the outstanding request is still in flight"
    );

    // The outstanding request settles normally afterwards
    assert!(store.complete_generate(token, sample_outcome("Landed")));
    let settled = store.snapshot();
    assert!(!settled.loading);
    assert!(settled.error.is_none());
    assert_eq!(
        settled.report.expect("report stored").body.summary.category,
        "Landed"
    );
}

// ============================================================================
// Sequencing: stale completions are discarded
// ============================================================================

#[test]
fn test_stale_completion_is_discarded() {
    let store = ReportStore::new();

    let old_token = store.begin_generate(valid_input());
    let new_token = store.begin_generate(valid_input());

    assert!(store.complete_generate(new_token, sample_outcome("Newer")));
    assert!(!store.complete_generate(old_token, sample_outcome("Older")));

    let snapshot = store.snapshot();
    assert!(!snapshot.loading);
    let report = snapshot.report.expect("newer report stored");
    assert_eq!(report.body.summary.category, "Newer");
}

#[test]
fn test_stale_failure_is_discarded() {
    let store = ReportStore::new();

    let old_token = store.begin_generate(valid_input());
    let new_token = store.begin_generate(valid_input());

    assert!(store.complete_generate(new_token, sample_outcome("Newer")));
    assert!(!store.fail_generate(old_token, &AppError::internal("late failure")));

    let snapshot = store.snapshot();
    assert!(snapshot.error.is_none(), "stale failure must not surface");
    assert_eq!(
        snapshot.report.expect("report kept").body.summary.category,
        "Newer"
    );
}

#[test]
fn test_older_completion_keeps_loading_while_newer_in_flight() {
    let store = ReportStore::new();

    let old_token = store.begin_generate(valid_input());
    let new_token = store.begin_generate(valid_input());

    // The older request settles first; the newer one is still pending
    assert!(store.complete_generate(old_token, sample_outcome("Older")));
    assert!(store.is_loading(), "newer request is still in flight");

    assert!(store.complete_generate(new_token, sample_outcome("Newer")));
    let snapshot = store.snapshot();
    assert!(!snapshot.loading);
    assert_eq!(
        snapshot.report.expect("report stored").body.summary.category,
        "Newer"
    );
}

#[tokio::test]
async fn test_concurrent_submits_newer_request_wins() {
    let store = Arc::new(ReportStore::new());

    // First call answers slowly with "Slow", second quickly with "Quick".
    // The second submission supersedes the first, so the slow reply must
    // be discarded even though it settles last.
    let provider = ScriptedProvider::new(vec![
        ScriptedReply::text_after(80, &VALID_BODY_JSON.replace("Overweight", "Slow")),
        ScriptedReply::text_after(10, &VALID_BODY_JSON.replace("Overweight", "Quick")),
    ]);
    let gateway = ReportGateway::new(provider);

    let (first, second) = tokio::join!(
        store.submit_profile(&gateway, valid_input()),
        store.submit_profile(&gateway, valid_input()),
    );

    // Whichever snapshot was taken last reflects the final state
    let final_snapshot = store.snapshot();
    assert!(!final_snapshot.loading);
    assert_eq!(
        final_snapshot
            .report
            .expect("report stored")
            .body
            .summary
            .category,
        "Quick"
    );

    // Both submissions observed the winning report in their snapshots
    assert!(first.report.is_some());
    assert!(second.report.is_some());
}

// ============================================================================
// Clearing
// ============================================================================

#[tokio::test]
async fn test_clear_resets_to_idle_but_keeps_input() {
    let store = ReportStore::new();
    let gateway = ReportGateway::new(ScriptedProvider::replying(VALID_BODY_JSON));
    store.submit_profile(&gateway, valid_input()).await;

    store.clear();

    let snapshot = store.snapshot();
    assert!(snapshot.report.is_none());
    assert!(snapshot.raw_response.is_none());
    assert!(snapshot.generated_at.is_none());
    assert!(snapshot.error.is_none());
    assert!(!snapshot.loading);
    assert_eq!(snapshot.user_input, Some(valid_input()));
}
