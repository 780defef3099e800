// ABOUTME: Finite-state report store tracking the request/response lifecycle for presentation
// ABOUTME: Sequence-tokened transitions discard stale completions from superseded requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitaPlan Labs

//! # Report State Store
//!
//! A single mutable record per user session, moving through
//! idle → loading → success/error. The store wraps the gateway call in
//! [`ReportStore::submit_profile`]: every gateway failure is caught here and
//! surfaced as state, never propagated or allowed to panic the session.
//!
//! Re-submission while a request is in flight is permitted and does not
//! cancel the earlier call. Each request carries a monotonically increasing
//! [`RequestToken`]; a completion or failure whose token is older than the
//! last applied one is discarded, so an out-of-order slow response can never
//! overwrite a newer result.
//!
//! Error variants stay tagged until this boundary; only here are they
//! flattened to display strings for consumers.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::gateway::{GenerateOutcome, ReportGateway};
use crate::models::UserProfileInput;
use crate::report::HealthReport;

/// Token identifying one in-flight generation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct RequestToken {
    seq: u64,
}

/// Read-only view of the store for presentation collaborators
#[derive(Debug, Clone, Serialize)]
pub struct ReportSnapshot {
    /// Last submitted profile
    pub user_input: Option<UserProfileInput>,
    /// Last successful report; survives later failures
    pub report: Option<HealthReport>,
    /// Whether a request is currently in flight
    pub loading: bool,
    /// Display message of the most recent failure, if any
    pub error: Option<String>,
    /// Raw reply text the last report was decoded from
    pub raw_response: Option<String>,
    /// When the last report landed
    pub generated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct StoreInner {
    user_input: Option<UserProfileInput>,
    report: Option<HealthReport>,
    raw_response: Option<String>,
    generated_at: Option<DateTime<Utc>>,
    loading: bool,
    error: Option<String>,
    /// Sequence of the newest request handed out
    issued_seq: u64,
    /// Sequence of the newest completion or failure applied
    applied_seq: u64,
}

/// Finite-state store for one session's report lifecycle
#[derive(Debug, Default)]
pub struct ReportStore {
    inner: Mutex<StoreInner>,
}

impl ReportStore {
    /// Create an idle store (no input, no report, no error)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record the submitted profile without touching the request lifecycle
    pub fn set_user_input(&self, input: UserProfileInput) {
        self.lock().user_input = Some(input);
    }

    /// Enter the loading state and issue a token for this request
    ///
    /// Permitted in any state. A request already in flight is not cancelled;
    /// its eventual completion will carry an older token and be discarded.
    pub fn begin_generate(&self, input: UserProfileInput) -> RequestToken {
        let mut inner = self.lock();
        inner.issued_seq += 1;
        inner.user_input = Some(input);
        inner.loading = true;
        inner.error = None;
        debug!(seq = inner.issued_seq, "Report generation started");
        RequestToken {
            seq: inner.issued_seq,
        }
    }

    /// Apply a successful generation outcome
    ///
    /// Returns `false` when the token is stale (a newer completion was
    /// already applied) and the outcome was discarded.
    pub fn complete_generate(&self, token: RequestToken, outcome: GenerateOutcome) -> bool {
        let mut inner = self.lock();
        if token.seq <= inner.applied_seq {
            debug!(seq = token.seq, applied = inner.applied_seq, "Discarding stale completion");
            return false;
        }
        inner.applied_seq = token.seq;
        inner.report = Some(outcome.report);
        inner.raw_response = Some(outcome.raw_text);
        inner.generated_at = Some(outcome.generated_at);
        inner.error = None;
        // Stay in loading if a newer request is still in flight
        inner.loading = token.seq < inner.issued_seq;
        true
    }

    /// Apply a generation failure, flattening the tagged error to a string
    ///
    /// Leaves any previously stored report untouched. Returns `false` when
    /// the token is stale and the failure was discarded.
    pub fn fail_generate(&self, token: RequestToken, error: &AppError) -> bool {
        let mut inner = self.lock();
        if token.seq <= inner.applied_seq {
            debug!(seq = token.seq, applied = inner.applied_seq, "Discarding stale failure");
            return false;
        }
        inner.applied_seq = token.seq;
        inner.error = Some(error.to_string());
        inner.loading = token.seq < inner.issued_seq;
        true
    }

    /// Reset report, raw response, and error back to the idle state
    ///
    /// The last submitted profile survives so the form can be re-rendered.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.report = None;
        inner.raw_response = None;
        inner.generated_at = None;
        inner.error = None;
        inner.loading = false;
    }

    /// Whether a request is currently in flight
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// Consistent read of the whole record
    #[must_use]
    pub fn snapshot(&self) -> ReportSnapshot {
        let inner = self.lock();
        ReportSnapshot {
            user_input: inner.user_input.clone(),
            report: inner.report.clone(),
            loading: inner.loading,
            error: inner.error.clone(),
            raw_response: inner.raw_response.clone(),
            generated_at: inner.generated_at,
        }
    }

    /// Inbound operation: validate, generate, and transition
    ///
    /// Range validation failures surface as state without invoking the
    /// gateway. Gateway errors are caught and stored; nothing on this path
    /// is fatal to the session and the caller may resubmit immediately.
    pub async fn submit_profile(
        &self,
        gateway: &ReportGateway,
        input: UserProfileInput,
    ) -> ReportSnapshot {
        match input.validate() {
            Ok(()) => {
                let token = self.begin_generate(input.clone());
                match gateway.generate(&input).await {
                    Ok(outcome) => {
                        self.complete_generate(token, outcome);
                    }
                    Err(error) => {
                        warn!(code = ?error.code, "Report generation failed");
                        self.fail_generate(token, &error);
                    }
                }
            }
            Err(error) => {
                // No token is issued, so an earlier request still in flight
                // keeps its loading flag and will settle normally.
                let mut inner = self.lock();
                inner.user_input = Some(input);
                inner.error = Some(error.to_string());
            }
        }
        self.snapshot()
    }
}
