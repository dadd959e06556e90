// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::path::Path;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Health check response with individual component status.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadyResponse {
    /// Overall health status ("ok" or "degraded").
    pub status: String,
    /// Individual health checks and their results.
    pub checks: HealthChecks,
}

/// Individual health check results.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthChecks {
    /// Whether the service process is running.
    pub service: String,
    /// Registered provider names.
    pub providers: Vec<String>,
    /// Whether the session file can be written (only when a session file is configured).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_store: Option<String>,
    /// Whether a session is currently authenticated.
    pub authenticated: bool,
}

/// Simple health check response for liveness probes.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Check that the session file can be written.
///
/// Missing directories are created on first persist, so the nearest existing
/// ancestor is what has to be a writable directory.
fn check_session_store(state: &AppState) -> Option<String> {
    let path = state.session_file.as_ref()?;
    let status = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => writable_ancestor_status(parent),
        _ => "ok",
    };
    Some(status.to_string())
}

fn writable_ancestor_status(dir: &Path) -> &'static str {
    let Some(metadata) = dir.ancestors().find_map(|ancestor| ancestor.metadata().ok()) else {
        return "unavailable";
    };

    if !metadata.is_dir() {
        "not_a_directory"
    } else if metadata.permissions().readonly() {
        "read_only"
    } else {
        "ok"
    }
}

/// Health check endpoint handler.
///
/// Returns 200 if all checks pass, 503 if any check fails.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = ReadyResponse),
        (status = 503, description = "Service is unhealthy", body = ReadyResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let session_store = check_session_store(&state);
    let all_ok = session_store.as_deref().map(|s| s == "ok").unwrap_or(true);

    let response = ReadyResponse {
        status: if all_ok { "ok" } else { "degraded" }.to_string(),
        checks: HealthChecks {
            service: "ok".to_string(),
            providers: state.provider_names.to_vec(),
            session_store,
            authenticated: state.session.is_authenticated().await,
        },
    };

    let status = if all_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

/// Liveness probe handler.
///
/// Always returns 200 if the process is running.
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn liveness() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
