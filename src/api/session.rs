// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session lifecycle endpoints.

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde_json::Value;

use crate::{
    auth::AuthenticatorError,
    error::ApiError,
    models::{Account, AuthenticateRequest, SessionResponse},
    session::{SessionData, SessionError},
    state::AppState,
};

/// Current session state.
#[utoipa::path(
    get,
    path = "/v1/session",
    tag = "Session",
    responses((status = 200, body = SessionResponse))
)]
pub async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let data = state.session.authenticated_data().await;
    Json(data.into())
}

/// Authenticate the session with a registered provider.
#[utoipa::path(
    post,
    path = "/v1/session",
    request_body = AuthenticateRequest,
    tag = "Session",
    responses(
        (status = 200, description = "Session authenticated", body = SessionResponse),
        (status = 400, description = "Unknown provider"),
        (status = 401, description = "Provider rejected the credentials"),
        (status = 502, description = "Provider failed"),
    )
)]
pub async fn authenticate(
    State(state): State<AppState>,
    Json(request): Json<AuthenticateRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    if request.provider.trim().is_empty() {
        return Err(ApiError::bad_request("provider is required"));
    }

    let data = state
        .session
        .authenticate(&request.provider, request.options)
        .await?;
    state.loader.clear().await;
    Ok(Json(Some(data).into()))
}

/// Restore the session from previously persisted data.
///
/// An empty body, `null` or anything that is not an object is treated as
/// "nothing to restore".
#[utoipa::path(
    post,
    path = "/v1/session/restore",
    request_body(content = SessionData, description = "Persisted session data, may be empty"),
    tag = "Session",
    responses(
        (status = 200, description = "Session restored", body = SessionResponse),
        (status = 401, description = "Nothing to restore"),
        (status = 502, description = "Provider failed"),
    )
)]
pub async fn restore(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SessionResponse>, ApiError> {
    let data = parse_restore_body(&body)?;

    // Whatever the outcome, the session no longer belongs to the account
    // loaded before.
    let restored = state.session.restore(data).await;
    state.loader.clear().await;

    if restored? {
        Ok(Json(state.session.authenticated_data().await.into()))
    } else {
        Err(AuthenticatorError::CannotRestore.into())
    }
}

/// Invalidate the session. If the provider refuses, the session is kept.
#[utoipa::path(
    delete,
    path = "/v1/session",
    tag = "Session",
    responses(
        (status = 204, description = "Session invalidated"),
        (status = 401, description = "Session is not authenticated"),
        (status = 502, description = "Provider refused; session kept"),
    )
)]
pub async fn invalidate(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.session.invalidate().await?;
    state.loader.clear().await;
    Ok(StatusCode::NO_CONTENT)
}

/// Load and return the account of the authenticated session.
#[utoipa::path(
    get,
    path = "/v1/session/account",
    tag = "Session",
    responses(
        (status = 200, body = Account),
        (status = 401, description = "Session is not authenticated"),
        (status = 404, description = "Session has no account, or the account does not exist"),
    )
)]
pub async fn current_account(State(state): State<AppState>) -> Result<Json<Account>, ApiError> {
    if !state.session.is_authenticated().await {
        return Err(SessionError::NotAuthenticated.into());
    }

    state.loader.load_current_user().await?;
    state
        .loader
        .account()
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Session has no account"))
}

fn parse_restore_body(body: &[u8]) -> Result<Option<SessionData>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request(format!("invalid JSON body: {e}")))?;
    Ok(SessionData::try_from(value).ok())
}
