// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    accounts::AccountStore,
    error::ApiError,
    models::{Account, CreateAccountRequest},
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/v1/accounts",
    request_body = CreateAccountRequest,
    tag = "Accounts",
    responses(
        (status = 201, body = Account),
        (status = 400, description = "Name is missing"),
    )
)]
pub async fn create_account(
    State(state): State<AppState>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<Account>), ApiError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ApiError::bad_request("name is required"));
    }

    let email = request
        .email
        .map(|email| email.trim().to_string())
        .filter(|email| !email.is_empty());
    let account = state.accounts.insert_account(name, email).await;
    Ok((StatusCode::CREATED, Json(account)))
}

#[utoipa::path(
    get,
    path = "/v1/accounts/{account_id}",
    params(
        ("account_id" = String, Path, description = "Identifier of the account")
    ),
    tag = "Accounts",
    responses(
        (status = 200, body = Account),
        (status = 404, description = "Account not found"),
    )
)]
pub async fn get_account(
    Path(account_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Account>, ApiError> {
    let account = state.accounts.find_record(&account_id).await?;
    Ok(Json(account))
}
