// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::{
    accounts::StoreError,
    auth::AuthenticatorError,
    providers::ProviderError,
    session::SessionError,
};

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        let status = match err {
            ProviderError::Rejected(_) => StatusCode::UNAUTHORIZED,
            ProviderError::UnknownProvider(_) | ProviderError::NoActiveProvider => {
                StatusCode::BAD_REQUEST
            }
            ProviderError::Unsupported(_)
            | ProviderError::Request(_)
            | ProviderError::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
        };
        Self::new(status, err.to_string())
    }
}

impl From<AuthenticatorError> for ApiError {
    fn from(err: AuthenticatorError) -> Self {
        match err {
            AuthenticatorError::CannotRestore => Self::unauthorized(err.to_string()),
            AuthenticatorError::Provider(e) => e.into(),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotAuthenticated => Self::unauthorized(err.to_string()),
            SessionError::Authenticator(e) => e.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Self::not_found(err.to_string()),
            StoreError::Unavailable(_) => {
                Self::new(StatusCode::SERVICE_UNAVAILABLE, err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn constructors_set_status_and_message() {
        let nf = ApiError::not_found("missing");
        assert_eq!(nf.status, StatusCode::NOT_FOUND);
        assert_eq!(nf.message, "missing");

        let bad = ApiError::bad_request("bad");
        assert_eq!(bad.status, StatusCode::BAD_REQUEST);

        let unauth = ApiError::unauthorized("who");
        assert_eq!(unauth.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn session_errors_map_to_statuses() {
        let cases = [
            (
                ApiError::from(SessionError::NotAuthenticated),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ApiError::from(AuthenticatorError::CannotRestore),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ApiError::from(ProviderError::Rejected("denied".into())),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ApiError::from(ProviderError::UnknownProvider("x".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(ProviderError::Request("timeout".into())),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ApiError::from(StoreError::NotFound("a1".into())),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(StoreError::Unavailable("down".into())),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.status, status, "{}", err.message);
        }
    }

    #[test]
    fn provider_failure_message_is_kept() {
        let err = ApiError::from(SessionError::Authenticator(AuthenticatorError::Provider(
            ProviderError::Request("offline".into()),
        )));
        assert_eq!(err.message, "provider request failed: offline");
    }

    #[tokio::test]
    async fn into_response_returns_json_body() {
        let response = ApiError::bad_request("bad data").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"error":"bad data"}"#);
    }
}
