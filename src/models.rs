// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response structures used by the demo REST API. All types
//! derive `Serialize`/`Deserialize` and `ToSchema` for JSON handling and
//! OpenAPI documentation.
//!
//! ## Model Categories
//!
//! - **Accounts**: user records loaded once a session is authenticated
//! - **Session**: authenticate / restore / status payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::session::{ProviderOptions, SessionData};

// =============================================================================
// Account Models
// =============================================================================

/// A user account held by the backing store.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Account {
    /// Unique identifier, referenced by `account_id` in session data.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact email, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// Request to create an account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct CreateAccountRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

// =============================================================================
// Session Models
// =============================================================================

/// Request to authenticate the session with a provider.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AuthenticateRequest {
    /// Registered provider name (e.g. `demo`).
    pub provider: String,
    /// Options handed to the provider; defaults to `{}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub options: Option<ProviderOptions>,
}

/// Current state of the session.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SessionResponse {
    pub authenticated: bool,
    /// Authenticated session data, present only when authenticated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<SessionData>,
}

impl SessionResponse {
    pub fn unauthenticated() -> Self {
        Self {
            authenticated: false,
            data: None,
        }
    }
}

impl From<Option<SessionData>> for SessionResponse {
    fn from(data: Option<SessionData>) -> Self {
        Self {
            authenticated: data.is_some(),
            data,
        }
    }
}
