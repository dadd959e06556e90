// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Self-contained provider for the demo server.
//!
//! `open` trusts the `account_id` it is given and mints an opaque access
//! token; `fetch` accepts any data still carrying a token. Nothing is
//! verified, so this must never be registered outside demos and tests.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use super::{Provider, ProviderError};
use crate::session::{ProviderOptions, SessionData, ACCOUNT_ID_KEY};

/// Name the demo provider is registered under.
pub const DEMO_PROVIDER_NAME: &str = "demo";

const ACCESS_TOKEN_KEY: &str = "access_token";

#[derive(Debug, Clone, Default)]
pub struct DemoProvider;

impl DemoProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Provider for DemoProvider {
    async fn open(&self, options: ProviderOptions) -> Result<SessionData, ProviderError> {
        let account_id = match options.get(ACCOUNT_ID_KEY) {
            Some(Value::String(id)) if !id.trim().is_empty() => id.trim().to_string(),
            _ => {
                return Err(ProviderError::Rejected(
                    "account_id option is required".to_string(),
                ))
            }
        };

        let mut data = SessionData::new();
        data.insert(ACCOUNT_ID_KEY, account_id);
        data.insert(ACCESS_TOKEN_KEY, Uuid::new_v4().to_string());
        data.insert("authenticated_at", Utc::now().to_rfc3339());
        Ok(data)
    }

    async fn fetch(&self, data: &SessionData) -> Result<SessionData, ProviderError> {
        match data.get(ACCESS_TOKEN_KEY) {
            Some(Value::String(token)) if !token.is_empty() => {
                let mut fetched = SessionData::new();
                fetched.insert("restored_at", Utc::now().to_rfc3339());
                Ok(fetched)
            }
            _ => Err(ProviderError::Rejected(
                "session data carries no access token".to_string(),
            )),
        }
    }
}
