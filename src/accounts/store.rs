// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account backing store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::Account;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("account not found: {0}")]
    NotFound(String),

    #[error("account store unavailable: {0}")]
    Unavailable(String),
}

/// Lookup of account entities by id.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_record(&self, id: &str) -> Result<Account, StoreError>;
}

#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an account with a fresh id.
    pub async fn insert_account(&self, name: impl Into<String>, email: Option<String>) -> Account {
        self.insert_with_id(Uuid::new_v4().to_string(), name, email)
            .await
    }

    /// Create or replace the account stored under `id`.
    pub async fn insert_with_id(
        &self,
        id: impl Into<String>,
        name: impl Into<String>,
        email: Option<String>,
    ) -> Account {
        let account = Account {
            id: id.into(),
            name: name.into(),
            email,
            created_at: Utc::now(),
        };
        self.accounts
            .write()
            .await
            .insert(account.id.clone(), account.clone());
        account
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find_record(&self, id: &str) -> Result<Account, StoreError> {
        self.accounts
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
