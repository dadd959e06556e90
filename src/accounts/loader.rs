// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Loads the account of the authenticated session.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use super::{AccountStore, StoreError};
use crate::models::Account;
use crate::session::SessionSource;

/// Holds the current account for the lifetime of an authenticated session.
///
/// No retries and no caching beyond the single last-loaded account.
pub struct AccountLoader {
    session: Arc<dyn SessionSource>,
    store: Arc<dyn AccountStore>,
    account: RwLock<Option<Account>>,
}

impl AccountLoader {
    pub fn new(session: Arc<dyn SessionSource>, store: Arc<dyn AccountStore>) -> Self {
        Self {
            session,
            store,
            account: RwLock::new(None),
        }
    }

    /// Fetch the account named by the session's `account_id` and make it
    /// current.
    ///
    /// Without an id no lookup happens and any previously loaded account is
    /// dropped, since it no longer belongs to the session. A failed lookup
    /// leaves the current account as it was.
    pub async fn load_current_user(&self) -> Result<(), StoreError> {
        let Some(account_id) = self
            .session
            .authenticated_data()
            .await
            .and_then(|data| data.account_id())
        else {
            debug!("No account id in session, nothing to load");
            self.clear().await;
            return Ok(());
        };

        let account = self.store.find_record(&account_id).await?;
        debug!(account_id = %account.id, "Loaded current account");
        *self.account.write().await = Some(account);
        Ok(())
    }

    pub async fn account(&self) -> Option<Account> {
        self.account.read().await.clone()
    }

    /// Drop the current account, typically once the session is invalidated.
    pub async fn clear(&self) {
        *self.account.write().await = None;
    }
}
