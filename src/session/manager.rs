// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Minimal host session manager.
//!
//! Owns the `unauthenticated -> authenticated -> unauthenticated` state,
//! drives an [`Authenticator`] through it and keeps the persisted copy of the
//! session data in step.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::{SessionData, SessionStore};
use crate::auth::{Authenticator, AuthenticatorError};
use crate::session::ProviderOptions;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("session is not authenticated")]
    NotAuthenticated,

    #[error(transparent)]
    Authenticator(#[from] AuthenticatorError),
}

/// Read access to the current session's authenticated data.
#[async_trait]
pub trait SessionSource: Send + Sync {
    async fn authenticated_data(&self) -> Option<SessionData>;
}

pub struct SessionManager {
    authenticator: Arc<dyn Authenticator>,
    store: Arc<dyn SessionStore>,
    authenticated: RwLock<Option<SessionData>>,
}

impl SessionManager {
    pub fn new(authenticator: Arc<dyn Authenticator>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            authenticator,
            store,
            authenticated: RwLock::new(None),
        }
    }

    pub async fn authenticated_data(&self) -> Option<SessionData> {
        self.authenticated.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.authenticated.read().await.is_some()
    }

    pub async fn authenticate(
        &self,
        provider: &str,
        options: Option<ProviderOptions>,
    ) -> Result<SessionData, SessionError> {
        let data = self.authenticator.authenticate(provider, options).await?;
        self.set_authenticated(data.clone()).await;
        info!(provider, "Session authenticated");
        Ok(data)
    }

    /// Restore from `data`.
    ///
    /// Returns `Ok(false)` when the data cannot be restored; the session is
    /// then unauthenticated and nothing is reported as an error.
    pub async fn restore(&self, data: Option<SessionData>) -> Result<bool, SessionError> {
        match self.authenticator.restore(data).await {
            Ok(restored) => {
                self.set_authenticated(restored).await;
                info!("Session restored");
                Ok(true)
            }
            Err(AuthenticatorError::CannotRestore) => {
                debug!("Nothing to restore, session is unauthenticated");
                self.clear().await;
                Ok(false)
            }
            Err(e) => {
                warn!(error = %e, error_code = e.error_code(), "Session restore failed");
                self.clear().await;
                Err(e.into())
            }
        }
    }

    /// Restore from whatever the session store holds.
    pub async fn restore_persisted(&self) -> Result<bool, SessionError> {
        let persisted = self.store.load().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load persisted session, starting unauthenticated");
            None
        });
        self.restore(persisted).await
    }

    /// Invalidate the current session. If the authenticator refuses, the
    /// session stays authenticated.
    pub async fn invalidate(&self) -> Result<(), SessionError> {
        let data = self
            .authenticated
            .read()
            .await
            .clone()
            .ok_or(SessionError::NotAuthenticated)?;

        self.authenticator.invalidate(&data).await.inspect_err(|e| {
            warn!(error = %e, error_code = e.error_code(), "Invalidation refused, session kept");
        })?;

        self.clear().await;
        info!("Session invalidated");
        Ok(())
    }

    async fn set_authenticated(&self, data: SessionData) {
        if let Err(e) = self.store.persist(&data) {
            warn!(error = %e, "Failed to persist session data");
        }
        *self.authenticated.write().await = Some(data);
    }

    async fn clear(&self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear persisted session data");
        }
        *self.authenticated.write().await = None;
    }
}

#[async_trait]
impl SessionSource for SessionManager {
    async fn authenticated_data(&self) -> Option<SessionData> {
        SessionManager::authenticated_data(self).await
    }
}
