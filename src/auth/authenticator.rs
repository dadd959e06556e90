// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The authenticator strategy seam.

use async_trait::async_trait;

use super::AuthenticatorError;
use crate::session::{ProviderOptions, SessionData};

/// Strategy mediating credential exchange with an external identity
/// provider.
///
/// The host session manager drives the lifecycle; an authenticator only
/// performs the external side effects of each transition:
///
/// ```text
/// unauthenticated --authenticate--> authenticated --invalidate--> unauthenticated
///                 \---restore------/
/// ```
///
/// Hosts call these one at a time; implementations need not guard against
/// overlapping calls on the same instance.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Exchange credentials with `provider` and return the new session data.
    async fn authenticate(
        &self,
        provider: &str,
        options: Option<ProviderOptions>,
    ) -> Result<SessionData, AuthenticatorError>;

    /// Re-establish a session from previously persisted data.
    ///
    /// [`AuthenticatorError::CannotRestore`] means "not authenticated" and is
    /// not an error worth reporting to the user.
    async fn restore(&self, data: Option<SessionData>) -> Result<SessionData, AuthenticatorError>;

    /// Tear the session down. A failure means the session stays
    /// authenticated.
    async fn invalidate(&self, data: &SessionData) -> Result<(), AuthenticatorError>;
}
