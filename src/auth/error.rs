// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authenticator errors.

use crate::providers::ProviderError;

/// Outcome of a failed authenticator call.
///
/// Missing collaborators are not represented here: they are rejected when
/// the authenticator is built (see [`crate::config::ConfigError`]).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticatorError {
    /// Restore data was missing or named no provider. Callers treat this as
    /// "not currently authenticated".
    #[error("session cannot be restored")]
    CannotRestore,

    /// The external provider failed; passed through unchanged.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl AuthenticatorError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthenticatorError::CannotRestore => "cannot_restore",
            AuthenticatorError::Provider(e) => e.error_code(),
        }
    }
}
