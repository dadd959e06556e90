// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! External provider errors.

/// Failure reported by an external provider or the registry in front of it.
///
/// These are surfaced to callers verbatim; nothing in this crate retries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("no provider named '{0}' is registered")]
    UnknownProvider(String),

    #[error("no provider is active for this session")]
    NoActiveProvider,

    #[error("provider does not support {0}")]
    Unsupported(&'static str),

    #[error("provider rejected the request: {0}")]
    Rejected(String),

    #[error("provider request failed: {0}")]
    Request(String),

    #[error("provider response was invalid: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Stable error code used in logs and API bodies.
    pub fn error_code(&self) -> &'static str {
        match self {
            ProviderError::UnknownProvider(_) => "unknown_provider",
            ProviderError::NoActiveProvider => "no_active_provider",
            ProviderError::Unsupported(_) => "unsupported",
            ProviderError::Rejected(_) => "rejected",
            ProviderError::Request(_) => "request_failed",
            ProviderError::InvalidResponse(_) => "invalid_response",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        assert_eq!(
            ProviderError::UnknownProvider("github".into()).to_string(),
            "no provider named 'github' is registered"
        );
        assert_eq!(
            ProviderError::Unsupported("fetch").to_string(),
            "provider does not support fetch"
        );
    }

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(ProviderError::NoActiveProvider.error_code(), "no_active_provider");
        assert_eq!(ProviderError::Rejected("x".into()).error_code(), "rejected");
    }
}
