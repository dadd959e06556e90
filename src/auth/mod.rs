// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Authenticators mediate credential exchange with external providers on
//! behalf of the host session manager.
//!
//! ## Flow
//!
//! 1. On startup the host calls `restore` with the persisted session data
//! 2. On user action the host calls `authenticate` with a provider name
//! 3. The authenticator talks to the provider and returns session data
//!    stamped with the provider that produced it
//! 4. On logout the host calls `invalidate`; a failure keeps the session
//!
//! ## Errors
//!
//! - Missing collaborators fail when the authenticator is built
//! - Missing restore data yields [`AuthenticatorError::CannotRestore`]
//! - Provider failures pass through as [`AuthenticatorError::Provider`]

pub mod authenticator;
pub mod error;
pub mod external;

pub use authenticator::Authenticator;
pub use error::AuthenticatorError;
pub use external::{ExternalProviderAuthenticator, ExternalProviderAuthenticatorBuilder};
