// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # External Providers
//!
//! A provider is one concrete login mechanism (an OAuth popup broker, a
//! token service, the built-in demo). Authenticators never talk to a
//! provider directly; they go through a [`ProviderClient`], which resolves
//! providers by name.
//!
//! ## Pieces
//!
//! - [`Provider`] - one named mechanism (`open` / `fetch` / `close`)
//! - [`ProviderClient`] - the name-addressed dependency an authenticator is given
//! - [`ProviderRegistry`] - the in-process [`ProviderClient`]
//! - [`HttpProvider`] - provider backed by a remote JSON endpoint
//! - [`DemoProvider`] - self-contained provider used by the demo server

use async_trait::async_trait;

use crate::session::{ProviderOptions, SessionData};

pub mod demo;
pub mod error;
pub mod http;
pub mod registry;

pub use demo::DemoProvider;
pub use error::ProviderError;
pub use http::HttpProvider;
pub use registry::ProviderRegistry;

/// A single external login mechanism.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Run the login flow and return the data the provider produced.
    async fn open(&self, options: ProviderOptions) -> Result<SessionData, ProviderError>;

    /// Re-validate previously produced data.
    ///
    /// Many mechanisms cannot do this; they keep the default, which fails.
    async fn fetch(&self, _data: &SessionData) -> Result<SessionData, ProviderError> {
        Err(ProviderError::Unsupported("fetch"))
    }

    /// Release whatever the provider holds for this session.
    async fn close(&self, _data: &SessionData) -> Result<(), ProviderError> {
        Ok(())
    }
}

/// Name-addressed access to external providers.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    async fn open(
        &self,
        provider: &str,
        options: ProviderOptions,
    ) -> Result<SessionData, ProviderError>;

    async fn fetch(&self, provider: &str, data: &SessionData)
        -> Result<SessionData, ProviderError>;

    /// `provider` is `None` when the caller has no provider recorded.
    async fn close(&self, provider: Option<&str>, data: &SessionData)
        -> Result<(), ProviderError>;
}
