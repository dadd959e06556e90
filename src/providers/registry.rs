// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-process provider registry.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tracing::{debug, warn};

use super::{Provider, ProviderClient, ProviderError};
use crate::session::{ProviderOptions, SessionData};

/// Registered providers, keyed by name.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn Provider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `provider` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, provider: Arc<dyn Provider>) {
        self.providers.insert(name.into(), provider);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, name: impl Into<String>, provider: Arc<dyn Provider>) -> Self {
        self.register(name, provider);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.keys().cloned().collect();
        names.sort();
        names
    }

    fn lookup(&self, name: &str) -> Result<&Arc<dyn Provider>, ProviderError> {
        self.providers
            .get(name)
            .ok_or_else(|| ProviderError::UnknownProvider(name.to_string()))
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .finish()
    }
}

#[async_trait]
impl ProviderClient for ProviderRegistry {
    async fn open(
        &self,
        provider: &str,
        options: ProviderOptions,
    ) -> Result<SessionData, ProviderError> {
        debug!(provider, "Opening provider");
        self.lookup(provider)?.open(options).await.inspect_err(|e| {
            warn!(provider, error = %e, error_code = e.error_code(), "Provider open failed");
        })
    }

    async fn fetch(
        &self,
        provider: &str,
        data: &SessionData,
    ) -> Result<SessionData, ProviderError> {
        debug!(provider, "Fetching from provider");
        self.lookup(provider)?.fetch(data).await.inspect_err(|e| {
            warn!(provider, error = %e, error_code = e.error_code(), "Provider fetch failed");
        })
    }

    async fn close(
        &self,
        provider: Option<&str>,
        data: &SessionData,
    ) -> Result<(), ProviderError> {
        let provider = provider.ok_or(ProviderError::NoActiveProvider)?;
        debug!(provider, "Closing provider");
        self.lookup(provider)?.close(data).await.inspect_err(|e| {
            warn!(provider, error = %e, error_code = e.error_code(), "Provider close failed");
        })
    }
}
