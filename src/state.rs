// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{path::PathBuf, sync::Arc};

use crate::{
    accounts::{AccountLoader, InMemoryAccountStore},
    auth::ExternalProviderAuthenticator,
    config::{Config, ConfigError},
    providers::{demo::DEMO_PROVIDER_NAME, DemoProvider, HttpProvider, ProviderRegistry},
    session::{EphemeralSessionStore, FileSessionStore, SessionManager, SessionStore},
};

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<SessionManager>,
    pub accounts: Arc<InMemoryAccountStore>,
    pub loader: Arc<AccountLoader>,
    pub provider_names: Arc<Vec<String>>,
    pub session_file: Option<PathBuf>,
}

impl AppState {
    /// Wire every collaborator from `config`. Missing pieces are reported
    /// here, before the server starts.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let registry = provider_registry(config)?;
        let store: Arc<dyn SessionStore> = match &config.session_file {
            Some(path) => Arc::new(FileSessionStore::new(path)),
            None => Arc::new(EphemeralSessionStore::new()),
        };
        let mut state = Self::with_parts(registry, store)?;
        state.session_file = config.session_file.clone();
        Ok(state)
    }

    pub fn with_parts(
        registry: ProviderRegistry,
        store: Arc<dyn SessionStore>,
    ) -> Result<Self, ConfigError> {
        if registry.is_empty() {
            return Err(ConfigError::NoProviders);
        }
        let provider_names = registry.names();

        let authenticator = ExternalProviderAuthenticator::builder()
            .client(Arc::new(registry))
            .build()?;
        Ok(Self::assemble(authenticator, store, provider_names))
    }

    fn assemble(
        authenticator: ExternalProviderAuthenticator,
        store: Arc<dyn SessionStore>,
        provider_names: Vec<String>,
    ) -> Self {
        let session = Arc::new(SessionManager::new(Arc::new(authenticator), store));
        let accounts = Arc::new(InMemoryAccountStore::new());
        let loader = Arc::new(AccountLoader::new(session.clone(), accounts.clone()));

        Self {
            session,
            accounts,
            loader,
            provider_names: Arc::new(provider_names),
            session_file: None,
        }
    }
}

impl Default for AppState {
    /// Demo provider only, session kept in memory.
    fn default() -> Self {
        let registry =
            ProviderRegistry::new().with(DEMO_PROVIDER_NAME, Arc::new(DemoProvider::new()));
        let provider_names = registry.names();
        Self::assemble(
            ExternalProviderAuthenticator::new(Arc::new(registry)),
            Arc::new(EphemeralSessionStore::new()),
            provider_names,
        )
    }
}

fn provider_registry(config: &Config) -> Result<ProviderRegistry, ConfigError> {
    let mut registry = ProviderRegistry::new();

    if config.demo_provider {
        registry.register(DEMO_PROVIDER_NAME, Arc::new(DemoProvider::new()));
    }

    for provider in &config.http_providers {
        let http = HttpProvider::new(provider.base_url.clone()).map_err(|e| {
            ConfigError::InvalidProviderUrl {
                name: provider.name.clone(),
                reason: e.to_string(),
            }
        })?;
        registry.register(provider.name.clone(), Arc::new(http));
    }

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpProviderConfig;
    use url::Url;

    #[test]
    fn default_state_registers_demo_provider() {
        let state = AppState::default();
        assert_eq!(*state.provider_names, vec!["demo".to_string()]);
    }

    #[test]
    fn from_config_registers_http_providers() {
        let config = Config {
            http_providers: vec![HttpProviderConfig {
                name: "github".into(),
                base_url: Url::parse("https://auth.example.com/github").unwrap(),
            }],
            ..Config::default()
        };

        let state = AppState::from_config(&config).unwrap();
        assert_eq!(
            *state.provider_names,
            vec!["demo".to_string(), "github".to_string()]
        );
    }

    #[test]
    fn empty_registry_is_a_config_error() {
        let result = AppState::with_parts(
            ProviderRegistry::new(),
            Arc::new(EphemeralSessionStore::new()),
        );
        assert!(matches!(result, Err(ConfigError::NoProviders)));
    }
}
