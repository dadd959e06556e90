// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authenticator that delegates every step to an external provider client.
//!
//! Deprecated since 4.2.0: applications should wrap their provider client in
//! an authenticator of their own. Kept so existing integrations keep working
//! until 8.0.0.

use std::sync::{Arc, Once};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::{Authenticator, AuthenticatorError};
use crate::config::ConfigError;
use crate::providers::ProviderClient;
use crate::session::{ProviderOptions, SessionData};

/// Identifier attached to the deprecation warning.
pub const DEPRECATION_ID: &str = "session-auth.authenticators.external";

static DEPRECATION_WARNING: Once = Once::new();

fn warn_deprecated() {
    DEPRECATION_WARNING.call_once(|| {
        warn!(
            id = DEPRECATION_ID,
            since = "4.2.0",
            until = "8.0.0",
            "The external provider authenticator is deprecated"
        );
    });
}

pub struct ExternalProviderAuthenticator {
    client: Arc<dyn ProviderClient>,
    /// Provider that produced the current session, if any.
    provider: RwLock<Option<String>>,
}

impl ExternalProviderAuthenticator {
    pub fn new(client: Arc<dyn ProviderClient>) -> Self {
        warn_deprecated();
        Self {
            client,
            provider: RwLock::new(None),
        }
    }

    pub fn builder() -> ExternalProviderAuthenticatorBuilder {
        ExternalProviderAuthenticatorBuilder::default()
    }

    /// The provider recorded by the last successful authenticate/restore.
    pub async fn current_provider(&self) -> Option<String> {
        self.provider.read().await.clone()
    }

    async fn record_provider(&self, provider: &str, data: &mut SessionData) {
        data.set_provider(provider);
        *self.provider.write().await = Some(provider.to_string());
    }

    async fn forget_provider(&self) {
        *self.provider.write().await = None;
    }
}

impl std::fmt::Debug for ExternalProviderAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExternalProviderAuthenticator")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Authenticator for ExternalProviderAuthenticator {
    async fn authenticate(
        &self,
        provider: &str,
        options: Option<ProviderOptions>,
    ) -> Result<SessionData, AuthenticatorError> {
        let mut data = self
            .client
            .open(provider, options.unwrap_or_default())
            .await?;

        self.record_provider(provider, &mut data).await;
        debug!(provider, "Authenticated with provider");
        Ok(data)
    }

    async fn restore(&self, data: Option<SessionData>) -> Result<SessionData, AuthenticatorError> {
        let mut data = data.unwrap_or_default();
        let Some(provider) = data.provider().map(str::to_owned) else {
            self.forget_provider().await;
            return Err(AuthenticatorError::CannotRestore);
        };

        match self.client.fetch(&provider, &data).await {
            Ok(mut fetched) => {
                self.record_provider(&provider, &mut fetched).await;
                data.merge(fetched);
                debug!(provider = %provider, "Restored session from provider");
                Ok(data)
            }
            Err(e) => {
                self.forget_provider().await;
                Err(e.into())
            }
        }
    }

    async fn invalidate(&self, data: &SessionData) -> Result<(), AuthenticatorError> {
        let provider = self.current_provider().await;
        self.client.close(provider.as_deref(), data).await?;

        self.forget_provider().await;
        debug!(provider = ?provider, "Closed provider");
        Ok(())
    }
}

/// Builder that checks the provider client is present before anything runs.
#[derive(Default)]
pub struct ExternalProviderAuthenticatorBuilder {
    client: Option<Arc<dyn ProviderClient>>,
}

impl ExternalProviderAuthenticatorBuilder {
    pub fn client(mut self, client: Arc<dyn ProviderClient>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> Result<ExternalProviderAuthenticator, ConfigError> {
        let client = self.client.ok_or(ConfigError::MissingProviderClient)?;
        Ok(ExternalProviderAuthenticator::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderError;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Open(String, ProviderOptions),
        Fetch(String, SessionData),
        Close(Option<String>, SessionData),
    }

    /// Provider client double that records calls and returns canned results.
    #[derive(Default)]
    struct FakeClient {
        calls: Mutex<Vec<Call>>,
        open_result: Mutex<Option<Result<SessionData, ProviderError>>>,
        fetch_result: Mutex<Option<Result<SessionData, ProviderError>>>,
        close_result: Mutex<Option<Result<(), ProviderError>>>,
    }

    impl FakeClient {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn on_open(&self, result: Result<SessionData, ProviderError>) {
            *self.open_result.lock().unwrap() = Some(result);
        }

        fn on_fetch(&self, result: Result<SessionData, ProviderError>) {
            *self.fetch_result.lock().unwrap() = Some(result);
        }

        fn on_close(&self, result: Result<(), ProviderError>) {
            *self.close_result.lock().unwrap() = Some(result);
        }
    }

    #[async_trait]
    impl ProviderClient for FakeClient {
        async fn open(
            &self,
            provider: &str,
            options: ProviderOptions,
        ) -> Result<SessionData, ProviderError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Open(provider.to_string(), options));
            self.open_result
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| Ok(SessionData::new()))
        }

        async fn fetch(
            &self,
            provider: &str,
            data: &SessionData,
        ) -> Result<SessionData, ProviderError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Fetch(provider.to_string(), data.clone()));
            self.fetch_result
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| Ok(SessionData::new()))
        }

        async fn close(
            &self,
            provider: Option<&str>,
            data: &SessionData,
        ) -> Result<(), ProviderError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Close(provider.map(str::to_string), data.clone()));
            self.close_result.lock().unwrap().clone().unwrap_or(Ok(()))
        }
    }

    fn data(value: Value) -> SessionData {
        SessionData::try_from(value).unwrap()
    }

    fn setup() -> (Arc<FakeClient>, ExternalProviderAuthenticator) {
        let client = Arc::new(FakeClient::default());
        let authenticator = ExternalProviderAuthenticator::new(client.clone());
        (client, authenticator)
    }

    #[test]
    fn builder_without_client_is_a_config_error() {
        let err = ExternalProviderAuthenticator::builder().build().unwrap_err();
        assert!(matches!(err, ConfigError::MissingProviderClient));
    }

    #[test]
    fn builder_with_client_succeeds() {
        let client: Arc<dyn ProviderClient> = Arc::new(FakeClient::default());
        assert!(ExternalProviderAuthenticator::builder()
            .client(client)
            .build()
            .is_ok());
    }

    #[tokio::test]
    async fn restore_without_data_rejects_silently() {
        let (client, authenticator) = setup();

        let err = authenticator.restore(None).await.unwrap_err();

        assert_eq!(err, AuthenticatorError::CannotRestore);
        assert!(client.calls().is_empty());
        assert_eq!(authenticator.current_provider().await, None);
    }

    #[tokio::test]
    async fn restore_with_empty_data_rejects_silently() {
        let (client, authenticator) = setup();

        let err = authenticator
            .restore(Some(SessionData::new()))
            .await
            .unwrap_err();
        assert_eq!(err, AuthenticatorError::CannotRestore);

        let err = authenticator
            .restore(Some(data(json!({"provider": ""}))))
            .await
            .unwrap_err();
        assert_eq!(err, AuthenticatorError::CannotRestore);
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn restore_merges_fetched_fields_and_keeps_provider() {
        let (client, authenticator) = setup();
        client.on_fetch(Ok(data(json!({"token": "fresh", "expires_in": 3600}))));
        let stored = data(json!({"provider": "github", "token": "stale", "account_id": "a1"}));

        let restored = authenticator.restore(Some(stored.clone())).await.unwrap();

        assert_eq!(
            Value::from(restored),
            json!({
                "provider": "github",
                "token": "fresh",
                "expires_in": 3600,
                "account_id": "a1"
            })
        );
        assert_eq!(client.calls(), vec![Call::Fetch("github".into(), stored)]);
        assert_eq!(
            authenticator.current_provider().await.as_deref(),
            Some("github")
        );
    }

    #[tokio::test]
    async fn restore_overrides_provider_returned_by_fetch() {
        let (client, authenticator) = setup();
        client.on_fetch(Ok(data(json!({"provider": "other"}))));

        let restored = authenticator
            .restore(Some(data(json!({"provider": "github"}))))
            .await
            .unwrap();

        assert_eq!(restored.provider(), Some("github"));
    }

    #[tokio::test]
    async fn failed_restore_clears_provider_and_propagates() {
        let (client, authenticator) = setup();
        client.on_open(Ok(SessionData::new()));
        authenticator.authenticate("github", None).await.unwrap();

        let failure = ProviderError::Request("timeout".into());
        client.on_fetch(Err(failure.clone()));
        let err = authenticator
            .restore(Some(data(json!({"provider": "p"}))))
            .await
            .unwrap_err();

        assert_eq!(err, AuthenticatorError::Provider(failure));
        assert_eq!(authenticator.current_provider().await, None);

        authenticator.invalidate(&SessionData::new()).await.unwrap();
        assert_eq!(
            client.calls().last(),
            Some(&Call::Close(None, SessionData::new()))
        );
    }

    #[tokio::test]
    async fn cannot_restore_also_clears_provider() {
        let (_client, authenticator) = setup();
        authenticator.authenticate("github", None).await.unwrap();

        assert!(authenticator.restore(None).await.is_err());
        assert_eq!(authenticator.current_provider().await, None);
    }

    #[tokio::test]
    async fn authenticate_stamps_provider_and_defaults_options() {
        let (client, authenticator) = setup();
        client.on_open(Ok(data(json!({"access_token": "t"}))));

        let session = authenticator.authenticate("p", None).await.unwrap();

        assert_eq!(
            Value::from(session.clone()),
            json!({"access_token": "t", "provider": "p"})
        );
        assert_eq!(
            client.calls(),
            vec![Call::Open("p".into(), ProviderOptions::new())]
        );

        authenticator.invalidate(&session).await.unwrap();
        assert_eq!(
            client.calls().last(),
            Some(&Call::Close(Some("p".into()), session))
        );
    }

    #[tokio::test]
    async fn authenticate_passes_options_through() {
        let (client, authenticator) = setup();
        let mut options = ProviderOptions::new();
        options.insert("scope".into(), json!("email"));

        authenticator
            .authenticate("p", Some(options.clone()))
            .await
            .unwrap();

        assert_eq!(client.calls(), vec![Call::Open("p".into(), options)]);
    }

    #[tokio::test]
    async fn failed_authenticate_propagates_and_records_nothing() {
        let (client, authenticator) = setup();
        client.on_open(Err(ProviderError::Rejected("popup closed".into())));

        let err = authenticator.authenticate("p", None).await.unwrap_err();

        assert_eq!(
            err,
            AuthenticatorError::Provider(ProviderError::Rejected("popup closed".into()))
        );
        assert_eq!(authenticator.current_provider().await, None);
    }

    #[tokio::test]
    async fn successful_invalidate_clears_provider() {
        let (_client, authenticator) = setup();
        authenticator.authenticate("p", None).await.unwrap();

        authenticator.invalidate(&SessionData::new()).await.unwrap();

        assert_eq!(authenticator.current_provider().await, None);
    }

    #[tokio::test]
    async fn failed_invalidate_keeps_provider() {
        let (client, authenticator) = setup();
        authenticator.authenticate("p", None).await.unwrap();
        client.on_close(Err(ProviderError::Request("offline".into())));

        let err = authenticator
            .invalidate(&SessionData::new())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            AuthenticatorError::Provider(ProviderError::Request("offline".into()))
        );
        assert_eq!(authenticator.current_provider().await.as_deref(), Some("p"));
    }

    #[tokio::test]
    async fn latest_provider_wins() {
        let (_client, authenticator) = setup();
        authenticator.authenticate("first", None).await.unwrap();
        authenticator
            .restore(Some(data(json!({"provider": "second"}))))
            .await
            .unwrap();

        assert_eq!(
            authenticator.current_provider().await.as_deref(),
            Some("second")
        );
    }
}
