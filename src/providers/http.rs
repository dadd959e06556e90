// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Provider backed by a remote JSON endpoint.
//!
//! The remote side exposes three routes under its base URL:
//!
//! | Route          | Body            | Response                  |
//! |----------------|-----------------|---------------------------|
//! | `POST /open`   | open options    | session data (object)     |
//! | `POST /fetch`  | session data    | refreshed fields (object) |
//! | `POST /close`  | session data    | any 2xx                   |

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{Provider, ProviderError};
use crate::session::{ProviderOptions, SessionData};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct HttpProvider {
    base_url: Url,
    http: Client,
}

impl HttpProvider {
    /// Routes are resolved relative to `base_url`. Its query and fragment are
    /// dropped and its path is treated as a directory, so
    /// `https://auth.example.com/github` serves `.../github/open`.
    pub fn new(mut base_url: Url) -> Result<Self, ProviderError> {
        base_url.set_query(None);
        base_url.set_fragment(None);
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ProviderError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { base_url, http })
    }

    fn endpoint(&self, route: &str) -> Result<Url, ProviderError> {
        self.base_url
            .join(route)
            .map_err(|e| ProviderError::Request(format!("invalid route /{route}: {e}")))
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        route: &str,
        body: &T,
    ) -> Result<reqwest::Response, ProviderError> {
        let url = self.endpoint(route)?;
        debug!(url = %url, "Provider request");

        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::Request(format!("POST /{route} failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ProviderError::Rejected(format!("POST /{route} returned {status}: {body}"))
            }
            _ => ProviderError::Request(format!("POST /{route} returned {status}: {body}")),
        })
    }

    async fn post_for_data<T: Serialize + ?Sized>(
        &self,
        route: &str,
        body: &T,
    ) -> Result<SessionData, ProviderError> {
        let value: Value = self.post_json(route, body).await?.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("POST /{route} invalid JSON: {e}"))
        })?;

        SessionData::try_from(value).map_err(|other| {
            ProviderError::InvalidResponse(format!(
                "POST /{route} expected a JSON object, got {other}"
            ))
        })
    }
}

#[async_trait]
impl Provider for HttpProvider {
    async fn open(&self, options: ProviderOptions) -> Result<SessionData, ProviderError> {
        self.post_for_data("open", &options).await
    }

    async fn fetch(&self, data: &SessionData) -> Result<SessionData, ProviderError> {
        self.post_for_data("fetch", data).await
    }

    async fn close(&self, data: &SessionData) -> Result<(), ProviderError> {
        self.post_json("close", data).await.map(|_| ())
    }
}
