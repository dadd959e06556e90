// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session data: the JSON object persisted by the host to represent
//! "authenticated as X via provider Y".
//!
//! The payload is opaque apart from two keys:
//!
//! - [`PROVIDER_KEY`] names the external provider that produced it
//! - [`ACCOUNT_ID_KEY`] identifies the account the session belongs to

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Key stamped with the provider id once a provider has produced the data.
pub const PROVIDER_KEY: &str = "provider";

/// Key carrying the id of the authenticated account.
pub const ACCOUNT_ID_KEY: &str = "account_id";

/// Options handed to a provider when it is opened.
pub type ProviderOptions = Map<String, Value>;

/// Authenticated session payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct SessionData(Map<String, Value>);

impl SessionData {
    pub fn new() -> Self {
        Self::default()
    }

    /// The provider that produced this data.
    ///
    /// Only a non-empty string counts; null, numbers and `""` are treated
    /// as if the key were missing.
    pub fn provider(&self) -> Option<&str> {
        match self.0.get(PROVIDER_KEY) {
            Some(Value::String(provider)) if !provider.is_empty() => Some(provider),
            _ => None,
        }
    }

    pub fn set_provider(&mut self, provider: impl Into<String>) {
        self.0
            .insert(PROVIDER_KEY.to_string(), Value::String(provider.into()));
    }

    /// The authenticated account id, if one is present.
    ///
    /// Numeric ids are rendered as decimal strings. Empty strings and `0`
    /// count as absent.
    pub fn account_id(&self) -> Option<String> {
        match self.0.get(ACCOUNT_ID_KEY)? {
            Value::String(id) if !id.is_empty() => Some(id.clone()),
            Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Shallow merge: every key of `other` overwrites the same key here.
    pub fn merge(&mut self, other: SessionData) {
        self.0.extend(other.0);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }
}

impl From<Map<String, Value>> for SessionData {
    fn from(value: Map<String, Value>) -> Self {
        SessionData(value)
    }
}

impl From<SessionData> for Value {
    fn from(value: SessionData) -> Self {
        Value::Object(value.0)
    }
}

impl TryFrom<Value> for SessionData {
    type Error = Value;

    /// Only JSON objects are session data; anything else is handed back.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(SessionData(map)),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(value: Value) -> SessionData {
        SessionData::try_from(value).unwrap()
    }

    #[test]
    fn provider_requires_non_empty_string() {
        assert_eq!(data(json!({"provider": "github"})).provider(), Some("github"));
        assert_eq!(data(json!({"provider": ""})).provider(), None);
        assert_eq!(data(json!({"provider": null})).provider(), None);
        assert_eq!(data(json!({"provider": 7})).provider(), None);
        assert_eq!(SessionData::new().provider(), None);
    }

    #[test]
    fn account_id_accepts_strings_and_numbers() {
        assert_eq!(
            data(json!({"account_id": "acc-1"})).account_id(),
            Some("acc-1".to_string())
        );
        assert_eq!(
            data(json!({"account_id": 42})).account_id(),
            Some("42".to_string())
        );
        assert_eq!(data(json!({"account_id": ""})).account_id(), None);
        assert_eq!(data(json!({"account_id": 0})).account_id(), None);
        assert_eq!(data(json!({"account_id": true})).account_id(), None);
        assert_eq!(data(json!({})).account_id(), None);
    }

    #[test]
    fn merge_overwrites_existing_keys() {
        let mut base = data(json!({"provider": "p", "token": "old", "keep": 1}));
        base.merge(data(json!({"token": "new", "extra": true})));

        assert_eq!(
            Value::from(base),
            json!({"provider": "p", "token": "new", "keep": 1, "extra": true})
        );
    }

    #[test]
    fn non_objects_are_rejected() {
        assert_eq!(SessionData::try_from(json!([1, 2])), Err(json!([1, 2])));
        assert_eq!(SessionData::try_from(Value::Null), Err(Value::Null));
    }

    #[test]
    fn serializes_transparently() {
        let mut session = SessionData::new();
        session.set_provider("demo");
        let text = serde_json::to_string(&session).unwrap();
        assert_eq!(text, r#"{"provider":"demo"}"#);

        let back: SessionData = serde_json::from_str(&text).unwrap();
        assert_eq!(back, session);
    }
}
