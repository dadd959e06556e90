// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session data, its persistence and the host session manager.

pub mod data;
pub mod manager;
pub mod store;

pub use data::{ProviderOptions, SessionData, ACCOUNT_ID_KEY, PROVIDER_KEY};
pub use manager::{SessionError, SessionManager, SessionSource};
pub use store::{
    EphemeralSessionStore, FileSessionStore, SessionStore, SessionStoreError, SessionStoreResult,
};
