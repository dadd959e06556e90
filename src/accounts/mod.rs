// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Accounts: the backing store and the loader that exposes the account of
//! the authenticated session.

pub mod loader;
pub mod store;

pub use loader::AccountLoader;
pub use store::{AccountStore, InMemoryAccountStore, StoreError};
