// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session Auth - Pluggable Authenticators & Session Lifecycle
//!
//! Tracks whether a user is authenticated, restores that state across
//! restarts and delegates credential exchange to pluggable external
//! providers. Once a session is authenticated the account it belongs to is
//! loaded from a backing store.
//!
//! ## Modules
//!
//! - `session` - Session data, persistence and the host session manager
//! - `auth` - The authenticator strategy and its external-provider variant
//! - `providers` - Provider registry, HTTP-backed and demo providers
//! - `accounts` - Account store and current-account loader
//! - `api` - Demo HTTP API handlers (Axum)

pub mod accounts;
pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod providers;
pub mod session;
pub mod state;
pub mod telemetry;
