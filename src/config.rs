// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Environment variable names, defaults and the parsed [`Config`]. Everything
//! is read once at startup; a bad value stops the process before it binds.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `SESSION_PROVIDERS` | Comma-separated HTTP provider names | empty |
//! | `PROVIDER_<NAME>_URL` | Base URL of each HTTP provider | Required per name |
//! | `DEMO_PROVIDER` | Register the built-in `demo` provider | `true` |
//! | `SESSION_FILE` | File that persists session data | In-memory |
//! | `SEED_ACCOUNT_NAME` | Create one account at startup | None |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::path::PathBuf;

use url::Url;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const SESSION_PROVIDERS_ENV: &str = "SESSION_PROVIDERS";
pub const DEMO_PROVIDER_ENV: &str = "DEMO_PROVIDER";
pub const SESSION_FILE_ENV: &str = "SESSION_FILE";
pub const SEED_ACCOUNT_NAME_ENV: &str = "SEED_ACCOUNT_NAME";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Startup configuration failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("authenticator has no provider client; inject one before building it")]
    MissingProviderClient,

    #[error("no session providers configured: set SESSION_PROVIDERS or enable DEMO_PROVIDER")]
    NoProviders,

    #[error("provider '{name}' needs {var}")]
    MissingProviderUrl { name: String, var: String },

    #[error("provider '{name}' has an invalid URL: {reason}")]
    InvalidProviderUrl { name: String, reason: String },

    #[error("{var} has an invalid value '{value}'")]
    InvalidValue { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpProviderConfig {
    pub name: String,
    pub base_url: Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub http_providers: Vec<HttpProviderConfig>,
    pub demo_provider: bool,
    pub session_file: Option<PathBuf>,
    pub seed_account_name: Option<String>,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Parse configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get(PORT_ENV) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                var: PORT_ENV,
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let demo_provider = match get(DEMO_PROVIDER_ENV) {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidValue {
                var: DEMO_PROVIDER_ENV,
                value: raw,
            })?,
            None => true,
        };

        let log_format = match get(LOG_FORMAT_ENV).as_deref().map(str::to_ascii_lowercase) {
            None => LogFormat::Pretty,
            Some(raw) if raw == "pretty" => LogFormat::Pretty,
            Some(raw) if raw == "json" => LogFormat::Json,
            Some(raw) => {
                return Err(ConfigError::InvalidValue {
                    var: LOG_FORMAT_ENV,
                    value: raw,
                })
            }
        };

        let mut http_providers = Vec::new();
        for name in get(SESSION_PROVIDERS_ENV)
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
        {
            let var = provider_url_env(name);
            let raw = get(var.as_str()).ok_or_else(|| ConfigError::MissingProviderUrl {
                name: name.to_string(),
                var: var.clone(),
            })?;
            let base_url = Url::parse(&raw).map_err(|e| ConfigError::InvalidProviderUrl {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
            if base_url.query().is_some() || base_url.fragment().is_some() {
                return Err(ConfigError::InvalidProviderUrl {
                    name: name.to_string(),
                    reason: "base URL must not carry a query or fragment".to_string(),
                });
            }
            http_providers.push(HttpProviderConfig {
                name: name.to_string(),
                base_url,
            });
        }

        if http_providers.is_empty() && !demo_provider {
            return Err(ConfigError::NoProviders);
        }

        Ok(Self {
            host,
            port,
            http_providers,
            demo_provider,
            session_file: get(SESSION_FILE_ENV).map(PathBuf::from),
            seed_account_name: get(SEED_ACCOUNT_NAME_ENV),
            log_format,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            http_providers: Vec::new(),
            demo_provider: true,
            session_file: None,
            seed_account_name: None,
            log_format: LogFormat::Pretty,
        }
    }
}

/// `PROVIDER_<NAME>_URL`, with the name upper-cased and `-` mapped to `_`.
pub fn provider_url_env(name: &str) -> String {
    format!("PROVIDER_{}_URL", name.to_ascii_uppercase().replace('-', "_"))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
