// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! The runner builds one [`AppConfig`] from the environment at startup and
//! hands it to the components that need it. Nothing reads the environment
//! after that.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HEDERA_NETWORK` | `mainnet`, `testnet` or `previewnet` | `testnet` |
//! | `HEDERA_ACCOUNT_ID` | Account acting for the agent (`0.0.x`) | Required |
//! | `HEDERA_PRIVATE_KEY` | Operator ECDSA key (hex, DER hex or PEM) | Optional |
//! | `HEDERA_PRIVATE_KEY_PATH` | PEM file holding the operator key | Optional |
//! | `HEDERA_PUBLIC_KEY` | Public key for non-custodial transactions | Derived from the private key |
//! | `HEDERA_CUSTODIAL` | Default signing mode (`true`/`false`) | `false` |
//! | `HEDERA_RELAY_URL` | Relay that submits transactions and serves receipts | Required |
//! | `MIRROR_NODE_URL` | Mirror node REST base URL | Network default |
//! | `HTTP_TIMEOUT_SECS` | Request timeout for relay and mirror node | `15` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,franky_agent_kit=debug` |

use std::{fmt, str::FromStr, time::Duration};

use crate::ledger::{AccountId, KeyError, Network, PrivateKey, PublicKey};

pub const HEDERA_NETWORK_ENV: &str = "HEDERA_NETWORK";
pub const HEDERA_ACCOUNT_ID_ENV: &str = "HEDERA_ACCOUNT_ID";
pub const HEDERA_PRIVATE_KEY_ENV: &str = "HEDERA_PRIVATE_KEY";
/// Read only when `HEDERA_PRIVATE_KEY` is unset.
pub const HEDERA_PRIVATE_KEY_PATH_ENV: &str = "HEDERA_PRIVATE_KEY_PATH";
pub const HEDERA_PUBLIC_KEY_ENV: &str = "HEDERA_PUBLIC_KEY";
pub const HEDERA_CUSTODIAL_ENV: &str = "HEDERA_CUSTODIAL";
pub const HEDERA_RELAY_URL_ENV: &str = "HEDERA_RELAY_URL";
pub const MIRROR_NODE_URL_ENV: &str = "MIRROR_NODE_URL";
pub const HTTP_TIMEOUT_SECS_ENV: &str = "HTTP_TIMEOUT_SECS";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_NETWORK: Network = Network::Testnet;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;
/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,franky_agent_kit=debug";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("Failed to load operator key: {0}")]
    Key(#[from] KeyError),

    #[error("No public key: set {HEDERA_PUBLIC_KEY_ENV} or provide a private key")]
    MissingPublicKey,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => Err(format!("expected `json` or `pretty`, got `{other}`")),
        }
    }
}

impl LogFormat {
    /// Read only `LOG_FORMAT`, so logging can start before the rest of the
    /// configuration is validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        match lookup(LOG_FORMAT_ENV).map(|v| v.trim().to_string()) {
            Some(raw) if !raw.is_empty() => parse(LOG_FORMAT_ENV, &raw),
            _ => Ok(Self::default()),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
        })
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub network: Network,
    pub account_id: AccountId,
    pub private_key: Option<PrivateKey>,
    pub public_key: PublicKey,
    /// Default signing mode; tools may override it per call.
    pub custodial: bool,
    pub relay_url: String,
    pub mirror_node_url: Option<String>,
    pub http_timeout: Duration,
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from `lookup`, which maps a variable name to
    /// its value. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let network = match get(HEDERA_NETWORK_ENV) {
            Some(raw) => parse(HEDERA_NETWORK_ENV, &raw)?,
            None => DEFAULT_NETWORK,
        };
        let account_id = parse(HEDERA_ACCOUNT_ID_ENV, &required(HEDERA_ACCOUNT_ID_ENV)?)?;

        let private_key = match get(HEDERA_PRIVATE_KEY_ENV) {
            Some(raw) if raw.starts_with("-----BEGIN") => {
                Some(PrivateKey::from_pem(raw.replace("\\n", "\n").as_bytes())?)
            }
            Some(raw) => Some(PrivateKey::from_str_ecdsa(&raw)?),
            None => match get(HEDERA_PRIVATE_KEY_PATH_ENV) {
                Some(path) => Some(PrivateKey::from_pem_file(path)?),
                None => None,
            },
        };

        let public_key = match get(HEDERA_PUBLIC_KEY_ENV) {
            Some(raw) => parse(HEDERA_PUBLIC_KEY_ENV, &raw)?,
            None => private_key
                .as_ref()
                .map(PrivateKey::public_key)
                .ok_or(ConfigError::MissingPublicKey)?,
        };

        let custodial = match get(HEDERA_CUSTODIAL_ENV) {
            Some(raw) => parse(HEDERA_CUSTODIAL_ENV, &raw)?,
            None => false,
        };

        let http_timeout = match get(HTTP_TIMEOUT_SECS_ENV) {
            Some(raw) => Duration::from_secs(parse(HTTP_TIMEOUT_SECS_ENV, &raw)?),
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        let log_format = LogFormat::from_lookup(&lookup)?;

        Ok(Self {
            network,
            account_id,
            private_key,
            public_key,
            custodial,
            relay_url: required(HEDERA_RELAY_URL_ENV)?,
            mirror_node_url: get(MIRROR_NODE_URL_ENV),
            http_timeout,
            log_format,
        })
    }
}

fn parse<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        reason: e.to_string(),
    })
}
