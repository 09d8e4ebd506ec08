// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Hedera network types and constants.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{amount::Hbar, ids::AccountId};

/// Hedera network configuration.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Network name for display
    pub name: &'static str,
    /// Network identifier
    pub network: Network,
    /// Public mirror node REST endpoint
    pub mirror_node_url: &'static str,
    /// Explorer URL
    pub explorer_url: &'static str,
}

/// Hedera Mainnet configuration.
pub const HEDERA_MAINNET: NetworkConfig = NetworkConfig {
    name: "Hedera Mainnet",
    network: Network::Mainnet,
    mirror_node_url: "https://mainnet-public.mirrornode.hedera.com",
    explorer_url: "https://hashscan.io/mainnet",
};

/// Hedera Testnet configuration.
pub const HEDERA_TESTNET: NetworkConfig = NetworkConfig {
    name: "Hedera Testnet",
    network: Network::Testnet,
    mirror_node_url: "https://testnet.mirrornode.hedera.com",
    explorer_url: "https://hashscan.io/testnet",
};

/// Hedera Previewnet configuration.
pub const HEDERA_PREVIEWNET: NetworkConfig = NetworkConfig {
    name: "Hedera Previewnet",
    network: Network::Previewnet,
    mirror_node_url: "https://previewnet.mirrornode.hedera.com",
    explorer_url: "https://hashscan.io/previewnet",
};

/// Consensus node accounts used for submission (0.0.3 .. 0.0.9).
pub const DEFAULT_NODE_ACCOUNT_NUMS: std::ops::RangeInclusive<u64> = 3..=9;

/// Fee ceiling applied when a transaction does not set its own (2 HBAR).
pub const DEFAULT_MAX_TRANSACTION_FEE: Hbar = Hbar::from_tinybars(200_000_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Previewnet,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Previewnet => "previewnet",
        }
    }

    pub fn config(&self) -> &'static NetworkConfig {
        match self {
            Network::Mainnet => &HEDERA_MAINNET,
            Network::Testnet => &HEDERA_TESTNET,
            Network::Previewnet => &HEDERA_PREVIEWNET,
        }
    }

    /// Default consensus node accounts for this network.
    pub fn node_account_ids(&self) -> Vec<AccountId> {
        DEFAULT_NODE_ACCOUNT_NUMS
            .map(|num| AccountId::new(0, 0, num))
            .collect()
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            "previewnet" => Ok(Network::Previewnet),
            other => Err(format!(
                "Unsupported network `{other}` (expected mainnet, testnet or previewnet)"
            )),
        }
    }
}
