// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Hedera entity and transaction identifiers.
//!
//! Entities (accounts, tokens, topics) share the `shard.realm.num` form.
//! Transaction ids are `account@seconds.nanos`, where the timestamp is the
//! valid-start time chosen by the payer.

use std::{fmt, str::FromStr};

use chrono::Utc;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Errors produced while parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("Invalid {kind} id `{value}`: expected shard.realm.num")]
    InvalidEntityId { kind: &'static str, value: String },

    #[error("Invalid transaction id `{0}`: expected account@seconds.nanos")]
    InvalidTransactionId(String),
}

/// The `shard.realm.num` triple shared by every Hedera entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId {
    pub shard: u64,
    pub realm: u64,
    pub num: u64,
}

impl EntityId {
    pub const fn new(shard: u64, realm: u64, num: u64) -> Self {
        Self { shard, realm, num }
    }

    fn parse(value: &str, kind: &'static str) -> Result<Self, IdError> {
        let invalid = || IdError::InvalidEntityId {
            kind,
            value: value.to_string(),
        };

        let mut parts = value.trim().split('.');
        let mut next = || -> Result<u64, IdError> {
            parts
                .next()
                .filter(|p| !p.is_empty())
                .ok_or_else(invalid)?
                .parse::<u64>()
                .map_err(|_| invalid())
        };

        let id = Self::new(next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(id)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.shard, self.realm, self.num)
    }
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(EntityId);

        impl $name {
            pub const fn new(shard: u64, realm: u64, num: u64) -> Self {
                Self(EntityId::new(shard, realm, num))
            }

            pub fn entity(&self) -> EntityId {
                self.0
            }

            pub fn num(&self) -> u64 {
                self.0.num
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                EntityId::parse(s, $kind).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(de::Error::custom)
            }
        }
    };
}

entity_id!(
    /// A Hedera account (`0.0.1234`).
    AccountId,
    "account"
);
entity_id!(
    /// A Hedera Token Service token.
    TokenId,
    "token"
);
entity_id!(
    /// A Hedera Consensus Service topic.
    TopicId,
    "topic"
);

/// Transaction identifier: payer account plus valid-start timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionId {
    pub account_id: AccountId,
    pub valid_start_seconds: i64,
    pub valid_start_nanos: u32,
}

impl TransactionId {
    /// Generate a fresh id for `account_id` starting now.
    pub fn generate(account_id: AccountId) -> Self {
        let now = Utc::now();
        Self {
            account_id,
            valid_start_seconds: now.timestamp(),
            valid_start_nanos: now.timestamp_subsec_nanos(),
        }
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}.{:09}",
            self.account_id, self.valid_start_seconds, self.valid_start_nanos
        )
    }
}

impl FromStr for TransactionId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || IdError::InvalidTransactionId(s.to_string());

        let (account, timestamp) = s.trim().split_once('@').ok_or_else(invalid)?;
        let (seconds, nanos) = timestamp.split_once('.').ok_or_else(invalid)?;
        if nanos.is_empty() || nanos.len() > 9 {
            return Err(invalid());
        }

        let account_id = account.parse::<AccountId>().map_err(|_| invalid())?;
        let valid_start_seconds = seconds.parse::<i64>().map_err(|_| invalid())?;
        // "5.1" means 100_000_000 nanos, so right-pad before parsing
        let valid_start_nanos = format!("{nanos:0<9}")
            .parse::<u32>()
            .map_err(|_| invalid())?;

        Ok(Self {
            account_id,
            valid_start_seconds,
            valid_start_nanos,
        })
    }
}

impl Serialize for TransactionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TransactionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Identifies one pending airdrop: who sent which token to whom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingAirdropId {
    pub sender_id: AccountId,
    pub receiver_id: AccountId,
    pub token_id: TokenId,
}
