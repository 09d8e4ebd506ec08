// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Hedera ledger integration.
//!
//! This module provides:
//! - Entity, transaction and airdrop identifiers
//! - HBAR and token unit conversion
//! - ECDSA operator keys
//! - The typed transaction model and the network client seam
//! - Mirror node queries

pub mod amount;
pub mod client;
pub mod ids;
pub mod keys;
pub mod mirror;
pub mod transaction;
pub mod types;

pub use amount::{from_base_units, to_base_units, to_signed, AmountError, Hbar, HBAR_DECIMALS};
pub use client::{ClientError, LedgerClient, Operator, RelayClient};
pub use ids::{AccountId, IdError, PendingAirdropId, TokenId, TopicId, TransactionId};
pub use keys::{KeyError, PrivateKey, PublicKey};
pub use mirror::{
    to_mirror_timestamp, MirrorNodeClient, MirrorNodeError, PendingAirdrop, TokenBalanceEntry,
    TokenDetails, TokenHolder, TopicMessage,
};
pub use transaction::{
    HbarAllowance, HbarTransfer, TokenAllowance, TokenCreateBody, TokenSupplyType,
    TokenTransfer, TokenType, Transaction, TransactionBody, TransactionError, TransactionReceipt,
    TransactionResponse,
};
pub use types::*;
