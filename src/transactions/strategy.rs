// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The per-operation strategy seam.

use serde::Serialize;

use crate::ledger::{
    TokenId, TopicId, Transaction, TransactionError, TransactionReceipt, TransactionResponse,
};

/// Builds one kind of transaction and interprets its receipt.
///
/// Implementations carry only their own parameters and are consumed by a
/// [`TransactionBuilder`](super::TransactionBuilder) for a single cycle.
pub trait TransactionStrategy: Send + Sync {
    type Output: Send;

    /// Label used in logs.
    fn name(&self) -> &'static str;

    fn build(&self) -> Transaction;

    /// Map a successful execution to the strategy's output.
    fn format_result(
        &self,
        response: &TransactionResponse,
        receipt: &TransactionReceipt,
    ) -> Result<Self::Output, TransactionError>;
}

/// Status and hash of an executed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutedTransaction {
    pub status: String,
    pub tx_hash: String,
}

impl ExecutedTransaction {
    pub fn new(response: &TransactionResponse, receipt: &TransactionReceipt) -> Self {
        Self {
            status: receipt.status.clone(),
            tx_hash: response.transaction_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedTopic {
    pub status: String,
    pub tx_hash: String,
    pub topic_id: TopicId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedToken {
    pub status: String,
    pub tx_hash: String,
    pub token_id: TokenId,
}

/// Outcome of a topic message submission; echoes the topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedMessage {
    pub status: String,
    pub tx_hash: String,
    pub topic_id: TopicId,
}
