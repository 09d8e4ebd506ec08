// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Typed Hedera transactions.
//!
//! A [`Transaction`] is built unfrozen, frozen against a client (which
//! fixes the transaction id, node accounts and fee ceiling), then either
//! signed and executed or serialized for an external signer. Frozen
//! transactions reject further edits.

use serde::{Deserialize, Serialize};

use super::{
    amount::Hbar,
    client::{ClientError, LedgerClient},
    ids::{AccountId, PendingAirdropId, TokenId, TopicId, TransactionId},
    keys::{PrivateKey, PublicKey},
    types::DEFAULT_MAX_TRANSACTION_FEE,
};

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    #[error("Transaction failed: {0}")]
    Execution(#[source] ClientError),

    #[error("Transaction failed: receipt unavailable: {0}")]
    Receipt(#[source] ClientError),

    #[error("Transaction failed with status: {status}")]
    Status {
        status: String,
        transaction_id: TransactionId,
    },

    #[error("Transaction failed: receipt has no {0}")]
    MissingReceiptField(&'static str),

    #[error("Transaction is frozen and can no longer be modified")]
    Frozen,

    #[error("Failed to freeze transaction: {0}")]
    Freeze(String),

    #[error("Failed to serialize transaction: {0}")]
    Serialization(String),

    #[error("Failed to sign transaction: {0}")]
    Signing(String),
}

// =============================================================================
// Transaction bodies
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenType {
    #[default]
    FungibleCommon,
    NonFungibleUnique,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenSupplyType {
    Infinite,
    Finite,
}

/// A signed HBAR movement in tinybars; debits are negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HbarTransfer {
    pub account_id: AccountId,
    pub amount: i64,
}

/// A signed token movement in base units; debits are negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTransfer {
    pub token_id: TokenId,
    pub account_id: AccountId,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HbarAllowance {
    pub owner_account_id: AccountId,
    pub spender_account_id: AccountId,
    pub amount: Hbar,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAllowance {
    pub token_id: TokenId,
    pub owner_account_id: AccountId,
    pub spender_account_id: AccountId,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenCreateBody {
    pub name: String,
    pub symbol: String,
    pub token_type: TokenType,
    pub decimals: u32,
    pub initial_supply: u64,
    pub supply_type: TokenSupplyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_supply: Option<u64>,
    pub treasury_account_id: AccountId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_key: Option<PublicKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supply_key: Option<PublicKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_key: Option<PublicKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

/// The operation-specific part of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum TransactionBody {
    TopicCreate {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        memo: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        admin_key: Option<PublicKey>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        submit_key: Option<PublicKey>,
    },
    TopicDelete {
        topic_id: TopicId,
    },
    TopicMessageSubmit {
        topic_id: TopicId,
        message: String,
    },
    CryptoTransfer {
        #[serde(default)]
        hbar_transfers: Vec<HbarTransfer>,
        #[serde(default)]
        token_transfers: Vec<TokenTransfer>,
    },
    TokenCreate(TokenCreateBody),
    TokenMint {
        token_id: TokenId,
        #[serde(default)]
        amount: u64,
        #[serde(default)]
        metadata: Vec<String>,
    },
    TokenAssociate {
        account_id: AccountId,
        token_ids: Vec<TokenId>,
    },
    TokenDissociate {
        account_id: AccountId,
        token_ids: Vec<TokenId>,
    },
    TokenAirdrop {
        token_transfers: Vec<TokenTransfer>,
    },
    TokenClaimAirdrop {
        pending_airdrop_ids: Vec<PendingAirdropId>,
    },
    TokenReject {
        owner_id: AccountId,
        token_ids: Vec<TokenId>,
    },
    CryptoApproveAllowance {
        #[serde(default)]
        hbar_allowances: Vec<HbarAllowance>,
        #[serde(default)]
        token_allowances: Vec<TokenAllowance>,
    },
}

impl TransactionBody {
    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            TransactionBody::TopicCreate { .. } => "TopicCreate",
            TransactionBody::TopicDelete { .. } => "TopicDelete",
            TransactionBody::TopicMessageSubmit { .. } => "TopicMessageSubmit",
            TransactionBody::CryptoTransfer { .. } => "CryptoTransfer",
            TransactionBody::TokenCreate(_) => "TokenCreate",
            TransactionBody::TokenMint { .. } => "TokenMint",
            TransactionBody::TokenAssociate { .. } => "TokenAssociate",
            TransactionBody::TokenDissociate { .. } => "TokenDissociate",
            TransactionBody::TokenAirdrop { .. } => "TokenAirdrop",
            TransactionBody::TokenClaimAirdrop { .. } => "TokenClaimAirdrop",
            TransactionBody::TokenReject { .. } => "TokenReject",
            TransactionBody::CryptoApproveAllowance { .. } => "CryptoApproveAllowance",
        }
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A signature over the frozen body bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignaturePair {
    pub public_key: PublicKey,
    /// Hex-encoded 64-byte `r || s`.
    pub signature: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    transaction_id: Option<TransactionId>,
    #[serde(default)]
    node_account_ids: Vec<AccountId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_transaction_fee: Option<Hbar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    memo: Option<String>,
    body: TransactionBody,
    #[serde(default)]
    signatures: Vec<SignaturePair>,
    #[serde(skip)]
    frozen: bool,
}

/// The signed portion of a transaction.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BodyView<'a> {
    transaction_id: &'a TransactionId,
    node_account_ids: &'a [AccountId],
    max_transaction_fee: Hbar,
    #[serde(skip_serializing_if = "Option::is_none")]
    memo: Option<&'a str>,
    body: &'a TransactionBody,
}

impl Transaction {
    pub fn new(body: TransactionBody) -> Self {
        Self {
            transaction_id: None,
            node_account_ids: Vec::new(),
            max_transaction_fee: None,
            memo: None,
            body,
            signatures: Vec::new(),
            frozen: false,
        }
    }

    pub fn body(&self) -> &TransactionBody {
        &self.body
    }

    pub fn transaction_id(&self) -> Option<&TransactionId> {
        self.transaction_id.as_ref()
    }

    pub fn node_account_ids(&self) -> &[AccountId] {
        &self.node_account_ids
    }

    pub fn max_transaction_fee(&self) -> Option<Hbar> {
        self.max_transaction_fee
    }

    pub fn signatures(&self) -> &[SignaturePair] {
        &self.signatures
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn ensure_mutable(&self) -> Result<(), TransactionError> {
        if self.frozen {
            Err(TransactionError::Frozen)
        } else {
            Ok(())
        }
    }

    pub fn set_transaction_id(
        &mut self,
        transaction_id: TransactionId,
    ) -> Result<&mut Self, TransactionError> {
        self.ensure_mutable()?;
        self.transaction_id = Some(transaction_id);
        Ok(self)
    }

    pub fn set_node_account_ids(
        &mut self,
        node_account_ids: Vec<AccountId>,
    ) -> Result<&mut Self, TransactionError> {
        self.ensure_mutable()?;
        self.node_account_ids = node_account_ids;
        Ok(self)
    }

    pub fn set_max_transaction_fee(&mut self, fee: Hbar) -> Result<&mut Self, TransactionError> {
        self.ensure_mutable()?;
        self.max_transaction_fee = Some(fee);
        Ok(self)
    }

    pub fn set_transaction_memo(
        &mut self,
        memo: impl Into<String>,
    ) -> Result<&mut Self, TransactionError> {
        self.ensure_mutable()?;
        self.memo = Some(memo.into());
        Ok(self)
    }

    /// Fill in everything the network needs and lock the transaction.
    ///
    /// A missing transaction id falls back to one generated for the
    /// client's operator; missing node accounts come from the client.
    /// Freezing twice is a no-op.
    pub fn freeze_with(&mut self, client: &dyn LedgerClient) -> Result<(), TransactionError> {
        if self.frozen {
            return Ok(());
        }

        if self.transaction_id.is_none() {
            let operator = client.operator_account_id().ok_or_else(|| {
                TransactionError::Freeze(
                    "transaction id is not set and the client has no operator".to_string(),
                )
            })?;
            self.transaction_id = Some(TransactionId::generate(operator));
        }

        if self.node_account_ids.is_empty() {
            self.node_account_ids = client.node_account_ids();
        }
        if self.node_account_ids.is_empty() {
            return Err(TransactionError::Freeze(
                "no node accounts available".to_string(),
            ));
        }

        self.max_transaction_fee
            .get_or_insert(DEFAULT_MAX_TRANSACTION_FEE);
        self.frozen = true;

        tracing::debug!(
            kind = self.body.kind(),
            transaction_id = ?self.transaction_id.map(|id| id.to_string()),
            nodes = self.node_account_ids.len(),
            "Transaction frozen"
        );
        Ok(())
    }

    /// Canonical bytes covered by signatures.
    pub fn body_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        let transaction_id = self.transaction_id.as_ref().ok_or_else(|| {
            TransactionError::Serialization("transaction is not frozen".to_string())
        })?;

        serde_json::to_vec(&BodyView {
            transaction_id,
            node_account_ids: &self.node_account_ids,
            max_transaction_fee: self
                .max_transaction_fee
                .unwrap_or(DEFAULT_MAX_TRANSACTION_FEE),
            memo: self.memo.as_deref(),
            body: &self.body,
        })
        .map_err(|e| TransactionError::Serialization(e.to_string()))
    }

    /// Sign the frozen body with `key`. Signing twice with the same key
    /// replaces the earlier signature.
    pub fn sign(&mut self, key: &PrivateKey) -> Result<&mut Self, TransactionError> {
        if !self.frozen {
            return Err(TransactionError::Signing(
                "transaction must be frozen before signing".to_string(),
            ));
        }

        let body = self.body_bytes()?;
        let signature = key
            .sign(&body)
            .map_err(|e| TransactionError::Signing(e.to_string()))?;
        let public_key = key.public_key();

        self.signatures.retain(|pair| pair.public_key != public_key);
        self.signatures.push(SignaturePair {
            public_key,
            signature: hex::encode(signature),
        });
        Ok(self)
    }

    /// Serialize a frozen transaction, signatures included.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        if !self.frozen {
            return Err(TransactionError::Serialization(
                "transaction must be frozen before serialization".to_string(),
            ));
        }
        serde_json::to_vec(self).map_err(|e| TransactionError::Serialization(e.to_string()))
    }

    /// Parse bytes produced by [`Transaction::to_bytes`]; the result is frozen.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut transaction: Transaction = serde_json::from_slice(bytes)
            .map_err(|e| TransactionError::Serialization(e.to_string()))?;
        if transaction.transaction_id.is_none() {
            return Err(TransactionError::Serialization(
                "missing transaction id".to_string(),
            ));
        }
        transaction.frozen = true;
        Ok(transaction)
    }
}

// =============================================================================
// Responses and receipts
// =============================================================================

/// Acknowledgement that a node accepted the transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub transaction_id: TransactionId,
    pub node_id: AccountId,
}

/// Consensus outcome of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<TopicId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_id: Option<TokenId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub serials: Vec<i64>,
}

impl TransactionReceipt {
    pub fn with_status(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            topic_id: None,
            token_id: None,
            serials: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.contains("SUCCESS")
    }
}
