// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Operation Results
//!
//! Every kit operation returns a [`TransactionResult`]: either the receipt of
//! a transaction the operator signed and submitted (custodial), or the base64
//! bytes of a frozen transaction for the user's wallet to sign
//! (non-custodial).
//!
//! | Accessor | Custodial | Non-custodial |
//! |----------|-----------|---------------|
//! | `raw_response` | `{status, txHash, [topicId\|tokenId]}` | the base64 string |
//! | `stringified_response` | `{status, message, txHash, [topicId\|tokenId]}` | `{status: "success", txBytes, message}` |
//! | `name` | `<OPERATION>_CUSTODIAL` | `<OPERATION>_NON_CUSTODIAL` |

use std::fmt;

use serde_json::{json, Map, Value};

use crate::{
    ledger::{TokenId, TopicId},
    transactions::{CreatedToken, CreatedTopic, ExecutedTransaction, SubmittedMessage},
};

/// Ledger operation that produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateTopic,
    DeleteTopic,
    SubmitTopicMessage,
    TransferHbar,
    CreateToken,
    MintToken,
    MintNft,
    TransferToken,
    AssociateToken,
    DissociateToken,
    AirdropToken,
    ClaimAirdrop,
    RejectToken,
    AssetAllowance,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateTopic => "CREATE_TOPIC",
            Self::DeleteTopic => "DELETE_TOPIC",
            Self::SubmitTopicMessage => "SUBMIT_TOPIC_MESSAGE",
            Self::TransferHbar => "TRANSFER_HBAR",
            Self::CreateToken => "CREATE_TOKEN",
            Self::MintToken => "MINT_TOKEN",
            Self::MintNft => "MINT_NFT_TOKEN",
            Self::TransferToken => "TRANSFER_TOKEN",
            Self::AssociateToken => "ASSOCIATE_TOKEN",
            Self::DissociateToken => "DISSOCIATE_TOKEN",
            Self::AirdropToken => "AIRDROP_TOKEN",
            Self::ClaimAirdrop => "CLAIM_AIRDROP",
            Self::RejectToken => "REJECT_TOKEN",
            Self::AssetAllowance => "ASSET_ALLOWANCE",
        }
    }

    fn custodial_message(&self) -> &'static str {
        match self {
            Self::CreateTopic => "Topic created",
            Self::DeleteTopic => "Topic deleted",
            Self::SubmitTopicMessage => "Message submitted",
            Self::TransferHbar => "HBAR transferred",
            Self::CreateToken => "Token created",
            Self::MintToken => "Token minted",
            Self::MintNft => "NFT minted",
            Self::TransferToken => "Token transferred",
            Self::AssociateToken => "Token associated",
            Self::DissociateToken => "Token dissociated",
            Self::AirdropToken => "Token airdropped",
            Self::ClaimAirdrop => "Airdrop claimed",
            Self::RejectToken => "Token rejected",
            Self::AssetAllowance => "Asset allowance created",
        }
    }

    fn non_custodial_message(&self) -> &'static str {
        match self {
            Self::CreateTopic => "Topic creation transaction bytes have been successfully created.",
            Self::DeleteTopic => "Topic deletion transaction bytes have been successfully created.",
            Self::SubmitTopicMessage => {
                "Submit message to the topic transaction bytes have been successfully created."
            }
            Self::TransferHbar => "HBAR transfer transaction bytes have been successfully created.",
            Self::CreateToken => "Create token transaction bytes have been successfully created.",
            Self::MintToken => "Token mint transaction bytes have been successfully created.",
            Self::MintNft => "NFT mint transaction bytes have been successfully created.",
            Self::TransferToken => {
                "Token transfer transaction bytes have been successfully created."
            }
            Self::AssociateToken => {
                "Token association transaction bytes have been successfully created."
            }
            Self::DissociateToken => {
                "Token dissociation transaction bytes have been successfully created."
            }
            Self::AirdropToken => "Token airdrop transaction bytes have been successfully created.",
            Self::ClaimAirdrop => "Claim airdrop transaction bytes have been successfully created.",
            Self::RejectToken => "Token reject transaction bytes have been successfully created.",
            Self::AssetAllowance => {
                "Asset allowance transaction bytes have been successfully created."
            }
        }
    }

    /// HBAR transfers and allowances report the receipt status verbatim.
    fn lowercases_status(&self) -> bool {
        !matches!(self, Self::TransferHbar | Self::AssetAllowance)
    }
}

/// Routing tag of a result, e.g. `CREATE_TOPIC_CUSTODIAL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionName {
    pub operation: Operation,
    pub custodial: bool,
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.custodial {
            "CUSTODIAL"
        } else {
            "NON_CUSTODIAL"
        };
        write!(f, "{}_{}", self.operation.as_str(), mode)
    }
}

/// Entity a custodial transaction created or targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Topic(TopicId),
    Token(TokenId),
}

/// Status, hash and optional entity of an executed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustodialReceipt {
    pub status: String,
    pub tx_hash: String,
    pub entity: Option<Entity>,
}

impl From<ExecutedTransaction> for CustodialReceipt {
    fn from(output: ExecutedTransaction) -> Self {
        Self {
            status: output.status,
            tx_hash: output.tx_hash,
            entity: None,
        }
    }
}

impl From<CreatedTopic> for CustodialReceipt {
    fn from(output: CreatedTopic) -> Self {
        Self {
            status: output.status,
            tx_hash: output.tx_hash,
            entity: Some(Entity::Topic(output.topic_id)),
        }
    }
}

impl From<SubmittedMessage> for CustodialReceipt {
    fn from(output: SubmittedMessage) -> Self {
        Self {
            status: output.status,
            tx_hash: output.tx_hash,
            entity: Some(Entity::Topic(output.topic_id)),
        }
    }
}

impl From<CreatedToken> for CustodialReceipt {
    fn from(output: CreatedToken) -> Self {
        Self {
            status: output.status,
            tx_hash: output.tx_hash,
            entity: Some(Entity::Token(output.token_id)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionResult {
    Custodial {
        operation: Operation,
        receipt: CustodialReceipt,
    },
    NonCustodial {
        operation: Operation,
        tx_bytes: String,
    },
}

impl TransactionResult {
    pub fn custodial(operation: Operation, receipt: impl Into<CustodialReceipt>) -> Self {
        Self::Custodial {
            operation,
            receipt: receipt.into(),
        }
    }

    pub fn non_custodial(operation: Operation, tx_bytes: String) -> Self {
        Self::NonCustodial {
            operation,
            tx_bytes,
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            Self::Custodial { operation, .. } | Self::NonCustodial { operation, .. } => *operation,
        }
    }

    pub fn is_custodial(&self) -> bool {
        matches!(self, Self::Custodial { .. })
    }

    pub fn name(&self) -> ActionName {
        ActionName {
            operation: self.operation(),
            custodial: self.is_custodial(),
        }
    }

    pub fn raw_response(&self) -> Value {
        match self {
            Self::Custodial { operation, receipt } => {
                Value::Object(custodial_fields(*operation, receipt, false))
            }
            Self::NonCustodial { tx_bytes, .. } => Value::String(tx_bytes.clone()),
        }
    }

    /// JSON handed back to the LLM.
    pub fn stringified_response(&self) -> String {
        match self {
            Self::Custodial { operation, receipt } => {
                Value::Object(custodial_fields(*operation, receipt, true)).to_string()
            }
            Self::NonCustodial {
                operation,
                tx_bytes,
            } => json!({
                "status": "success",
                "txBytes": tx_bytes,
                "message": operation.non_custodial_message(),
            })
            .to_string(),
        }
    }
}

fn custodial_fields(
    operation: Operation,
    receipt: &CustodialReceipt,
    with_message: bool,
) -> Map<String, Value> {
    let status = if operation.lowercases_status() {
        receipt.status.to_lowercase()
    } else {
        receipt.status.clone()
    };

    let mut fields = Map::new();
    fields.insert("status".into(), Value::String(status));
    if with_message {
        fields.insert(
            "message".into(),
            Value::String(operation.custodial_message().to_string()),
        );
    }
    fields.insert("txHash".into(), Value::String(receipt.tx_hash.clone()));
    match receipt.entity {
        Some(Entity::Topic(topic_id)) => {
            fields.insert("topicId".into(), Value::String(topic_id.to_string()));
        }
        Some(Entity::Token(token_id)) => {
            fields.insert("tokenId".into(), Value::String(token_id.to_string()));
        }
        None => {}
    }
    fields
}
