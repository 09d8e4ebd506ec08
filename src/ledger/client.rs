// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Network client for submitting transactions.
//!
//! [`LedgerClient`] is the seam between transaction building and the
//! network. [`RelayClient`] implements it over HTTP: it freezes and signs
//! with the operator key, then hands the serialized transaction to a relay
//! that forwards it to the consensus nodes and reports receipts.

use std::time::Duration;

use async_trait::async_trait;
use base64ct::{Base64, Encoding};
use serde::{Deserialize, Serialize};
use url::Url;

use super::{
    ids::AccountId,
    keys::{PrivateKey, PublicKey},
    transaction::{Transaction, TransactionReceipt, TransactionResponse},
    types::Network,
};

/// Default HTTP timeout for relay requests.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid relay URL: {0}")]
    InvalidRelayUrl(String),

    #[error("Client has no operator; cannot sign")]
    MissingOperator,

    #[error("Failed to prepare transaction: {0}")]
    Prepare(String),

    #[error("Relay request failed: {0}")]
    Request(String),

    #[error("Relay returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid relay response: {0}")]
    InvalidResponse(String),
}

/// Submits transactions and fetches receipts.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    fn network(&self) -> Network;

    /// Consensus node accounts a transaction may be submitted to.
    fn node_account_ids(&self) -> Vec<AccountId> {
        self.network().node_account_ids()
    }

    /// The account paying for and signing custodial transactions.
    fn operator_account_id(&self) -> Option<AccountId>;

    fn operator_public_key(&self) -> Option<PublicKey>;

    /// Freeze (if needed), sign with the operator and submit.
    async fn execute(&self, transaction: Transaction) -> Result<TransactionResponse, ClientError>;

    async fn get_receipt(
        &self,
        response: &TransactionResponse,
    ) -> Result<TransactionReceipt, ClientError>;
}

/// Account and key that pay for custodial transactions.
#[derive(Debug, Clone)]
pub struct Operator {
    pub account_id: AccountId,
    pub private_key: PrivateKey,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitRequest {
    transaction_bytes: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitResponse {
    transaction_id: String,
    node_id: String,
}

/// HTTP relay client.
pub struct RelayClient {
    network: Network,
    relay_url: Url,
    operator: Option<Operator>,
    http: reqwest::Client,
}

impl RelayClient {
    pub fn new(
        network: Network,
        relay_url: &str,
        operator: Option<Operator>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let relay_url = Url::parse(relay_url)
            .map_err(|e| ClientError::InvalidRelayUrl(format!("{relay_url}: {e}")))?;
        if relay_url.cannot_be_a_base() {
            return Err(ClientError::InvalidRelayUrl(relay_url.to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Request(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            network,
            relay_url,
            operator,
            http,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.relay_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidRelayUrl(self.relay_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl LedgerClient for RelayClient {
    fn network(&self) -> Network {
        self.network
    }

    fn operator_account_id(&self) -> Option<AccountId> {
        self.operator.as_ref().map(|op| op.account_id)
    }

    fn operator_public_key(&self) -> Option<PublicKey> {
        self.operator.as_ref().map(|op| op.private_key.public_key())
    }

    async fn execute(
        &self,
        mut transaction: Transaction,
    ) -> Result<TransactionResponse, ClientError> {
        let operator = self.operator.as_ref().ok_or(ClientError::MissingOperator)?;

        transaction
            .freeze_with(self)
            .map_err(|e| ClientError::Prepare(e.to_string()))?;
        transaction
            .sign(&operator.private_key)
            .map_err(|e| ClientError::Prepare(e.to_string()))?;
        let bytes = transaction
            .to_bytes()
            .map_err(|e| ClientError::Prepare(e.to_string()))?;

        let url = self.endpoint(&["api", "v1", "transactions"])?;
        tracing::debug!(
            url = %url,
            kind = transaction.body().kind(),
            bytes = bytes.len(),
            "Submitting transaction to relay"
        );

        let response = self
            .http
            .post(url)
            .json(&SubmitRequest {
                transaction_bytes: Base64::encode_string(&bytes),
            })
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        let submitted: SubmitResponse = Self::read_json(response).await?;
        let transaction_id = submitted
            .transaction_id
            .parse()
            .map_err(|e| ClientError::InvalidResponse(format!("transactionId: {e}")))?;
        let node_id = submitted
            .node_id
            .parse()
            .map_err(|e| ClientError::InvalidResponse(format!("nodeId: {e}")))?;

        Ok(TransactionResponse {
            transaction_id,
            node_id,
        })
    }

    async fn get_receipt(
        &self,
        response: &TransactionResponse,
    ) -> Result<TransactionReceipt, ClientError> {
        let transaction_id = response.transaction_id.to_string();
        let url = self.endpoint(&["api", "v1", "transactions", &transaction_id, "receipt"])?;

        let reply = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        Self::read_json(reply).await
    }
}
