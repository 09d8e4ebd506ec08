// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory ledger client for unit tests.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;

use crate::{
    kit::AgentKit,
    ledger::{
        AccountId, ClientError, LedgerClient, MirrorNodeClient, Network, Operator, PrivateKey,
        PublicKey, Transaction, TransactionReceipt, TransactionResponse,
    },
};

/// Operator account of [`StubLedgerClient::new`].
pub const OPERATOR: AccountId = AccountId::new(0, 0, 1001);

/// Account the kit builds non-custodial transactions for.
pub const USER: AccountId = AccountId::new(0, 0, 5005);

pub fn test_key() -> PrivateKey {
    PrivateKey::from_str_ecdsa("0101010101010101010101010101010101010101010101010101010101010101")
        .unwrap()
}

/// Kit over `client` whose mirror node lives at `mirror_url`.
pub fn stub_kit(
    client: StubLedgerClient,
    mirror_url: &str,
) -> (Arc<AgentKit>, Arc<StubLedgerClient>) {
    let client = Arc::new(client);
    let mirror = MirrorNodeClient::new(mirror_url, Duration::from_secs(5)).unwrap();
    let kit = AgentKit::new(client.clone(), mirror, USER, test_key().public_key());
    (Arc::new(kit), client)
}

/// Signs like a real client and answers every receipt request with a
/// preconfigured receipt.
pub struct StubLedgerClient {
    operator: Option<Operator>,
    receipt: TransactionReceipt,
    fail_execute: bool,
    executed: Mutex<Vec<Transaction>>,
}

impl StubLedgerClient {
    pub fn new() -> Self {
        Self {
            operator: Some(Operator {
                account_id: OPERATOR,
                private_key: test_key(),
            }),
            receipt: TransactionReceipt::with_status("SUCCESS"),
            fail_execute: false,
            executed: Mutex::new(Vec::new()),
        }
    }

    pub fn without_operator() -> Self {
        Self {
            operator: None,
            ..Self::new()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_execute: true,
            ..Self::new()
        }
    }

    pub fn with_receipt(mut self, receipt: TransactionReceipt) -> Self {
        self.receipt = receipt;
        self
    }

    /// Transactions submitted so far, frozen and signed.
    pub fn executed(&self) -> Vec<Transaction> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl LedgerClient for StubLedgerClient {
    fn network(&self) -> Network {
        Network::Testnet
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
        if self.fail_execute {
            return Err(ClientError::Request("connection refused".to_string()));
        }
        let operator = self.operator.as_ref().ok_or(ClientError::MissingOperator)?;

        transaction
            .freeze_with(self)
            .map_err(|e| ClientError::Prepare(e.to_string()))?;
        transaction
            .sign(&operator.private_key)
            .map_err(|e| ClientError::Prepare(e.to_string()))?;

        let response = TransactionResponse {
            transaction_id: *transaction
                .transaction_id()
                .ok_or_else(|| ClientError::Prepare("missing transaction id".to_string()))?,
            node_id: transaction.node_account_ids()[0],
        };
        self.executed.lock().unwrap().push(transaction);
        Ok(response)
    }

    async fn get_receipt(
        &self,
        _response: &TransactionResponse,
    ) -> Result<TransactionReceipt, ClientError> {
        Ok(self.receipt.clone())
    }
}
