// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Drives a strategy through one of two terminal paths.
//!
//! - **Custodial**: [`TransactionBuilder::sign_and_execute`] submits through
//!   the client, which signs with the operator key, and waits for the receipt.
//! - **Non-custodial**: [`TransactionBuilder::tx_bytes_string`] freezes the
//!   transaction and returns it base64-encoded for an external signer.
//!
//! Both consume the builder.

use std::time::Instant;

use base64ct::{Base64, Encoding};

use super::strategy::TransactionStrategy;
use crate::ledger::{AccountId, LedgerClient, TransactionError, TransactionId};

pub struct TransactionBuilder<S> {
    strategy: S,
}

impl<S: TransactionStrategy> TransactionBuilder<S> {
    pub fn new(strategy: S) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Build, execute, fetch the receipt and format the result.
    ///
    /// Fails with [`TransactionError::Status`] unless the receipt status
    /// contains `SUCCESS`. There is exactly one attempt.
    pub async fn sign_and_execute(
        self,
        client: &dyn LedgerClient,
    ) -> Result<S::Output, TransactionError> {
        let strategy = self.strategy.name();
        let started = Instant::now();

        tracing::debug!(strategy, "Building transaction");
        let transaction = self.strategy.build();

        tracing::debug!(strategy, kind = transaction.body().kind(), "Executing transaction");
        let response = client.execute(transaction).await.map_err(|e| {
            tracing::error!(strategy, error = %e, "Transaction execution failed");
            TransactionError::Execution(e)
        })?;

        tracing::info!(
            strategy,
            transaction_id = %response.transaction_id,
            node = %response.node_id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Transaction executed"
        );

        let receipt = client.get_receipt(&response).await.map_err(|e| {
            tracing::error!(
                strategy,
                transaction_id = %response.transaction_id,
                error = %e,
                "Failed to fetch receipt"
            );
            TransactionError::Receipt(e)
        })?;

        tracing::info!(
            strategy,
            transaction_id = %response.transaction_id,
            status = %receipt.status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Receipt received"
        );

        if !receipt.is_success() {
            tracing::error!(
                strategy,
                transaction_id = %response.transaction_id,
                status = %receipt.status,
                "Transaction not successful"
            );
            return Err(TransactionError::Status {
                status: receipt.status,
                transaction_id: response.transaction_id,
            });
        }

        self.strategy.format_result(&response, &receipt)
    }

    /// Freeze the transaction and return it base64-encoded.
    ///
    /// With `from_account` the transaction id is generated for that account,
    /// making it the payer; otherwise the client's operator pays.
    pub fn tx_bytes_string(
        self,
        client: &dyn LedgerClient,
        from_account: Option<&AccountId>,
    ) -> Result<String, TransactionError> {
        let strategy = self.strategy.name();

        tracing::debug!(strategy, "Building transaction for external signing");
        let mut transaction = self.strategy.build();

        if let Some(account) = from_account {
            transaction.set_transaction_id(TransactionId::generate(*account))?;
        }
        transaction.freeze_with(client)?;

        let bytes = transaction.to_bytes()?;
        tracing::debug!(strategy, bytes = bytes.len(), "Transaction frozen and serialized");

        Ok(Base64::encode_string(&bytes))
    }
}
