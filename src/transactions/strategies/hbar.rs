// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HBAR transfers.

use crate::{
    ledger::{
        to_signed, AccountId, AmountError, Hbar, HbarTransfer, Transaction, TransactionBody,
        TransactionError, TransactionReceipt, TransactionResponse,
    },
    transactions::strategy::{ExecutedTransaction, TransactionStrategy},
};

/// Move `amount` from `from` to `to` in one balanced transfer list.
#[derive(Debug, Clone)]
pub struct TransferHbarStrategy {
    from: AccountId,
    to: AccountId,
    tinybars: i64,
}

impl TransferHbarStrategy {
    pub fn new(from: AccountId, to: AccountId, amount: Hbar) -> Result<Self, AmountError> {
        Ok(Self {
            from,
            to,
            tinybars: to_signed(amount.to_tinybars())?,
        })
    }
}

impl TransactionStrategy for TransferHbarStrategy {
    type Output = ExecutedTransaction;

    fn name(&self) -> &'static str {
        "transfer_hbar"
    }

    fn build(&self) -> Transaction {
        Transaction::new(TransactionBody::CryptoTransfer {
            hbar_transfers: vec![
                HbarTransfer {
                    account_id: self.from,
                    amount: -self.tinybars,
                },
                HbarTransfer {
                    account_id: self.to,
                    amount: self.tinybars,
                },
            ],
            token_transfers: Vec::new(),
        })
    }

    fn format_result(
        &self,
        response: &TransactionResponse,
        receipt: &TransactionReceipt,
    ) -> Result<ExecutedTransaction, TransactionError> {
        Ok(ExecutedTransaction::new(response, receipt))
    }
}
