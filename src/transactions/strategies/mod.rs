// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! One strategy per ledger operation.

/// Strategy impl for operations whose output is the plain status/hash
/// pair. The type provides `fn body(&self) -> TransactionBody`.
macro_rules! executed_result {
    ($strategy:ty, $name:literal) => {
        impl $crate::transactions::strategy::TransactionStrategy for $strategy {
            type Output = $crate::transactions::strategy::ExecutedTransaction;

            fn name(&self) -> &'static str {
                $name
            }

            fn build(&self) -> $crate::ledger::Transaction {
                $crate::ledger::Transaction::new(self.body())
            }

            fn format_result(
                &self,
                response: &$crate::ledger::TransactionResponse,
                receipt: &$crate::ledger::TransactionReceipt,
            ) -> Result<Self::Output, $crate::ledger::TransactionError> {
                Ok($crate::transactions::strategy::ExecutedTransaction::new(
                    response, receipt,
                ))
            }
        }
    };
}

mod account;
mod hbar;
mod hcs;
mod hts;

pub use account::AssetAllowanceStrategy;
pub use hbar::TransferHbarStrategy;
pub use hcs::{CreateTopicStrategy, DeleteTopicStrategy, SubmitTopicMessageStrategy};
pub use hts::{
    AirdropRecipient, AirdropTokenStrategy, AssociateTokenStrategy, ClaimAirdropStrategy,
    CreateTokenStrategy, DissociateTokenStrategy, MintNftStrategy, MintTokenStrategy,
    RejectTokenStrategy, TokenOptions, TransferTokenStrategy,
};
