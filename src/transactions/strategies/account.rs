// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account strategies: spending allowances.

use crate::ledger::{AccountId, Hbar, HbarAllowance, TokenAllowance, TokenId, TransactionBody};

/// Allow `spender` to spend `amount` (base units) of the owner's token,
/// or of the owner's HBAR when no token is given.
#[derive(Debug, Clone)]
pub struct AssetAllowanceStrategy {
    token_id: Option<TokenId>,
    amount: u64,
    owner: AccountId,
    spender: AccountId,
}

impl AssetAllowanceStrategy {
    pub fn new(
        token_id: Option<TokenId>,
        amount: u64,
        owner: AccountId,
        spender: AccountId,
    ) -> Self {
        Self {
            token_id,
            amount,
            owner,
            spender,
        }
    }

    fn body(&self) -> TransactionBody {
        match self.token_id {
            Some(token_id) => TransactionBody::CryptoApproveAllowance {
                hbar_allowances: Vec::new(),
                token_allowances: vec![TokenAllowance {
                    token_id,
                    owner_account_id: self.owner,
                    spender_account_id: self.spender,
                    amount: self.amount,
                }],
            },
            None => TransactionBody::CryptoApproveAllowance {
                hbar_allowances: vec![HbarAllowance {
                    owner_account_id: self.owner,
                    spender_account_id: self.spender,
                    amount: Hbar::from_tinybars(self.amount),
                }],
                token_allowances: Vec::new(),
            },
        }
    }
}

executed_result!(AssetAllowanceStrategy, "asset_allowance");
