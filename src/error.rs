// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use crate::ledger::{AmountError, ClientError, KeyError, MirrorNodeError, TransactionError};

/// Failure of an agent kit operation or query.
#[derive(Debug, thiserror::Error)]
pub enum KitError {
    #[error("Private key is missing. To perform custodial action you should pass private key!")]
    MissingPrivateKey,

    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    MirrorNode(#[from] MirrorNodeError),

    #[error("Invalid amount: {0}")]
    Amount(#[from] AmountError),

    #[error(transparent)]
    Key(#[from] KeyError),
}

impl KitError {
    /// Stable code reported in tool error envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingPrivateKey => "MISSING_PRIVATE_KEY",
            Self::Transaction(_) => "TRANSACTION_FAILED",
            Self::Client(_) => "CLIENT_ERROR",
            Self::MirrorNode(_) => "MIRROR_NODE_ERROR",
            Self::Amount(_) => "INVALID_AMOUNT",
            Self::Key(_) => "INVALID_KEY",
        }
    }
}
