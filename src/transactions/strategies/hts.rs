// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token Service strategies.
//!
//! Amounts handed to these strategies are already in base units; display
//! unit conversion happens before a strategy is constructed.

use crate::{
    ledger::{
        to_signed, AccountId, AmountError, PendingAirdropId, PublicKey, TokenCreateBody, TokenId,
        TokenSupplyType, TokenTransfer, TokenType, Transaction, TransactionBody,
        TransactionError, TransactionReceipt, TransactionResponse,
    },
    transactions::strategy::{CreatedToken, TransactionStrategy},
};

// =============================================================================
// Create
// =============================================================================

/// Parameters of a new token.
#[derive(Debug, Clone, Default)]
pub struct TokenOptions {
    pub name: String,
    pub symbol: String,
    pub token_type: TokenType,
    /// Defaults to 0.
    pub decimals: Option<u32>,
    /// Base units; defaults to 0.
    pub initial_supply: Option<u64>,
    /// Setting a max supply makes the supply finite.
    pub max_supply: Option<u64>,
    pub is_supply_key: bool,
    pub is_metadata_key: bool,
    pub is_admin_key: bool,
    pub token_metadata: Option<String>,
    pub memo: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateTokenStrategy {
    options: TokenOptions,
    public_key: PublicKey,
    treasury: AccountId,
}

impl CreateTokenStrategy {
    pub fn new(options: TokenOptions, public_key: PublicKey, treasury: AccountId) -> Self {
        Self {
            options,
            public_key,
            treasury,
        }
    }
}

impl TransactionStrategy for CreateTokenStrategy {
    type Output = CreatedToken;

    fn name(&self) -> &'static str {
        "create_token"
    }

    fn build(&self) -> Transaction {
        let options = &self.options;
        let key_if = |flag: bool| flag.then(|| self.public_key.clone());
        let non_empty = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());

        Transaction::new(TransactionBody::TokenCreate(TokenCreateBody {
            name: options.name.clone(),
            symbol: options.symbol.clone(),
            token_type: options.token_type,
            decimals: options.decimals.unwrap_or(0),
            initial_supply: options.initial_supply.unwrap_or(0),
            supply_type: if options.max_supply.is_some() {
                TokenSupplyType::Finite
            } else {
                TokenSupplyType::Infinite
            },
            max_supply: options.max_supply,
            treasury_account_id: self.treasury,
            admin_key: key_if(options.is_admin_key),
            supply_key: key_if(options.is_supply_key),
            metadata_key: key_if(options.is_metadata_key),
            metadata: non_empty(&options.token_metadata),
            memo: non_empty(&options.memo),
        }))
    }

    fn format_result(
        &self,
        response: &TransactionResponse,
        receipt: &TransactionReceipt,
    ) -> Result<CreatedToken, TransactionError> {
        let token_id = receipt
            .token_id
            .ok_or(TransactionError::MissingReceiptField("tokenId"))?;

        Ok(CreatedToken {
            status: receipt.status.clone(),
            tx_hash: response.transaction_id.to_string(),
            token_id,
        })
    }
}

// =============================================================================
// Mint
// =============================================================================

#[derive(Debug, Clone)]
pub struct MintTokenStrategy {
    token_id: TokenId,
    amount: u64,
}

impl MintTokenStrategy {
    pub fn new(token_id: TokenId, amount: u64) -> Self {
        Self { token_id, amount }
    }

    fn body(&self) -> TransactionBody {
        TransactionBody::TokenMint {
            token_id: self.token_id,
            amount: self.amount,
            metadata: Vec::new(),
        }
    }
}

executed_result!(MintTokenStrategy, "mint_token");

#[derive(Debug, Clone)]
pub struct MintNftStrategy {
    token_id: TokenId,
    metadata: String,
}

impl MintNftStrategy {
    pub fn new(token_id: TokenId, metadata: impl Into<String>) -> Self {
        Self {
            token_id,
            metadata: metadata.into(),
        }
    }

    fn body(&self) -> TransactionBody {
        TransactionBody::TokenMint {
            token_id: self.token_id,
            amount: 0,
            metadata: vec![self.metadata.clone()],
        }
    }
}

executed_result!(MintNftStrategy, "mint_nft");

// =============================================================================
// Transfer and airdrop
// =============================================================================

#[derive(Debug, Clone)]
pub struct TransferTokenStrategy {
    token_id: TokenId,
    amount: i64,
    to: AccountId,
    from: AccountId,
}

impl TransferTokenStrategy {
    pub fn new(
        token_id: TokenId,
        amount: u64,
        to: AccountId,
        from: AccountId,
    ) -> Result<Self, AmountError> {
        Ok(Self {
            token_id,
            amount: to_signed(amount)?,
            to,
            from,
        })
    }

    fn body(&self) -> TransactionBody {
        TransactionBody::CryptoTransfer {
            hbar_transfers: Vec::new(),
            token_transfers: vec![
                TokenTransfer {
                    token_id: self.token_id,
                    account_id: self.from,
                    amount: -self.amount,
                },
                TokenTransfer {
                    token_id: self.token_id,
                    account_id: self.to,
                    amount: self.amount,
                },
            ],
        }
    }
}

executed_result!(TransferTokenStrategy, "transfer_token");

/// One airdrop destination, amount in base units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirdropRecipient {
    pub account_id: AccountId,
    pub amount: u64,
}

#[derive(Debug, Clone)]
pub struct AirdropTokenStrategy {
    token_id: TokenId,
    recipients: Vec<(AccountId, i64)>,
    payer: AccountId,
}

impl AirdropTokenStrategy {
    pub fn new(
        token_id: TokenId,
        recipients: &[AirdropRecipient],
        payer: AccountId,
    ) -> Result<Self, AmountError> {
        let recipients = recipients
            .iter()
            .map(|r| Ok((r.account_id, to_signed(r.amount)?)))
            .collect::<Result<Vec<_>, AmountError>>()?;

        Ok(Self {
            token_id,
            recipients,
            payer,
        })
    }

    fn body(&self) -> TransactionBody {
        let token_transfers = self
            .recipients
            .iter()
            .flat_map(|&(account_id, amount)| {
                [
                    TokenTransfer {
                        token_id: self.token_id,
                        account_id: self.payer,
                        amount: -amount,
                    },
                    TokenTransfer {
                        token_id: self.token_id,
                        account_id,
                        amount,
                    },
                ]
            })
            .collect();

        TransactionBody::TokenAirdrop { token_transfers }
    }
}

executed_result!(AirdropTokenStrategy, "airdrop_token");

#[derive(Debug, Clone)]
pub struct ClaimAirdropStrategy {
    airdrop_id: PendingAirdropId,
}

impl ClaimAirdropStrategy {
    pub fn new(airdrop_id: PendingAirdropId) -> Self {
        Self { airdrop_id }
    }

    fn body(&self) -> TransactionBody {
        TransactionBody::TokenClaimAirdrop {
            pending_airdrop_ids: vec![self.airdrop_id],
        }
    }
}

executed_result!(ClaimAirdropStrategy, "claim_airdrop");

// =============================================================================
// Association
// =============================================================================

#[derive(Debug, Clone)]
pub struct AssociateTokenStrategy {
    token_id: TokenId,
    account_id: AccountId,
}

impl AssociateTokenStrategy {
    pub fn new(token_id: TokenId, account_id: AccountId) -> Self {
        Self {
            token_id,
            account_id,
        }
    }

    fn body(&self) -> TransactionBody {
        TransactionBody::TokenAssociate {
            account_id: self.account_id,
            token_ids: vec![self.token_id],
        }
    }
}

executed_result!(AssociateTokenStrategy, "associate_token");

#[derive(Debug, Clone)]
pub struct DissociateTokenStrategy {
    token_id: TokenId,
    account_id: AccountId,
}

impl DissociateTokenStrategy {
    pub fn new(token_id: TokenId, account_id: AccountId) -> Self {
        Self {
            token_id,
            account_id,
        }
    }

    fn body(&self) -> TransactionBody {
        TransactionBody::TokenDissociate {
            account_id: self.account_id,
            token_ids: vec![self.token_id],
        }
    }
}

executed_result!(DissociateTokenStrategy, "dissociate_token");

#[derive(Debug, Clone)]
pub struct RejectTokenStrategy {
    token_id: TokenId,
    owner: AccountId,
}

impl RejectTokenStrategy {
    pub fn new(token_id: TokenId, owner: AccountId) -> Self {
        Self { token_id, owner }
    }

    fn body(&self) -> TransactionBody {
        TransactionBody::TokenReject {
            owner_id: self.owner,
            token_ids: vec![self.token_id],
        }
    }
}

executed_result!(RejectTokenStrategy, "reject_token");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ledger::TransactionId, test_support::test_key};

    const TOKEN: TokenId = TokenId::new(0, 0, 5001);
    const ALICE: AccountId = AccountId::new(0, 0, 1001);
    const BOB: AccountId = AccountId::new(0, 0, 1002);

    fn create_body(options: TokenOptions) -> TokenCreateBody {
        match CreateTokenStrategy::new(options, test_key().public_key(), ALICE)
            .build()
            .body()
        {
            TransactionBody::TokenCreate(body) => body.clone(),
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn test_create_token_defaults() {
        let body = create_body(TokenOptions {
            name: "Franky".to_string(),
            symbol: "FRK".to_string(),
            ..TokenOptions::default()
        });

        assert_eq!(body.decimals, 0);
        assert_eq!(body.initial_supply, 0);
        assert_eq!(body.supply_type, TokenSupplyType::Infinite);
        assert_eq!(body.treasury_account_id, ALICE);
        assert!(body.admin_key.is_none());
        assert!(body.supply_key.is_none());
        assert!(body.metadata_key.is_none());
        assert!(body.metadata.is_none());
        assert!(body.memo.is_none());
    }

    #[test]
    fn test_create_token_flags_and_max_supply() {
        let body = create_body(TokenOptions {
            name: "Art".to_string(),
            symbol: "ART".to_string(),
            token_type: TokenType::NonFungibleUnique,
            max_supply: Some(100),
            is_supply_key: true,
            is_admin_key: true,
            token_metadata: Some("ipfs://meta".to_string()),
            memo: Some(String::new()),
            ..TokenOptions::default()
        });

        assert_eq!(body.token_type, TokenType::NonFungibleUnique);
        assert_eq!(body.supply_type, TokenSupplyType::Finite);
        assert_eq!(body.max_supply, Some(100));
        assert!(body.admin_key.is_some());
        assert!(body.supply_key.is_some());
        assert!(body.metadata_key.is_none());
        assert_eq!(body.metadata.as_deref(), Some("ipfs://meta"));
        assert!(body.memo.is_none());
    }

    #[test]
    fn test_create_token_requires_token_id() {
        let strategy = CreateTokenStrategy::new(
            TokenOptions::default(),
            test_key().public_key(),
            ALICE,
        );
        let response = TransactionResponse {
            transaction_id: TransactionId::generate(ALICE),
            node_id: AccountId::new(0, 0, 3),
        };

        let mut receipt = TransactionReceipt::with_status("SUCCESS");
        assert!(matches!(
            strategy.format_result(&response, &receipt),
            Err(TransactionError::MissingReceiptField("tokenId"))
        ));

        receipt.token_id = Some(TOKEN);
        assert_eq!(
            strategy.format_result(&response, &receipt).unwrap().token_id,
            TOKEN
        );
    }

    #[test]
    fn test_mint_bodies() {
        assert_eq!(
            MintTokenStrategy::new(TOKEN, 500).build().body(),
            &TransactionBody::TokenMint {
                token_id: TOKEN,
                amount: 500,
                metadata: Vec::new()
            }
        );
        assert_eq!(
            MintNftStrategy::new(TOKEN, "nft-1").build().body(),
            &TransactionBody::TokenMint {
                token_id: TOKEN,
                amount: 0,
                metadata: vec!["nft-1".to_string()]
            }
        );
    }

    #[test]
    fn test_transfer_token_debits_sender() {
        let strategy = TransferTokenStrategy::new(TOKEN, 250, BOB, ALICE).unwrap();
        match strategy.build().body() {
            TransactionBody::CryptoTransfer {
                token_transfers, ..
            } => {
                assert_eq!(token_transfers[0].account_id, ALICE);
                assert_eq!(token_transfers[0].amount, -250);
                assert_eq!(token_transfers[1].account_id, BOB);
                assert_eq!(token_transfers[1].amount, 250);
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn test_airdrop_pairs_each_recipient_with_payer() {
        let carol = AccountId::new(0, 0, 1003);
        let recipients = [
            AirdropRecipient {
                account_id: BOB,
                amount: 100,
            },
            AirdropRecipient {
                account_id: carol,
                amount: 200,
            },
        ];
        let strategy = AirdropTokenStrategy::new(TOKEN, &recipients, ALICE).unwrap();

        match strategy.build().body() {
            TransactionBody::TokenAirdrop { token_transfers } => {
                let flat: Vec<_> = token_transfers
                    .iter()
                    .map(|t| (t.account_id, t.amount))
                    .collect();
                assert_eq!(
                    flat,
                    vec![(ALICE, -100), (BOB, 100), (ALICE, -200), (carol, 200)]
                );
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn test_association_and_reject_bodies() {
        assert_eq!(
            AssociateTokenStrategy::new(TOKEN, ALICE).build().body(),
            &TransactionBody::TokenAssociate {
                account_id: ALICE,
                token_ids: vec![TOKEN]
            }
        );
        assert_eq!(
            DissociateTokenStrategy::new(TOKEN, ALICE).build().body(),
            &TransactionBody::TokenDissociate {
                account_id: ALICE,
                token_ids: vec![TOKEN]
            }
        );
        assert_eq!(
            RejectTokenStrategy::new(TOKEN, ALICE).build().body(),
            &TransactionBody::TokenReject {
                owner_id: ALICE,
                token_ids: vec![TOKEN]
            }
        );
    }

    #[test]
    fn test_claim_airdrop_body() {
        let id = PendingAirdropId {
            sender_id: BOB,
            receiver_id: ALICE,
            token_id: TOKEN,
        };
        assert_eq!(
            ClaimAirdropStrategy::new(id).build().body(),
            &TransactionBody::TokenClaimAirdrop {
                pending_airdrop_ids: vec![id]
            }
        );
    }
}
