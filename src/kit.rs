// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Agent Kit
//!
//! One entry point per ledger operation and per mirror node query.
//!
//! Every operation takes `custodial: Option<bool>`; `None` falls back to the
//! kit default, which is non-custodial unless changed with
//! [`AgentKit::with_default_custodial`]. A custodial call is signed and
//! submitted by the client's operator and returns a receipt. A non-custodial call is frozen with the
//! configured account as payer and returns base64 bytes for the user's
//! wallet to sign.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::{
    config::AppConfig,
    error::KitError,
    ledger::{
        from_base_units, to_base_units, to_mirror_timestamp, AccountId, Hbar, LedgerClient,
        MirrorNodeClient, Operator, PendingAirdrop, PendingAirdropId, PublicKey, RelayClient,
        TokenDetails, TokenHolder, TokenId, TokenType, TopicId, TopicMessage, HBAR_DECIMALS,
    },
    results::{CustodialReceipt, Operation, TransactionResult},
    transactions::{
        strategies::{
            AirdropRecipient, AirdropTokenStrategy, AssetAllowanceStrategy,
            AssociateTokenStrategy, ClaimAirdropStrategy, CreateTokenStrategy,
            CreateTopicStrategy, DeleteTopicStrategy, DissociateTokenStrategy, MintNftStrategy,
            MintTokenStrategy, RejectTokenStrategy, SubmitTopicMessageStrategy, TokenOptions,
            TransferHbarStrategy, TransferTokenStrategy,
        },
        TransactionBuilder, TransactionStrategy,
    },
};

/// Token balance enriched with the token's details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedTokenBalance {
    pub token_id: TokenId,
    pub token_name: String,
    pub token_symbol: String,
    pub token_decimals: u32,
    /// Base units.
    pub balance: u64,
    pub balance_in_display_unit: String,
}

/// Account and key a transaction is built for.
#[derive(Debug, Clone)]
struct Signer {
    account_id: AccountId,
    public_key: PublicKey,
    custodial: bool,
}

pub struct AgentKit {
    client: Arc<dyn LedgerClient>,
    mirror: MirrorNodeClient,
    account_id: AccountId,
    public_key: PublicKey,
    custodial: bool,
}

impl AgentKit {
    /// The kit starts non-custodial; see [`AgentKit::with_default_custodial`].
    pub fn new(
        client: Arc<dyn LedgerClient>,
        mirror: MirrorNodeClient,
        account_id: AccountId,
        public_key: PublicKey,
    ) -> Self {
        tracing::info!(
            account_id = %account_id,
            network = %client.network(),
            has_operator = client.operator_account_id().is_some(),
            "Agent kit initialized"
        );

        Self {
            client,
            mirror,
            account_id,
            public_key,
            custodial: false,
        }
    }

    /// Mode used when a call passes `custodial: None`.
    pub fn with_default_custodial(mut self, custodial: bool) -> Self {
        tracing::debug!(custodial, "Default signing mode set");
        self.custodial = custodial;
        self
    }

    /// Wire a relay client and mirror node client from `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self, KitError> {
        let operator = config.private_key.clone().map(|private_key| Operator {
            account_id: config.account_id,
            private_key,
        });
        let client = RelayClient::new(
            config.network,
            &config.relay_url,
            operator,
            config.http_timeout,
        )?;
        let mirror = match &config.mirror_node_url {
            Some(url) => MirrorNodeClient::new(url, config.http_timeout)?,
            None => MirrorNodeClient::for_network(config.network, config.http_timeout)?,
        };

        Ok(Self::new(
            Arc::new(client),
            mirror,
            config.account_id,
            config.public_key.clone(),
        )
        .with_default_custodial(config.custodial))
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn is_custodial(&self) -> bool {
        self.custodial
    }

    pub fn client(&self) -> &dyn LedgerClient {
        self.client.as_ref()
    }

    pub fn mirror(&self) -> &MirrorNodeClient {
        &self.mirror
    }

    fn resolve_mode(&self, custodial: Option<bool>) -> Result<Signer, KitError> {
        if !custodial.unwrap_or(self.custodial) {
            return Ok(Signer {
                account_id: self.account_id,
                public_key: self.public_key.clone(),
                custodial: false,
            });
        }

        match (
            self.client.operator_account_id(),
            self.client.operator_public_key(),
        ) {
            (Some(account_id), Some(public_key)) => Ok(Signer {
                account_id,
                public_key,
                custodial: true,
            }),
            _ => {
                tracing::error!("Private key missing for custodial operation");
                Err(KitError::MissingPrivateKey)
            }
        }
    }

    async fn submit<S>(
        &self,
        operation: Operation,
        signer: &Signer,
        strategy: S,
    ) -> Result<TransactionResult, KitError>
    where
        S: TransactionStrategy,
        S::Output: Into<CustodialReceipt>,
    {
        tracing::info!(
            operation = operation.as_str(),
            custodial = signer.custodial,
            account_id = %signer.account_id,
            "Submitting operation"
        );

        let builder = TransactionBuilder::new(strategy);
        if signer.custodial {
            let output = builder.sign_and_execute(self.client.as_ref()).await?;
            Ok(TransactionResult::custodial(operation, output))
        } else {
            let tx_bytes = builder.tx_bytes_string(self.client.as_ref(), Some(&self.account_id))?;
            Ok(TransactionResult::non_custodial(operation, tx_bytes))
        }
    }

    // =========================================================================
    // Consensus Service
    // =========================================================================

    pub async fn create_topic(
        &self,
        memo: &str,
        is_submit_key: bool,
        custodial: Option<bool>,
    ) -> Result<TransactionResult, KitError> {
        let signer = self.resolve_mode(custodial)?;
        let strategy = CreateTopicStrategy::new(memo, signer.public_key.clone(), is_submit_key);
        self.submit(Operation::CreateTopic, &signer, strategy).await
    }

    pub async fn delete_topic(
        &self,
        topic_id: TopicId,
        custodial: Option<bool>,
    ) -> Result<TransactionResult, KitError> {
        let signer = self.resolve_mode(custodial)?;
        self.submit(
            Operation::DeleteTopic,
            &signer,
            DeleteTopicStrategy::new(topic_id),
        )
        .await
    }

    pub async fn submit_topic_message(
        &self,
        topic_id: TopicId,
        message: &str,
        custodial: Option<bool>,
    ) -> Result<TransactionResult, KitError> {
        let signer = self.resolve_mode(custodial)?;
        self.submit(
            Operation::SubmitTopicMessage,
            &signer,
            SubmitTopicMessageStrategy::new(topic_id, message),
        )
        .await
    }

    // =========================================================================
    // HBAR
    // =========================================================================

    pub async fn transfer_hbar(
        &self,
        to: AccountId,
        amount: Hbar,
        custodial: Option<bool>,
    ) -> Result<TransactionResult, KitError> {
        let signer = self.resolve_mode(custodial)?;
        let strategy = TransferHbarStrategy::new(signer.account_id, to, amount)?;
        self.submit(Operation::TransferHbar, &signer, strategy).await
    }

    // =========================================================================
    // Token Service
    // =========================================================================

    pub async fn create_fungible_token(
        &self,
        options: TokenOptions,
        custodial: Option<bool>,
    ) -> Result<TransactionResult, KitError> {
        let options = TokenOptions {
            token_type: TokenType::FungibleCommon,
            ..options
        };
        self.create_token(options, custodial).await
    }

    /// NFT collections have no decimals, start empty and always carry a
    /// supply key.
    pub async fn create_non_fungible_token(
        &self,
        options: TokenOptions,
        custodial: Option<bool>,
    ) -> Result<TransactionResult, KitError> {
        let options = TokenOptions {
            token_type: TokenType::NonFungibleUnique,
            decimals: Some(0),
            initial_supply: Some(0),
            is_supply_key: true,
            ..options
        };
        self.create_token(options, custodial).await
    }

    async fn create_token(
        &self,
        options: TokenOptions,
        custodial: Option<bool>,
    ) -> Result<TransactionResult, KitError> {
        let signer = self.resolve_mode(custodial)?;
        let strategy =
            CreateTokenStrategy::new(options, signer.public_key.clone(), signer.account_id);
        self.submit(Operation::CreateToken, &signer, strategy).await
    }

    /// Mint `amount` base units of a fungible token.
    pub async fn mint_token(
        &self,
        token_id: TokenId,
        amount: u64,
        custodial: Option<bool>,
    ) -> Result<TransactionResult, KitError> {
        let signer = self.resolve_mode(custodial)?;
        self.submit(
            Operation::MintToken,
            &signer,
            MintTokenStrategy::new(token_id, amount),
        )
        .await
    }

    pub async fn mint_nft(
        &self,
        token_id: TokenId,
        metadata: &str,
        custodial: Option<bool>,
    ) -> Result<TransactionResult, KitError> {
        let signer = self.resolve_mode(custodial)?;
        self.submit(
            Operation::MintNft,
            &signer,
            MintNftStrategy::new(token_id, metadata),
        )
        .await
    }

    /// Transfer `amount` base units to `to`.
    pub async fn transfer_token(
        &self,
        token_id: TokenId,
        to: AccountId,
        amount: u64,
        custodial: Option<bool>,
    ) -> Result<TransactionResult, KitError> {
        let signer = self.resolve_mode(custodial)?;
        let strategy = TransferTokenStrategy::new(token_id, amount, to, signer.account_id)?;
        self.submit(Operation::TransferToken, &signer, strategy).await
    }

    pub async fn associate_token(
        &self,
        token_id: TokenId,
        custodial: Option<bool>,
    ) -> Result<TransactionResult, KitError> {
        let signer = self.resolve_mode(custodial)?;
        let strategy = AssociateTokenStrategy::new(token_id, signer.account_id);
        self.submit(Operation::AssociateToken, &signer, strategy).await
    }

    pub async fn dissociate_token(
        &self,
        token_id: TokenId,
        custodial: Option<bool>,
    ) -> Result<TransactionResult, KitError> {
        let signer = self.resolve_mode(custodial)?;
        let strategy = DissociateTokenStrategy::new(token_id, signer.account_id);
        self.submit(Operation::DissociateToken, &signer, strategy).await
    }

    /// Recipient amounts are base units.
    pub async fn airdrop_token(
        &self,
        token_id: TokenId,
        recipients: &[AirdropRecipient],
        custodial: Option<bool>,
    ) -> Result<TransactionResult, KitError> {
        let signer = self.resolve_mode(custodial)?;
        let strategy = AirdropTokenStrategy::new(token_id, recipients, signer.account_id)?;
        self.submit(Operation::AirdropToken, &signer, strategy).await
    }

    /// Claim what `sender` airdropped of `token_id` to the signing account.
    pub async fn claim_airdrop(
        &self,
        token_id: TokenId,
        sender: AccountId,
        custodial: Option<bool>,
    ) -> Result<TransactionResult, KitError> {
        let signer = self.resolve_mode(custodial)?;
        let airdrop_id = PendingAirdropId {
            sender_id: sender,
            receiver_id: signer.account_id,
            token_id,
        };
        self.submit(
            Operation::ClaimAirdrop,
            &signer,
            ClaimAirdropStrategy::new(airdrop_id),
        )
        .await
    }

    pub async fn reject_token(
        &self,
        token_id: TokenId,
        custodial: Option<bool>,
    ) -> Result<TransactionResult, KitError> {
        let signer = self.resolve_mode(custodial)?;
        let strategy = RejectTokenStrategy::new(token_id, signer.account_id);
        self.submit(Operation::RejectToken, &signer, strategy).await
    }

    // =========================================================================
    // Allowances
    // =========================================================================

    /// Approve `spender` for `amount` base units of `token_id`, or tinybars
    /// when no token is given.
    pub async fn approve_asset_allowance(
        &self,
        spender: AccountId,
        amount: u64,
        token_id: Option<TokenId>,
        custodial: Option<bool>,
    ) -> Result<TransactionResult, KitError> {
        let signer = self.resolve_mode(custodial)?;
        let strategy = AssetAllowanceStrategy::new(token_id, amount, signer.account_id, spender);
        self.submit(Operation::AssetAllowance, &signer, strategy).await
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub async fn hbar_balance(&self, account_id: Option<AccountId>) -> Result<Hbar, KitError> {
        let account_id = account_id.unwrap_or(self.account_id);
        let tinybars = self.mirror.hbar_balance(&account_id).await?;
        Ok(Hbar::from_tinybars(tinybars))
    }

    /// Balance in base units.
    pub async fn token_balance(
        &self,
        token_id: TokenId,
        account_id: Option<AccountId>,
    ) -> Result<u64, KitError> {
        let account_id = account_id.unwrap_or(self.account_id);
        Ok(self.mirror.token_balance(&token_id, &account_id).await?)
    }

    pub async fn all_token_balances(
        &self,
        account_id: Option<AccountId>,
    ) -> Result<Vec<DetailedTokenBalance>, KitError> {
        let account_id = account_id.unwrap_or(self.account_id);
        let entries = self.mirror.account_token_balances(&account_id).await?;

        let mut balances = Vec::with_capacity(entries.len());
        for entry in entries {
            let details = self.mirror.token_details(&entry.token_id).await?;
            let decimals = details.decimals()?;
            balances.push(DetailedTokenBalance {
                token_id: entry.token_id,
                token_name: details.name,
                token_symbol: details.symbol,
                token_decimals: decimals,
                balance: entry.balance,
                balance_in_display_unit: from_base_units(entry.balance, decimals),
            });
        }
        Ok(balances)
    }

    pub async fn token_details(&self, token_id: TokenId) -> Result<TokenDetails, KitError> {
        Ok(self.mirror.token_details(&token_id).await?)
    }

    /// Holders of `token_id`; `threshold` is in base units.
    pub async fn token_holders(
        &self,
        token_id: TokenId,
        threshold: Option<u64>,
    ) -> Result<Vec<TokenHolder>, KitError> {
        Ok(self.mirror.token_holders(&token_id, threshold).await?)
    }

    pub async fn topic_info(&self, topic_id: TopicId) -> Result<Value, KitError> {
        Ok(self.mirror.topic_info(&topic_id).await?)
    }

    /// Messages between two optional ISO-8601 dates, newest first.
    pub async fn topic_messages(
        &self,
        topic_id: TopicId,
        lower: Option<&str>,
        upper: Option<&str>,
    ) -> Result<Vec<TopicMessage>, KitError> {
        let lower = lower.map(to_mirror_timestamp).transpose()?;
        let upper = upper.map(to_mirror_timestamp).transpose()?;
        Ok(self
            .mirror
            .topic_messages(&topic_id, lower.as_deref(), upper.as_deref())
            .await?)
    }

    pub async fn pending_airdrops(
        &self,
        account_id: Option<AccountId>,
    ) -> Result<Vec<PendingAirdrop>, KitError> {
        let account_id = account_id.unwrap_or(self.account_id);
        Ok(self.mirror.pending_airdrops(&account_id).await?)
    }

    /// Convert a display amount of `token_id` into base units using the
    /// decimals reported by the mirror node.
    pub async fn to_base_units(&self, token_id: TokenId, amount: &str) -> Result<u64, KitError> {
        let decimals = self.token_decimals(token_id).await?;
        Ok(to_base_units(amount, decimals)?)
    }

    pub async fn token_decimals(&self, token_id: TokenId) -> Result<u32, KitError> {
        Ok(self.mirror.token_details(&token_id).await?.decimals()?)
    }

    /// Convert a display amount into base units of `token_id`, or into
    /// tinybars when no token is given.
    pub async fn asset_base_units(
        &self,
        token_id: Option<TokenId>,
        amount: &str,
    ) -> Result<u64, KitError> {
        match token_id {
            Some(token_id) => self.to_base_units(token_id, amount).await,
            None => Ok(to_base_units(amount, HBAR_DECIMALS)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use base64ct::{Base64, Encoding};
    use serde_json::json;

    use super::*;
    use crate::{
        ledger::{Transaction, TransactionBody, TransactionReceipt},
        test_support::{stub_kit, test_key, StubLedgerClient, OPERATOR, USER},
    };

    fn kit(client: StubLedgerClient) -> (Arc<AgentKit>, Arc<StubLedgerClient>) {
        stub_kit(client, "http://127.0.0.1:9")
    }

    fn decode(tx_bytes: &str) -> Transaction {
        Transaction::from_bytes(&Base64::decode_vec(tx_bytes).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_custodial_submit_message() {
        let (kit, client) = kit(StubLedgerClient::new());

        let result = kit
            .submit_topic_message(TopicId::new(0, 0, 123456), "hello", Some(true))
            .await
            .unwrap();

        let executed = client.executed();
        assert_eq!(executed.len(), 1);
        let tx_hash = executed[0].transaction_id().unwrap().to_string();
        assert_eq!(
            result.raw_response(),
            json!({"status": "success", "txHash": tx_hash, "topicId": "0.0.123456"})
        );
    }

    #[tokio::test]
    async fn test_unset_mode_returns_bytes_even_with_operator() {
        let (kit, client) = kit(StubLedgerClient::new());
        assert!(!kit.is_custodial());

        let result = kit
            .transfer_hbar(AccountId::new(0, 0, 9), Hbar::from_tinybars(500), None)
            .await
            .unwrap();
        assert!(matches!(result, TransactionResult::NonCustodial { .. }));
        assert!(client.executed().is_empty());
    }

    #[tokio::test]
    async fn test_default_mode_can_be_switched_to_custodial() {
        let client = Arc::new(StubLedgerClient::new());
        let mirror = MirrorNodeClient::new("http://127.0.0.1:9", Duration::from_secs(5)).unwrap();
        let kit = AgentKit::new(client.clone(), mirror, USER, test_key().public_key())
            .with_default_custodial(true);

        let result = kit
            .delete_topic(TopicId::new(0, 0, 7), None)
            .await
            .unwrap();
        assert!(matches!(result, TransactionResult::Custodial { .. }));
        assert_eq!(client.executed().len(), 1);

        let result = kit
            .delete_topic(TopicId::new(0, 0, 7), Some(false))
            .await
            .unwrap();
        assert!(matches!(result, TransactionResult::NonCustodial { .. }));
        assert_eq!(client.executed().len(), 1);
    }

    #[tokio::test]
    async fn test_custodial_without_operator_fails() {
        let (kit, client) = kit(StubLedgerClient::without_operator());
        assert!(!kit.is_custodial());

        let err = kit
            .delete_topic(TopicId::new(0, 0, 7), Some(true))
            .await
            .unwrap_err();
        assert!(matches!(err, KitError::MissingPrivateKey));
        assert!(client.executed().is_empty());
    }

    #[tokio::test]
    async fn test_non_custodial_uses_configured_account() {
        let (kit, client) = kit(StubLedgerClient::new());

        let result = kit
            .transfer_hbar(AccountId::new(0, 0, 9), Hbar::from_tinybars(500), Some(false))
            .await
            .unwrap();
        assert!(client.executed().is_empty());

        let TransactionResult::NonCustodial { tx_bytes, .. } = result else {
            panic!("expected non-custodial result");
        };
        let tx = decode(&tx_bytes);
        assert_eq!(tx.transaction_id().unwrap().account_id, USER);
        match tx.body() {
            TransactionBody::CryptoTransfer { hbar_transfers, .. } => {
                assert_eq!(hbar_transfers[0].account_id, USER);
                assert_eq!(hbar_transfers[0].amount, -500);
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_nft_forces_collection_settings() {
        let (kit, client) = kit(StubLedgerClient::new().with_receipt(TransactionReceipt {
            token_id: Some(TokenId::new(0, 0, 8080)),
            ..TransactionReceipt::with_status("SUCCESS")
        }));

        let options = TokenOptions {
            name: "Agents".to_string(),
            symbol: "AGT".to_string(),
            decimals: Some(6),
            initial_supply: Some(1_000),
            ..TokenOptions::default()
        };
        let result = kit
            .create_non_fungible_token(options, Some(true))
            .await
            .unwrap();
        assert_eq!(result.raw_response()["tokenId"], "0.0.8080");

        match client.executed()[0].body() {
            TransactionBody::TokenCreate(body) => {
                assert_eq!(body.token_type, TokenType::NonFungibleUnique);
                assert_eq!(body.decimals, 0);
                assert_eq!(body.initial_supply, 0);
                assert!(body.supply_key.is_some());
                assert_eq!(body.treasury_account_id, OPERATOR);
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_claim_airdrop_targets_signer() {
        let (kit, client) = kit(StubLedgerClient::new());
        let sender = AccountId::new(0, 0, 42);
        let token = TokenId::new(0, 0, 77);

        kit.claim_airdrop(token, sender, Some(true)).await.unwrap();

        match client.executed()[0].body() {
            TransactionBody::TokenClaimAirdrop {
                pending_airdrop_ids,
            } => {
                assert_eq!(
                    pending_airdrop_ids[0],
                    PendingAirdropId {
                        sender_id: sender,
                        receiver_id: OPERATOR,
                        token_id: token,
                    }
                );
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failed_status_surfaces_as_transaction_error() {
        let (kit, _client) = kit(
            StubLedgerClient::new().with_receipt(TransactionReceipt::with_status("INVALID_SIGNATURE")),
        );

        let err = kit
            .mint_token(TokenId::new(0, 0, 1), 10, Some(true))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "TRANSACTION_FAILED");
    }

    #[tokio::test]
    async fn test_display_amounts_use_mirror_decimals() {
        let mut server = mockito::Server::new_async().await;
        let _details = server
            .mock("GET", "/api/v1/tokens/0.0.77")
            .with_status(200)
            .with_body(
                json!({"token_id": "0.0.77", "name": "Coin", "symbol": "C", "decimals": "2"})
                    .to_string(),
            )
            .create_async()
            .await;
        let (kit, _client) = stub_kit(StubLedgerClient::new(), &server.url());

        assert_eq!(
            kit.to_base_units(TokenId::new(0, 0, 77), "1.5").await.unwrap(),
            150
        );
        assert_eq!(kit.asset_base_units(None, "2").await.unwrap(), 200_000_000);
    }

    #[tokio::test]
    async fn test_all_token_balances_adds_details() {
        let mut server = mockito::Server::new_async().await;
        let _balances = server
            .mock("GET", "/api/v1/balances")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(
                json!({
                    "balances": [{
                        "account": "0.0.5005",
                        "balance": 100,
                        "tokens": [{"token_id": "0.0.77", "balance": 1234}]
                    }],
                    "links": {"next": null}
                })
                .to_string(),
            )
            .create_async()
            .await;
        let _details = server
            .mock("GET", "/api/v1/tokens/0.0.77")
            .with_status(200)
            .with_body(
                json!({"token_id": "0.0.77", "name": "Coin", "symbol": "C", "decimals": "2"})
                    .to_string(),
            )
            .create_async()
            .await;
        let (kit, _client) = stub_kit(StubLedgerClient::new(), &server.url());

        let balances = kit.all_token_balances(None).await.unwrap();
        assert_eq!(
            balances,
            vec![DetailedTokenBalance {
                token_id: TokenId::new(0, 0, 77),
                token_name: "Coin".to_string(),
                token_symbol: "C".to_string(),
                token_decimals: 2,
                balance: 1234,
                balance_in_display_unit: "12.34".to_string(),
            }]
        );
    }
}
