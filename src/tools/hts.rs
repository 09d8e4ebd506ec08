// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token Service tools.
//!
//! Transfer, airdrop and holder-threshold amounts are display units and
//! are converted with the token's decimals from the mirror node. Minting
//! takes base units.

use serde::Deserialize;
use serde_json::json;

use super::{
    params,
    types::{ToolContext, ToolError},
};
use crate::{
    ledger::{from_base_units, to_base_units, AccountId, TokenId},
    transactions::strategies::{AirdropRecipient, TokenOptions},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTokenParams {
    name: String,
    symbol: String,
    #[serde(default, deserialize_with = "params::whole_number")]
    decimals: Option<u64>,
    #[serde(default, deserialize_with = "params::whole_number")]
    initial_supply: Option<u64>,
    #[serde(default, deserialize_with = "params::whole_number")]
    max_supply: Option<u64>,
    #[serde(default)]
    is_supply_key: bool,
    #[serde(default)]
    is_metadata_key: bool,
    #[serde(default)]
    is_admin_key: bool,
    memo: Option<String>,
    token_metadata: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MintTokenParams {
    token_id: TokenId,
    #[serde(default, deserialize_with = "params::whole_number")]
    amount: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MintNftParams {
    token_id: TokenId,
    token_metadata: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransferTokenParams {
    token_id: TokenId,
    to_account_id: AccountId,
    #[serde(default, deserialize_with = "params::amount")]
    amount: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AirdropParams {
    token_id: TokenId,
    #[serde(default)]
    recipients: Vec<RecipientParams>,
}

/// One airdrop destination, amount in display units.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecipientParams {
    account_id: AccountId,
    #[serde(default, deserialize_with = "params::amount")]
    amount: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClaimAirdropParams {
    token_id: TokenId,
    sender_account_id: AccountId,
}

/// Params of the tools that act on one token for the signing account.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenParams {
    token_id: TokenId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenBalanceParams {
    token_id: TokenId,
    account_id: Option<AccountId>,
}

/// Params of the queries that default to the connected account.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountParams {
    account_id: Option<AccountId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HoldersParams {
    token_id: TokenId,
    #[serde(default, deserialize_with = "params::amount")]
    threshold: Option<String>,
}

impl CreateTokenParams {
    fn into_options(self) -> Result<TokenOptions, ToolError> {
        let decimals = self
            .decimals
            .map(u32::try_from)
            .transpose()
            .map_err(|e| ToolError::invalid("decimals", e))?;

        Ok(TokenOptions {
            name: self.name,
            symbol: self.symbol,
            decimals,
            initial_supply: self.initial_supply,
            max_supply: self.max_supply,
            is_supply_key: self.is_supply_key,
            is_metadata_key: self.is_metadata_key,
            is_admin_key: self.is_admin_key,
            memo: self.memo,
            token_metadata: self.token_metadata,
            ..TokenOptions::default()
        })
    }
}

// =============================================================================
// Create and mint
// =============================================================================

ledger_tool!(
    CreateFungibleTokenTool,
    "hedera_create_fungible_token",
    r#"Create a fungible token on Hedera
Inputs (input is a JSON string):
name: string, the name of the token e.g. My Token,
symbol: string, the symbol of the token e.g. MT,
decimals: number, the amount of decimals of the token, 0 if not passed
initialSupply: number, optional, the initial supply of the token, given in base unit, 0 if not passed
isSupplyKey: boolean, decides whether supply key should be set, false if not passed
isMetadataKey: boolean, decides whether metadata key should be set, false if not passed
isAdminKey: boolean, decides whether admin key should be set, false if not passed
memo: string, containing memo associated with this token, empty string if not passed
tokenMetadata: string, containing metadata associated with this token, empty string if not passed
Example usage:
1. Create a token with 2 decimals and 1000.00 initial supply:
  '{"name": "My Token", "symbol": "MT", "decimals": 2, "initialSupply": 100000}'
"#
);

impl CreateFungibleTokenTool {
    async fn run(&self, input: &str, ctx: &ToolContext) -> Result<String, ToolError> {
        let params: CreateTokenParams = params::parse(input)?;
        let options = TokenOptions {
            max_supply: None,
            ..params.into_options()?
        };

        let result = self
            .kit
            .create_fungible_token(options, ctx.is_custodial)
            .await?;
        Ok(result.stringified_response())
    }
}

ledger_tool!(
    CreateNonFungibleTokenTool,
    "hedera_create_non_fungible_token",
    r#"Create a non-fungible (NFT) token on Hedera.
Inputs (input is a JSON string):
- name: string (e.g. "My Token")
- symbol: string (e.g. "MT")
- maxSupply: number (optional), the maximum supply of the token. The supply is infinite if not provided.
- isMetadataKey: boolean, determines whether a metadata key should be set. Defaults to `false` if not provided.
- isAdminKey: boolean, determines whether an admin key should be set. Defaults to `false` if not provided.
- memo: string, containing a memo associated with the token. Defaults to an empty string if not provided.
- tokenMetadata: string, containing metadata associated with the token. Defaults to an empty string if not provided.
Example usage:
1. Create a collection of at most 500 NFTs:
  '{"name": "My Collection", "symbol": "MC", "maxSupply": 500}'
"#
);

impl CreateNonFungibleTokenTool {
    async fn run(&self, input: &str, ctx: &ToolContext) -> Result<String, ToolError> {
        let params: CreateTokenParams = params::parse(input)?;
        let options = params.into_options()?;

        let result = self
            .kit
            .create_non_fungible_token(options, ctx.is_custodial)
            .await?;
        Ok(result.stringified_response())
    }
}

ledger_tool!(
    MintFungibleTokenTool,
    "hedera_mint_fungible_token",
    r#"Mint fungible tokens to an account on Hedera
Inputs (input is a JSON string):
tokenId: string, the ID of the token to mint e.g. 0.0.123456,
amount: number, the amount of tokens to mint in base unit e.g. 100,
Example usage:
1. Mint 100 base units of token 0.0.123456:
  '{"tokenId": "0.0.123456", "amount": 100}'
"#
);

impl MintFungibleTokenTool {
    async fn run(&self, input: &str, ctx: &ToolContext) -> Result<String, ToolError> {
        let params: MintTokenParams = params::parse(input)?;
        let amount = params::required(params.amount, "amount")?;

        let result = self
            .kit
            .mint_token(params.token_id, amount, ctx.is_custodial)
            .await?;
        Ok(result.stringified_response())
    }
}

ledger_tool!(
    MintNftTool,
    "hedera_mint_nft",
    r#"Mint an NFT to an account on Hedera
Inputs (input is a JSON string):
tokenId: string, the ID of the token to mint e.g. 0.0.123456,
tokenMetadata: string, the metadata of the NFT e.g. "My NFT",
Example usage:
1. Mint an NFT with metadata "My NFT" to token 0.0.123456:
  '{"tokenId": "0.0.123456", "tokenMetadata": "My NFT"}'
"#
);

impl MintNftTool {
    async fn run(&self, input: &str, ctx: &ToolContext) -> Result<String, ToolError> {
        let params: MintNftParams = params::parse(input)?;

        let result = self
            .kit
            .mint_nft(params.token_id, &params.token_metadata, ctx.is_custodial)
            .await?;
        Ok(result.stringified_response())
    }
}

// =============================================================================
// Transfer and airdrop
// =============================================================================

ledger_tool!(
    TransferTokenTool,
    "hedera_transfer_token",
    r#"Transfer fungible tokens on Hedera
Inputs (input is a JSON string):
tokenId: string, the ID of the token to transfer e.g. 0.0.123456,
toAccountId: string, the account ID to transfer to e.g. 0.0.789012,
amount: number, the amount of tokens to transfer in display unit e.g. 12.5
Example usage:
1. Transfer 12.5 of token 0.0.123456 to account 0.0.789012:
  '{"tokenId": "0.0.123456", "toAccountId": "0.0.789012", "amount": 12.5}'
"#
);

impl TransferTokenTool {
    async fn run(&self, input: &str, ctx: &ToolContext) -> Result<String, ToolError> {
        let params: TransferTokenParams = params::parse(input)?;
        let amount = params::required(params.amount, "amount")?;

        let amount = self.kit.to_base_units(params.token_id, &amount).await?;
        let result = self
            .kit
            .transfer_token(
                params.token_id,
                params.to_account_id,
                amount,
                ctx.is_custodial,
            )
            .await?;
        Ok(result.stringified_response())
    }
}

ledger_tool!(
    AirdropTokenTool,
    "hedera_airdrop_token",
    r#"Airdrop fungible tokens to multiple accounts on Hedera
Inputs (input is a JSON string):
tokenId: string, the ID of the token to airdrop e.g. 0.0.123456,
recipients: array of objects containing:
  - accountId: string, the account ID to send tokens to e.g. 0.0.789012
  - amount: number, the amount of tokens to send in display unit e.g. 100
Example usage:
1. Airdrop 100 tokens to account 0.0.789012 and 200 tokens to account 0.0.789013:
  '{
    "tokenId": "0.0.123456",
    "recipients": [
      {"accountId": "0.0.789012", "amount": 100},
      {"accountId": "0.0.789013", "amount": 200}
    ]
  }'
"#
);

impl AirdropTokenTool {
    async fn run(&self, input: &str, ctx: &ToolContext) -> Result<String, ToolError> {
        let params: AirdropParams = params::parse(input)?;
        if params.recipients.is_empty() {
            return Err(ToolError::MissingParameter("recipients".to_string()));
        }
        let token_id = params.token_id;
        let requested = params
            .recipients
            .into_iter()
            .map(|recipient| {
                let amount = params::required(recipient.amount, "amount")?;
                Ok((recipient.account_id, amount))
            })
            .collect::<Result<Vec<_>, ToolError>>()?;

        let decimals = self.kit.token_decimals(token_id).await?;
        let recipients = requested
            .into_iter()
            .map(|(account_id, amount)| {
                let amount = to_base_units(&amount, decimals)
                    .map_err(|e| ToolError::invalid("recipients", e))?;
                Ok(AirdropRecipient { account_id, amount })
            })
            .collect::<Result<Vec<_>, ToolError>>()?;

        let result = self
            .kit
            .airdrop_token(token_id, &recipients, ctx.is_custodial)
            .await?;
        Ok(result.stringified_response())
    }
}

ledger_tool!(
    ClaimAirdropTool,
    "hedera_claim_airdrop",
    r#"Claim an airdrop for a token on Hedera
Inputs (input is a JSON string):
tokenId: string, the ID of the token to claim the airdrop for e.g. 0.0.123456,
senderAccountId: string, the account ID of the sender e.g. 0.0.789012,
Example usage:
1. Claim an airdrop for token 0.0.123456 from account 0.0.789012:
  '{"tokenId": "0.0.123456", "senderAccountId": "0.0.789012"}'
"#
);

impl ClaimAirdropTool {
    async fn run(&self, input: &str, ctx: &ToolContext) -> Result<String, ToolError> {
        let params: ClaimAirdropParams = params::parse(input)?;

        let result = self
            .kit
            .claim_airdrop(params.token_id, params.sender_account_id, ctx.is_custodial)
            .await?;
        Ok(result.stringified_response())
    }
}

// =============================================================================
// Association
// =============================================================================

ledger_tool!(
    AssociateTokenTool,
    "hedera_associate_token",
    r#"Associate a token to an account on Hedera
Inputs (input is a JSON string):
tokenId: string, the ID of the token to associate e.g. 0.0.123456,
Example usage:
1. Associate token 0.0.123456:
  '{"tokenId": "0.0.123456"}'
"#
);

impl AssociateTokenTool {
    async fn run(&self, input: &str, ctx: &ToolContext) -> Result<String, ToolError> {
        let params: TokenParams = params::parse(input)?;

        let result = self
            .kit
            .associate_token(params.token_id, ctx.is_custodial)
            .await?;
        Ok(result.stringified_response())
    }
}

ledger_tool!(
    DissociateTokenTool,
    "hedera_dissociate_token",
    r#"Dissociate a token from an account on Hedera
Inputs (input is a JSON string):
tokenId: string, the ID of the token to dissociate e.g. 0.0.123456,
Example usage:
1. Dissociate token 0.0.123456:
  '{"tokenId": "0.0.123456"}'
"#
);

impl DissociateTokenTool {
    async fn run(&self, input: &str, ctx: &ToolContext) -> Result<String, ToolError> {
        let params: TokenParams = params::parse(input)?;

        let result = self
            .kit
            .dissociate_token(params.token_id, ctx.is_custodial)
            .await?;
        Ok(result.stringified_response())
    }
}

ledger_tool!(
    RejectTokenTool,
    "hedera_reject_token",
    r#"Reject a token from an account on Hedera
Inputs (input is a JSON string):
tokenId: string, the ID of the token to reject e.g. 0.0.123456,
Example usage:
1. Reject token 0.0.123456:
  '{"tokenId": "0.0.123456"}'
"#
);

impl RejectTokenTool {
    async fn run(&self, input: &str, ctx: &ToolContext) -> Result<String, ToolError> {
        let params: TokenParams = params::parse(input)?;

        let result = self
            .kit
            .reject_token(params.token_id, ctx.is_custodial)
            .await?;
        Ok(result.stringified_response())
    }
}

// =============================================================================
// Queries
// =============================================================================

ledger_tool!(
    GetHtsBalanceTool,
    "hedera_get_hts_balance",
    r#"Retrieves the balance of a specified Hedera Token Service (HTS) token for a given account in base unit.
If an account ID is provided, it returns the balance of that account.
If no account ID is given, it returns the balance for the connected account.
Inputs (input is a JSON string):
- tokenId (string, required): The ID of the token to check the balance for (e.g., "0.0.112233").
- accountId (string, optional): The Hedera account ID to check the balance for (e.g., "0.0.789012").
Example usage:
1. Get balance of token 0.0.112233 for account 0.0.123456:
   '{"accountId": "0.0.123456", "tokenId": "0.0.112233"}'
2. Get balance of token 0.0.112233 for the connected account:
   '{"tokenId": "0.0.112233"}'
"#
);

impl GetHtsBalanceTool {
    async fn run(&self, input: &str, _ctx: &ToolContext) -> Result<String, ToolError> {
        let params: TokenBalanceParams = params::parse(input)?;

        let balance = self
            .kit
            .token_balance(params.token_id, params.account_id)
            .await?;
        let details = self.kit.token_details(params.token_id).await?;
        Ok(json!({
            "status": "success",
            "balance": balance,
            "unit": details.symbol,
            "decimals": details.decimals,
        })
        .to_string())
    }
}

ledger_tool!(
    GetAllTokenBalancesTool,
    "hedera_get_all_token_balances",
    r#"Get all token balances for an account on Hedera
Inputs (input is a JSON string):
- accountId (string, optional): The Hedera account ID to get the token balances for (e.g., "0.0.789012").
  If omitted, the tool returns the balances of the connected account.
Example usage:
1. Get all token balances for account 0.0.789012:
  '{"accountId": "0.0.789012"}'
2. Get all token balances for the connected account:
   '{}'
"#
);

impl GetAllTokenBalancesTool {
    async fn run(&self, input: &str, _ctx: &ToolContext) -> Result<String, ToolError> {
        let params: AccountParams = params::parse(input)?;

        let balances = self.kit.all_token_balances(params.account_id).await?;
        Ok(json!({
            "status": "success",
            "message": "Token balances retrieved",
            "balances": balances,
        })
        .to_string())
    }
}

ledger_tool!(
    GetTokenHoldersTool,
    "hedera_get_token_holders",
    r#"Get the holders of a token on Hedera
Inputs (input is a JSON string):
tokenId: string, the ID of the token to get the holders for e.g. 0.0.123456,
threshold (optional): number, the minimum balance in display unit e.g. 100,
Example usage:
1. Get the holders of token 0.0.123456 with a threshold of 100:
  '{"tokenId": "0.0.123456", "threshold": 100}'
"#
);

impl GetTokenHoldersTool {
    async fn run(&self, input: &str, _ctx: &ToolContext) -> Result<String, ToolError> {
        let params: HoldersParams = params::parse(input)?;
        let token_id = params.token_id;

        let threshold = match params.threshold {
            Some(threshold) => Some(self.kit.to_base_units(token_id, &threshold).await?),
            None => None,
        };
        let holders: Vec<_> = self
            .kit
            .token_holders(token_id, threshold)
            .await?
            .into_iter()
            .map(|holder| {
                json!({
                    "account": holder.account,
                    "balance": from_base_units(holder.balance, holder.decimals),
                    "decimals": holder.decimals,
                })
            })
            .collect();

        Ok(json!({
            "status": "success",
            "message": "Token holders retrieved",
            "holders": holders,
        })
        .to_string())
    }
}

ledger_tool!(
    GetPendingAirdropTool,
    "hedera_get_pending_airdrop",
    r#"Get the pending airdrops for the given account on Hedera
Inputs (input is a JSON string):
- accountId: string, optional, the account ID to get the pending airdrops for e.g. 0.0.789012,
  the connected account if not passed
Example usage:
1. Get the pending airdrops for account 0.0.789012:
  '{"accountId": "0.0.789012"}'
"#
);

impl GetPendingAirdropTool {
    async fn run(&self, input: &str, _ctx: &ToolContext) -> Result<String, ToolError> {
        let params: AccountParams = params::parse(input)?;

        let airdrop = self.kit.pending_airdrops(params.account_id).await?;
        Ok(json!({
            "status": "success",
            "message": "Pending airdrop retrieved",
            "airdrop": airdrop,
        })
        .to_string())
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::Value;

    use super::*;
    use crate::{
        ledger::{TokenSupplyType, TokenType, TransactionBody, TransactionReceipt},
        test_support::{stub_kit, StubLedgerClient, OPERATOR},
        tools::Tool,
    };

    const NO_MIRROR: &str = "http://127.0.0.1:9";

    fn parse(output: &str) -> Value {
        serde_json::from_str(output).unwrap()
    }

    fn token_details(server: &mut mockito::Server, decimals: &str) -> mockito::Mock {
        server
            .mock("GET", "/api/v1/tokens/0.0.42")
            .with_status(200)
            .with_body(
                json!({
                    "token_id": "0.0.42",
                    "name": "Franky",
                    "symbol": "FRK",
                    "decimals": decimals
                })
                .to_string(),
            )
    }

    async fn token_details_mock(server: &mut mockito::Server, decimals: &str) -> mockito::Mock {
        token_details(server, decimals).create_async().await
    }

    #[tokio::test]
    async fn test_transfer_converts_display_amount() {
        let mut server = mockito::Server::new_async().await;
        let _details = token_details_mock(&mut server, "2").await;
        let (kit, client) = stub_kit(StubLedgerClient::new(), &server.url());
        let tool = TransferTokenTool::new(kit);

        let output = parse(
            &tool
                .call(
                    r#"{"tokenId":"0.0.42","toAccountId":"0.0.789012","amount":1.25}"#,
                    &ToolContext::custodial(true),
                )
                .await,
        );
        assert_eq!(output["status"], "success");
        assert_eq!(output["message"], "Token transferred");

        match client.executed()[0].body() {
            TransactionBody::CryptoTransfer {
                token_transfers, ..
            } => {
                assert_eq!(token_transfers[0].account_id, OPERATOR);
                assert_eq!(token_transfers[0].amount, -125);
                assert_eq!(token_transfers[1].amount, 125);
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transfer_rejects_excess_precision() {
        let mut server = mockito::Server::new_async().await;
        let _details = token_details_mock(&mut server, "2").await;
        let (kit, client) = stub_kit(StubLedgerClient::new(), &server.url());
        let tool = TransferTokenTool::new(kit);

        let output = parse(
            &tool
                .call(
                    r#"{"tokenId":"0.0.42","toAccountId":"0.0.789012","amount":"1.255"}"#,
                    &ToolContext::default(),
                )
                .await,
        );
        assert_eq!(output["status"], "error");
        assert_eq!(output["code"], "INVALID_AMOUNT");
        assert!(client.executed().is_empty());
    }

    #[tokio::test]
    async fn test_airdrop_fetches_decimals_once() {
        let mut server = mockito::Server::new_async().await;
        let details = token_details(&mut server, "1")
            .expect(1)
            .create_async()
            .await;
        let (kit, client) = stub_kit(StubLedgerClient::new(), &server.url());
        let tool = AirdropTokenTool::new(kit);

        let output = parse(
            &tool
                .call(
                    r#"{"tokenId":"0.0.42","recipients":[
                        {"accountId":"0.0.789012","amount":10},
                        {"accountId":"0.0.789013","amount":"0.5"}
                    ]}"#,
                    &ToolContext::custodial(true),
                )
                .await,
        );
        assert_eq!(output["status"], "success");
        details.assert_async().await;

        match client.executed()[0].body() {
            TransactionBody::TokenAirdrop { token_transfers } => {
                let credits: Vec<i64> = token_transfers
                    .iter()
                    .filter(|t| t.amount > 0)
                    .map(|t| t.amount)
                    .collect();
                assert_eq!(credits, vec![100, 5]);
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_airdrop_validates_recipients_before_lookup() {
        let (kit, client) = stub_kit(StubLedgerClient::new(), NO_MIRROR);
        let tool = AirdropTokenTool::new(kit);

        let output = parse(
            &tool
                .call(
                    r#"{"tokenId":"0.0.42","recipients":[{"amount":10}]}"#,
                    &ToolContext::default(),
                )
                .await,
        );
        assert_eq!(output["code"], "MISSING_PARAMETER");
        assert_eq!(output["message"], "Missing required parameter: accountId");
        assert!(client.executed().is_empty());
    }

    #[tokio::test]
    async fn test_create_nft_collection() {
        let receipt = TransactionReceipt {
            token_id: Some(TokenId::new(0, 0, 777)),
            ..TransactionReceipt::with_status("SUCCESS")
        };
        let (kit, client) = stub_kit(StubLedgerClient::new().with_receipt(receipt), NO_MIRROR);
        let tool = CreateNonFungibleTokenTool::new(kit);

        let output = parse(
            &tool
                .call(
                    r#"{"name":"Frames","symbol":"FRM","maxSupply":500,"memo":""}"#,
                    &ToolContext::custodial(true),
                )
                .await,
        );
        assert_eq!(output["status"], "success");
        assert_eq!(output["tokenId"], "0.0.777");

        match client.executed()[0].body() {
            TransactionBody::TokenCreate(body) => {
                assert_eq!(body.token_type, TokenType::NonFungibleUnique);
                assert_eq!(body.supply_type, TokenSupplyType::Finite);
                assert_eq!(body.max_supply, Some(500));
                assert!(body.supply_key.is_some());
                assert!(body.admin_key.is_none());
                assert!(body.memo.is_none());
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_mint_takes_base_units() {
        let (kit, client) = stub_kit(StubLedgerClient::new(), NO_MIRROR);
        let tool = MintFungibleTokenTool::new(kit);

        let output = parse(
            &tool
                .call(
                    r#"{"tokenId":"0.0.42","amount":"500"}"#,
                    &ToolContext::custodial(true),
                )
                .await,
        );
        assert_eq!(output["status"], "success");

        match client.executed()[0].body() {
            TransactionBody::TokenMint { amount, .. } => assert_eq!(*amount, 500),
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_nft_metadata_is_minted_as_given() {
        let (kit, client) = stub_kit(StubLedgerClient::new(), NO_MIRROR);
        let tool = MintNftTool::new(kit);

        let output = parse(
            &tool
                .call(
                    r#"{"tokenId":"0.0.42","tokenMetadata":" ipfs://frame-1 "}"#,
                    &ToolContext::custodial(true),
                )
                .await,
        );
        assert_eq!(output["status"], "success");

        match client.executed()[0].body() {
            TransactionBody::TokenMint { metadata, .. } => {
                assert_eq!(metadata, &vec![" ipfs://frame-1 ".to_string()]);
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_hts_balance_reports_symbol() {
        let mut server = mockito::Server::new_async().await;
        let _details = token_details_mock(&mut server, "2").await;
        let _balance = server
            .mock("GET", "/api/v1/tokens/0.0.42/balances")
            .match_query(Matcher::UrlEncoded(
                "account.id".into(),
                "eq:0.0.789012".into(),
            ))
            .with_status(200)
            .with_body(
                json!({"balances": [{"account": "0.0.789012", "balance": 1234, "decimals": 2}]})
                    .to_string(),
            )
            .create_async()
            .await;
        let (kit, _client) = stub_kit(StubLedgerClient::new(), &server.url());
        let tool = GetHtsBalanceTool::new(kit);

        let output = parse(
            &tool
                .call(
                    r#"{"tokenId":"0.0.42","accountId":"0.0.789012"}"#,
                    &ToolContext::default(),
                )
                .await,
        );
        assert_eq!(
            output,
            json!({"status": "success", "balance": 1234, "unit": "FRK", "decimals": "2"})
        );
    }

    #[tokio::test]
    async fn test_holders_threshold_in_display_units() {
        let mut server = mockito::Server::new_async().await;
        let _details = token_details_mock(&mut server, "2").await;
        let _holders = server
            .mock("GET", "/api/v1/tokens/0.0.42/balances")
            .match_query(Matcher::UrlEncoded(
                "account.balance".into(),
                "gte:1000".into(),
            ))
            .with_status(200)
            .with_body(
                json!({
                    "balances": [{"account": "0.0.9", "balance": 12345, "decimals": 2}],
                    "links": {"next": null}
                })
                .to_string(),
            )
            .create_async()
            .await;
        let (kit, _client) = stub_kit(StubLedgerClient::new(), &server.url());
        let tool = GetTokenHoldersTool::new(kit);

        let output = parse(
            &tool
                .call(
                    r#"{"tokenId":"0.0.42","threshold":10}"#,
                    &ToolContext::default(),
                )
                .await,
        );
        assert_eq!(output["message"], "Token holders retrieved");
        assert_eq!(
            output["holders"],
            json!([{"account": "0.0.9", "balance": "123.45", "decimals": 2}])
        );
    }

    #[tokio::test]
    async fn test_mirror_outage_is_reported() {
        let mut server = mockito::Server::new_async().await;
        let _pending = server
            .mock("GET", "/api/v1/accounts/0.0.5005/airdrops/pending")
            .with_status(503)
            .create_async()
            .await;
        let (kit, _client) = stub_kit(StubLedgerClient::new(), &server.url());
        let tool = GetPendingAirdropTool::new(kit);

        let output = parse(&tool.call("{}", &ToolContext::default()).await);
        assert_eq!(output["status"], "error");
        assert_eq!(output["code"], "MIRROR_NODE_ERROR");
    }
}
