// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HBAR tools.

use serde::Deserialize;
use serde_json::json;

use super::{
    params,
    types::{ToolContext, ToolError},
};
use crate::ledger::{from_base_units, AccountId, Hbar, HBAR_DECIMALS};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BalanceParams {
    account_id: Option<AccountId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransferHbarParams {
    to_account_id: AccountId,
    #[serde(default, deserialize_with = "params::amount")]
    amount: Option<String>,
}

ledger_tool!(
    GetHbarBalanceTool,
    "hedera_get_hbar_balance",
    r#"Retrieves the HBAR balance of a specified Hedera account.
If an account ID is provided, it returns the balance of that account.
If no input is given (empty JSON '{}'), it returns the balance of the connected account.
Inputs (optional, input is a JSON string):
- accountId (string, optional): The Hedera account ID to check the balance for (e.g., "0.0.789012").
Example usage:
1. Get balance of a specific account:
   '{"accountId": "0.0.123456"}'
2. Get balance of the connected account:
   '{}'
"#
);

impl GetHbarBalanceTool {
    async fn run(&self, input: &str, _ctx: &ToolContext) -> Result<String, ToolError> {
        let params: BalanceParams = params::parse(input)?;

        let balance = self.kit.hbar_balance(params.account_id).await?;
        Ok(json!({
            "status": "success",
            "balance": from_base_units(balance.to_tinybars(), HBAR_DECIMALS),
            "unit": "HBAR",
        })
        .to_string())
    }
}

ledger_tool!(
    TransferHbarTool,
    "hedera_transfer_native_hbar_token",
    r#"Transfer HBAR to an account on Hedera
Inputs (input is a JSON string):
toAccountId: string, the account ID to transfer to e.g. 0.0.789012,
amount: number, the amount of HBAR to transfer e.g. 100,
Example usage:
1. Transfer 100 HBAR to account 0.0.789012:
  '{"toAccountId": "0.0.789012", "amount": 100}'
"#
);

impl TransferHbarTool {
    async fn run(&self, input: &str, ctx: &ToolContext) -> Result<String, ToolError> {
        let params: TransferHbarParams = params::parse(input)?;
        let amount = params::required(params.amount, "amount")?;
        let amount = Hbar::from_display(&amount).map_err(|e| ToolError::invalid("amount", e))?;

        let result = self
            .kit
            .transfer_hbar(params.to_account_id, amount, ctx.is_custodial)
            .await?;
        Ok(result.stringified_response())
    }
}

#[cfg(test)]
mod tests {
    use base64ct::{Base64, Encoding};
    use serde_json::Value;

    use super::*;
    use crate::{
        ledger::{Transaction, TransactionBody},
        test_support::{stub_kit, StubLedgerClient, USER},
        tools::Tool,
    };

    #[tokio::test]
    async fn test_transfer_keeps_receipt_status_casing() {
        let (kit, client) = stub_kit(StubLedgerClient::new(), "http://127.0.0.1:9");
        let tool = TransferHbarTool::new(kit);

        let output: Value = serde_json::from_str(
            &tool
                .call(
                    r#"{"toAccountId":"0.0.789012","amount":1.5}"#,
                    &ToolContext::custodial(true),
                )
                .await,
        )
        .unwrap();
        assert_eq!(output["status"], "SUCCESS");
        assert_eq!(output["message"], "HBAR transferred");

        match client.executed()[0].body() {
            TransactionBody::CryptoTransfer { hbar_transfers, .. } => {
                assert_eq!(hbar_transfers[1].account_id, AccountId::new(0, 0, 789012));
                assert_eq!(hbar_transfers[1].amount, 150_000_000);
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transfer_without_mode_returns_bytes() {
        let (kit, client) = stub_kit(StubLedgerClient::new(), "http://127.0.0.1:9");
        let tool = TransferHbarTool::new(kit);

        let output: Value = serde_json::from_str(
            &tool
                .call(
                    r#"{"toAccountId":"0.0.789012","amount":1}"#,
                    &ToolContext::default(),
                )
                .await,
        )
        .unwrap();
        assert_eq!(output["status"], "success");
        assert!(client.executed().is_empty());

        let bytes = Base64::decode_vec(output["txBytes"].as_str().unwrap()).unwrap();
        let tx = Transaction::from_bytes(&bytes).unwrap();
        assert_eq!(tx.transaction_id().unwrap().account_id, USER);
    }

    #[tokio::test]
    async fn test_transfer_accepts_exponent_amounts() {
        let (kit, client) = stub_kit(StubLedgerClient::new(), "http://127.0.0.1:9");
        let tool = TransferHbarTool::new(kit);

        let output: Value = serde_json::from_str(
            &tool
                .call(
                    r#"{"toAccountId":"0.0.789012","amount":1e-7}"#,
                    &ToolContext::custodial(true),
                )
                .await,
        )
        .unwrap();
        assert_eq!(output["status"], "SUCCESS");

        match client.executed()[0].body() {
            TransactionBody::CryptoTransfer { hbar_transfers, .. } => {
                assert_eq!(hbar_transfers[1].amount, 10);
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transfer_rejects_bad_amount() {
        let (kit, _client) = stub_kit(StubLedgerClient::new(), "http://127.0.0.1:9");
        let tool = TransferHbarTool::new(kit);

        let output: Value = serde_json::from_str(
            &tool
                .call(
                    r#"{"toAccountId":"0.0.789012","amount":"lots"}"#,
                    &ToolContext::default(),
                )
                .await,
        )
        .unwrap();
        assert_eq!(output["code"], "INVALID_PARAMETER");
    }

    #[tokio::test]
    async fn test_balance_of_connected_account() {
        let mut server = mockito::Server::new_async().await;
        let _balance = server
            .mock("GET", "/api/v1/balances")
            .match_query(mockito::Matcher::UrlEncoded(
                "account.id".into(),
                "0.0.5005".into(),
            ))
            .with_status(200)
            .with_body(
                json!({"balances": [{"account": "0.0.5005", "balance": 250_000_000u64, "tokens": []}]})
                    .to_string(),
            )
            .create_async()
            .await;
        let (kit, _client) = stub_kit(StubLedgerClient::new(), &server.url());
        let tool = GetHbarBalanceTool::new(kit);

        let output: Value =
            serde_json::from_str(&tool.call("", &ToolContext::default()).await).unwrap();
        assert_eq!(
            output,
            json!({"status": "success", "balance": "2.5", "unit": "HBAR"})
        );
    }
}
