// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use serde::Deserialize;

use super::{
    params,
    types::{ToolContext, ToolError},
};
use crate::ledger::{AccountId, TokenId};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AllowanceParams {
    spender_account_id: AccountId,
    #[serde(default, deserialize_with = "params::amount")]
    amount: Option<String>,
    token_id: Option<TokenId>,
}

ledger_tool!(
    ApproveAssetAllowanceTool,
    "hedera_approve_asset_allowance",
    r#"Approve an allowance of HBAR or fungible tokens for a spender on Hedera
Inputs (input is a JSON string):
spenderAccountId: string, the account ID allowed to spend e.g. 0.0.789012,
amount: number, the allowance in display unit e.g. 12.5,
tokenId: string, optional, the token to approve e.g. 0.0.123456, HBAR if not passed
Example usage:
1. Allow 0.0.789012 to spend 10 HBAR:
  '{"spenderAccountId": "0.0.789012", "amount": 10}'
2. Allow 0.0.789012 to spend 12.5 of token 0.0.123456:
  '{"spenderAccountId": "0.0.789012", "amount": 12.5, "tokenId": "0.0.123456"}'
"#
);

impl ApproveAssetAllowanceTool {
    async fn run(&self, input: &str, ctx: &ToolContext) -> Result<String, ToolError> {
        let params: AllowanceParams = params::parse(input)?;
        let amount = params::required(params.amount, "amount")?;

        let amount = self.kit.asset_base_units(params.token_id, &amount).await?;
        let result = self
            .kit
            .approve_asset_allowance(
                params.spender_account_id,
                amount,
                params.token_id,
                ctx.is_custodial,
            )
            .await?;
        Ok(result.stringified_response())
    }
}
