// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;

use super::{
    account::ApproveAssetAllowanceTool,
    hbar::{GetHbarBalanceTool, TransferHbarTool},
    hcs::{
        CreateTopicTool, DeleteTopicTool, GetTopicInfoTool, GetTopicMessagesTool,
        SubmitTopicMessageTool,
    },
    hts::{
        AirdropTokenTool, AssociateTokenTool, ClaimAirdropTool, CreateFungibleTokenTool,
        CreateNonFungibleTokenTool, DissociateTokenTool, GetAllTokenBalancesTool,
        GetHtsBalanceTool, GetPendingAirdropTool, GetTokenHoldersTool, MintFungibleTokenTool,
        MintNftTool, RejectTokenTool, TransferTokenTool,
    },
    logging::LoggingTool,
    types::{ToolContext, ToolDefinition},
};
use crate::kit::AgentKit;

/// A single-string-in, single-string-out callable for an LLM planner.
///
/// `call` never fails: errors come back as a JSON error envelope.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name(),
            description: self.description(),
        }
    }

    async fn call(&self, input: &str, ctx: &ToolContext) -> String;
}

/// Tools by name.
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<&'static str, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every ledger tool over `kit`, each wrapped in [`LoggingTool`].
    pub fn ledger_tools(kit: Arc<AgentKit>) -> Self {
        let mut registry = Self::new();
        registry.register_logged(CreateTopicTool::new(kit.clone()));
        registry.register_logged(DeleteTopicTool::new(kit.clone()));
        registry.register_logged(SubmitTopicMessageTool::new(kit.clone()));
        registry.register_logged(GetTopicInfoTool::new(kit.clone()));
        registry.register_logged(GetTopicMessagesTool::new(kit.clone()));
        registry.register_logged(GetHbarBalanceTool::new(kit.clone()));
        registry.register_logged(TransferHbarTool::new(kit.clone()));
        registry.register_logged(CreateFungibleTokenTool::new(kit.clone()));
        registry.register_logged(CreateNonFungibleTokenTool::new(kit.clone()));
        registry.register_logged(MintFungibleTokenTool::new(kit.clone()));
        registry.register_logged(MintNftTool::new(kit.clone()));
        registry.register_logged(TransferTokenTool::new(kit.clone()));
        registry.register_logged(AssociateTokenTool::new(kit.clone()));
        registry.register_logged(DissociateTokenTool::new(kit.clone()));
        registry.register_logged(AirdropTokenTool::new(kit.clone()));
        registry.register_logged(ClaimAirdropTool::new(kit.clone()));
        registry.register_logged(RejectTokenTool::new(kit.clone()));
        registry.register_logged(GetHtsBalanceTool::new(kit.clone()));
        registry.register_logged(GetAllTokenBalancesTool::new(kit.clone()));
        registry.register_logged(GetTokenHoldersTool::new(kit.clone()));
        registry.register_logged(GetPendingAirdropTool::new(kit.clone()));
        registry.register_logged(ApproveAssetAllowanceTool::new(kit));

        tracing::debug!(tools = registry.len(), "Ledger tools registered");
        registry
    }

    /// Register a tool, replacing any tool with the same name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name(), tool);
    }

    fn register_logged<T: Tool + 'static>(&mut self, tool: T) {
        self.register(Arc::new(LoggingTool::new(tool)));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Tools sorted by name.
    pub fn list(&self) -> Vec<Arc<dyn Tool>> {
        self.tools.values().cloned().collect()
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|tool| tool.definition()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::test_support::{stub_kit, StubLedgerClient};

    fn registry() -> ToolRegistry {
        let (kit, _client) = stub_kit(StubLedgerClient::new(), "http://127.0.0.1:9");
        ToolRegistry::ledger_tools(kit)
    }

    #[test]
    fn test_ledger_tools_catalogue() {
        let registry = registry();
        assert_eq!(registry.len(), 22);

        for name in [
            "hedera_get_hbar_balance",
            "hedera_transfer_native_hbar_token",
            "hedera_create_topic",
            "hedera_delete_topic",
            "hedera_submit_topic_message",
            "hedera_get_topic_info",
            "hedera_get_topic_messages",
            "hedera_create_fungible_token",
            "hedera_create_non_fungible_token",
            "hedera_mint_fungible_token",
            "hedera_mint_nft",
            "hedera_transfer_token",
            "hedera_associate_token",
            "hedera_dissociate_token",
            "hedera_airdrop_token",
            "hedera_claim_airdrop",
            "hedera_reject_token",
            "hedera_get_hts_balance",
            "hedera_get_all_token_balances",
            "hedera_get_token_holders",
            "hedera_get_pending_airdrop",
            "hedera_approve_asset_allowance",
        ] {
            assert!(registry.get(name).is_some(), "missing tool {name}");
        }

        let definitions = registry.definitions();
        assert!(definitions.windows(2).all(|w| w[0].name < w[1].name));
        assert!(definitions.iter().all(|d| !d.description.is_empty()));
    }

    #[tokio::test]
    async fn test_every_tool_answers_garbage_with_json_error() {
        let registry = registry();

        for tool in registry.list() {
            let output = tool.call("{not json", &ToolContext::default()).await;
            let parsed: Value = serde_json::from_str(&output)
                .unwrap_or_else(|_| panic!("{} returned non-JSON: {output}", tool.name()));
            assert_eq!(parsed["status"], "error", "{}", tool.name());
            assert_eq!(parsed["code"], "PARSE_ERROR", "{}", tool.name());
        }
    }
}
