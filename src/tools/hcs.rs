// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Consensus Service tools.

use serde::Deserialize;
use serde_json::json;

use super::{
    params,
    types::{ToolContext, ToolError},
};
use crate::ledger::TopicId;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTopicParams {
    name: String,
    #[serde(default)]
    is_submit_key: bool,
}

/// Params of the tools that address one topic.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TopicParams {
    topic_id: TopicId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitMessageParams {
    topic_id: TopicId,
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TopicMessagesParams {
    topic_id: TopicId,
    lower_threshold: Option<String>,
    upper_threshold: Option<String>,
}

ledger_tool!(
    CreateTopicTool,
    "hedera_create_topic",
    r#"Create a topic on Hedera
Inputs (input is a JSON string):
name: string, the name of the topic e.g. My Topic,
isSubmitKey: boolean, decides whether submit key should be set, false if not passed
Example usage:
1. Create a topic with memo "My Topic":
  '{"name": "My Topic", "isSubmitKey": false}'
2. Create a topic with memo "My Topic". Restrict posting with a key:
  '{"name": "My Topic", "isSubmitKey": true}'
"#
);

impl CreateTopicTool {
    async fn run(&self, input: &str, ctx: &ToolContext) -> Result<String, ToolError> {
        let params: CreateTopicParams = params::parse(input)?;

        let result = self
            .kit
            .create_topic(&params.name, params.is_submit_key, ctx.is_custodial)
            .await?;
        Ok(result.stringified_response())
    }
}

ledger_tool!(
    DeleteTopicTool,
    "hedera_delete_topic",
    r#"Delete a topic on Hedera
Inputs (input is a JSON string):
topicId: string, the ID of the topic to delete e.g. 0.0.123456,
Example usage:
1. Delete topic 0.0.123456:
  '{"topicId": "0.0.123456"}'
"#
);

impl DeleteTopicTool {
    async fn run(&self, input: &str, ctx: &ToolContext) -> Result<String, ToolError> {
        let params: TopicParams = params::parse(input)?;

        let result = self
            .kit
            .delete_topic(params.topic_id, ctx.is_custodial)
            .await?;
        Ok(result.stringified_response())
    }
}

ledger_tool!(
    SubmitTopicMessageTool,
    "hedera_submit_topic_message",
    r#"Submit a message to a topic on Hedera
Inputs (input is a JSON string):
topicId: string, the ID of the topic to submit the message to e.g. 0.0.123456,
message: string, the message to submit to the topic e.g. "Hello, Hedera!"
Example usage:
1. Submit a message to topic 0.0.123456:
  '{"topicId": "0.0.123456", "message": "Hello, Hedera!"}'
"#
);

impl SubmitTopicMessageTool {
    async fn run(&self, input: &str, ctx: &ToolContext) -> Result<String, ToolError> {
        let params: SubmitMessageParams = params::parse(input)?;

        let result = self
            .kit
            .submit_topic_message(params.topic_id, &params.message, ctx.is_custodial)
            .await?;
        Ok(result.stringified_response())
    }
}

ledger_tool!(
    GetTopicInfoTool,
    "hedera_get_topic_info",
    r#"Get information about a topic on Hedera
Inputs (input is a JSON string):
topicId: string, the ID of the topic to get the information for e.g. 0.0.123456,
Example usage:
1. Get information about topic 0.0.123456:
  '{"topicId": "0.0.123456"}'
"#
);

impl GetTopicInfoTool {
    async fn run(&self, input: &str, _ctx: &ToolContext) -> Result<String, ToolError> {
        let params: TopicParams = params::parse(input)?;

        let topic_info = self.kit.topic_info(params.topic_id).await?;
        Ok(json!({
            "status": "success",
            "message": "Topic information retrieved",
            "topicInfo": topic_info,
        })
        .to_string())
    }
}

ledger_tool!(
    GetTopicMessagesTool,
    "hedera_get_topic_messages",
    r#"Get messages from a topic on Hedera within an optional time range.
Inputs (input is a JSON string):
- topicId: string, the ID of the topic to get the messages from e.g. "0.0.123456"
- lowerThreshold: string (optional), ISO date string for the start of the time range e.g. "2025-01-02T00:00:00.000Z"
- upperThreshold: string (optional), ISO date string for the end of the time range e.g. "2025-01-20T12:50:30.123Z"
Example usage:
1. Get all messages from topic 0.0.123456:
  '{"topicId": "0.0.123456"}'
2. Get messages from topic after January 2, 2025:
  '{"topicId": "0.0.123456", "lowerThreshold": "2025-01-02T00:00:00.000Z"}'
3. Get messages between two dates:
  '{"topicId": "0.0.123456", "lowerThreshold": "2024-03-05T13:40:00.000Z", "upperThreshold": "2025-01-20T12:50:30.123Z"}'
"#
);

impl GetTopicMessagesTool {
    async fn run(&self, input: &str, _ctx: &ToolContext) -> Result<String, ToolError> {
        let params: TopicMessagesParams = params::parse(input)?;

        let messages = self
            .kit
            .topic_messages(
                params.topic_id,
                params.lower_threshold.as_deref(),
                params.upper_threshold.as_deref(),
            )
            .await?;
        Ok(json!({
            "status": "success",
            "message": "Topic messages retrieved",
            "messages": messages,
        })
        .to_string())
    }
}
