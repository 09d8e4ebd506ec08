// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Consensus Service strategies: topics and messages.

use crate::{
    ledger::{
        PublicKey, TopicId, Transaction, TransactionBody, TransactionError, TransactionReceipt,
        TransactionResponse,
    },
    transactions::strategy::{CreatedTopic, SubmittedMessage, TransactionStrategy},
};

/// Create a topic administered by `public_key`, optionally restricting
/// submissions to the same key.
#[derive(Debug, Clone)]
pub struct CreateTopicStrategy {
    memo: String,
    public_key: PublicKey,
    is_submit_key: bool,
}

impl CreateTopicStrategy {
    pub fn new(memo: impl Into<String>, public_key: PublicKey, is_submit_key: bool) -> Self {
        Self {
            memo: memo.into(),
            public_key,
            is_submit_key,
        }
    }
}

impl TransactionStrategy for CreateTopicStrategy {
    type Output = CreatedTopic;

    fn name(&self) -> &'static str {
        "create_topic"
    }

    fn build(&self) -> Transaction {
        Transaction::new(TransactionBody::TopicCreate {
            memo: Some(self.memo.clone()),
            admin_key: Some(self.public_key.clone()),
            submit_key: self.is_submit_key.then(|| self.public_key.clone()),
        })
    }

    fn format_result(
        &self,
        response: &TransactionResponse,
        receipt: &TransactionReceipt,
    ) -> Result<CreatedTopic, TransactionError> {
        let topic_id = receipt
            .topic_id
            .ok_or(TransactionError::MissingReceiptField("topicId"))?;

        Ok(CreatedTopic {
            status: receipt.status.clone(),
            tx_hash: response.transaction_id.to_string(),
            topic_id,
        })
    }
}

#[derive(Debug, Clone)]
pub struct DeleteTopicStrategy {
    topic_id: TopicId,
}

impl DeleteTopicStrategy {
    pub fn new(topic_id: TopicId) -> Self {
        Self { topic_id }
    }

    fn body(&self) -> TransactionBody {
        TransactionBody::TopicDelete {
            topic_id: self.topic_id,
        }
    }
}

executed_result!(DeleteTopicStrategy, "delete_topic");

#[derive(Debug, Clone)]
pub struct SubmitTopicMessageStrategy {
    topic_id: TopicId,
    message: String,
}

impl SubmitTopicMessageStrategy {
    pub fn new(topic_id: TopicId, message: impl Into<String>) -> Self {
        Self {
            topic_id,
            message: message.into(),
        }
    }
}

impl TransactionStrategy for SubmitTopicMessageStrategy {
    type Output = SubmittedMessage;

    fn name(&self) -> &'static str {
        "submit_topic_message"
    }

    fn build(&self) -> Transaction {
        Transaction::new(TransactionBody::TopicMessageSubmit {
            topic_id: self.topic_id,
            message: self.message.clone(),
        })
    }

    fn format_result(
        &self,
        response: &TransactionResponse,
        receipt: &TransactionReceipt,
    ) -> Result<SubmittedMessage, TransactionError> {
        Ok(SubmittedMessage {
            status: receipt.status.clone(),
            tx_hash: response.transaction_id.to_string(),
            topic_id: self.topic_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ledger::{AccountId, TransactionId},
        test_support::test_key,
    };

    fn response() -> TransactionResponse {
        TransactionResponse {
            transaction_id: TransactionId::generate(AccountId::new(0, 0, 1001)),
            node_id: AccountId::new(0, 0, 3),
        }
    }

    #[test]
    fn test_create_topic_keys() {
        let key = test_key().public_key();

        let open = CreateTopicStrategy::new("open", key.clone(), false).build();
        match open.body() {
            TransactionBody::TopicCreate {
                memo,
                admin_key,
                submit_key,
            } => {
                assert_eq!(memo.as_deref(), Some("open"));
                assert_eq!(admin_key.as_ref(), Some(&key));
                assert!(submit_key.is_none());
            }
            other => panic!("unexpected body: {other:?}"),
        }

        let gated = CreateTopicStrategy::new("gated", key.clone(), true).build();
        assert!(matches!(
            gated.body(),
            TransactionBody::TopicCreate { submit_key: Some(k), .. } if *k == key
        ));
    }

    #[test]
    fn test_create_topic_result() {
        let strategy = CreateTopicStrategy::new("memo", test_key().public_key(), false);
        let response = response();
        let mut receipt = TransactionReceipt::with_status("SUCCESS");
        receipt.topic_id = Some(TopicId::new(0, 0, 5005));

        let output = strategy.format_result(&response, &receipt).unwrap();
        assert_eq!(output.topic_id, TopicId::new(0, 0, 5005));
        assert_eq!(output.tx_hash, response.transaction_id.to_string());
        assert_eq!(output.status, "SUCCESS");
    }

    #[test]
    fn test_submit_message_echoes_topic() {
        let topic = TopicId::new(0, 0, 123456);
        let strategy = SubmitTopicMessageStrategy::new(topic, "hello");
        assert_eq!(
            strategy.build().body(),
            &TransactionBody::TopicMessageSubmit {
                topic_id: topic,
                message: "hello".to_string()
            }
        );

        let output = strategy
            .format_result(&response(), &TransactionReceipt::with_status("SUCCESS"))
            .unwrap();
        assert_eq!(output.topic_id, topic);
    }

    #[test]
    fn test_delete_topic_body() {
        let topic = TopicId::new(0, 0, 77);
        assert_eq!(
            DeleteTopicStrategy::new(topic).build().body(),
            &TransactionBody::TopicDelete { topic_id: topic }
        );
    }
}
