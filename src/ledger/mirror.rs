// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Read-only Hedera mirror node REST client.
//!
//! List endpoints are paginated: each page carries `links.next`, a path
//! relative to the mirror node root, or `null` on the last page.

use std::{collections::HashSet, time::Duration};

use chrono::DateTime;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use super::{
    ids::{AccountId, TokenId, TopicId},
    types::Network,
};

/// Page size requested from list endpoints.
pub const PAGE_LIMIT: u32 = 100;

/// Upper bound on pages followed for one listing.
pub const MAX_PAGES: usize = 1_000;

#[derive(Debug, thiserror::Error)]
pub enum MirrorNodeError {
    #[error("Invalid mirror node URL: {0}")]
    InvalidUrl(String),

    #[error("Mirror node request failed: {0}")]
    Request(String),

    #[error("Mirror node returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Failed to decode mirror node response: {0}")]
    Decode(String),

    #[error("Invalid timestamp `{0}`: expected an ISO-8601 date")]
    InvalidTimestamp(String),

    #[error("Mirror node listing exceeded {0} pages")]
    TooManyPages(usize),
}

// =============================================================================
// Response types
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
struct Links {
    next: Option<String>,
}

/// One token balance inside an account balance entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBalanceEntry {
    pub token_id: TokenId,
    pub balance: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct AccountBalanceEntry {
    balance: u64,
    #[serde(default)]
    tokens: Vec<TokenBalanceEntry>,
}

#[derive(Debug, Deserialize)]
struct AccountBalancesPage {
    #[serde(default)]
    balances: Vec<AccountBalanceEntry>,
    #[serde(default)]
    links: Links,
}

/// Balance of one account for one token, in base units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHolder {
    pub account: AccountId,
    pub balance: u64,
    #[serde(default)]
    pub decimals: u32,
}

#[derive(Debug, Deserialize)]
struct TokenHoldersPage {
    #[serde(default)]
    balances: Vec<TokenHolder>,
    #[serde(default)]
    links: Links,
}

/// Token metadata as reported by `/api/v1/tokens/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenDetails {
    pub token_id: TokenId,
    pub name: String,
    pub symbol: String,
    /// Reported as a string by the mirror node.
    pub decimals: String,
    #[serde(default, rename = "type")]
    pub token_type: Option<String>,
    #[serde(default)]
    pub total_supply: Option<String>,
    #[serde(default)]
    pub max_supply: Option<String>,
    #[serde(default)]
    pub treasury_account_id: Option<AccountId>,
    #[serde(default)]
    pub memo: Option<String>,
}

impl TokenDetails {
    pub fn decimals(&self) -> Result<u32, MirrorNodeError> {
        self.decimals.trim().parse().map_err(|_| {
            MirrorNodeError::Decode(format!(
                "token {} has non-numeric decimals `{}`",
                self.token_id, self.decimals
            ))
        })
    }
}

/// A message posted to a consensus topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicMessage {
    pub consensus_timestamp: String,
    pub message: String,
    pub sequence_number: u64,
    #[serde(default)]
    pub payer_account_id: Option<AccountId>,
    #[serde(default)]
    pub topic_id: Option<TopicId>,
    #[serde(default)]
    pub running_hash: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TopicMessagesPage {
    #[serde(default)]
    messages: Vec<TopicMessage>,
    #[serde(default)]
    links: Links,
}

/// An airdrop waiting for the receiver to claim it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingAirdrop {
    pub amount: u64,
    pub receiver_id: AccountId,
    pub sender_id: AccountId,
    pub token_id: TokenId,
    #[serde(default)]
    pub serial_number: Option<i64>,
    #[serde(default)]
    pub timestamp: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct PendingAirdropsPage {
    #[serde(default)]
    airdrops: Vec<PendingAirdrop>,
    #[serde(default)]
    links: Links,
}

/// A page of a list endpoint.
trait Page: DeserializeOwned {
    type Item;

    fn into_parts(self) -> (Vec<Self::Item>, Option<String>);
}

macro_rules! page {
    ($page:ty, $field:ident, $item:ty) => {
        impl Page for $page {
            type Item = $item;

            fn into_parts(self) -> (Vec<Self::Item>, Option<String>) {
                (self.$field, self.links.next)
            }
        }
    };
}

page!(AccountBalancesPage, balances, AccountBalanceEntry);
page!(TokenHoldersPage, balances, TokenHolder);
page!(TopicMessagesPage, messages, TopicMessage);
page!(PendingAirdropsPage, airdrops, PendingAirdrop);

// =============================================================================
// Client
// =============================================================================

/// Mirror node REST client.
#[derive(Debug, Clone)]
pub struct MirrorNodeClient {
    base_url: Url,
    http: reqwest::Client,
}

impl MirrorNodeClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, MirrorNodeError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| MirrorNodeError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(MirrorNodeError::InvalidUrl(base_url.to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MirrorNodeError::Request(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { base_url, http })
    }

    /// Client for the public mirror node of `network`.
    pub fn for_network(network: Network, timeout: Duration) -> Result<Self, MirrorNodeError> {
        Self::new(network.config().mirror_node_url, timeout)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a root-relative path (`/api/v1/...`, query allowed).
    fn resolve(&self, path: &str) -> Result<Url, MirrorNodeError> {
        let root = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{root}{path}"))
            .map_err(|e| MirrorNodeError::InvalidUrl(format!("{path}: {e}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, MirrorNodeError> {
        tracing::debug!(url = %url, "Mirror node request");

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| MirrorNodeError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "Mirror node returned an error");
            return Err(MirrorNodeError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| MirrorNodeError::Decode(e.to_string()))
    }

    /// Fetch every page starting at `first`. A `links.next` that points at
    /// an already fetched page ends the listing.
    async fn collect_pages<P: Page>(&self, first: Url) -> Result<Vec<P::Item>, MirrorNodeError> {
        let mut items = Vec::new();
        let mut seen = HashSet::new();
        let mut next = Some(first);
        let mut pages = 0usize;

        while let Some(url) = next.take() {
            if pages == MAX_PAGES {
                tracing::warn!(url = %url, pages, "Mirror node page limit reached");
                return Err(MirrorNodeError::TooManyPages(MAX_PAGES));
            }
            seen.insert(url.clone());

            let page: P = self.get_json(url).await?;
            let (batch, link) = page.into_parts();
            items.extend(batch);
            pages += 1;

            next = match link {
                Some(path) => Some(self.resolve(&path)?),
                None => None,
            };
            if let Some(url) = next.as_ref().filter(|url| seen.contains(*url)) {
                tracing::warn!(url = %url, "Mirror node repeated a page link");
                next = None;
            }
        }

        tracing::debug!(pages, items = items.len(), "Mirror node pagination complete");
        Ok(items)
    }

    /// HBAR balance of `account_id` in tinybars (0 for unknown accounts).
    pub async fn hbar_balance(&self, account_id: &AccountId) -> Result<u64, MirrorNodeError> {
        let mut url = self.resolve("/api/v1/balances")?;
        url.query_pairs_mut()
            .append_pair("account.id", &account_id.to_string());

        let page: AccountBalancesPage = self.get_json(url).await?;
        Ok(page.balances.first().map(|entry| entry.balance).unwrap_or(0))
    }

    /// Balance of `token_id` held by `account_id`, in base units.
    pub async fn token_balance(
        &self,
        token_id: &TokenId,
        account_id: &AccountId,
    ) -> Result<u64, MirrorNodeError> {
        let mut url = self.resolve(&format!("/api/v1/tokens/{token_id}/balances"))?;
        url.query_pairs_mut()
            .append_pair("account.id", &format!("eq:{account_id}"))
            .append_pair("limit", "1")
            .append_pair("order", "asc");

        let page: TokenHoldersPage = self.get_json(url).await?;
        Ok(page.balances.first().map(|holder| holder.balance).unwrap_or(0))
    }

    /// Every token balance of `account_id`, across all pages.
    pub async fn account_token_balances(
        &self,
        account_id: &AccountId,
    ) -> Result<Vec<TokenBalanceEntry>, MirrorNodeError> {
        let mut url = self.resolve("/api/v1/balances")?;
        url.query_pairs_mut()
            .append_pair("account.id", &account_id.to_string());

        let entries = self.collect_pages::<AccountBalancesPage>(url).await?;
        Ok(entries.into_iter().flat_map(|entry| entry.tokens).collect())
    }

    pub async fn token_details(&self, token_id: &TokenId) -> Result<TokenDetails, MirrorNodeError> {
        let url = self.resolve(&format!("/api/v1/tokens/{token_id}"))?;
        self.get_json(url).await
    }

    /// Holders of `token_id`. With a threshold (base units) only balances
    /// at or above it are returned; otherwise zero balances are skipped.
    pub async fn token_holders(
        &self,
        token_id: &TokenId,
        threshold: Option<u64>,
    ) -> Result<Vec<TokenHolder>, MirrorNodeError> {
        let filter = match threshold {
            Some(threshold) => format!("gte:{threshold}"),
            None => "gt:0".to_string(),
        };

        let mut url = self.resolve(&format!("/api/v1/tokens/{token_id}/balances"))?;
        url.query_pairs_mut()
            .append_pair("limit", &PAGE_LIMIT.to_string())
            .append_pair("account.balance", &filter);

        self.collect_pages::<TokenHoldersPage>(url).await
    }

    /// Raw topic information.
    pub async fn topic_info(&self, topic_id: &TopicId) -> Result<Value, MirrorNodeError> {
        let url = self.resolve(&format!("/api/v1/topics/{topic_id}"))?;
        self.get_json(url).await
    }

    /// Messages of `topic_id`, newest first. Bounds are mirror node
    /// timestamps (`seconds.nanos`), both inclusive.
    pub async fn topic_messages(
        &self,
        topic_id: &TopicId,
        lower: Option<&str>,
        upper: Option<&str>,
    ) -> Result<Vec<TopicMessage>, MirrorNodeError> {
        let mut url = self.resolve(&format!("/api/v1/topics/{topic_id}/messages"))?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("encoding", "UTF-8")
                .append_pair("limit", &PAGE_LIMIT.to_string())
                .append_pair("order", "desc");
            if let Some(lower) = lower {
                query.append_pair("timestamp", &format!("gte:{lower}"));
            }
            if let Some(upper) = upper {
                query.append_pair("timestamp", &format!("lte:{upper}"));
            }
        }

        self.collect_pages::<TopicMessagesPage>(url).await
    }

    pub async fn pending_airdrops(
        &self,
        account_id: &AccountId,
    ) -> Result<Vec<PendingAirdrop>, MirrorNodeError> {
        let url = self.resolve(&format!("/api/v1/accounts/{account_id}/airdrops/pending"))?;
        self.collect_pages::<PendingAirdropsPage>(url).await
    }
}

/// Convert an ISO-8601 date into a mirror node timestamp (`seconds.nanos`).
pub fn to_mirror_timestamp(iso: &str) -> Result<String, MirrorNodeError> {
    let parsed = DateTime::parse_from_rfc3339(iso.trim())
        .map_err(|_| MirrorNodeError::InvalidTimestamp(iso.to_string()))?;
    Ok(format!(
        "{}.{:09}",
        parsed.timestamp(),
        parsed.timestamp_subsec_nanos()
    ))
}
