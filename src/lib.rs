// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Franky Agent Kit - Hedera transactions for LLM agents
//!
//! This crate builds Hedera transactions through per-operation strategies
//! and either signs and executes them with the operator key (custodial) or
//! returns frozen, unsigned bytes for the user to sign (non-custodial).
//! Every operation is also exposed as a JSON-in / JSON-out tool.
//!
//! ## Modules
//!
//! - `ledger` - Ids, amounts, keys, transactions, relay and mirror node clients
//! - `transactions` - Strategies and the generic transaction builder
//! - `results` - Custodial and non-custodial result types
//! - `kit` - The agent kit: one method per operation and query
//! - `tools` - LLM tool adapters, logging decorator and registry
//! - `config` - Environment configuration

pub mod config;
pub mod error;
pub mod kit;
pub mod ledger;
pub mod results;
pub mod tools;
pub mod transactions;

#[cfg(test)]
mod test_support;
