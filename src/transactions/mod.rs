// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transaction strategies and the builder that executes them.

pub mod builder;
pub mod strategies;
pub mod strategy;

pub use builder::TransactionBuilder;
pub use strategy::{
    CreatedToken, CreatedTopic, ExecutedTransaction, SubmittedMessage, TransactionStrategy,
};
