// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::time::Instant;

use async_trait::async_trait;
use uuid::Uuid;

use super::{
    registry::Tool,
    types::{ToolContext, ToolDefinition},
};

/// Longest text logged verbatim.
const SUMMARY_CHARS: usize = 100;

/// Wraps a tool, logging each call with its duration and a shortened result.
pub struct LoggingTool<T> {
    inner: T,
}

impl<T: Tool> LoggingTool<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T: Tool> Tool for LoggingTool<T> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn description(&self) -> &'static str {
        self.inner.description()
    }

    fn definition(&self) -> ToolDefinition {
        self.inner.definition()
    }

    async fn call(&self, input: &str, ctx: &ToolContext) -> String {
        let tool = self.inner.name();
        let call_id = Uuid::new_v4();
        let started = Instant::now();

        tracing::info!(
            tool,
            %call_id,
            custodial = ?ctx.is_custodial,
            input = %summarize(input),
            "Tool called"
        );

        let output = self.inner.call(input, ctx).await;

        tracing::info!(
            tool,
            %call_id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            result = %summarize(&output),
            "Tool finished"
        );

        output
    }
}

/// `text` itself, or its first 100 characters plus `... (N chars)`.
pub fn summarize(text: &str) -> String {
    let total = text.chars().count();
    if total <= SUMMARY_CHARS {
        return text.to_string();
    }

    let head: String = text.chars().take(SUMMARY_CHARS).collect();
    format!("{head}... ({total} chars)")
}
