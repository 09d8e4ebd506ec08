// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! LLM tool adapters.
//!
//! Each tool takes a JSON object as a string and returns a JSON string.
//! Failures come back as `{"status":"error","message":...,"code":...}`.

/// Declares a tool struct over the agent kit. The type provides
/// `async fn run(&self, input: &str, ctx: &ToolContext) -> Result<String, ToolError>`.
macro_rules! ledger_tool {
    ($(#[$meta:meta])* $tool:ident, $name:literal, $description:expr) => {
        $(#[$meta])*
        pub struct $tool {
            kit: std::sync::Arc<$crate::kit::AgentKit>,
        }

        impl $tool {
            pub fn new(kit: std::sync::Arc<$crate::kit::AgentKit>) -> Self {
                Self { kit }
            }
        }

        #[async_trait::async_trait]
        impl $crate::tools::registry::Tool for $tool {
            fn name(&self) -> &'static str {
                $name
            }

            fn description(&self) -> &'static str {
                $description
            }

            async fn call(&self, input: &str, ctx: &$crate::tools::types::ToolContext) -> String {
                $crate::tools::types::respond($name, self.run(input, ctx).await)
            }
        }
    };
}

pub mod account;
pub mod hbar;
pub mod hcs;
pub mod hts;
pub mod logging;
pub mod params;
pub mod registry;
pub mod types;

pub use logging::LoggingTool;
pub use registry::{Tool, ToolRegistry};
pub use types::{ToolContext, ToolDefinition, ToolError};
