// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::fmt;

use serde::Serialize;
use serde_json::json;

use crate::error::KitError;

/// Per-call settings supplied by the tool-calling harness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToolContext {
    /// Signing mode for this call; `None` uses the kit default.
    pub is_custodial: Option<bool>,
}

impl ToolContext {
    pub fn custodial(is_custodial: bool) -> Self {
        Self {
            is_custodial: Some(is_custodial),
        }
    }
}

/// What the LLM planner sees of a tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Invalid JSON input")]
    Parse,

    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Kit(#[from] KitError),
}

impl ToolError {
    pub fn invalid(name: &str, reason: impl fmt::Display) -> Self {
        Self::InvalidParameter(format!("{name}: {reason}"))
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Parse => "PARSE_ERROR",
            Self::MissingParameter(_) => "MISSING_PARAMETER",
            Self::InvalidParameter(_) => "INVALID_PARAMETER",
            Self::Kit(err) => err.code(),
        }
    }

    /// `{"status":"error","message":...,"code":...}`
    pub fn to_envelope(&self) -> String {
        json!({
            "status": "error",
            "message": self.to_string(),
            "code": self.code(),
        })
        .to_string()
    }
}

/// Params deserialization failures. serde reports an absent field as
/// ``missing field `name` ``.
impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        let message = err.to_string();
        match message
            .strip_prefix("missing field `")
            .and_then(|rest| rest.strip_suffix('`'))
        {
            Some(name) => Self::MissingParameter(name.to_string()),
            None => Self::InvalidParameter(message),
        }
    }
}

/// Collapse a tool outcome into the string returned to the harness.
pub(crate) fn respond(tool: &'static str, outcome: Result<String, ToolError>) -> String {
    outcome.unwrap_or_else(|err| {
        tracing::warn!(tool, code = err.code(), error = %err, "Tool call failed");
        err.to_envelope()
    })
}
