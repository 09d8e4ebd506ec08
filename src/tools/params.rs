// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Tool parameters.
//!
//! Each tool declares a `#[derive(Deserialize)]` params struct and parses
//! the JSON object it receives with [`parse`]. Content strings reach the
//! ledger exactly as given; only ids and amounts are trimmed while parsing.

use serde::{de, de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::{Map, Value};

use super::types::ToolError;

/// Parse `raw` into `T`.
///
/// Blank input counts as `{}`. Top-level `null` and `""` values count as
/// absent, so an optional parameter sent empty is `None` and a required
/// one is reported missing.
pub fn parse<T: DeserializeOwned>(raw: &str) -> Result<T, ToolError> {
    let raw = raw.trim();
    let mut params = if raw.is_empty() {
        Map::new()
    } else {
        match serde_json::from_str(raw) {
            Ok(Value::Object(map)) => map,
            _ => return Err(ToolError::Parse),
        }
    };

    params.retain(|_, value| match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    });
    serde_json::from_value(Value::Object(params)).map_err(ToolError::from)
}

/// `value`, or [`ToolError::MissingParameter`] naming `name`.
pub fn required<T>(value: Option<T>, name: &str) -> Result<T, ToolError> {
    value.ok_or_else(|| ToolError::MissingParameter(name.to_string()))
}

/// Decimal amount given as a JSON number or string, kept as text for exact
/// unit conversion. Floats are written out in full, never in exponent form.
pub fn amount<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Value::Number(n)) => {
            if let Some(whole) = n.as_u64() {
                Ok(Some(whole.to_string()))
            } else if let Some(negative) = n.as_i64() {
                Ok(Some(negative.to_string()))
            } else {
                match n.as_f64() {
                    Some(float) if float.is_finite() => Ok(Some(format!("{float}"))),
                    _ => Err(de::Error::custom(format!("unsupported amount `{n}`"))),
                }
            }
        }
        Some(Value::String(s)) => Ok(Some(s.trim().to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected an amount as a number or string, got `{other}`"
        ))),
    }
}

/// Non-negative integer given as a JSON number or string.
pub fn whole_number<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let invalid = |raw: &dyn std::fmt::Display| -> D::Error {
        de::Error::custom(format!("expected a non-negative integer, got `{raw}`"))
    };

    match Option::<Value>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Value::Number(n)) => n.as_u64().map(Some).ok_or_else(|| invalid(&n)),
        Some(Value::String(s)) => s.trim().parse().map(Some).map_err(|_| invalid(&s)),
        Some(other) => Err(invalid(&other)),
    }
}
