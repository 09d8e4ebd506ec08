// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Conversion between display amounts ("1.5") and base units.
//!
//! HBAR has 8 decimals (1 HBAR = 100,000,000 tinybars). HTS tokens declare
//! their own decimals, which the mirror node reports per token.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of decimals of HBAR (tinybars per HBAR = 10^8).
pub const HBAR_DECIMALS: u32 = 8;

/// Largest supported decimals value; 10^19 no longer fits in `u64`.
pub const MAX_DECIMALS: u32 = 18;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Invalid amount format: `{0}`")]
    InvalidFormat(String),

    #[error("Too many decimal places (max {0})")]
    TooManyDecimals(u32),

    #[error("Unsupported decimals: {0}")]
    UnsupportedDecimals(u32),

    #[error("Amount overflow")]
    Overflow,
}

/// Parse a display amount into base units.
///
/// `"1.5"` with 8 decimals is `150_000_000`. Negative values, exponents and
/// more fractional digits than `decimals` are rejected.
pub fn to_base_units(amount: &str, decimals: u32) -> Result<u64, AmountError> {
    if decimals > MAX_DECIMALS {
        return Err(AmountError::UnsupportedDecimals(decimals));
    }

    let amount = amount.trim();
    let invalid = || AmountError::InvalidFormat(amount.to_string());

    let (whole, fraction) = match amount.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (amount, None),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() && fraction.is_none_or(str::is_empty) {
        return Err(invalid());
    }
    if !all_digits(whole) || !fraction.is_none_or(all_digits) {
        return Err(invalid());
    }

    let whole: u128 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| AmountError::Overflow)?
    };

    let fraction: u128 = match fraction {
        Some(f) if f.len() > decimals as usize => {
            return Err(AmountError::TooManyDecimals(decimals))
        }
        Some(f) if !f.is_empty() => format!("{f:0<width$}", width = decimals as usize)
            .parse()
            .map_err(|_| invalid())?,
        _ => 0,
    };

    let total = whole
        .checked_mul(10u128.pow(decimals))
        .and_then(|w| w.checked_add(fraction))
        .ok_or(AmountError::Overflow)?;

    u64::try_from(total).map_err(|_| AmountError::Overflow)
}

/// Format base units as a display amount, trimming trailing zeros.
pub fn from_base_units(amount: u64, decimals: u32) -> String {
    let decimals = decimals.min(MAX_DECIMALS);
    let divisor = 10u128.pow(decimals);
    let amount = u128::from(amount);
    let whole = amount / divisor;
    let remainder = amount % divisor;

    if remainder == 0 {
        return whole.to_string();
    }

    let fraction = format!("{remainder:0>width$}", width = decimals as usize);
    format!("{whole}.{}", fraction.trim_end_matches('0'))
}

/// Base units as the signed value used in transfer lists.
pub fn to_signed(amount: u64) -> Result<i64, AmountError> {
    i64::try_from(amount).map_err(|_| AmountError::Overflow)
}

/// An HBAR amount held in tinybars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hbar(u64);

impl Hbar {
    pub const ZERO: Hbar = Hbar(0);

    pub const fn from_tinybars(tinybars: u64) -> Self {
        Self(tinybars)
    }

    /// Parse an HBAR display amount such as `"2.5"`.
    pub fn from_display(amount: &str) -> Result<Self, AmountError> {
        to_base_units(amount, HBAR_DECIMALS).map(Self)
    }

    pub const fn to_tinybars(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Hbar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ℏ", from_base_units(self.0, HBAR_DECIMALS))
    }
}
