// Copyright (c) 2026 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The ledger core: ownership-scoped operations on groups, master accounts,
//! transactions and lines, plus the closing-amount recalculation engine.
//!
//! Every mutation runs inside a single immediate SQLite transaction covering
//! authorization, the write itself, and any balance recalculation, so
//! concurrent writers cannot interleave a stale closing amount.

pub mod auth;
pub mod users;
pub mod groups;
pub mod accounts;
pub mod transactions;
pub mod recalc;

use rust_decimal::Decimal;

use crate::error::{Error, Result};

pub(crate) fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::validation("Name must not be empty"));
    }
    if name.chars().count() > 256 {
        return Err(Error::validation("Name must be at most 256 characters"));
    }
    Ok(())
}

/// Money values are fixed-point with 2 fractional digits.
pub(crate) fn validate_amount(amount: Decimal) -> Result<()> {
    if amount.normalize().scale() > 2 {
        return Err(Error::validation(
            "Amounts carry at most 2 decimal places",
        ));
    }
    Ok(())
}

pub(crate) fn validate_line_amount(amount: Decimal) -> Result<()> {
    validate_amount(amount)?;
    if amount <= Decimal::ZERO {
        return Err(Error::validation("Line amount must be greater than zero"));
    }
    Ok(())
}

/// Amounts are persisted as TEXT; a row that fails to parse is corrupt
/// storage, not caller input.
pub(crate) fn decimal_from_sql(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>().map_err(|_| {
        Error::Storage(rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            format!("invalid stored decimal '{}'", s).into(),
        ))
    })
}
