// Copyright (c) 2026 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use super::{decimal_from_sql, groups};
use crate::error::Result;
use crate::models::EntrySign;

/// Recompute and persist an account's closing amount from its opening
/// amount, its effective category's natural sign, and every line currently
/// posted against it. Deterministic in the persisted state, so running it
/// twice in a row is idempotent.
///
/// Callers invoke this inside the same immediate transaction as the line
/// mutation that made the balance stale; the write lock serializes
/// concurrent recalculations.
///
/// An account deleted out from under us is a no-op: its balance is moot.
pub fn recalculate(conn: &Connection, account_id: i64) -> Result<()> {
    let header = conn
        .query_row(
            "SELECT opening_amount, group_id FROM master_accounts WHERE id=?1",
            params![account_id],
            |r| Ok((r.get::<_, String>(0)?, r.get::<_, i64>(1)?)),
        )
        .optional()?;
    let Some((opening, group_id)) = header else {
        return Ok(());
    };
    let opening = decimal_from_sql(&opening)?;
    let natural_sign = groups::effective_category(conn, group_id)?.sign;

    let mut stmt =
        conn.prepare("SELECT amount, entry_type FROM transaction_lines WHERE account_id=?1")?;
    let mut rows = stmt.query(params![account_id])?;
    let mut net = Decimal::ZERO;
    while let Some(r) = rows.next()? {
        let amount = decimal_from_sql(&r.get::<_, String>(0)?)?;
        let entry = EntrySign::parse(&r.get::<_, String>(1)?)?;
        // A line matching the account's natural sign increases it.
        if entry == natural_sign {
            net += amount;
        } else {
            net -= amount;
        }
    }

    conn.execute(
        "UPDATE master_accounts SET closing_amount=?1 WHERE id=?2",
        params![(opening + net).to_string(), account_id],
    )?;
    Ok(())
}
