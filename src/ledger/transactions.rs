// Copyright (c) 2026 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{params, Connection, TransactionBehavior};
use rust_decimal::Decimal;

use super::auth::{authorize, Entity};
use super::{accounts, recalc, validate_line_amount};
use crate::error::{Error, Result};
use crate::models::{EntrySign, LineView, MasterAccount, Transaction, TransactionView};

pub fn create_transaction(
    conn: &Connection,
    user_id: i64,
    date: NaiveDate,
    description: &str,
) -> Result<Transaction> {
    validate_description(description)?;
    conn.execute(
        "INSERT INTO transactions(owner_id, date, description) VALUES(?1, ?2, ?3)",
        params![user_id, date.to_string(), description],
    )?;
    Ok(Transaction {
        id: conn.last_insert_rowid(),
        owner_id: user_id,
        date,
        description: description.to_string(),
    })
}

pub fn update_transaction(
    conn: &Connection,
    user_id: i64,
    transaction_id: i64,
    date: NaiveDate,
    description: &str,
) -> Result<()> {
    validate_description(description)?;
    authorize(conn, user_id, Entity::Transaction(transaction_id))?;
    conn.execute(
        "UPDATE transactions SET date=?1, description=?2 WHERE id=?3",
        params![date.to_string(), description, transaction_id],
    )?;
    Ok(())
}

/// Delete a transaction and all of its lines, then bring every account the
/// lines touched back in balance. The affected account set is captured
/// before the cascade fires.
pub fn delete_transaction(
    conn: &mut Connection,
    user_id: i64,
    transaction_id: i64,
) -> Result<Vec<MasterAccount>> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    authorize(&tx, user_id, Entity::Transaction(transaction_id))?;
    let affected: Vec<i64> = {
        let mut stmt = tx.prepare(
            "SELECT DISTINCT account_id FROM transaction_lines WHERE transaction_id=?1",
        )?;
        let ids = stmt
            .query_map(params![transaction_id], |r| r.get(0))?
            .collect::<std::result::Result<Vec<i64>, _>>()?;
        ids
    };
    tx.execute("DELETE FROM transactions WHERE id=?1", params![transaction_id])?;
    let mut updated = Vec::new();
    for account_id in affected {
        recalc::recalculate(&tx, account_id)?;
        if let Some(account) = accounts::account_by_id(&tx, account_id)? {
            updated.push(account);
        }
    }
    tx.commit()?;
    Ok(updated)
}

pub fn list_transactions(conn: &Connection, user_id: i64) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, owner_id, date, description FROM transactions
         WHERE owner_id=?1 ORDER BY date DESC, id DESC",
    )?;
    let mut rows = stmt.query(params![user_id])?;
    let mut txns = Vec::new();
    while let Some(r) = rows.next()? {
        txns.push(Transaction {
            id: r.get(0)?,
            owner_id: r.get(1)?,
            date: parse_stored_date(&r.get::<_, String>(2)?)?,
            description: r.get(3)?,
        });
    }
    Ok(txns)
}

/// Transaction with its lines and debit/credit totals, for display.
pub fn transaction_view(
    conn: &Connection,
    user_id: i64,
    transaction_id: i64,
) -> Result<TransactionView> {
    authorize(conn, user_id, Entity::Transaction(transaction_id))?;
    let (date, description): (String, String) = conn.query_row(
        "SELECT date, description FROM transactions WHERE id=?1",
        params![transaction_id],
        |r| Ok((r.get(0)?, r.get(1)?)),
    )?;
    let mut stmt = conn.prepare(
        "SELECT l.id, l.account_id, a.name, l.amount, l.entry_type, l.comment
         FROM transaction_lines l
         JOIN master_accounts a ON l.account_id=a.id
         WHERE l.transaction_id=?1 ORDER BY l.id",
    )?;
    let mut rows = stmt.query(params![transaction_id])?;
    let mut lines = Vec::new();
    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;
    while let Some(r) = rows.next()? {
        let amount = super::decimal_from_sql(&r.get::<_, String>(3)?)?;
        let entry_type = EntrySign::parse(&r.get::<_, String>(4)?)?;
        match entry_type {
            EntrySign::Debit => total_debit += amount,
            EntrySign::Credit => total_credit += amount,
        }
        lines.push(LineView {
            id: r.get(0)?,
            account_id: r.get(1)?,
            account_name: r.get(2)?,
            amount,
            entry_type,
            comment: r.get(5)?,
        });
    }
    Ok(TransactionView {
        id: transaction_id,
        date: parse_stored_date(&date)?,
        description,
        total_debit,
        total_credit,
        lines,
    })
}

/// Post a line. The caller must own both the transaction and the account;
/// the two checks are independent so a caller controlling only one side is
/// rejected before anything is written.
pub fn add_line(
    conn: &mut Connection,
    user_id: i64,
    transaction_id: i64,
    account_id: i64,
    amount: Decimal,
    entry_type: EntrySign,
    comment: Option<&str>,
) -> Result<MasterAccount> {
    validate_line_amount(amount)?;
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    authorize(&tx, user_id, Entity::Transaction(transaction_id))?;
    authorize(&tx, user_id, Entity::Account(account_id))?;
    tx.execute(
        "INSERT INTO transaction_lines(transaction_id, account_id, amount, entry_type, comment)
         VALUES(?1, ?2, ?3, ?4, ?5)",
        params![
            transaction_id,
            account_id,
            amount.to_string(),
            entry_type.as_str(),
            comment
        ],
    )?;
    recalc::recalculate(&tx, account_id)?;
    let account = accounts::account_by_id(&tx, account_id)?.ok_or(Error::NotFound)?;
    tx.commit()?;
    Ok(account)
}

/// Partial update of a line; only supplied fields change.
#[derive(Debug, Default, Clone)]
pub struct LinePatch {
    pub amount: Option<Decimal>,
    pub entry_type: Option<EntrySign>,
    pub comment: Option<String>,
    pub account_id: Option<i64>,
}

/// Apply a patch to a line. Moving the line to another account rebalances
/// both the old and the new account; everything else rebalances just the
/// one the line sits on.
pub fn update_line(
    conn: &mut Connection,
    user_id: i64,
    line_id: i64,
    patch: LinePatch,
) -> Result<Vec<MasterAccount>> {
    if let Some(amount) = patch.amount {
        validate_line_amount(amount)?;
    }
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    authorize(&tx, user_id, Entity::Line(line_id))?;
    let old_account_id: i64 = tx.query_row(
        "SELECT account_id FROM transaction_lines WHERE id=?1",
        params![line_id],
        |r| r.get(0),
    )?;
    let new_account_id = patch.account_id.unwrap_or(old_account_id);
    if new_account_id != old_account_id {
        authorize(&tx, user_id, Entity::Account(new_account_id))?;
    }

    if let Some(amount) = patch.amount {
        tx.execute(
            "UPDATE transaction_lines SET amount=?1 WHERE id=?2",
            params![amount.to_string(), line_id],
        )?;
    }
    if let Some(entry_type) = patch.entry_type {
        tx.execute(
            "UPDATE transaction_lines SET entry_type=?1 WHERE id=?2",
            params![entry_type.as_str(), line_id],
        )?;
    }
    if let Some(comment) = &patch.comment {
        tx.execute(
            "UPDATE transaction_lines SET comment=?1 WHERE id=?2",
            params![comment, line_id],
        )?;
    }
    if new_account_id != old_account_id {
        tx.execute(
            "UPDATE transaction_lines SET account_id=?1 WHERE id=?2",
            params![new_account_id, line_id],
        )?;
    }

    recalc::recalculate(&tx, old_account_id)?;
    let mut updated = Vec::new();
    if let Some(account) = accounts::account_by_id(&tx, old_account_id)? {
        updated.push(account);
    }
    if new_account_id != old_account_id {
        recalc::recalculate(&tx, new_account_id)?;
        if let Some(account) = accounts::account_by_id(&tx, new_account_id)? {
            updated.push(account);
        }
    }
    tx.commit()?;
    Ok(updated)
}

pub fn delete_line(conn: &mut Connection, user_id: i64, line_id: i64) -> Result<MasterAccount> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    authorize(&tx, user_id, Entity::Line(line_id))?;
    let account_id: i64 = tx.query_row(
        "SELECT account_id FROM transaction_lines WHERE id=?1",
        params![line_id],
        |r| r.get(0),
    )?;
    tx.execute("DELETE FROM transaction_lines WHERE id=?1", params![line_id])?;
    recalc::recalculate(&tx, account_id)?;
    let account = accounts::account_by_id(&tx, account_id)?.ok_or(Error::NotFound)?;
    tx.commit()?;
    Ok(account)
}

fn validate_description(description: &str) -> Result<()> {
    if description.trim().is_empty() {
        return Err(Error::validation("Description must not be empty"));
    }
    Ok(())
}

fn parse_stored_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        Error::Storage(rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            format!("invalid stored date '{}'", s).into(),
        ))
    })
}
