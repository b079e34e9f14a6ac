// Copyright (c) 2026 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use rust_decimal::Decimal;

use super::auth::{authorize, Entity};
use super::{decimal_from_sql, groups, validate_amount, validate_name};
use crate::error::{Error, Result};
use crate::models::{AccountView, MasterAccount};

pub fn create_account(
    conn: &mut Connection,
    user_id: i64,
    name: &str,
    group_id: i64,
    opening_amount: Decimal,
) -> Result<MasterAccount> {
    validate_name(name)?;
    validate_amount(opening_amount)?;
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    authorize(&tx, user_id, Entity::Group(group_id))?;
    // No lines yet, so the account opens and closes at the same amount.
    tx.execute(
        "INSERT INTO master_accounts(name, group_id, opening_amount, closing_amount)
         VALUES(?1, ?2, ?3, ?3)",
        params![name, group_id, opening_amount.to_string()],
    )?;
    let id = tx.last_insert_rowid();
    tx.commit()?;
    Ok(MasterAccount {
        id,
        name: name.to_string(),
        group_id,
        opening_amount,
        closing_amount: opening_amount,
    })
}

/// Full update of name, group, and opening amount. Changing the opening
/// amount shifts the closing amount by the same delta; the net effect of
/// the account's lines is untouched, so nothing is re-summed here.
pub fn update_account(
    conn: &mut Connection,
    user_id: i64,
    account_id: i64,
    name: &str,
    group_id: i64,
    opening_amount: Decimal,
) -> Result<MasterAccount> {
    validate_name(name)?;
    validate_amount(opening_amount)?;
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    authorize(&tx, user_id, Entity::Account(account_id))?;
    authorize(&tx, user_id, Entity::Group(group_id))?;
    let (old_opening, old_closing): (String, String) = tx.query_row(
        "SELECT opening_amount, closing_amount FROM master_accounts WHERE id=?1",
        params![account_id],
        |r| Ok((r.get(0)?, r.get(1)?)),
    )?;
    let closing =
        decimal_from_sql(&old_closing)? + opening_amount - decimal_from_sql(&old_opening)?;
    tx.execute(
        "UPDATE master_accounts SET name=?1, group_id=?2, opening_amount=?3, closing_amount=?4
         WHERE id=?5",
        params![
            name,
            group_id,
            opening_amount.to_string(),
            closing.to_string(),
            account_id
        ],
    )?;
    tx.commit()?;
    Ok(MasterAccount {
        id: account_id,
        name: name.to_string(),
        group_id,
        opening_amount,
        closing_amount: closing,
    })
}

/// Deleting an account cascades to every line posted against it. Those
/// lines affect no other account, so no recalculation follows.
pub fn delete_account(conn: &mut Connection, user_id: i64, account_id: i64) -> Result<()> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    authorize(&tx, user_id, Entity::Account(account_id))?;
    tx.execute("DELETE FROM master_accounts WHERE id=?1", params![account_id])?;
    tx.commit()?;
    Ok(())
}

pub fn get_account(conn: &Connection, user_id: i64, account_id: i64) -> Result<MasterAccount> {
    authorize(conn, user_id, Entity::Account(account_id))?;
    account_by_id(conn, account_id)?.ok_or(Error::NotFound)
}

/// Accounts whose group chain resolves to the caller, with group and
/// effective category attached for display.
pub fn list_accounts(conn: &Connection, user_id: i64) -> Result<Vec<AccountView>> {
    let mut stmt = conn.prepare(
        "SELECT a.id, a.name, a.group_id, g.name, a.opening_amount, a.closing_amount
         FROM master_accounts a
         JOIN account_groups g ON a.group_id=g.id
         WHERE g.owner_id=?1 ORDER BY a.id",
    )?;
    let mut rows = stmt.query(params![user_id])?;
    let mut views = Vec::new();
    while let Some(r) = rows.next()? {
        let group_id: i64 = r.get(2)?;
        views.push((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            group_id,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, String>(5)?,
        ));
    }
    let mut out = Vec::with_capacity(views.len());
    for (id, name, group_id, group_name, opening, closing) in views {
        let category = groups::effective_category(conn, group_id)?;
        out.push(AccountView {
            id,
            name,
            group_id,
            group_name,
            category_name: category.name,
            category_sign: category.sign,
            opening_amount: decimal_from_sql(&opening)?,
            closing_amount: decimal_from_sql(&closing)?,
        });
    }
    Ok(out)
}

/// Unauthorized fetch for internal use after a check has already passed.
pub(crate) fn account_by_id(conn: &Connection, account_id: i64) -> Result<Option<MasterAccount>> {
    let row = conn
        .query_row(
            "SELECT id, name, group_id, opening_amount, closing_amount
             FROM master_accounts WHERE id=?1",
            params![account_id],
            |r| {
                Ok((
                    r.get::<_, i64>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, i64>(2)?,
                    r.get::<_, String>(3)?,
                    r.get::<_, String>(4)?,
                ))
            },
        )
        .optional()?;
    let Some((id, name, group_id, opening, closing)) = row else {
        return Ok(None);
    };
    Ok(Some(MasterAccount {
        id,
        name,
        group_id,
        opening_amount: decimal_from_sql(&opening)?,
        closing_amount: decimal_from_sql(&closing)?,
    }))
}
