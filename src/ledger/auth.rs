// Copyright (c) 2026 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Error, Result};

/// A target of an ownership check, by kind and id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Group(i64),
    Account(i64),
    Transaction(i64),
    Line(i64),
}

/// Walk the ownership chain of `entity` and require that it terminates at
/// `user_id`. Groups and transactions carry their owner directly; accounts
/// resolve through their group, lines through their transaction.
///
/// Missing entity → `NotFound`; owned by someone else → `Forbidden`. Both
/// render identically coarse to the caller, so probing ids leaks nothing.
pub fn authorize(conn: &Connection, user_id: i64, entity: Entity) -> Result<()> {
    match owner_of(conn, entity)? {
        None => Err(Error::NotFound),
        Some(owner) if owner == user_id => Ok(()),
        Some(_) => Err(Error::Forbidden),
    }
}

fn owner_of(conn: &Connection, entity: Entity) -> Result<Option<i64>> {
    let (sql, id) = match entity {
        Entity::Group(id) => ("SELECT owner_id FROM account_groups WHERE id=?1", id),
        Entity::Account(id) => (
            "SELECT g.owner_id FROM master_accounts a
             JOIN account_groups g ON a.group_id=g.id WHERE a.id=?1",
            id,
        ),
        Entity::Transaction(id) => ("SELECT owner_id FROM transactions WHERE id=?1", id),
        Entity::Line(id) => (
            "SELECT t.owner_id FROM transaction_lines l
             JOIN transactions t ON l.transaction_id=t.id WHERE l.id=?1",
            id,
        ),
    };
    Ok(conn.query_row(sql, params![id], |r| r.get(0)).optional()?)
}
