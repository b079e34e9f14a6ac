// Copyright (c) 2026 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

use super::auth::{authorize, Entity};
use super::validate_name;
use crate::error::{Error, Result};
use crate::models::{AccountGroup, Category, EntrySign, GroupAnchor};

/// Create a group anchored either to a root category (top-level) or to an
/// existing group of the same owner (nested). The parent must already exist,
/// which keeps the tree acyclic by construction.
pub fn create_group(
    conn: &mut Connection,
    user_id: i64,
    name: &str,
    anchor: GroupAnchor,
) -> Result<AccountGroup> {
    validate_name(name)?;
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    match anchor {
        GroupAnchor::Category(category_id) => {
            let exists: bool = tx.query_row(
                "SELECT EXISTS(SELECT 1 FROM categories WHERE id=?1)",
                params![category_id],
                |r| r.get(0),
            )?;
            if !exists {
                return Err(Error::NotFound);
            }
            tx.execute(
                "INSERT INTO account_groups(name, owner_id, category_id) VALUES(?1, ?2, ?3)",
                params![name, user_id, category_id],
            )?;
        }
        GroupAnchor::Group(parent_id) => {
            authorize(&tx, user_id, Entity::Group(parent_id))?;
            tx.execute(
                "INSERT INTO account_groups(name, owner_id, parent_id) VALUES(?1, ?2, ?3)",
                params![name, user_id, parent_id],
            )?;
        }
    }
    let id = tx.last_insert_rowid();
    tx.commit()?;
    Ok(AccountGroup {
        id,
        name: name.to_string(),
        owner_id: user_id,
        anchor,
    })
}

pub fn rename_group(conn: &Connection, user_id: i64, group_id: i64, new_name: &str) -> Result<()> {
    validate_name(new_name)?;
    authorize(conn, user_id, Entity::Group(group_id))?;
    conn.execute(
        "UPDATE account_groups SET name=?1 WHERE id=?2",
        params![new_name, group_id],
    )?;
    Ok(())
}

/// Delete a group and, through the self-referential cascade, every
/// descendant group, every master account anchored in the subtree, and
/// every line posted against those accounts. A line only ever touches its
/// own account, so no surviving balance needs recalculating.
pub fn delete_group(conn: &mut Connection, user_id: i64, group_id: i64) -> Result<()> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    authorize(&tx, user_id, Entity::Group(group_id))?;
    tx.execute("DELETE FROM account_groups WHERE id=?1", params![group_id])?;
    tx.commit()?;
    Ok(())
}

/// Flat listing; callers rebuild the tree from the anchors.
pub fn list_groups(conn: &Connection, user_id: i64) -> Result<Vec<AccountGroup>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, owner_id, parent_id, category_id
         FROM account_groups WHERE owner_id=?1 ORDER BY id",
    )?;
    let mut rows = stmt.query(params![user_id])?;
    let mut groups = Vec::new();
    while let Some(r) = rows.next()? {
        groups.push(group_from_row(
            r.get(0)?,
            r.get(1)?,
            r.get(2)?,
            r.get(3)?,
            r.get(4)?,
        )?);
    }
    Ok(groups)
}

pub fn list_categories(conn: &Connection) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare("SELECT id, name, sign FROM categories ORDER BY id")?;
    let mut rows = stmt.query([])?;
    let mut cats = Vec::new();
    while let Some(r) = rows.next()? {
        cats.push(Category {
            id: r.get(0)?,
            name: r.get(1)?,
            sign: EntrySign::parse(&r.get::<_, String>(2)?)?,
        });
    }
    Ok(cats)
}

/// Resolve the root category a group transitively hangs under by walking
/// parent links. Terminates because every chain ends in a category anchor.
pub fn effective_category(conn: &Connection, group_id: i64) -> Result<Category> {
    let mut current = group_id;
    loop {
        let row = conn
            .query_row(
                "SELECT parent_id, category_id FROM account_groups WHERE id=?1",
                params![current],
                |r| {
                    Ok((
                        r.get::<_, Option<i64>>(0)?,
                        r.get::<_, Option<i64>>(1)?,
                    ))
                },
            )
            .optional()?;
        let Some((parent_id, category_id)) = row else {
            return Err(Error::NotFound);
        };
        if let Some(category_id) = category_id {
            let cat = conn
                .query_row(
                    "SELECT id, name, sign FROM categories WHERE id=?1",
                    params![category_id],
                    |r| {
                        Ok((
                            r.get::<_, i64>(0)?,
                            r.get::<_, String>(1)?,
                            r.get::<_, String>(2)?,
                        ))
                    },
                )
                .optional()?;
            let Some((id, name, sign)) = cat else {
                return Err(Error::NotFound);
            };
            return Ok(Category {
                id,
                name,
                sign: EntrySign::parse(&sign)?,
            });
        }
        match parent_id {
            Some(parent_id) => current = parent_id,
            // The schema CHECK guarantees one anchor is set.
            None => return Err(Error::NotFound),
        }
    }
}

pub(crate) fn group_from_row(
    id: i64,
    name: String,
    owner_id: i64,
    parent_id: Option<i64>,
    category_id: Option<i64>,
) -> Result<AccountGroup> {
    let anchor = match (parent_id, category_id) {
        (Some(parent), None) => GroupAnchor::Group(parent),
        (None, Some(category)) => GroupAnchor::Category(category),
        _ => {
            return Err(Error::Storage(rusqlite::Error::InvalidQuery));
        }
    };
    Ok(AccountGroup {
        id,
        name,
        owner_id,
        anchor,
    })
}
