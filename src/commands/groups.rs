// Copyright (c) 2026 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::groups;
use crate::models::GroupAnchor;
use crate::utils::{maybe_print_json, pretty_table, require_user_role, resolve_user};
use anyhow::{bail, Context, Result};
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let user = acting_user(conn, sub)?;
            let name = sub.get_one::<String>("name").unwrap();
            let anchor = match (
                sub.get_one::<String>("category"),
                sub.get_one::<i64>("parent"),
            ) {
                (Some(cat), None) => GroupAnchor::Category(id_for_category(conn, cat)?),
                (None, Some(parent)) => GroupAnchor::Group(*parent),
                _ => bail!("Exactly one of --category or --parent is required"),
            };
            let group = groups::create_group(conn, user, name, anchor)?;
            println!("Added group '{}' (id {})", group.name, group.id);
        }
        Some(("rename", sub)) => {
            let user = acting_user(conn, sub)?;
            let id = *sub.get_one::<i64>("id").unwrap();
            let name = sub.get_one::<String>("name").unwrap();
            groups::rename_group(conn, user, id, name)?;
            println!("Renamed group {} to '{}'", id, name);
        }
        Some(("rm", sub)) => {
            let user = acting_user(conn, sub)?;
            let id = *sub.get_one::<i64>("id").unwrap();
            groups::delete_group(conn, user, id)?;
            println!("Removed group {} and its subtree", id);
        }
        Some(("list", sub)) => {
            let user = acting_user(conn, sub)?;
            let listing = GroupListing {
                categories: groups::list_categories(conn)?,
                groups: groups::list_groups(conn, user)?,
            };
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &listing)? {
                let cat_rows = listing
                    .categories
                    .iter()
                    .map(|c| vec![c.id.to_string(), c.name.clone(), c.sign.as_str().to_string()])
                    .collect();
                println!("{}", pretty_table(&["ID", "Category", "Sign"], cat_rows));
                let group_rows = listing
                    .groups
                    .iter()
                    .map(|g| {
                        let anchor = match g.anchor {
                            GroupAnchor::Category(id) => format!("category {}", id),
                            GroupAnchor::Group(id) => format!("group {}", id),
                        };
                        vec![g.id.to_string(), g.name.clone(), anchor]
                    })
                    .collect();
                println!("{}", pretty_table(&["ID", "Group", "Under"], group_rows));
            }
        }
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct GroupListing {
    categories: Vec<crate::models::Category>,
    groups: Vec<crate::models::AccountGroup>,
}

pub(crate) fn acting_user(conn: &Connection, sub: &clap::ArgMatches) -> Result<i64> {
    let user = resolve_user(conn, sub.get_one::<String>("user").unwrap())?;
    require_user_role(&user)?;
    Ok(user.id)
}

fn id_for_category(conn: &Connection, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM categories WHERE name=?1 COLLATE NOCASE")?;
    let id: i64 = stmt
        .query_row(rusqlite::params![name], |r| r.get(0))
        .with_context(|| format!("Category '{}' not found", name))?;
    Ok(id)
}
