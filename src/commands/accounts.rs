// Copyright (c) 2026 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::groups::acting_user;
use crate::ledger::accounts;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let user = acting_user(conn, sub)?;
            let name = sub.get_one::<String>("name").unwrap();
            let group = *sub.get_one::<i64>("group").unwrap();
            let opening = parse_decimal(sub.get_one::<String>("opening").unwrap())?;
            let account = accounts::create_account(conn, user, name, group, opening)?;
            println!(
                "Added account '{}' (id {}) opening at {}",
                account.name,
                account.id,
                fmt_money(&account.opening_amount)
            );
        }
        Some(("update", sub)) => {
            let user = acting_user(conn, sub)?;
            let id = *sub.get_one::<i64>("id").unwrap();
            let name = sub.get_one::<String>("name").unwrap();
            let group = *sub.get_one::<i64>("group").unwrap();
            let opening = parse_decimal(sub.get_one::<String>("opening").unwrap())?;
            let account = accounts::update_account(conn, user, id, name, group, opening)?;
            println!(
                "Updated account '{}'; closing amount now {}",
                account.name,
                fmt_money(&account.closing_amount)
            );
        }
        Some(("rm", sub)) => {
            let user = acting_user(conn, sub)?;
            let id = *sub.get_one::<i64>("id").unwrap();
            accounts::delete_account(conn, user, id)?;
            println!("Removed account {}", id);
        }
        Some(("list", sub)) => {
            let user = acting_user(conn, sub)?;
            let data = accounts::list_accounts(conn, user)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .iter()
                    .map(|a| {
                        vec![
                            a.id.to_string(),
                            a.name.clone(),
                            a.group_name.clone(),
                            format!("{} ({})", a.category_name, a.category_sign.as_str()),
                            fmt_money(&a.opening_amount),
                            fmt_money(&a.closing_amount),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(
                        &["ID", "Name", "Group", "Category", "Opening", "Closing"],
                        rows
                    )
                );
            }
        }
        _ => {}
    }
    Ok(())
}
