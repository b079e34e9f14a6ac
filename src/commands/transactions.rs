// Copyright (c) 2026 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::groups::acting_user;
use crate::ledger::transactions;
use crate::utils::{fmt_money, maybe_print_json, parse_date, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let user = acting_user(conn, sub)?;
            let date = parse_date(sub.get_one::<String>("date").unwrap())?;
            let desc = sub.get_one::<String>("desc").unwrap();
            let txn = transactions::create_transaction(conn, user, date, desc)?;
            println!("Added transaction {} on {}: {}", txn.id, txn.date, txn.description);
        }
        Some(("update", sub)) => {
            let user = acting_user(conn, sub)?;
            let id = *sub.get_one::<i64>("id").unwrap();
            let date = parse_date(sub.get_one::<String>("date").unwrap())?;
            let desc = sub.get_one::<String>("desc").unwrap();
            transactions::update_transaction(conn, user, id, date, desc)?;
            println!("Updated transaction {}", id);
        }
        Some(("rm", sub)) => {
            let user = acting_user(conn, sub)?;
            let id = *sub.get_one::<i64>("id").unwrap();
            let rebalanced = transactions::delete_transaction(conn, user, id)?;
            println!("Removed transaction {}", id);
            for account in rebalanced {
                println!(
                    "  {} now closes at {}",
                    account.name,
                    fmt_money(&account.closing_amount)
                );
            }
        }
        Some(("list", sub)) => {
            let user = acting_user(conn, sub)?;
            let data = transactions::list_transactions(conn, user)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .iter()
                    .map(|t| {
                        vec![t.id.to_string(), t.date.to_string(), t.description.clone()]
                    })
                    .collect();
                println!("{}", pretty_table(&["ID", "Date", "Description"], rows));
            }
        }
        Some(("show", sub)) => {
            let user = acting_user(conn, sub)?;
            let id = *sub.get_one::<i64>("id").unwrap();
            let view = transactions::transaction_view(conn, user, id)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
                println!("Transaction {} on {}: {}", view.id, view.date, view.description);
                let rows = view
                    .lines
                    .iter()
                    .map(|l| {
                        vec![
                            l.id.to_string(),
                            l.account_name.clone(),
                            l.entry_type.as_str().to_string(),
                            fmt_money(&l.amount),
                            l.comment.clone().unwrap_or_default(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Line", "Account", "Type", "Amount", "Comment"], rows)
                );
                println!(
                    "Total debit {} / total credit {}",
                    fmt_money(&view.total_debit),
                    fmt_money(&view.total_credit)
                );
            }
        }
        _ => {}
    }
    Ok(())
}
