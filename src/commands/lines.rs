// Copyright (c) 2026 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::groups::acting_user;
use crate::ledger::transactions::{self, LinePatch};
use crate::models::EntrySign;
use crate::utils::{fmt_money, parse_decimal};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let user = acting_user(conn, sub)?;
            let tx_id = *sub.get_one::<i64>("tx").unwrap();
            let account_id = *sub.get_one::<i64>("account").unwrap();
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            let entry = EntrySign::parse(sub.get_one::<String>("type").unwrap())?;
            let comment = sub.get_one::<String>("comment").map(|s| s.as_str());
            let account =
                transactions::add_line(conn, user, tx_id, account_id, amount, entry, comment)?;
            println!(
                "Posted {} {} against '{}'; closing amount now {}",
                entry.as_str(),
                fmt_money(&amount),
                account.name,
                fmt_money(&account.closing_amount)
            );
        }
        Some(("update", sub)) => {
            let user = acting_user(conn, sub)?;
            let id = *sub.get_one::<i64>("id").unwrap();
            let patch = LinePatch {
                amount: sub
                    .get_one::<String>("amount")
                    .map(|s| parse_decimal(s))
                    .transpose()?,
                entry_type: sub
                    .get_one::<String>("type")
                    .map(|s| EntrySign::parse(s))
                    .transpose()?,
                comment: sub.get_one::<String>("comment").cloned(),
                account_id: sub.get_one::<i64>("account").copied(),
            };
            let rebalanced = transactions::update_line(conn, user, id, patch)?;
            println!("Updated line {}", id);
            for account in rebalanced {
                println!(
                    "  {} now closes at {}",
                    account.name,
                    fmt_money(&account.closing_amount)
                );
            }
        }
        Some(("rm", sub)) => {
            let user = acting_user(conn, sub)?;
            let id = *sub.get_one::<i64>("id").unwrap();
            let account = transactions::delete_line(conn, user, id)?;
            println!(
                "Removed line {}; '{}' now closes at {}",
                id,
                account.name,
                fmt_money(&account.closing_amount)
            );
        }
        _ => {}
    }
    Ok(())
}
