// Copyright (c) 2026 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::users;
use crate::models::Role;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let role = if sub.get_flag("admin") {
                Role::Admin
            } else {
                Role::User
            };
            let user = users::create_user(conn, name, role)?;
            println!("Added {} '{}' (id {})", role.as_str().to_lowercase(), user.name, user.id);
        }
        Some(("list", sub)) => {
            let data = users::list_users(conn)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .iter()
                    .map(|u| vec![u.id.to_string(), u.name.clone(), u.role.as_str().to_string()])
                    .collect();
                println!("{}", pretty_table(&["ID", "Name", "Role"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}
