// Copyright (c) 2026 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.tallybook", "Tallybook", "tallybook"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("tallybook.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    open_at(&db_path()?)
}

pub fn open_at(path: &Path) -> Result<Connection> {
    let mut conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    seed_categories(&conn)?;
    Ok(conn)
}

/// In-memory database with the full schema and category seed, for tests.
pub fn open_in_memory() -> Result<Connection> {
    let mut conn = Connection::open_in_memory()?;
    init_schema(&mut conn)?;
    seed_categories(&conn)?;
    Ok(conn)
}

fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS users(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        role TEXT NOT NULL DEFAULT 'USER' CHECK(role IN ('ADMIN','USER')),
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS categories(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        sign TEXT NOT NULL CHECK(sign IN ('DEBIT','CREDIT'))
    );

    -- Exactly one of parent_id/category_id is set: top-level groups anchor
    -- to a category, nested groups to their parent.
    CREATE TABLE IF NOT EXISTS account_groups(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        owner_id INTEGER NOT NULL,
        parent_id INTEGER,
        category_id INTEGER,
        FOREIGN KEY(owner_id) REFERENCES users(id) ON DELETE CASCADE,
        FOREIGN KEY(parent_id) REFERENCES account_groups(id) ON DELETE CASCADE,
        FOREIGN KEY(category_id) REFERENCES categories(id),
        CHECK((parent_id IS NULL) <> (category_id IS NULL))
    );
    CREATE INDEX IF NOT EXISTS idx_groups_parent ON account_groups(parent_id);
    CREATE INDEX IF NOT EXISTS idx_groups_owner ON account_groups(owner_id);

    CREATE TABLE IF NOT EXISTS master_accounts(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        group_id INTEGER NOT NULL,
        opening_amount TEXT NOT NULL,
        closing_amount TEXT NOT NULL,
        FOREIGN KEY(group_id) REFERENCES account_groups(id) ON DELETE CASCADE
    );
    CREATE INDEX IF NOT EXISTS idx_accounts_group ON master_accounts(group_id);

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        owner_id INTEGER NOT NULL,
        date TEXT NOT NULL,
        description TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(owner_id) REFERENCES users(id) ON DELETE CASCADE
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_owner ON transactions(owner_id);

    CREATE TABLE IF NOT EXISTS transaction_lines(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        transaction_id INTEGER NOT NULL,
        account_id INTEGER NOT NULL,
        amount TEXT NOT NULL,
        entry_type TEXT NOT NULL CHECK(entry_type IN ('DEBIT','CREDIT')),
        comment TEXT,
        FOREIGN KEY(transaction_id) REFERENCES transactions(id) ON DELETE CASCADE,
        FOREIGN KEY(account_id) REFERENCES master_accounts(id) ON DELETE CASCADE
    );
    CREATE INDEX IF NOT EXISTS idx_lines_transaction ON transaction_lines(transaction_id);
    CREATE INDEX IF NOT EXISTS idx_lines_account ON transaction_lines(account_id);
    "#,
    )?;
    Ok(())
}

/// Insert the four root accounting categories if absent. Idempotent, so it
/// can run at every startup.
fn seed_categories(conn: &Connection) -> Result<()> {
    const SEED: &[(&str, &str)] = &[
        ("Assets", "DEBIT"),
        ("Income", "CREDIT"),
        ("Liabilities", "CREDIT"),
        ("Expenses", "DEBIT"),
    ];
    for (name, sign) in SEED {
        conn.execute(
            "INSERT INTO categories(name, sign) VALUES(?1, ?2)
             ON CONFLICT(name) DO NOTHING",
            rusqlite::params![name, sign],
        )?;
    }
    Ok(())
}
