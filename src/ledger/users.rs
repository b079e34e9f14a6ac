// Copyright (c) 2026 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{params, Connection};

use super::validate_name;
use crate::error::{Error, Result};
use crate::models::{Role, User};

pub fn create_user(conn: &Connection, name: &str, role: Role) -> Result<User> {
    validate_name(name)?;
    let res = conn.execute(
        "INSERT INTO users(name, role) VALUES(?1, ?2)",
        params![name, role.as_str()],
    );
    match res {
        Ok(_) => Ok(User {
            id: conn.last_insert_rowid(),
            name: name.to_string(),
            role,
        }),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(Error::Conflict)
        }
        Err(e) => Err(e.into()),
    }
}

pub fn list_users(conn: &Connection) -> Result<Vec<User>> {
    let mut stmt = conn.prepare("SELECT id, name, role FROM users ORDER BY name")?;
    let mut rows = stmt.query([])?;
    let mut users = Vec::new();
    while let Some(r) = rows.next()? {
        users.push(User {
            id: r.get(0)?,
            name: r.get(1)?,
            role: Role::parse(&r.get::<_, String>(2)?)?,
        });
    }
    Ok(users)
}
