// Copyright (c) 2026 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tallybook::db;
use tallybook::ledger::{groups, users};
use tallybook::models::Role;

#[test]
fn open_at_reopens_without_reseeding() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.sqlite");

    {
        let conn = db::open_at(&path).unwrap();
        assert_eq!(groups::list_categories(&conn).unwrap().len(), 4);
        users::create_user(&conn, "alice", Role::User).unwrap();
    }

    // Second open must neither duplicate categories nor lose data.
    let conn = db::open_at(&path).unwrap();
    assert_eq!(groups::list_categories(&conn).unwrap().len(), 4);
    assert_eq!(users::list_users(&conn).unwrap().len(), 1);
}

#[test]
fn duplicate_user_name_conflicts() {
    let conn = db::open_in_memory().unwrap();
    users::create_user(&conn, "alice", Role::User).unwrap();
    assert!(matches!(
        users::create_user(&conn, "alice", Role::Admin).unwrap_err(),
        tallybook::error::Error::Conflict
    ));
}

#[test]
fn group_anchor_xor_is_enforced_by_the_schema() {
    let conn = db::open_in_memory().unwrap();
    let user = users::create_user(&conn, "alice", Role::User).unwrap();
    // Both anchors set: the CHECK rejects it before any application logic.
    let res = conn.execute(
        "INSERT INTO account_groups(name, owner_id, parent_id, category_id) VALUES('bad', ?1, 1, 1)",
        rusqlite::params![user.id],
    );
    assert!(res.is_err());
    let res = conn.execute(
        "INSERT INTO account_groups(name, owner_id) VALUES('bad', ?1)",
        rusqlite::params![user.id],
    );
    assert!(res.is_err());
}
