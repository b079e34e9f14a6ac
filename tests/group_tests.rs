// Copyright (c) 2026 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use rust_decimal::Decimal;
use tallybook::db;
use tallybook::error::Error;
use tallybook::ledger::{accounts, groups, transactions, users};
use tallybook::models::{EntrySign, GroupAnchor, Role};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn category_id(conn: &Connection, name: &str) -> i64 {
    groups::list_categories(conn)
        .unwrap()
        .into_iter()
        .find(|c| c.name == name)
        .unwrap()
        .id
}

fn setup() -> (Connection, i64) {
    let conn = db::open_in_memory().unwrap();
    let user = users::create_user(&conn, "alice", Role::User).unwrap();
    (conn, user.id)
}

#[test]
fn categories_are_seeded_with_natural_signs() {
    let (conn, _) = setup();
    let cats = groups::list_categories(&conn).unwrap();
    let sign_of = |name: &str| cats.iter().find(|c| c.name == name).unwrap().sign;
    assert_eq!(cats.len(), 4);
    assert_eq!(sign_of("Assets"), EntrySign::Debit);
    assert_eq!(sign_of("Expenses"), EntrySign::Debit);
    assert_eq!(sign_of("Income"), EntrySign::Credit);
    assert_eq!(sign_of("Liabilities"), EntrySign::Credit);
}

#[test]
fn create_requires_existing_anchor() {
    let (mut conn, user) = setup();
    let err = groups::create_group(&mut conn, user, "Ghost", GroupAnchor::Category(999))
        .unwrap_err();
    assert!(matches!(err, Error::NotFound));
    let err = groups::create_group(&mut conn, user, "Orphan", GroupAnchor::Group(999)).unwrap_err();
    assert!(matches!(err, Error::NotFound));
    assert!(groups::list_groups(&conn, user).unwrap().is_empty());
}

#[test]
fn name_validation() {
    let (mut conn, user) = setup();
    let assets = category_id(&conn, "Assets");
    assert!(matches!(
        groups::create_group(&mut conn, user, "", GroupAnchor::Category(assets)).unwrap_err(),
        Error::Validation(_)
    ));
    let long = "g".repeat(257);
    assert!(matches!(
        groups::create_group(&mut conn, user, &long, GroupAnchor::Category(assets)).unwrap_err(),
        Error::Validation(_)
    ));

    let g = groups::create_group(&mut conn, user, "Fine", GroupAnchor::Category(assets)).unwrap();
    assert!(matches!(
        groups::rename_group(&conn, user, g.id, "").unwrap_err(),
        Error::Validation(_)
    ));
    groups::rename_group(&conn, user, g.id, "Renamed").unwrap();
    let listed = groups::list_groups(&conn, user).unwrap();
    assert_eq!(listed[0].name, "Renamed");
}

#[test]
fn effective_category_walks_to_the_root() {
    let (mut conn, user) = setup();
    let liabilities = category_id(&conn, "Liabilities");
    let top = groups::create_group(&mut conn, user, "Debts", GroupAnchor::Category(liabilities))
        .unwrap();
    let nested = groups::create_group(&mut conn, user, "Cards", GroupAnchor::Group(top.id)).unwrap();
    let deeper =
        groups::create_group(&mut conn, user, "Visa", GroupAnchor::Group(nested.id)).unwrap();

    let cat = groups::effective_category(&conn, deeper.id).unwrap();
    assert_eq!(cat.id, liabilities);
    assert_eq!(cat.sign, EntrySign::Credit);
    assert_eq!(nested.parent_id(), Some(top.id));
    assert_eq!(top.category_id(), Some(liabilities));
}

#[test]
fn delete_cascades_through_subtree_accounts_and_lines() {
    // A group with two nested subgroups and three accounts across the
    // hierarchy: deleting the root removes everything, including lines.
    let (mut conn, user) = setup();
    let assets = category_id(&conn, "Assets");
    let root = groups::create_group(&mut conn, user, "Everything", GroupAnchor::Category(assets))
        .unwrap();
    let sub1 = groups::create_group(&mut conn, user, "Sub1", GroupAnchor::Group(root.id)).unwrap();
    let sub2 = groups::create_group(&mut conn, user, "Sub2", GroupAnchor::Group(sub1.id)).unwrap();
    let a1 = accounts::create_account(&mut conn, user, "A1", root.id, dec("1.00")).unwrap();
    let a2 = accounts::create_account(&mut conn, user, "A2", sub1.id, dec("2.00")).unwrap();
    let a3 = accounts::create_account(&mut conn, user, "A3", sub2.id, dec("3.00")).unwrap();

    let txn = transactions::create_transaction(&conn, user, "2026-03-01".parse().unwrap(), "spread")
        .unwrap();
    for acct in [a1.id, a2.id, a3.id] {
        transactions::add_line(&mut conn, user, txn.id, acct, dec("1.00"), EntrySign::Debit, None)
            .unwrap();
    }

    groups::delete_group(&mut conn, user, root.id).unwrap();

    assert!(groups::list_groups(&conn, user).unwrap().is_empty());
    assert!(accounts::list_accounts(&conn, user).unwrap().is_empty());
    let lines: i64 = conn
        .query_row("SELECT COUNT(*) FROM transaction_lines", [], |r| r.get(0))
        .unwrap();
    assert_eq!(lines, 0);
    // The transaction itself survives; only its lines hung on the accounts.
    assert_eq!(transactions::list_transactions(&conn, user).unwrap().len(), 1);
}

#[test]
fn listing_is_flat_with_anchors() {
    let (mut conn, user) = setup();
    let expenses = category_id(&conn, "Expenses");
    let top = groups::create_group(&mut conn, user, "Spending", GroupAnchor::Category(expenses))
        .unwrap();
    groups::create_group(&mut conn, user, "Groceries", GroupAnchor::Group(top.id)).unwrap();
    let listed = groups::list_groups(&conn, user).unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].anchor, GroupAnchor::Category(expenses));
    assert_eq!(listed[1].anchor, GroupAnchor::Group(top.id));
}
