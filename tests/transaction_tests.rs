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

fn setup() -> (Connection, i64, i64, i64) {
    let mut conn = db::open_in_memory().unwrap();
    let user = users::create_user(&conn, "alice", Role::User).unwrap().id;
    let assets = groups::list_categories(&conn)
        .unwrap()
        .into_iter()
        .find(|c| c.name == "Assets")
        .unwrap()
        .id;
    let group = groups::create_group(&mut conn, user, "Banking", GroupAnchor::Category(assets))
        .unwrap()
        .id;
    let cash = accounts::create_account(&mut conn, user, "Cash", group, dec("500.00"))
        .unwrap()
        .id;
    let savings = accounts::create_account(&mut conn, user, "Savings", group, dec("500.00"))
        .unwrap()
        .id;
    (conn, user, cash, savings)
}

#[test]
fn create_and_update_transaction() {
    let (conn, user, _, _) = setup();
    let txn = transactions::create_transaction(&conn, user, "2026-05-01".parse().unwrap(), "rent")
        .unwrap();
    transactions::update_transaction(&conn, user, txn.id, "2026-05-02".parse().unwrap(), "rent may")
        .unwrap();
    let listed = transactions::list_transactions(&conn, user).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].description, "rent may");
    assert_eq!(listed[0].date.to_string(), "2026-05-02");
}

#[test]
fn empty_description_is_rejected() {
    let (conn, user, _, _) = setup();
    assert!(matches!(
        transactions::create_transaction(&conn, user, "2026-05-01".parse().unwrap(), "  ")
            .unwrap_err(),
        Error::Validation(_)
    ));
}

#[test]
fn view_totals_split_debits_and_credits() {
    let (mut conn, user, cash, savings) = setup();
    let txn = transactions::create_transaction(&conn, user, "2026-05-03".parse().unwrap(), "shift")
        .unwrap();
    transactions::add_line(&mut conn, user, txn.id, cash, dec("75.00"), EntrySign::Credit, Some("to savings"))
        .unwrap();
    transactions::add_line(&mut conn, user, txn.id, savings, dec("75.00"), EntrySign::Debit, None)
        .unwrap();

    let view = transactions::transaction_view(&conn, user, txn.id).unwrap();
    assert_eq!(view.lines.len(), 2);
    assert_eq!(view.total_debit, dec("75.00"));
    assert_eq!(view.total_credit, dec("75.00"));
    assert_eq!(
        view.lines[0].comment.as_deref(),
        Some("to savings")
    );

    // Both asset balances reflect the move.
    assert_eq!(
        accounts::get_account(&conn, user, cash).unwrap().closing_amount,
        dec("425.00")
    );
    assert_eq!(
        accounts::get_account(&conn, user, savings)
            .unwrap()
            .closing_amount,
        dec("575.00")
    );
}

#[test]
fn deleting_a_transaction_rebalances_every_touched_account() {
    let (mut conn, user, cash, savings) = setup();
    let txn = transactions::create_transaction(&conn, user, "2026-05-04".parse().unwrap(), "multi")
        .unwrap();
    transactions::add_line(&mut conn, user, txn.id, cash, dec("100.00"), EntrySign::Debit, None)
        .unwrap();
    transactions::add_line(&mut conn, user, txn.id, cash, dec("25.00"), EntrySign::Credit, None)
        .unwrap();
    transactions::add_line(&mut conn, user, txn.id, savings, dec("60.00"), EntrySign::Credit, None)
        .unwrap();
    assert_eq!(
        accounts::get_account(&conn, user, cash).unwrap().closing_amount,
        dec("575.00")
    );
    assert_eq!(
        accounts::get_account(&conn, user, savings)
            .unwrap()
            .closing_amount,
        dec("440.00")
    );

    let rebalanced = transactions::delete_transaction(&mut conn, user, txn.id).unwrap();
    assert_eq!(rebalanced.len(), 2);
    for account in rebalanced {
        assert_eq!(account.closing_amount, dec("500.00"));
    }
    assert!(transactions::list_transactions(&conn, user).unwrap().is_empty());
    let lines: i64 = conn
        .query_row("SELECT COUNT(*) FROM transaction_lines", [], |r| r.get(0))
        .unwrap();
    assert_eq!(lines, 0);
}

#[test]
fn deleting_an_account_drops_its_lines_only() {
    let (mut conn, user, cash, savings) = setup();
    let txn = transactions::create_transaction(&conn, user, "2026-05-05".parse().unwrap(), "both")
        .unwrap();
    transactions::add_line(&mut conn, user, txn.id, cash, dec("10.00"), EntrySign::Debit, None)
        .unwrap();
    transactions::add_line(&mut conn, user, txn.id, savings, dec("20.00"), EntrySign::Debit, None)
        .unwrap();

    accounts::delete_account(&mut conn, user, cash).unwrap();

    let view = transactions::transaction_view(&conn, user, txn.id).unwrap();
    assert_eq!(view.lines.len(), 1);
    assert_eq!(view.lines[0].account_id, savings);
    assert_eq!(
        accounts::get_account(&conn, user, savings)
            .unwrap()
            .closing_amount,
        dec("520.00")
    );
}

#[test]
fn partial_line_update_leaves_other_fields_alone() {
    let (mut conn, user, cash, _) = setup();
    let txn = transactions::create_transaction(&conn, user, "2026-05-06".parse().unwrap(), "p")
        .unwrap();
    transactions::add_line(&mut conn, user, txn.id, cash, dec("10.00"), EntrySign::Debit, Some("keep me"))
        .unwrap();
    let line = transactions::transaction_view(&conn, user, txn.id).unwrap().lines[0].id;

    let patch = transactions::LinePatch {
        entry_type: Some(EntrySign::Credit),
        ..Default::default()
    };
    let rebalanced = transactions::update_line(&mut conn, user, line, patch).unwrap();
    assert_eq!(rebalanced[0].closing_amount, dec("490.00"));

    let view = transactions::transaction_view(&conn, user, txn.id).unwrap();
    assert_eq!(view.lines[0].amount, dec("10.00"));
    assert_eq!(view.lines[0].entry_type, EntrySign::Credit);
    assert_eq!(view.lines[0].comment.as_deref(), Some("keep me"));
}
