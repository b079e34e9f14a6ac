// Copyright (c) 2026 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Whether an entry (or a category's normal balance) is a debit or a credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntrySign {
    Debit,
    Credit,
}

impl EntrySign {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntrySign::Debit => "DEBIT",
            EntrySign::Credit => "CREDIT",
        }
    }

    pub fn parse(s: &str) -> Result<Self, Error> {
        match s.to_uppercase().as_str() {
            "DEBIT" => Ok(EntrySign::Debit),
            "CREDIT" => Ok(EntrySign::Credit),
            _ => Err(Error::validation(format!(
                "Invalid entry type '{}', expected DEBIT or CREDIT",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }

    pub fn parse(s: &str) -> Result<Self, Error> {
        match s.to_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "USER" => Ok(Role::User),
            _ => Err(Error::validation(format!("Invalid role '{}'", s))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub sign: EntrySign,
}

/// Where a group hangs in the tree: top-level groups anchor directly to a
/// root category, nested groups anchor to their parent group. Exactly one
/// of the two, by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupAnchor {
    Category(i64),
    Group(i64),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountGroup {
    pub id: i64,
    pub name: String,
    pub owner_id: i64,
    pub anchor: GroupAnchor,
}

impl AccountGroup {
    pub fn parent_id(&self) -> Option<i64> {
        match self.anchor {
            GroupAnchor::Group(id) => Some(id),
            GroupAnchor::Category(_) => None,
        }
    }

    pub fn category_id(&self) -> Option<i64> {
        match self.anchor {
            GroupAnchor::Category(id) => Some(id),
            GroupAnchor::Group(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterAccount {
    pub id: i64,
    pub name: String,
    pub group_id: i64,
    pub opening_amount: Decimal,
    pub closing_amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub owner_id: i64,
    pub date: NaiveDate,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionLine {
    pub id: i64,
    pub transaction_id: i64,
    pub account_id: i64,
    pub amount: Decimal,
    pub entry_type: EntrySign,
    pub comment: Option<String>,
}

/// Account with its group and effective category resolved, for listing.
#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub id: i64,
    pub name: String,
    pub group_id: i64,
    pub group_name: String,
    pub category_name: String,
    pub category_sign: EntrySign,
    pub opening_amount: Decimal,
    pub closing_amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineView {
    pub id: i64,
    pub account_id: i64,
    pub account_name: String,
    pub amount: Decimal,
    pub entry_type: EntrySign,
    pub comment: Option<String>,
}

/// Transaction with its lines and debit/credit totals resolved.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionView {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub total_debit: Decimal,
    pub total_credit: Decimal,
    pub lines: Vec<LineView>,
}
