// Copyright (c) 2026 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failure taxonomy for the ledger core.
///
/// `NotFound` and `Forbidden` deliberately carry no entity details: a caller
/// probing another user's ids must not be able to distinguish "does not
/// exist" from "exists but is not yours" beyond the coarse kind.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("not found")]
    NotFound,

    #[error("permission denied")]
    Forbidden,

    #[error("already exists")]
    Conflict,

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }
}
