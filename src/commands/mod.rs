// Copyright (c) 2026 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod users;
pub mod groups;
pub mod accounts;
pub mod transactions;
pub mod lines;
