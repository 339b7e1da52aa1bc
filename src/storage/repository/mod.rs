// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repositories over the document store, one per entity kind.

pub mod accounts;
pub mod users;

pub use accounts::{BankAccountRepository, StoredBankAccount};
pub use users::{StoredUser, UserRepository};
