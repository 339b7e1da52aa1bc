// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Document Storage Module
//!
//! Persistent storage for users and bank account records as JSON documents
//! on the filesystem, one file per entity.
//!
//! ## Layout
//!
//! ```text
//! {DATA_DIR}/
//!   users/
//!     {user_id}.json                       # primary user record
//!     by_external/{encoded_external_id}.json  # uniqueness index -> user id
//!   accounts/
//!     {account_id}.json
//! ```
//!
//! ## Invariants
//!
//! - An external identity maps to at most one user: the `by_external` index
//!   entry is created with `create_new` semantics, so concurrent first-sight
//!   provisioning has exactly one winner.
//! - All writes are temp-file + rename, so a crashed write never leaves a
//!   half-written document behind.

pub mod document_fs;
pub mod ownership;
pub mod paths;
pub mod repository;

pub use document_fs::{DocumentStore, StorageError, StorageResult};
pub use ownership::{OwnedResource, OwnershipCheck};
pub use paths::{StoragePaths, DATA_ROOT};
pub use repository::{BankAccountRepository, StoredBankAccount, StoredUser, UserRepository};
