// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bank account record repository.
//!
//! Each record is a JSON document under `accounts/`. Listing and searching
//! scan the directory; traffic volume is small and requests are independent,
//! so there is no secondary index beyond the user uniqueness one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::IfscCode;

use super::super::paths::is_safe_id;
use super::super::{DocumentStore, OwnedResource, StorageError, StorageResult};

/// Stored bank account record. Serves directly as the API representation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct StoredBankAccount {
    /// Unique record identifier (UUID).
    pub id: String,
    /// Owning user's id.
    pub owner_user_id: String,
    /// Name of the bank.
    pub bank_name: String,
    /// IFSC routing code of the branch.
    pub ifsc_code: IfscCode,
    /// Branch name.
    pub branch_name: String,
    /// Account number.
    pub account_number: String,
    /// Name of the account holder.
    pub account_holder_name: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl OwnedResource for StoredBankAccount {
    const KIND: &'static str = "bank account";

    fn owner_user_id(&self) -> &str {
        &self.owner_user_id
    }

    fn resource_id(&self) -> &str {
        &self.id
    }
}

/// Repository for bank account records.
pub struct BankAccountRepository<'a> {
    storage: &'a DocumentStore,
}

impl<'a> BankAccountRepository<'a> {
    pub fn new(storage: &'a DocumentStore) -> Self {
        Self { storage }
    }

    /// Get a record by id.
    pub fn get(&self, account_id: &str) -> StorageResult<StoredBankAccount> {
        if !is_safe_id(account_id) {
            return Err(StorageError::NotFound(format!("bank account {account_id}")));
        }
        let path = self.storage.paths().account(account_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("bank account {account_id}")));
        }
        self.storage.read_json(path)
    }

    /// Create a new record.
    pub fn create(&self, account: &StoredBankAccount) -> StorageResult<()> {
        self.storage
            .create_json_new(self.storage.paths().account(&account.id), account)
    }

    /// Update an existing record.
    pub fn update(&self, account: &StoredBankAccount) -> StorageResult<()> {
        let path = self.storage.paths().account(&account.id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!(
                "bank account {}",
                account.id
            )));
        }
        self.storage.write_json(path, account)
    }

    /// Delete a record.
    pub fn delete(&self, account_id: &str) -> StorageResult<()> {
        if !is_safe_id(account_id) {
            return Err(StorageError::NotFound(format!("bank account {account_id}")));
        }
        let path = self.storage.paths().account(account_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("bank account {account_id}")));
        }
        self.storage.delete(path)
    }

    /// List records owned by one user.
    pub fn list_for_owner(&self, user_id: &str) -> StorageResult<Vec<StoredBankAccount>> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|account| account.owner_user_id == user_id)
            .collect())
    }

    /// List every record regardless of owner. For admin use only.
    pub fn list_all(&self) -> StorageResult<Vec<StoredBankAccount>> {
        let ids = self
            .storage
            .list_files(self.storage.paths().accounts_dir(), "json")?;

        let mut accounts = Vec::with_capacity(ids.len());
        for id in ids {
            // A record deleted between listing and reading is skipped.
            match self.get(&id) {
                Ok(account) => accounts.push(account),
                Err(StorageError::NotFound(_)) => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(accounts)
    }

    /// Case-insensitive substring search over bank name and IFSC code.
    /// For admin use only.
    pub fn search(&self, query: &str) -> StorageResult<Vec<StoredBankAccount>> {
        let needle = query.to_lowercase();
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|account| {
                account.bank_name.to_lowercase().contains(&needle)
                    || account.ifsc_code.as_str().to_lowercase().contains(&needle)
            })
            .collect())
    }
}
