// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User repository.
//!
//! A user record is created the first time its external identity is seen.
//! Creation writes the primary record first and then links it in via the
//! `by_external` index with `create_new` semantics, so the index never points
//! at a record that does not exist and two concurrent creators cannot both
//! succeed. The loser cleans up its orphaned primary record and surfaces
//! `AlreadyExists` for the caller to retry the lookup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::Role;

use super::super::paths::is_safe_id;
use super::super::{DocumentStore, StorageError, StorageResult};

/// Application-level user record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct StoredUser {
    /// Unique user identifier (UUID).
    pub id: String,
    /// Identity-provider subject; `None` for users provisioned out-of-band
    /// for the self-issued-token deployment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Email address (sentinel default when the provider supplied none).
    pub email: String,
    /// Username (falls back to the local part of the email).
    pub username: String,
    /// Authorization role.
    #[serde(default)]
    pub role: Role,
    /// When the user was first provisioned.
    pub created_at: DateTime<Utc>,
}

/// Index entry linking an external identity to its user record.
#[derive(Debug, Serialize, Deserialize)]
struct ExternalIndexEntry {
    user_id: String,
}

/// Repository for user records.
pub struct UserRepository<'a> {
    storage: &'a DocumentStore,
}

impl<'a> UserRepository<'a> {
    pub fn new(storage: &'a DocumentStore) -> Self {
        Self { storage }
    }

    /// Get a user by id.
    pub fn get(&self, user_id: &str) -> StorageResult<StoredUser> {
        if !is_safe_id(user_id) {
            return Err(StorageError::NotFound(format!("user {user_id}")));
        }
        let path = self.storage.paths().user(user_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("user {user_id}")));
        }
        self.storage.read_json(path)
    }

    /// Look up a user by external identity.
    pub fn find_by_external(&self, external_id: &str) -> StorageResult<Option<StoredUser>> {
        let index_path = self.storage.paths().external_index(external_id);
        if !self.storage.exists(&index_path) {
            return Ok(None);
        }
        let entry: ExternalIndexEntry = self.storage.read_json(index_path)?;
        self.get(&entry.user_id).map(Some)
    }

    /// Atomically create a user for a newly-seen external identity.
    ///
    /// Returns `AlreadyExists` when another creator won the index race; the
    /// caller should re-run `find_by_external` and use the winner's record.
    pub fn create_from_external(
        &self,
        external_id: &str,
        email: &str,
        username: &str,
        role: Role,
    ) -> StorageResult<StoredUser> {
        let user = StoredUser {
            id: Uuid::new_v4().to_string(),
            external_id: Some(external_id.to_string()),
            email: email.to_string(),
            username: username.to_string(),
            role,
            created_at: Utc::now(),
        };

        let primary = self.storage.paths().user(&user.id);
        let index = self.storage.paths().external_index(external_id);

        self.storage.write_json(&primary, &user)?;
        match self.storage.create_json_new(
            &index,
            &ExternalIndexEntry {
                user_id: user.id.clone(),
            },
        ) {
            Ok(()) => Ok(user),
            Err(e) => {
                // Lost the race (or the index write failed): the fresh UUID
                // record is unreachable, remove it.
                let _ = self.storage.delete(&primary);
                Err(e)
            }
        }
    }

    /// Insert a pre-built user record. Used for out-of-band provisioning in
    /// the self-issued-token deployment and for test seeding.
    pub fn insert(&self, user: &StoredUser) -> StorageResult<()> {
        self.storage
            .create_json_new(self.storage.paths().user(&user.id), user)?;
        if let Some(external_id) = &user.external_id {
            self.storage.create_json_new(
                self.storage.paths().external_index(external_id),
                &ExternalIndexEntry {
                    user_id: user.id.clone(),
                },
            )?;
        }
        Ok(())
    }

    /// Update an existing user record (role mirroring, contact backfill).
    pub fn update(&self, user: &StoredUser) -> StorageResult<()> {
        let path = self.storage.paths().user(&user.id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("user {}", user.id)));
        }
        self.storage.write_json(path, user)
    }

    /// Count stored user records (primary records only, not index entries).
    pub fn count(&self) -> StorageResult<usize> {
        Ok(self
            .storage
            .list_files(self.storage.paths().users_dir(), "json")?
            .len())
    }
}
