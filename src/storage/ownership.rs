// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ownership enforcement for stored resources.
//!
//! A failed ownership check reports the same `NotFound` a missing id would,
//! so a non-owner cannot probe whether a given id exists.

use super::{StorageError, StorageResult};

/// Trait for resources that have an owning user.
pub trait OwnedResource {
    /// Human-readable resource kind, used in error messages.
    const KIND: &'static str;

    /// The owning user's id.
    fn owner_user_id(&self) -> &str;

    /// The resource's own id.
    fn resource_id(&self) -> &str;
}

/// Extension trait for asserting ownership on lookup results.
pub trait OwnershipCheck<T> {
    /// Return the resource only if `user_id` owns it; `NotFound` otherwise.
    fn owned_by(self, user_id: &str) -> StorageResult<T>;
}

impl<T: OwnedResource> OwnershipCheck<T> for StorageResult<T> {
    fn owned_by(self, user_id: &str) -> StorageResult<T> {
        let resource = self?;
        if resource.owner_user_id() == user_id {
            Ok(resource)
        } else {
            Err(StorageError::NotFound(format!(
                "{} {}",
                T::KIND,
                resource.resource_id()
            )))
        }
    }
}
