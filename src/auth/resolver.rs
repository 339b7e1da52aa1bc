// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Identity resolution: validated claims in, application user record out.
//!
//! Self-issued tokens resolve by lookup only; an unknown subject is rejected.
//! Provider tokens resolve by find-or-create, so the first authenticated
//! request from a new provider identity provisions its user record.

use super::claims::{ClaimSet, DEFAULT_EMAIL};
use super::error::AuthError;
use super::roles::Role;
use crate::storage::{DocumentStore, StorageError, StoredUser, UserRepository};

/// Resolve a validated claim set to a stored user.
pub fn resolve(claims: &ClaimSet, storage: &DocumentStore) -> Result<StoredUser, AuthError> {
    let users = UserRepository::new(storage);
    match claims {
        ClaimSet::Local(local) => match users.get(&local.sub) {
            Ok(user) => Ok(user),
            Err(StorageError::NotFound(_)) => Err(AuthError::UnknownUser),
            Err(e) => Err(AuthError::InternalError(e.to_string())),
        },
        ClaimSet::Provider(provider) => {
            let email = provider.derive_email();
            let username = provider.derive_username(&email);
            find_or_create(
                &users,
                &provider.sub,
                &email,
                &username,
                provider.metadata_role(),
            )
        }
    }
}

/// Find the user for an external identity, provisioning one if none exists.
///
/// Idempotent: repeated calls for the same external identity always return
/// the same user record. Concurrent first calls race on the external-identity
/// index; exactly one creator wins and the losers adopt the winner's record.
///
/// `role` is `Some` only when the credential carried an explicit role claim;
/// a stored role is never overwritten by its absence.
pub fn find_or_create(
    users: &UserRepository<'_>,
    external_id: &str,
    email: &str,
    username: &str,
    role: Option<Role>,
) -> Result<StoredUser, AuthError> {
    match users.find_by_external(external_id) {
        Ok(Some(user)) => reconcile(users, user, email, username, role),
        Ok(None) => match users.create_from_external(
            external_id,
            email,
            username,
            role.unwrap_or_default(),
        ) {
            Ok(user) => {
                tracing::info!(user_id = %user.id, external_id, "provisioned new user");
                Ok(user)
            }
            Err(StorageError::AlreadyExists(_)) => {
                // Lost the creation race; adopt the winner's record.
                match users.find_by_external(external_id) {
                    Ok(Some(user)) => reconcile(users, user, email, username, role),
                    Ok(None) => Err(AuthError::ProvisioningFailed(
                        "user record missing after creation race".to_string(),
                    )),
                    Err(e) => Err(AuthError::ProvisioningFailed(e.to_string())),
                }
            }
            Err(e) => Err(AuthError::ProvisioningFailed(e.to_string())),
        },
        Err(e) => Err(AuthError::InternalError(e.to_string())),
    }
}

/// Bring a stored record up to date with what the credential now carries.
///
/// Sentinel contact fields are backfilled once real values arrive, and an
/// explicit role claim is mirrored onto the record.
fn reconcile(
    users: &UserRepository<'_>,
    mut user: StoredUser,
    email: &str,
    username: &str,
    role: Option<Role>,
) -> Result<StoredUser, AuthError> {
    let mut changed = false;

    if user.email == DEFAULT_EMAIL && email != DEFAULT_EMAIL {
        user.email = email.to_string();
        changed = true;
    }
    if user.username == "noemail" && username != "noemail" {
        user.username = username.to_string();
        changed = true;
    }
    if let Some(role) = role {
        if user.role != role {
            user.role = role;
            changed = true;
        }
    }

    if changed {
        users
            .update(&user)
            .map_err(|e| AuthError::InternalError(e.to_string()))?;
    }
    Ok(user)
}
