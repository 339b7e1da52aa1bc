// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Admin-only views over all bank account records.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    auth::AdminOnly,
    error::ApiError,
    state::AppState,
    storage::{BankAccountRepository, StoredBankAccount, StoredUser, UserRepository},
};

/// Owner details joined onto an account record for admin listings.
#[derive(Debug, Serialize, ToSchema)]
pub struct OwnerSummary {
    pub id: String,
    pub email: String,
    pub username: String,
}

impl From<StoredUser> for OwnerSummary {
    fn from(user: StoredUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
        }
    }
}

/// An account record with its owner joined in.
///
/// `owner` is `None` when the owning user record has been removed; the
/// orphaned account is still listed.
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountWithOwner {
    #[serde(flatten)]
    pub account: StoredBankAccount,
    pub owner: Option<OwnerSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminAccountListResponse {
    pub accounts: Vec<AccountWithOwner>,
    pub total: usize,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Substring matched case-insensitively against bank name and IFSC code.
    pub q: String,
}

fn join_owners(state: &AppState, accounts: Vec<StoredBankAccount>) -> AdminAccountListResponse {
    let users = UserRepository::new(&state.storage);
    let accounts: Vec<AccountWithOwner> = accounts
        .into_iter()
        .map(|account| {
            let owner = users.get(&account.owner_user_id).ok().map(OwnerSummary::from);
            AccountWithOwner { account, owner }
        })
        .collect();
    AdminAccountListResponse {
        total: accounts.len(),
        accounts,
    }
}

#[utoipa::path(
    get,
    path = "/v1/accounts/all",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = AdminAccountListResponse),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn list_all_accounts(
    State(state): State<AppState>,
    AdminOnly(_admin): AdminOnly,
) -> Result<Json<AdminAccountListResponse>, ApiError> {
    let accounts = BankAccountRepository::new(&state.storage).list_all()?;
    Ok(Json(join_owners(&state, accounts)))
}

#[utoipa::path(
    get,
    path = "/v1/accounts/search",
    params(SearchQuery),
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = AdminAccountListResponse),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn search_accounts(
    State(state): State<AppState>,
    AdminOnly(_admin): AdminOnly,
    Query(params): Query<SearchQuery>,
) -> Result<Json<AdminAccountListResponse>, ApiError> {
    let accounts = BankAccountRepository::new(&state.storage).search(&params.q)?;
    Ok(Json(join_owners(&state, accounts)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Auth, CurrentUser, Role};
    use crate::models::BankAccountRequest;
    use crate::state::{AuthConfig, AuthMode};
    use crate::storage::{DocumentStore, StoragePaths};
    use chrono::Utc;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn test_state() -> (AppState, TempDir) {
        let temp_dir = TempDir::new().expect("tempdir");
        let mut storage = DocumentStore::new(StoragePaths::new(temp_dir.path()));
        storage.initialize().expect("initialize");
        let state = AppState::new(
            Arc::new(storage),
            AuthConfig {
                mode: AuthMode::Local {
                    secret: "test".to_string(),
                },
            },
        );
        (state, temp_dir)
    }

    fn admin() -> CurrentUser {
        CurrentUser {
            id: "admin-1".to_string(),
            external_id: None,
            email: "admin@example.com".to_string(),
            username: "admin".to_string(),
            role: Role::Admin,
        }
    }

    fn seed_user(state: &AppState, id: &str) {
        UserRepository::new(&state.storage)
            .insert(&StoredUser {
                id: id.to_string(),
                external_id: None,
                email: format!("{id}@example.com"),
                username: id.to_string(),
                role: Role::Standard,
                created_at: Utc::now(),
            })
            .expect("seed user");
    }

    async fn seed_account(state: &AppState, owner: &str, bank: &str, ifsc: &str) {
        let user = CurrentUser {
            id: owner.to_string(),
            external_id: None,
            email: format!("{owner}@example.com"),
            username: owner.to_string(),
            role: Role::Standard,
        };
        crate::api::accounts::create_account(
            State(state.clone()),
            Auth(user),
            Json(BankAccountRequest {
                bank_name: bank.to_string(),
                ifsc_code: ifsc.to_string(),
                branch_name: "Branch".to_string(),
                account_number: "123456789012".to_string(),
                account_holder_name: owner.to_string(),
            }),
        )
        .await
        .expect("seed account");
    }

    #[tokio::test]
    async fn list_all_spans_owners_and_joins_them() {
        let (state, _dir) = test_state();
        seed_user(&state, "alice");
        seed_user(&state, "bob");
        seed_account(&state, "alice", "State Bank of India", "SBIN0000123").await;
        seed_account(&state, "bob", "Canara Bank", "CNRB0001234").await;

        let Json(response) = list_all_accounts(State(state), AdminOnly(admin()))
            .await
            .expect("list succeeds");

        assert_eq!(response.total, 2);
        let mut owners: Vec<String> = response
            .accounts
            .iter()
            .map(|a| a.owner.as_ref().expect("owner joined").username.clone())
            .collect();
        owners.sort();
        assert_eq!(owners, vec!["alice", "bob"]);
    }

    #[tokio::test]
    async fn search_matches_ifsc_case_insensitively() {
        let (state, _dir) = test_state();
        seed_user(&state, "alice");
        seed_user(&state, "bob");
        seed_account(&state, "alice", "State Bank of India", "SBIN0000123").await;
        seed_account(&state, "bob", "Canara Bank", "CNRB0001234").await;

        let Json(response) = search_accounts(
            State(state),
            AdminOnly(admin()),
            Query(SearchQuery {
                q: "sbin".to_string(),
            }),
        )
        .await
        .expect("search succeeds");

        assert_eq!(response.total, 1);
        assert_eq!(response.accounts[0].account.ifsc_code.as_str(), "SBIN0000123");
        assert_eq!(
            response.accounts[0].owner.as_ref().expect("owner").username,
            "alice"
        );
    }

    #[tokio::test]
    async fn missing_owner_yields_none_not_error() {
        let (state, _dir) = test_state();
        // Account whose owner was never stored.
        seed_account(&state, "ghost", "Axis Bank", "UTIB0000001").await;

        let Json(response) = list_all_accounts(State(state), AdminOnly(admin()))
            .await
            .expect("list succeeds");
        assert_eq!(response.total, 1);
        assert!(response.accounts[0].owner.is_none());
    }
}
