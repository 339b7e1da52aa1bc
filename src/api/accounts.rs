// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bank account record handlers.
//!
//! Every handler runs behind the `Auth` extractor and scopes reads and
//! writes to the authenticated owner. A record belonging to someone else is
//! indistinguishable from one that does not exist.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    auth::Auth,
    error::ApiError,
    models::BankAccountRequest,
    state::AppState,
    storage::{BankAccountRepository, OwnershipCheck, StoredBankAccount},
};

#[utoipa::path(
    post,
    path = "/v1/accounts",
    request_body = BankAccountRequest,
    tag = "Accounts",
    security(("bearer_auth" = [])),
    responses(
        (status = 201, body = StoredBankAccount),
        (status = 400, description = "Validation failure"),
        (status = 401, description = "Missing or invalid credential")
    )
)]
pub async fn create_account(
    State(state): State<AppState>,
    Auth(user): Auth,
    Json(request): Json<BankAccountRequest>,
) -> Result<(StatusCode, Json<StoredBankAccount>), ApiError> {
    let ifsc_code = request.validate()?;

    let now = Utc::now();
    let account = StoredBankAccount {
        id: Uuid::new_v4().to_string(),
        owner_user_id: user.id,
        bank_name: request.bank_name.trim().to_string(),
        ifsc_code,
        branch_name: request.branch_name.trim().to_string(),
        account_number: request.account_number.trim().to_string(),
        account_holder_name: request.account_holder_name.trim().to_string(),
        created_at: now,
        updated_at: now,
    };

    let accounts = BankAccountRepository::new(&state.storage);
    accounts.create(&account)?;

    tracing::info!(account_id = %account.id, owner = %account.owner_user_id, "created bank account record");
    Ok((StatusCode::CREATED, Json(account)))
}

#[utoipa::path(
    get,
    path = "/v1/accounts/mine",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = [StoredBankAccount]),
        (status = 401, description = "Missing or invalid credential")
    )
)]
pub async fn list_my_accounts(
    State(state): State<AppState>,
    Auth(user): Auth,
) -> Result<Json<Vec<StoredBankAccount>>, ApiError> {
    let accounts = BankAccountRepository::new(&state.storage);
    Ok(Json(accounts.list_for_owner(&user.id)?))
}

#[utoipa::path(
    put,
    path = "/v1/accounts/{account_id}",
    params(
        ("account_id" = String, Path, description = "Identifier of the record to update")
    ),
    request_body = BankAccountRequest,
    tag = "Accounts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = StoredBankAccount),
        (status = 400, description = "Validation failure"),
        (status = 404, description = "No such record visible to this user")
    )
)]
pub async fn update_account(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path(account_id): Path<String>,
    Json(request): Json<BankAccountRequest>,
) -> Result<Json<StoredBankAccount>, ApiError> {
    let ifsc_code = request.validate()?;

    let accounts = BankAccountRepository::new(&state.storage);
    let mut account = accounts.get(&account_id).owned_by(&user.id)?;

    account.bank_name = request.bank_name.trim().to_string();
    account.ifsc_code = ifsc_code;
    account.branch_name = request.branch_name.trim().to_string();
    account.account_number = request.account_number.trim().to_string();
    account.account_holder_name = request.account_holder_name.trim().to_string();
    account.updated_at = Utc::now();

    accounts.update(&account)?;
    Ok(Json(account))
}

#[utoipa::path(
    delete,
    path = "/v1/accounts/{account_id}",
    params(
        ("account_id" = String, Path, description = "Identifier of the record to delete")
    ),
    tag = "Accounts",
    security(("bearer_auth" = [])),
    responses(
        (status = 204),
        (status = 404, description = "No such record visible to this user")
    )
)]
pub async fn delete_account(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path(account_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let accounts = BankAccountRepository::new(&state.storage);
    accounts.get(&account_id).owned_by(&user.id)?;
    accounts.delete(&account_id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{CurrentUser, Role};
    use crate::state::{AppState, AuthConfig, AuthMode};
    use crate::storage::{DocumentStore, StoragePaths};
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

    fn user(id: &str) -> CurrentUser {
        CurrentUser {
            id: id.to_string(),
            external_id: None,
            email: format!("{id}@example.com"),
            username: id.to_string(),
            role: Role::Standard,
        }
    }

    fn valid_request() -> BankAccountRequest {
        BankAccountRequest {
            bank_name: "State Bank of India".to_string(),
            ifsc_code: "SBIN0000123".to_string(),
            branch_name: "Main Branch".to_string(),
            account_number: "123456789012".to_string(),
            account_holder_name: "Alice".to_string(),
        }
    }

    #[tokio::test]
    async fn create_account_success() {
        let (state, _dir) = test_state();

        let (status, Json(account)) =
            create_account(State(state.clone()), Auth(user("alice")), Json(valid_request()))
                .await
                .expect("creation succeeds");

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(account.owner_user_id, "alice");
        assert_eq!(account.ifsc_code.as_str(), "SBIN0000123");

        let Json(mine) = list_my_accounts(State(state), Auth(user("alice")))
            .await
            .expect("list succeeds");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, account.id);
    }

    #[tokio::test]
    async fn create_account_rejects_bad_ifsc() {
        let (state, _dir) = test_state();
        let mut request = valid_request();
        request.ifsc_code = "NOT-AN-IFSC".to_string();

        let result = create_account(State(state), Auth(user("alice")), Json(request)).await;
        let err = result.expect_err("validation fails");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn foreign_record_looks_missing() {
        let (state, _dir) = test_state();

        let (_, Json(account)) =
            create_account(State(state.clone()), Auth(user("alice")), Json(valid_request()))
                .await
                .expect("creation succeeds");

        // Bob cannot see, update, or delete Alice's record.
        let Json(bobs) = list_my_accounts(State(state.clone()), Auth(user("bob")))
            .await
            .expect("list succeeds");
        assert!(bobs.is_empty());

        let update = update_account(
            State(state.clone()),
            Auth(user("bob")),
            Path(account.id.clone()),
            Json(valid_request()),
        )
        .await;
        assert_eq!(update.expect_err("concealed").status, StatusCode::NOT_FOUND);

        let delete = delete_account(State(state.clone()), Auth(user("bob")), Path(account.id.clone()))
            .await;
        assert_eq!(delete.expect_err("concealed").status, StatusCode::NOT_FOUND);

        // The record is untouched for its owner.
        let Json(mine) = list_my_accounts(State(state), Auth(user("alice")))
            .await
            .expect("list succeeds");
        assert_eq!(mine.len(), 1);
    }

    #[tokio::test]
    async fn traversal_id_cannot_reach_other_documents() {
        let (state, _dir) = test_state();

        // A user record outside accounts/ that a crafted id could point at.
        crate::storage::UserRepository::new(&state.storage)
            .insert(&crate::storage::StoredUser {
                id: "victim-user".to_string(),
                external_id: None,
                email: "victim@example.com".to_string(),
                username: "victim".to_string(),
                role: Role::Standard,
                created_at: chrono::Utc::now(),
            })
            .expect("seed user");

        // Percent-decoded path captures arrive with the slashes restored.
        for id in ["../users/victim-user", "../users/no-such-user"] {
            let delete = delete_account(
                State(state.clone()),
                Auth(user("alice")),
                Path(id.to_string()),
            )
            .await;
            assert_eq!(delete.expect_err("rejected").status, StatusCode::NOT_FOUND);

            let update = update_account(
                State(state.clone()),
                Auth(user("alice")),
                Path(id.to_string()),
                Json(valid_request()),
            )
            .await;
            assert_eq!(update.expect_err("rejected").status, StatusCode::NOT_FOUND);
        }

        // The targeted document is untouched.
        let stored = crate::storage::UserRepository::new(&state.storage)
            .get("victim-user")
            .expect("user intact");
        assert_eq!(stored.email, "victim@example.com");
    }

    #[tokio::test]
    async fn update_and_delete_own_record() {
        let (state, _dir) = test_state();

        let (_, Json(account)) =
            create_account(State(state.clone()), Auth(user("alice")), Json(valid_request()))
                .await
                .expect("creation succeeds");

        let mut changed = valid_request();
        changed.branch_name = "Harbor Branch".to_string();
        let Json(updated) = update_account(
            State(state.clone()),
            Auth(user("alice")),
            Path(account.id.clone()),
            Json(changed),
        )
        .await
        .expect("update succeeds");
        assert_eq!(updated.branch_name, "Harbor Branch");
        assert!(updated.updated_at >= updated.created_at);

        let status = delete_account(State(state.clone()), Auth(user("alice")), Path(account.id))
            .await
            .expect("delete succeeds");
        assert_eq!(status, StatusCode::NO_CONTENT);

        let Json(mine) = list_my_accounts(State(state), Auth(user("alice")))
            .await
            .expect("list succeeds");
        assert!(mine.is_empty());
    }
}
