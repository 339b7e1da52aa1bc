// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints: explicit sync and the current-user view.

use axum::{extract::State, Json};

use crate::{
    auth::{resolver, Auth, CurrentUser, DEFAULT_EMAIL},
    error::ApiError,
    models::SyncUserRequest,
    state::AppState,
    storage::UserRepository,
};

#[utoipa::path(
    post,
    path = "/v1/users/sync",
    request_body = SyncUserRequest,
    tag = "Users",
    responses(
        (status = 200, body = CurrentUser),
        (status = 400, description = "Missing external id")
    )
)]
/// Eagerly provision (or look up) the user for an external identity.
///
/// Idempotent against the same find-or-create path the auth pipeline uses,
/// so a sync racing a first authenticated request still yields one record.
/// The request body can never set a role.
pub async fn sync_user(
    State(state): State<AppState>,
    Json(request): Json<SyncUserRequest>,
) -> Result<Json<CurrentUser>, ApiError> {
    let external_id = request.external_id.trim();
    if external_id.is_empty() {
        return Err(ApiError::bad_request("external_id is required"));
    }

    let email = request
        .email
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_EMAIL)
        .to_string();
    let username = request
        .username
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| crate::auth::claims::email_local_part(&email).to_string());

    let users = UserRepository::new(&state.storage);
    let user = resolver::find_or_create(&users, external_id, &email, &username, None)
        .map_err(|e| ApiError::new(e.status_code(), e.to_string()))?;

    Ok(Json(user.into()))
}

#[utoipa::path(
    get,
    path = "/v1/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = CurrentUser),
        (status = 401, description = "Missing or invalid credential")
    )
)]
pub async fn get_current_user(Auth(user): Auth) -> Json<CurrentUser> {
    Json(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AuthConfig, AuthMode};
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

    #[tokio::test]
    async fn sync_is_idempotent() {
        let (state, _dir) = test_state();

        let request = SyncUserRequest {
            external_id: "user_abc".to_string(),
            email: Some("abc@example.com".to_string()),
            username: Some("abc".to_string()),
        };

        let Json(first) = sync_user(State(state.clone()), Json(request.clone()))
            .await
            .expect("first sync");
        let Json(second) = sync_user(State(state.clone()), Json(request))
            .await
            .expect("second sync");

        assert_eq!(first.id, second.id);
        assert_eq!(second.email, "abc@example.com");
        assert_eq!(UserRepository::new(&state.storage).count().expect("count"), 1);
    }

    #[tokio::test]
    async fn sync_defaults_missing_contact_fields() {
        let (state, _dir) = test_state();

        let Json(user) = sync_user(
            State(state),
            Json(SyncUserRequest {
                external_id: "user_bare".to_string(),
                email: None,
                username: None,
            }),
        )
        .await
        .expect("sync succeeds");

        assert_eq!(user.email, DEFAULT_EMAIL);
        assert_eq!(user.username, "noemail");
    }

    #[tokio::test]
    async fn sync_rejects_blank_external_id() {
        let (state, _dir) = test_state();

        let result = sync_user(
            State(state),
            Json(SyncUserRequest {
                external_id: "   ".to_string(),
                email: None,
                username: None,
            }),
        )
        .await;
        assert_eq!(
            result.expect_err("rejected").status,
            axum::http::StatusCode::BAD_REQUEST
        );
    }
}
