// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors for authenticated users.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is CurrentUser
//! }
//! ```
//!
//! `AdminOnly` additionally requires the admin role.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use serde::Serialize;
use utoipa::ToSchema;

use super::{resolver, validator, AuthError, Role};
use crate::state::AppState;
use crate::storage::StoredUser;

/// The authenticated user attached to a request.
///
/// Built from the stored user record after credential validation and
/// identity resolution; handlers never see raw claims.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CurrentUser {
    /// Application user id.
    pub id: String,
    /// Identity-provider subject, when the user came from a provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    pub email: String,
    pub username: String,
    pub role: Role,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role.has_privilege(Role::Admin)
    }
}

impl From<StoredUser> for CurrentUser {
    fn from(user: StoredUser) -> Self {
        Self {
            id: user.id,
            external_id: user.external_id,
            email: user.email,
            username: user.username,
            role: user.role,
        }
    }
}

/// Extractor for authenticated users.
///
/// Validates the bearer token from the Authorization header against the
/// configured credential shape, then resolves the claims to a stored user.
///
/// # Example
///
/// ```rust,ignore
/// async fn list_my_accounts(
///     State(state): State<AppState>,
///     Auth(user): Auth,
/// ) -> Result<Json<Vec<StoredBankAccount>>, ApiError> {
///     // user.id is the authenticated user's id
/// }
/// ```
pub struct Auth(pub CurrentUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthHeader)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidAuthHeader)?;

        let claims = validator::validate(token, &state.auth.mode).await?;
        let user = resolver::resolve(&claims, &state.storage)?;

        Ok(Auth(user.into()))
    }
}

/// Extractor that requires the admin role.
pub struct AdminOnly(pub CurrentUser);

impl FromRequestParts<AppState> for AdminOnly {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Auth(user) = Auth::from_request_parts(parts, state).await?;

        if !user.is_admin() {
            return Err(AuthError::InsufficientPermissions);
        }

        Ok(AdminOnly(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AppState, AuthConfig, AuthMode};
    use crate::storage::{DocumentStore, StoragePaths, UserRepository};
    use axum::http::Request;
    use chrono::Utc;
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use serde_json::json;
    use std::sync::Arc;
    use tempfile::TempDir;

    const SECRET: &str = "extractor-test-secret";

    fn test_state() -> (AppState, TempDir) {
        let temp_dir = TempDir::new().expect("tempdir");
        let mut storage = DocumentStore::new(StoragePaths::new(temp_dir.path()));
        storage.initialize().expect("initialize");
        let state = AppState::new(
            Arc::new(storage),
            AuthConfig {
                mode: AuthMode::Local {
                    secret: SECRET.to_string(),
                },
            },
        );
        (state, temp_dir)
    }

    fn seed_user(state: &AppState, id: &str, role: Role) {
        let users = UserRepository::new(&state.storage);
        users
            .insert(&StoredUser {
                id: id.to_string(),
                external_id: None,
                email: format!("{id}@example.com"),
                username: id.to_string(),
                role,
                created_at: Utc::now(),
            })
            .expect("seed user");
    }

    fn token_for(sub: &str) -> String {
        let claims = json!({
            "sub": sub,
            "iat": Utc::now().timestamp(),
            "exp": Utc::now().timestamp() + 3600,
        });
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .expect("encode token")
    }

    fn request_parts(auth: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/test");
        if let Some(value) = auth {
            builder = builder.header("Authorization", value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn missing_header_is_rejected() {
        let (state, _dir) = test_state();
        let mut parts = request_parts(None);
        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingAuthHeader)));
    }

    #[tokio::test]
    async fn non_bearer_header_is_rejected() {
        let (state, _dir) = test_state();
        let mut parts = request_parts(Some("Basic dXNlcjpwYXNz"));
        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InvalidAuthHeader)));
    }

    #[tokio::test]
    async fn valid_token_resolves_seeded_user() {
        let (state, _dir) = test_state();
        seed_user(&state, "user-a", Role::Standard);

        let token = token_for("user-a");
        let mut parts = request_parts(Some(&format!("Bearer {token}")));
        let Auth(user) = Auth::from_request_parts(&mut parts, &state)
            .await
            .expect("authenticated");
        assert_eq!(user.id, "user-a");
        assert_eq!(user.email, "user-a@example.com");
        assert!(!user.is_admin());
    }

    #[tokio::test]
    async fn unknown_subject_is_rejected() {
        let (state, _dir) = test_state();
        let token = token_for("nobody");
        let mut parts = request_parts(Some(&format!("Bearer {token}")));
        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::UnknownUser)));
    }

    #[tokio::test]
    async fn admin_only_rejects_standard_user() {
        let (state, _dir) = test_state();
        seed_user(&state, "user-b", Role::Standard);

        let token = token_for("user-b");
        let mut parts = request_parts(Some(&format!("Bearer {token}")));
        let result = AdminOnly::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InsufficientPermissions)));
    }

    #[tokio::test]
    async fn admin_only_accepts_admin() {
        let (state, _dir) = test_state();
        seed_user(&state, "admin-1", Role::Admin);

        let token = token_for("admin-1");
        let mut parts = request_parts(Some(&format!("Bearer {token}")));
        let AdminOnly(user) = AdminOnly::from_request_parts(&mut parts, &state)
            .await
            .expect("admin authenticated");
        assert!(user.is_admin());
    }
}
