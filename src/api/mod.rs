// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{CurrentUser, Role},
    models::{BankAccountRequest, SyncUserRequest},
    state::AppState,
    storage::{StoredBankAccount, StoredUser},
};

pub mod accounts;
pub mod admin;
pub mod health;
pub mod users;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/accounts", post(accounts::create_account))
        .route("/accounts/mine", get(accounts::list_my_accounts))
        .route("/accounts/all", get(admin::list_all_accounts))
        .route("/accounts/search", get(admin::search_accounts))
        .route(
            "/accounts/{account_id}",
            put(accounts::update_account).delete(accounts::delete_account),
        )
        .route("/users/sync", post(users::sync_user))
        .route("/users/me", get(users::get_current_user))
        .with_state(state.clone());

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state);

    Router::new()
        .nest("/v1", v1_routes)
        .merge(health_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        accounts::create_account,
        accounts::list_my_accounts,
        accounts::update_account,
        accounts::delete_account,
        admin::list_all_accounts,
        admin::search_accounts,
        users::sync_user,
        users::get_current_user,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            StoredBankAccount,
            StoredUser,
            CurrentUser,
            Role,
            BankAccountRequest,
            SyncUserRequest,
            admin::OwnerSummary,
            admin::AccountWithOwner,
            admin::AdminAccountListResponse,
            health::HealthResponse,
            health::HealthChecks,
            health::ReadyResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Accounts", description = "Bank account record management"),
        (name = "Admin", description = "Admin-only views over all records"),
        (name = "Users", description = "User provisioning and identity"),
        (name = "Health", description = "Service health probes")
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
