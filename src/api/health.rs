// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Health and readiness probes.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::{AppState, AuthMode};

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthChecks {
    pub service: &'static str,
    pub storage: &'static str,
    /// Key-set reachability; only reported for provider deployments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jwks: Option<&'static str>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReadyResponse {
    pub ready: bool,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, body = HealthResponse),
        (status = 503, body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let storage_ok = state.storage.health_check().is_ok();

    let jwks = match &state.auth.mode {
        AuthMode::Clerk { jwks, .. } => {
            let ok = jwks.is_cached().await || jwks.refresh().await.is_ok();
            Some(if ok { "ok" } else { "unreachable" })
        }
        AuthMode::Local { .. } => None,
    };

    let healthy = storage_ok && jwks != Some("unreachable");
    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        checks: HealthChecks {
            service: "ok",
            storage: if storage_ok { "ok" } else { "failing" },
            jwks,
        },
    };

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(response))
}

#[utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses((status = 200, body = ReadyResponse))
)]
pub async fn liveness() -> Json<ReadyResponse> {
    Json(ReadyResponse { ready: true })
}

#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "Health",
    responses(
        (status = 200, body = ReadyResponse),
        (status = 503, body = ReadyResponse)
    )
)]
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let ready = state.storage.health_check().is_ok();
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(ReadyResponse { ready }))
}
