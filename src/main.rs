// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{env, net::SocketAddr, process, sync::Arc};

use tracing_subscriber::EnvFilter;

use bankbook_server::{
    api::router,
    auth::JwksManager,
    config::{
        CLERK_AUDIENCE_ENV, CLERK_ISSUER_ENV, CLERK_JWKS_URL_ENV, DATA_DIR_ENV, HOST_ENV,
        JWT_SECRET_ENV, LOG_FORMAT_ENV, PORT_ENV,
    },
    state::{AppState, AuthConfig, AuthMode},
    storage::{DocumentStore, StoragePaths, DATA_ROOT},
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    match env::var(LOG_FORMAT_ENV).as_deref() {
        Ok("json") => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        _ => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

/// Pick the credential verification mode from the environment.
///
/// `CLERK_JWKS_URL` wins when both are set. When neither is set the server
/// refuses to start; there is no unauthenticated fallback.
fn auth_config_from_env() -> Option<AuthConfig> {
    if let Ok(jwks_url) = env::var(CLERK_JWKS_URL_ENV) {
        tracing::info!(jwks_url = %jwks_url, "verifying provider tokens against JWKS");
        return Some(AuthConfig {
            mode: AuthMode::Clerk {
                jwks: Arc::new(JwksManager::new(jwks_url)),
                issuer: env::var(CLERK_ISSUER_ENV).ok(),
                audience: env::var(CLERK_AUDIENCE_ENV).ok(),
            },
        });
    }
    if let Ok(secret) = env::var(JWT_SECRET_ENV) {
        tracing::info!("verifying self-issued HS256 tokens");
        return Some(AuthConfig {
            mode: AuthMode::Local { secret },
        });
    }
    None
}

#[tokio::main]
async fn main() {
    init_tracing();

    let Some(auth) = auth_config_from_env() else {
        eprintln!("Set {CLERK_JWKS_URL_ENV} or {JWT_SECRET_ENV}; refusing to serve unauthenticated");
        process::exit(1);
    };

    let data_dir = env::var(DATA_DIR_ENV).unwrap_or_else(|_| DATA_ROOT.to_string());
    let mut storage = DocumentStore::new(StoragePaths::new(&data_dir));
    storage
        .initialize()
        .expect("failed to initialize document store");
    tracing::info!(data_dir = %data_dir, "document store ready");

    let state = AppState::new(Arc::new(storage), auth);
    let app = router(state);

    let host = env::var(HOST_ENV).unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var(PORT_ENV)
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .expect("failed to parse bind address");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");
    tracing::info!("bankbook server listening on http://{addr} (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server failed");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
    tracing::info!("shutdown signal received");
}
