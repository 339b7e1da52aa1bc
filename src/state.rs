// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared application state threaded through the router.

use std::sync::Arc;

use crate::auth::JwksManager;
use crate::storage::DocumentStore;

/// Which credential shape this deployment accepts.
///
/// Fixed at startup; a running server verifies exactly one shape and never
/// falls back to the other.
#[derive(Clone)]
pub enum AuthMode {
    /// Self-issued HS256 tokens verified against a server-held secret.
    /// Subjects must already exist in storage.
    Local { secret: String },
    /// Provider-issued tokens verified against the provider's published
    /// signing keys. New subjects are provisioned on first use.
    Clerk {
        jwks: Arc<JwksManager>,
        issuer: Option<String>,
        audience: Option<String>,
    },
}

/// Authentication configuration.
#[derive(Clone)]
pub struct AuthConfig {
    pub mode: AuthMode,
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<DocumentStore>,
    pub auth: AuthConfig,
}

impl AppState {
    pub fn new(storage: Arc<DocumentStore>, auth: AuthConfig) -> Self {
        Self { storage, auth }
    }
}
