// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication and authorization.
//!
//! Every protected request passes through the same pipeline:
//!
//! 1. [`extractor::Auth`] pulls the bearer token from the Authorization
//!    header.
//! 2. [`validator`] verifies it against the configured credential shape:
//!    self-issued HS256 tokens against the server-held secret, or
//!    provider-issued tokens against the provider's published keys
//!    ([`jwks`]).
//! 3. [`resolver`] maps the validated claims to a stored user record,
//!    provisioning one on first sight of a new provider identity.
//! 4. Role checks ([`extractor::AdminOnly`]) run against the stored record,
//!    never against raw claims.
//!
//! Failures surface as [`AuthError`], which carries its own HTTP mapping:
//! missing or unverifiable credentials are 401, a verified credential that
//! cannot act (unknown subject, insufficient role) is 403.

pub mod claims;
pub mod error;
pub mod extractor;
pub mod jwks;
pub mod resolver;
pub mod roles;
pub mod validator;

pub use claims::{ClaimSet, DEFAULT_EMAIL};
pub use error::AuthError;
pub use extractor::{AdminOnly, Auth, CurrentUser};
pub use jwks::JwksManager;
pub use roles::Role;
