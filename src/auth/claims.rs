// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Validated claim sets for both credential shapes.
//!
//! Downstream code never touches raw tokens or loosely-typed claim bags; the
//! validator produces exactly one of the two typed shapes here, and the
//! derivation policy for email/username lives next to the fields it reads.

use serde::Deserialize;

use super::roles::Role;

/// Sentinel email recorded when the provider supplies no usable address.
pub const DEFAULT_EMAIL: &str = "noemail@clerk.com";

/// Claims decoded from a provider-issued (Clerk) JWT.
///
/// Clerk JWTs contain standard OIDC claims plus custom claims; which of the
/// optional fields are present depends on the session token template.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderClaims {
    /// Subject - the canonical identity-provider user identifier.
    pub sub: String,

    /// Expiration timestamp (validated by the jsonwebtoken crate).
    #[serde(default)]
    #[allow(dead_code)]
    pub exp: i64,

    /// Issued at timestamp.
    #[serde(default)]
    #[allow(dead_code)]
    pub iat: i64,

    /// Issuer (validated by the jsonwebtoken crate when configured).
    #[serde(default)]
    #[allow(dead_code)]
    pub iss: String,

    /// Audience (validated by the jsonwebtoken crate when configured).
    #[serde(default)]
    #[allow(dead_code)]
    pub aud: Option<serde_json::Value>,

    /// Clerk session ID.
    #[serde(default)]
    pub sid: Option<String>,

    /// Email address.
    #[serde(default)]
    pub email: Option<String>,

    /// Alternate email field some token templates emit instead.
    #[serde(default, rename = "emailAddress")]
    pub email_address: Option<String>,

    /// First name.
    #[serde(default, rename = "firstName")]
    pub first_name: Option<String>,

    /// Username.
    #[serde(default)]
    pub username: Option<String>,

    /// Nested session claims sub-object.
    #[serde(default, rename = "sessionClaims")]
    pub session_claims: Option<SessionClaims>,

    /// Public metadata (set in the Clerk dashboard).
    #[serde(default, rename = "publicMetadata")]
    pub public_metadata: Option<PublicMetadata>,
}

/// Nested session claims carried by some provider token templates.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SessionClaims {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Provider public metadata.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PublicMetadata {
    /// User's role (set in the provider dashboard).
    #[serde(default)]
    pub role: Option<String>,
}

impl ProviderClaims {
    /// Resolve the email with one fixed fallback order: explicit claim,
    /// alternate field, nested session claim, sentinel default.
    pub fn derive_email(&self) -> String {
        non_empty(&self.email)
            .or_else(|| non_empty(&self.email_address))
            .or_else(|| {
                self.session_claims
                    .as_ref()
                    .and_then(|session| non_empty(&session.email))
            })
            .unwrap_or(DEFAULT_EMAIL)
            .to_string()
    }

    /// Resolve the username: explicit claim, first name, nested session
    /// claim, local part of the resolved email.
    pub fn derive_username(&self, email: &str) -> String {
        non_empty(&self.username)
            .or_else(|| non_empty(&self.first_name))
            .or_else(|| {
                self.session_claims
                    .as_ref()
                    .and_then(|session| non_empty(&session.username))
            })
            .unwrap_or_else(|| email_local_part(email))
            .to_string()
    }

    /// Role from public metadata, if any was set.
    pub fn metadata_role(&self) -> Option<Role> {
        self.public_metadata
            .as_ref()
            .and_then(|metadata| metadata.role.as_deref())
            .and_then(Role::parse)
    }
}

/// Claims decoded from a self-issued HS256 token.
///
/// `sub` is the application user id directly; no provisioning happens for
/// this shape.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalClaims {
    /// Subject - the application user id.
    pub sub: String,

    /// Expiration timestamp (validated by the jsonwebtoken crate).
    #[serde(default)]
    #[allow(dead_code)]
    pub exp: i64,

    /// Issued at timestamp.
    #[serde(default)]
    #[allow(dead_code)]
    pub iat: i64,
}

/// A validated claim set, one variant per credential shape.
///
/// `Provider` tokens carry an external identity that may need provisioning;
/// `Local` tokens embed the application user id directly.
#[derive(Debug, Clone)]
pub enum ClaimSet {
    Provider(ProviderClaims),
    Local(LocalClaims),
}

impl ClaimSet {
    /// Provider session id, when the shape carries one.
    pub fn session_id(&self) -> Option<&str> {
        match self {
            ClaimSet::Provider(claims) => claims.sid.as_deref(),
            ClaimSet::Local(_) => None,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Local part of an email address (`alice` for `alice@example.com`).
pub fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}
