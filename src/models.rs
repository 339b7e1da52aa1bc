// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request payloads and the [`IfscCode`] newtype. Stored entities live with
//! their repositories (`storage::repository`); the types here exist at the
//! HTTP boundary and carry the field validation the API enforces before
//! anything reaches storage.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;

// =============================================================================
// IFSC Code Type
// =============================================================================

/// Indian Financial System Code, the routing code identifying a bank branch.
///
/// Format: four uppercase letters (bank code), a literal `0`, then six
/// alphanumeric characters (branch code), e.g. `SBIN0000123`. Construction
/// normalizes to uppercase; an `IfscCode` in a stored record is always valid.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct IfscCode(String);

impl IfscCode {
    /// Parse and normalize a raw IFSC code.
    pub fn new(raw: &str) -> Result<Self, ApiError> {
        let code = raw.trim().to_uppercase();
        if is_valid_ifsc(&code) {
            Ok(Self(code))
        } else {
            Err(ApiError::bad_request(
                "ifsc_code must be 4 letters, a zero, then 6 alphanumeric characters",
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IfscCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_valid_ifsc(code: &str) -> bool {
    let bytes = code.as_bytes();
    bytes.len() == 11
        && bytes[..4].iter().all(u8::is_ascii_uppercase)
        && bytes[4] == b'0'
        && bytes[5..]
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

// =============================================================================
// Bank Account Requests
// =============================================================================

/// Payload for creating a bank account record, also used for full updates.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BankAccountRequest {
    /// Name of the bank.
    pub bank_name: String,
    /// IFSC routing code of the branch.
    pub ifsc_code: String,
    /// Branch name.
    pub branch_name: String,
    /// Account number (9-18 digits).
    pub account_number: String,
    /// Name of the account holder.
    pub account_holder_name: String,
}

impl BankAccountRequest {
    /// Validate all fields, returning the normalized IFSC code.
    pub fn validate(&self) -> Result<IfscCode, ApiError> {
        if self.bank_name.trim().is_empty() {
            return Err(ApiError::bad_request("bank_name is required"));
        }
        if self.branch_name.trim().is_empty() {
            return Err(ApiError::bad_request("branch_name is required"));
        }
        if self.account_holder_name.trim().is_empty() {
            return Err(ApiError::bad_request("account_holder_name is required"));
        }

        let number = self.account_number.trim();
        if !(9..=18).contains(&number.len()) || !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ApiError::bad_request("account_number must be 9-18 digits"));
        }

        IfscCode::new(&self.ifsc_code)
    }
}

// =============================================================================
// User Provisioning Request
// =============================================================================

/// Payload for the client-driven provisioning endpoint.
///
/// Idempotent: syncing an already-known external identity returns the stored
/// user unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SyncUserRequest {
    /// Identity-provider subject for the user.
    pub external_id: String,
    /// Email, if the client knows it.
    #[serde(default)]
    pub email: Option<String>,
    /// Username, if the client knows it.
    #[serde(default)]
    pub username: Option<String>,
}
