// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration Constants
//!
//! This module defines environment variable names used throughout the
//! application. Configuration is loaded from the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATA_DIR` | Root directory for the document store | `/data` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `JWT_SECRET` | HS256 secret for self-issued tokens | — |
//! | `CLERK_JWKS_URL` | Clerk JWKS endpoint for JWT verification | — |
//! | `CLERK_ISSUER` | Expected JWT issuer claim | Unchecked if unset |
//! | `CLERK_AUDIENCE` | Expected JWT audience claim | Unchecked if unset |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//!
//! `CLERK_JWKS_URL` and `JWT_SECRET` select the credential verification mode;
//! `CLERK_JWKS_URL` wins when both are set. The server refuses to start when
//! neither is set — there is no unauthenticated fallback.

/// Environment variable name for the document store root directory.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Environment variable name for the server bind address.
pub const HOST_ENV: &str = "HOST";

/// Environment variable name for the server bind port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the HS256 signing secret (self-issued tokens).
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Environment variable name for the Clerk JWKS endpoint URL.
pub const CLERK_JWKS_URL_ENV: &str = "CLERK_JWKS_URL";

/// Environment variable name for the expected token issuer.
pub const CLERK_ISSUER_ENV: &str = "CLERK_ISSUER";

/// Environment variable name for the expected token audience.
pub const CLERK_AUDIENCE_ENV: &str = "CLERK_AUDIENCE";

/// Environment variable name for the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";
