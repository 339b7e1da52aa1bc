// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bankbook - Multi-User Bank Account Bookkeeping Service
//!
//! This crate provides a REST service where each user keeps a private set of
//! bank account records, with identity handled by an external provider (or
//! self-issued tokens) and per-record ownership enforced in storage.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Credential validation, identity resolution, role checks
//! - `storage` - JSON document storage (per-record files)

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod storage;
