// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! TaskHub server - identity and authorization core
//!
//! This crate provides the HTTP backend for TaskHub: bearer-token
//! authentication, role-based permissions, invite-only registration and a
//! stable problem+json error surface.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Tokens, password hashing, authentication middleware
//! - `boundary` - Trace ids, error rendering, panic recovery
//! - `rbac` - Permission registry, roles, authorization checks
//! - `services` - Business operations behind the handlers
//! - `storage` - In-memory persistence and repositories

pub mod api;
pub mod auth;
pub mod boundary;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod problem;
pub mod rbac;
pub mod services;
pub mod state;
pub mod storage;
