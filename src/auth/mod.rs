// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Stateless bearer-token authentication for the TaskHub API.
//!
//! ## Auth Flow
//!
//! 1. Client logs in (or registers) with email and password
//! 2. Server returns an access token and a refresh token (HS256 JWTs)
//! 3. Client sends `Authorization: Bearer <access token>`
//! 4. Server:
//!    - Verifies signature, algorithm and expiry
//!    - Rejects refresh tokens on API routes
//!    - Binds `sub` and `email` to the request as [`AuthenticatedUser`]
//!
//! Roles are not carried in the token. Services reload them from storage on
//! every request, so role changes apply immediately. Tokens themselves cannot
//! be revoked before `exp`.
//!
//! ## Security
//!
//! - Token failures are indistinguishable to the caller
//! - Passwords are hashed with Argon2id on the blocking pool
//! - Tokens are never logged

pub mod claims;
pub mod credentials;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod password;
pub mod token;

pub use claims::{AuthenticatedUser, Claims, TokenType};
pub use error::AuthError;
pub use extractor::Auth;
pub use password::{Argon2Hasher, PasswordHasher, PasswordMismatch};
pub use token::{TokenLifetimes, TokenPair, TokenService};
