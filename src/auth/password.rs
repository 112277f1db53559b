// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Password hashing.
//!
//! Argon2id with a fresh 16-byte salt per call, stored as a PHC string so
//! the salt and cost parameters travel with the hash.

use std::sync::Arc;

use argon2::{
    Algorithm, Argon2, Params, PasswordHasher as _, PasswordVerifier as _, Version,
};
use password_hash::{PasswordHash, SaltString};
use thiserror::Error;

use crate::error::{DomainError, DomainResult};

/// Plaintext did not match the stored hash, or the hash was unreadable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("password does not match")]
pub struct PasswordMismatch;

/// One-way credential hashing.
pub trait PasswordHasher: Send + Sync {
    /// Fails only on internal errors. Strength is checked upstream.
    fn hash(&self, plaintext: &str) -> DomainResult<String>;

    fn verify(&self, hash: &str, plaintext: &str) -> Result<(), PasswordMismatch>;
}

/// Argon2id hasher.
#[derive(Clone)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    /// Library default cost (19 MiB, 2 passes, 1 lane).
    pub fn new() -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default()),
        }
    }

    /// Explicit cost parameters. Tests use the smallest accepted values.
    pub fn with_params(m_cost: u32, t_cost: u32, p_cost: u32) -> DomainResult<Self> {
        let params = Params::new(m_cost, t_cost, p_cost, None).map_err(|e| {
            DomainError::internal(format!("invalid argon2 parameters: {e}"), None)
        })?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> DomainResult<String> {
        let mut salt_bytes = [0u8; 16];
        getrandom::getrandom(&mut salt_bytes)
            .map_err(|e| DomainError::internal(format!("salt generation failed: {e}"), None))?;
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| DomainError::internal(format!("salt encoding failed: {e}"), None))?;

        let phc = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| DomainError::internal(format!("password hashing failed: {e}"), None))?;
        Ok(phc.to_string())
    }

    fn verify(&self, hash: &str, plaintext: &str) -> Result<(), PasswordMismatch> {
        let parsed = PasswordHash::new(hash).map_err(|_| PasswordMismatch)?;
        self.argon2
            .verify_password(plaintext.as_bytes(), &parsed)
            .map_err(|_| PasswordMismatch)
    }
}

/// Hash on the blocking pool so request tasks are not stalled.
pub async fn hash_blocking(
    hasher: Arc<dyn PasswordHasher>,
    plaintext: String,
) -> DomainResult<String> {
    tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
        .await
        .map_err(|e| DomainError::internal("password hashing task failed", Some(e.into())))?
}

/// Verify on the blocking pool. `Ok(false)` is a mismatch.
pub async fn verify_blocking(
    hasher: Arc<dyn PasswordHasher>,
    hash: String,
    plaintext: String,
) -> DomainResult<bool> {
    tokio::task::spawn_blocking(move || hasher.verify(&hash, &plaintext).is_ok())
        .await
        .map_err(|e| DomainError::internal("password verification task failed", Some(e.into())))
}
