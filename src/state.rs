// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::{Argon2Hasher, PasswordHasher, TokenLifetimes, TokenService};
use crate::rbac::PermissionRegistry;
use crate::storage::Storage;

/// Shared application state. Everything here is read-only or internally
/// synchronized, so cloning per request is cheap.
#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
    pub permissions: Arc<PermissionRegistry>,
    pub tokens: Arc<TokenService>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub token_lifetimes: TokenLifetimes,
}

impl AppState {
    pub fn new(storage: Storage, permissions: Arc<PermissionRegistry>, tokens: TokenService) -> Self {
        Self {
            storage,
            permissions,
            tokens: Arc::new(tokens),
            hasher: Arc::new(Argon2Hasher::new()),
            token_lifetimes: TokenLifetimes::default(),
        }
    }

    pub fn with_hasher(mut self, hasher: Arc<dyn PasswordHasher>) -> Self {
        self.hasher = hasher;
        self
    }

    pub fn with_token_lifetimes(mut self, lifetimes: TokenLifetimes) -> Self {
        self.token_lifetimes = lifetimes;
        self
    }

    /// Empty storage, standard registry and a cheap hasher.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        let hasher = Argon2Hasher::with_params(8, 1, 1).expect("valid test params");
        Self::new(
            Storage::new(),
            Arc::new(PermissionRegistry::standard()),
            TokenService::new(b"unit-test-secret"),
        )
        .with_hasher(Arc::new(hasher))
    }
}
