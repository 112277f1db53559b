// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Storage Module
//!
//! In-memory persistence collaborator for users, roles and invites. It stands
//! in for the database: the rest of the crate only sees the repositories and
//! classified [`StorageError`]s, which become [`DomainError`]s at the
//! repository boundary.
//!
//! ## Layout
//!
//! ```text
//! Storage
//!   tables: Arc<RwLock<Tables>>
//!     users    Uuid -> User       (unique: email)
//!     roles    Uuid -> Role       (unique: name)
//!     invites  Uuid -> Invite     (unique: token)
//! ```
//!
//! Repositories borrow the handle for the length of one request. Every await
//! on the lock is cancellable: dropping the request future releases it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::error::DomainError;
use crate::models::{Invite, User};
use crate::rbac::Role;

pub mod repository;
pub mod seed;

pub use repository::{InviteRepository, RoleRepository, UserRepository};

/// Storage-level failures.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Entity not found
    #[error("{entity} {key} not found")]
    NotFound { entity: &'static str, key: String },
    /// Unique key already taken
    #[error("{entity} with {field} '{value}' already exists")]
    Conflict {
        entity: &'static str,
        field: &'static str,
        value: String,
    },
    /// Backend unavailable or failed
    #[error("storage backend failure: {0}")]
    Backend(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { entity, key } => DomainError::not_found(entity, key),
            StorageError::Conflict {
                entity,
                field,
                value,
            } => DomainError::already_exists(entity, field, value),
            backend @ StorageError::Backend(_) => {
                DomainError::database("storage operation failed", backend)
            }
        }
    }
}

/// All tables behind one lock.
#[derive(Debug, Default)]
pub struct Tables {
    pub users: HashMap<Uuid, User>,
    pub roles: HashMap<Uuid, Role>,
    pub invites: HashMap<Uuid, Invite>,
}

/// Shared storage handle. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct Storage {
    tables: Arc<RwLock<Tables>>,
    offline: Arc<AtomicBool>,
}

impl Storage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail with [`StorageError::Backend`],
    /// as an unreachable database would.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> StorageResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("connection refused".to_string()));
        }
        Ok(())
    }

    pub(crate) async fn read(&self) -> StorageResult<RwLockReadGuard<'_, Tables>> {
        self.check_online()?;
        Ok(self.tables.read().await)
    }

    pub(crate) async fn write(&self) -> StorageResult<RwLockWriteGuard<'_, Tables>> {
        self.check_online()?;
        Ok(self.tables.write().await)
    }

    /// Round-trip to the backend, for health checks.
    pub async fn ping(&self) -> StorageResult<()> {
        self.read().await.map(|_| ())
    }

    pub fn users(&self) -> UserRepository<'_> {
        UserRepository::new(self)
    }

    pub fn roles(&self) -> RoleRepository<'_> {
        RoleRepository::new(self)
    }

    pub fn invites(&self) -> InviteRepository<'_> {
        InviteRepository::new(self)
    }
}
