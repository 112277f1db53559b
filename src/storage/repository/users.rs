// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User repository.

use uuid::Uuid;

use super::super::{Storage, StorageError, StorageResult, Tables};
use crate::models::{User, UserWithRoles};

/// Repository for user operations.
pub struct UserRepository<'a> {
    storage: &'a Storage,
}

fn email_taken(tables: &Tables, email: &str) -> bool {
    tables
        .users
        .values()
        .any(|user| user.email == email && !user.audit.is_deleted())
}

impl<'a> UserRepository<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// `email` must already be normalized.
    pub async fn find_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        let tables = self.storage.read().await?;
        Ok(tables
            .users
            .values()
            .find(|user| user.email == email && !user.audit.is_deleted())
            .cloned())
    }

    /// Load a user with its current roles in one read.
    pub async fn load_with_roles(&self, id: Uuid) -> StorageResult<Option<UserWithRoles>> {
        let tables = self.storage.read().await?;
        let Some(user) = tables.users.get(&id).filter(|u| !u.audit.is_deleted()) else {
            return Ok(None);
        };
        let roles = user
            .role_ids
            .iter()
            .filter_map(|role_id| tables.roles.get(role_id))
            .filter(|role| !role.audit.is_deleted())
            .cloned()
            .collect();
        Ok(Some(UserWithRoles {
            user: user.clone(),
            roles,
        }))
    }

    /// Insert a user. Emails are unique.
    pub async fn create(&self, user: &User) -> StorageResult<()> {
        let mut tables = self.storage.write().await?;
        if email_taken(&tables, &user.email) {
            return Err(StorageError::Conflict {
                entity: "user",
                field: "email",
                value: user.email.clone(),
            });
        }
        tables.users.insert(user.id(), user.clone());
        Ok(())
    }

    /// Insert a user and consume the invite under a single write lock, so an
    /// invite can never be redeemed twice.
    pub async fn create_with_invite(&self, user: &User, invite_id: Uuid) -> StorageResult<()> {
        let mut tables = self.storage.write().await?;
        if email_taken(&tables, &user.email) {
            return Err(StorageError::Conflict {
                entity: "user",
                field: "email",
                value: user.email.clone(),
            });
        }

        let invite = tables
            .invites
            .get_mut(&invite_id)
            .filter(|invite| !invite.audit.is_deleted())
            .ok_or_else(|| StorageError::NotFound {
                entity: "invite",
                key: invite_id.to_string(),
            })?;
        if invite.is_used() {
            return Err(StorageError::Conflict {
                entity: "invite",
                field: "token",
                value: invite.token.clone(),
            });
        }
        invite.used_by = Some(user.id());
        invite.audit.touch();

        tables.users.insert(user.id(), user.clone());
        Ok(())
    }

    /// Grant a role. Granting a role the user already has is a no-op.
    pub async fn add_role(&self, user_id: Uuid, role_id: Uuid) -> StorageResult<User> {
        let mut tables = self.storage.write().await?;
        if !tables.roles.contains_key(&role_id) {
            return Err(StorageError::NotFound {
                entity: "role",
                key: role_id.to_string(),
            });
        }

        let user = tables
            .users
            .get_mut(&user_id)
            .filter(|user| !user.audit.is_deleted())
            .ok_or_else(|| StorageError::NotFound {
                entity: "user",
                key: user_id.to_string(),
            })?;
        if !user.role_ids.contains(&role_id) {
            user.role_ids.push(role_id);
            user.audit.touch();
        }
        Ok(user.clone())
    }
}
