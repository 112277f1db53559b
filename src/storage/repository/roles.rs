// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Role repository.

use super::super::{Storage, StorageError, StorageResult};
use crate::rbac::Role;

/// Repository for role operations.
pub struct RoleRepository<'a> {
    storage: &'a Storage,
}

impl<'a> RoleRepository<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub async fn find_by_name(&self, name: &str) -> StorageResult<Option<Role>> {
        let tables = self.storage.read().await?;
        Ok(tables
            .roles
            .values()
            .find(|role| role.name == name && !role.audit.is_deleted())
            .cloned())
    }

    pub async fn get_by_name(&self, name: &str) -> StorageResult<Role> {
        self.find_by_name(name)
            .await?
            .ok_or_else(|| StorageError::NotFound {
                entity: "role",
                key: name.to_string(),
            })
    }

    /// All roles sorted by name.
    pub async fn list(&self) -> StorageResult<Vec<Role>> {
        let tables = self.storage.read().await?;
        let mut roles: Vec<Role> = tables
            .roles
            .values()
            .filter(|role| !role.audit.is_deleted())
            .cloned()
            .collect();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(roles)
    }

    /// Insert a role. Names are unique.
    pub async fn create(&self, role: &Role) -> StorageResult<()> {
        let mut tables = self.storage.write().await?;
        if tables
            .roles
            .values()
            .any(|existing| existing.name == role.name && !existing.audit.is_deleted())
        {
            return Err(StorageError::Conflict {
                entity: "role",
                field: "name",
                value: role.name.clone(),
            });
        }
        tables.roles.insert(role.id(), role.clone());
        Ok(())
    }

    pub async fn update(&self, role: &Role) -> StorageResult<()> {
        let mut tables = self.storage.write().await?;
        match tables.roles.get_mut(&role.id()) {
            Some(existing) if !existing.audit.is_deleted() => {
                *existing = role.clone();
                existing.audit.touch();
                Ok(())
            }
            _ => Err(StorageError::NotFound {
                entity: "role",
                key: role.name.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rbac::permissions::{TASK_CREATE, TASK_VIEW};

    #[tokio::test]
    async fn create_enforces_unique_names() {
        let storage = Storage::new();
        let repo = storage.roles();

        repo.create(&Role::new("editor", vec![TASK_CREATE])).await.unwrap();
        let err = repo
            .create(&Role::new("editor", vec![TASK_VIEW]))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict { field: "name", .. }));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn find_by_name_returns_none_when_missing() {
        let storage = Storage::new();
        assert!(storage.roles().find_by_name("ghost").await.unwrap().is_none());
        assert!(matches!(
            storage.roles().get_by_name("ghost").await,
            Err(StorageError::NotFound { entity: "role", .. })
        ));
    }

    #[tokio::test]
    async fn update_replaces_and_touches() {
        let storage = Storage::new();
        let repo = storage.roles();
        let mut role = Role::new("editor", vec![TASK_CREATE]);
        repo.create(&role).await.unwrap();

        role.set_permissions(vec![TASK_VIEW]);
        role.is_active = false;
        repo.update(&role).await.unwrap();

        let stored = repo.get_by_name("editor").await.unwrap();
        assert_eq!(stored.permissions(), &[TASK_VIEW]);
        assert!(!stored.is_active);
        assert!(stored.audit.updated_at >= stored.audit.created_at);
    }

    #[tokio::test]
    async fn list_is_sorted_by_name() {
        let storage = Storage::new();
        let repo = storage.roles();
        let b = Role::new("b", vec![]);
        let a = Role::new("a", vec![]);
        repo.create(&b).await.unwrap();
        repo.create(&a).await.unwrap();

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, ["a", "b"]);
    }
}
