// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Role management.
//!
//! Permission checks gate permission management: creating, updating, listing
//! and assigning roles each require their own `role:*` permission.

use tracing::info;
use uuid::Uuid;

use super::load_actor;
use crate::error::{DomainError, DomainResult};
use crate::models::User;
use crate::rbac::{permissions, require, require_grantable, PermissionRegistry, Role};
use crate::state::AppState;
use crate::storage::Storage;

#[derive(Debug, Clone)]
pub struct CreateRoleInput {
    pub name: String,
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateRoleInput {
    /// Replaces the permission list when present
    pub permissions: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

pub struct RoleService<'a> {
    storage: &'a Storage,
    registry: &'a PermissionRegistry,
}

impl<'a> RoleService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self {
            storage: &state.storage,
            registry: &state.permissions,
        }
    }

    pub async fn create_role(&self, actor_id: Uuid, input: CreateRoleInput) -> DomainResult<Role> {
        let actor = load_actor(self.storage, actor_id).await?;
        require(&actor, &permissions::ROLE_CREATE)?;

        let name = input.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("role name is required").with_meta("field", "name"));
        }

        let resolved = self.registry.resolve_all(&input.permissions)?;
        require_grantable(&actor, &resolved)?;

        if self.storage.roles().find_by_name(name).await?.is_some() {
            return Err(DomainError::already_exists("role", "name", name));
        }

        let role = Role::new(name, resolved);
        self.storage.roles().create(&role).await?;
        info!(role = %role.name, actor_id = %actor_id, "role created");
        Ok(role)
    }

    pub async fn update_role(
        &self,
        actor_id: Uuid,
        name: &str,
        input: UpdateRoleInput,
    ) -> DomainResult<Role> {
        let actor = load_actor(self.storage, actor_id).await?;
        require(&actor, &permissions::ROLE_UPDATE)?;

        let mut role = self.storage.roles().get_by_name(name).await?;

        if let Some(names) = &input.permissions {
            let resolved = self.registry.resolve_all(names)?;
            require_grantable(&actor, &resolved)?;
            role.set_permissions(resolved);
        }
        if let Some(active) = input.is_active {
            if role.is_system && !active {
                return Err(DomainError::validation("system roles cannot be deactivated")
                    .with_meta("field", "isActive"));
            }
            role.is_active = active;
        }

        self.storage.roles().update(&role).await?;
        info!(role = %role.name, actor_id = %actor_id, "role updated");
        Ok(role)
    }

    pub async fn list_roles(&self, actor_id: Uuid) -> DomainResult<Vec<Role>> {
        let actor = load_actor(self.storage, actor_id).await?;
        require(&actor, &permissions::ROLE_LIST)?;
        Ok(self.storage.roles().list().await?)
    }

    /// Grant an active role to a user. Granting it twice is a no-op.
    ///
    /// The actor must already hold every permission the role carries.
    pub async fn assign_role(
        &self,
        actor_id: Uuid,
        user_id: Uuid,
        role_name: &str,
    ) -> DomainResult<User> {
        let actor = load_actor(self.storage, actor_id).await?;
        require(&actor, &permissions::ROLE_ASSIGN)?;

        let role = self.storage.roles().get_by_name(role_name).await?;
        if !role.is_active {
            return Err(DomainError::validation(format!("role {} is not active", role.name))
                .with_meta("field", "role")
                .with_meta("value", role.name.as_str()));
        }
        require_grantable(&actor, role.permissions())?;

        let user = self.storage.users().add_role(user_id, role.id()).await?;
        info!(role = %role.name, user_id = %user_id, actor_id = %actor_id, "role assigned");
        Ok(user)
    }
}
