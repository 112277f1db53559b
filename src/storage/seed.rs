// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Startup seeding: system roles and the optional bootstrap invite.

use tracing::info;

use super::{Storage, StorageResult};
use crate::models::Invite;
use crate::rbac::{default_roles, roles::ADMIN_ROLE};

/// Insert any missing system role. Safe to run on every start.
pub async fn seed_default_roles(storage: &Storage) -> StorageResult<usize> {
    let repo = storage.roles();
    let mut created = 0;
    for role in default_roles() {
        if repo.find_by_name(&role.name).await?.is_some() {
            continue;
        }
        repo.create(&role).await?;
        created += 1;
    }
    if created > 0 {
        info!(created, "seeded system roles");
    }
    Ok(created)
}

/// Seed a single-use invite that grants the `admin` role.
///
/// Returns `None` when an invite with this token already exists.
pub async fn seed_admin_invite(storage: &Storage, token: &str) -> StorageResult<Option<Invite>> {
    if storage.invites().find_by_token(token).await?.is_some() {
        return Ok(None);
    }
    let admin = storage.roles().get_by_name(ADMIN_ROLE).await?;
    let invite = Invite::new(
        token,
        Some("bootstrap administrator".to_string()),
        vec![admin.id()],
        None,
    );
    storage.invites().create(&invite).await?;
    info!(invite_id = %invite.id(), "seeded admin invite");
    Ok(Some(invite))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;

    #[tokio::test]
    async fn default_roles_seed_once() {
        let storage = Storage::new();
        assert_eq!(seed_default_roles(&storage).await.unwrap(), 4);
        assert_eq!(seed_default_roles(&storage).await.unwrap(), 0);
        assert_eq!(storage.roles().list().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn admin_invite_needs_admin_role() {
        let storage = Storage::new();
        assert!(matches!(
            seed_admin_invite(&storage, "boot").await,
            Err(StorageError::NotFound { entity: "role", .. })
        ));

        seed_default_roles(&storage).await.unwrap();
        let invite = seed_admin_invite(&storage, "boot").await.unwrap().unwrap();
        assert_eq!(invite.role_ids.len(), 1);
        assert!(seed_admin_invite(&storage, "boot").await.unwrap().is_none());
    }
}
