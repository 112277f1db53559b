// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Invite creation and listing.

use tracing::info;
use uuid::Uuid;

use super::load_actor;
use crate::error::{DomainError, DomainResult};
use crate::models::Invite;
use crate::rbac::{permissions, require, require_grantable};
use crate::state::AppState;
use crate::storage::Storage;

#[derive(Debug, Clone, Default)]
pub struct CreateInviteInput {
    /// Generated when absent
    pub token: Option<String>,
    pub description: Option<String>,
    /// Role names granted on registration
    pub roles: Vec<String>,
}

pub struct InviteService<'a> {
    storage: &'a Storage,
}

impl<'a> InviteService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self {
            storage: &state.storage,
        }
    }

    pub async fn create_invite(
        &self,
        actor_id: Uuid,
        input: CreateInviteInput,
    ) -> DomainResult<Invite> {
        let actor = load_actor(self.storage, actor_id).await?;
        require(&actor, &permissions::INVITE_CREATE)?;

        if input.roles.is_empty() {
            return Err(DomainError::validation("at least one role is required")
                .with_meta("field", "roles"));
        }

        let mut role_ids = Vec::with_capacity(input.roles.len());
        for name in &input.roles {
            let role = self.storage.roles().find_by_name(name).await?;
            match role {
                Some(role) if role.is_active => {
                    require_grantable(&actor, role.permissions())?;
                    if !role_ids.contains(&role.id()) {
                        role_ids.push(role.id());
                    }
                }
                _ => {
                    return Err(DomainError::validation(format!("unknown or inactive role: {name}"))
                        .with_meta("field", "roles")
                        .with_meta("value", name.as_str()))
                }
            }
        }

        let token = match input.token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => token.to_string(),
            _ => Uuid::new_v4().simple().to_string(),
        };
        let description = input
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let invite = Invite::new(token, description, role_ids, Some(actor_id));
        self.storage.invites().create(&invite).await?;
        info!(invite_id = %invite.id(), actor_id = %actor_id, "invite created");
        Ok(invite)
    }

    /// Invites created by the actor, oldest first.
    pub async fn list_invites(&self, actor_id: Uuid) -> DomainResult<Vec<Invite>> {
        let actor = load_actor(self.storage, actor_id).await?;
        require(&actor, &permissions::INVITE_LIST)?;
        Ok(self.storage.invites().list_by_creator(actor_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::{Audit, User};
    use crate::storage::seed::seed_default_roles;

    async fn setup(role: &str) -> (AppState, Uuid) {
        let state = AppState::for_tests();
        seed_default_roles(&state.storage).await.unwrap();
        let role = state.storage.roles().get_by_name(role).await.unwrap();
        let user = User {
            audit: Audit::new(),
            email: "actor@example.com".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            password_hash: String::new(),
            role_ids: vec![role.id()],
        };
        state.storage.users().create(&user).await.unwrap();
        (state, user.id())
    }

    fn roles(names: &[&str]) -> CreateInviteInput {
        CreateInviteInput {
            roles: names.iter().map(|n| n.to_string()).collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn manager_creates_and_lists_invites() {
        let (state, manager) = setup("manager").await;
        let svc = InviteService::new(&state);

        let generated = svc.create_invite(manager, roles(&["viewer"])).await.unwrap();
        assert_eq!(generated.token.len(), 32);
        assert_eq!(generated.created_by, Some(manager));

        let named = svc
            .create_invite(
                manager,
                CreateInviteInput {
                    token: Some(" team-2026 ".to_string()),
                    description: Some("new hires".to_string()),
                    roles: vec!["user".to_string(), "user".to_string()],
                },
            )
            .await
            .unwrap();
        assert_eq!(named.token, "team-2026");
        assert_eq!(named.role_ids.len(), 1);

        let listed = svc.list_invites(manager).await.unwrap();
        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn viewer_cannot_create_invites() {
        let (state, viewer) = setup("viewer").await;
        let err = InviteService::new(&state)
            .create_invite(viewer, roles(&["viewer"]))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
        assert_eq!(err.meta()["permission"], "invite:create");
    }

    #[tokio::test]
    async fn manager_cannot_invite_an_admin() {
        let (state, manager) = setup("manager").await;
        let err = InviteService::new(&state)
            .create_invite(manager, roles(&["user", "admin"]))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
        assert!(state.storage.invites().list_by_creator(manager).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn roles_must_exist() {
        let (state, admin) = setup("admin").await;
        let svc = InviteService::new(&state);

        let err = svc.create_invite(admin, roles(&[])).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = svc
            .create_invite(admin, roles(&["viewer", "ghost"]))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.meta()["value"], "ghost");
    }

    #[tokio::test]
    async fn duplicate_token_is_conflict() {
        let (state, admin) = setup("admin").await;
        let svc = InviteService::new(&state);
        let input = CreateInviteInput {
            token: Some("same".to_string()),
            ..roles(&["viewer"])
        };
        svc.create_invite(admin, input.clone()).await.unwrap();

        let err = svc.create_invite(admin, input).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(err.meta()["entity"], "invite");
    }
}
