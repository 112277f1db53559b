// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Current-user profile.

use uuid::Uuid;

use super::load_actor;
use crate::error::DomainResult;
use crate::models::User;
use crate::rbac::effective_permissions;
use crate::state::AppState;

/// The caller's account with its active roles and effective permissions.
#[derive(Debug, Clone)]
pub struct Profile {
    pub user: User,
    pub roles: Vec<String>,
    /// Sorted by name
    pub permissions: Vec<String>,
}

pub struct UserService<'a> {
    state: &'a AppState,
}

impl<'a> UserService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn me(&self, actor_id: Uuid) -> DomainResult<Profile> {
        let principal = load_actor(&self.state.storage, actor_id).await?;
        let permissions = effective_permissions(&principal)
            .into_iter()
            .map(|p| p.as_str().to_string())
            .collect();
        let roles = principal
            .roles
            .iter()
            .filter(|role| role.is_active)
            .map(|role| role.name.clone())
            .collect();
        Ok(Profile {
            user: principal.user,
            roles,
            permissions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::Audit;
    use crate::storage::seed::seed_default_roles;

    #[tokio::test]
    async fn profile_lists_active_grants() {
        let state = AppState::for_tests();
        seed_default_roles(&state.storage).await.unwrap();
        let viewer = state.storage.roles().get_by_name("viewer").await.unwrap();
        let mut dormant = crate::rbac::Role::new("dormant", vec![crate::rbac::permissions::ROLE_CREATE]);
        dormant.is_active = false;
        state.storage.roles().create(&dormant).await.unwrap();

        let user = User {
            audit: Audit::new(),
            email: "me@example.com".to_string(),
            first_name: "Me".to_string(),
            last_name: String::new(),
            password_hash: String::new(),
            role_ids: vec![viewer.id(), dormant.id()],
        };
        state.storage.users().create(&user).await.unwrap();

        let profile = UserService::new(&state).me(user.id()).await.unwrap();
        assert_eq!(profile.roles, vec!["viewer".to_string()]);
        assert!(!profile.permissions.iter().any(|p| p == "role:create"));
        let mut sorted = profile.permissions.clone();
        sorted.sort();
        assert_eq!(sorted, profile.permissions);
    }

    #[tokio::test]
    async fn missing_user_is_unauthorized() {
        let state = AppState::for_tests();
        let err = UserService::new(&state).me(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }
}
