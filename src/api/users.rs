// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints.

use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::extract::ApiJson;
use crate::auth::Auth;
use crate::error::DomainError;
use crate::models::User;
use crate::problem::ApiError;
use crate::services::{Profile, RoleService, UserService};
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            full_name: user.full_name(),
            email: user.email.clone(),
        }
    }
}

/// Response for GET /v1/users/me
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub user: UserSummary,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            user: UserSummary::from(&profile.user),
            roles: profile.roles,
            permissions: profile.permissions,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AssignRoleRequest {
    pub role: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRolesResponse {
    #[serde(flatten)]
    pub user: UserSummary,
    pub role_ids: Vec<Uuid>,
}

/// GET /v1/users/me
pub async fn me(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<ApiJson<ProfileResponse>, ApiError> {
    let profile = UserService::new(&state).me(user.user_id).await?;
    Ok(ApiJson(profile.into()))
}

/// POST /v1/users/{id}/roles
pub async fn assign_role(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<AssignRoleRequest>,
) -> Result<ApiJson<UserRolesResponse>, ApiError> {
    let target = Uuid::parse_str(&id).map_err(|_| {
        DomainError::validation("invalid user id")
            .with_meta("field", "id")
            .with_meta("value", id.as_str())
    })?;
    let updated = RoleService::new(&state)
        .assign_role(user.user_id, target, &request.role)
        .await?;
    Ok(ApiJson(UserRolesResponse {
        user: UserSummary::from(&updated),
        role_ids: updated.role_ids,
    }))
}
