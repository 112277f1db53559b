// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Role management endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::extract::ApiJson;
use crate::auth::Auth;
use crate::problem::ApiError;
use crate::rbac::Role;
use crate::services::{CreateRoleInput, RoleService, UpdateRoleInput};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateRoleRequest {
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleRequest {
    pub permissions: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleResponse {
    pub id: Uuid,
    pub name: String,
    pub permissions: Vec<String>,
    pub is_active: bool,
    pub is_system: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            id: role.id(),
            permissions: role
                .permissions()
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
            name: role.name,
            is_active: role.is_active,
            is_system: role.is_system,
            created_at: role.audit.created_at,
            updated_at: role.audit.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RoleListResponse {
    pub roles: Vec<RoleResponse>,
}

/// GET /v1/roles
pub async fn list_roles(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<ApiJson<RoleListResponse>, ApiError> {
    let roles = RoleService::new(&state).list_roles(user.user_id).await?;
    Ok(ApiJson(RoleListResponse {
        roles: roles.into_iter().map(RoleResponse::from).collect(),
    }))
}

/// POST /v1/roles
pub async fn create_role(
    Auth(user): Auth,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateRoleRequest>,
) -> Result<(StatusCode, ApiJson<RoleResponse>), ApiError> {
    let role = RoleService::new(&state)
        .create_role(
            user.user_id,
            CreateRoleInput {
                name: request.name,
                permissions: request.permissions,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, ApiJson(role.into())))
}

/// PATCH /v1/roles/{name}
pub async fn update_role(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(name): Path<String>,
    ApiJson(request): ApiJson<UpdateRoleRequest>,
) -> Result<ApiJson<RoleResponse>, ApiError> {
    let role = RoleService::new(&state)
        .update_role(
            user.user_id,
            &name,
            UpdateRoleInput {
                permissions: request.permissions,
                is_active: request.is_active,
            },
        )
        .await?;
    Ok(ApiJson(role.into()))
}
