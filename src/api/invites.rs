// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Invite endpoints.

use axum::{extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::extract::ApiJson;
use crate::auth::Auth;
use crate::models::Invite;
use crate::problem::ApiError;
use crate::services::{CreateInviteInput, InviteService};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateInviteRequest {
    pub token: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteResponse {
    pub id: Uuid,
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub role_ids: Vec<Uuid>,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Invite> for InviteResponse {
    fn from(invite: Invite) -> Self {
        Self {
            id: invite.id(),
            used: invite.is_used(),
            token: invite.token,
            description: invite.description,
            role_ids: invite.role_ids,
            created_at: invite.audit.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InviteListResponse {
    pub invites: Vec<InviteResponse>,
}

/// GET /v1/invites
pub async fn list_invites(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<ApiJson<InviteListResponse>, ApiError> {
    let invites = InviteService::new(&state).list_invites(user.user_id).await?;
    Ok(ApiJson(InviteListResponse {
        invites: invites.into_iter().map(InviteResponse::from).collect(),
    }))
}

/// POST /v1/invites
pub async fn create_invite(
    Auth(user): Auth,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateInviteRequest>,
) -> Result<(StatusCode, ApiJson<InviteResponse>), ApiError> {
    let invite = InviteService::new(&state)
        .create_invite(
            user.user_id,
            CreateInviteInput {
                token: request.token,
                description: request.description,
                roles: request.roles,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, ApiJson(invite.into())))
}
