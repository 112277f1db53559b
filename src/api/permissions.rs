// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::extract::State;
use serde::Serialize;

use super::extract::ApiJson;
use crate::rbac::PermissionGroup;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PermissionListResponse {
    pub groups: Vec<PermissionGroup>,
}

/// GET /v1/permissions
pub async fn list_permissions(State(state): State<AppState>) -> ApiJson<PermissionListResponse> {
    ApiJson(PermissionListResponse {
        groups: state.permissions.groups(),
    })
}
