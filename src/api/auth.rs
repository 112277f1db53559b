// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login and registration endpoints.

use axum::{extract::State, http::StatusCode};
use serde::Deserialize;

use super::extract::ApiJson;
use super::users::UserSummary;
use crate::auth::TokenPair;
use crate::problem::ApiError;
use crate::services::{AuthService, RegisterInput};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub invite_token: String,
}

impl From<RegisterRequest> for RegisterInput {
    fn from(req: RegisterRequest) -> Self {
        Self {
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            password: req.password,
            invite_token: req.invite_token,
        }
    }
}

/// POST /v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<ApiJson<TokenPair>, ApiError> {
    let tokens = AuthService::new(&state)
        .login(&request.email, &request.password)
        .await?;
    Ok(ApiJson(tokens))
}

/// POST /v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, ApiJson<UserSummary>), ApiError> {
    let user = AuthService::new(&state).register(request.into()).await?;
    Ok((StatusCode::CREATED, ApiJson(UserSummary::from(&user))))
}
