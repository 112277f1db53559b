// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::response::{IntoResponse, Response};

use crate::error::DomainError;
use crate::problem::ApiError;

/// Authentication error type.
///
/// Every variant is a 401. Token failures collapse into a single
/// [`AuthError::InvalidToken`] so callers cannot learn why a token was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// No authorization header present
    MissingAuthHeader,
    /// Header is not valid UTF-8 or not a `Bearer <token>` pair
    InvalidAuthHeader,
    /// Bad signature, wrong algorithm, expired or malformed
    InvalidToken,
    /// A refresh token was presented where an access token is required
    WrongTokenType,
}

impl AuthError {
    /// Reason code used in logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "missing_auth_header",
            AuthError::InvalidAuthHeader => "invalid_auth_header",
            AuthError::InvalidToken => "invalid_token",
            AuthError::WrongTokenType => "wrong_token_type",
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingAuthHeader => write!(f, "authorization header is required"),
            AuthError::InvalidAuthHeader => write!(f, "invalid authorization header format"),
            AuthError::InvalidToken => write!(f, "invalid or expired token"),
            AuthError::WrongTokenType => write!(f, "invalid token type"),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<AuthError> for DomainError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidToken => DomainError::invalid_token(),
            other => DomainError::unauthorized(other.to_string()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(DomainError::from(self)).into_response()
    }
}
