// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication middleware for Axum.
//!
//! Applied to the authenticated router subtree with
//! `axum::middleware::from_fn_with_state(state, auth_middleware)`.
//!
//! | State              | Outcome                                     |
//! |--------------------|---------------------------------------------|
//! | no header          | 401 "authorization header is required"      |
//! | not `Bearer <tok>` | 401 "invalid authorization header format"   |
//! | token rejected     | 401 "invalid or expired token"              |
//! | refresh token      | 401 "invalid token type"                    |
//! | access token       | [`AuthenticatedUser`] bound, request continues |
//!
//! A failure short-circuits: the downstream handler never runs.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use super::claims::TokenType;
use super::token::TokenService;
use super::{AuthError, AuthenticatedUser};
use crate::boundary::trace_id;
use crate::state::AppState;

/// Run the header → token → principal state machine.
pub fn authenticate(headers: &HeaderMap, tokens: &TokenService) -> Result<AuthenticatedUser, AuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    let token = bearer_token(header).ok_or(AuthError::InvalidAuthHeader)?;
    let claims = tokens.validate(token)?;

    if claims.token_type != TokenType::Access {
        return Err(AuthError::WrongTokenType);
    }

    Ok(AuthenticatedUser::from_claims(claims))
}

/// Exactly two space-separated parts: `Bearer` and a non-empty token.
fn bearer_token(header: &str) -> Option<&str> {
    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Some(token),
        _ => None,
    }
}

/// Log a rejected request. The token itself is never logged.
pub(crate) fn log_rejection(err: AuthError, trace: Option<&str>, path: &str) {
    warn!(
        trace_id = trace.unwrap_or("-"),
        path,
        reason = err.error_code(),
        "authentication failed"
    );
}

/// Authentication middleware function.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(request.headers(), &state.tokens) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(err) => {
            let trace = trace_id(request.extensions());
            log_rejection(err, trace.as_deref(), request.uri().path());
            err.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::Duration;
    use uuid::Uuid;

    fn tokens() -> TokenService {
        TokenService::new(b"middleware-test-secret")
    }

    fn headers(value: &[u8]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_bytes(value).unwrap());
        headers
    }

    #[test]
    fn missing_header() {
        assert_eq!(
            authenticate(&HeaderMap::new(), &tokens()),
            Err(AuthError::MissingAuthHeader)
        );
    }

    #[test]
    fn malformed_headers() {
        let svc = tokens();
        for value in [
            &b"Basic dXNlcjpwYXNz"[..],
            b"Bearer",
            b"Bearer ",
            b"bearer abc",
            b"Bearer a b",
            b"Bearer  abc",
            b"Token abc",
            b"Bearer \xff\xfe",
        ] {
            assert_eq!(
                authenticate(&headers(value), &svc),
                Err(AuthError::InvalidAuthHeader),
                "{:?}",
                String::from_utf8_lossy(value)
            );
        }
    }

    #[test]
    fn invalid_token() {
        assert_eq!(
            authenticate(&headers(b"Bearer not.a.jwt"), &tokens()),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn refresh_token_is_rejected_despite_valid_signature() {
        let svc = tokens();
        let id = Uuid::new_v4();
        let refresh = svc
            .issue(id, "u@x.io", TokenType::Refresh, Duration::minutes(10))
            .unwrap();
        assert!(svc.validate(&refresh).is_ok());

        let value = format!("Bearer {refresh}");
        assert_eq!(
            authenticate(&headers(value.as_bytes()), &svc),
            Err(AuthError::WrongTokenType)
        );
    }

    #[test]
    fn access_token_binds_principal() {
        let svc = tokens();
        let id = Uuid::new_v4();
        let access = svc
            .issue(id, "u@x.io", TokenType::Access, Duration::minutes(10))
            .unwrap();

        let value = format!("Bearer {access}");
        let user = authenticate(&headers(value.as_bytes()), &svc).unwrap();
        assert_eq!(user.user_id, id);
        assert_eq!(user.email, "u@x.io");
    }
}
