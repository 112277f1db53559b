// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for authenticated users.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use super::middleware::{authenticate, log_rejection};
use super::{AuthError, AuthenticatedUser};
use crate::boundary::trace_id;
use crate::state::AppState;

/// Extractor for authenticated users.
///
/// Reads the principal bound by [`super::middleware::auth_middleware`]. On
/// routes without the middleware it runs the same checks itself.
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // First check if middleware already set the user
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>().cloned() {
            return Ok(Auth(user));
        }

        let user = authenticate(&parts.headers, &state.tokens).inspect_err(|err| {
            log_rejection(*err, trace_id(&parts.extensions).as_deref(), parts.uri.path());
        })?;
        parts.extensions.insert(user.clone());
        Ok(Auth(user))
    }
}
