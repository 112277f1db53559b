// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # HTTP Surface
//!
//! ## Routes
//!
//! | Method | Path | Auth |
//! |--------|------|------|
//! | GET | `/health` | - |
//! | POST | `/v1/auth/login` | - |
//! | POST | `/v1/auth/register` | - |
//! | GET | `/v1/permissions` | - |
//! | GET, POST | `/v1/roles` | Bearer |
//! | PATCH | `/v1/roles/{name}` | Bearer |
//! | GET | `/v1/users/me` | Bearer |
//! | POST | `/v1/users/{id}/roles` | Bearer |
//! | GET, POST | `/v1/invites` | Bearer |
//!
//! Every response carries `x-trace-id`. Errors are `application/problem+json`.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, Uri},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::auth::middleware::auth_middleware;
use crate::boundary::{problem_boundary, recover_panics, TRACE_ID_HEADER};
use crate::error::DomainError;
use crate::problem::{ApiError, MappedError, ProblemDetail};
use crate::state::AppState;

pub mod auth;
pub mod extract;
pub mod health;
pub mod invites;
pub mod permissions;
pub mod roles;
pub mod users;

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/roles", get(roles::list_roles).post(roles::create_role))
        .route("/roles/{name}", patch(roles::update_role))
        .route("/users/me", get(users::me))
        .route("/users/{id}/roles", post(users::assign_role))
        .route(
            "/invites",
            get(invites::list_invites).post(invites::create_invite),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let v1_routes = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .route("/permissions", get(permissions::list_permissions))
        .merge(protected)
        .method_not_allowed_fallback(method_not_allowed);

    Router::new()
        .route("/health", get(health::health))
        .nest("/v1", v1_routes)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(TRACE_ID_HEADER, MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    let trace_id = request
                        .headers()
                        .get(&TRACE_ID_HEADER)
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or("-");
                    tracing::info_span!(
                        "request",
                        trace_id = %trace_id,
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                }))
                .layer(PropagateRequestIdLayer::new(TRACE_ID_HEADER))
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(problem_boundary))
                .layer(middleware::from_fn(recover_panics)),
        )
}

async fn not_found(uri: Uri) -> ApiError {
    DomainError::not_found("route", uri.path()).into()
}

async fn method_not_allowed(method: Method, uri: Uri) -> Response {
    let problem = ProblemDetail::new(
        StatusCode::METHOD_NOT_ALLOWED,
        "Method Not Allowed",
        format!("{method} is not supported on {}", uri.path()),
    );
    let mut response = problem.clone().into_response();
    response.extensions_mut().insert(MappedError {
        problem,
        cause: None,
    });
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let app = router(AppState::for_tests());
        let _ = app.into_make_service();
    }
}
