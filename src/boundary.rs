// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request boundary.
//!
//! Two middlewares sit between the transport layers and the routes:
//!
//! - [`problem_boundary`] completes every mapped problem with the request path
//!   and trace id, and logs the internal cause of 5xx responses.
//! - [`recover_panics`] turns a panic inside a handler into the generic 500
//!   problem. The serving process is unaffected.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use axum::{
    extract::Request,
    http::{header::HeaderName, Extensions},
    middleware::Next,
    response::{IntoResponse, Response},
};
use futures_util::FutureExt;
use tower_http::request_id::RequestId;
use tracing::{error, warn};

use crate::problem::{ErrorMapper, MappedError};

/// Correlation header. Reused when the client sends one.
pub const TRACE_ID_HEADER: HeaderName = HeaderName::from_static("x-trace-id");

/// Trace id assigned to the current request, if any.
pub fn trace_id(extensions: &Extensions) -> Option<String> {
    extensions
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .map(str::to_owned)
}

/// Render mapped errors with request context.
pub async fn problem_boundary(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let method = request.method().clone();
    let trace = trace_id(request.extensions());

    let mut response = next.run(request).await;
    let Some(mapped) = response.extensions_mut().remove::<MappedError>() else {
        return response;
    };

    if let Some(cause) = &mapped.cause {
        error!(
            trace_id = trace.as_deref().unwrap_or("-"),
            %method,
            path = %path,
            status = mapped.problem.status,
            cause = %cause,
            "request failed"
        );
    }

    let (mut parts, _) = response.into_parts();
    let rendered = mapped
        .problem
        .with_instance(path)
        .with_trace_id(trace)
        .into_response();
    let (rendered_parts, body) = rendered.into_parts();
    parts.headers.extend(rendered_parts.headers);
    parts.status = rendered_parts.status;
    Response::from_parts(parts, body)
}

/// Catch panics raised while handling a request.
pub async fn recover_panics(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let method = request.method().clone();
    let trace = trace_id(request.extensions());

    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(payload) => {
            error!(
                trace_id = trace.as_deref().unwrap_or("-"),
                %method,
                path = %path,
                panic = panic_message(payload.as_ref()),
                "handler panicked"
            );
            let mut response = ErrorMapper::internal_problem().into_response();
            response.extensions_mut().insert(MappedError {
                problem: ErrorMapper::internal_problem(),
                cause: None,
            });
            response
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        warn!("panic payload is not a string");
        "<non-string panic payload>"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;
    use crate::problem::{ApiError, PROBLEM_CONTENT_TYPE};
    use axum::{
        body::{to_bytes, Body},
        http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
        middleware::from_fn,
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    async fn explode() -> &'static str {
        panic!("boom at depth 3");
    }

    async fn forbidden() -> Result<&'static str, ApiError> {
        Err(DomainError::forbidden("missing permission: role:create").into())
    }

    async fn ok() -> &'static str {
        "fine"
    }

    fn app() -> Router {
        Router::new()
            .route("/explode", get(explode))
            .route("/forbidden", get(forbidden))
            .route("/ok", get(ok))
            .layer(from_fn(recover_panics))
            .layer(from_fn(problem_boundary))
    }

    async fn json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get_request(uri: &str) -> Request {
        axum::http::Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn panic_becomes_generic_500_and_server_keeps_serving() {
        let app = app();

        let response = app.clone().oneshot(get_request("/explode")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json(response).await;
        assert_eq!(body["title"], "Internal Server Error");
        assert_eq!(body["instance"], "/explode");
        assert!(!body.to_string().contains("boom"));

        let response = app.oneshot(get_request("/ok")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn problem_gets_path_and_content_type() {
        let response = app().oneshot(get_request("/forbidden")).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            response.headers()[CONTENT_TYPE],
            HeaderValue::from_static(PROBLEM_CONTENT_TYPE)
        );
        assert!(response.extensions().get::<MappedError>().is_none());

        let body = json(response).await;
        assert_eq!(body["instance"], "/forbidden");
        assert_eq!(body["detail"], "missing permission: role:create");
        assert!(body.get("traceId").is_none());
    }

    #[tokio::test]
    async fn trace_id_comes_from_request_id_extension() {
        let mut request = get_request("/forbidden");
        request
            .extensions_mut()
            .insert(RequestId::new(HeaderValue::from_static("trace-abc")));

        let body = json(app().oneshot(request).await.unwrap()).await;
        assert_eq!(body["traceId"], "trace-abc");
    }

    #[test]
    fn panic_message_reads_both_string_kinds() {
        let s: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(s.as_ref()), "static");
        let owned: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(owned.as_ref()), "owned");
    }
}
