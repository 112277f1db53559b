// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Error-to-transport mapping.
//!
//! Handlers return [`ApiError`]. Its `IntoResponse` impl runs the
//! [`ErrorMapper`] table and stores the result on the response, where the
//! request boundary (`crate::boundary::problem_boundary`) completes it with the
//! request path and trace id before it is written out as
//! `application/problem+json`.

use std::collections::BTreeMap;

use axum::{
    extract::rejection::JsonRejection,
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::error::{BoxError, DomainError, ErrorKind};

pub const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

const PROBLEM_TYPE_BASE: &str = "https://taskhub.dev/problems/";

/// Detail shown for every failure that must not leak specifics.
const GENERIC_DETAIL: &str = "An unexpected error occurred";

/// Wire-level error body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetail {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, Value>,
}

impl ProblemDetail {
    pub fn new(status: StatusCode, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            problem_type: problem_type(status),
            title: title.into(),
            status: status.as_u16(),
            detail: Some(detail.into()),
            instance: None,
            trace_id: None,
            meta: BTreeMap::new(),
        }
    }

    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    pub fn with_trace_id(mut self, trace_id: Option<String>) -> Self {
        self.trace_id = trace_id;
        self
    }

    pub fn with_meta(mut self, meta: BTreeMap<String, Value>) -> Self {
        self.meta = meta;
        self
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ProblemDetail {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut response = (status, Json(self)).into_response();
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(PROBLEM_CONTENT_TYPE));
        response
    }
}

fn problem_type(status: StatusCode) -> String {
    let slug = match status {
        StatusCode::BAD_REQUEST => "bad-request",
        StatusCode::UNAUTHORIZED => "unauthorized",
        StatusCode::FORBIDDEN => "forbidden",
        StatusCode::NOT_FOUND => "not-found",
        StatusCode::METHOD_NOT_ALLOWED => "method-not-allowed",
        StatusCode::CONFLICT => "conflict",
        StatusCode::INTERNAL_SERVER_ERROR => "internal-error",
        _ => "unknown",
    };
    format!("{PROBLEM_TYPE_BASE}{slug}")
}

/// Error type returned by HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Classified failure from the service layers
    Domain(DomainError),
    /// Anything that escaped classification; always reported as a 500
    Unclassified(BoxError),
}

impl ApiError {
    pub fn unclassified(err: impl Into<BoxError>) -> Self {
        ApiError::Unclassified(err.into())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Domain(DomainError::validation(format!(
            "invalid request body: {}",
            rejection.body_text()
        )))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Domain(err) => write!(f, "{err}"),
            ApiError::Unclassified(err) => write!(f, "unclassified error: {err}"),
        }
    }
}

/// Result of mapping an [`ApiError`].
///
/// Travels in the response extensions so the request boundary can add the
/// trace id and path, and log `cause` server-side.
#[derive(Debug, Clone)]
pub struct MappedError {
    pub problem: ProblemDetail,
    pub cause: Option<String>,
}

/// Stateless kind → (status, title) table.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorMapper;

impl ErrorMapper {
    pub fn status_and_title(kind: ErrorKind) -> (StatusCode, &'static str) {
        match kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "Validation Error"),
            ErrorKind::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            ErrorKind::Forbidden => (StatusCode::FORBIDDEN, "Forbidden"),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "Resource Not Found"),
            ErrorKind::AlreadyExists => (StatusCode::CONFLICT, "Resource Already Exists"),
            ErrorKind::Database | ErrorKind::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        }
    }

    pub fn map(&self, err: &ApiError) -> MappedError {
        match err {
            ApiError::Domain(domain) => match domain.kind() {
                ErrorKind::Database | ErrorKind::Internal => MappedError {
                    problem: Self::internal_problem(),
                    cause: Some(domain.diagnostic()),
                },
                kind => {
                    let (status, title) = Self::status_and_title(kind);
                    MappedError {
                        problem: ProblemDetail::new(status, title, domain.message())
                            .with_meta(domain.meta().clone()),
                        cause: None,
                    }
                }
            },
            ApiError::Unclassified(inner) => MappedError {
                problem: Self::internal_problem(),
                cause: Some(inner.to_string()),
            },
        }
    }

    pub fn internal_problem() -> ProblemDetail {
        let (status, title) = Self::status_and_title(ErrorKind::Internal);
        ProblemDetail::new(status, title, GENERIC_DETAIL)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mapped = ErrorMapper.map(&self);
        let mut response = mapped.problem.clone().into_response();
        response.extensions_mut().insert(mapped);
        response
    }
}
