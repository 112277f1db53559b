// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Domain error taxonomy.
//!
//! Every failure inside the service is normalized to a [`DomainError`] at the
//! point where it is first detected. The kind set is closed: the transport
//! boundary matches on [`ErrorKind`] exhaustively and never inspects messages.
//!
//! A `DomainError` carries:
//! - an immutable [`ErrorKind`]
//! - a message that is safe to show to clients
//! - optional metadata (`entity`, `field`, `value`, ...) for client detail
//! - an optional internal cause, kept for server logs only

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Boxed error used for wrapped internal causes.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Result alias used by services and repositories.
pub type DomainResult<T> = Result<T, DomainError>;

/// Closed set of failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Input failed validation
    Validation,
    /// Referenced entity does not exist
    NotFound,
    /// Entity with the same unique key already exists
    AlreadyExists,
    /// Caller is not authenticated
    Unauthorized,
    /// Caller is authenticated but lacks a permission
    Forbidden,
    /// Persistence collaborator failed
    Database,
    /// Anything else that should never happen
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::AlreadyExists => "ALREADY_EXISTS",
            ErrorKind::Unauthorized => "UNAUTHORIZED",
            ErrorKind::Forbidden => "FORBIDDEN",
            ErrorKind::Database => "DATABASE_ERROR",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified failure.
#[derive(Debug)]
pub struct DomainError {
    kind: ErrorKind,
    message: String,
    meta: BTreeMap<String, Value>,
    source: Option<BoxError>,
}

impl DomainError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            meta: BTreeMap::new(),
            source: None,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// `identifier` may be empty when the lookup key is not worth echoing.
    pub fn not_found(entity: &str, identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        let message = if identifier.is_empty() {
            format!("{entity} not found")
        } else {
            format!("{entity} {identifier} not found")
        };
        Self::new(ErrorKind::NotFound, message)
            .with_meta("entity", entity)
            .with_meta("identifier", identifier)
    }

    pub fn already_exists(entity: &str, field: &str, value: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::AlreadyExists,
            format!("{entity} with {field} already exists"),
        )
        .with_meta("entity", entity)
        .with_meta("field", field)
        .with_meta("value", value.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    pub fn database(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::new(ErrorKind::Database, message).with_source(source)
    }

    pub fn internal(message: impl Into<String>, source: Option<BoxError>) -> Self {
        let mut err = Self::new(ErrorKind::Internal, message);
        err.source = source;
        err
    }

    /// Login failure for both unknown accounts and wrong passwords.
    pub fn invalid_credentials() -> Self {
        Self::unauthorized("invalid email or password")
    }

    pub fn invalid_token() -> Self {
        Self::unauthorized("invalid or expired token")
    }

    /// Attach a metadata entry. Later entries overwrite earlier ones.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn meta(&self) -> &BTreeMap<String, Value> {
        &self.meta
    }

    /// Full diagnostic chain, including wrapped causes. Never sent to clients.
    pub fn diagnostic(&self) -> String {
        let mut out = self.to_string();
        let mut cause = StdError::source(self);
        while let Some(err) = cause {
            out.push_str(": ");
            out.push_str(&err.to_string());
            cause = err.source();
        }
        out
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl StdError for DomainError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|err| err.as_ref() as &(dyn StdError + 'static))
    }
}
