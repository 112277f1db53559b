// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Persisted Entities
//!
//! Every persisted entity carries an [`Audit`] value as its `audit` field:
//! identity plus creation, update and soft-delete timestamps.
//!
//! ## Entities
//!
//! - [`User`]: account with a password hash and the ids of its roles
//! - [`UserWithRoles`]: the principal snapshot loaded for each request
//! - [`Invite`]: single-use registration token granting a set of roles
//!
//! Roles live in [`crate::rbac::roles`].

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::rbac::{HasRoles, Role};

// =============================================================================
// Audit
// =============================================================================

/// Identity and audit timestamps shared by all entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Audit {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Audit {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Bump `updated_at`.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

impl Default for Audit {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Users
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub audit: Audit,
    /// Normalized (trimmed, lower-case) address
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// PHC-encoded password hash
    pub password_hash: String,
    pub role_ids: Vec<Uuid>,
}

impl User {
    pub fn id(&self) -> Uuid {
        self.audit.id
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// A user together with its current roles.
#[derive(Debug, Clone)]
pub struct UserWithRoles {
    pub user: User,
    pub roles: Vec<Role>,
}

impl HasRoles for UserWithRoles {
    fn roles(&self) -> &[Role] {
        &self.roles
    }
}

// =============================================================================
// Invites
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invite {
    pub audit: Audit,
    /// Token presented at registration
    pub token: String,
    pub description: Option<String>,
    /// Roles granted to the registering user
    pub role_ids: Vec<Uuid>,
    /// `None` for invites seeded at startup
    pub created_by: Option<Uuid>,
    pub used_by: Option<Uuid>,
}

impl Invite {
    pub fn new(
        token: impl Into<String>,
        description: Option<String>,
        role_ids: Vec<Uuid>,
        created_by: Option<Uuid>,
    ) -> Self {
        Self {
            audit: Audit::new(),
            token: token.into(),
            description,
            role_ids,
            created_by,
            used_by: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.audit.id
    }

    pub fn is_used(&self) -> bool {
        self.used_by.is_some()
    }
}
