// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Roles: named, assignable permission bundles.

use crate::models::Audit;

use super::permissions::*;

/// A role.
///
/// Permissions are kept in insertion order but behave as a set: duplicates
/// are dropped whenever the list is written. An inactive role grants nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub audit: Audit,
    pub name: String,
    permissions: Vec<Permission>,
    pub is_active: bool,
    /// System roles are seeded at startup and cannot be deactivated.
    pub is_system: bool,
}

impl Role {
    /// New active, non-system role.
    pub fn new(name: impl Into<String>, permissions: Vec<Permission>) -> Self {
        Self {
            audit: Audit::new(),
            name: name.into(),
            permissions: dedup(permissions),
            is_active: true,
            is_system: false,
        }
    }

    pub fn system(name: impl Into<String>, permissions: Vec<Permission>) -> Self {
        Self {
            is_system: true,
            ..Self::new(name, permissions)
        }
    }

    pub fn id(&self) -> uuid::Uuid {
        self.audit.id
    }

    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    pub fn set_permissions(&mut self, permissions: Vec<Permission>) {
        self.permissions = dedup(permissions);
    }

    pub fn grants(&self, permission: &Permission) -> bool {
        self.is_active && self.permissions.contains(permission)
    }

    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }
}

fn dedup(permissions: Vec<Permission>) -> Vec<Permission> {
    let mut out: Vec<Permission> = Vec::with_capacity(permissions.len());
    for permission in permissions {
        if !out.contains(&permission) {
            out.push(permission);
        }
    }
    out
}

pub const ADMIN_ROLE: &str = "admin";
pub const MANAGER_ROLE: &str = "manager";
pub const USER_ROLE: &str = "user";
pub const VIEWER_ROLE: &str = "viewer";

/// System roles seeded at startup.
pub fn default_roles() -> Vec<Role> {
    vec![
        Role::system(
            ADMIN_ROLE,
            vec![
                INVITE_CREATE,
                INVITE_DELETE,
                INVITE_LIST,
                TASK_CREATE,
                TASK_DELETE,
                TASK_UPDATE,
                TASK_VIEW,
                TASK_LIST,
                TASK_ASSIGN,
                TASK_CHANGE_STATUS,
                ROLE_CREATE,
                ROLE_UPDATE,
                ROLE_DELETE,
                ROLE_LIST,
                ROLE_ASSIGN,
                USER_VIEW,
                USER_LIST,
                USER_UPDATE,
                USER_DELETE,
                COMPANY_CREATE,
                COMPANY_UPDATE,
                COMPANY_DELETE,
                COMPANY_VIEW,
                COMPANY_LIST,
                COMMENT_CREATE,
                COMMENT_VIEW,
                COMMENT_UPDATE,
                COMMENT_DELETE,
            ],
        ),
        Role::system(
            MANAGER_ROLE,
            vec![
                INVITE_CREATE,
                INVITE_DELETE,
                INVITE_LIST,
                TASK_CREATE,
                TASK_DELETE,
                TASK_UPDATE,
                TASK_VIEW,
                TASK_LIST,
                TASK_ASSIGN,
                TASK_CHANGE_STATUS,
                ROLE_LIST,
                USER_VIEW,
                USER_LIST,
                USER_UPDATE,
                COMPANY_CREATE,
                COMPANY_UPDATE,
                COMPANY_DELETE,
                COMPANY_VIEW,
                COMPANY_LIST,
                COMMENT_CREATE,
                COMMENT_VIEW,
                COMMENT_UPDATE,
                COMMENT_DELETE,
            ],
        ),
        Role::system(
            USER_ROLE,
            vec![
                TASK_CREATE,
                TASK_UPDATE,
                TASK_VIEW,
                TASK_LIST,
                TASK_CHANGE_STATUS,
                USER_VIEW,
                USER_LIST,
                COMPANY_VIEW,
                COMPANY_LIST,
                COMMENT_CREATE,
                COMMENT_VIEW,
                COMMENT_UPDATE,
                COMMENT_DELETE,
            ],
        ),
        Role::system(
            VIEWER_ROLE,
            vec![
                TASK_VIEW,
                TASK_LIST,
                USER_VIEW,
                USER_LIST,
                COMPANY_VIEW,
                COMPANY_LIST,
                COMMENT_VIEW,
            ],
        ),
    ]
}
