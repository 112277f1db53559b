// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Permission identifiers and the process-wide registry.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Permission identifier.
///
/// Permissions are opaque namespaced strings (e.g. `"task:create"`). Only
/// names known to the [`PermissionRegistry`] can be granted to a role.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

// Invites
pub const INVITE_CREATE: Permission = Permission::from_static("invite:create");
pub const INVITE_DELETE: Permission = Permission::from_static("invite:delete");
pub const INVITE_LIST: Permission = Permission::from_static("invite:list");

// Tasks
pub const TASK_CREATE: Permission = Permission::from_static("task:create");
pub const TASK_DELETE: Permission = Permission::from_static("task:delete");
pub const TASK_UPDATE: Permission = Permission::from_static("task:update");
pub const TASK_VIEW: Permission = Permission::from_static("task:view");
pub const TASK_LIST: Permission = Permission::from_static("task:list");
pub const TASK_ASSIGN: Permission = Permission::from_static("task:assign");
pub const TASK_CHANGE_STATUS: Permission = Permission::from_static("task:changeStatus");

// Roles
pub const ROLE_CREATE: Permission = Permission::from_static("role:create");
pub const ROLE_UPDATE: Permission = Permission::from_static("role:update");
pub const ROLE_DELETE: Permission = Permission::from_static("role:delete");
pub const ROLE_LIST: Permission = Permission::from_static("role:list");
pub const ROLE_ASSIGN: Permission = Permission::from_static("role:assign");

// Users
pub const USER_VIEW: Permission = Permission::from_static("user:view");
pub const USER_LIST: Permission = Permission::from_static("user:list");
pub const USER_UPDATE: Permission = Permission::from_static("user:update");
pub const USER_DELETE: Permission = Permission::from_static("user:delete");

// Companies
pub const COMPANY_CREATE: Permission = Permission::from_static("company:create");
pub const COMPANY_UPDATE: Permission = Permission::from_static("company:update");
pub const COMPANY_DELETE: Permission = Permission::from_static("company:delete");
pub const COMPANY_VIEW: Permission = Permission::from_static("company:view");
pub const COMPANY_LIST: Permission = Permission::from_static("company:list");

// Comments
pub const COMMENT_CREATE: Permission = Permission::from_static("comment:create");
pub const COMMENT_VIEW: Permission = Permission::from_static("comment:view");
pub const COMMENT_UPDATE: Permission = Permission::from_static("comment:update");
pub const COMMENT_DELETE: Permission = Permission::from_static("comment:delete");

/// Display metadata for a permission. Never used for decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionInfo {
    pub permission: Permission,
    pub description: &'static str,
    pub group: &'static str,
}

impl PermissionInfo {
    pub fn name(&self) -> &str {
        self.permission.as_str()
    }
}

/// One entry in the permission listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionEntry {
    pub name: String,
    pub description: String,
}

/// Permissions of one presentation group, sorted by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionGroup {
    pub group: String,
    pub permissions: Vec<PermissionEntry>,
}

/// Read-only catalogue of recognized permissions.
///
/// Built once at startup and shared behind an `Arc`; it has no mutating API.
#[derive(Debug, Clone)]
pub struct PermissionRegistry {
    entries: BTreeMap<String, PermissionInfo>,
}

impl PermissionRegistry {
    /// Build a registry from `(permission, description, group)` rows.
    pub fn new(rows: impl IntoIterator<Item = (Permission, &'static str, &'static str)>) -> Self {
        let entries = rows
            .into_iter()
            .map(|(permission, description, group)| {
                (
                    permission.as_str().to_string(),
                    PermissionInfo {
                        permission,
                        description,
                        group,
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// The full application catalogue.
    pub fn standard() -> Self {
        Self::new([
            (INVITE_CREATE, "Create invite links", "Invites"),
            (INVITE_DELETE, "Delete invite links", "Invites"),
            (INVITE_LIST, "View the list of invite links", "Invites"),
            (TASK_CREATE, "Create new tasks", "Tasks"),
            (TASK_DELETE, "Delete tasks", "Tasks"),
            (TASK_UPDATE, "Edit tasks", "Tasks"),
            (TASK_VIEW, "View task details", "Tasks"),
            (TASK_LIST, "View the list of tasks", "Tasks"),
            (TASK_ASSIGN, "Assign tasks to users", "Tasks"),
            (TASK_CHANGE_STATUS, "Change task status", "Tasks"),
            (ROLE_CREATE, "Create new roles", "Roles"),
            (ROLE_UPDATE, "Edit roles", "Roles"),
            (ROLE_DELETE, "Delete roles", "Roles"),
            (ROLE_LIST, "View the list of roles", "Roles"),
            (ROLE_ASSIGN, "Assign roles to users", "Roles"),
            (USER_VIEW, "View user profiles", "Users"),
            (USER_LIST, "View the list of users", "Users"),
            (USER_UPDATE, "Edit users", "Users"),
            (USER_DELETE, "Delete users", "Users"),
            (COMPANY_CREATE, "Create companies", "Companies"),
            (COMPANY_UPDATE, "Edit companies", "Companies"),
            (COMPANY_DELETE, "Delete companies", "Companies"),
            (COMPANY_VIEW, "View company details", "Companies"),
            (COMPANY_LIST, "View the list of companies", "Companies"),
            (COMMENT_CREATE, "Write comments", "Comments"),
            (COMMENT_VIEW, "View comments", "Comments"),
            (COMMENT_UPDATE, "Edit comments", "Comments"),
            (COMMENT_DELETE, "Delete comments", "Comments"),
        ])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn lookup(&self, name: &str) -> DomainResult<&PermissionInfo> {
        self.entries
            .get(name)
            .ok_or_else(|| DomainError::not_found("permission", name))
    }

    /// Every entry, ordered by `(group, name)`.
    pub fn all_grouped(&self) -> Vec<&PermissionInfo> {
        let mut all: Vec<&PermissionInfo> = self.entries.values().collect();
        all.sort_by(|a, b| a.group.cmp(b.group).then_with(|| a.name().cmp(b.name())));
        all
    }

    /// Listing shape: groups sorted by name, permissions sorted within.
    pub fn groups(&self) -> Vec<PermissionGroup> {
        let mut groups: Vec<PermissionGroup> = Vec::new();
        for info in self.all_grouped() {
            let entry = PermissionEntry {
                name: info.name().to_string(),
                description: info.description.to_string(),
            };
            match groups.last_mut() {
                Some(last) if last.group == info.group => last.permissions.push(entry),
                _ => groups.push(PermissionGroup {
                    group: info.group.to_string(),
                    permissions: vec![entry],
                }),
            }
        }
        groups
    }

    /// Resolve raw names into registered permissions.
    ///
    /// Fails on the first unknown name. Duplicates collapse onto their first
    /// occurrence.
    pub fn resolve_all<I, S>(&self, names: I) -> DomainResult<Vec<Permission>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut resolved: Vec<Permission> = Vec::new();
        for name in names {
            let name = name.as_ref();
            let info = self.entries.get(name).ok_or_else(|| {
                DomainError::validation(format!("unknown permission: {name}"))
                    .with_meta("field", "permissions")
                    .with_meta("value", name)
            })?;
            if !resolved.contains(&info.permission) {
                resolved.push(info.permission.clone());
            }
        }
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn standard_catalogue_is_complete() {
        let registry = PermissionRegistry::standard();
        assert_eq!(registry.len(), 28);
        for name in [
            "invite:list",
            "task:changeStatus",
            "role:assign",
            "user:delete",
            "company:view",
            "comment:update",
        ] {
            assert!(registry.contains(name), "{name}");
        }
    }

    #[test]
    fn lookup_unknown_is_not_found() {
        let registry = PermissionRegistry::standard();
        assert_eq!(registry.lookup("task:create").unwrap().group, "Tasks");

        let err = registry.lookup("task:fly").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.meta()["identifier"], "task:fly");
    }

    #[test]
    fn all_grouped_orders_by_group_then_name() {
        let registry = PermissionRegistry::standard();
        let all = registry.all_grouped();
        let keys: Vec<(&str, &str)> = all.iter().map(|i| (i.group, i.name())).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(keys.first(), Some(&("Comments", "comment:create")));
    }

    #[test]
    fn groups_listing_shape() {
        let registry = PermissionRegistry::standard();
        let groups = registry.groups();
        let names: Vec<&str> = groups.iter().map(|g| g.group.as_str()).collect();
        assert_eq!(
            names,
            ["Comments", "Companies", "Invites", "Roles", "Tasks", "Users"]
        );

        let roles = &groups[3];
        let role_names: Vec<&str> = roles.permissions.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            role_names,
            ["role:assign", "role:create", "role:delete", "role:list", "role:update"]
        );

        let json = serde_json::to_value(&groups[0]).unwrap();
        assert!(json["permissions"][0]["description"].is_string());
    }

    #[test]
    fn resolve_all_dedupes_and_keeps_order() {
        let registry = PermissionRegistry::standard();
        let resolved = registry
            .resolve_all(["task:view", "task:create", "task:view"])
            .unwrap();
        assert_eq!(resolved, vec![TASK_VIEW, TASK_CREATE]);
    }

    #[test]
    fn resolve_all_names_offending_permission() {
        let registry = PermissionRegistry::standard();
        let err = registry
            .resolve_all(["task:create", "task:teleport"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.message().contains("task:teleport"));
        assert_eq!(err.meta()["field"], "permissions");
        assert_eq!(err.meta()["value"], "task:teleport");
    }
}
