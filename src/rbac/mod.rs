// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Role-Based Access Control
//!
//! - `permissions`: the permission catalogue and its registry
//! - `roles`: role bundles and the seeded system roles
//! - `authorize`: pure permission checks over a principal's roles

pub mod authorize;
pub mod permissions;
pub mod roles;

pub use authorize::{
    can, can_all, can_any, effective_permissions, require, require_grantable,
    HasRoles,
};
pub use permissions::{Permission, PermissionGroup, PermissionInfo, PermissionRegistry};
pub use roles::{default_roles, Role};
