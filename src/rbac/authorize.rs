// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Permission checks over a principal's role snapshot.
//!
//! - No IO
//! - No caching: callers reload the principal for each request
//! - Inactive roles are skipped entirely

use std::collections::BTreeSet;

use crate::error::{DomainError, DomainResult};

use super::permissions::Permission;
use super::roles::Role;

/// Anything that carries a set of roles.
pub trait HasRoles {
    fn roles(&self) -> &[Role];
}

impl HasRoles for [Role] {
    fn roles(&self) -> &[Role] {
        self
    }
}

impl HasRoles for Vec<Role> {
    fn roles(&self) -> &[Role] {
        self
    }
}

fn active_roles<P: HasRoles + ?Sized>(principal: &P) -> impl Iterator<Item = &Role> {
    principal.roles().iter().filter(|role| role.is_active)
}

/// Union of the permissions of every active role.
pub fn effective_permissions<P: HasRoles + ?Sized>(principal: &P) -> BTreeSet<Permission> {
    active_roles(principal)
        .flat_map(|role| role.permissions().iter().cloned())
        .collect()
}

pub fn can<P: HasRoles + ?Sized>(principal: &P, permission: &Permission) -> bool {
    active_roles(principal).any(|role| role.grants(permission))
}

/// `true` for an empty list.
pub fn can_all<P: HasRoles + ?Sized>(principal: &P, permissions: &[Permission]) -> bool {
    let granted = effective_permissions(principal);
    permissions.iter().all(|p| granted.contains(p))
}

/// `false` for an empty list.
pub fn can_any<P: HasRoles + ?Sized>(principal: &P, permissions: &[Permission]) -> bool {
    let granted = effective_permissions(principal);
    permissions.iter().any(|p| granted.contains(p))
}

/// Guard used before protected operations.
pub fn require<P: HasRoles + ?Sized>(principal: &P, permission: &Permission) -> DomainResult<()> {
    if can(principal, permission) {
        Ok(())
    } else {
        Err(
            DomainError::forbidden(format!("missing permission: {permission}"))
                .with_meta("permission", permission.as_str()),
        )
    }
}

/// Guard used before handing permissions to someone else.
///
/// A principal may only grant permissions it holds itself. Fails with
/// `Forbidden` naming the first permission outside its effective set.
pub fn require_grantable<'a, P, I>(principal: &P, granted: I) -> DomainResult<()>
where
    P: HasRoles + ?Sized,
    I: IntoIterator<Item = &'a Permission>,
{
    let held = effective_permissions(principal);
    match granted.into_iter().find(|p| !held.contains(*p)) {
        None => Ok(()),
        Some(permission) => Err(DomainError::forbidden(format!(
            "cannot grant permission not held: {permission}"
        ))
        .with_meta("permission", permission.as_str())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::rbac::permissions::*;

    fn editor() -> Role {
        Role::new("editor", vec![TASK_CREATE])
    }

    #[test]
    fn scenario_active_editor() {
        let user = vec![editor()];
        assert!(can(&user, &TASK_CREATE));
        assert!(!can(&user, &TASK_DELETE));
    }

    #[test]
    fn scenario_inactive_editor() {
        let user = vec![editor().deactivated()];
        assert!(!can(&user, &TASK_CREATE));
        assert!(effective_permissions(&user).is_empty());
    }

    #[test]
    fn effective_permissions_is_union_of_active_roles() {
        let roles = vec![
            Role::new("a", vec![TASK_CREATE, TASK_VIEW]),
            Role::new("b", vec![TASK_VIEW, COMMENT_VIEW]),
            Role::new("c", vec![ROLE_CREATE, USER_DELETE]).deactivated(),
        ];

        let expected: BTreeSet<Permission> =
            [TASK_CREATE, TASK_VIEW, COMMENT_VIEW].into_iter().collect();
        assert_eq!(effective_permissions(&roles), expected);

        let mut reversed = roles.clone();
        reversed.reverse();
        assert_eq!(effective_permissions(&reversed), expected);
    }

    #[test]
    fn inactive_roles_contribute_nothing_for_every_subset() {
        let pool = [
            Role::new("a", vec![TASK_CREATE]),
            Role::new("b", vec![TASK_DELETE, TASK_CREATE]),
            Role::new("c", vec![ROLE_ASSIGN]),
        ];

        // Every active/inactive combination of the pool.
        for mask in 0u8..8 {
            let roles: Vec<Role> = pool
                .iter()
                .enumerate()
                .map(|(i, role)| {
                    if mask & (1 << i) == 0 {
                        role.clone().deactivated()
                    } else {
                        role.clone()
                    }
                })
                .collect();

            let expected: BTreeSet<Permission> = roles
                .iter()
                .filter(|r| r.is_active)
                .flat_map(|r| r.permissions().to_vec())
                .collect();
            assert_eq!(effective_permissions(&roles), expected, "mask {mask}");
        }
    }

    #[test]
    fn empty_lists_are_vacuous() {
        let nobody: Vec<Role> = vec![];
        let admin = crate::rbac::default_roles();

        assert!(can_all(&nobody, &[]));
        assert!(can_all(admin.as_slice(), &[]));
        assert!(!can_any(&nobody, &[]));
        assert!(!can_any(admin.as_slice(), &[]));
    }

    #[test]
    fn can_all_and_can_any() {
        let user = vec![Role::new("r", vec![TASK_CREATE, TASK_VIEW])];
        assert!(can_all(&user, &[TASK_CREATE, TASK_VIEW]));
        assert!(!can_all(&user, &[TASK_CREATE, TASK_DELETE]));
        assert!(can_any(&user, &[TASK_DELETE, TASK_VIEW]));
        assert!(!can_any(&user, &[TASK_DELETE, ROLE_CREATE]));
    }

    #[test]
    fn require_reports_missing_permission() {
        let user = vec![editor()];
        assert!(require(&user, &TASK_CREATE).is_ok());

        let err = require(&user, &ROLE_CREATE).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
        assert_eq!(err.meta()["permission"], "role:create");
    }

    #[test]
    fn grants_are_capped_by_held_permissions() {
        let manager = vec![Role::new("manager", vec![TASK_CREATE, INVITE_CREATE])];
        assert!(require_grantable(&manager, &[TASK_CREATE]).is_ok());
        assert!(require_grantable(&manager, &[] as &[Permission]).is_ok());

        let admin = Role::new("admin", vec![TASK_CREATE, ROLE_CREATE]);
        let err = require_grantable(&manager, admin.permissions()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
        assert_eq!(err.meta()["permission"], "role:create");

        let dormant = vec![Role::new("manager", vec![ROLE_CREATE]).deactivated()];
        assert!(require_grantable(&dormant, &[ROLE_CREATE]).is_err());
    }
}
