// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Services
//!
//! Business operations behind the HTTP handlers. Each service borrows the
//! shared [`AppState`](crate::state::AppState) for one request.
//!
//! Services only construct or forward [`DomainError`]s. Storage failures are
//! already classified by the time they arrive here.
//!
//! Protected operations load the acting user with its roles from storage
//! first, then check permissions against that fresh snapshot.

pub mod auth;
pub mod invites;
pub mod roles;
pub mod users;

use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::models::UserWithRoles;
use crate::storage::Storage;

pub use auth::{AuthService, RegisterInput};
pub use invites::{CreateInviteInput, InviteService};
pub use roles::{CreateRoleInput, RoleService, UpdateRoleInput};
pub use users::{Profile, UserService};

/// Load the acting user. A token whose subject no longer exists is treated
/// as unauthenticated.
pub(crate) async fn load_actor(storage: &Storage, actor_id: Uuid) -> DomainResult<UserWithRoles> {
    storage
        .users()
        .load_with_roles(actor_id)
        .await?
        .ok_or_else(|| DomainError::unauthorized("user no longer exists"))
}
