// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to storage.
//!
//! Each repository provides the operations one entity type needs. Soft-deleted
//! rows are invisible to every lookup.

pub mod invites;
pub mod roles;
pub mod users;

pub use invites::InviteRepository;
pub use roles::RoleRepository;
pub use users::UserRepository;
