// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Invite repository.
//!
//! Invites are single-use registration tokens. Redemption happens in
//! [`super::UserRepository::create_with_invite`] so the new user and the
//! consumed invite are written together.

use uuid::Uuid;

use super::super::{Storage, StorageError, StorageResult};
use crate::models::Invite;

/// Repository for invite operations.
pub struct InviteRepository<'a> {
    storage: &'a Storage,
}

impl<'a> InviteRepository<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Insert an invite. Tokens are unique.
    pub async fn create(&self, invite: &Invite) -> StorageResult<()> {
        let mut tables = self.storage.write().await?;
        if tables
            .invites
            .values()
            .any(|existing| existing.token == invite.token)
        {
            return Err(StorageError::Conflict {
                entity: "invite",
                field: "token",
                value: invite.token.clone(),
            });
        }
        tables.invites.insert(invite.id(), invite.clone());
        Ok(())
    }

    pub async fn find_by_token(&self, token: &str) -> StorageResult<Option<Invite>> {
        let tables = self.storage.read().await?;
        Ok(tables
            .invites
            .values()
            .find(|invite| invite.token == token && !invite.audit.is_deleted())
            .cloned())
    }

    /// Invites created by `user_id`, oldest first.
    pub async fn list_by_creator(&self, user_id: Uuid) -> StorageResult<Vec<Invite>> {
        let tables = self.storage.read().await?;
        let mut invites: Vec<Invite> = tables
            .invites
            .values()
            .filter(|invite| invite.created_by == Some(user_id) && !invite.audit.is_deleted())
            .cloned()
            .collect();
        invites.sort_by_key(|invite| invite.audit.created_at);
        Ok(invites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn tokens_are_unique() {
        let storage = Storage::new();
        let repo = storage.invites();
        repo.create(&Invite::new("abc", None, vec![], None)).await.unwrap();

        let err = repo
            .create(&Invite::new("abc", None, vec![], None))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict { field: "token", .. }));
    }

    #[tokio::test]
    async fn list_by_creator_filters_owner() {
        let storage = Storage::new();
        let repo = storage.invites();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        repo.create(&Invite::new("a1", None, vec![], Some(alice))).await.unwrap();
        repo.create(&Invite::new("b1", None, vec![], Some(bob))).await.unwrap();
        repo.create(&Invite::new("a2", None, vec![], Some(alice))).await.unwrap();

        let mine = repo.list_by_creator(alice).await.unwrap();
        let mut tokens: Vec<&str> = mine.iter().map(|i| i.token.as_str()).collect();
        tokens.sort();
        assert_eq!(tokens, ["a1", "a2"]);
    }

    #[tokio::test]
    async fn unknown_token_is_none() {
        let storage = Storage::new();
        assert!(storage.invites().find_by_token("nope").await.unwrap().is_none());
    }
}
