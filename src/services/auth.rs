// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login and registration.

use tracing::{info, warn};

use crate::auth::credentials::{Email, Password};
use crate::auth::password::{hash_blocking, verify_blocking};
use crate::auth::TokenPair;
use crate::error::{DomainError, DomainResult};
use crate::models::{Audit, User};
use crate::state::AppState;

/// Registration request after transport decoding.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub invite_token: String,
}

pub struct AuthService<'a> {
    state: &'a AppState,
}

impl<'a> AuthService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Exchange credentials for a token pair.
    ///
    /// Unknown email and wrong password fail identically. An unknown email
    /// still pays for one hash so the two paths take comparable time.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<TokenPair> {
        let email = Email::parse(email)?;
        let hasher = self.state.hasher.clone();

        let Some(user) = self.state.storage.users().find_by_email(email.as_str()).await? else {
            // Same hashing cost as a wrong password; the digest is discarded.
        let _timing_pad = hash_blocking(hasher, password.to_string()).await;
            warn!(email_domain = email.domain(), "login failed");
            return Err(DomainError::invalid_credentials());
        };

        if !verify_blocking(hasher, user.password_hash.clone(), password.to_string()).await? {
            warn!(user_id = %user.id(), "login failed");
            return Err(DomainError::invalid_credentials());
        }

        let tokens = self
            .state
            .tokens
            .issue_pair(user.id(), &user.email, self.state.token_lifetimes)?;
        info!(user_id = %user.id(), "user logged in");
        Ok(tokens)
    }

    /// Create an account from a single-use invite.
    pub async fn register(&self, input: RegisterInput) -> DomainResult<User> {
        let email = Email::parse(&input.email)?;
        let password = Password::parse(&input.password)?;
        let storage = &self.state.storage;

        if storage.users().find_by_email(email.as_str()).await?.is_some() {
            return Err(DomainError::already_exists("user", "email", email.as_str()));
        }

        let invite = storage
            .invites()
            .find_by_token(&input.invite_token)
            .await?
            .ok_or_else(|| DomainError::not_found("invite", input.invite_token.as_str()))?;
        if invite.is_used() {
            return Err(DomainError::validation("invite has already been used")
                .with_meta("field", "inviteToken"));
        }

        let password_hash = hash_blocking(self.state.hasher.clone(), password.into_inner()).await?;
        let user = User {
            audit: Audit::new(),
            email: email.as_str().to_string(),
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            password_hash,
            role_ids: invite.role_ids.clone(),
        };

        storage.users().create_with_invite(&user, invite.id()).await?;
        info!(user_id = %user.id(), invite_id = %invite.id(), "user registered");
        Ok(user)
    }
}
