// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer token issuance and validation.
//!
//! Tokens are HS256 JWTs signed with a single process-wide secret. The
//! accepted algorithm list is fixed when the service is built, so the `alg`
//! field in an inbound header can never select the verification method.
//!
//! There is no revocation: a token stays valid until `exp` even if the
//! subject's roles or password change in the meantime.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use super::claims::{Claims, TokenType};
use super::error::AuthError;
use crate::error::{DomainError, DomainResult};

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Lifetimes applied by [`TokenService::issue_pair`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    pub access: Duration,
    pub refresh: Duration,
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            access: Duration::minutes(24),
            refresh: Duration::minutes(1000),
        }
    }
}

/// Access and refresh token returned by login and registration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(rename = "type")]
    pub token_type: &'static str,
}

/// Issues and validates signed bearer tokens.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Sign a token for `subject_id` that expires `ttl` from now.
    pub fn issue(
        &self,
        subject_id: Uuid,
        email: &str,
        token_type: TokenType,
        ttl: Duration,
    ) -> DomainResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject_id,
            email: email.to_string(),
            token_type,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(ALGORITHM), &claims, &self.encoding)
            .map_err(|e| DomainError::internal("failed to sign token", Some(e.into())))
    }

    pub fn issue_pair(
        &self,
        subject_id: Uuid,
        email: &str,
        lifetimes: TokenLifetimes,
    ) -> DomainResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.issue(subject_id, email, TokenType::Access, lifetimes.access)?,
            refresh_token: self.issue(subject_id, email, TokenType::Refresh, lifetimes.refresh)?,
            token_type: "Bearer",
        })
    }

    /// Verify signature, algorithm and expiry.
    ///
    /// Every failure is reported as [`AuthError::InvalidToken`]; the concrete
    /// reason only reaches the debug log.
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            debug!(reason = %e, "token rejected");
            AuthError::InvalidToken
        })?;

        // The library accepts exp == now; a token must not survive its own second.
        if data.claims.exp <= Utc::now().timestamp() {
            debug!(reason = "expired", "token rejected");
            return Err(AuthError::InvalidToken);
        }

        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &ALGORITHM)
            .finish_non_exhaustive()
    }
}
