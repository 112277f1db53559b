// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token claims and authenticated user representation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token-type discriminant.
///
/// Only `access` tokens authenticate requests. `refresh` tokens share the
/// same signing key and are rejected by the request pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed token payload. This is the only state a token carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: Uuid,
    /// Subject email at the time of issue
    pub email: String,
    /// Access or refresh
    #[serde(rename = "type")]
    pub token_type: TokenType,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expires at (unix seconds)
    pub exp: i64,
}

/// Principal bound to a request after successful authentication.
///
/// Carries identity only. Roles and permissions are reloaded from storage by
/// the services on each request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(TokenType::Refresh).unwrap(),
            serde_json::json!("refresh")
        );
        let parsed: TokenType = serde_json::from_str("\"access\"").unwrap();
        assert_eq!(parsed, TokenType::Access);
    }

    #[test]
    fn claims_use_type_field_name() {
        let claims = Claims {
            sub: Uuid::nil(),
            email: "a@b.io".to_string(),
            token_type: TokenType::Access,
            iat: 1,
            exp: 2,
        };
        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["type"], "access");
        assert!(value.get("token_type").is_none());
    }

    #[test]
    fn authenticated_user_keeps_identity_only() {
        let id = Uuid::new_v4();
        let user = AuthenticatedUser::from_claims(Claims {
            sub: id,
            email: "u@x.io".to_string(),
            token_type: TokenType::Access,
            iat: 0,
            exp: 10,
        });
        assert_eq!(user.user_id, id);
        assert_eq!(user.email, "u@x.io");
    }
}
