// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Validated credential values.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{DomainError, DomainResult};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is valid")
});

const MIN_PASSWORD_LEN: usize = 8;

/// Trimmed, lower-cased email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let normalized = raw.trim().to_lowercase();
        if !EMAIL_PATTERN.is_match(&normalized) {
            return Err(DomainError::validation("invalid email address").with_meta("field", "email"));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn domain(&self) -> &str {
        self.0.split_once('@').map(|(_, d)| d).unwrap_or_default()
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Plaintext password that passed the strength rules.
pub struct Password(String);

impl Password {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        if raw.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            ))
            .with_meta("field", "password"));
        }

        let has_letter = raw.chars().any(char::is_alphabetic);
        let has_number = raw.chars().any(char::is_numeric);
        if !has_letter || !has_number {
            return Err(DomainError::validation("password must contain letters and numbers")
                .with_meta("field", "password"));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn email_is_normalized() {
        let email = Email::parse("  Alice.Smith+tag@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "alice.smith+tag@example.com");
        assert_eq!(email.domain(), "example.com");
    }

    #[test]
    fn bad_emails_are_rejected() {
        for raw in ["", "plain", "a@b", "a@b.c", "@example.com", "a b@example.com"] {
            let err = Email::parse(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "{raw:?}");
            assert_eq!(err.meta()["field"], "email");
        }
    }

    #[test]
    fn password_rules() {
        assert!(Password::parse("abcd1234").is_ok());
        assert_eq!(
            Password::parse("ab12").unwrap_err().message(),
            "password must be at least 8 characters"
        );
        assert_eq!(
            Password::parse("abcdefgh").unwrap_err().message(),
            "password must contain letters and numbers"
        );
        assert_eq!(
            Password::parse("12345678").unwrap_err().message(),
            "password must contain letters and numbers"
        );
    }

    #[test]
    fn password_debug_is_redacted() {
        let password = Password::parse("hunter2hunter2").unwrap();
        assert!(!format!("{password:?}").contains("hunter2"));
    }
}
