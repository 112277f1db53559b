// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `JWT_SECRET_KEY` | HS256 signing secret | Required |
//! | `JWT_ACCESS_TOKEN_DURATION` | Access token lifetime in minutes | `24` |
//! | `JWT_REFRESH_TOKEN_DURATION` | Refresh token lifetime in minutes | `1000` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//! | `SEED_INVITE_TOKEN` | Single-use invite granting the `admin` role | Optional |

use std::net::SocketAddr;

use chrono::Duration;
use thiserror::Error;

use crate::auth::TokenLifetimes;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const JWT_SECRET_ENV: &str = "JWT_SECRET_KEY";
pub const ACCESS_TTL_ENV: &str = "JWT_ACCESS_TOKEN_DURATION";
pub const REFRESH_TTL_ENV: &str = "JWT_REFRESH_TOKEN_DURATION";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";
pub const SEED_INVITE_ENV: &str = "SEED_INVITE_TOKEN";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_ACCESS_TTL_MINUTES: i64 = 24;
pub const DEFAULT_REFRESH_TTL_MINUTES: i64 = 1000;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

#[derive(Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub secret: String,
    pub lifetimes: TokenLifetimes,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"<redacted>")
            .field("lifetimes", &self.lifetimes)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub auth: AuthConfig,
    pub log_format: LogFormat,
    pub seed_invite_token: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host = get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get(PORT_ENV) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: PORT_ENV,
                value: raw,
                reason: "expected a port number",
            })?,
            None => DEFAULT_PORT,
        };

        let secret = get(JWT_SECRET_ENV).ok_or(ConfigError::Missing(JWT_SECRET_ENV))?;
        let access = minutes(get(ACCESS_TTL_ENV), ACCESS_TTL_ENV, DEFAULT_ACCESS_TTL_MINUTES)?;
        let refresh = minutes(get(REFRESH_TTL_ENV), REFRESH_TTL_ENV, DEFAULT_REFRESH_TTL_MINUTES)?;

        let log_format = match get(LOG_FORMAT_ENV).map(|v| v.trim().to_ascii_lowercase()) {
            None => LogFormat::default(),
            Some(v) if v == "json" => LogFormat::Json,
            Some(v) if v == "pretty" => LogFormat::Pretty,
            Some(v) => {
                return Err(ConfigError::Invalid {
                    name: LOG_FORMAT_ENV,
                    value: v,
                    reason: "expected 'json' or 'pretty'",
                })
            }
        };

        Ok(Self {
            host,
            port,
            auth: AuthConfig {
                secret,
                lifetimes: TokenLifetimes { access, refresh },
            },
            log_format,
            seed_invite_token: get(SEED_INVITE_ENV),
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::Invalid {
            name: HOST_ENV,
            value: self.host.clone(),
            reason: "expected an IP address",
        })
    }
}

fn minutes(raw: Option<String>, name: &'static str, default: i64) -> Result<Duration, ConfigError> {
    let Some(raw) = raw else {
        return Ok(Duration::minutes(default));
    };
    match raw.trim().parse::<i64>() {
        Ok(value) if value > 0 => Ok(Duration::minutes(value)),
        _ => Err(ConfigError::Invalid {
            name,
            value: raw,
            reason: "expected a positive number of minutes",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_apply() {
        let config = load(&[(JWT_SECRET_ENV, "s3cret")]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.auth.lifetimes.access, Duration::minutes(24));
        assert_eq!(config.auth.lifetimes.refresh, Duration::minutes(1000));
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.seed_invite_token.is_none());
        assert_eq!(config.bind_addr().unwrap().port(), 8080);
    }

    #[test]
    fn secret_is_required() {
        assert_eq!(load(&[]), Err(ConfigError::Missing(JWT_SECRET_ENV)));
        assert_eq!(
            load(&[(JWT_SECRET_ENV, "  ")]),
            Err(ConfigError::Missing(JWT_SECRET_ENV))
        );
    }

    #[test]
    fn overrides_are_parsed() {
        let config = load(&[
            (JWT_SECRET_ENV, "s3cret"),
            (HOST_ENV, "127.0.0.1"),
            (PORT_ENV, "9000"),
            (ACCESS_TTL_ENV, "5"),
            (REFRESH_TTL_ENV, "60"),
            (LOG_FORMAT_ENV, "JSON"),
            (SEED_INVITE_ENV, "bootstrap"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:9000");
        assert_eq!(config.auth.lifetimes.access, Duration::minutes(5));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.seed_invite_token.as_deref(), Some("bootstrap"));
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = load(&[(JWT_SECRET_ENV, "s"), (ACCESS_TTL_ENV, "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: ACCESS_TTL_ENV, .. }));

        let err = load(&[(JWT_SECRET_ENV, "s"), (PORT_ENV, "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: PORT_ENV, .. }));

        let err = load(&[(JWT_SECRET_ENV, "s"), (LOG_FORMAT_ENV, "xml")]).unwrap_err();
        assert!(err.to_string().contains("LOG_FORMAT"));
    }

    #[test]
    fn debug_hides_secret() {
        let config = load(&[(JWT_SECRET_ENV, "top-secret-value")]).unwrap();
        assert!(!format!("{config:?}").contains("top-secret-value"));
    }
}
