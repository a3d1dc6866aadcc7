use std::net::SocketAddr;

use anyhow::Context;
use serde::Deserialize;

/// Longest access-token lifetime accepted from `JWT_TTL_MINUTES` (one year).
pub const MAX_TOKEN_TTL_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// `None` runs the service on the in-memory user store.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "authflow".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "authflow-users".into()),
            ttl_minutes: token_ttl_minutes(env_parse("JWT_TTL_MINUTES"))?,
        };
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = std::env::var("APP_PORT").unwrap_or_else(|_| "8080".into());
        let bind_addr = format!("{host}:{port}")
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid APP_HOST/APP_PORT: {host}:{port}"))?;
        Ok(Self {
            database_url,
            db_max_connections: env_parse("DB_MAX_CONNECTIONS").unwrap_or(10),
            bind_addr,
            jwt,
        })
    }
}

fn token_ttl_minutes(raw: Option<i64>) -> anyhow::Result<i64> {
    let minutes = raw.unwrap_or(60);
    anyhow::ensure!(
        (1..=MAX_TOKEN_TTL_MINUTES).contains(&minutes),
        "JWT_TTL_MINUTES must be between 1 and {MAX_TOKEN_TTL_MINUTES}, got {minutes}"
    );
    Ok(minutes)
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse::<T>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    // unique variable names keep these independent of parallel tests
    #[test]
    fn env_parse_reads_numbers() {
        std::env::set_var("__AUTHFLOW_TEST_TTL_1__", " 15 ");
        assert_eq!(env_parse::<i64>("__AUTHFLOW_TEST_TTL_1__"), Some(15));
        std::env::remove_var("__AUTHFLOW_TEST_TTL_1__");
    }

    #[test]
    fn token_ttl_defaults_and_bounds() {
        assert_eq!(token_ttl_minutes(None).unwrap(), 60);
        assert_eq!(token_ttl_minutes(Some(1)).unwrap(), 1);
        assert_eq!(
            token_ttl_minutes(Some(MAX_TOKEN_TTL_MINUTES)).unwrap(),
            MAX_TOKEN_TTL_MINUTES
        );
        for bad in [0, -5, MAX_TOKEN_TTL_MINUTES + 1, i64::MAX / 2, i64::MAX] {
            let err = token_ttl_minutes(Some(bad)).unwrap_err();
            assert!(err.to_string().contains("JWT_TTL_MINUTES"), "{bad}");
        }
    }

    #[test]
    fn env_parse_ignores_garbage_and_unset() {
        std::env::set_var("__AUTHFLOW_TEST_TTL_2__", "soon");
        assert_eq!(env_parse::<i64>("__AUTHFLOW_TEST_TTL_2__"), None);
        std::env::remove_var("__AUTHFLOW_TEST_TTL_2__");
        assert_eq!(env_parse::<u32>("__AUTHFLOW_TEST_SURELY_UNSET__"), None);
    }
}
