use anyhow::{Context, bail};
use axum::http::HeaderValue;
use chrono::Duration;

use murmur_auth::TokenService;

/// JWT secrets that must never reach production.
const PLACEHOLDER_SECRETS: &[&str] = &[
    "change-me-to-a-random-string",
    "dev-secret-change-me",
];

/// One year. Longer lifetimes are refused at startup.
const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

pub struct Config {
    pub jwt_secret: String,
    pub host: String,
    pub port: u16,
    pub token_ttl: Duration,
    pub cors_origins: Vec<HeaderValue>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let jwt_secret = var("MURMUR_JWT_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() || PLACEHOLDER_SECRETS.contains(&jwt_secret.as_str()) {
            bail!("MURMUR_JWT_SECRET is unset or still a placeholder");
        }

        let host = var("MURMUR_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = var("MURMUR_PORT")
            .unwrap_or_else(|| "8080".into())
            .parse()
            .context("MURMUR_PORT must be a port number")?;

        let ttl_hours: i64 = match var("MURMUR_TOKEN_TTL_HOURS") {
            Some(v) => v.parse().context("MURMUR_TOKEN_TTL_HOURS must be an integer")?,
            None => TokenService::DEFAULT_TTL_HOURS,
        };
        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&ttl_hours) {
            bail!(
                "MURMUR_TOKEN_TTL_HOURS must be between 1 and {}",
                MAX_TOKEN_TTL_HOURS
            );
        }

        let cors_origins = var("MURMUR_CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.into())
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(|o| HeaderValue::from_str(o).with_context(|| format!("invalid CORS origin '{}'", o)))
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self {
            jwt_secret,
            host,
            port,
            token_ttl: Duration::hours(ttl_hours),
            cors_origins,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("MURMUR_JWT_SECRET", "s3cret")]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.token_ttl, Duration::hours(24));
        assert_eq!(config.cors_origins, vec![HeaderValue::from_static(DEFAULT_CORS_ORIGIN)]);
    }

    #[test]
    fn test_secret_required() {
        assert!(load(&[]).is_err());
        assert!(load(&[("MURMUR_JWT_SECRET", "")]).is_err());
        assert!(load(&[("MURMUR_JWT_SECRET", "dev-secret-change-me")]).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("MURMUR_JWT_SECRET", "s3cret"),
            ("MURMUR_HOST", "127.0.0.1"),
            ("MURMUR_PORT", "9000"),
            ("MURMUR_TOKEN_TTL_HOURS", "2"),
            ("MURMUR_CORS_ORIGINS", "https://a.example, https://b.example"),
        ])
        .unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.token_ttl, Duration::hours(2));
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.cors_origins[1], "https://b.example");
    }

    #[test]
    fn test_bad_numbers() {
        assert!(load(&[("MURMUR_JWT_SECRET", "s"), ("MURMUR_PORT", "http")]).is_err());
        assert!(load(&[("MURMUR_JWT_SECRET", "s"), ("MURMUR_TOKEN_TTL_HOURS", "0")]).is_err());
    }

    #[test]
    fn test_ttl_upper_bound() {
        let huge = load(&[("MURMUR_JWT_SECRET", "s"), ("MURMUR_TOKEN_TTL_HOURS", "100000000000")]);
        assert!(huge.is_err());

        let year = load(&[("MURMUR_JWT_SECRET", "s"), ("MURMUR_TOKEN_TTL_HOURS", "8760")]).unwrap();
        assert_eq!(year.token_ttl, Duration::hours(MAX_TOKEN_TTL_HOURS));
        let tokens = TokenService::new(&year.jwt_secret, year.token_ttl);
        assert!(tokens.issue(1, "alice").is_ok());
    }
}
