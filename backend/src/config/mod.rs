//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the database URL, server port, and the JWT signing secrets and lifetimes.

use anyhow::{Context, Result, bail};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expires_in_seconds: u64,
    pub jwt_refresh_secret: String,
    pub jwt_refresh_expire_ms: u64,
    pub server_port: u16,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL not set")?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = env::var("DB_ACQUIRE_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "3".to_string())
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET not set")?;

        let jwt_expires_in_seconds = env::var("JWT_EXPIRES_IN_SECONDS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse::<u64>()
            .context("JWT_EXPIRES_IN_SECONDS must be a valid number")?;

        let jwt_refresh_secret =
            env::var("JWT_REFRESH_TOKEN_SECRET").context("JWT_REFRESH_TOKEN_SECRET not set")?;

        let jwt_refresh_expire_ms =
            parse_duration_ms(&env::var("JWT_REFRESH_EXPIRE").unwrap_or_else(|_| "7d".to_string()))
                .context("JWT_REFRESH_EXPIRE must be a duration such as '7d' or '12h'")?;

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            jwt_secret,
            jwt_expires_in_seconds,
            jwt_refresh_secret,
            jwt_refresh_expire_ms,
            server_port,
        })
    }
}

/// Parses a duration string into milliseconds.
///
/// A bare number is taken as milliseconds; otherwise a unit suffix of
/// `ms`, `s`, `m`, `h`, `d` or `w` is required (`"7d"`, `"90m"`).
pub fn parse_duration_ms(value: &str) -> Result<u64> {
    let value = value.trim();

    if value.is_empty() {
        bail!("empty duration");
    }

    if value.chars().all(|c| c.is_ascii_digit()) {
        return value.parse::<u64>().context("invalid duration number");
    }

    let split = value
        .find(|c: char| !c.is_ascii_digit())
        .filter(|&i| i > 0)
        .with_context(|| format!("invalid duration '{value}'"))?;

    let (digits, unit) = value.split_at(split);
    let amount = digits.parse::<u64>().context("invalid duration number")?;

    let factor = match unit {
        "ms" => 1,
        "s" => 1_000,
        "m" => 60 * 1_000,
        "h" => 60 * 60 * 1_000,
        "d" => 24 * 60 * 60 * 1_000,
        "w" => 7 * 24 * 60 * 60 * 1_000,
        _ => bail!("unknown duration unit '{unit}'"),
    };

    Ok(amount * factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration_ms("250").unwrap(), 250);
        assert_eq!(parse_duration_ms("500ms").unwrap(), 500);
        assert_eq!(parse_duration_ms("30s").unwrap(), 30_000);
        assert_eq!(parse_duration_ms("90m").unwrap(), 5_400_000);
        assert_eq!(parse_duration_ms("12h").unwrap(), 43_200_000);
        assert_eq!(parse_duration_ms("7d").unwrap(), 604_800_000);
        assert_eq!(parse_duration_ms("1w").unwrap(), 604_800_000);
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(parse_duration_ms("").is_err());
        assert!(parse_duration_ms("d").is_err());
        assert!(parse_duration_ms("7y").is_err());
        assert!(parse_duration_ms("seven days").is_err());
    }
}
