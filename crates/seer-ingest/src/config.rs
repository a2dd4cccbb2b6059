//! Configuration management

use reqwest::Url;
use seer_common::{Result, SeerError};
use std::str::FromStr;
use std::time::Duration;

use crate::db::DbConfig;
use crate::linguist::LinguistConfig;

// ============================================================================
// Configuration Constants
// ============================================================================

/// Default maximum database connections in the pool.
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;

/// Default minimum database connections in the pool.
pub const DEFAULT_DATABASE_MIN_CONNECTIONS: u32 = 1;

/// Default database connection timeout in seconds.
pub const DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default deadline for a whole ingestion run in milliseconds.
pub const DEFAULT_INGEST_TIMEOUT_MS: u64 = 30_000;

/// Ingestion configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database: DbConfig,
    pub linguist: LinguistConfig,
    pub timeout_ms: u64,
}

impl Config {
    /// Load configuration from `.env`, the environment and defaults
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = DbConfig {
            url: database_url(&lookup)?,
            max_connections: parse_or(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_DATABASE_MAX_CONNECTIONS,
            )?,
            min_connections: DEFAULT_DATABASE_MIN_CONNECTIONS,
            connect_timeout_secs: parse_or(
                &lookup,
                "DATABASE_CONNECT_TIMEOUT",
                DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS,
            )?,
        };

        let mut linguist = LinguistConfig::default();
        if let Some(url) = non_empty(&lookup, "SEER_LINGUIST_URL") {
            linguist.remote_url = url;
        }

        let config = Config {
            database,
            linguist,
            timeout_ms: DEFAULT_INGEST_TIMEOUT_MS,
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.database.url.is_empty() {
            return Err(SeerError::config("Database URL cannot be empty"));
        }

        if self.database.max_connections == 0 {
            return Err(SeerError::config(
                "Database max_connections must be greater than 0",
            ));
        }

        if self.linguist.remote_url.is_empty() {
            return Err(SeerError::config("Linguist catalog URL cannot be empty"));
        }

        if self.timeout_ms == 0 {
            return Err(SeerError::config("Ingestion timeout must be greater than 0"));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// `DATABASE_URL` if set, otherwise a URL assembled from the `SEER_DB_*` parts
fn database_url<F>(lookup: &F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = non_empty(lookup, "DATABASE_URL") {
        return Ok(url);
    }

    let required = |key: &str| {
        non_empty(lookup, key)
            .ok_or_else(|| SeerError::config(format!("{} is required when DATABASE_URL is not set", key)))
    };

    let host = required("SEER_DB_HOST")?;
    let port_raw = required("SEER_DB_PORT")?;
    let user = required("SEER_DB_USER")?;
    let password = required("SEER_DB_PASSWORD")?;
    let name = required("SEER_DB_NAME")?;

    let port: u16 = port_raw
        .parse()
        .map_err(|_| SeerError::invalid_value("SEER_DB_PORT", &port_raw))?;

    let mut url = Url::parse(&format!("postgres://{}:{}/{}", host, port, name))
        .map_err(|_| SeerError::invalid_value("SEER_DB_HOST", &host))?;
    url.set_username(&user)
        .map_err(|_| SeerError::invalid_value("SEER_DB_USER", &user))?;
    url.set_password(Some(&password))
        .map_err(|_| SeerError::config("SEER_DB_PASSWORD cannot be applied to the database URL"))?;

    Ok(url.to_string())
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|value| !value.trim().is_empty())
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match non_empty(lookup, key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| SeerError::invalid_value(key, raw)),
        None => Ok(default),
    }
}
