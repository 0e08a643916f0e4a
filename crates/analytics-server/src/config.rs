//! Configuration for the server binary.
//!
//! All configuration is loaded from environment variables, after an
//! optional `.env` file in the working directory has been merged in by
//! `dotenvy`. The only required value is the database connection string.

use std::time::Duration;

use analytics_api::ServerConfig;
use analytics_api::server::DEFAULT_PORT;
use analytics_db::PostgresConfig;

use crate::error::AppError;

/// Complete server configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `PostgreSQL` connection URL.
    pub database_url: String,
    /// Address to bind the HTTP listener to.
    pub host: String,
    /// Port to bind the HTTP listener to.
    pub port: u16,
    /// Maximum number of pooled database connections.
    pub db_max_connections: u32,
    /// How long to wait for a pooled connection.
    pub db_connect_timeout: Duration,
    /// Emit JSON log lines instead of human-readable ones.
    pub json_logs: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Required variables:
    /// - `DATABASE_URL` -- `PostgreSQL` connection string (must be non-empty)
    ///
    /// Optional variables:
    /// - `HOST` -- bind address (default `0.0.0.0`)
    /// - `PORT` -- bind port (default `8002`)
    /// - `DB_MAX_CONNECTIONS` -- pool size (default 10)
    /// - `DB_CONNECT_TIMEOUT_SECS` -- pool acquire timeout (default 5)
    /// - `LOG_FORMAT` -- `json` for structured JSON logs (default text)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| AppError::Config(String::from("DATABASE_URL is not set")))?;

        let host = lookup("HOST").unwrap_or_else(|| String::from("0.0.0.0"));
        let port: u16 = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let db_max_connections: u32 = parse_or(
            &lookup,
            "DB_MAX_CONNECTIONS",
            PostgresConfig::DEFAULT_MAX_CONNECTIONS,
        )?;
        let db_connect_timeout_secs: u64 = parse_or(
            &lookup,
            "DB_CONNECT_TIMEOUT_SECS",
            PostgresConfig::DEFAULT_ACQUIRE_TIMEOUT.as_secs(),
        )?;

        let json_logs = lookup("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json"));

        Ok(Self {
            database_url,
            host,
            port,
            db_max_connections,
            db_connect_timeout: Duration::from_secs(db_connect_timeout_secs),
            json_logs,
        })
    }

    /// Connection pool settings derived from this configuration.
    pub fn postgres(&self) -> PostgresConfig {
        PostgresConfig {
            url: self.database_url.clone(),
            max_connections: self.db_max_connections,
            acquire_timeout: self.db_connect_timeout,
        }
    }

    /// HTTP listener settings derived from this configuration.
    pub fn server(&self) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
        }
    }
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(name).map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|e| AppError::Config(format!("invalid {name}: {e}")))
    })
}
