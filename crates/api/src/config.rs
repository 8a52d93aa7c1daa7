use std::path::PathBuf;

use axum::http::HeaderValue;

use crate::auth::password::{hash_password, parse_password_hash};

/// Configuration could not be assembled from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is invalid: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Where content is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// A Postgres database (a Supabase project's connection string works).
    Postgres { database_url: String },
    /// Fallback mode: JSON files in a local directory.
    JsonFile { data_dir: PathBuf },
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Read `LOG_FORMAT`. Unknown values fall back to text.
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT").ok().as_deref() {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Admin panel credential and session settings.
#[derive(Clone)]
pub struct AdminConfig {
    /// Argon2id PHC hash of the admin password. `None` disables admin login.
    pub password_hash: Option<String>,
    /// Lifetime of an issued admin session, in hours.
    pub session_ttl_hours: i64,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("password_configured", &self.password_hash.is_some())
            .field("session_ttl_hours", &self.session_ttl_hours)
            .finish()
    }
}

impl AdminConfig {
    /// Session lifetime. Out-of-range values fall back to the default.
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::try_hours(self.session_ttl_hours)
            .unwrap_or(chrono::Duration::hours(DEFAULT_SESSION_TTL_HOURS))
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub storage: StorageConfig,
    pub admin: AdminConfig,
}

const DEFAULT_SESSION_TTL_HOURS: i64 = 24;
/// Ten years.
const MAX_SESSION_TTL_HOURS: i64 = 24 * 365 * 10;

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `3000`                  |
    /// | `CORS_ORIGINS`            | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
    /// | `DATABASE_URL`            | unset (JSON fallback)   |
    /// | `DATA_DIR`                | `./data`                |
    /// | `ADMIN_PASSWORD_HASH`     | unset                   |
    /// | `ADMIN_PASSWORD`          | unset                   |
    /// | `ADMIN_SESSION_TTL_HOURS` | `24`                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = parse_var("PORT", var("PORT"), 3000)?;

        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for origin in &cors_origins {
            origin
                .parse::<HeaderValue>()
                .map_err(|e| ConfigError::Invalid {
                    var: "CORS_ORIGINS",
                    message: format!("'{origin}': {e}"),
                })?;
        }

        let request_timeout_secs: u64 =
            parse_var("REQUEST_TIMEOUT_SECS", var("REQUEST_TIMEOUT_SECS"), 30)?;

        let storage = match var("DATABASE_URL") {
            Some(database_url) => StorageConfig::Postgres { database_url },
            None => StorageConfig::JsonFile {
                data_dir: var("DATA_DIR").unwrap_or_else(|| "./data".into()).into(),
            },
        };

        let password_hash = match (var("ADMIN_PASSWORD_HASH"), var("ADMIN_PASSWORD")) {
            (Some(hash), _) => {
                parse_password_hash(&hash).map_err(|e| ConfigError::Invalid {
                    var: "ADMIN_PASSWORD_HASH",
                    message: e.to_string(),
                })?;
                Some(hash)
            }
            (None, Some(plain)) => Some(hash_password(&plain).map_err(|e| {
                ConfigError::Invalid {
                    var: "ADMIN_PASSWORD",
                    message: e.to_string(),
                }
            })?),
            (None, None) => None,
        };

        let session_ttl_hours: i64 = parse_var(
            "ADMIN_SESSION_TTL_HOURS",
            var("ADMIN_SESSION_TTL_HOURS"),
            DEFAULT_SESSION_TTL_HOURS,
        )?;
        if !(1..=MAX_SESSION_TTL_HOURS).contains(&session_ttl_hours) {
            return Err(ConfigError::Invalid {
                var: "ADMIN_SESSION_TTL_HOURS",
                message: format!("must be between 1 and {MAX_SESSION_TTL_HOURS}"),
            });
        }

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            storage,
            admin: AdminConfig {
                password_hash,
                session_ttl_hours,
            },
        })
    }
}

fn parse_var<T>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            var: name,
            message: format!("'{raw}': {e}"),
        }),
        None => Ok(default),
    }
}
