//! Process configuration, read once from the environment at startup.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATABASE_NAME: &str = "BooksDB";
pub const DEFAULT_COLLECTION: &str = "books";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT value {value:?}: {reason}")]
    InvalidPort { value: String, reason: String },

    #[error("{0} must not be empty when set")]
    Empty(&'static str),
}

/// Load a `.env` file from the working directory (or a parent) into the
/// process environment. Variables already set are not overridden.
///
/// `Ok(None)` means no file was found, which is the normal production case.
pub fn load_env_file() -> Result<Option<PathBuf>, dotenvy::Error> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub port: u16,
    /// MongoDB connection string; `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub database_name: String,
    pub collection: String,
    /// Token-signing secret. No route authenticates yet, so it is only reported.
    pub secret_key: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::InvalidPort {
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            port,
            database_url: lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()),
            database_name: non_empty(&lookup, "DATABASE_NAME", DEFAULT_DATABASE_NAME)?,
            collection: non_empty(&lookup, "BOOKS_COLLECTION", DEFAULT_COLLECTION)?,
            secret_key: lookup("SECRET_KEY").filter(|v| !v.is_empty()),
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

fn non_empty(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<String, ConfigError> {
    match lookup(key) {
        Some(v) if v.trim().is_empty() => Err(ConfigError::Empty(key)),
        Some(v) => Ok(v),
        None => Ok(default.to_string()),
    }
}

// Connection strings and secrets may carry credentials.
impl core::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("database_name", &self.database_name)
            .field("collection", &self.collection)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
