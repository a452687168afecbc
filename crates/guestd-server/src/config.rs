// ABOUTME: Configuration loading for the guestd server.
// ABOUTME: Reads environment variables with defaults matching the fixed deployment surface.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GUESTD_BIND is not a valid socket address: {0}")]
    InvalidBind(String),
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct GuestdConfig {
    pub bind: SocketAddr,
    pub db_path: PathBuf,
}

impl GuestdConfig {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// Environment variables:
    /// - GUESTD_BIND: socket address to bind (default: 127.0.0.1:3000)
    /// - GUESTD_DB: path to the SQLite database file (default: guestd.db)
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_str = std::env::var("GUESTD_BIND").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
        let bind: SocketAddr = bind_str
            .parse()
            .map_err(|_| ConfigError::InvalidBind(bind_str))?;

        let db_path = std::env::var("GUESTD_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("guestd.db"));

        Ok(Self { bind, db_path })
    }
}
