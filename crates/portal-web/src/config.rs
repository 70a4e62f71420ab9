//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

use database::AdminSeed;
use nile_client::{NileConfig, NileError};

/// Portal web server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// Query API endpoint and credential.
    pub nile: NileConfig,
    /// Administrator created on first initialization.
    pub admin_seed: AdminSeed,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `PORTAL_ADDR` | Server bind address | `127.0.0.1:3000` |
    /// | `NILE_API_URL` | Query API base URL | (required) |
    /// | `NILE_API_KEY` | Query API bearer credential | (required) |
    /// | `PORTAL_ADMIN_PASSWORD` | Seed administrator password | `050712` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = lookup("PORTAL_ADDR")
            .unwrap_or_else(|| "127.0.0.1:3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let nile = NileConfig::from_lookup(&lookup)?;

        let admin_seed = match lookup("PORTAL_ADMIN_PASSWORD") {
            Some(password) if !password.trim().is_empty() => AdminSeed::with_password(password),
            _ => AdminSeed::default(),
        };

        Ok(Self {
            addr,
            nile,
            admin_seed,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PORTAL_ADDR format")]
    InvalidAddr,

    #[error(transparent)]
    Nile(#[from] NileError),
}
