//! Configuration types for nile-client.

use std::env;
use std::fmt;

use crate::error::NileError;

/// Environment variable holding the API base URL.
pub const API_URL_VAR: &str = "NILE_API_URL";

/// Environment variable holding the bearer credential.
pub const API_KEY_VAR: &str = "NILE_API_KEY";

/// Configuration for connecting to the hosted query API.
#[derive(Clone)]
pub struct NileConfig {
    /// Base URL of the API (e.g., "https://api.thenile.dev").
    pub base_url: String,
    /// Bearer credential sent with every request.
    pub api_key: String,
}

impl NileConfig {
    /// Create a new configuration.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Load configuration from `NILE_API_URL` and `NILE_API_KEY`.
    pub fn from_env() -> Result<Self, NileError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, NileError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| NileError::Config(format!("{name} is not set")))
        };

        let base_url = require(API_URL_VAR)?;
        let api_key = require(API_KEY_VAR)?;

        Ok(Self::new(base_url, api_key))
    }

    /// Get the query endpoint URL.
    pub fn query_url(&self) -> String {
        format!("{}/api/v1/query", self.base_url.trim_end_matches('/'))
    }
}

impl fmt::Debug for NileConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NileConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_query_url() {
        let config = NileConfig::new("https://db.example.com", "key");
        assert_eq!(config.query_url(), "https://db.example.com/api/v1/query");
    }

    #[test]
    fn test_query_url_trailing_slash() {
        let config = NileConfig::new("https://db.example.com/", "key");
        assert_eq!(config.query_url(), "https://db.example.com/api/v1/query");
    }

    #[test]
    fn test_from_lookup_complete() {
        let config = NileConfig::from_lookup(lookup_from(&[
            (API_URL_VAR, "https://db.example.com"),
            (API_KEY_VAR, "secret"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://db.example.com");
        assert_eq!(config.api_key, "secret");
    }

    #[test]
    fn test_from_lookup_missing_url() {
        let err = NileConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "secret")])).unwrap_err();
        match err {
            NileError::Config(msg) => assert!(msg.contains(API_URL_VAR)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_lookup_blank_key() {
        let err = NileConfig::from_lookup(lookup_from(&[
            (API_URL_VAR, "https://db.example.com"),
            (API_KEY_VAR, "  "),
        ]))
        .unwrap_err();
        assert!(matches!(err, NileError::Config(ref msg) if msg.contains(API_KEY_VAR)));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = NileConfig::new("https://db.example.com", "super-secret");
        let printed = format!("{config:?}");
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("redacted"));
    }
}
