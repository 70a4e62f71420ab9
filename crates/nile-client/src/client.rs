//! Nile query API HTTP client.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use tracing::{debug, error};

use crate::config::NileConfig;
use crate::error::NileError;
use crate::executor::Executor;
use crate::query::Statement;
use crate::types::{QueryRequest, QueryResult};

/// Client for the hosted query API.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Clone)]
pub struct NileClient {
    http: Client,
    config: NileConfig,
}

impl NileClient {
    /// Create a client for the given configuration.
    pub fn new(config: NileConfig) -> Result<Self, NileError> {
        let http = Client::builder().build().map_err(NileError::Http)?;
        Ok(Self { http, config })
    }

    /// Create a client from `NILE_API_URL` and `NILE_API_KEY`.
    pub fn from_env() -> Result<Self, NileError> {
        Self::new(NileConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &NileConfig {
        &self.config
    }

    /// POST a statement to the query endpoint.
    async fn post_query(&self, statement: &Statement) -> Result<QueryResult, NileError> {
        statement.check()?;
        let url = self.config.query_url();
        let body = QueryRequest {
            query: statement.sql(),
            params: statement.params(),
        };

        debug!(params = statement.params().len(), "Query: {}", statement.sql().trim());

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            let reason = match (status.canonical_reason(), detail.trim()) {
                (Some(reason), "") => reason.to_string(),
                (Some(reason), detail) => format!("{}: {}", reason, detail),
                (None, "") => "Unknown".to_string(),
                (None, detail) => detail.to_string(),
            };
            return Err(NileError::Transport {
                status: status.as_u16(),
                reason,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl Executor for NileClient {
    async fn run(&self, statement: &Statement) -> Result<QueryResult, NileError> {
        self.post_query(statement).await.inspect_err(|e| {
            error!("Error executing database query: {}", e);
        })
    }
}

impl std::fmt::Debug for NileClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NileClient")
            .field("config", &self.config)
            .finish()
    }
}
