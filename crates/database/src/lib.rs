//! Persistence layer for the customer portal.
//!
//! This crate provides async operations for customers, messages, diagram
//! settings, documents and projects. Every operation is a single
//! parameterized statement sent through the Nile query API.
//!
//! # Example
//!
//! ```no_run
//! use database::{customer, schema::AdminSeed, Database};
//! use nile_client::NileConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and make sure the schema exists
//!     let db = Database::connect(NileConfig::from_env()?)?;
//!     db.initialize(&AdminSeed::default()).await?;
//!
//!     // Create a customer, then let them pick their own password
//!     let ann = customer::create_customer(db.pool(), "Ann", Some("ann@x.com"), "pw1").await?;
//!     let ann = customer::change_password(db.pool(), ann.id, "pw2").await?;
//!     assert!(!ann.unwrap().first_login);
//!
//!     Ok(())
//! }
//! ```

pub mod customer;
pub mod diagram_settings;
pub mod document;
pub mod error;
pub mod message;
pub mod models;
pub mod patch;
pub mod project;
pub mod project_data;
pub mod schema;
pub mod validation;

pub use customer::CustomerPatch;
pub use diagram_settings::DiagramSettingsPatch;
pub use error::{DatabaseError, Result};
pub use models::{Customer, DiagramSettings, Document, Message, NewDocument, Project, ProjectData};
pub use project::ProjectPatch;
pub use schema::{AdminSeed, InitReport};
pub use validation::ValidationError;

use std::sync::Arc;

use nile_client::{Executor, NileClient, NileConfig};

/// Database handle.
///
/// Holds no connection state of its own; every call is an independent
/// request through the executor.
#[derive(Clone)]
pub struct Database {
    executor: Arc<dyn Executor>,
}

impl Database {
    /// Connect to the hosted query API.
    pub fn connect(config: NileConfig) -> Result<Self> {
        tracing::info!("Using Nile query API at {}", config.base_url);
        let client = NileClient::new(config)?;
        Ok(Self::with_executor(Arc::new(client)))
    }

    /// Wrap an existing executor.
    pub fn with_executor(executor: Arc<dyn Executor>) -> Self {
        Self { executor }
    }

    /// Get the executor that accessors run against.
    pub fn pool(&self) -> &dyn Executor {
        self.executor.as_ref()
    }

    /// Create the schema and seed the administrator.
    ///
    /// Safe to call on every start.
    pub async fn initialize(&self, seed: &AdminSeed) -> Result<InitReport> {
        schema::initialize(self.pool(), seed).await
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nile_client::mock::MockExecutor;
    use serde_json::json;

    fn customer_row(password: &str, first_login: bool) -> serde_json::Value {
        json!({
            "id": 1,
            "name": "Ann",
            "email": "ann@x.com",
            "password": password,
            "first_login": first_login,
            "is_admin": false,
            "created_at": "2026-01-01T00:00:00Z",
            "updated_at": "2026-01-02T00:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_customer_lifecycle() {
        let mock = Arc::new(MockExecutor::new());
        let db = Database::with_executor(mock.clone());

        // Create
        mock.push_rows(vec![customer_row("pw1", true)]);
        let ann = customer::create_customer(db.pool(), "Ann", Some("ann@x.com"), "pw1")
            .await
            .unwrap();
        assert!(ann.first_login);

        // Read
        mock.push_rows(vec![customer_row("pw1", true)]);
        let fetched = customer::get_customer(db.pool(), ann.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Ann");
        assert_eq!(fetched.email.as_deref(), Some("ann@x.com"));

        // Change password twice; first_login stays false
        mock.push_rows(vec![customer_row("pw2", false)]);
        mock.push_rows(vec![customer_row("pw3", false)]);
        let changed = customer::change_password(db.pool(), ann.id, "pw2").await.unwrap().unwrap();
        assert_eq!(changed.password, "pw2");
        assert!(!changed.first_login);
        let changed = customer::change_password(db.pool(), ann.id, "pw3").await.unwrap().unwrap();
        assert!(!changed.first_login);

        // Delete
        mock.push_affected(1);
        assert!(customer::delete_customer(db.pool(), ann.id).await.unwrap());

        let statements = mock.executed();
        assert_eq!(statements.len(), 5);
        assert!(statements[4].sql().starts_with("DELETE FROM customers"));
    }

    #[tokio::test]
    async fn test_initialize_through_handle() {
        let mock = Arc::new(MockExecutor::new());
        for _ in 0..schema::TABLES.len() + schema::INDEXES.len() {
            mock.push_affected(0);
        }
        mock.push_rows(vec![customer_row(schema::DEFAULT_ADMIN_PASSWORD, true)]);

        let db = Database::with_executor(mock.clone());
        let report = db.initialize(&AdminSeed::default()).await.unwrap();
        assert!(report.success);
        assert!(!report.admin_created);
    }
}
