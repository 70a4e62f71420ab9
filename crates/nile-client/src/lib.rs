//! Nile query API client library.
//!
//! This crate sends parameterized SQL to a hosted Postgres-compatible API
//! over authenticated HTTPS. It supports:
//!
//! - Building statements with positional `$n` parameters
//! - Decoding returned rows into typed structs
//! - Swapping the transport behind the [`Executor`] trait
//!
//! # Example
//!
//! ```no_run
//! use nile_client::{query, NileClient, NileConfig};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Customer {
//!     id: i64,
//!     name: String,
//! }
//!
//! # async fn example() -> Result<(), nile_client::NileError> {
//! let client = NileClient::new(NileConfig::from_env()?)?;
//!
//! let customers: Vec<Customer> = query("SELECT * FROM customers WHERE id = $1")
//!     .bind(42)
//!     .fetch_all(&client)
//!     .await?;
//!
//! for customer in customers {
//!     println!("{}: {}", customer.id, customer.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod query;
pub mod types;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use async_trait::async_trait;
pub use client::NileClient;
pub use config::NileConfig;
pub use error::NileError;
pub use executor::Executor;
pub use query::{query, Statement};
pub use types::QueryResult;
