//! The Executor trait definition.

use async_trait::async_trait;

use crate::error::NileError;
use crate::query::Statement;
use crate::types::QueryResult;

/// Something that can run a single statement against the database.
///
/// This trait is object-safe; accessors take `&dyn Executor`.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Run one statement and return its rows and row count.
    async fn run(&self, statement: &Statement) -> Result<QueryResult, NileError>;
}
