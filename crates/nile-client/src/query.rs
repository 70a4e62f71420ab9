//! Parameterized statement builder.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::error::NileError;
use crate::executor::Executor;
use crate::types::QueryResult;

/// A SQL statement with ordered positional parameters (`$1`, `$2`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: String,
    params: Vec<Value>,
    bind_error: Option<String>,
}

/// Start building a statement.
pub fn query(sql: impl Into<String>) -> Statement {
    Statement::new(sql)
}

impl Statement {
    /// Create a statement without parameters.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
            bind_error: None,
        }
    }

    /// Append the next positional parameter.
    ///
    /// A value that fails to serialize is remembered and reported as
    /// [`NileError::Encode`] when the statement runs.
    pub fn bind<T: Serialize>(self, value: T) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => self.bind_value(value),
            Err(e) => self.with_bind_error(e.to_string()),
        }
    }

    /// Append an already-encoded parameter.
    pub fn bind_value(mut self, value: Value) -> Self {
        self.params.push(value);
        self
    }

    /// Record a parameter that could not be encoded. Only the first error is kept.
    pub fn with_bind_error(mut self, message: impl Into<String>) -> Self {
        let index = self.params.len() + 1;
        self.bind_error
            .get_or_insert_with(|| format!("parameter ${}: {}", index, message.into()));
        self
    }

    /// SQL text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Bound parameters in placeholder order.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Fail if any parameter could not be encoded.
    pub fn check(&self) -> Result<(), NileError> {
        match &self.bind_error {
            Some(message) => {
                error!("Refusing to run statement: {}", message);
                Err(NileError::Encode(message.clone()))
            }
            None => Ok(()),
        }
    }

    /// Run the statement and return the raw result.
    pub async fn execute(&self, db: &dyn Executor) -> Result<QueryResult, NileError> {
        self.check()?;
        db.run(self).await
    }

    /// Run the statement and decode every returned row.
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        db: &dyn Executor,
    ) -> Result<Vec<T>, NileError> {
        self.execute(db)
            .await?
            .decode_rows()
            .inspect_err(|e| error!("Failed to decode rows: {}", e))
    }

    /// Run the statement and decode the first row, if any.
    pub async fn fetch_optional<T: DeserializeOwned>(
        &self,
        db: &dyn Executor,
    ) -> Result<Option<T>, NileError> {
        self.execute(db)
            .await?
            .decode_first()
            .inspect_err(|e| error!("Failed to decode row: {}", e))
    }

    /// Run the statement and decode the first row, failing when none is returned.
    pub async fn fetch_one<T: DeserializeOwned>(&self, db: &dyn Executor) -> Result<T, NileError> {
        self.fetch_optional(db).await?.ok_or_else(|| {
            error!("Expected a row from: {}", self.sql);
            NileError::RowMissing
        })
    }
}
