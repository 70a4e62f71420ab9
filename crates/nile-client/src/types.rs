//! Wire types for the query API.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::NileError;

/// Request body posted to the query endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct QueryRequest<'a> {
    pub query: &'a str,
    pub params: &'a [Value],
}

/// Result of a single statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Returned rows, one JSON object per row.
    #[serde(default)]
    pub rows: Vec<Value>,
    /// Number of rows affected or returned.
    #[serde(default, rename = "rowCount", alias = "row_count")]
    pub row_count: u64,
}

impl QueryResult {
    /// Build a result from rows, counting them.
    pub fn from_rows(rows: Vec<Value>) -> Self {
        let row_count = rows.len() as u64;
        Self { rows, row_count }
    }

    /// A result carrying only an affected-row count.
    pub fn affected(row_count: u64) -> Self {
        Self {
            rows: Vec::new(),
            row_count,
        }
    }

    /// Decode every row into `T`.
    pub fn decode_rows<T: DeserializeOwned>(self) -> Result<Vec<T>, NileError> {
        self.rows
            .into_iter()
            .map(|row| serde_json::from_value(row).map_err(NileError::Decode))
            .collect()
    }

    /// Decode the first row into `T`, if any.
    pub fn decode_first<T: DeserializeOwned>(self) -> Result<Option<T>, NileError> {
        match self.rows.into_iter().next() {
            Some(row) => Ok(Some(serde_json::from_value(row)?)),
            None => Ok(None),
        }
    }
}
