//! In-memory executor for testing code that issues statements.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::NileError;
use crate::executor::Executor;
use crate::query::Statement;
use crate::types::QueryResult;

/// Executor that records statements and replays queued responses.
///
/// When the queue is empty, statements succeed with an empty result.
#[derive(Debug, Default)]
pub struct MockExecutor {
    responses: Mutex<VecDeque<Result<QueryResult, NileError>>>,
    executed: Mutex<Vec<Statement>>,
}

impl MockExecutor {
    /// Create an executor with no queued responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a result returning the given rows.
    pub fn push_rows(&self, rows: Vec<Value>) -> &Self {
        self.push_result(Ok(QueryResult::from_rows(rows)))
    }

    /// Queue an empty result with the given affected-row count.
    pub fn push_affected(&self, row_count: u64) -> &Self {
        self.push_result(Ok(QueryResult::affected(row_count)))
    }

    /// Queue a failure.
    pub fn push_error(&self, error: NileError) -> &Self {
        self.push_result(Err(error))
    }

    /// Queue an arbitrary response.
    pub fn push_result(&self, result: Result<QueryResult, NileError>) -> &Self {
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(result);
        self
    }

    /// Statements executed so far, in order.
    pub fn executed(&self) -> Vec<Statement> {
        self.executed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// The most recently executed statement.
    pub fn last(&self) -> Option<Statement> {
        self.executed().pop()
    }
}

#[async_trait]
impl Executor for MockExecutor {
    async fn run(&self, statement: &Statement) -> Result<QueryResult, NileError> {
        self.executed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(statement.clone());

        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
            .unwrap_or_else(|| Ok(QueryResult::default()))
    }
}
