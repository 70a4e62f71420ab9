//! Database error types.

use nile_client::NileError;
use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that can occur during database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Query API error (configuration, transport, decoding, etc.)
    #[error("database error: {0}")]
    Client(#[from] NileError),

    /// Input rejected before reaching the database
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Schema initialization failed part way through
    #[error("database initialization failed: {0}")]
    Initialization(Box<DatabaseError>),
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, DatabaseError>;
