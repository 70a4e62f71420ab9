//! Error types for the portal web service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use database::DatabaseError;
use thiserror::Error;

/// Errors that can occur while handling a request.
#[derive(Debug, Error)]
pub enum PortalError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl PortalError {
    fn summary(&self) -> &'static str {
        match self {
            PortalError::Database(DatabaseError::Initialization(_)) => {
                "Error initializing database"
            }
            PortalError::Database(_) => "Database error",
        }
    }
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        let PortalError::Database(err) = &self;
        tracing::error!("{}: {}", self.summary(), err);

        let detail = match err {
            DatabaseError::Initialization(inner) => inner.to_string(),
            other => other.to_string(),
        };

        let body = serde_json::json!({
            "success": false,
            "message": self.summary(),
            "error": detail,
        });

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Result type for portal handlers.
pub type Result<T> = std::result::Result<T, PortalError>;
