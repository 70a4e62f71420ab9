//! Schema initialization endpoint.

use axum::extract::State;
use axum::Json;
use database::InitReport;
use tracing::info;

use crate::error::Result;
use crate::state::AppState;

/// Create the schema and seed the administrator.
///
/// Responds with `{ "success": true, "message": ... }`; failures become a
/// 500 with an `error` field.
pub async fn init_db(State(state): State<AppState>) -> Result<Json<InitReport>> {
    let report = state.db.initialize(&state.admin_seed).await?;
    info!(admin_created = report.admin_created, "Database initialization requested");
    Ok(Json(report))
}
