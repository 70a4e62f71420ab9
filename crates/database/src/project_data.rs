//! Structured payloads attached to projects.

use nile_client::{query, Executor};
use serde_json::Value;

use crate::models::ProjectData;
use crate::validation::validate_required;
use crate::Result;

/// Width of the `data_type` column.
const MAX_DATA_TYPE_LENGTH: usize = 100;

/// List a project's payloads, newest first, optionally of one type.
pub async fn list_project_data(
    db: &dyn Executor,
    project_id: i64,
    data_type: Option<&str>,
) -> Result<Vec<ProjectData>> {
    let statement = match data_type {
        Some(data_type) => query(
            r#"
            SELECT * FROM project_data
            WHERE project_id = $1 AND data_type = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(project_id)
        .bind(data_type),
        None => query("SELECT * FROM project_data WHERE project_id = $1 ORDER BY created_at DESC")
            .bind(project_id),
    };

    Ok(statement.fetch_all(db).await?)
}

/// Attach a payload to a project.
pub async fn create_project_data(
    db: &dyn Executor,
    project_id: i64,
    data_type: &str,
    value: &Value,
) -> Result<ProjectData> {
    validate_required("data_type", data_type, MAX_DATA_TYPE_LENGTH)?;

    let data = query(
        r#"
        INSERT INTO project_data (project_id, data_type, data_value)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(project_id)
    .bind(data_type)
    .bind(value)
    .fetch_one(db)
    .await?;

    Ok(data)
}
