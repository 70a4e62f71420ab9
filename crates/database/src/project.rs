//! Project operations.

use nile_client::{query, Executor};

use crate::models::Project;
use crate::patch::SetClause;
use crate::validation::{validate_required, MAX_SHORT_LENGTH, MAX_TEXT_LENGTH};
use crate::Result;

/// Fields to change on a project.
///
/// Dates are `YYYY-MM-DD` strings; `Some(None)` clears a nullable column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub customer_id: Option<i64>,
    pub status: Option<String>,
    pub start_date: Option<Option<String>>,
    pub end_date: Option<Option<String>>,
}

impl ProjectPatch {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_required("name", name, MAX_TEXT_LENGTH)?;
        }
        if let Some(status) = &self.status {
            validate_required("status", status, MAX_SHORT_LENGTH)?;
        }
        Ok(())
    }

    fn set_clause(&self) -> SetClause {
        let mut clause = SetClause::new(1);
        clause.set_some("name", self.name.as_ref());
        clause.set_some("description", self.description.as_ref());
        clause.set_some("customer_id", self.customer_id);
        clause.set_some("status", self.status.as_ref());
        clause.set_some("start_date", self.start_date.as_ref());
        clause.set_some("end_date", self.end_date.as_ref());
        clause
    }
}

/// List projects, newest first, optionally for a single customer.
pub async fn list_projects(db: &dyn Executor, customer_id: Option<i64>) -> Result<Vec<Project>> {
    let statement = match customer_id {
        Some(customer_id) => {
            query("SELECT * FROM projects WHERE customer_id = $1 ORDER BY created_at DESC")
                .bind(customer_id)
        }
        None => query("SELECT * FROM projects ORDER BY created_at DESC"),
    };

    Ok(statement.fetch_all(db).await?)
}

/// Get a project by ID.
pub async fn get_project(db: &dyn Executor, id: i64) -> Result<Option<Project>> {
    let project = query("SELECT * FROM projects WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await?;

    Ok(project)
}

/// Create a project for a customer. Status starts as the column default.
pub async fn create_project(
    db: &dyn Executor,
    name: &str,
    customer_id: i64,
    description: Option<&str>,
) -> Result<Project> {
    validate_required("name", name, MAX_TEXT_LENGTH)?;

    let project = query(
        r#"
        INSERT INTO projects (name, customer_id, description)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(name)
    .bind(customer_id)
    .bind(description)
    .fetch_one(db)
    .await?;

    Ok(project)
}

/// Apply a partial update, always refreshing `updated_at`.
pub async fn update_project(
    db: &dyn Executor,
    id: i64,
    patch: &ProjectPatch,
) -> Result<Option<Project>> {
    patch.validate()?;

    let clause = patch.set_clause();
    let sql = format!(
        "UPDATE projects SET {} WHERE id = $1 RETURNING *",
        clause.assignments()
    );

    let project = clause
        .bind_to(query(sql).bind(id))
        .fetch_optional(db)
        .await?;

    Ok(project)
}
