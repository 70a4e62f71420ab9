//! Document operations.

use nile_client::{query, Executor};

use crate::models::{Document, NewDocument};
use crate::validation::{validate_length, validate_required, MAX_SHORT_LENGTH, MAX_TEXT_LENGTH};
use crate::Result;

/// Width of the `category` column.
const MAX_CATEGORY_LENGTH: usize = 100;

/// List documents, newest first.
///
/// With a customer ID, returns that customer's documents plus every public one.
pub async fn list_documents(db: &dyn Executor, customer_id: Option<i64>) -> Result<Vec<Document>> {
    let statement = match customer_id {
        Some(customer_id) => query(
            r#"
            SELECT * FROM documents
            WHERE customer_id = $1 OR is_public = true
            ORDER BY created_at DESC
            "#,
        )
        .bind(customer_id),
        None => query("SELECT * FROM documents ORDER BY created_at DESC"),
    };

    Ok(statement.fetch_all(db).await?)
}

/// List documents in a category, newest first.
pub async fn list_documents_by_category(
    db: &dyn Executor,
    category: &str,
) -> Result<Vec<Document>> {
    let documents = query("SELECT * FROM documents WHERE category = $1 ORDER BY created_at DESC")
        .bind(category)
        .fetch_all(db)
        .await?;

    Ok(documents)
}

/// Get a document by ID.
pub async fn get_document(db: &dyn Executor, id: i64) -> Result<Option<Document>> {
    let document = query("SELECT * FROM documents WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await?;

    Ok(document)
}

/// Register a new document.
pub async fn create_document(db: &dyn Executor, document: &NewDocument) -> Result<Document> {
    validate_required("name", &document.name, MAX_TEXT_LENGTH)?;
    validate_required("file_path", &document.file_path, usize::MAX)?;
    validate_required("file_type", &document.file_type, MAX_SHORT_LENGTH)?;
    if let Some(category) = &document.category {
        validate_length("category", category, MAX_CATEGORY_LENGTH)?;
    }

    let created = query(
        r#"
        INSERT INTO documents
            (name, file_path, file_type, file_size, category, customer_id, is_public)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(&document.name)
    .bind(&document.file_path)
    .bind(&document.file_type)
    .bind(document.file_size)
    .bind(&document.category)
    .bind(document.customer_id)
    .bind(document.is_public)
    .fetch_one(db)
    .await?;

    Ok(created)
}

/// Count one download.
///
/// The increment happens inside the database, so concurrent calls never
/// lose a count.
pub async fn increment_document_download(db: &dyn Executor, id: i64) -> Result<Option<Document>> {
    let document = query(
        r#"
        UPDATE documents
        SET download_count = download_count + 1, updated_at = CURRENT_TIMESTAMP
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(document)
}
