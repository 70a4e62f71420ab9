//! Contact message operations.

use nile_client::{query, Executor};
use serde::Deserialize;

use crate::models::Message;
use crate::validation::{validate_email, validate_required, MAX_TEXT_LENGTH};
use crate::Result;

/// List messages, newest first, optionally for a single customer.
pub async fn list_messages(db: &dyn Executor, customer_id: Option<i64>) -> Result<Vec<Message>> {
    let statement = match customer_id {
        Some(customer_id) => {
            query("SELECT * FROM messages WHERE customer_id = $1 ORDER BY created_at DESC")
                .bind(customer_id)
        }
        None => query("SELECT * FROM messages ORDER BY created_at DESC"),
    };

    Ok(statement.fetch_all(db).await?)
}

/// Store a new, unread message.
pub async fn create_message(
    db: &dyn Executor,
    customer_id: i64,
    name: &str,
    email: &str,
    body: &str,
) -> Result<Message> {
    validate_required("name", name, MAX_TEXT_LENGTH)?;
    validate_email(email)?;
    validate_required("message", body, usize::MAX)?;

    let message = query(
        r#"
        INSERT INTO messages (customer_id, name, email, message, read)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(customer_id)
    .bind(name)
    .bind(email.trim())
    .bind(body)
    .bind(false)
    .fetch_one(db)
    .await?;

    Ok(message)
}

/// Mark a message as read.
///
/// Returns `None` when no message has the given ID.
pub async fn mark_message_read(db: &dyn Executor, id: i64) -> Result<Option<Message>> {
    let message = query(
        r#"
        UPDATE messages
        SET read = true, updated_at = CURRENT_TIMESTAMP
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(message)
}

#[derive(Deserialize)]
struct CountRow {
    #[serde(deserialize_with = "number_or_string")]
    count: i64,
}

/// Accept a count as a JSON number or a numeric string; some drivers
/// render Postgres integers as text.
fn number_or_string<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Number(i64),
        Text(String),
    }

    match Count::deserialize(deserializer)? {
        Count::Number(n) => Ok(n),
        Count::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Count a customer's unread messages.
pub async fn count_unread_messages(db: &dyn Executor, customer_id: i64) -> Result<i64> {
    let row: CountRow = query(
        "SELECT COUNT(*)::int AS count FROM messages WHERE customer_id = $1 AND read = false",
    )
    .bind(customer_id)
    .fetch_one(db)
    .await?;

    Ok(row.count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nile_client::mock::MockExecutor;
    use serde_json::{json, Value};

    fn message_row(id: i64, read: bool) -> Value {
        json!({
            "id": id,
            "customer_id": 3,
            "name": "Ann",
            "email": "ann@x.com",
            "message": "Please call me back",
            "read": read,
            "created_at": "2026-02-01T10:00:00Z",
            "updated_at": "2026-02-01T10:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_list_messages_filters_by_customer() {
        let db = MockExecutor::new();
        db.push_rows(vec![message_row(2, false), message_row(1, true)]);

        let messages = list_messages(&db, Some(3)).await.unwrap();
        assert_eq!(messages.len(), 2);

        let stmt = db.last().unwrap();
        assert_eq!(
            stmt.sql(),
            "SELECT * FROM messages WHERE customer_id = $1 ORDER BY created_at DESC"
        );
        assert_eq!(stmt.params(), &[json!(3)]);
    }

    #[tokio::test]
    async fn test_list_all_messages() {
        let db = MockExecutor::new();
        list_messages(&db, None).await.unwrap();

        let stmt = db.last().unwrap();
        assert_eq!(stmt.sql(), "SELECT * FROM messages ORDER BY created_at DESC");
        assert!(stmt.params().is_empty());
    }

    #[tokio::test]
    async fn test_create_message_is_unread() {
        let db = MockExecutor::new();
        db.push_rows(vec![message_row(1, false)]);

        let message = create_message(&db, 3, "Ann", "ann@x.com", "Please call me back")
            .await
            .unwrap();
        assert!(!message.read);
        assert_eq!(db.last().unwrap().params()[4], json!(false));
    }

    #[tokio::test]
    async fn test_mark_message_read() {
        let db = MockExecutor::new();
        db.push_rows(vec![message_row(1, true)]);

        let message = mark_message_read(&db, 1).await.unwrap().unwrap();
        assert!(message.read);
        assert!(db.last().unwrap().sql().contains("SET read = true"));
    }

    #[tokio::test]
    async fn test_count_unread() {
        let db = MockExecutor::new();
        db.push_rows(vec![json!({ "count": 4 })]);

        assert_eq!(count_unread_messages(&db, 3).await.unwrap(), 4);
        assert!(db.last().unwrap().sql().contains("COUNT(*)::int"));
    }

    #[tokio::test]
    async fn test_count_unread_as_text() {
        let db = MockExecutor::new();
        db.push_rows(vec![json!({ "count": "4" })]);
        db.push_rows(vec![json!({ "count": "four" })]);

        assert_eq!(count_unread_messages(&db, 3).await.unwrap(), 4);
        assert!(count_unread_messages(&db, 3).await.is_err());
    }
}
