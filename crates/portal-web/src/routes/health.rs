//! Health check endpoint.

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use nile_client::mock::MockExecutor;
    use serde_json::Value;

    use crate::routes::test_support::serve;

    #[tokio::test]
    async fn test_health_does_not_touch_database() {
        let mock = Arc::new(MockExecutor::new());
        let addr = serve(mock.clone()).await;

        let body: Value = reqwest::get(format!("http://{addr}/health"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["status"], "ok");
        assert!(mock.executed().is_empty());
    }
}
