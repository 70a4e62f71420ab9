//! Integration tests for the HTTP transport.
//!
//! Each test serves a stand-in query endpoint on an ephemeral local port and
//! points a real `NileClient` at it.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use nile_client::{query, Executor, NileClient, NileConfig, NileError};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::Mutex;

/// Requests seen by the stand-in endpoint.
#[derive(Clone, Default)]
struct Seen {
    requests: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn query_handler(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    seen.requests.lock().await.push((auth.clone(), body.clone()));

    if auth.as_deref() != Some("Bearer test-key") {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "bad key" })));
    }

    let rows = json!([{ "id": body["params"][0], "name": "Ann" }]);
    (StatusCode::OK, Json(json!({ "rows": rows, "rowCount": 1 })))
}

async fn spawn_server(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn spawn_query_server() -> (SocketAddr, Seen) {
    let seen = Seen::default();
    let router = Router::new()
        .route("/api/v1/query", post(query_handler))
        .with_state(seen.clone());
    (spawn_server(router).await, seen)
}

fn client_for(addr: SocketAddr, key: &str) -> NileClient {
    NileClient::new(NileConfig::new(format!("http://{addr}"), key)).unwrap()
}

#[derive(Debug, Deserialize, PartialEq)]
struct Row {
    id: i64,
    name: String,
}

#[tokio::test]
async fn test_posts_query_and_params_with_bearer() {
    let (addr, seen) = spawn_query_server().await;
    let client = client_for(addr, "test-key");

    let result = query("SELECT * FROM customers WHERE id = $1")
        .bind(5)
        .execute(&client)
        .await
        .unwrap();

    assert_eq!(result.row_count, 1);

    let requests = seen.requests.lock().await;
    assert_eq!(requests.len(), 1);
    let (auth, body) = &requests[0];
    assert_eq!(auth.as_deref(), Some("Bearer test-key"));
    assert_eq!(body["query"], "SELECT * FROM customers WHERE id = $1");
    assert_eq!(body["params"], json!([5]));
}

#[tokio::test]
async fn test_rows_decode_into_typed_struct() {
    let (addr, _) = spawn_query_server().await;
    let client = client_for(addr, "test-key");

    let row: Row = query("SELECT * FROM customers WHERE id = $1")
        .bind(9)
        .fetch_one(&client)
        .await
        .unwrap();

    assert_eq!(
        row,
        Row {
            id: 9,
            name: "Ann".to_string()
        }
    );
}

#[tokio::test]
async fn test_non_success_status_is_transport_error() {
    let (addr, _) = spawn_query_server().await;
    let client = client_for(addr, "wrong-key");

    let err = client
        .run(&query("SELECT 1"))
        .await
        .unwrap_err();

    match err {
        NileError::Transport { status, reason } => {
            assert_eq!(status, 401);
            assert!(reason.starts_with("Unauthorized"), "reason: {reason}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_unexpected_body_is_decode_error() {
    let router = Router::new().route("/api/v1/query", post(|| async { "not json" }));
    let addr = spawn_server(router).await;
    let client = client_for(addr, "test-key");

    let err = query("SELECT 1").execute(&client).await.unwrap_err();
    assert!(matches!(err, NileError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_http_error() {
    // Bind and drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(addr, "test-key");
    let err = query("SELECT 1").execute(&client).await.unwrap_err();
    assert!(matches!(err, NileError::Http(_)));
}
