/// Common test utilities for Engram integration tests
///
/// This file contains shared functions and utilities for all integration
/// tests, including test application setup and helper functions for
/// creating common test objects through the API.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use diesel::connection::SimpleConnection;
use engram::db::init_pool;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::Service;

/// Creates a test application with an in-memory SQLite database
///
/// Uses a unique shared-cache in-memory URI so every connection in the
/// pool sees the same database while tests stay isolated from each other.
///
/// ### Returns
///
/// An Axum Router configured with all routes and connected to an
/// in-memory database
pub fn create_test_app() -> Router {
    let unique_id = uuid::Uuid::new_v4();
    let database_url = format!("file:test_{}?mode=memory&cache=shared", unique_id);
    let pool = Arc::new(init_pool(&database_url));

    // Run migrations on the in-memory database to set up the schema
    let conn = &mut pool.get().unwrap();
    conn.batch_execute("PRAGMA foreign_keys = ON").unwrap();
    engram::run_migrations(conn);

    engram::create_app(pool)
}

/// Creates a topic via the API
///
/// Sends a POST request to /topics, asserts a 200 OK response, and returns
/// the created topic as parsed JSON.
pub async fn create_topic(app: &mut Router, subject: &str, title: &str) -> Value {
    let request = Request::builder()
        .uri("/topics")
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "subject": subject,
                "title": title,
                "tags": [],
                "source": "class"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Completes a review via the API and returns the raw response
pub async fn complete_review(app: &mut Router, topic_id: &str, review_index: i32) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri("/reviews")
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "topic_id": topic_id,
                "review_index": review_index
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.call(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

/// Fetches a topic by ID via the API, returning JSON null when missing
pub async fn get_topic(app: &mut Router, topic_id: &str) -> Value {
    let request = Request::builder()
        .uri(format!("/topics/{}", topic_id))
        .method("GET")
        .body(Body::empty())
        .unwrap();

    let response = app.call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}
