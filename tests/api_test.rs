//! HTTP API tests against the in-memory store and a failing mock store.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt; // for oneshot

use blogposts::routes::create_router;
use blogposts::seed::SEED_POSTS_COUNT;
use blogposts::AppState;
use posts_core::{
    MemoryBackend, Post, PostInput, PostPatch, PostStore, StorageError, StorageResult,
};

// =============================================================================
// Helpers
// =============================================================================

/// Helper to create a test app with in-memory storage.
fn test_app() -> Router {
    create_router(AppState::new(MemoryBackend::new()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

/// Store whose every call fails, for the 500 paths.
struct FailingStore;

#[async_trait]
impl PostStore for FailingStore {
    async fn seed(&self, _records: &[PostInput]) -> StorageResult<()> {
        Err(StorageError::connection("connection refused"))
    }

    async fn list_all(&self) -> StorageResult<Vec<Post>> {
        Err(StorageError::read("connection refused"))
    }

    async fn find_by_id(&self, _id: i32) -> StorageResult<Option<Post>> {
        Err(StorageError::read("connection refused"))
    }

    async fn create(&self, _input: &PostInput) -> StorageResult<Post> {
        Err(StorageError::write("connection refused"))
    }

    async fn update(&self, _id: i32, _patch: &PostPatch) -> StorageResult<Option<Post>> {
        Err(StorageError::write("connection refused"))
    }

    async fn delete_by_id(&self, _id: i32) -> StorageResult<bool> {
        Err(StorageError::write("connection refused"))
    }
}

// =============================================================================
// End-to-end flow
// =============================================================================

#[tokio::test]
async fn test_seed_list_get_delete_create_flow() {
    let app = test_app();

    let (status, body) = get(&app, "/seed_db").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Database seeding successful.");

    let (status, body) = get(&app, "/posts").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["posts"].as_array().unwrap().len(), SEED_POSTS_COUNT);

    let (status, body) = get(&app, "/posts/details/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["post"]["id"], 1);
    assert_eq!(body["post"]["title"], "Getting Started with Node.js");
    assert_eq!(body["post"]["author"], "Alice Smith");
    assert!(body["post"]["createdAt"].is_string());
    assert!(body["post"]["updatedAt"].is_string());

    let (status, body) = post(&app, "/posts/delete", json!({ "id": 1 })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Post record has been deleted successfully.");

    let (status, body) = get(&app, "/posts/details/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Post not found." }));

    let (status, body) = post(
        &app,
        "/posts/new",
        json!({ "newPost": { "title": "T", "content": "C", "author": "A" } }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["newPost"]["id"], (SEED_POSTS_COUNT + 1) as i64);
    assert_eq!(body["newPost"]["title"], "T");
    assert_eq!(body["newPost"]["content"], "C");
    assert_eq!(body["newPost"]["author"], "A");
}

#[tokio::test]
async fn test_reseed_restores_deleted_posts() {
    let app = test_app();
    get(&app, "/seed_db").await;
    post(&app, "/posts/delete", json!({ "id": 3 })).await;
    post(&app, "/posts/new", json!({ "newPost": { "title": "extra" } })).await;

    let (status, _) = get(&app, "/seed_db").await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = get(&app, "/posts").await;
    let posts = body["posts"].as_array().unwrap();
    assert_eq!(posts.len(), SEED_POSTS_COUNT);
    let ids: Vec<i64> = posts.iter().map(|p| p["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, (1..=SEED_POSTS_COUNT as i64).collect::<Vec<_>>());
}

// =============================================================================
// List
// =============================================================================

#[tokio::test]
async fn test_list_empty_is_not_found() {
    let app = test_app();

    let (status, body) = get(&app, "/posts").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "No posts found." }));
}

// =============================================================================
// Get by id
// =============================================================================

#[tokio::test]
async fn test_get_non_numeric_id_is_not_found() {
    let app = test_app();
    get(&app, "/seed_db").await;

    let (status, body) = get(&app, "/posts/details/abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Post not found.");
}

#[tokio::test]
async fn test_get_uses_integer_prefix_of_id() {
    let app = test_app();
    get(&app, "/seed_db").await;

    let (status, body) = get(&app, "/posts/details/2abc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["post"]["id"], 2);
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_then_fetch_returns_same_post() {
    let app = test_app();

    let (_, created) = post(
        &app,
        "/posts/new",
        json!({ "newPost": { "title": "T", "content": "C", "author": "A" } }),
    )
    .await;
    let id = created["newPost"]["id"].as_i64().unwrap();

    let (status, fetched) = get(&app, &format!("/posts/details/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["post"], created["newPost"]);
}

#[tokio::test]
async fn test_create_ignores_client_id() {
    let app = test_app();
    get(&app, "/seed_db").await;

    let (status, body) = post(
        &app,
        "/posts/new",
        json!({ "newPost": { "id": 99, "title": "T", "content": "C", "author": "A" } }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["newPost"]["id"], (SEED_POSTS_COUNT + 1) as i64);

    let (status, _) = get(&app, "/posts/details/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_without_envelope_is_bad_request() {
    let app = test_app();

    let (status, body) = post(&app, "/posts/new", json!({ "title": "T" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid request body");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_create_with_wrong_field_type_is_bad_request() {
    let app = test_app();

    let (status, _) = post(&app, "/posts/new", json!({ "newPost": { "title": 5 } })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nothing reached the store
    let (status, _) = get(&app, "/posts").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_with_invalid_json_is_bad_request() {
    let app = test_app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/posts/new")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_update_preserves_absent_fields() {
    let app = test_app();
    get(&app, "/seed_db").await;

    let (status, body) = post(&app, "/posts/update/1", json!({ "title": "New title" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Post updated successfully");
    assert_eq!(body["updatedPost"]["id"], 1);
    assert_eq!(body["updatedPost"]["title"], "New title");
    assert_eq!(body["updatedPost"]["author"], "Alice Smith");

    let (_, fetched) = get(&app, "/posts/details/1").await;
    assert_eq!(fetched["post"], body["updatedPost"]);
}

#[tokio::test]
async fn test_update_with_empty_patch_succeeds() {
    let app = test_app();
    get(&app, "/seed_db").await;

    let (status, body) = post(&app, "/posts/update/4", json!({})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Post updated successfully");
    assert_eq!(body["updatedPost"]["title"], "Boost Your JavaScript Skills");
}

#[tokio::test]
async fn test_update_missing_is_not_found_and_creates_nothing() {
    let app = test_app();

    let (status, body) = post(&app, "/posts/update/77", json!({ "title": "ghost" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Post not found.");

    let (status, _) = get(&app, "/posts").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_non_numeric_id_is_not_found() {
    let app = test_app();
    get(&app, "/seed_db").await;

    let (status, _) = post(&app, "/posts/update/first", json!({ "title": "x" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_with_null_clears_field() {
    let app = test_app();
    get(&app, "/seed_db").await;

    let (status, body) = post(&app, "/posts/update/1", json!({ "title": null })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["updatedPost"]["title"].is_null());
    assert_eq!(body["updatedPost"]["author"], "Alice Smith");

    let (_, fetched) = get(&app, "/posts/details/1").await;
    assert!(fetched["post"]["title"].is_null());
}

#[tokio::test]
async fn test_update_ignores_client_id() {
    let app = test_app();
    get(&app, "/seed_db").await;

    let (status, body) = post(&app, "/posts/update/1", json!({ "id": 99, "title": "x" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["updatedPost"]["id"], 1);
    assert_eq!(body["updatedPost"]["title"], "x");

    let (status, _) = get(&app, "/posts/details/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, fetched) = get(&app, "/posts/details/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["post"]["title"], "x");
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_twice_is_not_found() {
    let app = test_app();
    get(&app, "/seed_db").await;

    let (status, _) = post(&app, "/posts/delete", json!({ "id": 5 })).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post(&app, "/posts/delete", json!({ "id": 5 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Post not found.");
}

#[tokio::test]
async fn test_delete_accepts_string_id() {
    let app = test_app();
    get(&app, "/seed_db").await;

    let (status, _) = post(&app, "/posts/delete", json!({ "id": "6" })).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = get(&app, "/posts/details/6").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_without_usable_id_is_not_found() {
    let app = test_app();
    get(&app, "/seed_db").await;

    for body in [json!({}), json!({ "id": "abc" }), json!({ "id": null })] {
        let (status, _) = post(&app, "/posts/delete", body).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    let (_, body) = get(&app, "/posts").await;
    assert_eq!(body["posts"].as_array().unwrap().len(), SEED_POSTS_COUNT);
}

// =============================================================================
// Storage failures
// =============================================================================

#[tokio::test]
async fn test_storage_failures_are_internal_errors() {
    let app = create_router(AppState::new(FailingStore));

    let cases = [
        (Method::GET, "/seed_db", None, "Error seeding the database"),
        (Method::GET, "/posts", None, "Error fetching all posts"),
        (Method::GET, "/posts/details/1", None, "Error fetching the post"),
        (
            Method::POST,
            "/posts/new",
            Some(json!({ "newPost": { "title": "T" } })),
            "Error adding the new post",
        ),
        (
            Method::POST,
            "/posts/update/1",
            Some(json!({ "title": "T" })),
            "Error updating the post",
        ),
        (
            Method::POST,
            "/posts/delete",
            Some(json!({ "id": 1 })),
            "Error deleting the post",
        ),
    ];

    for (method, uri, body, message) in cases {
        let (status, json) = send(&app, method, uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(json["message"], message, "{uri}");
        assert!(
            json["error"].as_str().unwrap().contains("connection refused"),
            "{uri}"
        );
    }
}

#[tokio::test]
async fn test_unparseable_id_skips_failing_store() {
    let app = create_router(AppState::new(FailingStore));

    let (status, _) = get(&app, "/posts/details/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// CORS
// =============================================================================

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app = test_app();

    let request = Request::builder()
        .uri("/posts")
        .header(header::ORIGIN, "http://example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}
