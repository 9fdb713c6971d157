//! HTTP route definitions and handlers.
//!
//! Every handler makes exactly one Post Store call. Storage failures become
//! 500s through [`ApiError::storage`], absent rows become 404s.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use posts_core::{Post, PostInput, PostPatch};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use crate::errors::{ApiError, ApiResult, JsonBody};
use crate::seed::seed_posts;
use crate::AppState;

// ============================================================
// Messages
// ============================================================

const MSG_SEED_OK: &str = "Database seeding successful.";
const MSG_SEED_FAILED: &str = "Error seeding the database";
const MSG_NO_POSTS: &str = "No posts found.";
const MSG_LIST_FAILED: &str = "Error fetching all posts";
const MSG_POST_NOT_FOUND: &str = "Post not found.";
const MSG_GET_FAILED: &str = "Error fetching the post";
const MSG_CREATE_FAILED: &str = "Error adding the new post";
const MSG_UPDATE_OK: &str = "Post updated successfully";
const MSG_UPDATE_FAILED: &str = "Error updating the post";
const MSG_DELETE_OK: &str = "Post record has been deleted successfully.";
const MSG_DELETE_FAILED: &str = "Error deleting the post";

// ============================================================
// Router
// ============================================================

/// Builds the application router with permissive CORS and request tracing.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/seed_db", get(seed_db))
        .route("/posts", get(list_posts))
        .route("/posts/details/:id", get(get_post))
        .route("/posts/new", post(create_post))
        .route("/posts/update/:id", post(update_post))
        .route("/posts/delete", post(delete_post))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

/// Any origin, method and header.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

// ============================================================
// Request / Response Bodies
// ============================================================

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PostsResponse {
    pub posts: Vec<Post>,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub post: Post,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub new_post: PostInput,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostResponse {
    pub new_post: Post,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostResponse {
    pub message: &'static str,
    pub updated_post: Post,
}

/// `id` is kept as raw JSON so that strings and numbers both parse.
#[derive(Debug, Deserialize)]
pub struct DeletePostRequest {
    #[serde(default)]
    pub id: Value,
}

// ============================================================
// Id Parsing
// ============================================================

/// Integer-prefix parse: optional leading whitespace and sign, then the
/// longest run of digits (`"12abc"` is 12).
///
/// `None` is the not-a-number case; handlers treat it as "no such post".
pub fn parse_id(raw: &str) -> Option<i32> {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits_len == 0 {
        return None;
    }

    let magnitude: i64 = unsigned[..digits_len].parse().ok()?;
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).ok()
}

/// Id taken from a JSON body: numbers truncate, strings parse like path ids.
pub fn parse_json_id(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => {
            if let Some(int) = n.as_i64() {
                return i32::try_from(int).ok();
            }
            let float = n.as_f64()?.trunc();
            if float >= f64::from(i32::MIN) && float <= f64::from(i32::MAX) {
                Some(float as i32)
            } else {
                None
            }
        }
        Value::String(s) => parse_id(s),
        _ => None,
    }
}

// ============================================================
// Handlers
// ============================================================

#[instrument(skip(state))]
async fn seed_db(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let records = seed_posts();
    state
        .store
        .seed(&records)
        .await
        .map_err(ApiError::storage(MSG_SEED_FAILED))?;

    info!(count = records.len(), "database seeded");
    Ok((StatusCode::CREATED, Json(MessageResponse { message: MSG_SEED_OK })))
}

#[instrument(skip(state))]
async fn list_posts(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let posts = state
        .store
        .list_all()
        .await
        .map_err(ApiError::storage(MSG_LIST_FAILED))?;

    // An empty table answers 404, not an empty list.
    if posts.is_empty() {
        return Err(ApiError::not_found(MSG_NO_POSTS));
    }

    Ok((StatusCode::OK, Json(PostsResponse { posts })))
}

#[instrument(skip(state))]
async fn get_post(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let Some(id) = parse_id(&raw_id) else {
        return Err(ApiError::not_found(MSG_POST_NOT_FOUND));
    };

    let post = state
        .store
        .find_by_id(id)
        .await
        .map_err(ApiError::storage(MSG_GET_FAILED))?
        .ok_or(ApiError::not_found(MSG_POST_NOT_FOUND))?;

    Ok((StatusCode::OK, Json(PostResponse { post })))
}

#[instrument(skip(state, body))]
async fn create_post(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreatePostRequest>,
) -> ApiResult<impl IntoResponse> {
    let new_post = state
        .store
        .create(&body.new_post)
        .await
        .map_err(ApiError::storage(MSG_CREATE_FAILED))?;

    info!(id = new_post.id, "post created");
    Ok((StatusCode::CREATED, Json(CreatePostResponse { new_post })))
}

#[instrument(skip(state, patch))]
async fn update_post(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    JsonBody(patch): JsonBody<PostPatch>,
) -> ApiResult<impl IntoResponse> {
    let Some(id) = parse_id(&raw_id) else {
        return Err(ApiError::not_found(MSG_POST_NOT_FOUND));
    };

    let updated_post = state
        .store
        .update(id, &patch)
        .await
        .map_err(ApiError::storage(MSG_UPDATE_FAILED))?
        .ok_or(ApiError::not_found(MSG_POST_NOT_FOUND))?;

    Ok((
        StatusCode::CREATED,
        Json(UpdatePostResponse {
            message: MSG_UPDATE_OK,
            updated_post,
        }),
    ))
}

#[instrument(skip(state, body))]
async fn delete_post(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DeletePostRequest>,
) -> ApiResult<impl IntoResponse> {
    let Some(id) = parse_json_id(&body.id) else {
        return Err(ApiError::not_found(MSG_POST_NOT_FOUND));
    };

    let deleted = state
        .store
        .delete_by_id(id)
        .await
        .map_err(ApiError::storage(MSG_DELETE_FAILED))?;
    if !deleted {
        return Err(ApiError::not_found(MSG_POST_NOT_FOUND));
    }

    info!(id, "post deleted");
    Ok((StatusCode::CREATED, Json(MessageResponse { message: MSG_DELETE_OK })))
}
