//! API errors and their HTTP mapping.
//!
//! Two outcomes exist besides success: a row was not found (404) or the store
//! failed (500). Bodies that cannot be decoded are rejected with 400 before
//! any store call.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use posts_core::StorageError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Error body: `{message, error?}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Empty list, unknown id, or an id that does not parse.
    #[error("{message}")]
    NotFound { message: &'static str },

    /// The request body is not the expected JSON shape.
    #[error("invalid request body: {detail}")]
    BadRequest { detail: String },

    /// Any failure from the Post Store.
    #[error("{message}: {source}")]
    Storage {
        message: &'static str,
        #[source]
        source: StorageError,
    },
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn not_found(message: &'static str) -> Self {
        Self::NotFound { message }
    }

    /// Returns a closure for `map_err` that tags a storage failure with the
    /// route's message.
    pub fn storage(message: &'static str) -> impl FnOnce(StorageError) -> Self {
        move |source| Self::Storage { message, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::NotFound { message } => ErrorBody {
                message: message.to_string(),
                error: None,
            },
            Self::BadRequest { detail } => ErrorBody {
                message: "Invalid request body".to_string(),
                error: Some(detail),
            },
            Self::Storage { message, source } => {
                error!(error = %source, "{message}");
                ErrorBody {
                    message: message.to_string(),
                    error: Some(source.to_string()),
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

/// JSON extractor that answers 400 with an [`ErrorBody`] instead of axum's
/// plain-text 415/422 rejections.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(ApiError::BadRequest {
                detail: rejection.body_text(),
            }),
        }
    }
}
