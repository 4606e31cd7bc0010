//! Error type shared by all handlers.
//!
//! Validation failures reply with their own text, which is the message the
//! client is meant to read. Storage failures are logged and reply with a fixed
//! body so driver details never reach the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use todo_core::{ValidationError, ValidationErrors};

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    #[error("todo {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
            ApiError::Invalid(errs) => (StatusCode::BAD_REQUEST, errs.to_string()).into_response(),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "Todo Not Found").into_response(),
            ApiError::Store(StoreError::Duplicate(id)) => {
                tracing::warn!("rejected duplicate todo id {id}");
                (StatusCode::CONFLICT, "Todo Already Exists").into_response()
            }
            ApiError::Store(err) => {
                tracing::error!("storage failure: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
