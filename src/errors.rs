use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
    #[error("Topic/Subject/etc. not found")]
    NotFound,
    #[error("Invalid review index: {0}")]
    InvalidReviewIndex(String),
    #[error("Invalid subject: {0}")]
    InvalidSubject(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Database(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Topic/Subject/etc. not found".to_string()),
            ApiError::InvalidReviewIndex(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::InvalidSubject(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::InvalidDate(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
