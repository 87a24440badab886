use axum::http::StatusCode;
use axum::response::IntoResponse;
use thiserror::Error;

use crate::external::news_feed::RetrievalError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::Retrieval(err) => (StatusCode::BAD_GATEWAY, err.to_string()).into_response(),
        }
    }
}
