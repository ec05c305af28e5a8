use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use feed_core::FeedError;
use serde_json::json;
use tracing::error;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(err) => {
                error!("Internal error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

// Anyhow conversion
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl From<FeedError> for AppError {
    fn from(err: FeedError) -> Self {
        match err {
            FeedError::NotFound(msg) => AppError::NotFound(msg),
            FeedError::InvalidInput(msg) => AppError::BadRequest(msg),
            // 検証エラーはサーバー側の不具合なので 500 にする
            err @ (FeedError::Validation(_) | FeedError::Internal(_)) => {
                AppError::Internal(anyhow::Error::new(err))
            }
        }
    }
}
