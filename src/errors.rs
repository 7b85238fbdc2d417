use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("flight lookup failed: {0}")]
    Lookup(String),

    #[error("storage failed: {0}")]
    Storage(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn lookup(msg: impl Into<String>) -> Self {
        AppError::Lookup(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        AppError::Storage(msg.into())
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::Storage(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation error"),
            AppError::Lookup(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Error searching flights"),
            AppError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        };

        let body = Json(json!({
            "success": false,
            "error": error,
            "details": self.to_string(),
        }));

        (status, body).into_response()
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, AppError>;
