use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::store::StoreError;

/// Errors surfaced to HTTP clients. Bodies are plain text, not JSON.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn invalid_payload() -> Self {
        Self::BadRequest("Invalid request payload".to_string())
    }

    pub fn invalid_id() -> Self {
        Self::BadRequest("Invalid item ID".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidItem => AppError::BadRequest("Invalid item data".to_string()),
            StoreError::InvalidQuantity(_) => {
                AppError::BadRequest("Invalid purchase quantity".to_string())
            }
            StoreError::NotFound(_) => AppError::NotFound("Item not found".to_string()),
            StoreError::InsufficientStock { .. } => {
                AppError::BadRequest("Insufficient stock".to_string())
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(reason = %rejection.body_text(), "Rejected request body");
        AppError::invalid_payload()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Internal(err) => error!(error = ?err, "Request failed"),
            other => warn!(status = status.as_u16(), error = %other, "Request rejected"),
        }
        (status, self.to_string()).into_response()
    }
}
