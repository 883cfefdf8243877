use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

use crate::middleware::auth::AuthFailure;

#[derive(Debug, ThisError)]
pub enum CatalogError {
    #[error("Resource not found")]
    NotFound,

    #[error("Unauthorized: {0}")]
    Unauthorized(AuthFailure),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Category {0} does not exist")]
    UnknownCategory(i64),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            CatalogError::NotFound => return StatusCode::NOT_FOUND.into_response(),
            CatalogError::Unauthorized(reason) => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody {
                    code: "UNAUTHORIZED".to_string(),
                    message: reason.to_string(),
                },
            ),
            CatalogError::InvalidPayload(message) => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "INVALID_PAYLOAD".to_string(),
                    message,
                },
            ),
            CatalogError::UnknownCategory(id) => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "UNKNOWN_CATEGORY".to_string(),
                    message: format!("category {id} does not exist"),
                },
            ),
            err @ (CatalogError::DatabaseError(_)
            | CatalogError::Io(_)
            | CatalogError::Config(_)
            | CatalogError::InvalidConfig(_)) => {
                error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody {
                        code: "INTERNAL_ERROR".to_string(),
                        message: "An internal server error occurred.".to_string(),
                    },
                )
            }
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
