//! API error type and its HTTP mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use crm_core::{EntityKind, Message, ValidationError};
use crm_storage::StorageError;
use tracing::{debug, error};

/// Errors produced by resource operations.
///
/// Every variant is rendered as `{"message": ...}` with the matching status:
/// validation and bad bodies are 400, missing records 404, everything else 500.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request body could not be read as a JSON object.
    #[error("{0}")]
    BadRequest(String),

    #[error("{} not found", .0.label())]
    NotFound(EntityKind),

    #[error("Route not found")]
    NoRoute,

    #[error("{0}")]
    Storage(StorageError),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenience alias for resource operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Maps a storage error for `kind`, turning missing documents into
    /// [`ApiError::NotFound`].
    pub fn from_storage(kind: EntityKind, err: StorageError) -> Self {
        if err.is_not_found() {
            Self::NotFound(kind)
        } else {
            Self::Storage(err)
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) | Self::NoRoute => StatusCode::NOT_FOUND,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            debug!(error = %self, %status, "request rejected");
        }
        (status, Json(Message::new(self.to_string()))).into_response()
    }
}
