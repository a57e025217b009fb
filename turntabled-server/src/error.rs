//! Server error types and HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use turntabled_core::CoreError;

/// Server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error returned by API handlers.
///
/// Rendered as the stable envelope `{"error": {"code", "message"}}`:
/// rejected transitions map to 409, catalog failures to 500.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] CoreError);

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            CoreError::InvalidTransition { .. } => StatusCode::CONFLICT,
            CoreError::CatalogUnavailable { .. } | CoreError::InvalidTable { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = json!({
            "error": {
                "code": self.0.error_code(),
                "message": self.0.to_string(),
            }
        });
        tracing::debug!(code = self.0.error_code(), status = %status, "request rejected");
        (status, Json(body)).into_response()
    }
}
