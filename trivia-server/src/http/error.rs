//! API error envelope
//!
//! Every failure leaves the service as one of four fixed status/message
//! pairs in the `{success, error, message}` envelope. Handlers decide
//! which variant a cause collapses into; the cause itself is only logged.

use std::fmt::Display;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// API error type with fixed HTTP status mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Malformed or incomplete input (400)
    #[error("bad request")]
    BadRequest,

    /// Missing resource or empty result (404)
    #[error("resource not found")]
    NotFound,

    /// Route exists but not for this method (405)
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Valid-looking input the operation could not complete (422)
    #[error("unprocessable")]
    Unprocessable,
}

impl ApiError {
    pub fn status(self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Log the underlying cause and collapse into this variant.
    pub fn because(self, cause: impl Display) -> Self {
        tracing::warn!(status = self.status().as_u16(), %cause, "request failed");
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = json!({
            "success": false,
            "error": status.as_u16(),
            "message": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}
