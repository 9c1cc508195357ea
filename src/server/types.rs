//! Shared response types for the API layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::timetable::RequestError;

/// Standard error payload: a stable kind identifier, a human-readable
/// message, and optional detail.
pub struct ApiErrorType {
    pub status: StatusCode,
    pub kind: &'static str,
    pub message: String,
    pub detail: Option<String>,
}

impl From<(StatusCode, &str, Option<String>)> for ApiErrorType {
    fn from((status, message, detail): (StatusCode, &str, Option<String>)) -> Self {
        let kind = if status == StatusCode::NOT_FOUND {
            "not_found"
        } else if status.is_client_error() {
            "bad_request"
        } else {
            "internal"
        };

        Self {
            status,
            kind,
            message: message.to_string(),
            detail,
        }
    }
}

impl From<RequestError> for ApiErrorType {
    fn from(err: RequestError) -> Self {
        let status = match &err {
            RequestError::NotFound => StatusCode::NOT_FOUND,
            RequestError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };

        Self {
            status,
            kind: err.kind(),
            message: err.to_string(),
            detail: None,
        }
    }
}

impl IntoResponse for ApiErrorType {
    fn into_response(self) -> Response {
        let mut body = json!({
            "error": self.message,
            "error_kind": self.kind,
        });
        if let Some(detail) = self.detail {
            body["detail"] = json!(detail);
        }

        (self.status, Json(body)).into_response()
    }
}
