use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::certificate::ValidationError;

/// Error returned by route handlers, rendered as `{ "error": ... }`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    /// Server-side failure. `public` is sent to the caller, `detail` is logged.
    Internal { public: &'static str, detail: String },
}

impl ApiError {
    pub fn internal(public: &'static str, detail: impl ToString) -> Self {
        ApiError::Internal {
            public,
            detail: detail.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal { public, detail } => {
                tracing::error!("{public}: {detail}");
                (StatusCode::INTERNAL_SERVER_ERROR, public.to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid request body: {}", e.body_text()))
    }
}
