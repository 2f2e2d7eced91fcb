use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

use crate::domain::dedup::DedupError;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<DedupError> for ApiError {
    fn from(err: DedupError) -> Self {
        match err {
            // Validation failures carry user-facing text.
            DedupError::InvalidQuery(message) => Self::bad_request(message),
            // Everything else is a system fault; log the cause
            // server-side and keep the response generic.
            other => {
                tracing::error!("Duplicate search failed: {}", other);
                Self::internal("An error occurred while processing your request")
            }
        }
    }
}
