use std::fmt::Display;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use models::schemas::response::ApiErrorResponse;

/// A failed request. Only `message` reaches the client; the underlying error
/// is logged when the value is built.
#[derive(Debug)]
pub struct ApiError {
    code: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn internal(message: &str, source: impl Display) -> Self {
        tracing::error!("{}: {}", message, source);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.code,
            Json(ApiErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}
