//! Error types for the HTTP service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mbridge_markup::{ParseError, RenderError};
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Markup could not be parsed under the requested dialect.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Parsed document contains constructs the renderer rejects.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Parse(ParseError::UnknownDialect(lang)) => (
                StatusCode::BAD_REQUEST,
                json!({"error": "Unknown dialect", "lang": lang}),
            ),
            Self::Parse(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({"error": e.to_string()}),
            ),
            Self::Render(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({"error": e.to_string()}),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}
