use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug, PartialEq)]
pub enum AuthError {
    /// The request carries no `Authorization: Bearer` header.
    #[error("Missing admin bearer token")]
    MissingToken,

    /// The bearer token does not match the configured admin API key.
    #[error("Invalid admin bearer token")]
    InvalidToken,
}

/// Converts authentication errors into HTTP responses.
///
/// Both variants map to 401 Unauthorized with the same client-facing message so that
/// callers cannot distinguish a missing token from a wrong one. The specific cause is
/// logged at debug level.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("Admin authentication failed: {}", self);

        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorDto::new("Admin authentication required")),
        )
            .into_response()
    }
}
