use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Reasons a licence validation can be rejected.
///
/// Every variant is terminal for the call and leaves the stored record untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseError {
    /// No licence matches the `(key, identifier)` pair.
    #[error("License not found")]
    NotFound,

    /// The licence's validity period has ended.
    #[error("License has expired")]
    Expired,

    /// The licence has consumed its whole request allowance.
    #[error("License request limit reached")]
    QuotaExceeded,

    /// The caller's IP is new and the allow-list is full.
    #[error("License IP limit reached")]
    IpCapacityExceeded,

    /// Concurrent writers kept winning the race for the same record.
    ///
    /// Unlike the other variants the caller may retry immediately.
    #[error("License is being updated concurrently, retry the request")]
    Contended,
}

impl LicenseError {
    /// Machine readable code sent alongside the error message.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound => "license_not_found",
            Self::Expired => "license_expired",
            Self::QuotaExceeded => "quota_exceeded",
            Self::IpCapacityExceeded => "ip_capacity_exceeded",
            Self::Contended => "license_contended",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Expired | Self::IpCapacityExceeded => StatusCode::FORBIDDEN,
            Self::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
            Self::Contended => StatusCode::CONFLICT,
        }
    }
}

/// Converts licence rejections into HTTP responses.
///
/// # Returns
/// - 404 Not Found - `NotFound`
/// - 403 Forbidden - `Expired`, `IpCapacityExceeded`
/// - 429 Too Many Requests - `QuotaExceeded`
/// - 409 Conflict - `Contended`
impl IntoResponse for LicenseError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(ErrorDto::with_code(self.to_string(), self.code())),
        )
            .into_response()
    }
}
