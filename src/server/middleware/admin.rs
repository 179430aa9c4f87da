//! Bearer-token guard for the administrative endpoints.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use subtle::ConstantTimeEq;

use crate::server::error::{auth::AuthError, AppError};

pub struct AdminGuard<'a> {
    api_key: &'a str,
}

impl<'a> AdminGuard<'a> {
    pub fn new(api_key: &'a str) -> Self {
        Self { api_key }
    }

    /// Requires the request to carry the configured admin API key as a bearer token.
    ///
    /// The comparison runs in constant time with respect to the token contents.
    ///
    /// # Returns
    /// - `Ok(())` - Token matches
    /// - `Err(AppError::AuthErr(MissingToken))` - No usable `Authorization: Bearer` header
    /// - `Err(AppError::AuthErr(InvalidToken))` - Token does not match
    pub fn require(&self, headers: &HeaderMap) -> Result<(), AppError> {
        let Some(token) = extract_bearer_token(headers) else {
            return Err(AuthError::MissingToken.into());
        };

        if !bool::from(token.as_bytes().ct_eq(self.api_key.as_bytes())) {
            return Err(AuthError::InvalidToken.into());
        }

        Ok(())
    }
}

/// Extracts the token of an `Authorization: Bearer <token>` header.
///
/// Returns `None` when the header is absent, not UTF-8, uses another scheme, or
/// carries an empty token.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}
