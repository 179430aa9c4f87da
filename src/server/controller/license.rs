use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Query, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        license::{LicenseSnapshotDto, ValidateLicenceQuery},
    },
    server::{
        clock::SystemClock,
        data::license::LicenseRepository,
        error::AppError,
        model::license::ConsumeLicenseParams,
        service::license::guard::LicenseGuard,
        state::AppState,
        util::ip::client_ip,
    },
};

/// Tag for grouping licence validation endpoints in OpenAPI documentation
pub static LICENSE_TAG: &str = "license";

/// Validate a licence and consume one request from it.
///
/// Checks that the licence identified by `key` and `identifier` exists, has not expired,
/// has requests left and accepts the caller's IP. On success the request counter is
/// incremented, the IP is recorded when new, and the updated licence is returned.
/// Rejected calls leave the licence untouched.
///
/// The caller's IP is the TCP peer, or the first `X-Forwarded-For` entry when the
/// server is configured to trust a reverse proxy.
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `peer` - Address of the TCP peer
/// - `headers` - Request headers, consulted for `X-Forwarded-For`
/// - `query` - Licence key and identifier
///
/// # Returns
/// - `200 OK` - Licence admitted, body holds its state after this call
/// - `400 Bad Request` - Missing or malformed key or identifier
/// - `403 Forbidden` - Licence expired or IP limit reached
/// - `404 Not Found` - No licence for the key and identifier
/// - `409 Conflict` - Licence under concurrent modification, retry
/// - `429 Too Many Requests` - Request limit reached, or caller rate limited
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/validate-licence",
    tag = LICENSE_TAG,
    params(ValidateLicenceQuery),
    responses(
        (status = 200, description = "Licence admitted", body = LicenseSnapshotDto),
        (status = 400, description = "Invalid key or identifier", body = ErrorDto),
        (status = 403, description = "Licence expired or IP limit reached", body = ErrorDto),
        (status = 404, description = "Licence not found", body = ErrorDto),
        (status = 409, description = "Licence under concurrent modification", body = ErrorDto),
        (status = 429, description = "Request limit reached or rate limited", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn validate_licence(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Query(query): Query<ValidateLicenceQuery>,
) -> Result<impl IntoResponse, AppError> {
    let ip = client_ip(&headers, peer.ip(), state.trust_proxy);
    let params = ConsumeLicenseParams::new(&query.key, &query.identifier, &ip.to_string())?;

    let guard = LicenseGuard::new(LicenseRepository::new(&state.db), SystemClock);

    match guard.validate_and_consume(&params).await {
        Ok(snapshot) => Ok(Json(snapshot.into_dto())),
        Err(AppError::LicenseErr(reason)) => {
            tracing::debug!(
                key = %params.key,
                identifier = %params.identifier,
                ip = %params.ip,
                "Licence validation rejected: {}",
                reason
            );
            Err(reason.into())
        }
        Err(err) => Err(err),
    }
}
