use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::{
    model::{
        api::ErrorDto,
        license::{
            CreateLicenseDto, LicenseDto, LicenseListQuery, PaginatedLicensesDto,
            UpdateLicenseDto,
        },
    },
    server::{
        error::AppError,
        middleware::admin::AdminGuard,
        model::license::{CreateLicenseParams, GetLicensesParam, UpdateLicenseParams},
        service::license::LicenseService,
        state::AppState,
    },
};

/// Tag for grouping licence administration endpoints in OpenAPI documentation
pub static ADMIN_TAG: &str = "admin";

/// Create a new licence.
///
/// Stores a licence with a zeroed request counter and an empty IP list. A random
/// 32-character key is generated when the payload omits one.
///
/// # Access Control
/// - Admin bearer token
///
/// # Returns
/// - `201 Created` - Licence created
/// - `400 Bad Request` - Invalid licence data
/// - `401 Unauthorized` - Missing or wrong admin token
/// - `409 Conflict` - Key already used for this identifier
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/admin/licenses",
    tag = ADMIN_TAG,
    request_body = CreateLicenseDto,
    responses(
        (status = 201, description = "Licence created", body = LicenseDto),
        (status = 400, description = "Invalid licence data", body = ErrorDto),
        (status = 401, description = "Missing or wrong admin token", body = ErrorDto),
        (status = 409, description = "Key already used for this identifier", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_license(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateLicenseDto>,
) -> Result<impl IntoResponse, AppError> {
    AdminGuard::new(&state.admin_api_key).require(&headers)?;

    let params = CreateLicenseParams::try_from(payload)?;
    let license = LicenseService::new(&state.db).create(params).await?;

    tracing::info!(
        id = license.id,
        identifier = %license.identifier,
        "Licence created"
    );

    Ok((StatusCode::CREATED, Json(license.into_dto(Utc::now()))))
}

/// Get paginated licences.
///
/// Returns licences newest first, optionally restricted to one identifier.
///
/// # Access Control
/// - Admin bearer token
///
/// # Returns
/// - `200 OK` - Page of licences
/// - `401 Unauthorized` - Missing or wrong admin token
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/admin/licenses",
    tag = ADMIN_TAG,
    params(LicenseListQuery),
    responses(
        (status = 200, description = "Page of licences", body = PaginatedLicensesDto),
        (status = 401, description = "Missing or wrong admin token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_licenses(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<LicenseListQuery>,
) -> Result<impl IntoResponse, AppError> {
    AdminGuard::new(&state.admin_api_key).require(&headers)?;

    let licenses = LicenseService::new(&state.db)
        .get_all(GetLicensesParam {
            page: query.page,
            per_page: query.entries,
            identifier: query.identifier,
        })
        .await?;

    Ok(Json(licenses.into_dto(Utc::now())))
}

/// Get a licence by ID.
///
/// # Access Control
/// - Admin bearer token
///
/// # Returns
/// - `200 OK` - The licence
/// - `401 Unauthorized` - Missing or wrong admin token
/// - `404 Not Found` - No licence with that ID
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/admin/licenses/{id}",
    tag = ADMIN_TAG,
    params(
        ("id" = i32, Path, description = "Licence ID")
    ),
    responses(
        (status = 200, description = "The licence", body = LicenseDto),
        (status = 401, description = "Missing or wrong admin token", body = ErrorDto),
        (status = 404, description = "Licence not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_license(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AdminGuard::new(&state.admin_api_key).require(&headers)?;

    let license = LicenseService::new(&state.db).get(id).await?;

    Ok(Json(license.into_dto(Utc::now())))
}

/// Update a licence.
///
/// Replaces the licence type, validity, request limit, IP capacity and hardware IDs.
/// With `resetUsage` set the request counter and the IP allow-list are cleared too.
///
/// # Access Control
/// - Admin bearer token
///
/// # Returns
/// - `200 OK` - Updated licence
/// - `400 Bad Request` - Invalid licence data
/// - `401 Unauthorized` - Missing or wrong admin token
/// - `404 Not Found` - No licence with that ID
/// - `409 Conflict` - Licence changed while being updated, retry
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    put,
    path = "/api/admin/licenses/{id}",
    tag = ADMIN_TAG,
    params(
        ("id" = i32, Path, description = "Licence ID")
    ),
    request_body = UpdateLicenseDto,
    responses(
        (status = 200, description = "Updated licence", body = LicenseDto),
        (status = 400, description = "Invalid licence data", body = ErrorDto),
        (status = 401, description = "Missing or wrong admin token", body = ErrorDto),
        (status = 404, description = "Licence not found", body = ErrorDto),
        (status = 409, description = "Licence changed while being updated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_license(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateLicenseDto>,
) -> Result<impl IntoResponse, AppError> {
    AdminGuard::new(&state.admin_api_key).require(&headers)?;

    let params = UpdateLicenseParams::try_from(payload)?;
    let reset_usage = params.reset_usage;
    let license = LicenseService::new(&state.db).update(id, params).await?;

    tracing::info!(id, reset_usage, "Licence updated");

    Ok(Json(license.into_dto(Utc::now())))
}

/// Delete a licence.
///
/// # Access Control
/// - Admin bearer token
///
/// # Returns
/// - `204 No Content` - Licence deleted
/// - `401 Unauthorized` - Missing or wrong admin token
/// - `404 Not Found` - No licence with that ID
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    delete,
    path = "/api/admin/licenses/{id}",
    tag = ADMIN_TAG,
    params(
        ("id" = i32, Path, description = "Licence ID")
    ),
    responses(
        (status = 204, description = "Licence deleted"),
        (status = 401, description = "Missing or wrong admin token", body = ErrorDto),
        (status = 404, description = "Licence not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_license(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AdminGuard::new(&state.admin_api_key).require(&headers)?;

    LicenseService::new(&state.db).delete(id).await?;

    tracing::info!(id, "Licence deleted");

    Ok(StatusCode::NO_CONTENT)
}
