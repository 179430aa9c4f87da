use axum::{routing::get, Json, Router};
use tower_governor::key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::server::{
    controller::{
        admin::{self, create_license, delete_license, get_license, get_licenses, update_license},
        license::{self, validate_licence},
    },
    error::AppError,
    middleware::rate_limit,
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Nebura", description = "Licence validation and administration API"),
    paths(
        license::validate_licence,
        admin::create_license,
        admin::get_licenses,
        admin::get_license,
        admin::update_license,
        admin::delete_license,
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "license", description = "Licence validation"),
        (name = "admin", description = "Licence administration"),
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}

/// Builds the API routes.
///
/// `/validate-licence` is rate limited per client. With `trust_proxy` the limiter keys on
/// the forwarded client address instead of the TCP peer.
///
/// # Returns
/// - `Ok(Router)` - Routes awaiting application state
/// - `Err(AppError::ConfigErr)` - Unusable rate limit
pub fn router(validate_rpm: u32, trust_proxy: bool) -> Result<Router<AppState>, AppError> {
    let validate = Router::new().route("/validate-licence", get(validate_licence));
    let validate = if trust_proxy {
        validate.layer(rate_limit::layer(validate_rpm, SmartIpKeyExtractor)?)
    } else {
        validate.layer(rate_limit::layer(validate_rpm, PeerIpKeyExtractor)?)
    };

    let router = Router::new()
        .merge(validate)
        .route("/api/admin/licenses", get(get_licenses).post(create_license))
        .route(
            "/api/admin/licenses/{id}",
            get(get_license).put(update_license).delete(delete_license),
        )
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }));

    Ok(router)
}
