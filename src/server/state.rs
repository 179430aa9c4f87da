//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds the shared resources needed by
//! the HTTP handlers. The state is initialized once during startup and then cloned for
//! each request handler through Axum's state extraction.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone: `DatabaseConnection` is a connection pool whose clones
/// share the pool, and the admin key is reference-counted.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Bearer token expected by the admin licence endpoints.
    pub admin_api_key: Arc<str>,

    /// Attribute requests to the first `X-Forwarded-For` entry instead of the TCP peer.
    pub trust_proxy: bool,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `admin_api_key` - Token required by the admin endpoints
    /// - `trust_proxy` - Whether a reverse proxy sets `X-Forwarded-For`
    pub fn new(db: DatabaseConnection, admin_api_key: &str, trust_proxy: bool) -> Self {
        Self {
            db,
            admin_api_key: Arc::from(admin_api_key),
            trust_proxy,
        }
    }
}
