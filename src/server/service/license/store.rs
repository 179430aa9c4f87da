//! Persistence seam used by the licence consumption guard.

use async_trait::async_trait;
use sea_orm::DbErr;

use crate::server::model::license::License;

/// Storage of licence records keyed by `(key, identifier)`.
#[async_trait]
pub trait LicenseStore: Send + Sync {
    /// Looks up the licence matching `(key, identifier)`.
    async fn find(&self, key: &str, identifier: &str) -> Result<Option<License>, DbErr>;

    /// Persists the mutable fields of `license` as a compare-and-swap on its version.
    ///
    /// # Returns
    /// - `Ok(Some(License))` - The saved licence carrying its new version
    /// - `Ok(None)` - The stored version moved on since `license` was read; nothing written
    /// - `Err(DbErr)` - Database error during the update
    async fn save(&self, license: License) -> Result<Option<License>, DbErr>;
}
