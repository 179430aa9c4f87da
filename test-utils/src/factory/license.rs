//! License factory for creating test licence entities.
//!
//! This module provides factory methods for creating licence entities with sensible
//! defaults, reducing boilerplate in tests. The factory supports customization
//! through a builder pattern.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use entity::license::{LicenseType, StringList};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test licences with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::license::LicenseFactory;
///
/// let license = LicenseFactory::new(&db)
///     .request_limit(2)
///     .max_ips(Some(1))
///     .build()
///     .await?;
/// ```
pub struct LicenseFactory<'a> {
    db: &'a DatabaseConnection,
    key: String,
    identifier: String,
    license_type: LicenseType,
    valid_until: DateTime<Utc>,
    request_limit: i64,
    request_count: i64,
    ips: Vec<String>,
    max_ips: Option<i32>,
    hwid: Vec<String>,
}

impl<'a> LicenseFactory<'a> {
    /// Creates a new LicenseFactory with default values.
    ///
    /// Defaults:
    /// - key: `"KEY-{id}"` where id is auto-incremented
    /// - identifier: `"tenant-{id}"`
    /// - license_type: `Basic`
    /// - valid_until: 30 days from now
    /// - request_limit: `100`, request_count: `0`
    /// - ips / hwid: empty
    /// - max_ips: `None` (default capacity)
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            key: format!("KEY-{}", id),
            identifier: format!("tenant-{}", id),
            license_type: LicenseType::Basic,
            valid_until: Utc::now() + Duration::days(30),
            request_limit: 100,
            request_count: 0,
            ips: Vec::new(),
            max_ips: None,
            hwid: Vec::new(),
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    pub fn license_type(mut self, license_type: LicenseType) -> Self {
        self.license_type = license_type;
        self
    }

    pub fn valid_until(mut self, valid_until: DateTime<Utc>) -> Self {
        self.valid_until = valid_until;
        self
    }

    pub fn request_limit(mut self, request_limit: i64) -> Self {
        self.request_limit = request_limit;
        self
    }

    pub fn request_count(mut self, request_count: i64) -> Self {
        self.request_count = request_count;
        self
    }

    /// Sets the IP allow-list the licence starts with.
    pub fn ips<I, S>(mut self, ips: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ips = ips.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the IP capacity; `None` leaves it unset.
    pub fn max_ips(mut self, max_ips: Option<i32>) -> Self {
        self.max_ips = max_ips;
        self
    }

    pub fn hwid<I, S>(mut self, hwid: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hwid = hwid.into_iter().map(Into::into).collect();
        self
    }

    /// Builds and inserts the licence entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::license::Model)` - Created licence entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::license::Model, DbErr> {
        let now = Utc::now();
        entity::license::ActiveModel {
            key: ActiveValue::Set(self.key),
            identifier: ActiveValue::Set(self.identifier),
            license_type: ActiveValue::Set(self.license_type),
            valid_until: ActiveValue::Set(self.valid_until),
            request_limit: ActiveValue::Set(self.request_limit),
            request_count: ActiveValue::Set(self.request_count),
            ips: ActiveValue::Set(StringList(self.ips)),
            max_ips: ActiveValue::Set(self.max_ips),
            hwid: ActiveValue::Set(StringList(self.hwid)),
            version: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a licence with default values.
///
/// Shorthand for `LicenseFactory::new(db).build().await`.
pub async fn create_license(db: &DatabaseConnection) -> Result<entity::license::Model, DbErr> {
    LicenseFactory::new(db).build().await
}

/// Creates a licence that expired one day ago.
pub async fn create_expired_license(
    db: &DatabaseConnection,
) -> Result<entity::license::Model, DbErr> {
    LicenseFactory::new(db)
        .valid_until(Utc::now() - Duration::days(1))
        .build()
        .await
}
