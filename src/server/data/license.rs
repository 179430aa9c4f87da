//! Licence data repository for database operations.
//!
//! This module provides the `LicenseRepository` for managing licence records in the
//! database. Besides the administrative CRUD operations it implements `LicenseStore`,
//! whose `save` is an optimistic compare-and-swap on the record's version column.

use async_trait::async_trait;
use chrono::Utc;
use entity::license::StringList;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    model::license::{CreateLicenseParams, License},
    service::license::store::LicenseStore,
};

/// Repository providing database operations for licence management.
pub struct LicenseRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LicenseRepository<'a> {
    /// Creates a new LicenseRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new licence with a zeroed request counter and an empty IP list.
    ///
    /// # Arguments
    /// - `key` - Resolved licence key
    /// - `params` - Remaining licence fields; `params.key` is ignored
    ///
    /// # Returns
    /// - `Ok(License)` - The created licence
    /// - `Err(DbErr)` - Database error, including unique violations on `(key, identifier)`
    pub async fn create(&self, key: String, params: CreateLicenseParams) -> Result<License, DbErr> {
        let now = Utc::now();

        let entity = entity::license::ActiveModel {
            key: ActiveValue::Set(key),
            identifier: ActiveValue::Set(params.identifier),
            license_type: ActiveValue::Set(params.license_type),
            valid_until: ActiveValue::Set(params.valid_until),
            request_limit: ActiveValue::Set(params.request_limit),
            request_count: ActiveValue::Set(0),
            ips: ActiveValue::Set(StringList::default()),
            max_ips: ActiveValue::Set(params.max_ips),
            hwid: ActiveValue::Set(StringList(params.hwid)),
            version: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(License::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<License>, DbErr> {
        let entity = entity::prelude::License::find_by_id(id).one(self.db).await?;

        Ok(entity.map(License::from_entity))
    }

    /// Looks up a licence by its `(key, identifier)` pair.
    ///
    /// # Returns
    /// - `Ok(Some(License))` - Licence found
    /// - `Ok(None)` - No licence with that pair
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_key(&self, key: &str, identifier: &str) -> Result<Option<License>, DbErr> {
        let entity = entity::prelude::License::find()
            .filter(entity::license::Column::Key.eq(key))
            .filter(entity::license::Column::Identifier.eq(identifier))
            .one(self.db)
            .await?;

        Ok(entity.map(License::from_entity))
    }

    /// Checks whether a licence with the `(key, identifier)` pair exists.
    pub async fn exists(&self, key: &str, identifier: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::License::find()
            .filter(entity::license::Column::Key.eq(key))
            .filter(entity::license::Column::Identifier.eq(identifier))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets licences with pagination, newest first.
    ///
    /// # Arguments
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Number of licences per page
    /// - `identifier` - Restrict results to one identifier when given
    ///
    /// # Returns
    /// - `Ok((licenses, total))` - Licences for the requested page and total matching count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_paginated(
        &self,
        page: u64,
        per_page: u64,
        identifier: Option<&str>,
    ) -> Result<(Vec<License>, u64), DbErr> {
        let mut query = entity::prelude::License::find();
        if let Some(identifier) = identifier {
            query = query.filter(entity::license::Column::Identifier.eq(identifier));
        }

        let paginator = query
            .order_by_desc(entity::license::Column::CreatedAt)
            .order_by_desc(entity::license::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;
        let licenses = entities.into_iter().map(License::from_entity).collect();

        Ok((licenses, total))
    }

    /// Deletes a licence.
    ///
    /// # Returns
    /// - `Ok(true)` - A licence was deleted
    /// - `Ok(false)` - No licence with that ID existed
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::License::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

#[async_trait]
impl LicenseStore for LicenseRepository<'_> {
    async fn find(&self, key: &str, identifier: &str) -> Result<Option<License>, DbErr> {
        self.find_by_key(key, identifier).await
    }

    async fn save(&self, license: License) -> Result<Option<License>, DbErr> {
        let now = Utc::now();
        let next_version = license.version + 1;

        let result = entity::prelude::License::update_many()
            .col_expr(
                entity::license::Column::LicenseType,
                Expr::value(license.license_type.clone()),
            )
            .col_expr(
                entity::license::Column::ValidUntil,
                Expr::value(license.valid_until),
            )
            .col_expr(
                entity::license::Column::RequestLimit,
                Expr::value(license.request_limit),
            )
            .col_expr(
                entity::license::Column::RequestCount,
                Expr::value(license.request_count),
            )
            .col_expr(
                entity::license::Column::Ips,
                Expr::value(StringList(license.ips.clone())),
            )
            .col_expr(entity::license::Column::MaxIps, Expr::value(license.max_ips))
            .col_expr(
                entity::license::Column::Hwid,
                Expr::value(StringList(license.hwid.clone())),
            )
            .col_expr(entity::license::Column::Version, Expr::value(next_version))
            .col_expr(entity::license::Column::UpdatedAt, Expr::value(now))
            .filter(entity::license::Column::Id.eq(license.id))
            .filter(entity::license::Column::Version.eq(license.version))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        Ok(Some(License {
            version: next_version,
            updated_at: now,
            ..license
        }))
    }
}
