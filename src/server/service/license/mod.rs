//! Licence service for business logic.
//!
//! This module provides the `LicenseService` for administrative licence management and
//! hosts the consumption guard (`guard`) with its storage seam (`store`). The service
//! works with domain models rather than DTOs.

pub mod guard;
pub mod store;

use sea_orm::{DatabaseConnection, DbErr, SqlErr};

use crate::server::{
    data::license::LicenseRepository,
    error::{license::LicenseError, validation::ValidationError, AppError},
    model::license::{
        CreateLicenseParams, GetLicensesParam, License, PaginatedLicenses, UpdateLicenseParams,
    },
    service::license::store::LicenseStore,
    util::key::generate_license_key,
};

/// Largest page size served by the licence listing; bigger requests are clamped.
pub const MAX_PER_PAGE: u64 = 100;

/// Service providing business logic for licence management.
pub struct LicenseService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LicenseService<'a> {
    /// Creates a new LicenseService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a licence, generating a key when none is supplied.
    ///
    /// # Returns
    /// - `Ok(License)` - The created licence
    /// - `Err(AppError::Conflict)` - A licence with the same `(key, identifier)` exists
    /// - `Err(AppError::DbErr)` - Database error during insert
    pub async fn create(&self, params: CreateLicenseParams) -> Result<License, AppError> {
        let repo = LicenseRepository::new(self.db);
        let key = params.key.clone().unwrap_or_else(generate_license_key);

        if repo.exists(&key, &params.identifier).await? {
            return Err(duplicate_license(&key, &params.identifier));
        }

        let identifier = params.identifier.clone();
        match repo.create(key.clone(), params).await {
            Ok(license) => Ok(license),
            // Lost a race with another insert of the same pair
            Err(e) if is_unique_violation(&e) => Err(duplicate_license(&key, &identifier)),
            Err(e) => Err(e.into()),
        }
    }

    /// Retrieves a licence by ID.
    ///
    /// # Returns
    /// - `Ok(License)` - Licence found
    /// - `Err(AppError::NotFound)` - No licence with that ID
    pub async fn get(&self, id: i32) -> Result<License, AppError> {
        LicenseRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| license_not_found(id))
    }

    /// Looks up a licence by key and identifier without consuming a request.
    pub async fn find_by_key(
        &self,
        key: &str,
        identifier: &str,
    ) -> Result<Option<License>, AppError> {
        let license = LicenseRepository::new(self.db)
            .find_by_key(key, identifier)
            .await?;
        Ok(license)
    }

    /// Retrieves licences with pagination.
    ///
    /// # Returns
    /// - `Ok(PaginatedLicenses)` - Licences for the requested page with pagination metadata
    /// - `Err(AppError::ValidationErr)` - Page offset beyond what the database can address
    /// - `Err(AppError::DbErr)` - Database error during pagination query
    pub async fn get_all(&self, param: GetLicensesParam) -> Result<PaginatedLicenses, AppError> {
        let per_page = param.per_page.clamp(1, MAX_PER_PAGE);

        // SQLite offsets are signed 64-bit
        let max_page = i64::MAX as u64 / per_page;
        if param.page > max_page {
            return Err(ValidationError::TooLarge {
                field: "page",
                max: max_page,
            }
            .into());
        }

        let (licenses, total) = LicenseRepository::new(self.db)
            .get_paginated(param.page, per_page, param.identifier.as_deref())
            .await?;

        Ok(PaginatedLicenses {
            licenses,
            total,
            page: param.page,
            per_page,
            total_pages: total.div_ceil(per_page),
        })
    }

    /// Replaces the mutable fields of a licence.
    ///
    /// # Returns
    /// - `Ok(License)` - The updated licence
    /// - `Err(AppError::NotFound)` - No licence with that ID
    /// - `Err(AppError::Conflict)` - New IP capacity is below the recorded IPs and usage is kept
    /// - `Err(AppError::LicenseErr(Contended))` - The licence changed while being updated
    pub async fn update(&self, id: i32, params: UpdateLicenseParams) -> Result<License, AppError> {
        let repo = LicenseRepository::new(self.db);

        let mut license = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| license_not_found(id))?;

        license.license_type = params.license_type;
        license.valid_until = params.valid_until;
        license.request_limit = params.request_limit;
        license.max_ips = params.max_ips;
        license.hwid = params.hwid;
        if params.reset_usage {
            license.request_count = 0;
            license.ips.clear();
        }

        let capacity = usize::try_from(license.effective_max_ips()).unwrap_or(0);
        if license.ips.len() > capacity {
            return Err(AppError::Conflict(format!(
                "License {} already has {} recorded IPs, more than the requested limit of {}; \
                 raise maxIps or set resetUsage",
                id,
                license.ips.len(),
                capacity
            )));
        }

        repo.save(license)
            .await?
            .ok_or_else(|| LicenseError::Contended.into())
    }

    /// Deletes a licence.
    ///
    /// # Returns
    /// - `Ok(())` - Licence deleted
    /// - `Err(AppError::NotFound)` - No licence with that ID
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !LicenseRepository::new(self.db).delete(id).await? {
            return Err(license_not_found(id));
        }
        Ok(())
    }
}

fn license_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("License {} not found", id))
}

fn duplicate_license(key: &str, identifier: &str) -> AppError {
    AppError::Conflict(format!(
        "License with key '{}' already exists for identifier '{}'",
        key, identifier
    ))
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
