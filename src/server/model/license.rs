//! Licence domain models and parameters.
//!
//! Provides the domain model for licence records along with the parameter types used
//! by the consumption guard and the administrative licence operations. Parameter
//! constructors perform input validation so the service layer only sees clean values.

use chrono::{DateTime, Utc};
use entity::license::LicenseType;

use crate::{
    model::license::{
        CreateLicenseDto, LicenseDto, LicenseSnapshotDto, LicenseStatusDto, LicenseTypeDto,
        PaginatedLicensesDto, UpdateLicenseDto,
    },
    server::{
        error::validation::ValidationError,
        util::validate::{normalize_hwid, parse_ip, require_min, require_text},
    },
};

/// IP capacity applied when a licence has no explicit `max_ips`.
pub const DEFAULT_MAX_IPS: i32 = 5;

/// Licence record with its limits and consumption state.
#[derive(Debug, Clone, PartialEq)]
pub struct License {
    pub id: i32,
    pub key: String,
    pub identifier: String,
    pub license_type: LicenseType,
    pub valid_until: DateTime<Utc>,
    pub request_limit: i64,
    pub request_count: i64,
    /// Addresses that have used the licence, in first-seen order.
    pub ips: Vec<String>,
    /// Stored capacity; `None` falls back to [`DEFAULT_MAX_IPS`].
    pub max_ips: Option<i32>,
    pub hwid: Vec<String>,
    /// Version read from storage, used to detect concurrent writes on save.
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Derived state of a licence at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseStatus {
    Active,
    Expired,
    /// Every allowed request has been consumed.
    Exhausted,
}

impl License {
    /// Converts an entity model to a licence domain model at the repository boundary.
    pub fn from_entity(entity: entity::license::Model) -> Self {
        Self {
            id: entity.id,
            key: entity.key,
            identifier: entity.identifier,
            license_type: entity.license_type,
            valid_until: entity.valid_until,
            request_limit: entity.request_limit,
            request_count: entity.request_count,
            ips: entity.ips.0,
            max_ips: entity.max_ips,
            hwid: entity.hwid.0,
            version: entity.version,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn effective_max_ips(&self) -> i32 {
        self.max_ips.unwrap_or(DEFAULT_MAX_IPS)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.valid_until < now
    }

    pub fn is_exhausted(&self) -> bool {
        self.request_count >= self.request_limit
    }

    /// Expiry takes precedence over exhaustion, matching the order of the guard's checks.
    pub fn status(&self, now: DateTime<Utc>) -> LicenseStatus {
        if self.is_expired(now) {
            LicenseStatus::Expired
        } else if self.is_exhausted() {
            LicenseStatus::Exhausted
        } else {
            LicenseStatus::Active
        }
    }

    pub fn snapshot(&self) -> LicenseSnapshot {
        LicenseSnapshot {
            key: self.key.clone(),
            identifier: self.identifier.clone(),
            license_type: self.license_type.clone(),
            valid_until: self.valid_until,
            request_count: self.request_count,
            request_limit: self.request_limit,
            ips: self.ips.clone(),
            max_ips: self.effective_max_ips(),
        }
    }

    /// Converts the licence to the administrative DTO, deriving its status at `now`.
    pub fn into_dto(self, now: DateTime<Utc>) -> LicenseDto {
        let status = self.status(now).into();
        let effective_max_ips = self.effective_max_ips();

        LicenseDto {
            id: self.id,
            key: self.key,
            identifier: self.identifier,
            license_type: self.license_type.into(),
            status,
            valid_until: self.valid_until,
            request_count: self.request_count,
            request_limit: self.request_limit,
            ips: self.ips,
            max_ips: self.max_ips,
            effective_max_ips,
            hwid: self.hwid,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Public fields of a licence returned after a successful consumption.
#[derive(Debug, Clone, PartialEq)]
pub struct LicenseSnapshot {
    pub key: String,
    pub identifier: String,
    pub license_type: LicenseType,
    pub valid_until: DateTime<Utc>,
    pub request_count: i64,
    pub request_limit: i64,
    pub ips: Vec<String>,
    /// Effective capacity, never unset.
    pub max_ips: i32,
}

impl LicenseSnapshot {
    pub fn into_dto(self) -> LicenseSnapshotDto {
        LicenseSnapshotDto {
            key: self.key,
            identifier: self.identifier,
            license_type: self.license_type.into(),
            valid_until: self.valid_until,
            request_count: self.request_count,
            request_limit: self.request_limit,
            ips: self.ips,
            max_ips: self.max_ips,
        }
    }
}

/// Validated input of a licence consumption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumeLicenseParams {
    pub key: String,
    pub identifier: String,
    /// Canonical textual form of the caller's address.
    pub ip: String,
}

impl ConsumeLicenseParams {
    /// Validates raw consumption input.
    ///
    /// # Returns
    /// - `Ok(ConsumeLicenseParams)` - Trimmed key and identifier plus canonical IP
    /// - `Err(ValidationError)` - Empty or oversized key/identifier, or unparsable IP
    pub fn new(key: &str, identifier: &str, ip: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            key: require_text("key", key)?,
            identifier: require_text("identifier", identifier)?,
            ip: parse_ip(ip)?,
        })
    }
}

/// Parameters for creating a licence.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateLicenseParams {
    /// A random key is generated when `None`.
    pub key: Option<String>,
    pub identifier: String,
    pub license_type: LicenseType,
    pub valid_until: DateTime<Utc>,
    pub request_limit: i64,
    pub max_ips: Option<i32>,
    pub hwid: Vec<String>,
}

impl TryFrom<CreateLicenseDto> for CreateLicenseParams {
    type Error = ValidationError;

    fn try_from(dto: CreateLicenseDto) -> Result<Self, Self::Error> {
        let key = match dto.key {
            Some(key) => Some(require_text("key", &key)?),
            None => None,
        };

        Ok(Self {
            key,
            identifier: require_text("identifier", &dto.identifier)?,
            license_type: dto.license_type.into(),
            valid_until: dto.valid_until,
            request_limit: require_min("requestLimit", dto.request_limit, 0)?,
            max_ips: validate_max_ips(dto.max_ips)?,
            hwid: normalize_hwid(dto.hwid)?,
        })
    }
}

/// Parameters for replacing the mutable fields of a licence.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateLicenseParams {
    pub license_type: LicenseType,
    pub valid_until: DateTime<Utc>,
    pub request_limit: i64,
    pub max_ips: Option<i32>,
    pub hwid: Vec<String>,
    /// Clears `request_count` and `ips` when set.
    pub reset_usage: bool,
}

impl TryFrom<UpdateLicenseDto> for UpdateLicenseParams {
    type Error = ValidationError;

    fn try_from(dto: UpdateLicenseDto) -> Result<Self, Self::Error> {
        Ok(Self {
            license_type: dto.license_type.into(),
            valid_until: dto.valid_until,
            request_limit: require_min("requestLimit", dto.request_limit, 0)?,
            max_ips: validate_max_ips(dto.max_ips)?,
            hwid: normalize_hwid(dto.hwid)?,
            reset_usage: dto.reset_usage,
        })
    }
}

fn validate_max_ips(max_ips: Option<i32>) -> Result<Option<i32>, ValidationError> {
    max_ips
        .map(|value| require_min("maxIps", value.into(), 1).map(|_| value))
        .transpose()
}

/// Parameters for paginated licence queries.
#[derive(Debug, Clone)]
pub struct GetLicensesParam {
    /// Zero-indexed page number.
    pub page: u64,
    pub per_page: u64,
    pub identifier: Option<String>,
}

/// Paginated collection of licences with metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedLicenses {
    pub licenses: Vec<License>,
    /// Total number of licences across all pages.
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedLicenses {
    pub fn into_dto(self, now: DateTime<Utc>) -> PaginatedLicensesDto {
        PaginatedLicensesDto {
            licenses: self
                .licenses
                .into_iter()
                .map(|license| license.into_dto(now))
                .collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

impl From<LicenseTypeDto> for LicenseType {
    fn from(dto: LicenseTypeDto) -> Self {
        match dto {
            LicenseTypeDto::Basic => Self::Basic,
            LicenseTypeDto::Premium => Self::Premium,
            LicenseTypeDto::Enterprise => Self::Enterprise,
        }
    }
}

impl From<LicenseType> for LicenseTypeDto {
    fn from(license_type: LicenseType) -> Self {
        match license_type {
            LicenseType::Basic => Self::Basic,
            LicenseType::Premium => Self::Premium,
            LicenseType::Enterprise => Self::Enterprise,
        }
    }
}

impl From<LicenseStatus> for LicenseStatusDto {
    fn from(status: LicenseStatus) -> Self {
        match status {
            LicenseStatus::Active => Self::Active,
            LicenseStatus::Expired => Self::Expired,
            LicenseStatus::Exhausted => Self::Exhausted,
        }
    }
}
