use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LicenseTypeDto {
    Basic,
    Premium,
    Enterprise,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LicenseStatusDto {
    Active,
    Expired,
    Exhausted,
}

/// Query string of `GET /validate-licence`.
///
/// Both fields default to empty so that missing values are reported by input
/// validation rather than by the query extractor.
#[derive(Deserialize, Debug, Clone, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ValidateLicenceQuery {
    /// Licence key
    #[serde(default)]
    pub key: String,
    /// Partition the key belongs to
    #[serde(default)]
    pub identifier: String,
}

/// Public view of a licence after a successful validation.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LicenseSnapshotDto {
    pub key: String,
    pub identifier: String,
    #[serde(rename = "type")]
    pub license_type: LicenseTypeDto,
    pub valid_until: DateTime<Utc>,
    pub request_count: i64,
    pub request_limit: i64,
    pub ips: Vec<String>,
    pub max_ips: i32,
}

/// Full licence record as seen by administrators.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LicenseDto {
    pub id: i32,
    pub key: String,
    pub identifier: String,
    #[serde(rename = "type")]
    pub license_type: LicenseTypeDto,
    pub status: LicenseStatusDto,
    pub valid_until: DateTime<Utc>,
    pub request_count: i64,
    pub request_limit: i64,
    pub ips: Vec<String>,
    /// Stored capacity, `null` when the default applies
    pub max_ips: Option<i32>,
    pub effective_max_ips: i32,
    pub hwid: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedLicensesDto {
    pub licenses: Vec<LicenseDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLicenseDto {
    /// Generated when omitted
    #[serde(default)]
    pub key: Option<String>,
    pub identifier: String,
    #[serde(rename = "type")]
    pub license_type: LicenseTypeDto,
    pub valid_until: DateTime<Utc>,
    pub request_limit: i64,
    #[serde(default)]
    pub max_ips: Option<i32>,
    #[serde(default)]
    pub hwid: Vec<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLicenseDto {
    #[serde(rename = "type")]
    pub license_type: LicenseTypeDto,
    pub valid_until: DateTime<Utc>,
    pub request_limit: i64,
    #[serde(default)]
    pub max_ips: Option<i32>,
    #[serde(default)]
    pub hwid: Vec<String>,
    /// Clears the request counter and the IP allow-list
    #[serde(default)]
    pub reset_usage: bool,
}

#[derive(Deserialize, Debug, Clone, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LicenseListQuery {
    /// Page number (default: 0)
    #[serde(default)]
    pub page: u64,
    /// Items per page (default: 10, at most 100)
    #[serde(default = "default_entries")]
    pub entries: u64,
    /// Only list licences of this identifier
    #[serde(default)]
    pub identifier: Option<String>,
}

fn default_entries() -> u64 {
    10
}
