//! License entity - stores licence keys, their limits and consumption state

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Tier of a licence. Informational only, limits are stored per record.
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum LicenseType {
    #[sea_orm(string_value = "basic")]
    Basic,
    #[sea_orm(string_value = "premium")]
    Premium,
    #[sea_orm(string_value = "enterprise")]
    Enterprise,
}

/// Ordered list of strings persisted as a JSON array.
///
/// Used for the IP allow-list and the hardware ID list of a licence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct StringList(pub Vec<String>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "license")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub key: String,
    pub identifier: String,
    pub license_type: LicenseType,
    pub valid_until: DateTimeUtc,
    pub request_limit: i64,
    pub request_count: i64,
    pub ips: StringList,
    /// `None` means the default capacity applies.
    pub max_ips: Option<i32>,
    pub hwid: StringList,
    /// Optimistic concurrency counter, bumped on every write.
    pub version: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
