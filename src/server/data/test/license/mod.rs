use crate::server::{
    data::license::LicenseRepository,
    model::license::{CreateLicenseParams, License},
    service::license::store::LicenseStore,
};
use chrono::{Duration, Utc};
use entity::license::LicenseType;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod get_paginated;
mod save;
