//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let license = factory::create_license(&db).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! use test_utils::factory::license::LicenseFactory;
//!
//! let license = LicenseFactory::new(&db)
//!     .key("KEY")
//!     .identifier("tenant")
//!     .request_limit(2)
//!     .max_ips(Some(1))
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `license` - Create licence entities
//! - `helpers` - Shared ID generation

pub mod helpers;
pub mod license;

pub use license::{create_expired_license, create_license};
