//! SeaORM entities for the Nebura database.

pub mod prelude;

pub mod license;
