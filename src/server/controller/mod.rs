pub mod admin;
pub mod license;
