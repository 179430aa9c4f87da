//! Small helpers shared by controllers and services.

pub mod ip;
pub mod key;
pub mod validate;
