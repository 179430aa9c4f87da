//! API data transfer objects.
//!
//! Types in this module define the JSON shapes exchanged over HTTP. Server-side domain
//! models convert into these at the controller boundary.

pub mod api;
pub mod license;
