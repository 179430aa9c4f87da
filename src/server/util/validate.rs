//! Input validation helpers.
//!
//! Each helper returns the cleaned value on success so callers can build parameter
//! structs directly from the results.

use std::net::IpAddr;

use crate::server::error::validation::ValidationError;

/// Maximum length of keys, identifiers and hardware IDs.
pub const MAX_FIELD_LENGTH: usize = 255;

/// Trims `value` and checks it is non-empty and at most [`MAX_FIELD_LENGTH`] characters.
pub fn require_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if value.chars().count() > MAX_FIELD_LENGTH {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_FIELD_LENGTH,
        });
    }

    Ok(value.to_string())
}

/// Parses an IP address and returns its canonical textual form.
///
/// IPv4-mapped IPv6 addresses are reduced to plain IPv4 so the same client is never
/// recorded twice under different spellings.
pub fn parse_ip(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field: "ip" });
    }

    trimmed
        .parse::<IpAddr>()
        .map(|ip| ip.to_canonical().to_string())
        .map_err(|_| ValidationError::InvalidIp {
            value: trimmed.to_string(),
        })
}

pub fn require_min(field: &'static str, value: i64, min: i64) -> Result<i64, ValidationError> {
    if value < min {
        return Err(ValidationError::OutOfRange { field, min });
    }
    Ok(value)
}

/// Validates hardware IDs and drops duplicates, keeping first-seen order.
pub fn normalize_hwid(values: Vec<String>) -> Result<Vec<String>, ValidationError> {
    let mut hwid: Vec<String> = Vec::with_capacity(values.len());

    for value in values {
        let value = require_text("hwid", &value)?;
        if !hwid.contains(&value) {
            hwid.push(value);
        }
    }

    Ok(hwid)
}
