//! Licence consumption guard.
//!
//! Decides whether a request presenting a licence key may proceed and, when it may,
//! records the consumption. The checks run in a fixed order so callers see a stable
//! failure precedence when several limits are hit at once:
//!
//! 1. the licence exists (`NotFound`)
//! 2. it has not expired (`Expired`)
//! 3. it has requests left (`QuotaExceeded`)
//! 4. the caller's IP is known or fits in the allow-list (`IpCapacityExceeded`)
//!
//! An admitted call appends the IP when new, increments the request counter and saves
//! both in a single write. Rejected calls write nothing.
//!
//! The read and the write form an optimistic compare-and-swap on the record version.
//! Losing the race re-runs every check against fresh state, so two concurrent callers
//! can never both spend the last request or the last IP slot.

use chrono::{DateTime, Utc};

use crate::server::{
    clock::Clock,
    error::{license::LicenseError, AppError},
    model::license::{ConsumeLicenseParams, License, LicenseSnapshot},
    service::license::store::LicenseStore,
};

/// Number of read-check-write rounds before giving up with `LicenseError::Contended`.
pub const MAX_CONSUME_ATTEMPTS: usize = 5;

/// Validates and consumes licences against a store, using `clock` for expiry checks.
pub struct LicenseGuard<S, C> {
    store: S,
    clock: C,
}

impl<S, C> LicenseGuard<S, C>
where
    S: LicenseStore,
    C: Clock,
{
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// Validates the licence named by `params` and consumes one request from it.
    ///
    /// # Arguments
    /// - `params` - Validated key, identifier and caller IP
    ///
    /// # Returns
    /// - `Ok(LicenseSnapshot)` - Licence state after this call's consumption
    /// - `Err(AppError::LicenseErr(_))` - Licence rejected; stored state unchanged
    /// - `Err(AppError::DbErr(_))` - Store failure
    pub async fn validate_and_consume(
        &self,
        params: &ConsumeLicenseParams,
    ) -> Result<LicenseSnapshot, AppError> {
        for _ in 0..MAX_CONSUME_ATTEMPTS {
            let Some(mut license) = self.store.find(&params.key, &params.identifier).await? else {
                return Err(LicenseError::NotFound.into());
            };

            admit(&mut license, &params.ip, self.clock.now())?;

            if let Some(saved) = self.store.save(license).await? {
                return Ok(saved.snapshot());
            }
        }

        Err(LicenseError::Contended.into())
    }
}

/// Applies the expiry, quota and IP checks to `license` and records one consumption.
///
/// `license` is only modified when every check passes.
pub fn admit(license: &mut License, ip: &str, now: DateTime<Utc>) -> Result<(), LicenseError> {
    if license.is_expired(now) {
        return Err(LicenseError::Expired);
    }

    if license.is_exhausted() {
        return Err(LicenseError::QuotaExceeded);
    }

    if !license.ips.iter().any(|known| known == ip) {
        let capacity = usize::try_from(license.effective_max_ips()).unwrap_or(0);
        if license.ips.len() >= capacity {
            return Err(LicenseError::IpCapacityExceeded);
        }
        license.ips.push(ip.to_string());
    }

    license.request_count += 1;

    Ok(())
}
