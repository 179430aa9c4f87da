//! Per-client rate limiting for the public validation endpoint.
//!
//! Requests are keyed by the TCP peer address, or by the forwarded client address when
//! the service runs behind a trusted proxy. Exceeding the limit yields 429 before the
//! handler runs, so throttled calls never consume a licence request.

use std::{sync::Arc, time::Duration};

use governor::{clock::QuantaInstant, middleware::NoOpMiddleware};
use tower_governor::{governor::GovernorConfigBuilder, key_extractor::KeyExtractor, GovernorLayer};

use crate::server::error::config::ConfigError;

/// Rate limiter layer keyed by `K`.
pub type RateLimitLayer<K> = GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a layer allowing `requests_per_minute` calls per client, refilled evenly.
///
/// # Returns
/// - `Ok(RateLimitLayer)` - Configured layer
/// - `Err(ConfigError::InvalidRateLimit)` - Zero or otherwise unusable limit
pub fn layer<K>(requests_per_minute: u32, key_extractor: K) -> Result<RateLimitLayer<K>, ConfigError>
where
    K: KeyExtractor,
{
    if requests_per_minute == 0 {
        return Err(ConfigError::InvalidRateLimit(requests_per_minute));
    }

    let config = GovernorConfigBuilder::default()
        .key_extractor(key_extractor)
        .period(refill_period(requests_per_minute))
        .burst_size(requests_per_minute)
        .finish()
        .ok_or(ConfigError::InvalidRateLimit(requests_per_minute))?;

    Ok(GovernorLayer::new(Arc::new(config)))
}

/// Interval after which one more request is allowed, spread evenly over a minute.
fn refill_period(requests_per_minute: u32) -> Duration {
    Duration::from_millis((60_000 / u64::from(requests_per_minute)).max(1))
}
