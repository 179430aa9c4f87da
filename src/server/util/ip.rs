//! Client address resolution.

use axum::http::HeaderMap;
use std::net::IpAddr;

const FORWARDED_FOR: &str = "x-forwarded-for";

/// Resolves the address a request should be attributed to.
///
/// Uses the TCP peer unless `trust_proxy` is set, in which case the first parsable
/// entry of `X-Forwarded-For` wins. Falls back to the peer when the header is absent
/// or holds no valid address.
///
/// # Arguments
/// - `headers` - Request headers
/// - `peer` - Address of the TCP peer
/// - `trust_proxy` - Whether the service runs behind a reverse proxy that sets the header
pub fn client_ip(headers: &HeaderMap, peer: IpAddr, trust_proxy: bool) -> IpAddr {
    if trust_proxy {
        let forwarded = headers
            .get(FORWARDED_FOR)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| {
                value
                    .split(',')
                    .find_map(|entry| entry.trim().parse::<IpAddr>().ok())
            });

        if let Some(ip) = forwarded {
            return ip.to_canonical();
        }
    }

    peer.to_canonical()
}
