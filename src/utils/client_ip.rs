//! Client identity resolution for admission control.

use axum::http::HeaderMap;
use std::net::SocketAddr;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Key used when no identity source is available.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Resolves the rate limiting key for a request.
///
/// Priority, first present wins:
/// 1. `X-Forwarded-For` (first hop of the comma-separated chain)
/// 2. `X-Real-IP`
/// 3. Peer socket IP (port stripped)
///
/// Headers that are empty or not valid UTF-8 are skipped.
pub fn resolve_client_key(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let forwarded = header_str(headers, X_FORWARDED_FOR)
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    if let Some(ip) = forwarded.or_else(|| header_str(headers, X_REAL_IP)) {
        return ip.to_string();
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
