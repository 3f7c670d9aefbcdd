// Forwarded-header resolution for a configurable number of trusted proxy hops

use axum::http::HeaderMap;
use std::net::SocketAddr;

pub const X_FORWARDED_FOR: &str = "x-forwarded-for";
pub const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
pub const X_FORWARDED_HOST: &str = "x-forwarded-host";
pub const X_FORWARDED_PREFIX: &str = "x-forwarded-prefix";

/// What the trusted proxies claim about the original request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardedInfo {
    /// Forwarded client address, else the socket peer.
    pub client_ip: Option<String>,
    pub scheme: Option<String>,
    pub host: Option<String>,
    /// Path prefix the proxy mounted us under, without a trailing slash.
    pub prefix: String,
}

impl ForwardedInfo {
    pub fn from_headers(headers: &HeaderMap, peer: Option<SocketAddr>, trusted_hops: usize) -> Self {
        let client_ip = trusted_value(headers, X_FORWARDED_FOR, trusted_hops)
            .or_else(|| peer.map(|p| p.ip().to_string()));
        let prefix = trusted_value(headers, X_FORWARDED_PREFIX, trusted_hops)
            .map(|p| p.trim_end_matches('/').to_string())
            .unwrap_or_default();
        Self {
            client_ip,
            scheme: trusted_value(headers, X_FORWARDED_PROTO, trusted_hops),
            host: trusted_value(headers, X_FORWARDED_HOST, trusted_hops),
            prefix,
        }
    }
}

/// Value appended by the outermost trusted hop: `trusted_hops` entries from the right.
/// Headers with fewer entries than trusted hops are ignored entirely.
pub fn trusted_value(headers: &HeaderMap, name: &str, trusted_hops: usize) -> Option<String> {
    if trusted_hops == 0 {
        return None;
    }
    let values: Vec<&str> = headers
        .get_all(name)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .collect();
    if values.len() < trusted_hops {
        return None;
    }
    let v = values[values.len() - trusted_hops];
    if v.is_empty() { None } else { Some(v.to_string()) }
}
