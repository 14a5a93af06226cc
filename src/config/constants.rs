//! Configuration constants.
//!
//! This module defines all configuration constants used throughout the
//! service, including timeouts, limits, and default upstream endpoints.

use std::time::Duration;

/// Per-upstream-call timeout in seconds.
/// Each enrichment source blocks up to this long; calls run sequentially,
/// so worst-case request latency is additive across the three sources.
pub const UPSTREAM_TIMEOUT_SECS: u64 = 5;

/// Response cache time-to-live.
/// An entry is served for identical queries until this window elapses;
/// expired entries are dropped lazily on the next read.
pub const CACHE_TTL: Duration = Duration::from_secs(300);
pub const CACHE_TTL_SECS: u64 = 300;

/// Maximum accepted query length in characters.
/// Matches common URL length limits; longer inputs are rejected with a 400
/// before any normalization work.
pub const MAX_QUERY_LENGTH: usize = 2048;

// Default upstream base URLs. All of these can be overridden per-instance,
// which is also how the test suite points the service at a mock server.
/// Geolocation provider (path shape: `/json/<query>`).
pub const GEO_API_BASE: &str = "http://ip-api.com";
/// Threat reputation provider (path shape: `/api/v2/check`).
pub const THREAT_API_BASE: &str = "https://api.abuseipdb.com";
/// WHOIS provider for IP addresses (RIPEstat data API).
pub const WHOIS_IP_API_BASE: &str = "https://stat.ripe.net";
/// WHOIS provider for domain names.
pub const WHOIS_DOMAIN_API_BASE: &str = "https://api.api-ninjas.com";

/// Reputation report age window passed to the threat provider.
pub const THREAT_MAX_AGE_DAYS: u32 = 90;

/// Default bind address and port for the HTTP server.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

/// User-Agent header sent on upstream calls.
pub const DEFAULT_USER_AGENT: &str = concat!("ioc_enrich/", env!("CARGO_PKG_VERSION"));
