//! HTTP server data structures.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::cache::ResponseCache;
use crate::config::Config;
use crate::enrich::EnrichmentResult;
use crate::error_handling::LookupStats;
use crate::ioc::IocKind;

/// Shared state for the lookup server.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<reqwest::Client>,
    pub cache: Arc<Mutex<ResponseCache>>,
    pub config: Arc<Config>,
    pub stats: Arc<LookupStats>,
    /// Present only when lookup logging is configured.
    pub pool: Option<Arc<SqlitePool>>,
    pub start_time: Arc<Instant>,
}

/// Query parameters accepted by `/api/lookup`.
#[derive(Debug, Deserialize)]
pub struct LookupParams {
    pub query: Option<String>,
    #[serde(rename = "type")]
    pub type_hint: Option<String>,
}

/// Canonical JSON body for a successful lookup.
///
/// This one shape replaces the diverging per-revision formats of the
/// original endpoint. The timestamp records when the enrichment was
/// assembled; cache hits re-serialize the stored response unchanged.
#[derive(Debug, Clone, Serialize)]
pub struct LookupResponse {
    pub status: &'static str,
    pub query: String,
    pub ioc_type: IocKind,
    pub data: EnrichmentResult,
    /// Epoch milliseconds at enrichment time
    pub timestamp: i64,
}

/// JSON body for 400/500 responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// JSON response for the `/status` endpoint.
#[derive(Serialize)]
pub struct StatusResponse {
    pub lookups: usize,
    pub cache_hits: usize,
    pub validation_failures: usize,
    pub internal_errors: usize,
    pub upstream_errors: UpstreamErrorCounts,
    pub cached_entries: usize,
    pub uptime_seconds: f64,
}

#[derive(Serialize)]
pub struct UpstreamErrorCounts {
    pub total: usize,
    pub timeout: usize,
    pub connect: usize,
    pub status: usize,
    pub decode: usize,
    pub request: usize,
    pub unsupported: usize,
    pub other: usize,
}
