//! Request handlers for the lookup server.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::error_handling::{LookupError, UpstreamErrorKind};
use crate::ioc::{Ioc, TypeHint};
use crate::storage::insert_ioc_log;

use super::types::{
    AppState, ErrorResponse, LookupParams, LookupResponse, StatusResponse, UpstreamErrorCounts,
};

/// Headers set on every response. The permissive CORS policy is part of the
/// endpoint's contract: the lookup form is served from a different origin.
const RESPONSE_HEADERS: [(&str, &str); 4] = [
    ("content-type", "application/json"),
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "GET"),
    ("access-control-allow-headers", "Content-Type"),
];

/// Serializes a body and writes it with the standard headers.
///
/// Serialization of our own response types cannot realistically fail, but a
/// failure still must not leak internals; it degrades to a generic 500.
fn respond<T: serde::Serialize>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_string(body) {
        Ok(json) => (status, RESPONSE_HEADERS, json).into_response(),
        Err(e) => {
            log::error!("Failed to serialize response body: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                RESPONSE_HEADERS,
                "{\"error\":\"Internal server error\"}".to_string(),
            )
                .into_response()
        }
    }
}

fn bad_request(state: &AppState, message: String) -> Response {
    state.stats.record_validation_failure();
    respond(StatusCode::BAD_REQUEST, &ErrorResponse { error: message })
}

/// `GET /api/lookup?query=<ioc>&type=<auto|ip|domain>`
///
/// Normalizes and classifies the query, answers from the response cache when
/// possible, otherwise enriches from the upstream sources, stores the result
/// in the cache, and (when configured) appends it to the lookup log.
pub async fn lookup_handler(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> Response {
    state.stats.record_lookup();

    let Some(raw_query) = params.query else {
        return bad_request(&state, "Missing query parameter".to_string());
    };

    let hint = match TypeHint::from_param(params.type_hint.as_deref()) {
        Ok(hint) => hint,
        Err(LookupError::Validation(message)) => return bad_request(&state, message),
        Err(LookupError::Internal(detail)) => return internal_error(&state, &detail),
    };

    let ioc = match Ioc::parse(&raw_query, hint) {
        Ok(ioc) => ioc,
        Err(LookupError::Validation(message)) => return bad_request(&state, message),
        Err(LookupError::Internal(detail)) => return internal_error(&state, &detail),
    };

    // Cache probe. The guard must not be held across the enrichment awaits.
    let cached = {
        let mut cache = lock_cache(&state);
        cache.get(&ioc.query)
    };
    if let Some(response) = cached {
        state.stats.record_cache_hit();
        log::debug!("cache hit for {}", ioc.query);
        return respond(StatusCode::OK, &response);
    }

    log::info!("enriching {} ({})", ioc.query, ioc.kind);
    let data = crate::enrich::enrich(&state.client, &state.config, &state.stats, &ioc).await;

    let response = LookupResponse {
        status: "success",
        query: ioc.query.clone(),
        ioc_type: ioc.kind,
        data,
        timestamp: Utc::now().timestamp_millis(),
    };

    {
        let mut cache = lock_cache(&state);
        cache.insert(&ioc.query, response.clone());
    }

    // Fire-and-forget: a logging failure must never fail the lookup.
    if let Some(pool) = state.pool.clone() {
        let query = ioc.query.clone();
        let kind = ioc.kind;
        let data = response.data.clone();
        tokio::spawn(async move {
            if let Err(e) = insert_ioc_log(&pool, &query, kind.as_str(), &data).await {
                log::warn!("Failed to log lookup for {query}: {e}");
            }
        });
    }

    respond(StatusCode::OK, &response)
}

/// `GET /status` - JSON counters for monitoring.
pub async fn status_handler(State(state): State<AppState>) -> Response {
    let stats = &state.stats;
    let cached_entries = lock_cache(&state).len();

    let response = StatusResponse {
        lookups: stats.lookups(),
        cache_hits: stats.cache_hits(),
        validation_failures: stats.validation_failures(),
        internal_errors: stats.internal_errors(),
        upstream_errors: UpstreamErrorCounts {
            total: stats.total_upstream_errors(),
            timeout: stats.upstream_error_count(UpstreamErrorKind::Timeout),
            connect: stats.upstream_error_count(UpstreamErrorKind::Connect),
            status: stats.upstream_error_count(UpstreamErrorKind::Status),
            decode: stats.upstream_error_count(UpstreamErrorKind::Decode),
            request: stats.upstream_error_count(UpstreamErrorKind::Request),
            unsupported: stats.upstream_error_count(UpstreamErrorKind::Unsupported),
            other: stats.upstream_error_count(UpstreamErrorKind::Other),
        },
        cached_entries,
        uptime_seconds: state.start_time.elapsed().as_secs_f64(),
    };

    respond(StatusCode::OK, &response)
}

fn internal_error(state: &AppState, detail: &str) -> Response {
    state.stats.record_internal_error();
    // Detail goes to the log only; the body stays generic.
    log::error!("Internal error while handling lookup: {detail}");
    respond(
        StatusCode::INTERNAL_SERVER_ERROR,
        &ErrorResponse {
            error: "Internal server error".to_string(),
        },
    )
}

fn lock_cache(state: &AppState) -> std::sync::MutexGuard<'_, crate::cache::ResponseCache> {
    // A poisoned mutex only means another handler panicked mid-update; the
    // cache contents are still usable.
    state
        .cache
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
