//! Error categorization for upstream HTTP calls.

use super::types::UpstreamErrorKind;

/// Categorizes a `reqwest::Error` into an `UpstreamErrorKind`.
///
/// This is the unified categorization logic used by every enrichment fetcher
/// so placeholder sections and stats counters stay consistent.
///
/// # Arguments
///
/// * `error` - The `reqwest::Error` to categorize
///
/// # Returns
///
/// The appropriate `UpstreamErrorKind` for the error.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> UpstreamErrorKind {
    // A status error carries the upstream's HTTP status; check it first so
    // e.g. a 504 from the provider counts as a status error, not a timeout.
    if error.status().is_some() || error.is_status() {
        UpstreamErrorKind::Status
    } else if error.is_timeout() {
        UpstreamErrorKind::Timeout
    } else if error.is_connect() {
        UpstreamErrorKind::Connect
    } else if error.is_decode() {
        UpstreamErrorKind::Decode
    } else if error.is_builder() || error.is_request() {
        UpstreamErrorKind::Request
    } else {
        UpstreamErrorKind::Other
    }
}

// Note: Exercising categorize_reqwest_error against real reqwest::Error
// instances requires a live server; see tests/lookup_integration.rs where
// connect failures are driven through the full handler.
