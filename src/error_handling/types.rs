//! Error type definitions.
//!
//! This module defines the error taxonomy used throughout the service:
//! request-terminating errors, section-local upstream failure kinds, and
//! initialization/storage errors.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Errors that terminate a lookup request with a non-200 response.
///
/// Upstream failures are deliberately NOT represented here: a failing
/// enrichment source degrades its own section to a placeholder and the
/// request still succeeds. Only parameter validation and truly unexpected
/// conditions end a request early.
#[derive(Error, Debug)]
pub enum LookupError {
    /// Missing, malformed, or contradictory request parameters (HTTP 400).
    #[error("{0}")]
    Validation(String),

    /// Any unexpected internal failure (HTTP 500). The message is logged
    /// server-side; callers receive a generic body.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),
}

/// Kinds of failure an individual enrichment source can produce.
///
/// Each kind maps to a placeholder section in the response rather than a
/// top-level error, so placeholders stay distinguishable from real upstream
/// data in logs and counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum UpstreamErrorKind {
    /// The upstream call exceeded the per-call timeout.
    Timeout,
    /// TCP/TLS connection to the upstream failed.
    Connect,
    /// The upstream answered with a non-success HTTP status.
    Status,
    /// The upstream body was not valid JSON.
    Decode,
    /// The request could not be built or sent.
    Request,
    /// The upstream does not support this IOC kind (e.g. reputation
    /// lookups for domains).
    Unsupported,
    /// Anything else.
    Other,
}

impl std::fmt::Display for UpstreamErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl UpstreamErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpstreamErrorKind::Timeout => "upstream timeout",
            UpstreamErrorKind::Connect => "upstream connect error",
            UpstreamErrorKind::Status => "upstream status error",
            UpstreamErrorKind::Decode => "upstream decode error",
            UpstreamErrorKind::Request => "upstream request error",
            UpstreamErrorKind::Unsupported => "unsupported by upstream",
            UpstreamErrorKind::Other => "upstream other error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_upstream_error_kind_as_str() {
        assert_eq!(UpstreamErrorKind::Timeout.as_str(), "upstream timeout");
        assert_eq!(
            UpstreamErrorKind::Connect.as_str(),
            "upstream connect error"
        );
        assert_eq!(UpstreamErrorKind::Status.as_str(), "upstream status error");
    }

    #[test]
    fn test_all_upstream_error_kinds_have_string_representation() {
        for kind in UpstreamErrorKind::iter() {
            assert!(
                !kind.as_str().is_empty(),
                "{:?} should have non-empty string",
                kind
            );
        }
    }

    #[test]
    fn test_lookup_error_display() {
        let err = LookupError::Validation("Missing query parameter".to_string());
        assert_eq!(err.to_string(), "Missing query parameter");

        let err = LookupError::Internal("serialization failed".to_string());
        assert!(err.to_string().starts_with("internal error"));
    }
}
