//! Error handling and lookup statistics.
//!
//! This module provides:
//! - Error type definitions and categorization
//! - Lookup statistics tracking (served lookups, cache hits, upstream errors)
//!
//! The taxonomy separates request-terminating errors (`LookupError`) from
//! section-local upstream failures (`UpstreamErrorKind`): the former produce
//! a non-200 response, the latter only degrade one enrichment section to a
//! placeholder.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub use stats::LookupStats;
pub use types::{DatabaseError, InitializationError, LookupError, UpstreamErrorKind};
