//! Lookup statistics tracking.
//!
//! Thread-safe counters for served lookups, cache hits, validation failures,
//! and per-kind upstream errors. Feeds the `/status` endpoint.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::UpstreamErrorKind;

/// Thread-safe lookup statistics tracker.
///
/// All counters are atomic so the tracker can be shared across request
/// handlers with `Arc`. Every upstream error kind is initialized to zero on
/// creation.
pub struct LookupStats {
    lookups: AtomicUsize,
    cache_hits: AtomicUsize,
    validation_failures: AtomicUsize,
    internal_errors: AtomicUsize,
    upstream_errors: HashMap<UpstreamErrorKind, AtomicUsize>,
}

impl LookupStats {
    pub fn new() -> Self {
        let mut upstream_errors = HashMap::new();
        for kind in UpstreamErrorKind::iter() {
            upstream_errors.insert(kind, AtomicUsize::new(0));
        }

        LookupStats {
            lookups: AtomicUsize::new(0),
            cache_hits: AtomicUsize::new(0),
            validation_failures: AtomicUsize::new(0),
            internal_errors: AtomicUsize::new(0),
            upstream_errors,
        }
    }

    pub fn record_lookup(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_validation_failure(&self) {
        self.validation_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_internal_error(&self) {
        self.internal_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment the counter for an upstream error kind.
    ///
    /// All kinds are initialized in the constructor; a missing entry
    /// indicates a bug in initialization and is logged rather than panicking.
    pub fn record_upstream_error(&self, kind: UpstreamErrorKind) {
        if let Some(counter) = self.upstream_errors.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment upstream error counter for {:?} which is not in the map. \
                 This indicates a bug in LookupStats initialization.",
                kind
            );
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn cache_hits(&self) -> usize {
        self.cache_hits.load(Ordering::SeqCst)
    }

    pub fn validation_failures(&self) -> usize {
        self.validation_failures.load(Ordering::SeqCst)
    }

    pub fn internal_errors(&self) -> usize {
        self.internal_errors.load(Ordering::SeqCst)
    }

    /// Returns 0 if the kind is not in the map (should never happen if
    /// properly initialized).
    pub fn upstream_error_count(&self, kind: UpstreamErrorKind) -> usize {
        self.upstream_errors
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    pub fn total_upstream_errors(&self) -> usize {
        self.upstream_errors
            .values()
            .map(|c| c.load(Ordering::SeqCst))
            .sum()
    }
}

impl Default for LookupStats {
    fn default() -> Self {
        Self::new()
    }
}
