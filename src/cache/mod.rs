//! Short-lived response cache.
//!
//! Lookups for the same normalized query inside the TTL window are answered
//! from memory with the identical stored response, so repeated requests
//! re-serialize the same object byte for byte. The cache is an explicit
//! value held in server state, and time comes from an injected clock so
//! expiry is deterministic under test.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::server::LookupResponse;

/// Time source for cache expiry.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock implementation used outside tests.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct CacheEntry {
    response: LookupResponse,
    stored_at: Instant,
}

/// TTL cache of completed lookup responses, keyed by normalized query.
///
/// Expired entries are removed lazily when read; `insert` overwrites
/// unconditionally. There is no background eviction, so the map holds one
/// slot per distinct query seen within the process lifetime.
pub struct ResponseCache {
    entries: HashMap<String, CacheEntry>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl ResponseCache {
    /// Creates a cache with the given TTL and the system clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Creates a cache with an explicit clock. Tests inject a manual clock
    /// here to step time across the expiry boundary.
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        ResponseCache {
            entries: HashMap::new(),
            ttl,
            clock,
        }
    }

    /// Returns the cached response for `key` if present and still fresh.
    ///
    /// An entry that has aged past the TTL is treated as absent and removed.
    pub fn get(&mut self, key: &str) -> Option<LookupResponse> {
        let now = self.clock.now();
        match self.entries.get(key) {
            Some(entry) if now.duration_since(entry.stored_at) < self.ttl => {
                Some(entry.response.clone())
            }
            Some(_) => {
                self.entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Stores a response under `key`, overwriting any previous entry.
    pub fn insert(&mut self, key: &str, response: LookupResponse) {
        let stored_at = self.clock.now();
        self.entries
            .insert(key.to_string(), CacheEntry { response, stored_at });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
