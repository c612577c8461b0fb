//! Bounded result cache.
//!
//! Maps `(input-hash, config-fingerprint)` to a previously computed
//! [`ParseResult`]. Entries expire after their TTL; under capacity pressure
//! the entry with the fewest hits is evicted (expired entries go first).
//! Only successful parses are stored. The cache is the sole shared mutable
//! state in the crate and is owned by the `Parser`, which wraps it in a
//! mutex so concurrent parses of the same input observe at most one
//! populate.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant};

use crate::ticket::{CacheStats, ParseResult};

#[derive(Debug, Clone)]
struct CacheEntry {
    value: ParseResult,
    inserted_at: Instant,
    ttl: Duration,
    hit_count: u64,
}

impl CacheEntry {
    fn expired(&self, now: Instant) -> bool {
        now.duration_since(self.inserted_at) > self.ttl
    }
}

/// In-memory, least-hits-evicting result cache.
#[derive(Debug)]
pub(crate) struct ParseCache {
    entries: HashMap<u64, CacheEntry>,
    capacity: usize,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl ParseCache {
    pub(crate) fn new(capacity: usize) -> Self {
        ParseCache { entries: HashMap::new(), capacity: capacity.max(1), hits: 0, misses: 0, evictions: 0 }
    }

    /// Cache key: input text hashed together with the config fingerprint.
    pub(crate) fn key(text: &str, fingerprint: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        fingerprint.hash(&mut hasher);
        hasher.finish()
    }

    pub(crate) fn get(&mut self, key: u64) -> Option<ParseResult> {
        let now = Instant::now();
        match self.entries.get_mut(&key) {
            Some(entry) if !entry.expired(now) => {
                entry.hit_count += 1;
                self.hits += 1;
                Some(entry.value.clone())
            }
            Some(_) => {
                self.entries.remove(&key);
                self.misses += 1;
                None
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub(crate) fn set(&mut self, key: u64, value: ParseResult, ttl: Duration) {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.expired(now));
        self.evictions += (before - self.entries.len()) as u64;

        if self.entries.len() >= self.capacity && !self.entries.contains_key(&key) {
            // Least-hits eviction; oldest entry breaks ties deterministically.
            if let Some(&victim) = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| (entry.hit_count, entry.inserted_at))
                .map(|(k, _)| k)
            {
                self.entries.remove(&victim);
                self.evictions += 1;
            }
        }

        self.entries.insert(key, CacheEntry { value, inserted_at: now, ttl, hit_count: 0 });
    }

    pub(crate) fn stats(&self) -> CacheStats {
        let lookups = self.hits + self.misses;
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.entries.len(),
            evictions: self.evictions,
            hit_rate: if lookups == 0 { 0.0 } else { self.hits as f64 / lookups as f64 },
        }
    }
}
