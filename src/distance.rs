//! Manhattan distance between cities, memoized per unordered city pair.
//!
//! Keys are canonical: the two names sorted lexicographically and joined with
//! `-`, so `key(A, B) == key(B, A)`. The default cache is unbounded and never
//! evicts; a bounded cache drops the least recently used pair.

use crate::city::City;
use lru::LruCache;
use std::num::NonZeroUsize;

const KEY_SEPARATOR: &str = "-";

/// `|Ax - Bx| + |Ay - By|`.
pub fn manhattan(a: &City, b: &City) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// Canonical cache key for an unordered pair of city names.
pub fn pair_key(a: &str, b: &str) -> String {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    format!("{first}{KEY_SEPARATOR}{second}")
}

/// Pairwise distance cache.
pub struct DistanceCache {
    entries: LruCache<String, u32>,
    hits: u64,
    misses: u64,
}

impl DistanceCache {
    /// Process-lifetime cache: grows with every new pair, never evicts.
    pub fn unbounded() -> Self {
        Self {
            entries: LruCache::unbounded(),
            hits: 0,
            misses: 0,
        }
    }

    /// Cache holding at most `capacity` pairs.
    pub fn bounded(capacity: NonZeroUsize) -> Self {
        Self {
            entries: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Distance between two cities, computed at most once per cached pair.
    pub fn distance(&mut self, a: &City, b: &City) -> u32 {
        let key = pair_key(a.name, b.name);
        if let Some(&d) = self.entries.get(key.as_str()) {
            self.hits += 1;
            tracing::trace!(pair = %key, distance = d, "distance cache hit");
            return d;
        }

        let d = manhattan(a, b);
        self.misses += 1;
        tracing::debug!(pair = %key, distance = d, "distance computed");
        self.entries.put(key, d);
        d
    }

    pub fn contains(&self, a: &str, b: &str) -> bool {
        self.entries.contains(pair_key(a, b).as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of distances actually computed.
    pub fn misses(&self) -> u64 {
        self.misses
    }
}

impl Default for DistanceCache {
    fn default() -> Self {
        Self::unbounded()
    }
}
