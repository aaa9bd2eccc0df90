//! Merge cache for repeated pretokens.
//!
//! Natural text repeats the same words constantly, so the merged form of each
//! byte-mapped pretoken is memoized for the life of the encoder.

use ahash::AHashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

/// Unbounded, write-once memo of byte-mapped token -> merged string.
///
/// Entries are never evicted or overwritten. The map sits behind an
/// `RwLock` so a single encoder can be shared between threads; when two
/// threads miss on the same key, the first value stored is kept and both
/// callers get it back.
#[derive(Debug, Default)]
pub struct EncodeCache {
    /// byte-mapped token -> space-joined merged symbols
    cache: RwLock<AHashMap<String, String>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl EncodeCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cache with room for `capacity` entries up front.
    ///
    /// This is only an allocation hint; the cache still grows without bound.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache: RwLock::new(AHashMap::with_capacity(capacity)),
            ..Self::default()
        }
    }

    /// Get the merged string for `key`, computing and storing it on a miss.
    ///
    /// # Arguments
    /// * `key` - The byte-mapped token
    /// * `merge` - Computes the merged string; not called on a hit
    pub fn get_or_merge<F>(&self, key: &str, merge: F) -> String
    where
        F: FnOnce(&str) -> String,
    {
        {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(merged) = cache.get(key) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return merged.clone();
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        log::trace!("merge cache miss for {:?}", key);

        // Merge outside the lock; concurrent misses on the same key compute
        // the same value.
        let merged = merge(key);

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        cache.entry(key.to_string()).or_insert(merged).clone()
    }

    /// Stored value for `key`, if any. Does not count as a hit.
    pub fn get(&self, key: &str) -> Option<String> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Whether `key` has been merged before.
    pub fn contains(&self, key: &str) -> bool {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    /// Get the number of entries in the cache.
    pub fn len(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Current number of entries
    pub entries: usize,
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that ran the merge
    pub misses: u64,
}

impl CacheStats {
    /// Fraction of lookups answered from the cache, `None` before the first
    /// lookup.
    pub fn hit_rate(&self) -> Option<f64> {
        let total = self.hits + self.misses;
        (total > 0).then(|| self.hits as f64 / total as f64)
    }
}
